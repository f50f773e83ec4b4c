// parser.rs

use crate::config::MAX_LINE;

pub const BACKGROUND_MARKER: &str = "&";

// One token per character plus the trailing one.
pub const MAX_TOKENS: usize = MAX_LINE + 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedLine {
    tokens: Vec<String>,
    background: bool,
}

impl ParsedLine {
    /// Splits on every single space, so runs of spaces yield empty tokens and an
    /// empty line yields one empty token. Tokens past `MAX_TOKENS` are dropped.
    pub fn parse(line: &str) -> Self {
        let tokens: Vec<String> = line
            .split(' ')
            .take(MAX_TOKENS)
            .map(str::to_string)
            .collect();
        let background = tokens.last().map(|t| t == BACKGROUND_MARKER).unwrap_or(false);
        Self { tokens, background }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn command(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or("")
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    pub fn background(&self) -> bool {
        self.background
    }

    /// The words handed to the launcher: everything before the first empty
    /// token or background marker.
    pub fn argv(&self) -> &[String] {
        let end = self
            .tokens
            .iter()
            .position(|t| t.is_empty() || t == BACKGROUND_MARKER)
            .unwrap_or(self.tokens.len());
        &self.tokens[..end]
    }
}

/// A positive decimal made only of ASCII digits; no sign, no spaces.
pub fn parse_command_number(word: &str) -> Option<u64> {
    if word.is_empty() || !word.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    word.parse::<u64>().ok().filter(|n| *n > 0)
}

/// Cuts `line` down to at most `max` characters.
pub fn clamp_line(line: &str, max: usize) -> &str {
    match line.char_indices().nth(max) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}
