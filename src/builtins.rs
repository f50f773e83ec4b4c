// builtins.rs

use crate::history::HistoryStore;
use crate::parser::{parse_command_number, ParsedLine};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Exit,
    History,
    RecallRecent,
    /// `None` when the argument is missing, non-numeric or zero.
    RecallNumber(Option<u64>),
    External,
}

impl Command {
    /// Built-in names are matched exactly and case-sensitively.
    pub fn classify(parsed: &ParsedLine) -> Self {
        match parsed.command() {
            "exit" | "quit" => Command::Exit,
            "history" | "h" | "hist" => Command::History,
            "rr" => Command::RecallRecent,
            "r" => Command::RecallNumber(parsed.arg(1).and_then(parse_command_number)),
            _ => Command::External,
        }
    }
}

pub fn format_history(store: &HistoryStore) -> Vec<String> {
    store
        .list()
        .map(|entry| format!("[{:>10}] {}", entry.number, entry.text))
        .collect()
}
