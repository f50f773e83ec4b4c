// config.rs

use std::path::PathBuf;

pub const MAX_LINE: usize = 80;
pub const HIST_SIZE: usize = 10;
pub const HISTORY_FILE_NAME: &str = ".frank_shell_history";
pub const DEFAULT_PROMPT: &str = "Frank-Shell> ";

const HISTFILE_VAR: &str = "FRANK_SHELL_HISTFILE";
const PROMPT_VAR: &str = "FRANK_SHELL_PROMPT";
const HISTSIZE_VAR: &str = "FRANK_SHELL_HISTSIZE";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShellConfig {
    pub prompt: String,
    pub history_path: PathBuf,
    pub history_size: usize,
    pub max_line: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            history_path: PathBuf::from(HISTORY_FILE_NAME),
            history_size: HIST_SIZE,
            max_line: MAX_LINE,
        }
    }
}

impl ShellConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(path) = lookup(HISTFILE_VAR).filter(|p| !p.is_empty()) {
            config.history_path = PathBuf::from(path);
        }
        if let Some(prompt) = lookup(PROMPT_VAR) {
            config.prompt = prompt;
        }
        if let Some(raw) = lookup(HISTSIZE_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.history_size = n,
                _ => log::warn!("ignoring {}={:?}: expected a positive integer", HISTSIZE_VAR, raw),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ShellConfig::from_lookup(|_| None);
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.prompt, "Frank-Shell> ");
        assert_eq!(config.history_path, PathBuf::from(".frank_shell_history"));
        assert_eq!(config.history_size, 10);
        assert_eq!(config.max_line, 80);
    }

    #[test]
    fn overrides_from_environment() {
        let config = ShellConfig::from_lookup(lookup_from(&[
            ("FRANK_SHELL_HISTFILE", "/tmp/hist"),
            ("FRANK_SHELL_PROMPT", "> "),
            ("FRANK_SHELL_HISTSIZE", "25"),
        ]));
        assert_eq!(config.history_path, PathBuf::from("/tmp/hist"));
        assert_eq!(config.prompt, "> ");
        assert_eq!(config.history_size, 25);
    }

    #[test]
    fn bad_history_size_keeps_default() {
        for bad in ["0", "-3", "lots"] {
            let config = ShellConfig::from_lookup(lookup_from(&[("FRANK_SHELL_HISTSIZE", bad)]));
            assert_eq!(config.history_size, HIST_SIZE);
        }
    }
}
