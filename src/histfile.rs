// histfile.rs

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::MAX_LINE;
use crate::history::{HistoryEntry, HistoryStore};
use crate::parser::{clamp_line, parse_command_number};

pub const RECORD_DELIMITER: char = '@';

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("could not read history file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("history file corrupted at line {line}: {reason}")]
    Corrupted { line: usize, reason: &'static str },
    #[error("no command numbers left")]
    NumbersExhausted,
    #[error("could not write history file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// On-disk history: one `<number>@<text>` record per line, oldest first.
#[derive(Clone, Debug)]
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pushes every record into `store` in file order, stopping at the first
    /// bad one. A file that does not exist loads nothing.
    pub fn load_into(&self, store: &mut HistoryStore) -> Result<(), HistoryError> {
        let contents = match std::fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no history file at {}", self.path.display());
                return Ok(());
            }
            Err(source) => {
                return Err(HistoryError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let body = contents.strip_suffix(b"\n").unwrap_or(&contents[..]);
        if body.is_empty() {
            return Ok(());
        }
        // Records are decoded one at a time so a bad one keeps those before it.
        let mut previous = 0;
        for (idx, raw) in body.split(|b| *b == b'\n').enumerate() {
            let corrupted = |reason| HistoryError::Corrupted {
                line: idx + 1,
                reason,
            };
            let line = std::str::from_utf8(raw).map_err(|_| corrupted("invalid UTF-8"))?;
            let line = line.strip_suffix('\r').unwrap_or(line);
            let entry = parse_record(line).map_err(corrupted)?;
            if entry.number <= previous {
                return Err(HistoryError::Corrupted {
                    line: idx + 1,
                    reason: "command numbers must increase",
                });
            }
            previous = entry.number;
            store.push_entry(entry);
        }
        log::debug!("loaded {} history entries from {}", store.len(), self.path.display());
        Ok(())
    }

    /// Rewrites the whole file from `store`.
    pub fn save(&self, store: &HistoryStore) -> Result<(), HistoryError> {
        let to_write_error = |source| HistoryError::Write {
            path: self.path.clone(),
            source,
        };
        let file = File::create(&self.path).map_err(to_write_error)?;
        let mut out = BufWriter::new(file);
        for entry in store.list() {
            writeln!(out, "{}", format_record(entry)).map_err(to_write_error)?;
        }
        out.flush().map_err(to_write_error)
    }
}

pub fn format_record(entry: &HistoryEntry) -> String {
    format!("{}{}{}", entry.number, RECORD_DELIMITER, entry.text)
}

/// Splits at the first delimiter; the number side never contains one, so
/// delimiters inside the text come back unchanged.
pub fn parse_record(line: &str) -> Result<HistoryEntry, &'static str> {
    let (number, text) = line
        .split_once(RECORD_DELIMITER)
        .ok_or("missing delimiter")?;
    let number = parse_command_number(number).ok_or("invalid command number")?;
    // The next add needs room for one more number.
    if number == u64::MAX {
        return Err("command number out of range");
    }
    if text.is_empty() {
        return Err("empty command text");
    }
    Ok(HistoryEntry {
        number,
        text: clamp_line(text, MAX_LINE).to_string(),
    })
}
