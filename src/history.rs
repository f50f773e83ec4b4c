// history.rs

use std::collections::VecDeque;

use crate::histfile::{HistoryError, HistoryFile};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub number: u64,
    pub text: String,
}

/// Bounded, numbered command history, oldest entry first.
///
/// Numbers only ever grow: a new entry gets one more than the highest number
/// currently held, and evicting the oldest entry never frees its number for
/// reuse. When backed by a [`HistoryFile`] every `add` writes the whole ring
/// back to disk.
pub struct HistoryStore {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    backing: Option<HistoryFile>,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            backing: None,
        }
    }

    /// Loads the store from `file` and keeps it as the write-through target.
    ///
    /// A missing file gives an empty store. On a corrupted or unreadable file
    /// the store holds whatever was parsed before the problem, and the error
    /// is handed back for reporting.
    pub fn load(file: HistoryFile, capacity: usize) -> (Self, Option<HistoryError>) {
        let mut store = Self::new(capacity);
        let error = file.load_into(&mut store).err();
        store.backing = Some(file);
        (store, error)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn last_number(&self) -> u64 {
        self.entries.back().map(|e| e.number).unwrap_or(0)
    }

    /// Records `text` under the next number and saves. The entry stays in
    /// memory even if the save fails.
    pub fn add(&mut self, text: &str) -> Result<u64, HistoryError> {
        let number = self
            .last_number()
            .checked_add(1)
            .ok_or(HistoryError::NumbersExhausted)?;
        self.push_entry(HistoryEntry {
            number,
            text: text.to_string(),
        });
        self.save()?;
        Ok(number)
    }

    pub fn save(&self) -> Result<(), HistoryError> {
        match &self.backing {
            Some(file) => file.save(self),
            None => Ok(()),
        }
    }

    // Numbers are kept verbatim; callers guarantee they increase.
    pub(crate) fn push_entry(&mut self, entry: HistoryEntry) {
        if self.is_full() {
            if let Some(evicted) = self.entries.pop_front() {
                log::debug!("evicting history entry {}", evicted.number);
            }
        }
        self.entries.push_back(entry);
    }

    pub fn most_recent(&self) -> Option<&str> {
        self.entries.back().map(|e| e.text.as_str())
    }

    pub fn by_number(&self, number: u64) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.number == number)
            .map(|e| e.text.as_str())
    }

    pub fn list(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}
