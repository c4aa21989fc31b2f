use super::Item;
use std::path::PathBuf;

/// A reversible decision. `queue_index` is the cursor at the time it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEntry {
    Kept {
        item: Item,
        queue_index: usize,
    },
    Deleted {
        item: Item,
        original_path: PathBuf,
        quarantine_path: PathBuf,
        queue_index: usize,
    },
}

impl HistoryEntry {
    pub fn item(&self) -> &Item {
        match self {
            HistoryEntry::Kept { item, .. } | HistoryEntry::Deleted { item, .. } => item,
        }
    }

    pub fn queue_index(&self) -> usize {
        match self {
            HistoryEntry::Kept { queue_index, .. } | HistoryEntry::Deleted { queue_index, .. } => {
                *queue_index
            }
        }
    }
}

/// Last-in-first-out stack of decisions; undo walks it one entry at a time
#[derive(Debug, Default)]
pub struct ActionHistory {
    entries: Vec<HistoryEntry>,
}

impl ActionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
