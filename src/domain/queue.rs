use super::Item;
use crate::error::{MswpError, Result};

/// Items still awaiting a decision, plus the cursor of the one on screen.
///
/// `cursor` always satisfies `0 <= cursor <= len`; `cursor == len` means there
/// is nothing left to review. Kept items stay in the sequence behind the
/// cursor, deleted items are removed from it.
#[derive(Debug, Default)]
pub struct WorkQueue {
    items: Vec<Item>,
    cursor: usize,
}

impl WorkQueue {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items, cursor: 0 }
    }

    pub fn current(&self) -> Option<&Item> {
        self.items.get(self.cursor)
    }

    pub fn advance(&mut self) {
        if self.cursor < self.items.len() {
            self.cursor += 1;
        }
    }

    pub fn retreat(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Removes the item under the cursor; the cursor then points at its successor.
    pub fn remove_current(&mut self) -> Result<Item> {
        if self.cursor >= self.items.len() {
            return Err(MswpError::OutOfRange {
                operation: "remove item",
                reason: "cursor is past the end of the queue",
            });
        }
        Ok(self.items.remove(self.cursor))
    }

    /// Puts an item back at `index`, clamped to `[0, len]`. Returns the index used.
    pub fn insert_at(&mut self, index: usize, item: Item) -> usize {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        index
    }

    /// Moves the cursor, clamped to `[0, len]`
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index.min(self.items.len());
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.items.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.items.len()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}
