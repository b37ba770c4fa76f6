//! Bounded record of recently crafted items
//!
//! New entries go on the back. When full, the oldest entry is evicted from
//! the front, while `undo_last` takes from the back.

use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl Default for CraftHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl CraftHistory {
    /// A capacity of zero keeps nothing
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `item`, returning the evicted oldest entry if any
    pub fn record(&mut self, item: impl Into<String>) -> Option<String> {
        if self.capacity == 0 {
            return None;
        }
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(item.into());
        evicted
    }

    pub fn undo_last(&mut self) -> Option<String> {
        self.entries.pop_back()
    }

    pub fn peek_last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
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

    /// Oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.entries.iter().map(String::as_str)
    }
}
