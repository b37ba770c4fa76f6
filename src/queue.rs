//! FIFO queue of items waiting to be crafted

use std::collections::VecDeque;

/// Duplicates are allowed: the same weapon can be queued several times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CraftQueue {
    items: VecDeque<String>,
}

impl CraftQueue {
    pub fn enqueue(&mut self, item: impl Into<String>) {
        self.items.push_back(item.into());
    }

    pub fn dequeue_front(&mut self) -> Option<String> {
        self.items.pop_front()
    }

    pub fn peek_front(&self) -> Option<&str> {
        self.items.front().map(String::as_str)
    }

    /// Remove the first entry equal to `item`, keeping the order of the rest
    pub fn remove_first_occurrence(&mut self, item: &str) -> bool {
        match self.items.iter().position(|queued| queued == item) {
            Some(pos) => {
                self.items.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn pop_back(&mut self) -> Option<String> {
        self.items.pop_back()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(String::as_str)
    }
}

impl FromIterator<String> for CraftQueue {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
