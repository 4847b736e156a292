//! Bounded conversation memory.
//!
//! Holds the rendered message lines (`User: ...`, `Bot: ...`) that get
//! replayed into every prompt. Oldest lines are evicted first.

use std::collections::VecDeque;

/// Lines kept when no bound is configured.
pub const DEFAULT_MEMORY_LENGTH: usize = 50;

/// FIFO buffer of rendered message lines, never longer than its bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBuffer {
    entries: VecDeque<String>,
    bound: usize,
}

impl MemoryBuffer {
    pub fn new(bound: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(bound.min(128)),
            bound,
        }
    }

    /// Append a line, evicting the oldest lines if the bound is exceeded.
    /// With a bound of zero nothing is retained.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push_back(entry.into());
        self.truncate();
    }

    /// Change the bound and drop the oldest lines that no longer fit.
    pub fn resize(&mut self, bound: usize) {
        self.bound = bound;
        self.truncate();
    }

    fn truncate(&mut self) {
        while self.entries.len() > self.bound {
            self.entries.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn bound(&self) -> usize {
        self.bound
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lines from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl Default for MemoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_LENGTH)
    }
}
