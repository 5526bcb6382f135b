//! Bounded, newest-first battle log.

use im::Vector;
use serde::{Deserialize, Serialize};

/// Human-readable event log consumed by the view.
///
/// Entries are stored newest first; once `capacity` is exceeded the oldest
/// entry is dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLog {
    entries: Vector<String>,
    capacity: usize,
}

impl BattleLog {
    /// Create an empty log. A zero capacity is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vector::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record a new entry at the front.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push_front(entry.into());
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Most recent entry.
    #[must_use]
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum retained entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
