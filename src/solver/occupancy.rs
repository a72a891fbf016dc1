//! Run-local slot occupancy index.
//!
//! Tracks which slots are currently claimed system-wide: at most one
//! (instructor, slot) pairing may hold a slot at a time. Claimed and
//! released in lock-step with timetable mutation during backtracking;
//! discarded when the search returns.

use std::collections::HashMap;

use crate::models::{Day, Slot};

/// Slot-key → occupying instructor map.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    claimed: HashMap<(Day, i32, i32), String>,
}

impl Occupancy {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nobody holds the slot.
    #[inline]
    pub fn is_free(&self, slot: &Slot) -> bool {
        !self.claimed.contains_key(&slot.key())
    }

    /// The instructor currently holding the slot, if any.
    pub fn occupant(&self, slot: &Slot) -> Option<&str> {
        self.claimed.get(&slot.key()).map(String::as_str)
    }

    /// Claims a slot for an instructor. Returns the previous occupant,
    /// which is always `None` when the engine's undo discipline holds.
    pub fn claim(&mut self, slot: &Slot, instructor_id: &str) -> Option<String> {
        self.claimed.insert(slot.key(), instructor_id.to_string())
    }

    /// Releases a slot, returning who held it.
    pub fn release(&mut self, slot: &Slot) -> Option<String> {
        self.claimed.remove(&slot.key())
    }

    /// Number of currently claimed slots.
    pub fn claimed_count(&self) -> usize {
        self.claimed.len()
    }
}
