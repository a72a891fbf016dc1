//! Course model.
//!
//! One course entry is one unit of scheduling demand: it receives exactly
//! one (instructor, slot) assignment per run. Callers needing several
//! weekly blocks for the same subject supply several course entries.

use serde::{Deserialize, Serialize};

/// A course to be placed on the timetable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Academic term (semester) weight. Higher terms are considered
    /// harder to place and are attempted first by the ranker.
    pub term_weight: i32,
}

impl Course {
    /// Creates a new course.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            term_weight: 1,
        }
    }

    /// Sets the term weight.
    pub fn with_term_weight(mut self, term_weight: i32) -> Self {
        self.term_weight = term_weight;
        self
    }
}
