//! Timetable (solution) model.
//!
//! A timetable maps each instructor to the ordered list of blocks
//! assigned so far. The search engine mutates one timetable in place
//! (assign on descent, pop on backtrack) and deep-copies it whenever a
//! best-so-far capture is taken; returned timetables are frozen.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::{Day, Instructor, Slot};

/// One assigned teaching block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduledBlock {
    /// Assigned course ID.
    pub course_id: String,
    /// Day of the week.
    pub day: Day,
    /// Start hour (inclusive).
    pub start_hour: i32,
    /// End hour (exclusive).
    pub end_hour: i32,
}

impl ScheduledBlock {
    /// Creates a block from a course and slot.
    pub fn new(course_id: impl Into<String>, slot: Slot) -> Self {
        Self {
            course_id: course_id.into(),
            day: slot.day,
            start_hour: slot.start_hour,
            end_hour: slot.end_hour,
        }
    }

    /// Block width in hours.
    #[inline]
    pub fn duration_hours(&self) -> i32 {
        self.end_hour - self.start_hour
    }

    /// The slot this block occupies.
    #[inline]
    pub fn slot(&self) -> Slot {
        Slot::new(self.day, self.start_hour, self.end_hour)
    }

    /// Whether two blocks overlap in (day, time).
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day
            && self.start_hour < other.end_hour
            && other.start_hour < self.end_hour
    }
}

/// A timetable conflict found by [`Timetable::find_conflicts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimetableConflict {
    /// Two blocks for one instructor overlap in time.
    BlockOverlap {
        instructor_id: String,
        first: ScheduledBlock,
        second: ScheduledBlock,
    },
    /// An instructor's assigned hours exceed their weekly cap.
    HourCapExceeded {
        instructor_id: String,
        assigned_hours: i32,
        max_hours: i32,
    },
}

/// Per-instructor assignment map.
///
/// Keyed by instructor ID in a `BTreeMap` so iteration order is
/// canonical: the search engine's state fingerprint and all rendered
/// output are deterministic for a given assignment set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    /// Instructor ID → assigned blocks, in assignment order.
    pub assignments: BTreeMap<String, Vec<ScheduledBlock>>,
}

impl Timetable {
    /// Creates an empty timetable with one entry per instructor.
    pub fn for_instructors(instructors: &[Instructor]) -> Self {
        Self {
            assignments: instructors
                .iter()
                .map(|i| (i.id.clone(), Vec::new()))
                .collect(),
        }
    }

    /// Appends a block to an instructor's list.
    pub fn push_block(&mut self, instructor_id: &str, block: ScheduledBlock) {
        self.assignments
            .entry(instructor_id.to_string())
            .or_default()
            .push(block);
    }

    /// Removes and returns an instructor's most recent block.
    pub fn pop_block(&mut self, instructor_id: &str) -> Option<ScheduledBlock> {
        self.assignments
            .get_mut(instructor_id)
            .and_then(|blocks| blocks.pop())
    }

    /// Blocks assigned to an instructor.
    pub fn blocks_for(&self, instructor_id: &str) -> &[ScheduledBlock] {
        self.assignments
            .get(instructor_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total assigned hours for an instructor.
    pub fn assigned_hours(&self, instructor_id: &str) -> i32 {
        self.blocks_for(instructor_id)
            .iter()
            .map(|b| b.duration_hours())
            .sum()
    }

    /// Number of an instructor's blocks on a given day.
    pub fn blocks_on_day(&self, instructor_id: &str, day: Day) -> usize {
        self.blocks_for(instructor_id)
            .iter()
            .filter(|b| b.day == day)
            .count()
    }

    /// Assigned hours for an instructor on a given day.
    pub fn hours_on_day(&self, instructor_id: &str, day: Day) -> i32 {
        self.blocks_for(instructor_id)
            .iter()
            .filter(|b| b.day == day)
            .map(|b| b.duration_hours())
            .sum()
    }

    /// Distinct days on which an instructor teaches.
    pub fn distinct_days(&self, instructor_id: &str) -> usize {
        self.blocks_for(instructor_id)
            .iter()
            .map(|b| b.day)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Fraction of the hour cap an instructor is using.
    ///
    /// Returns `None` if `max_hours` is zero.
    pub fn utilization(&self, instructor_id: &str, max_hours: i32) -> Option<f64> {
        if max_hours <= 0 {
            return None;
        }
        Some(self.assigned_hours(instructor_id) as f64 / max_hours as f64)
    }

    /// Distinct course IDs with at least one block.
    pub fn assigned_course_ids(&self) -> HashSet<&str> {
        self.assignments
            .values()
            .flatten()
            .map(|b| b.course_id.as_str())
            .collect()
    }

    /// Total number of assigned blocks.
    pub fn block_count(&self) -> usize {
        self.assignments.values().map(Vec::len).sum()
    }

    /// Number of instructors with at least one block.
    pub fn instructors_used(&self) -> usize {
        self.assignments.values().filter(|b| !b.is_empty()).count()
    }

    /// Audits a finished timetable against overlap and hour-cap
    /// invariants, returning every conflict found.
    ///
    /// A timetable produced by the engine is conflict-free; this exists
    /// so callers can re-check timetables they have edited or merged.
    pub fn find_conflicts(&self, instructors: &[Instructor]) -> Vec<TimetableConflict> {
        let mut conflicts = Vec::new();

        for instructor in instructors {
            let blocks = self.blocks_for(&instructor.id);

            for i in 0..blocks.len() {
                for j in (i + 1)..blocks.len() {
                    if blocks[i].overlaps(&blocks[j]) {
                        conflicts.push(TimetableConflict::BlockOverlap {
                            instructor_id: instructor.id.clone(),
                            first: blocks[i].clone(),
                            second: blocks[j].clone(),
                        });
                    }
                }
            }

            let assigned = self.assigned_hours(&instructor.id);
            if assigned > instructor.max_teaching_hours {
                conflicts.push(TimetableConflict::HourCapExceeded {
                    instructor_id: instructor.id.clone(),
                    assigned_hours: assigned,
                    max_hours: instructor.max_teaching_hours,
                });
            }
        }

        conflicts
    }

    /// Renders a plain-text per-instructor roster.
    pub fn render_roster(&self, instructors: &[Instructor]) -> String {
        let mut out = String::new();
        for instructor in instructors {
            let label = if instructor.name.is_empty() {
                instructor.id.clone()
            } else {
                format!("{} ({})", instructor.name, instructor.id)
            };
            out.push_str(&format!("Instructor {label}:\n"));

            let blocks = self.blocks_for(&instructor.id);
            if blocks.is_empty() {
                out.push_str("  - no assignments\n");
            } else {
                for b in blocks {
                    out.push_str(&format!(
                        "  - {} on {:?} {}:00-{}:00\n",
                        b.course_id, b.day, b.start_hour, b.end_hour
                    ));
                }
            }
            out.push('\n');
        }
        out
    }
}
