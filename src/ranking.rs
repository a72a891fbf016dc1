//! Course difficulty ranking.
//!
//! Orders courses so that hard-to-place ones are attempted first:
//! scarce qualified instructors and high term weight both raise
//! difficulty. A good static ordering makes the backtracking engine
//! fail early on over-constrained branches instead of deep in the tree.
//!
//! # Reference
//! Haralick & Elliott (1980), "Increasing tree search efficiency for
//! constraint satisfaction problems" (fail-first principle)

use serde::{Deserialize, Serialize};

use crate::models::{Course, Instructor};

/// Difficulty assigned to a course no instructor can teach.
///
/// A sentinel rather than an error. It outweighs any realistic
/// scarcity term, so unteachable courses rank first in the descending
/// order; the engine partitions them out before search and reports
/// them as unassignable rather than ever attempting them.
pub const UNTEACHABLE_PENALTY: f64 = 100.0;

/// A course annotated with its placement difficulty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCourse {
    /// The underlying course (copied; the caller's list is untouched).
    pub course: Course,
    /// Heuristic difficulty, higher = placed earlier.
    pub difficulty: f64,
    /// Number of instructors qualified to teach this course.
    pub qualified_instructors: usize,
}

impl RankedCourse {
    /// Whether no instructor can teach this course.
    #[inline]
    pub fn is_unteachable(&self) -> bool {
        self.qualified_instructors == 0
    }
}

/// Ranks courses in descending difficulty.
///
/// `difficulty = term_weight * 10 + 20 / qualified_count`, with
/// [`UNTEACHABLE_PENALTY`] substituted for the scarcity term when no
/// instructor qualifies. Ties keep the caller's input order (stable
/// sort).
pub fn rank(courses: &[Course], instructors: &[Instructor]) -> Vec<RankedCourse> {
    let mut ranked: Vec<RankedCourse> = courses
        .iter()
        .map(|course| {
            let qualified = instructors
                .iter()
                .filter(|i| i.can_teach(&course.id))
                .count();
            let scarcity = if qualified > 0 {
                20.0 / qualified as f64
            } else {
                UNTEACHABLE_PENALTY
            };
            RankedCourse {
                course: course.clone(),
                difficulty: course.term_weight as f64 * 10.0 + scarcity,
                qualified_instructors: qualified,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.difficulty
            .partial_cmp(&a.difficulty)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}
