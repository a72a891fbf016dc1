//! Constraint-based timetable assignment.
//!
//! The solver pipeline: the [`crate::ranking`] module orders courses by
//! difficulty, [`CompatibilityIndex`] precomputes who can teach what and
//! when, [`is_valid`] gates every tentative assignment, and
//! [`TimetableSolver`] runs the depth-first search with memoized failure
//! states and anytime best-partial capture. The [`score`] module turns
//! any (partial) timetable into a comparable quality number.
//!
//! Single-threaded and synchronous; the time-limit check inside the
//! search is the only suspension point. A solver call shares no state
//! with other calls, so concurrent runs need no coordination.

mod compat;
mod config;
mod constraints;
mod engine;
mod occupancy;
pub mod score;

pub use compat::CompatibilityIndex;
pub use config::SolverOptions;
pub use constraints::is_valid;
pub use engine::{SearchStats, TimetableResult, TimetableSolver};
pub use occupancy::Occupancy;
pub use score::ScoreBreakdown;
