//! Curriculum timetabling engine for the U-Engine ecosystem.
//!
//! Assigns each course to exactly one (instructor, slot) pair by
//! difficulty-ranked backtracking search under hard constraints
//! (qualification, slot occupancy, daily and weekly hour caps, declared
//! availability), maximizing a soft-constraint quality score within a
//! wall-clock budget. Infeasible or out-of-time runs return the best
//! partial timetable found instead of failing.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Instructor`, `Day`, `Slot`,
//!   `Timetable`, `ScheduledBlock`, plus weekly slot generation
//! - **`validation`**: Input integrity checks (duplicate IDs, unknown
//!   course references, hour ranges)
//! - **`ranking`**: Difficulty ordering (scarcity + term weight)
//! - **`solver`**: Compatibility index, constraint validator,
//!   backtracking engine, and scorer
//!
//! # Architecture
//!
//! The engine is a pure, single-invocation computation over an
//! in-memory problem snapshot: persistence, rendering, and import of
//! instructor/course records are the caller's concern. Everything the
//! caller needs back travels in `TimetableResult`.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern
//!   Approach", Ch. 6: Constraint Satisfaction Problems
//! - Haralick & Elliott (1980), "Increasing tree search efficiency for
//!   constraint satisfaction problems"

pub mod models;
pub mod ranking;
pub mod solver;
pub mod validation;
