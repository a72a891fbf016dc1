//! Timetabling domain models.
//!
//! Core data types for representing a weekly curriculum timetabling
//! problem and its solution: who may teach what (`Instructor`,
//! `Course`), when teaching can happen (`Day`, `Slot`), and the
//! resulting assignment map (`Timetable`).
//!
//! All inputs are immutable snapshots owned by the caller; the engine
//! copies nothing back into them.

mod course;
mod instructor;
mod slot;
mod timetable;

pub use course::Course;
pub use instructor::{AvailabilityWindow, Instructor};
pub use slot::{Day, Slot, SlotGenerator, LUNCH_END_HOUR, LUNCH_START_HOUR};
pub use timetable::{ScheduledBlock, Timetable, TimetableConflict};
