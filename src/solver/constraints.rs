//! Hard-constraint validation for tentative assignments.
//!
//! A single pure predicate deciding whether assigning (instructor,
//! course, slot) is legal given the current partial timetable. Checks
//! run cheapest-reject-first so most illegal candidates fail before the
//! per-block scans. Preferred-hour adherence is a soft concern handled
//! by the scorer, never rejected here.

use super::{Occupancy, SolverOptions};
use crate::models::{Course, Instructor, Slot, Timetable};

/// Whether the tentative assignment satisfies every hard constraint.
///
/// In order:
/// 1. The instructor is qualified to teach the course.
/// 2. The slot is unoccupied system-wide.
/// 3. The instructor's blocks on the slot's day are under the daily cap.
/// 4. The slot overlaps none of the instructor's existing blocks.
/// 5. Assigned hours plus the slot's width stay within the weekly cap.
/// 6. Weekend slots are rejected when `avoid_weekends` is set.
/// 7. The slot falls fully inside a declared availability window.
pub fn is_valid(
    instructor: &Instructor,
    course: &Course,
    slot: &Slot,
    timetable: &Timetable,
    occupancy: &Occupancy,
    options: &SolverOptions,
) -> bool {
    if !instructor.can_teach(&course.id) {
        return false;
    }

    if !occupancy.is_free(slot) {
        return false;
    }

    if timetable.blocks_on_day(&instructor.id, slot.day)
        >= options.effective_max_classes_per_day()
    {
        return false;
    }

    let existing = timetable.blocks_for(&instructor.id);
    if existing
        .iter()
        .any(|b| b.day == slot.day && slot.start_hour < b.end_hour && slot.end_hour > b.start_hour)
    {
        return false;
    }

    if timetable.assigned_hours(&instructor.id) + slot.duration_hours()
        > instructor.max_teaching_hours
    {
        return false;
    }

    if options.avoid_weekends && slot.day.is_weekend() {
        return false;
    }

    instructor.is_available_for(slot)
}
