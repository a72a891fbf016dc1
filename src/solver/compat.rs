//! Precomputed course/instructor/slot compatibility.
//!
//! Built once per run, read-only thereafter. Answers two questions the
//! search asks at every node without re-deriving them:
//! - which instructors may teach a given course, scarcest-first
//! - which slots an instructor can ever occupy (lunch, weekend, and
//!   availability filtering applied up front)

use std::collections::HashMap;

use super::SolverOptions;
use crate::models::{Course, Instructor, Slot};

/// Compatibility index over one problem instance.
///
/// Instructors are addressed by their index into the caller's slice.
#[derive(Debug, Clone)]
pub struct CompatibilityIndex {
    per_course: HashMap<String, Vec<usize>>,
    per_instructor: Vec<Vec<Slot>>,
}

impl CompatibilityIndex {
    /// Builds the index.
    ///
    /// `per_course` lists qualified instructors sorted ascending by the
    /// size of their teachable set, so instructors with few options are
    /// tried against their few eligible courses early (most-constrained-
    /// resource-first). Ties keep input order.
    pub fn build(
        courses: &[Course],
        instructors: &[Instructor],
        slots: &[Slot],
        options: &SolverOptions,
    ) -> Self {
        let per_instructor = instructors
            .iter()
            .map(|instructor| {
                slots
                    .iter()
                    .filter(|slot| {
                        !slot.overlaps_lunch()
                            && !(options.avoid_weekends && slot.day.is_weekend())
                            && instructor.is_available_for(slot)
                    })
                    .copied()
                    .collect()
            })
            .collect();

        let mut per_course = HashMap::with_capacity(courses.len());
        for course in courses {
            let mut qualified: Vec<usize> = instructors
                .iter()
                .enumerate()
                .filter(|(_, i)| i.can_teach(&course.id))
                .map(|(idx, _)| idx)
                .collect();
            qualified.sort_by_key(|&idx| instructors[idx].teachable_courses.len());
            per_course.insert(course.id.clone(), qualified);
        }

        Self {
            per_course,
            per_instructor,
        }
    }

    /// Qualified instructor indices for a course, scarcest-first.
    pub fn candidates_for(&self, course_id: &str) -> &[usize] {
        self.per_course
            .get(course_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Slots an instructor can ever occupy.
    pub fn slots_for(&self, instructor_idx: usize) -> &[Slot] {
        &self.per_instructor[instructor_idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AvailabilityWindow, Day};

    fn sample_slots() -> Vec<Slot> {
        vec![
            Slot::new(Day::Monday, 8, 10),
            Slot::new(Day::Monday, 11, 13), // Overlaps lunch
            Slot::new(Day::Monday, 13, 15),
            Slot::new(Day::Saturday, 8, 10),
        ]
    }

    #[test]
    fn test_lunch_slots_excluded() {
        let instructors = vec![Instructor::new("P1")];
        let index = CompatibilityIndex::build(
            &[],
            &instructors,
            &sample_slots(),
            &SolverOptions::default(),
        );
        assert!(index.slots_for(0).iter().all(|s| !s.overlaps_lunch()));
        assert_eq!(index.slots_for(0).len(), 3);
    }

    #[test]
    fn test_weekend_exclusion() {
        let instructors = vec![Instructor::new("P1")];
        let options = SolverOptions::default().with_avoid_weekends(true);
        let index = CompatibilityIndex::build(&[], &instructors, &sample_slots(), &options);
        assert!(index.slots_for(0).iter().all(|s| !s.day.is_weekend()));
    }

    #[test]
    fn test_availability_restriction() {
        let instructors = vec![Instructor::new("P1")
            .with_availability(AvailabilityWindow::new(Day::Monday, 13, 17))];
        let index = CompatibilityIndex::build(
            &[],
            &instructors,
            &sample_slots(),
            &SolverOptions::default(),
        );
        assert_eq!(index.slots_for(0), &[Slot::new(Day::Monday, 13, 15)]);
    }

    #[test]
    fn test_scarcest_instructor_first() {
        let courses = vec![Course::new("SHARED", "Shared course")];
        let instructors = vec![
            Instructor::new("GENERALIST")
                .with_course("SHARED")
                .with_course("OTHER1")
                .with_course("OTHER2"),
            Instructor::new("SPECIALIST").with_course("SHARED"),
        ];
        let index = CompatibilityIndex::build(
            &courses,
            &instructors,
            &sample_slots(),
            &SolverOptions::default(),
        );
        // Specialist (1 teachable course) ordered before generalist (3)
        assert_eq!(index.candidates_for("SHARED"), &[1, 0]);
    }

    #[test]
    fn test_unknown_course_has_no_candidates() {
        let index = CompatibilityIndex::build(
            &[],
            &[Instructor::new("P1")],
            &sample_slots(),
            &SolverOptions::default(),
        );
        assert!(index.candidates_for("MISSING").is_empty());
    }
}
