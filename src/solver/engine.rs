//! Backtracking timetable search.
//!
//! # Algorithm
//!
//! 1. Rank courses by difficulty (descending); set aside courses with
//!    no qualified instructor as unassignable.
//! 2. Build the compatibility index once.
//! 3. Depth-first over courses in rank order: try qualified instructors
//!    scarcest-first, and each instructor's compatible slots in a
//!    per-call heuristic order; validate, assign, recurse, undo.
//! 4. Stop at the first complete assignment. Failed states are
//!    fingerprinted and memoized so permutation-equivalent branches are
//!    pruned on re-entry.
//!
//! The search is anytime: deep failed branches deposit a scored copy of
//! the partial timetable, and on time-limit expiry (or external
//! cancellation) the best capture is returned instead of nothing.
//!
//! # Reference
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern
//! Approach", Ch. 6: Constraint Satisfaction Problems

use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::{
    compat::CompatibilityIndex, config::SolverOptions, constraints, occupancy::Occupancy,
    score::{self, ScoreBreakdown},
};
use crate::models::{Course, Instructor, ScheduledBlock, Slot, Timetable};
use crate::ranking::{self, RankedCourse};
use crate::validation::{self, ValidationError, ValidationErrorKind};

/// Search effort counters for one solver run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Candidate (instructor, slot) pairs examined.
    pub nodes_explored: u64,
    /// Candidates rejected by the validator or by memoized failure.
    pub pruned_branches: u64,
    /// Branches cut by the failed-state cache alone.
    pub memo_hits: u64,
    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,
    /// Score of the returned timetable.
    pub score: f64,
}

/// Outcome of a solver run.
///
/// Infeasibility and time-limit expiry are ordinary outcomes, reported
/// with `success: false` and the best partial timetable found; they are
/// never surfaced as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableResult {
    /// Whether every course received an assignment.
    pub success: bool,
    /// The complete timetable, or the best partial one.
    pub timetable: Timetable,
    /// Courses no instructor is qualified to teach, in rank order.
    pub unassignable_course_ids: Vec<String>,
    /// Whether the run was stopped by an external cancellation flag.
    pub cancelled: bool,
    /// Search effort counters.
    pub stats: SearchStats,
    /// Score decomposition of the returned timetable.
    pub score_breakdown: ScoreBreakdown,
}

/// Backtracking timetable solver.
///
/// A solver is cheap to construct and holds no state across runs; every
/// `solve` call builds its own occupancy index and memo cache and
/// discards them on return.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Course, Instructor, SlotGenerator};
/// use u_timetable::solver::{SolverOptions, TimetableSolver};
///
/// let instructors = vec![Instructor::new("P1").with_course("CS101")];
/// let courses = vec![Course::new("CS101", "Intro to Programming")];
/// let slots = SlotGenerator::new(8, 18, 2).generate();
///
/// let solver = TimetableSolver::new();
/// let result = solver.solve(&instructors, &courses, &slots).unwrap();
/// assert!(result.success);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableSolver {
    options: SolverOptions,
}

impl TimetableSolver {
    /// Creates a solver with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver with the given options.
    pub fn with_options(options: SolverOptions) -> Self {
        Self { options }
    }

    /// Solves the timetabling problem.
    ///
    /// Fails fast with validation errors on malformed input; all other
    /// outcomes (complete, infeasible, out of time) come back as a
    /// [`TimetableResult`].
    pub fn solve(
        &self,
        instructors: &[Instructor],
        courses: &[Course],
        slots: &[Slot],
    ) -> Result<TimetableResult, Vec<ValidationError>> {
        self.solve_with_cancel(instructors, courses, slots, None)
    }

    /// Solves with an optional external cancellation flag, checked at
    /// the same point as the time-limit test.
    pub fn solve_with_cancel(
        &self,
        instructors: &[Instructor],
        courses: &[Course],
        slots: &[Slot],
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TimetableResult, Vec<ValidationError>> {
        let started = Instant::now();

        let mut errors = match validation::validate_input(instructors, courses, slots) {
            Ok(()) => Vec::new(),
            Err(errors) => errors,
        };
        if let Err(message) = self.options.validate() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidOptions,
                message,
            ));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let ranked = ranking::rank(courses, instructors);
        let (unassignable, schedulable): (Vec<_>, Vec<_>) =
            ranked.iter().cloned().partition(|r| r.is_unteachable());
        let unassignable_course_ids: Vec<String> =
            unassignable.iter().map(|r| r.course.id.clone()).collect();

        let compat = CompatibilityIndex::build(courses, instructors, slots, &self.options);

        let mut search = Search {
            instructors,
            courses: &schedulable,
            ranked_all: &ranked,
            compat: &compat,
            options: &self.options,
            started,
            budget: Duration::from_millis(self.options.time_limit_ms),
            cancel,
            timetable: Timetable::for_instructors(instructors),
            occupancy: Occupancy::new(),
            failed_states: HashSet::new(),
            best: None,
            cancelled: false,
            stats: SearchStats::default(),
        };

        let outcome = search.run(0);

        let timetable = match outcome {
            Outcome::Complete => search.timetable,
            Outcome::Exhausted | Outcome::TimedOut => match search.best {
                Some((_, best)) => best,
                None => Timetable::for_instructors(instructors),
            },
        };

        let score_breakdown = score::breakdown(&timetable, &ranked, instructors, &self.options);
        let mut stats = search.stats;
        stats.elapsed_ms = started.elapsed().as_millis() as u64;
        stats.score = score_breakdown.total;

        Ok(TimetableResult {
            success: matches!(outcome, Outcome::Complete) && unassignable_course_ids.is_empty(),
            timetable,
            unassignable_course_ids,
            cancelled: search.cancelled,
            stats,
            score_breakdown,
        })
    }
}

/// How a (sub)search ended.
enum Outcome {
    /// Every remaining course was assigned.
    Complete,
    /// All candidates tried, none led to a complete assignment.
    Exhausted,
    /// Time budget spent or cancellation observed; unwind immediately.
    TimedOut,
}

/// Call-local search state. Dropped when `solve` returns.
struct Search<'a> {
    instructors: &'a [Instructor],
    /// Courses with at least one qualified instructor, rank order.
    courses: &'a [RankedCourse],
    /// Every course (including unassignable ones), for scoring.
    ranked_all: &'a [RankedCourse],
    compat: &'a CompatibilityIndex,
    options: &'a SolverOptions,
    started: Instant,
    budget: Duration,
    cancel: Option<Arc<AtomicBool>>,
    timetable: Timetable,
    occupancy: Occupancy,
    /// Fingerprints of (index, assignment state) pairs proven dead.
    failed_states: HashSet<u64>,
    /// Best-scored partial timetable captured so far.
    best: Option<(f64, Timetable)>,
    cancelled: bool,
    stats: SearchStats,
}

impl Search<'_> {
    fn run(&mut self, index: usize) -> Outcome {
        if index == self.courses.len() {
            return Outcome::Complete;
        }

        if self.should_stop() {
            self.maybe_capture(index);
            return Outcome::TimedOut;
        }

        let fingerprint = self.fingerprint(index);
        if self.failed_states.contains(&fingerprint) {
            self.stats.memo_hits += 1;
            self.stats.pruned_branches += 1;
            return Outcome::Exhausted;
        }

        let courses = self.courses;
        let compat = self.compat;
        let instructors = self.instructors;
        let course = &courses[index].course;

        for &instructor_idx in compat.candidates_for(&course.id) {
            let instructor = &instructors[instructor_idx];

            for slot in self.ordered_slots(instructor_idx) {
                self.stats.nodes_explored += 1;

                if !constraints::is_valid(
                    instructor,
                    course,
                    &slot,
                    &self.timetable,
                    &self.occupancy,
                    self.options,
                ) {
                    self.stats.pruned_branches += 1;
                    continue;
                }

                self.timetable
                    .push_block(&instructor.id, ScheduledBlock::new(&course.id, slot));
                self.occupancy.claim(&slot, &instructor.id);

                match self.run(index + 1) {
                    Outcome::Complete => return Outcome::Complete,
                    Outcome::TimedOut => {
                        self.undo(&instructor.id, &slot);
                        return Outcome::TimedOut;
                    }
                    Outcome::Exhausted => self.undo(&instructor.id, &slot),
                }
            }
        }

        self.failed_states.insert(fingerprint);
        self.maybe_capture(index);
        Outcome::Exhausted
    }

    fn should_stop(&mut self) -> bool {
        if self.started.elapsed() >= self.budget {
            return true;
        }
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                self.cancelled = true;
                return true;
            }
        }
        false
    }

    /// Instructor's compatible slots, re-sorted for this call: days
    /// where the instructor already has exactly one block first (pack
    /// days instead of fragmenting the week), then preferred-window
    /// slots, then weekdays before weekends. Stable within ties.
    fn ordered_slots(&self, instructor_idx: usize) -> Vec<Slot> {
        let instructor_id = &self.instructors[instructor_idx].id;
        let mut slots = self.compat.slots_for(instructor_idx).to_vec();
        slots.sort_by_key(|slot| {
            let packing = usize::from(self.timetable.blocks_on_day(instructor_id, slot.day) != 1);
            let outside_preferred = usize::from(
                slot.start_hour < self.options.preferred_start_hour
                    || slot.end_hour > self.options.preferred_end_hour,
            );
            let weekend = usize::from(slot.day.is_weekend());
            (packing, outside_preferred, weekend)
        });
        slots
    }

    /// Reverses one tentative assignment.
    ///
    /// The assignment map and occupancy index are mutated in lock-step;
    /// disagreement here is a programming error, not a search outcome.
    fn undo(&mut self, instructor_id: &str, slot: &Slot) {
        let popped = self.timetable.pop_block(instructor_id);
        let freed = self.occupancy.release(slot);
        assert!(
            popped.is_some_and(|b| b.slot() == *slot) && freed.as_deref() == Some(instructor_id),
            "occupancy index and assignment map diverged during backtracking undo"
        );
    }

    /// Structural hash of (course index, per-instructor assignments).
    ///
    /// `Timetable` keys instructors in a `BTreeMap`, so two states with
    /// the same assignments hash identically regardless of the order
    /// the search produced them in.
    fn fingerprint(&self, index: usize) -> u64 {
        let mut hasher = DefaultHasher::new();
        index.hash(&mut hasher);
        for (instructor_id, blocks) in &self.timetable.assignments {
            instructor_id.hash(&mut hasher);
            blocks.hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Deposits a scored deep copy of the current partial timetable if
    /// the search is deep enough and the score beats the previous best.
    fn maybe_capture(&mut self, index: usize) {
        if self.courses.is_empty() {
            return;
        }
        let depth = index as f64 / self.courses.len() as f64;
        let threshold = if self.best.is_none() {
            self.options.capture_depth_initial
        } else {
            self.options.capture_depth_improved
        };
        if depth < threshold {
            return;
        }

        let current = score::score(
            &self.timetable,
            self.ranked_all,
            self.instructors,
            self.options,
        );
        if self.best.as_ref().is_none_or(|(best, _)| current > *best) {
            self.best = Some((current, self.timetable.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AvailabilityWindow, Day, SlotGenerator};
    use std::collections::HashMap;

    fn weekday_slots() -> Vec<Slot> {
        SlotGenerator::new(8, 18, 2).generate()
    }

    /// Asserts the cross-cutting result invariants: eligibility, no
    /// per-instructor overlap, no global double-booking, hour caps.
    fn assert_invariants(result: &TimetableResult, instructors: &[Instructor]) {
        assert!(result.timetable.find_conflicts(instructors).is_empty());

        let by_id: HashMap<&str, &Instructor> =
            instructors.iter().map(|i| (i.id.as_str(), i)).collect();
        let mut claimed: HashSet<(Day, i32, i32)> = HashSet::new();

        for (instructor_id, blocks) in &result.timetable.assignments {
            let instructor = by_id[instructor_id.as_str()];
            for block in blocks {
                assert!(
                    instructor.can_teach(&block.course_id),
                    "{instructor_id} not qualified for {}",
                    block.course_id
                );
                assert!(
                    claimed.insert(block.slot().key()),
                    "slot {:?} double-booked",
                    block.slot()
                );
            }
        }
    }

    #[test]
    fn test_two_instructor_scenario() {
        let instructors = vec![
            Instructor::new("A")
                .with_course("MATH")
                .with_course("PHYS")
                .with_max_hours(20),
            Instructor::new("B").with_course("PHYS").with_max_hours(20),
        ];
        let courses = vec![
            Course::new("MATH", "Mathematics"),
            Course::new("PHYS", "Physics"),
        ];

        let result = TimetableSolver::new()
            .solve(&instructors, &courses, &weekday_slots())
            .unwrap();

        assert!(result.success);
        assert!(result.unassignable_course_ids.is_empty());
        assert_invariants(&result, &instructors);

        // Math can only go to A
        let math_holder = result
            .timetable
            .assignments
            .iter()
            .find(|(_, blocks)| blocks.iter().any(|b| b.course_id == "MATH"))
            .map(|(id, _)| id.as_str());
        assert_eq!(math_holder, Some("A"));

        assert_eq!(result.timetable.block_count(), 2);
    }

    #[test]
    fn test_unassignable_course_reported() {
        let instructors = vec![Instructor::new("P1").with_course("CS101").with_max_hours(20)];
        let courses = vec![
            Course::new("CS101", "Intro"),
            Course::new("ORPHAN", "Nobody teaches this"),
        ];

        let result = TimetableSolver::new()
            .solve(&instructors, &courses, &weekday_slots())
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.unassignable_course_ids, vec!["ORPHAN".to_string()]);
        // The schedulable course is still placed
        assert!(result.timetable.assigned_course_ids().contains("CS101"));
        assert_invariants(&result, &instructors);
    }

    #[test]
    fn test_overlapping_availability_yields_partial() {
        // One instructor available for a single slot; both courses need it.
        let instructors = vec![Instructor::new("P1")
            .with_course("A")
            .with_course("B")
            .with_max_hours(20)
            .with_availability(AvailabilityWindow::new(Day::Monday, 8, 10))];
        let courses = vec![Course::new("A", "First"), Course::new("B", "Second")];

        let result = TimetableSolver::new()
            .solve(&instructors, &courses, &weekday_slots())
            .unwrap();

        assert!(!result.success);
        assert!(result.unassignable_course_ids.is_empty());
        assert_eq!(result.timetable.block_count(), 1);
        assert_invariants(&result, &instructors);
    }

    #[test]
    fn test_infeasible_large_input_respects_time_limit() {
        // 30 two-hour courses against 6 assignable hours of capacity:
        // infeasible, and the failure tree is far too large to exhaust.
        let course_ids: Vec<String> = (0..30).map(|n| format!("C{n}")).collect();
        let instructors: Vec<Instructor> = (0..3)
            .map(|n| {
                Instructor::new(format!("P{n}"))
                    .with_courses(course_ids.clone())
                    .with_max_hours(4)
            })
            .collect();
        let courses: Vec<Course> = course_ids
            .iter()
            .map(|id| Course::new(id.clone(), format!("Course {id}")))
            .collect();

        let solver = TimetableSolver::with_options(
            SolverOptions::default().with_time_limit_ms(1),
        );
        let result = solver.solve(&instructors, &courses, &weekday_slots()).unwrap();

        assert!(!result.success);
        // Bounded overrun: one node's work past the deadline, not more
        assert!(result.stats.elapsed_ms < 2_000);
        assert_invariants(&result, &instructors);
    }

    #[test]
    fn test_larger_feasible_instance() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(42);
        let courses: Vec<Course> = (0..12)
            .map(|n| Course::new(format!("C{n}"), format!("Course {n}")).with_term_weight(n % 8))
            .collect();
        let instructors: Vec<Instructor> = (0..4)
            .map(|p| {
                // Guarantee coverage (course n → instructor n % 4), plus
                // a few random extra qualifications.
                let mut teachable: Vec<String> = courses
                    .iter()
                    .enumerate()
                    .filter(|(n, _)| n % 4 == p)
                    .map(|(_, c)| c.id.clone())
                    .collect();
                for course in &courses {
                    if rng.random_range(0..3) == 0 && !teachable.contains(&course.id) {
                        teachable.push(course.id.clone());
                    }
                }
                Instructor::new(format!("P{p}"))
                    .with_courses(teachable)
                    .with_max_hours(20)
            })
            .collect();

        let result = TimetableSolver::new()
            .solve(&instructors, &courses, &weekday_slots())
            .unwrap();

        assert!(result.success);
        assert_eq!(result.timetable.block_count(), 12);
        assert_invariants(&result, &instructors);
        assert!(result.stats.nodes_explored > 0);
        assert_eq!(result.stats.score, result.score_breakdown.total);
    }

    #[test]
    fn test_malformed_input_rejected() {
        let instructors = vec![
            Instructor::new("P1").with_course("CS101"),
            Instructor::new("P1").with_course("CS101"),
        ];
        let courses = vec![Course::new("CS101", "Intro")];

        let err = TimetableSolver::new()
            .solve(&instructors, &courses, &weekday_slots())
            .unwrap_err();
        assert!(err
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let instructors = vec![Instructor::new("P1").with_course("CS101")];
        let courses = vec![Course::new("CS101", "Intro")];

        let solver =
            TimetableSolver::with_options(SolverOptions::default().with_preferred_hours(18, 8));
        let err = solver
            .solve(&instructors, &courses, &weekday_slots())
            .unwrap_err();
        assert!(err
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidOptions));
    }

    #[test]
    fn test_cancellation_flag() {
        let instructors = vec![Instructor::new("P1").with_course("CS101").with_max_hours(20)];
        let courses = vec![Course::new("CS101", "Intro")];

        let cancel = Arc::new(AtomicBool::new(true));
        let result = TimetableSolver::new()
            .solve_with_cancel(&instructors, &courses, &weekday_slots(), Some(cancel))
            .unwrap();

        assert!(result.cancelled);
        assert!(!result.success);
    }

    #[test]
    fn test_empty_problem() {
        let result = TimetableSolver::new().solve(&[], &[], &[]).unwrap();
        assert!(result.success);
        assert!(result.unassignable_course_ids.is_empty());
        assert_eq!(result.timetable.block_count(), 0);
    }

    #[test]
    fn test_avoid_weekends_enforced() {
        let instructors = vec![Instructor::new("P1").with_course("CS101").with_max_hours(20)];
        let courses = vec![Course::new("CS101", "Intro")];
        let slots = SlotGenerator::new(8, 18, 2).with_weekends().generate();

        let solver =
            TimetableSolver::with_options(SolverOptions::default().with_avoid_weekends(true));
        let result = solver.solve(&instructors, &courses, &slots).unwrap();

        assert!(result.success);
        assert!(result
            .timetable
            .blocks_for("P1")
            .iter()
            .all(|b| !b.day.is_weekend()));
    }

    #[test]
    fn test_result_serde_roundtrip() {
        let instructors = vec![Instructor::new("P1").with_course("CS101").with_max_hours(20)];
        let courses = vec![Course::new("CS101", "Intro")];

        let result = TimetableSolver::new()
            .solve(&instructors, &courses, &weekday_slots())
            .unwrap();

        let json = serde_json::to_string(&result).unwrap();
        let back: TimetableResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.success, result.success);
        assert_eq!(back.timetable, result.timetable);
        assert_eq!(back.stats.score, result.stats.score);
    }
}
