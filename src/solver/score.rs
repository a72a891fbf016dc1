//! Timetable quality scoring.
//!
//! Collapses a complete or partial timetable into one number, higher is
//! better. Coverage dominates; the remaining terms trade off instructor
//! utilization, preferred-hour adherence, weekly compactness, and not
//! abandoning the hardest courses. Deterministic and side-effect free,
//! so the engine can compare best-partial candidates by score alone.

use serde::{Deserialize, Serialize};

use super::SolverOptions;
use crate::models::{Instructor, Timetable};
use crate::ranking::RankedCourse;

/// Score returned for a timetable that covers no course at all.
pub const ZERO_COVERAGE_SCORE: f64 = -100.0;

/// Penalty per hour outside the preferred window.
const PREFERRED_HOUR_PENALTY_RATE: f64 = 2.0;
/// Penalty per weekend block when weekends are avoided.
const WEEKEND_BLOCK_PENALTY: f64 = 10.0;
/// Weight of the per-instructor blocks-per-day concentration ratio.
const COMPACTNESS_WEIGHT: f64 = 5.0;
/// Flat bonus for a day loaded to 70–100% of the daily hour cap.
const FULL_DAY_BONUS: f64 = 5.0;
/// Fraction of courses counted as the hardest subset.
const HARD_COURSE_FRACTION: f64 = 0.3;

/// Per-term decomposition of a timetable score.
///
/// Penalty fields hold positive magnitudes; `total` applies their signs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Distinct-course coverage, 0–100. Dominant term.
    pub coverage: f64,
    /// Instructor participation, 0–20.
    pub utilization: f64,
    /// Hours outside the preferred window, times the penalty rate.
    pub preferred_hour_penalty: f64,
    /// Weekend blocks times the per-block penalty. Zero unless
    /// `avoid_weekends` is set.
    pub weekend_penalty: f64,
    /// Day-concentration reward plus full-day band bonuses.
    pub compactness: f64,
    /// Reward for covering the hardest 30% of courses, 0–30.
    pub hard_course_bonus: f64,
    /// Final score: `coverage + utilization + compactness +
    /// hard_course_bonus - preferred_hour_penalty - weekend_penalty`.
    pub total: f64,
}

/// Scores a timetable, returning the full per-term decomposition.
///
/// `ranked` must be the complete difficulty-ranked course list for the
/// run (descending difficulty), so the hard-course subset is stable.
pub fn breakdown(
    timetable: &Timetable,
    ranked: &[RankedCourse],
    instructors: &[Instructor],
    options: &SolverOptions,
) -> ScoreBreakdown {
    let assigned = timetable.assigned_course_ids();

    if ranked.is_empty() {
        return ScoreBreakdown::default();
    }
    if assigned.is_empty() {
        return ScoreBreakdown {
            total: ZERO_COVERAGE_SCORE,
            ..ScoreBreakdown::default()
        };
    }

    let coverage = assigned.len() as f64 / ranked.len() as f64 * 100.0;

    let utilization = if instructors.is_empty() {
        0.0
    } else {
        timetable.instructors_used() as f64 / instructors.len() as f64 * 20.0
    };

    let mut preferred_hour_penalty = 0.0;
    let mut weekend_penalty = 0.0;
    for block in timetable.assignments.values().flatten() {
        let early = (options.preferred_start_hour - block.start_hour).max(0);
        let late = (block.end_hour - options.preferred_end_hour).max(0);
        preferred_hour_penalty += PREFERRED_HOUR_PENALTY_RATE * (early + late) as f64;

        if options.avoid_weekends && block.day.is_weekend() {
            weekend_penalty += WEEKEND_BLOCK_PENALTY;
        }
    }

    let mut compactness = 0.0;
    for instructor in instructors {
        let blocks = timetable.blocks_for(&instructor.id);
        if blocks.is_empty() {
            continue;
        }
        let days = timetable.distinct_days(&instructor.id);
        compactness += blocks.len() as f64 / days as f64 * COMPACTNESS_WEIGHT;

        let band_floor = options.max_hours_per_day as f64 * 0.7;
        let mut seen_days: Vec<_> = blocks.iter().map(|b| b.day).collect();
        seen_days.sort();
        seen_days.dedup();
        for day in seen_days {
            let hours = timetable.hours_on_day(&instructor.id, day) as f64;
            if hours >= band_floor && hours <= options.max_hours_per_day as f64 {
                compactness += FULL_DAY_BONUS;
            }
        }
    }

    let hard_count = ((ranked.len() as f64 * HARD_COURSE_FRACTION).ceil() as usize).max(1);
    let hard_assigned = ranked[..hard_count]
        .iter()
        .filter(|r| assigned.contains(r.course.id.as_str()))
        .count();
    let hard_course_bonus = hard_assigned as f64 / hard_count as f64 * 30.0;

    let total = coverage + utilization + compactness + hard_course_bonus
        - preferred_hour_penalty
        - weekend_penalty;

    ScoreBreakdown {
        coverage,
        utilization,
        preferred_hour_penalty,
        weekend_penalty,
        compactness,
        hard_course_bonus,
        total,
    }
}

/// Scores a timetable. See [`breakdown`] for the decomposition.
pub fn score(
    timetable: &Timetable,
    ranked: &[RankedCourse],
    instructors: &[Instructor],
    options: &SolverOptions,
) -> f64 {
    breakdown(timetable, ranked, instructors, options).total
}
