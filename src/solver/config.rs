//! Solver configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the backtracking timetable solver.
///
/// # Examples
///
/// ```
/// use u_timetable::solver::SolverOptions;
///
/// let options = SolverOptions::default()
///     .with_avoid_weekends(true)
///     .with_preferred_hours(9, 17)
///     .with_time_limit_ms(60_000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverOptions {
    /// Reject Saturday/Sunday slots outright (also penalized by the
    /// scorer if a caller relaxes the hard constraint).
    pub avoid_weekends: bool,

    /// Hour cap per instructor per day.
    pub max_hours_per_day: i32,

    /// Maximum blocks per instructor per day. `None` derives
    /// `max_hours_per_day / 2` (two-hour blocks assumed).
    pub max_classes_per_day: Option<u32>,

    /// Preferred earliest start hour; earlier blocks are penalized by
    /// the scorer, never rejected.
    pub preferred_start_hour: i32,

    /// Preferred latest end hour; later blocks are penalized by the
    /// scorer, never rejected.
    pub preferred_end_hour: i32,

    /// Wall-clock search budget in milliseconds. On expiry the engine
    /// returns the best partial timetable captured so far.
    pub time_limit_ms: u64,

    /// Depth fraction beyond which a failed branch's partial timetable
    /// is scored for capture, while no capture has happened yet.
    pub capture_depth_initial: f64,

    /// Depth fraction required for later captures, once a partial
    /// timetable has already been taken.
    pub capture_depth_improved: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            avoid_weekends: false,
            max_hours_per_day: 8,
            max_classes_per_day: None,
            preferred_start_hour: 8,
            preferred_end_hour: 18,
            time_limit_ms: 30_000,
            capture_depth_initial: 0.5,
            capture_depth_improved: 0.8,
        }
    }
}

impl SolverOptions {
    /// Sets whether Saturday/Sunday slots are rejected outright.
    pub fn with_avoid_weekends(mut self, avoid: bool) -> Self {
        self.avoid_weekends = avoid;
        self
    }

    /// Sets the per-instructor daily hour cap.
    pub fn with_max_hours_per_day(mut self, hours: i32) -> Self {
        self.max_hours_per_day = hours;
        self
    }

    /// Sets an explicit per-instructor blocks-per-day cap.
    pub fn with_max_classes_per_day(mut self, classes: u32) -> Self {
        self.max_classes_per_day = Some(classes);
        self
    }

    /// Sets the preferred teaching window (soft, scored not rejected).
    pub fn with_preferred_hours(mut self, start: i32, end: i32) -> Self {
        self.preferred_start_hour = start;
        self.preferred_end_hour = end;
        self
    }

    /// Sets the wall-clock search budget in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Sets the depth fractions gating best-partial capture.
    pub fn with_capture_depths(mut self, initial: f64, improved: f64) -> Self {
        self.capture_depth_initial = initial;
        self.capture_depth_improved = improved;
        self
    }

    /// Blocks-per-day cap, derived from the hour cap when unset.
    #[inline]
    pub fn effective_max_classes_per_day(&self) -> usize {
        match self.max_classes_per_day {
            Some(n) => n as usize,
            None => (self.max_hours_per_day / 2) as usize,
        }
    }

    /// Checks the configuration for contradictions.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_hours_per_day <= 0 {
            return Err(format!(
                "max_hours_per_day must be positive, got {}",
                self.max_hours_per_day
            ));
        }
        if self.preferred_start_hour >= self.preferred_end_hour {
            return Err(format!(
                "preferred hour window {}-{} is empty",
                self.preferred_start_hour, self.preferred_end_hour
            ));
        }
        if !(0.0..=1.0).contains(&self.capture_depth_initial)
            || !(0.0..=1.0).contains(&self.capture_depth_improved)
        {
            return Err("capture depth fractions must lie in 0.0..=1.0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let o = SolverOptions::default();
        assert!(!o.avoid_weekends);
        assert_eq!(o.max_hours_per_day, 8);
        assert_eq!(o.effective_max_classes_per_day(), 4);
        assert_eq!(o.preferred_start_hour, 8);
        assert_eq!(o.preferred_end_hour, 18);
        assert_eq!(o.time_limit_ms, 30_000);
        assert!(o.validate().is_ok());
    }

    #[test]
    fn test_explicit_classes_per_day() {
        let o = SolverOptions::default().with_max_classes_per_day(3);
        assert_eq!(o.effective_max_classes_per_day(), 3);
    }

    #[test]
    fn test_builder_chain() {
        let o = SolverOptions::default()
            .with_avoid_weekends(true)
            .with_max_hours_per_day(6)
            .with_preferred_hours(9, 17)
            .with_time_limit_ms(1_000)
            .with_capture_depths(0.4, 0.9);

        assert!(o.avoid_weekends);
        assert_eq!(o.effective_max_classes_per_day(), 3);
        assert_eq!(o.time_limit_ms, 1_000);
        assert_eq!(o.capture_depth_initial, 0.4);
        assert!(o.validate().is_ok());
    }

    #[test]
    fn test_invalid_hour_cap() {
        let o = SolverOptions::default().with_max_hours_per_day(0);
        assert!(o.validate().is_err());
    }

    #[test]
    fn test_invalid_preferred_window() {
        let o = SolverOptions::default().with_preferred_hours(18, 8);
        assert!(o.validate().is_err());
    }

    #[test]
    fn test_invalid_capture_depth() {
        let o = SolverOptions::default().with_capture_depths(1.5, 0.8);
        assert!(o.validate().is_err());
    }
}
