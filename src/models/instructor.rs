//! Instructor model.

use serde::{Deserialize, Serialize};

use super::{Day, Slot};

/// A declared availability window: the instructor may teach any slot
/// fully contained in `[start_hour, end_hour)` on `day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    /// Day of the week.
    pub day: Day,
    /// Window start (inclusive).
    pub start_hour: i32,
    /// Window end (exclusive).
    pub end_hour: i32,
}

impl AvailabilityWindow {
    /// Creates a new availability window.
    pub fn new(day: Day, start_hour: i32, end_hour: i32) -> Self {
        Self {
            day,
            start_hour,
            end_hour,
        }
    }

    /// Whether a slot falls fully inside this window.
    pub fn contains(&self, slot: &Slot) -> bool {
        self.day == slot.day
            && self.start_hour <= slot.start_hour
            && self.end_hour >= slot.end_hour
    }
}

/// An instructor with a teachable course set and weekly hour cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instructor {
    /// Unique instructor identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Course IDs this instructor is qualified to teach.
    pub teachable_courses: Vec<String>,
    /// Maximum total assigned hours per week.
    pub max_teaching_hours: i32,
    /// Declared availability windows. `None` = available at every
    /// non-excluded slot; `Some` restricts assignments to slots fully
    /// contained in at least one window.
    pub availability: Option<Vec<AvailabilityWindow>>,
}

impl Instructor {
    /// Creates a new instructor with a 20-hour default cap.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            teachable_courses: Vec::new(),
            max_teaching_hours: 20,
            availability: None,
        }
    }

    /// Sets the instructor name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a teachable course.
    pub fn with_course(mut self, course_id: impl Into<String>) -> Self {
        self.teachable_courses.push(course_id.into());
        self
    }

    /// Sets the full teachable course list.
    pub fn with_courses(mut self, course_ids: Vec<String>) -> Self {
        self.teachable_courses = course_ids;
        self
    }

    /// Sets the weekly hour cap.
    pub fn with_max_hours(mut self, hours: i32) -> Self {
        self.max_teaching_hours = hours;
        self
    }

    /// Adds an availability window (switches the instructor to
    /// restricted availability).
    pub fn with_availability(mut self, window: AvailabilityWindow) -> Self {
        self.availability.get_or_insert_with(Vec::new).push(window);
        self
    }

    /// Whether this instructor is qualified to teach the course.
    #[inline]
    pub fn can_teach(&self, course_id: &str) -> bool {
        self.teachable_courses.iter().any(|c| c == course_id)
    }

    /// Whether a slot is admissible under the declared availability.
    ///
    /// Unrestricted instructors admit every slot.
    pub fn is_available_for(&self, slot: &Slot) -> bool {
        match &self.availability {
            None => true,
            Some(windows) => windows.iter().any(|w| w.contains(slot)),
        }
    }
}
