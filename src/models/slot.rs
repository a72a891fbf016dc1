//! Days, time slots, and weekly slot generation.
//!
//! # Time Model
//! Hours are whole integers on a 24-hour clock; a slot occupies the
//! half-open range `[start_hour, end_hour)` on a single weekday. The
//! fixed lunch hour (12:00–13:00) is never schedulable.

use serde::{Deserialize, Serialize};

/// Start of the fixed lunch break (inclusive).
pub const LUNCH_START_HOUR: i32 = 12;
/// End of the fixed lunch break (exclusive).
pub const LUNCH_END_HOUR: i32 = 13;

/// Day of the week.
///
/// Closed enumeration: out-of-vocabulary day strings are rejected at
/// the input boundary rather than carried as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Monday through Friday.
    pub const WEEKDAYS: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// Monday through Sunday.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Whether this day is Saturday or Sunday.
    #[inline]
    pub fn is_weekend(&self) -> bool {
        matches!(self, Day::Saturday | Day::Sunday)
    }
}

/// A candidate teaching slot: a half-open hour range on one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Day of the week.
    pub day: Day,
    /// Start hour (inclusive, 0–23).
    pub start_hour: i32,
    /// End hour (exclusive, 1–24).
    pub end_hour: i32,
}

impl Slot {
    /// Creates a new slot.
    pub fn new(day: Day, start_hour: i32, end_hour: i32) -> Self {
        Self {
            day,
            start_hour,
            end_hour,
        }
    }

    /// Slot width in hours.
    #[inline]
    pub fn duration_hours(&self) -> i32 {
        self.end_hour - self.start_hour
    }

    /// Whether two slots overlap (same day, intersecting hour ranges).
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day
            && self.start_hour < other.end_hour
            && other.start_hour < self.end_hour
    }

    /// Whether this slot intersects the fixed lunch hour.
    #[inline]
    pub fn overlaps_lunch(&self) -> bool {
        self.start_hour < LUNCH_END_HOUR && self.end_hour > LUNCH_START_HOUR
    }

    /// Key identifying this slot in the occupancy index.
    #[inline]
    pub fn key(&self) -> (Day, i32, i32) {
        (self.day, self.start_hour, self.end_hour)
    }
}

/// Generates the weekly pool of candidate slots.
///
/// Enumerates fixed-width blocks per day within `[day_start, day_end)`,
/// skipping any block that intersects the lunch hour (generation resumes
/// at the end of lunch) and optionally skipping weekends.
///
/// # Example
///
/// ```
/// use u_timetable::models::SlotGenerator;
///
/// let slots = SlotGenerator::new(8, 18, 2).generate();
/// // 08–10, 10–12, 13–15, 15–17 on each of Monday..Friday
/// assert_eq!(slots.len(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct SlotGenerator {
    /// First schedulable hour of each day.
    pub day_start: i32,
    /// Last schedulable hour of each day (exclusive).
    pub day_end: i32,
    /// Block width in hours.
    pub block_hours: i32,
    /// Whether to include Saturday and Sunday.
    pub include_weekends: bool,
}

impl SlotGenerator {
    /// Creates a weekday-only generator.
    pub fn new(day_start: i32, day_end: i32, block_hours: i32) -> Self {
        Self {
            day_start,
            day_end,
            block_hours,
            include_weekends: false,
        }
    }

    /// Includes Saturday and Sunday in the pool.
    pub fn with_weekends(mut self) -> Self {
        self.include_weekends = true;
        self
    }

    /// Enumerates the slot pool.
    pub fn generate(&self) -> Vec<Slot> {
        let days: &[Day] = if self.include_weekends {
            &Day::ALL
        } else {
            &Day::WEEKDAYS
        };

        let mut slots = Vec::new();
        for &day in days {
            let mut start = self.day_start;
            while start + self.block_hours <= self.day_end {
                let slot = Slot::new(day, start, start + self.block_hours);
                if slot.overlaps_lunch() {
                    // Resume after the lunch break
                    start = LUNCH_END_HOUR;
                    continue;
                }
                slots.push(slot);
                start += self.block_hours;
            }
        }
        slots
    }
}
