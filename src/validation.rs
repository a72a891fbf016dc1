//! Input validation for timetabling problems.
//!
//! Checks structural integrity of instructors, courses, and the slot
//! pool before search starts. Detects:
//! - Duplicate or empty IDs
//! - Teachable-course references to unknown courses
//! - Out-of-range or inverted hour ranges (slots and availability windows)
//! - Negative hour caps
//!
//! The engine refuses to search over malformed input; infeasibility of
//! well-formed input is not a validation concern.

use std::collections::HashSet;

use crate::models::{Course, Instructor, Slot};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An entity has an empty ID.
    EmptyId,
    /// An instructor's teachable set references a course that doesn't exist.
    UnknownCourseReference,
    /// An hour range is inverted or outside 0–24.
    InvalidHourRange,
    /// An instructor's hour cap is negative.
    NegativeHourCap,
    /// The solver options are contradictory.
    InvalidOptions,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn check_hour_range(start: i32, end: i32, context: &str, errors: &mut Vec<ValidationError>) {
    if start < 0 || end > 24 || start >= end {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidHourRange,
            format!("{context} has invalid hour range {start}-{end}"),
        ));
    }
}

/// Validates the input data for a timetabling problem.
///
/// Checks:
/// 1. No duplicate or empty instructor IDs
/// 2. No duplicate or empty course IDs
/// 3. Every teachable-course reference points to a supplied course
/// 4. Every slot and availability window has `0 <= start < end <= 24`
/// 5. No instructor has a negative hour cap
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    instructors: &[Instructor],
    courses: &[Course],
    slots: &[Slot],
) -> ValidationResult {
    let mut errors = Vec::new();

    // Collect course IDs
    let mut course_ids = HashSet::new();
    for c in courses {
        if c.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                "Course with empty ID",
            ));
        } else if !course_ids.insert(c.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", c.id),
            ));
        }
    }

    // Instructor IDs, hour caps, references, availability windows
    let mut instructor_ids = HashSet::new();
    for i in instructors {
        if i.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                "Instructor with empty ID",
            ));
        } else if !instructor_ids.insert(i.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate instructor ID: {}", i.id),
            ));
        }

        if i.max_teaching_hours < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeHourCap,
                format!(
                    "Instructor '{}' has negative hour cap {}",
                    i.id, i.max_teaching_hours
                ),
            ));
        }

        for course_id in &i.teachable_courses {
            if !course_ids.contains(course_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownCourseReference,
                    format!(
                        "Instructor '{}' references unknown course '{}'",
                        i.id, course_id
                    ),
                ));
            }
        }

        if let Some(windows) = &i.availability {
            for w in windows {
                check_hour_range(
                    w.start_hour,
                    w.end_hour,
                    &format!("Availability window of instructor '{}'", i.id),
                    &mut errors,
                );
            }
        }
    }

    // Slot pool hour ranges
    for s in slots {
        check_hour_range(
            s.start_hour,
            s.end_hour,
            &format!("Slot on {:?}", s.day),
            &mut errors,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
