//! Weighted GPA computation.
//!
//! GPA is the credit-weighted average of grade points over courses that
//! both carry credit and were not failed. The unrounded value is what the
//! engine compares against thresholds; rounding is presentation only.

use crate::models::course::ParsedCourse;

/// Credit-weighted GPA over passed, credit-bearing courses.
/// Returns 0.0 when no course qualifies (e.g. an all-FF transcript).
pub fn compute_gpa(courses: &[ParsedCourse]) -> f64 {
    let mut weighted_points = 0.0;
    let mut credit_sum = 0.0;

    for course in courses {
        if !course.record.grade.is_passing() || course.record.credit <= 0.0 {
            continue;
        }
        weighted_points += course.grade_points * course.record.credit;
        credit_sum += course.record.credit;
    }

    if credit_sum == 0.0 {
        return 0.0;
    }
    weighted_points / credit_sum
}

/// Round a GPA to 2 decimal places for display.
pub fn round_gpa(gpa: f64) -> f64 {
    (gpa * 100.0).round() / 100.0
}

/// Sum of credits over passed courses.
pub fn total_passed_credits(courses: &[ParsedCourse]) -> f64 {
    courses
        .iter()
        .filter(|c| c.is_passed())
        .map(|c| c.record.credit)
        .sum()
}
