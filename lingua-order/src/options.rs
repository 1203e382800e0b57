//! Options that are switched on by the order itself rather than by the student.

use chrono::{Months, NaiveDate};
use lingua_catalog::pricing::GROUP_ENROLLMENT_MIN_PERSONS;
use lingua_catalog::{OrderOptions, ServiceOffering};

/// Early registration: the course starts more than a month after `today`
pub fn qualifies_for_early_registration(date_start: NaiveDate, today: NaiveDate) -> bool {
    today
        .checked_add_months(Months::new(1))
        .is_some_and(|cutoff| date_start > cutoff)
}

/// Recomputes the three automatic flags and keeps the student's own choices
pub fn with_automatic_options(
    selected: OrderOptions,
    offering: &ServiceOffering,
    date_start: NaiveDate,
    persons: u32,
    duration_hours: u32,
    today: NaiveDate,
) -> OrderOptions {
    OrderOptions {
        early_registration: qualifies_for_early_registration(date_start, today),
        group_enrollment: persons >= GROUP_ENROLLMENT_MIN_PERSONS,
        intensive_course: offering.meets_intensive_threshold(duration_hours),
        ..selected
    }
}
