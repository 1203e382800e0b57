use std::collections::BTreeSet;

use chrono::{Days, NaiveDate, NaiveDateTime};
use lingua_catalog::ServiceOffering;

pub const FIRST_START_HOUR: u32 = 9;
pub const LAST_START_HOUR: u32 = 20;

/// Tutoring can be booked this many days ahead, starting tomorrow
pub const TUTOR_BOOKING_DAYS: u64 = 90;

/// Start times offered for booking, on the hour
pub fn available_start_times() -> Vec<String> {
    (FIRST_START_HOUR..=LAST_START_HOUR)
        .map(|hour| format!("{:02}:00", hour))
        .collect()
}

/// Published start dates that are still ahead, one per day, in order
pub fn course_start_dates(start_dates: &[NaiveDateTime], today: NaiveDate) -> Vec<NaiveDate> {
    start_dates
        .iter()
        .map(NaiveDateTime::date)
        .filter(|date| *date >= today)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Dates an order may start on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookableDates {
    /// A course starts only on one of its published dates
    Listed(Vec<NaiveDate>),
    /// Tutoring starts on any day of the window, bounds included
    Window { first: NaiveDate, last: NaiveDate },
}

impl BookableDates {
    pub fn for_course(start_dates: &[NaiveDateTime], today: NaiveDate) -> Self {
        BookableDates::Listed(course_start_dates(start_dates, today))
    }

    pub fn for_tutor(today: NaiveDate) -> Self {
        BookableDates::Window {
            first: today.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX),
            last: today
                .checked_add_days(Days::new(TUTOR_BOOKING_DAYS))
                .unwrap_or(NaiveDate::MAX),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            BookableDates::Listed(dates) => dates.binary_search(&date).is_ok(),
            BookableDates::Window { first, last } => (*first..=*last).contains(&date),
        }
    }
}

pub fn course_end_date(date_start: NaiveDate, total_length_weeks: u32) -> Option<NaiveDate> {
    date_start.checked_add_days(Days::new(u64::from(total_length_weeks) * 7))
}

/// End date for courses; tutoring is open-ended
pub fn end_date(offering: &ServiceOffering, date_start: NaiveDate) -> Option<NaiveDate> {
    match offering {
        ServiceOffering::Course { total_length_weeks, .. } => {
            course_end_date(date_start, *total_length_weeks)
        }
        ServiceOffering::Tutor { .. } => None,
    }
}
