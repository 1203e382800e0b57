//! Checks that run before an order reaches the pricing engine.

use chrono::{NaiveDate, NaiveTime};
use lingua_catalog::OrderOptions;
use serde::{Deserialize, Serialize};

use crate::models::{OrderDraft, OrderTarget};
use crate::schedule::{self, BookableDates};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLimits {
    pub max_persons: u32,
    pub min_tutor_hours: u32,
    pub max_tutor_hours: u32,
    pub max_orders_per_account: usize,
}

impl Default for OrderLimits {
    fn default() -> Self {
        Self {
            max_persons: 20,
            min_tutor_hours: 1,
            max_tutor_hours: 40,
            max_orders_per_account: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Either a course or a tutor must be selected")]
    MissingTarget,

    #[error("An order cannot reference both a course and a tutor")]
    AmbiguousTarget,

    #[error("Start date is required")]
    MissingDate,

    #[error("Invalid start date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Start time is required")]
    MissingTime,

    #[error("Invalid start time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Start time {0} is not bookable, lessons start on the hour from 09:00 to 20:00")]
    TimeNotOffered(String),

    #[error("Start date {0} is in the past")]
    DateInPast(NaiveDate),

    #[error("The course does not start on {0}")]
    DateNotOffered(NaiveDate),

    #[error("Tutoring can be booked from {first} to {last}, got {actual}")]
    DateOutsideWindow {
        first: NaiveDate,
        last: NaiveDate,
        actual: NaiveDate,
    },

    #[error("Persons must be between 1 and {max}, got {actual}")]
    PersonsOutOfRange { max: u32, actual: u32 },

    #[error("Duration is required for tutor orders")]
    MissingDuration,

    #[error("Tutor duration must be between {min} and {max} hours, got {actual}")]
    DurationOutOfRange { min: u32, max: u32, actual: u32 },
}

/// A draft that passed every check
#[derive(Debug, Clone, PartialEq)]
pub struct ValidOrder {
    pub target: OrderTarget,
    pub date_start: NaiveDate,
    /// Normalized to `HH:MM`
    pub time_start: String,
    pub persons: u32,
    /// Only set for tutor orders
    pub duration: Option<u32>,
    pub options: OrderOptions,
}

pub fn validate_draft(draft: &OrderDraft, limits: &OrderLimits) -> Result<ValidOrder, ValidationError> {
    let target = match (draft.course_id, draft.tutor_id) {
        (Some(id), None) => OrderTarget::Course(id),
        (None, Some(id)) => OrderTarget::Tutor(id),
        (Some(_), Some(_)) => return Err(ValidationError::AmbiguousTarget),
        (None, None) => return Err(ValidationError::MissingTarget),
    };

    let date_start = parse_date(&draft.date_start)?;
    let time_start = parse_time(&draft.time_start)?;
    check_start_time(&time_start)?;
    check_persons(draft.persons, limits)?;

    let duration = match target {
        OrderTarget::Course(_) => None,
        OrderTarget::Tutor(_) => {
            let hours = draft.duration.ok_or(ValidationError::MissingDuration)?;
            check_tutor_hours(hours, limits)?;
            Some(hours)
        }
    };

    Ok(ValidOrder {
        target,
        date_start,
        time_start,
        persons: draft.persons,
        duration,
        options: draft.options,
    })
}

pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

pub fn parse_time(value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingTime);
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(|time| time.format("%H:%M").to_string())
        .map_err(|_| ValidationError::InvalidTime(value.to_string()))
}

/// Expects a time already normalized by [`parse_time`]
pub fn check_start_time(time_start: &str) -> Result<(), ValidationError> {
    if schedule::available_start_times().iter().any(|t| t == time_start) {
        Ok(())
    } else {
        Err(ValidationError::TimeNotOffered(time_start.to_string()))
    }
}

pub fn check_start_date(
    date_start: NaiveDate,
    bookable: &BookableDates,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if date_start < today {
        return Err(ValidationError::DateInPast(date_start));
    }
    if bookable.contains(date_start) {
        return Ok(());
    }
    match bookable {
        BookableDates::Listed(_) => Err(ValidationError::DateNotOffered(date_start)),
        BookableDates::Window { first, last } => Err(ValidationError::DateOutsideWindow {
            first: *first,
            last: *last,
            actual: date_start,
        }),
    }
}

pub fn check_persons(persons: u32, limits: &OrderLimits) -> Result<(), ValidationError> {
    if !(1..=limits.max_persons).contains(&persons) {
        return Err(ValidationError::PersonsOutOfRange {
            max: limits.max_persons,
            actual: persons,
        });
    }
    Ok(())
}

pub fn check_tutor_hours(hours: u32, limits: &OrderLimits) -> Result<(), ValidationError> {
    if !(limits.min_tutor_hours..=limits.max_tutor_hours).contains(&hours) {
        return Err(ValidationError::DurationOutOfRange {
            min: limits.min_tutor_hours,
            max: limits.max_tutor_hours,
            actual: hours,
        });
    }
    Ok(())
}
