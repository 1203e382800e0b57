//! Order pricing engine.
//!
//! Pure functions: the same request always produces the same price, nothing
//! is read from the clock and no state is shared between calls. The engine
//! never fails; rejecting bad input is the caller's job.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::offering::ServiceOffering;

pub const PREMIUM_DAY_MULTIPLIER: f64 = 1.5;

pub const MORNING_SURCHARGE: u32 = 400;
pub const EVENING_SURCHARGE: u32 = 1000;
const MORNING_HOURS: std::ops::Range<u32> = 9..12;
const EVENING_HOURS: std::ops::Range<u32> = 18..20;

pub const EARLY_REGISTRATION_FACTOR: f64 = 0.9;
pub const GROUP_ENROLLMENT_FACTOR: f64 = 0.85;
pub const GROUP_ENROLLMENT_MIN_PERSONS: u32 = 5;
pub const INTENSIVE_FACTOR: f64 = 1.2;
pub const SUPPLEMENTARY_FEE_PER_PERSON: u32 = 2000;
pub const PERSONALIZED_FEE_PER_UNIT: u32 = 1500;
pub const ASSESSMENT_FEE: u32 = 300;
pub const EXCURSIONS_FACTOR: f64 = 1.25;
pub const INTERACTIVE_FACTOR: f64 = 1.5;

/// Option flags selected for an order. Missing flags deserialize as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderOptions {
    pub early_registration: bool,
    pub group_enrollment: bool,
    pub intensive_course: bool,
    pub supplementary: bool,
    pub personalized: bool,
    pub excursions: bool,
    pub assessment: bool,
    pub interactive: bool,
}

/// Everything the engine needs to price one order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRequest {
    pub offering: ServiceOffering,
    pub date_start: NaiveDate,
    /// `HH:MM`; only the leading hour is used
    pub time_start: String,
    pub person_count: u32,
    pub duration_hours: u32,
    pub options: OrderOptions,
}

impl PricingRequest {
    /// Builds a request for any offering. Courses always use the duration
    /// implied by their schedule, so `duration_hours` only matters for tutors.
    pub fn new(
        offering: ServiceOffering,
        date_start: NaiveDate,
        time_start: impl Into<String>,
        person_count: u32,
        duration_hours: u32,
        options: OrderOptions,
    ) -> Self {
        let duration_hours = offering.course_duration_hours().unwrap_or(duration_hours);
        Self {
            offering,
            date_start,
            time_start: time_start.into(),
            person_count,
            duration_hours,
            options,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    Discount,
    Surcharge,
}

/// A price step triggered by an option flag, listed in application order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    EarlyRegistration,
    GroupEnrollment,
    IntensiveCourse,
    Supplementary,
    Personalized,
    Assessment,
    Excursions,
    Interactive,
}

impl Adjustment {
    pub fn kind(&self) -> AdjustmentKind {
        match self {
            Adjustment::EarlyRegistration | Adjustment::GroupEnrollment => AdjustmentKind::Discount,
            _ => AdjustmentKind::Surcharge,
        }
    }

    /// Short value shown next to the option name
    pub fn display_value(&self) -> &'static str {
        match self {
            Adjustment::EarlyRegistration => "-10%",
            Adjustment::GroupEnrollment => "-15%",
            Adjustment::IntensiveCourse => "+20%",
            Adjustment::Supplementary => "+2000 RUB per person",
            Adjustment::Personalized => "+1500 RUB per unit",
            Adjustment::Assessment => "+300 RUB",
            Adjustment::Excursions => "+25%",
            Adjustment::Interactive => "+50%",
        }
    }
}

/// Price together with the figures it was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub hourly_rate: u32,
    pub duration_hours: u32,
    pub date_multiplier: f64,
    pub time_surcharge: u32,
    pub applied: Vec<Adjustment>,
    pub total: u64,
}

/// Leading integer of an `HH:MM` string. Leading whitespace is skipped and
/// anything after the digits is ignored.
pub fn parse_start_hour(time_start: &str) -> Option<u32> {
    let head = time_start.split(':').next()?.trim_start();
    let end = head
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(head.len());
    head[..end].parse().ok()
}

pub fn date_multiplier(date_start: NaiveDate) -> f64 {
    if calendar::is_premium_day(date_start) {
        PREMIUM_DAY_MULTIPLIER
    } else {
        1.0
    }
}

/// Flat surcharge for popular start hours; unreadable times cost nothing extra
pub fn time_surcharge(time_start: &str) -> u32 {
    match parse_start_hour(time_start) {
        Some(hour) if MORNING_HOURS.contains(&hour) => MORNING_SURCHARGE,
        Some(hour) if EVENING_HOURS.contains(&hour) => EVENING_SURCHARGE,
        _ => 0,
    }
}

/// Round half up to a whole currency unit, clamping at zero
pub fn round_price(total: f64) -> u64 {
    if total.is_nan() || total <= 0.0 {
        return 0;
    }
    total.round() as u64
}

pub fn quote(request: &PricingRequest) -> PriceQuote {
    let offering = &request.offering;
    let options = &request.options;
    let persons = f64::from(request.person_count);
    let duration = request.duration_hours;

    let hourly_rate = offering.hourly_rate();
    let multiplier = date_multiplier(request.date_start);
    let surcharge = time_surcharge(&request.time_start);

    let base = f64::from(hourly_rate) * f64::from(duration) * multiplier;
    let mut total = (base + f64::from(surcharge)) * persons;
    let mut applied = Vec::new();

    // Multiplicative and flat steps interleave; the order is part of the tariff.
    if options.early_registration {
        total *= EARLY_REGISTRATION_FACTOR;
        applied.push(Adjustment::EarlyRegistration);
    }

    if options.group_enrollment && request.person_count >= GROUP_ENROLLMENT_MIN_PERSONS {
        total *= GROUP_ENROLLMENT_FACTOR;
        applied.push(Adjustment::GroupEnrollment);
    }

    if options.intensive_course && offering.meets_intensive_threshold(duration) {
        total *= INTENSIVE_FACTOR;
        applied.push(Adjustment::IntensiveCourse);
    }

    if options.supplementary {
        total += f64::from(SUPPLEMENTARY_FEE_PER_PERSON) * persons;
        applied.push(Adjustment::Supplementary);
    }

    if options.personalized {
        let units = offering.personalized_units(duration);
        total += f64::from(PERSONALIZED_FEE_PER_UNIT) * f64::from(units);
        applied.push(Adjustment::Personalized);
    }

    if options.assessment {
        total += f64::from(ASSESSMENT_FEE);
        applied.push(Adjustment::Assessment);
    }

    if options.excursions {
        total *= EXCURSIONS_FACTOR;
        applied.push(Adjustment::Excursions);
    }

    if options.interactive {
        total *= INTERACTIVE_FACTOR;
        applied.push(Adjustment::Interactive);
    }

    PriceQuote {
        hourly_rate,
        duration_hours: duration,
        date_multiplier: multiplier,
        time_surcharge: surcharge,
        applied,
        total: round_price(total),
    }
}

/// Final price of an order in whole currency units
pub fn compute_price(
    offering: &ServiceOffering,
    date_start: NaiveDate,
    time_start: &str,
    person_count: u32,
    duration_hours: u32,
    options: &OrderOptions,
) -> u64 {
    let request = PricingRequest {
        offering: *offering,
        date_start,
        time_start: time_start.to_string(),
        person_count,
        duration_hours,
        options: *options,
    };
    quote(&request).total
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2025-03-04 is a Tuesday with no holiday
    fn weekday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
    }

    fn course(week_length_hours: u32) -> ServiceOffering {
        ServiceOffering::Course {
            fee_per_hour: 500,
            total_length_weeks: 4,
            week_length_hours,
        }
    }

    fn tutor(rate: u32) -> ServiceOffering {
        ServiceOffering::Tutor { price_per_hour: Some(rate) }
    }

    fn course_price(date: NaiveDate, time: &str, persons: u32, options: OrderOptions) -> u64 {
        let request = PricingRequest::new(course(3), date, time, persons, 0, options);
        quote(&request).total
    }

    #[test]
    fn test_course_baseline() {
        assert_eq!(course_price(weekday(), "14:00", 2, OrderOptions::default()), 12000);
    }

    #[test]
    fn test_course_duration_is_derived() {
        let request = PricingRequest::new(course(3), weekday(), "14:00", 1, 40, OrderOptions::default());
        assert_eq!(request.duration_hours, 12);
    }

    #[test]
    fn test_intensive_below_course_threshold() {
        let options = OrderOptions { intensive_course: true, ..Default::default() };
        assert_eq!(course_price(weekday(), "14:00", 2, options), 12000);
    }

    #[test]
    fn test_intensive_course_threshold_met() {
        let options = OrderOptions { intensive_course: true, ..Default::default() };
        let request = PricingRequest::new(course(5), weekday(), "14:00", 1, 0, options);
        // 500 * 20 * 1.2
        assert_eq!(quote(&request).total, 12000);
        assert_eq!(quote(&request).applied, vec![Adjustment::IntensiveCourse]);
    }

    #[test]
    fn test_tutor_evening_intensive() {
        let options = OrderOptions { intensive_course: true, ..Default::default() };
        let price = compute_price(&tutor(1000), weekday(), "19:00", 1, 10, &options);
        assert_eq!(price, 13200);
    }

    #[test]
    fn test_tutor_intensive_needs_ten_hours() {
        let options = OrderOptions { intensive_course: true, ..Default::default() };
        let price = compute_price(&tutor(1000), weekday(), "14:00", 1, 9, &options);
        assert_eq!(price, 9000);
    }

    #[test]
    fn test_weekend_multiplier() {
        let saturday = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        assert_eq!(course_price(saturday, "14:00", 2, OrderOptions::default()), 18000);
        assert_eq!(course_price(sunday, "14:00", 2, OrderOptions::default()), 18000);
    }

    #[test]
    fn test_weekend_multiplier_with_surcharge() {
        let saturday = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        // (500 * 12 * 1.5 + 400) * 2
        assert_eq!(course_price(saturday, "10:00", 2, OrderOptions::default()), 18800);
    }

    #[test]
    fn test_holiday_multiplier_on_weekday() {
        let new_year = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(course_price(new_year, "14:00", 2, OrderOptions::default()), 18000);
    }

    #[test]
    fn test_holiday_on_weekend_is_not_compounded() {
        let womens_day = NaiveDate::from_ymd_opt(2025, 3, 8).unwrap();
        let request = PricingRequest::new(course(3), womens_day, "14:00", 1, 0, OrderOptions::default());
        let quote = quote(&request);
        assert_eq!(quote.date_multiplier, PREMIUM_DAY_MULTIPLIER);
        assert_eq!(quote.total, 9000);
    }

    #[test]
    fn test_time_surcharge_boundaries() {
        let cases = [
            ("08:00", 0),
            ("09:00", 400),
            ("11:00", 400),
            ("12:00", 0),
            ("17:00", 0),
            ("18:00", 1000),
            ("19:00", 1000),
            ("20:00", 0),
        ];

        for (time, surcharge) in cases {
            assert_eq!(time_surcharge(time), surcharge, "start time {}", time);
            let price = compute_price(&tutor(1000), weekday(), time, 1, 1, &OrderOptions::default());
            assert_eq!(price, 1000 + u64::from(surcharge), "start time {}", time);
        }
    }

    #[test]
    fn test_surcharge_added_once_before_persons() {
        // (1000 + 1000) * 3
        let price = compute_price(&tutor(1000), weekday(), "18:00", 3, 1, &OrderOptions::default());
        assert_eq!(price, 6000);
    }

    #[test]
    fn test_unreadable_time_fails_soft() {
        assert_eq!(parse_start_hour("abc"), None);
        assert_eq!(parse_start_hour(""), None);
        assert_eq!(parse_start_hour("9:30"), Some(9));
        assert_eq!(parse_start_hour(" 18:00"), Some(18));
        assert_eq!(parse_start_hour("10h"), Some(10));

        assert_eq!(time_surcharge("abc"), 0);
        assert_eq!(time_surcharge(""), 0);
        let price = compute_price(&tutor(1000), weekday(), "noon", 1, 2, &OrderOptions::default());
        assert_eq!(price, 2000);
    }

    #[test]
    fn test_group_discount_requires_five_persons() {
        let options = OrderOptions { group_enrollment: true, ..Default::default() };

        let four = quote(&PricingRequest::new(tutor(1000), weekday(), "14:00", 4, 2, options));
        assert_eq!(four.total, 8000);
        assert!(four.applied.is_empty());

        let five = quote(&PricingRequest::new(tutor(1000), weekday(), "14:00", 5, 2, options));
        assert_eq!(five.total, 8500);
        assert_eq!(five.applied, vec![Adjustment::GroupEnrollment]);
    }

    #[test]
    fn test_early_registration_does_not_discount_supplementary() {
        let options = OrderOptions {
            early_registration: true,
            supplementary: true,
            ..Default::default()
        };
        // 12000 * 0.9 + 2000 * 2, not (12000 + 4000) * 0.9
        assert_eq!(course_price(weekday(), "14:00", 2, options), 14800);
    }

    #[test]
    fn test_personalized_units() {
        let options = OrderOptions { personalized: true, ..Default::default() };

        // Course: one unit per week
        assert_eq!(course_price(weekday(), "14:00", 1, options), 6000 + 1500 * 4);

        // Tutor: one unit per started block of ten hours
        let price = compute_price(&tutor(1000), weekday(), "14:00", 1, 11, &options);
        assert_eq!(price, 11000 + 1500 * 2);
    }

    #[test]
    fn test_assessment_is_flat() {
        let options = OrderOptions { assessment: true, ..Default::default() };
        let price = compute_price(&tutor(1000), weekday(), "14:00", 3, 1, &options);
        assert_eq!(price, 3300);
    }

    #[test]
    fn test_percentage_surcharges_apply_after_fees() {
        let excursions = OrderOptions { supplementary: true, excursions: true, ..Default::default() };
        assert_eq!(compute_price(&tutor(1000), weekday(), "14:00", 1, 1, &excursions), 3750);

        let interactive = OrderOptions { assessment: true, interactive: true, ..Default::default() };
        assert_eq!(compute_price(&tutor(1000), weekday(), "14:00", 1, 1, &interactive), 1950);
    }

    #[test]
    fn test_full_option_chain() {
        let options = OrderOptions {
            early_registration: true,
            group_enrollment: true,
            intensive_course: true,
            supplementary: true,
            personalized: true,
            assessment: false,
            excursions: true,
            interactive: true,
        };
        let request = PricingRequest::new(course(5), weekday(), "10:00", 5, 0, options);
        let quote = quote(&request);

        // (500 * 20 + 400) * 5 = 52000
        // * 0.9 * 0.85 * 1.2 = 47736
        // + 10000 + 6000 = 63736
        // * 1.25 * 1.5 = 119505
        assert_eq!(quote.total, 119505);
        assert_eq!(quote.time_surcharge, 400);
        assert_eq!(quote.duration_hours, 20);
        assert_eq!(
            quote.applied,
            vec![
                Adjustment::EarlyRegistration,
                Adjustment::GroupEnrollment,
                Adjustment::IntensiveCourse,
                Adjustment::Supplementary,
                Adjustment::Personalized,
                Adjustment::Excursions,
                Adjustment::Interactive,
            ]
        );
    }

    #[test]
    fn test_default_tutor_rate() {
        let offering = ServiceOffering::Tutor { price_per_hour: None };
        let price = compute_price(&offering, weekday(), "14:00", 1, 3, &OrderOptions::default());
        assert_eq!(price, 3000);
    }

    #[test]
    fn test_zero_persons_prices_at_zero() {
        let price = compute_price(&tutor(1000), weekday(), "10:00", 0, 5, &OrderOptions::default());
        assert_eq!(price, 0);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let options = OrderOptions { early_registration: true, excursions: true, ..Default::default() };
        let request = PricingRequest::new(tutor(1350), weekday(), "09:00", 3, 7, options);
        let first = quote(&request);
        for _ in 0..5 {
            assert_eq!(quote(&request), first);
        }
    }

    #[test]
    fn test_round_price() {
        assert_eq!(round_price(2.5), 3);
        assert_eq!(round_price(2.4999), 2);
        assert_eq!(round_price(10800.000000000002), 10800);
        assert_eq!(round_price(-5.0), 0);
        assert_eq!(round_price(f64::NAN), 0);
    }

    #[test]
    fn test_options_default_when_absent() {
        let options: OrderOptions = serde_json::from_str(r#"{"supplementary": true}"#).unwrap();
        assert!(options.supplementary);
        assert!(!options.early_registration);
        assert!(!options.interactive);
    }

    #[test]
    fn test_adjustment_kinds() {
        assert_eq!(Adjustment::EarlyRegistration.kind(), AdjustmentKind::Discount);
        assert_eq!(Adjustment::GroupEnrollment.kind(), AdjustmentKind::Discount);
        assert_eq!(Adjustment::Excursions.kind(), AdjustmentKind::Surcharge);
        assert_eq!(Adjustment::Personalized.display_value(), "+1500 RUB per unit");
    }
}
