//! Calendar rules that make a start date more expensive.
//!
//! The holiday list is a fixed table of Russian public holidays for 2025 and
//! 2026. Dates outside that range are only checked for weekends.

use chrono::{Datelike, NaiveDate, Weekday};

/// (year, month, day)
const PUBLIC_HOLIDAYS: [(i32, u32, u32); 28] = [
    (2025, 1, 1),
    (2025, 1, 2),
    (2025, 1, 3),
    (2025, 1, 4),
    (2025, 1, 5),
    (2025, 1, 6),
    (2025, 1, 7),
    (2025, 1, 8),
    (2025, 2, 23),
    (2025, 3, 8),
    (2025, 5, 1),
    (2025, 5, 9),
    (2025, 6, 12),
    (2025, 11, 4),
    (2026, 1, 1),
    (2026, 1, 2),
    (2026, 1, 3),
    (2026, 1, 4),
    (2026, 1, 5),
    (2026, 1, 6),
    (2026, 1, 7),
    (2026, 1, 8),
    (2026, 2, 23),
    (2026, 3, 8),
    (2026, 5, 1),
    (2026, 5, 9),
    (2026, 6, 12),
    (2026, 11, 4),
];

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn is_public_holiday(date: NaiveDate) -> bool {
    let key = (date.year(), date.month(), date.day());
    PUBLIC_HOLIDAYS.contains(&key)
}

/// Weekends and public holidays are billed at the same premium
pub fn is_premium_day(date: NaiveDate) -> bool {
    is_weekend(date) || is_public_holiday(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekend_detection() {
        assert!(is_weekend(date(2025, 3, 1))); // Saturday
        assert!(is_weekend(date(2025, 3, 2))); // Sunday
        assert!(!is_weekend(date(2025, 3, 3)));
        assert!(!is_weekend(date(2025, 3, 7)));
    }

    #[test]
    fn test_holiday_table() {
        assert!(is_public_holiday(date(2025, 1, 1)));
        assert!(is_public_holiday(date(2025, 1, 8)));
        assert!(!is_public_holiday(date(2025, 1, 9)));
        assert!(is_public_holiday(date(2025, 11, 4)));
        assert!(is_public_holiday(date(2026, 6, 12)));

        // Not extended past the published years
        assert!(!is_public_holiday(date(2024, 1, 1)));
        assert!(!is_public_holiday(date(2027, 1, 1)));
    }

    #[test]
    fn test_premium_day() {
        // Wednesday, but a holiday
        assert!(is_premium_day(date(2025, 1, 1)));
        // Saturday that is also a holiday
        assert!(is_premium_day(date(2025, 3, 8)));
        // Plain Tuesday
        assert!(!is_premium_day(date(2025, 3, 4)));
    }
}
