//! Expiry status classification tests
//!
//! The classifier is the single source of truth for every surface that
//! shows a status: list filters, tab counts, CSV cells, PDF row tints and
//! the mail legend. These tests pin down:
//! - Missing expiry dates map to Unknown
//! - Dates strictly before the reference day are Expired
//! - The reference day through day 30 inclusive are Warning
//! - Day 31 onward is Valid

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use shared::models::{classify_status, LotStatus, WARNING_WINDOW_DAYS};

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate reference dates across several years, leap years included
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2020i32..=2035, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Day offsets reaching well past the warning window on both sides
fn offset_strategy() -> impl Strategy<Value = i64> {
    -4000i64..=4000
}

/// Severity ordering used by the monotonicity property
fn severity(status: LotStatus) -> u8 {
    match status {
        LotStatus::Expired => 2,
        LotStatus::Warning => 1,
        LotStatus::Valid | LotStatus::Unknown => 0,
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// A dated lot never classifies as Unknown
    #[test]
    fn test_dated_lots_never_unknown(
        reference in date_strategy(),
        offset in offset_strategy()
    ) {
        let expiry = reference + Duration::days(offset);
        prop_assert_ne!(classify_status(Some(expiry), reference), LotStatus::Unknown);
    }

    /// The three dated buckets partition the timeline at the documented edges
    #[test]
    fn test_bucket_matches_signed_distance(
        reference in date_strategy(),
        offset in offset_strategy()
    ) {
        let expiry = reference + Duration::days(offset);
        let expected = if offset < 0 {
            LotStatus::Expired
        } else if offset <= WARNING_WINDOW_DAYS {
            LotStatus::Warning
        } else {
            LotStatus::Valid
        };
        prop_assert_eq!(classify_status(Some(expiry), reference), expected);
    }

    /// Classification depends only on the gap between the two dates
    #[test]
    fn test_classification_is_translation_invariant(
        reference in date_strategy(),
        offset in offset_strategy(),
        shift in -365i64..=365
    ) {
        let expiry = reference + Duration::days(offset);
        prop_assert_eq!(
            classify_status(Some(expiry), reference),
            classify_status(
                Some(expiry + Duration::days(shift)),
                reference + Duration::days(shift)
            )
        );
    }

    /// Pushing an expiry date later never makes the status more severe
    #[test]
    fn test_later_expiry_never_more_severe(
        reference in date_strategy(),
        offset in offset_strategy(),
        extension in 0i64..=4000
    ) {
        let expiry = reference + Duration::days(offset);
        let later = expiry + Duration::days(extension);
        prop_assert!(
            severity(classify_status(Some(later), reference))
                <= severity(classify_status(Some(expiry), reference))
        );
    }
}

// ============================================================================
// Unit Tests: Window Boundaries
// ============================================================================

#[cfg(test)]
mod boundary_tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_expiry_date_is_unknown() {
        assert_eq!(classify_status(None, date(2025, 7, 1)), LotStatus::Unknown);
    }

    #[test]
    fn test_yesterday_is_expired() {
        let reference = date(2025, 7, 15);
        let status = classify_status(Some(reference - Duration::days(1)), reference);
        assert_eq!(status, LotStatus::Expired);
    }

    #[test]
    fn test_expiring_today_is_warning_not_expired() {
        let reference = date(2025, 7, 15);
        assert_eq!(
            classify_status(Some(reference), reference),
            LotStatus::Warning
        );
    }

    #[test]
    fn test_last_day_of_window_is_warning() {
        let reference = date(2025, 7, 15);
        let boundary = reference + Duration::days(WARNING_WINDOW_DAYS);
        assert_eq!(classify_status(Some(boundary), reference), LotStatus::Warning);
    }

    #[test]
    fn test_first_day_past_window_is_valid() {
        let reference = date(2025, 7, 15);
        let past = reference + Duration::days(WARNING_WINDOW_DAYS + 1);
        assert_eq!(classify_status(Some(past), reference), LotStatus::Valid);
    }

    #[test]
    fn test_window_is_thirty_days() {
        assert_eq!(WARNING_WINDOW_DAYS, 30);
    }
}

// ============================================================================
// Unit Tests: Calendar Edges
// ============================================================================

#[cfg(test)]
mod calendar_tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_crosses_month_end() {
        let reference = date(2025, 1, 20);
        assert_eq!(
            classify_status(Some(date(2025, 2, 19)), reference),
            LotStatus::Warning
        );
        assert_eq!(
            classify_status(Some(date(2025, 2, 20)), reference),
            LotStatus::Valid
        );
    }

    #[test]
    fn test_window_crosses_year_end() {
        let reference = date(2025, 12, 15);
        assert_eq!(
            classify_status(Some(date(2026, 1, 14)), reference),
            LotStatus::Warning
        );
        assert_eq!(
            classify_status(Some(date(2026, 1, 15)), reference),
            LotStatus::Valid
        );
    }

    #[test]
    fn test_leap_day_counts_like_any_other_day() {
        // 2028 is a leap year; the window from Feb 10 spans Feb 29
        let reference = date(2028, 2, 10);
        assert_eq!(
            classify_status(Some(date(2028, 2, 29)), reference),
            LotStatus::Warning
        );
        assert_eq!(
            classify_status(Some(date(2028, 3, 11)), reference),
            LotStatus::Warning
        );
        assert_eq!(
            classify_status(Some(date(2028, 3, 12)), reference),
            LotStatus::Valid
        );
    }

    #[test]
    fn test_far_past_and_far_future() {
        let reference = date(2025, 7, 1);
        assert_eq!(
            classify_status(Some(date(2019, 1, 1)), reference),
            LotStatus::Expired
        );
        assert_eq!(
            classify_status(Some(date(2035, 1, 1)), reference),
            LotStatus::Valid
        );
    }
}

// ============================================================================
// Unit Tests: Bucket Counting
// ============================================================================

#[cfg(test)]
mod counting_tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Counting classified lots bucket by bucket always sums to the input
    #[test]
    fn test_buckets_partition_the_input() {
        let reference = date(2025, 7, 15);
        let expiries = vec![
            None,
            Some(date(2025, 7, 1)),
            Some(date(2025, 7, 15)),
            Some(date(2025, 8, 14)),
            Some(date(2025, 8, 15)),
            Some(date(2026, 1, 1)),
            None,
        ];

        let mut expired = 0u64;
        let mut warning = 0u64;
        let mut valid = 0u64;
        let mut unknown = 0u64;
        for expiry in &expiries {
            match classify_status(*expiry, reference) {
                LotStatus::Expired => expired += 1,
                LotStatus::Warning => warning += 1,
                LotStatus::Valid => valid += 1,
                LotStatus::Unknown => unknown += 1,
            }
        }

        assert_eq!(expired, 1);
        assert_eq!(warning, 2);
        assert_eq!(valid, 2);
        assert_eq!(unknown, 2);
        assert_eq!(
            expired + warning + valid + unknown,
            expiries.len() as u64
        );
    }
}
