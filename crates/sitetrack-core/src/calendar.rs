//! Calendar bucket keys.
//!
//! Visits are bucketed by the host's local calendar, so every function here
//! takes a wall-clock [`Date`] or [`PrimitiveDateTime`] that the caller has
//! already converted to local time.

use serde::Serialize;
use time::{Date, Month, PrimitiveDateTime};

/// `YYYY-MM-DD` key for a day bucket.
#[must_use]
pub fn day_key(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// `YYYY-MM` key for a month bucket.
#[must_use]
pub fn month_key(date: Date) -> String {
    format_month(date.year(), date.month())
}

/// Key of the calendar day before `date`.
#[must_use]
pub fn yesterday_key(date: Date) -> String {
    day_key(date.previous_day().unwrap_or(date))
}

/// Key of the calendar month before the one containing `date`.
#[must_use]
pub fn last_month_key(date: Date) -> String {
    let month = date.month().previous();
    let year = if month == Month::December {
        date.year() - 1
    } else {
        date.year()
    };
    format_month(year, month)
}

fn format_month(year: i32, month: Month) -> String {
    format!("{:04}-{:02}", year, u8::from(month))
}

/// The four bucket keys a snapshot needs, derived from one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketKeys {
    pub today: String,
    pub yesterday: String,
    pub this_month: String,
    pub last_month: String,
}

impl BucketKeys {
    #[must_use]
    pub fn at(now_local: PrimitiveDateTime) -> Self {
        let date = now_local.date();
        Self {
            today: day_key(date),
            yesterday: yesterday_key(date),
            this_month: month_key(date),
            last_month: last_month_key(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn test_keys_are_zero_padded() {
        assert_eq!(day_key(date!(2026 - 03 - 07)), "2026-03-07");
        assert_eq!(month_key(date!(2026 - 03 - 07)), "2026-03");
    }

    #[test]
    fn test_yesterday_crosses_month_and_year() {
        assert_eq!(yesterday_key(date!(2026 - 10 - 19)), "2026-10-18");
        assert_eq!(yesterday_key(date!(2026 - 03 - 01)), "2026-02-28");
        assert_eq!(yesterday_key(date!(2024 - 03 - 01)), "2024-02-29");
        assert_eq!(yesterday_key(date!(2026 - 01 - 01)), "2025-12-31");
    }

    #[test]
    fn test_last_month_crosses_year() {
        assert_eq!(last_month_key(date!(2026 - 10 - 19)), "2026-09");
        assert_eq!(last_month_key(date!(2026 - 01 - 15)), "2025-12");
        // End-of-month dates do not overflow into the wrong month.
        assert_eq!(last_month_key(date!(2026 - 03 - 31)), "2026-02");
    }

    #[test]
    fn test_bucket_keys_at() {
        let keys = BucketKeys::at(datetime!(2026 - 01 - 01 00:30));
        assert_eq!(
            keys,
            BucketKeys {
                today: "2026-01-01".to_string(),
                yesterday: "2025-12-31".to_string(),
                this_month: "2026-01".to_string(),
                last_month: "2025-12".to_string(),
            }
        );
    }
}
