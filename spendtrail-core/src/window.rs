//! Billing-cycle window arithmetic and the Gmail search filter built from it.
//!
//! The window is computed once per run and the resulting query string is
//! reused across every pagination call, so a run that straddles midnight
//! cannot see two different windows.

use chrono::{Datelike, NaiveDate};

use crate::error::ConfigError;

/// Day of month the billing cycle starts on. Valid range is 1..=30; day 31
/// is rejected because roughly half the months don't have one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingDay(u32);

impl BillingDay {
    pub fn new(day: i64) -> Result<Self, ConfigError> {
        if !(1..=30).contains(&day) {
            return Err(ConfigError::BillingDayOutOfRange { day });
        }
        Ok(BillingDay(day as u32))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

/// Start of the billing cycle containing `today`.
///
/// If today's day-of-month has reached the billing day, the cycle started
/// this month; otherwise it started on the billing day of the previous month,
/// rolling the year back across January. A billing day the previous month is
/// too short for (day 29/30 vs. February) clamps to that month's last day.
pub fn cycle_start(today: NaiveDate, billing_day: BillingDay) -> NaiveDate {
    let day = billing_day.get();
    if today.day() >= day {
        clamped_ymd(today.year(), today.month(), day)
    } else if today.month() > 1 {
        clamped_ymd(today.year(), today.month() - 1, day)
    } else {
        clamped_ymd(today.year() - 1, 12, day)
    }
}

fn clamped_ymd(year: i32, month: u32, mut day: u32) -> NaiveDate {
    loop {
        if let Some(d) = NaiveDate::from_ymd_opt(year, month, day) {
            return d;
        }
        day -= 1;
    }
}

/// Search filter for the provider's message-list call. The end of the range
/// is open: everything from the cycle start onwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub sender: String,
    pub after: NaiveDate,
    pub unread_only: bool,
}

impl SearchFilter {
    pub fn new(sender: impl Into<String>, after: NaiveDate) -> Self {
        Self {
            sender: sender.into(),
            after,
            unread_only: false,
        }
    }

    /// Render the Gmail free-text query, e.g.
    /// `from:alerts@hdfcbank.net after:2024/09/24`.
    pub fn to_query(&self) -> String {
        let mut q = format!("from:{} after:{}", self.sender, self.after.format("%Y/%m/%d"));
        if self.unread_only {
            q.push_str(" is:unread");
        }
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_billing_day_bounds() {
        assert!(BillingDay::new(1).is_ok());
        assert!(BillingDay::new(30).is_ok());
        assert_eq!(
            BillingDay::new(0),
            Err(ConfigError::BillingDayOutOfRange { day: 0 })
        );
        assert_eq!(
            BillingDay::new(31),
            Err(ConfigError::BillingDayOutOfRange { day: 31 })
        );
    }

    #[test]
    fn test_cycle_started_this_month() {
        let day = BillingDay::new(24).unwrap();
        assert_eq!(cycle_start(ymd(2024, 9, 24), day), ymd(2024, 9, 24));
        assert_eq!(cycle_start(ymd(2024, 9, 30), day), ymd(2024, 9, 24));
    }

    #[test]
    fn test_cycle_started_previous_month() {
        let day = BillingDay::new(24).unwrap();
        assert_eq!(cycle_start(ymd(2024, 10, 3), day), ymd(2024, 9, 24));
    }

    #[test]
    fn test_january_rolls_back_a_year() {
        let day = BillingDay::new(24).unwrap();
        assert_eq!(cycle_start(ymd(2025, 1, 10), day), ymd(2024, 12, 24));
    }

    #[test]
    fn test_short_february_clamps() {
        let day = BillingDay::new(30).unwrap();
        assert_eq!(cycle_start(ymd(2025, 3, 5), day), ymd(2025, 2, 28));
        // 2024 is a leap year
        assert_eq!(cycle_start(ymd(2024, 3, 5), day), ymd(2024, 2, 29));
    }

    #[test]
    fn test_query_rendering() {
        let mut f = SearchFilter::new("alerts@hdfcbank.net", ymd(2024, 9, 24));
        assert_eq!(f.to_query(), "from:alerts@hdfcbank.net after:2024/09/24");

        f.unread_only = true;
        assert_eq!(
            f.to_query(),
            "from:alerts@hdfcbank.net after:2024/09/24 is:unread"
        );
    }
}
