//! Run configuration from the environment.
//!
//! One required value: the billing-cycle start day. The alert sender can be
//! overridden but defaults to the HDFC alerts address.

use spendtrail_core::{BillingDay, ConfigError};

pub const BILLING_DAY_VAR: &str = "SPENDTRAIL_BILLING_DAY";
pub const ALERT_SENDER_VAR: &str = "SPENDTRAIL_ALERT_SENDER";

const DEFAULT_ALERT_SENDER: &str = "alerts@hdfcbank.net";

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub billing_day: BillingDay,
    pub alert_sender: String,
}

impl RunConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = get(BILLING_DAY_VAR).ok_or_else(|| ConfigError::MissingBillingDay {
            var: BILLING_DAY_VAR.to_string(),
        })?;
        let day: i64 = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::BillingDayNotNumeric {
                var: BILLING_DAY_VAR.to_string(),
                value: raw.clone(),
            })?;
        let billing_day = BillingDay::new(day)?;

        let alert_sender = get(ALERT_SENDER_VAR)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ALERT_SENDER.to_string());

        Ok(Self {
            billing_day,
            alert_sender,
        })
    }
}
