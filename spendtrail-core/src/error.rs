//! Typed errors for configuration and snippet extraction.

use std::fmt;

/// Startup configuration problems. Fatal: the run cannot proceed without a
/// valid billing day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The environment variable was not set at all.
    MissingBillingDay { var: String },
    /// Set, but not an integer.
    BillingDayNotNumeric { var: String, value: String },
    /// An integer outside 1..=30.
    BillingDayOutOfRange { day: i64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingBillingDay { var } => {
                write!(f, "billing day not configured: set {var} (1-30)")
            }
            ConfigError::BillingDayNotNumeric { var, value } => {
                write!(f, "{var}={value:?} is not an integer (expected 1-30)")
            }
            ConfigError::BillingDayOutOfRange { day } => {
                write!(f, "billing day {day} out of range (expected 1-30)")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Extraction failures for a snippet that matched a known template.
///
/// These are per-snippet: the aggregator counts them and moves on rather than
/// aborting the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An anchor substring was absent, or appeared before the previous anchor.
    AnchorNotFound { anchor: String },
    /// The amount slice did not parse as a number.
    AmountNotNumeric { value: String },
}

impl ParseError {
    pub fn anchor(anchor: impl Into<String>) -> Self {
        ParseError::AnchorNotFound {
            anchor: anchor.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::AnchorNotFound { anchor } => {
                write!(f, "anchor {anchor:?} not found in snippet")
            }
            ParseError::AmountNotNumeric { value } => {
                write!(f, "amount {value:?} is not numeric")
            }
        }
    }
}

impl std::error::Error for ParseError {}
