//! Transaction record types produced by snippet extraction.

use serde::{Deserialize, Serialize};

/// Payment instrument the alert was generated for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Instrument {
    #[serde(rename = "credit-card")]
    CreditCard,
    #[serde(rename = "upi-card")]
    UpiCard,
}

impl Instrument {
    pub fn label(&self) -> &'static str {
        match self {
            Instrument::CreditCard => "credit card",
            Instrument::UpiCard => "UPI",
        }
    }
}

/// One debit alert, parsed from a message snippet.
///
/// The timestamp is kept as the bank's own wording (e.g. "01-01-24"); nothing
/// downstream needs it as a date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub amount: f64,
    pub merchant: String,
    pub timestamp: String,
    pub instrument: Instrument,
}

impl Transaction {
    pub fn new(
        amount: f64,
        merchant: impl Into<String>,
        timestamp: impl Into<String>,
        instrument: Instrument,
    ) -> Self {
        Self {
            amount,
            merchant: merchant.into(),
            timestamp: timestamp.into(),
            instrument,
        }
    }
}
