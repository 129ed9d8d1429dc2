//! Alert-template matchers.
//!
//! Each bank alert format is one matcher: it recognizes its own snippets and
//! slices out the amount/merchant/timestamp fields between fixed anchor
//! substrings. Anchors are plain struct fields, so tests (or a future alert
//! format) can supply their own wording instead of editing extraction code.
//!
//! Extraction walks the anchors strictly left to right; an anchor that is
//! absent, or that only appears before the previous one, is a `ParseError`.

use crate::error::ParseError;
use crate::transaction::{Instrument, Transaction};

/// One alert format: recognition plus field extraction.
pub trait TemplateMatcher {
    fn instrument(&self) -> Instrument;

    /// Cheap recognition check, run before any extraction.
    fn matches(&self, snippet: &str) -> bool;

    /// Slice the transaction fields out of a snippet this matcher claimed.
    fn extract(&self, snippet: &str) -> Result<Transaction, ParseError>;
}

/// Find `anchor` at or after byte offset `from`, returning (start, end).
fn find_after(snippet: &str, anchor: &str, from: usize) -> Result<(usize, usize), ParseError> {
    snippet
        .get(from..)
        .and_then(|rest| rest.find(anchor))
        .map(|i| (from + i, from + i + anchor.len()))
        .ok_or_else(|| ParseError::anchor(anchor))
}

fn parse_amount(raw: &str) -> Result<f64, ParseError> {
    raw.parse::<f64>().map_err(|_| ParseError::AmountNotNumeric {
        value: raw.to_string(),
    })
}

/// Card-present debit alerts. Recognized by their fixed greeting prefix;
/// fields are laid out as `... for Rs <amount> at <merchant> on <date>.
/// Authorization code ...`.
#[derive(Debug, Clone)]
pub struct CreditCardTemplate {
    pub greeting: String,
    pub amount_anchor: String,
    pub merchant_anchor: String,
    pub timestamp_anchor: String,
    pub trailer: String,
}

impl CreditCardTemplate {
    /// The HDFC credit-card alert wording.
    pub fn hdfc() -> Self {
        Self {
            greeting: "Dear Card Member, Thank you for using your HDFC Bank Credit Card ending"
                .to_string(),
            amount_anchor: "Rs ".to_string(),
            merchant_anchor: "at ".to_string(),
            timestamp_anchor: "on ".to_string(),
            trailer: ". Authorization".to_string(),
        }
    }
}

impl TemplateMatcher for CreditCardTemplate {
    fn instrument(&self) -> Instrument {
        Instrument::CreditCard
    }

    fn matches(&self, snippet: &str) -> bool {
        snippet.starts_with(&self.greeting)
    }

    fn extract(&self, snippet: &str) -> Result<Transaction, ParseError> {
        let (_, amount_start) = find_after(snippet, &self.amount_anchor, self.greeting.len())?;
        let (merchant_open, merchant_start) =
            find_after(snippet, &self.merchant_anchor, amount_start)?;
        let (timestamp_open, timestamp_start) =
            find_after(snippet, &self.timestamp_anchor, merchant_start)?;
        let (trailer_open, _) = find_after(snippet, &self.trailer, timestamp_start)?;

        let amount = parse_amount(snippet[amount_start..merchant_open].trim())?;
        Ok(Transaction::new(
            amount,
            snippet[merchant_start..timestamp_open].trim(),
            snippet[timestamp_start..trailer_open].trim(),
            self.instrument(),
        ))
    }
}

/// UPI debit alerts. Recognized by a debit phrase anywhere in the text (these
/// snippets don't share a stable greeting); laid out as `Rs.<amount> has been
/// debited ... to <merchant> on <date>. Your UPI transaction ...`.
#[derive(Debug, Clone)]
pub struct UpiTemplate {
    pub debit_phrase: String,
    pub amount_anchor: String,
    pub amount_close: String,
    pub merchant_anchor: String,
    pub timestamp_anchor: String,
    pub trailer: String,
}

impl UpiTemplate {
    /// The HDFC RuPay-over-UPI alert wording.
    pub fn hdfc() -> Self {
        Self {
            debit_phrase: "has been debited from your HDFC Bank RuPay Credit Card".to_string(),
            amount_anchor: "Rs.".to_string(),
            amount_close: "has".to_string(),
            merchant_anchor: "to ".to_string(),
            timestamp_anchor: "on ".to_string(),
            trailer: ". Your UPI transaction".to_string(),
        }
    }
}

impl TemplateMatcher for UpiTemplate {
    fn instrument(&self) -> Instrument {
        Instrument::UpiCard
    }

    fn matches(&self, snippet: &str) -> bool {
        snippet.contains(&self.debit_phrase)
    }

    fn extract(&self, snippet: &str) -> Result<Transaction, ParseError> {
        let (_, amount_start) = find_after(snippet, &self.amount_anchor, 0)?;
        let (close_open, close_end) = find_after(snippet, &self.amount_close, amount_start)?;
        let (_, merchant_start) = find_after(snippet, &self.merchant_anchor, close_end)?;
        let (timestamp_open, timestamp_start) =
            find_after(snippet, &self.timestamp_anchor, merchant_start)?;
        let (trailer_open, _) = find_after(snippet, &self.trailer, timestamp_start)?;

        let amount = parse_amount(snippet[amount_start..close_open].trim())?;
        Ok(Transaction::new(
            amount,
            snippet[merchant_start..timestamp_open].trim(),
            snippet[timestamp_start..trailer_open].trim(),
            self.instrument(),
        ))
    }
}

/// Ordered set of matchers: the first one whose `matches` claims a snippet
/// extracts it; a snippet no matcher claims is an unknown template, not an
/// error.
pub struct TemplateSet {
    matchers: Vec<Box<dyn TemplateMatcher>>,
}

impl TemplateSet {
    pub fn new(matchers: Vec<Box<dyn TemplateMatcher>>) -> Self {
        Self { matchers }
    }

    /// Both HDFC alert formats, credit-card prefix check first.
    pub fn hdfc() -> Self {
        Self::new(vec![
            Box::new(CreditCardTemplate::hdfc()),
            Box::new(UpiTemplate::hdfc()),
        ])
    }

    /// `Ok(Some)` for a parsed transaction, `Ok(None)` for an unknown
    /// template, `Err` when a claimed snippet fails extraction.
    pub fn parse(&self, snippet: &str) -> Result<Option<Transaction>, ParseError> {
        for matcher in &self.matchers {
            if matcher.matches(snippet) {
                return matcher.extract(snippet).map(Some);
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CC_SNIPPET: &str = "Dear Card Member, Thank you for using your HDFC Bank \
         Credit Card ending 1234 for Rs 500.00 at ACME STORE on 01-01-24. Authorization code 1122";

    const UPI_SNIPPET: &str = "Dear Customer, Rs.250 has been debited from your HDFC \
         Bank RuPay Credit Card XX1234 via UPI to MERCHANT X on 02-01-24. Your UPI transaction \
         reference number is 4433";

    #[test]
    fn test_credit_card_extraction() {
        let t = CreditCardTemplate::hdfc();
        assert!(t.matches(CC_SNIPPET));

        let txn = t.extract(CC_SNIPPET).unwrap();
        assert_eq!(txn.amount, 500.00);
        assert_eq!(txn.merchant, "ACME STORE");
        assert_eq!(txn.timestamp, "01-01-24");
        assert_eq!(txn.instrument, Instrument::CreditCard);
    }

    #[test]
    fn test_upi_extraction() {
        let t = UpiTemplate::hdfc();
        assert!(t.matches(UPI_SNIPPET));

        let txn = t.extract(UPI_SNIPPET).unwrap();
        assert_eq!(txn.amount, 250.0);
        assert_eq!(txn.merchant, "MERCHANT X");
        assert_eq!(txn.timestamp, "02-01-24");
        assert_eq!(txn.instrument, Instrument::UpiCard);
    }

    #[test]
    fn test_upi_detected_by_containment_not_prefix() {
        let t = UpiTemplate::hdfc();
        assert!(!UPI_SNIPPET.starts_with(&t.debit_phrase));
        assert!(t.matches(UPI_SNIPPET));
    }

    #[test]
    fn test_missing_anchor_is_an_error() {
        let t = CreditCardTemplate::hdfc();
        let truncated = "Dear Card Member, Thank you for using your HDFC Bank Credit Card ending \
             1234 for Rs 500.00 at ACME STORE on 01-01-24";
        assert_eq!(
            t.extract(truncated),
            Err(ParseError::anchor(". Authorization"))
        );
    }

    #[test]
    fn test_anchors_out_of_order_is_an_error() {
        let t = CreditCardTemplate::hdfc();
        // "at " only occurs before "Rs ", so the ordered walk must not see it.
        let scrambled = "Dear Card Member, Thank you for using your HDFC Bank Credit Card ending \
             1234 at ACME for Rs 500.00 on 01-01-24. Authorization code 1122";
        assert_eq!(t.extract(scrambled), Err(ParseError::anchor("at ")));
    }

    #[test]
    fn test_non_numeric_amount() {
        let t = CreditCardTemplate::hdfc();
        let bad = "Dear Card Member, Thank you for using your HDFC Bank Credit Card ending 1234 \
             for Rs FIVE at ACME STORE on 01-01-24. Authorization code 1122";
        assert_eq!(
            t.extract(bad),
            Err(ParseError::AmountNotNumeric {
                value: "FIVE".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_template_is_not_an_error() {
        let set = TemplateSet::hdfc();
        assert_eq!(set.parse("Your OTP for netbanking login is 123456"), Ok(None));
    }

    #[test]
    fn test_set_prefers_credit_card_prefix() {
        let set = TemplateSet::hdfc();
        let txn = set.parse(CC_SNIPPET).unwrap().unwrap();
        assert_eq!(txn.instrument, Instrument::CreditCard);

        let txn = set.parse(UPI_SNIPPET).unwrap().unwrap();
        assert_eq!(txn.instrument, Instrument::UpiCard);
    }

    #[test]
    fn test_custom_anchors() {
        let t = CreditCardTemplate {
            greeting: "Hello,".to_string(),
            amount_anchor: "INR ".to_string(),
            merchant_anchor: "at ".to_string(),
            timestamp_anchor: "on ".to_string(),
            trailer: ". Ref".to_string(),
        };
        let txn = t
            .extract("Hello, you spent INR 12.50 at KIOSK on 03-01-24. Ref 9")
            .unwrap();
        assert_eq!(txn.amount, 12.50);
        assert_eq!(txn.merchant, "KIOSK");
    }
}
