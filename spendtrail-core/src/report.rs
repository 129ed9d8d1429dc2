//! Aggregate parsed snippets into a spend report.

use crate::error::ParseError;
use crate::template::TemplateSet;
use crate::transaction::{Instrument, Transaction};

/// Totals and bookkeeping for one run.
///
/// UPI debits count towards `total` alongside credit-card debits; the
/// per-instrument subtotals are kept so either slice can be reported on its
/// own.
#[derive(Debug, Default)]
pub struct SpendReport {
    pub transactions: Vec<Transaction>,
    pub total: f64,
    pub credit_card_total: f64,
    pub upi_total: f64,
    /// Snippets no template claimed. Not an error.
    pub unmatched: usize,
    /// Snippets a template claimed but could not extract. Skipped, run
    /// continues.
    pub unparseable: usize,
    pub errors: Vec<ParseError>,
}

impl SpendReport {
    pub fn parsed_count(&self) -> usize {
        self.transactions.len()
    }
}

/// Classify and sum every snippet. A `ParseError` skips just that snippet.
pub fn aggregate<'a, I>(snippets: I, templates: &TemplateSet) -> SpendReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut report = SpendReport::default();

    for snippet in snippets {
        match templates.parse(snippet) {
            Ok(Some(txn)) => {
                report.total += txn.amount;
                match txn.instrument {
                    Instrument::CreditCard => report.credit_card_total += txn.amount,
                    Instrument::UpiCard => report.upi_total += txn.amount,
                }
                report.transactions.push(txn);
            }
            Ok(None) => report.unmatched += 1,
            Err(e) => {
                report.unparseable += 1;
                report.errors.push(e);
            }
        }
    }

    report
}
