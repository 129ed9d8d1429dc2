//! spendtrail-core: billing-window arithmetic, alert-template parsing, and
//! spend aggregation. Pure logic, no I/O.

pub mod error;
pub mod report;
pub mod template;
pub mod transaction;
pub mod window;

pub use error::{ConfigError, ParseError};
pub use report::{aggregate, SpendReport};
pub use template::{CreditCardTemplate, TemplateMatcher, TemplateSet, UpiTemplate};
pub use transaction::{Instrument, Transaction};
pub use window::{cycle_start, BillingDay, SearchFilter};
