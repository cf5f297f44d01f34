//! Core data models for Deben
//!
//! Amounts, calendar days, ledger operations and the totals they aggregate
//! into.

pub mod amount;
pub mod date;
pub mod operation;
pub mod totals;

pub use amount::{Amount, AmountParseError, MAX_CENTS};
pub use date::{Clock, FixedClock, SystemClock};
pub use operation::{Direction, Operation, DEFAULT_LABEL};
pub use totals::Totals;
