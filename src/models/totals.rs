//! Income/expense totals
//!
//! The aggregation unit shared by the whole-ledger summary and the monthly
//! buckets.

use super::amount::Amount;
use super::operation::{Direction, Operation};

/// Sum of income and sum of expenses
///
/// `sum_out` accumulates negative amounts, so `sum_in + sum_out` is the net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub sum_in: Amount,
    pub sum_out: Amount,
}

impl Totals {
    pub fn new(sum_in: Amount, sum_out: Amount) -> Self {
        Self { sum_in, sum_out }
    }

    /// Add an operation to the side matching its direction
    pub fn record(&mut self, operation: &Operation) {
        match operation.direction() {
            Direction::In => self.sum_in += operation.amount(),
            Direction::Out => self.sum_out += operation.amount(),
        }
    }

    /// Income minus expenses
    pub fn net(&self) -> Amount {
        self.sum_in + self.sum_out
    }
}

impl<'a> FromIterator<&'a Operation> for Totals {
    fn from_iter<I: IntoIterator<Item = &'a Operation>>(iter: I) -> Self {
        let mut totals = Totals::default();
        for operation in iter {
            totals.record(operation);
        }
        totals
    }
}
