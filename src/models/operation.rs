//! Ledger operation model
//!
//! One dated money movement. The direction of an operation is never stored:
//! it is read off the sign of its amount.

use chrono::NaiveDate;
use std::fmt;

use super::amount::Amount;
use super::date::{self, RECORD_FORMAT};
use crate::error::{DebenError, DebenResult};

/// Label used when an operation is given no description
pub const DEFAULT_LABEL: &str = "Unknown";

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    /// Direction implied by an amount: only strictly positive amounts are income
    pub fn of(amount: Amount) -> Self {
        if amount.is_positive() {
            Self::In
        } else {
            Self::Out
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => write!(f, "In"),
            Self::Out => write!(f, "Out"),
        }
    }
}

/// A single ledger entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    date: NaiveDate,
    amount: Amount,
    label: String,
}

impl Operation {
    /// Create an operation from its fields
    ///
    /// Tabs in the label are replaced by spaces since they separate record
    /// fields; an empty label becomes [`DEFAULT_LABEL`].
    pub fn new(amount: Amount, label: impl Into<String>, date: NaiveDate) -> Self {
        let label = label.into().replace('\t', " ");
        let label = label.trim();
        let label = if label.is_empty() {
            DEFAULT_LABEL.to_string()
        } else {
            label.to_string()
        };

        Self {
            date,
            amount,
            label,
        }
    }

    /// Parse a tab-separated ledger record: `date<TAB>amount<TAB>label...`
    ///
    /// Empty fields are ignored. The date must be a full `YYYY/MM/DD` date,
    /// unreadable parts of it default to `today`.
    pub fn from_record(record: &str, today: NaiveDate) -> DebenResult<Self> {
        let fields: Vec<&str> = record.split('\t').filter(|f| !f.is_empty()).collect();
        if fields.len() < 2 {
            return Err(DebenError::Validation(format!(
                "expected a date and an amount in '{}'",
                record
            )));
        }

        let date = date::parse_full(fields[0], today);
        let amount = Amount::parse(fields[1])?;
        let label = join_label(&fields[2..]);

        Ok(Self::new(amount, label, date))
    }

    /// Build an operation from command line tokens: `amount [label...] [DD[/MM[/YYYY]]]`
    ///
    /// The last token is read as a date only when at least two tokens follow
    /// the amount, so that a lone numeric label is kept as a label.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], today: NaiveDate) -> DebenResult<Self> {
        let Some((amount_token, rest)) = tokens.split_first() else {
            return Err(DebenError::Validation("No operation to add".into()));
        };

        let amount = Amount::parse(amount_token.as_ref())?;

        let (label_tokens, date) = match rest.split_last() {
            Some((last, label_tokens))
                if rest.len() >= 2 && date::is_date_token(last.as_ref().trim()) =>
            {
                (label_tokens, date::parse_partial(last.as_ref(), today))
            }
            _ => (rest, today),
        };

        let label_tokens: Vec<&str> = label_tokens.iter().map(|t| t.as_ref()).collect();
        Ok(Self::new(amount, join_label(&label_tokens), date))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn direction(&self) -> Direction {
        Direction::of(self.amount)
    }

    /// Canonical ledger line, without the trailing newline
    pub fn to_record(&self) -> String {
        let sign = match self.direction() {
            Direction::In => "+",
            Direction::Out => "-",
        };
        format!(
            "{}\t{}{}\t{}",
            self.date.format(RECORD_FORMAT),
            sign,
            self.amount.abs().format(false),
            self.label
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_record())
    }
}

fn join_label(tokens: &[&str]) -> String {
    tokens
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
