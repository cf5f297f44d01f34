//! Calendar days and the clock they default to
//!
//! Ledger dates are plain calendar days. Anything that needs "today" takes a
//! [`Clock`] so that tests can pin the current date.

use chrono::{Datelike, Local, NaiveDate};
use tracing::{error, warn};

/// Format used for ledger records
pub const RECORD_FORMAT: &str = "%Y/%m/%d";

/// Source of the current calendar date
pub trait Clock {
    /// Returns the current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the local system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock that always returns the same day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Comparable month index, `year * 12 + month`
pub fn month_key(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month())
}

/// Parse a full `YYYY/MM/DD` date
///
/// Missing or unreadable fields fall back to the matching field of `today`.
pub fn parse_full(text: &str, today: NaiveDate) -> NaiveDate {
    let tokens = split_tokens(text);
    if tokens.len() < 3 {
        error!("Unable to fill full date from '{}', expected YYYY/MM/DD", text);
        return today;
    }

    let year = field(tokens[0], "year", today.year());
    let month = field(tokens[1], "month", today.month());
    let day = field(tokens[2], "day", today.day());
    compose(year, month, day, today)
}

/// Parse a partial `DD[/MM[/YYYY]]` date layered on top of `today`
pub fn parse_partial(text: &str, today: NaiveDate) -> NaiveDate {
    let tokens = split_tokens(text);

    let day = tokens
        .first()
        .map_or(today.day(), |t| field(t, "day", today.day()));
    let month = tokens
        .get(1)
        .map_or(today.month(), |t| field(t, "month", today.month()));
    let year = tokens
        .get(2)
        .map_or(today.year(), |t| field(t, "year", today.year()));
    compose(year, month, day, today)
}

/// True when `token` only holds digits and `/`, i.e. looks like a partial date
pub fn is_date_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit() || c == '/')
}

fn split_tokens(text: &str) -> Vec<&str> {
    text.split('/')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

fn field<T: std::str::FromStr + Copy>(token: &str, name: &str, fallback: T) -> T {
    match token.parse() {
        Ok(value) => value,
        Err(_) => {
            warn!("Invalid {} '{}' in date, using today's", name, token);
            fallback
        }
    }
}

fn compose(year: i32, month: u32, day: u32, today: NaiveDate) -> NaiveDate {
    let month = if (1..=12).contains(&month) {
        month
    } else {
        warn!("Month {} is out of range, using today's", month);
        today.month()
    };

    let Some(last_day) = last_day_of_month(year, month) else {
        warn!("Year {} is out of range, using today's", year);
        return compose(today.year(), month, day, today);
    };

    let clamped = day.clamp(1, last_day);
    if clamped != day {
        warn!("Day {} does not exist in {}/{}, using {}", day, month, year, clamped);
    }

    NaiveDate::from_ymd_opt(year, month, clamped).unwrap_or(today)
}

fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    first_of_next.pred_opt().map(|d| d.day())
}
