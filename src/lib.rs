//! Deben - personal expense ledger for the terminal
//!
//! Operations are dated, signed amounts with a label, stored one per line in
//! a plain text ledger. The library loads and edits that ledger and renders
//! totals, monthly listings and a month-by-month chart.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Amounts, dates, operations and totals
//! - `storage`: Ledger file storage layer
//! - `display`: Terminal rendering of totals, listings and charts
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use deben::models::SystemClock;
//! use deben::storage::Listing;
//!
//! let mut listing = Listing::load("ledger.txt", &SystemClock);
//! listing.add_operation(&["12.5", "Coffee"], &SystemClock);
//! listing.save()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod storage;

pub use error::{DebenError, DebenResult};
