//! Storage layer for Deben
//!
//! The ledger is a single text file. This module reads it into a [`Listing`]
//! and writes it back atomically.

pub mod file_io;
pub mod listing;

pub use file_io::{read_text, write_text_atomic};
pub use listing::Listing;
