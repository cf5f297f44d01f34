//! Ledger file repository
//!
//! Loads a whole ledger file into memory, applies additions and removals, and
//! writes it back once at the end of the run if anything changed.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::DebenError;
use crate::models::date::month_key;
use crate::models::{Clock, Operation, Totals};

use super::file_io::{read_text, write_text_atomic};

/// Prefix of comment lines
pub const COMMENT_PREFIX: char = '#';

/// In-memory ledger backed by a text file
///
/// Operations are kept ordered by their ledger line, which is chronological
/// since lines start with a zero-padded date. Indices reported by
/// [`Listing::operations`] are therefore stable across runs.
#[derive(Debug)]
pub struct Listing {
    path: PathBuf,
    operations: Vec<Operation>,
    /// `#` lines, kept verbatim
    comments: Vec<String>,
    /// Lines that could not be read as operations, kept verbatim
    unreadable: Vec<String>,
    modified: bool,
}

impl Listing {
    /// Load the ledger at `path`
    ///
    /// A missing or unreadable file gives an empty listing; the file is created
    /// on the first save.
    pub fn load(path: impl Into<PathBuf>, clock: &dyn Clock) -> Self {
        let path = path.into();
        let text = read_text(&path).unwrap_or_else(|e| {
            warn!("{}, starting from an empty ledger", e);
            String::new()
        });
        Self::parse(path, &text, clock)
    }

    /// Build a listing from the contents of a ledger file
    pub fn parse(path: impl Into<PathBuf>, text: &str, clock: &dyn Clock) -> Self {
        let today = clock.today();
        let mut operations = Vec::new();
        let mut comments = Vec::new();
        let mut unreadable = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim_matches(|c: char| c == ' ' || c == '\t' || c == '\r');
            if line.is_empty() {
                continue;
            }
            if line.starts_with(COMMENT_PREFIX) {
                comments.push(line.to_string());
                continue;
            }
            match Operation::from_record(line, today) {
                Ok(operation) => operations.push(operation),
                Err(e) => {
                    warn!("Line {} kept as is: {}", index + 1, e);
                    unreadable.push(line.to_string());
                }
            }
        }

        operations.sort_by_cached_key(Operation::to_record);

        let listing = Self {
            path: path.into(),
            operations,
            comments,
            unreadable,
            modified: false,
        };
        debug!(
            "Loaded {} operations and {} comments from {}",
            listing.operations.len(),
            listing.comments.len(),
            listing.path.display()
        );
        listing
    }

    /// Path the listing was loaded from and is saved to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the listing changed since it was loaded or last saved
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn count(&self) -> usize {
        self.operations.len()
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Full file contents: comments first, then operations in line order
    pub fn to_text(&self) -> String {
        let mut lines: Vec<String> = self.operations.iter().map(Operation::to_record).collect();
        lines.sort();

        let mut content = String::new();
        for line in self.comments.iter().chain(&self.unreadable).chain(&lines) {
            content.push_str(line);
            content.push('\n');
        }
        content
    }

    /// Write the ledger back to its file if it was modified
    ///
    /// Returns whether the file was written.
    pub fn save(&mut self) -> Result<bool, DebenError> {
        if !self.modified {
            return Ok(false);
        }

        write_text_atomic(&self.path, &self.to_text())?;
        self.modified = false;
        info!(
            "Saved {} operations to {}",
            self.operations.len(),
            self.path.display()
        );
        Ok(true)
    }

    /// Add an operation built from command line tokens
    ///
    /// Nothing is added, and a warning is logged, when the tokens are empty or
    /// the amount cannot be read.
    pub fn add_operation<S: AsRef<str>>(
        &mut self,
        tokens: &[S],
        clock: &dyn Clock,
    ) -> Option<&Operation> {
        if tokens.is_empty() {
            warn!("No operation to add.");
            return None;
        }

        let operation = match Operation::from_tokens(tokens, clock.today()) {
            Ok(operation) => operation,
            Err(e) => {
                warn!("Operation not added: {}", e);
                return None;
            }
        };

        let record = operation.to_record();
        let position = self
            .operations
            .partition_point(|existing| existing.to_record() <= record);
        self.operations.insert(position, operation);
        self.modified = true;

        self.operations.get(position)
    }

    /// Remove the operation at `index`; a negative index removes the last one
    ///
    /// An index past the end is a no-op with a warning.
    pub fn remove_operation(&mut self, index: i64) -> Option<Operation> {
        let count = self.operations.len();
        let resolved = if index < 0 {
            count.checked_sub(1)
        } else {
            usize::try_from(index).ok().filter(|&i| i < count)
        };

        let Some(resolved) = resolved else {
            if index < 0 {
                warn!("No operation to delete, the ledger is empty.");
            } else {
                warn!("Operation {} doesn't exist.", index);
            }
            return None;
        };

        self.modified = true;
        Some(self.operations.remove(resolved))
    }

    /// The last `last` operations in ledger order, or all of them if `last <= 0`
    pub fn operations(&self, last: i64) -> &[Operation] {
        if last <= 0 {
            return &self.operations;
        }
        let keep = usize::try_from(last).unwrap_or(usize::MAX);
        let begin = self.operations.len().saturating_sub(keep);
        &self.operations[begin..]
    }

    /// Income and expenses over the whole ledger
    pub fn totals(&self) -> Totals {
        self.operations.iter().collect()
    }

    /// Per-month totals for the last `last` months, oldest first
    ///
    /// The sequence always ends at the current month and has one entry per
    /// month, including months without operations. Operations dated after the
    /// current month are left out. A non-positive `last` reaches back to
    /// month key 0.
    pub fn month_totals(&self, last: i64, clock: &dyn Clock) -> Vec<Totals> {
        let current = month_key(clock.today());
        let earliest = if last <= 0 {
            0
        } else {
            current.saturating_sub(last - 1).max(0)
        };

        let len = usize::try_from(current - earliest + 1).unwrap_or(0);
        let mut months = vec![Totals::default(); len];

        for operation in &self.operations {
            let key = month_key(operation.date());
            if key < earliest || key > current {
                continue;
            }
            if let Some(bucket) = usize::try_from(key - earliest)
                .ok()
                .and_then(|i| months.get_mut(i))
            {
                bucket.record(operation);
            }
        }

        months
    }
}
