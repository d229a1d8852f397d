//! Error types for clue-set loading, with error codes and helpful messages.
//!
//! Only the loader can fail. Normalization, annotation, and the answer
//! session are total: bad input degrades to defaults or a silent no-op, and
//! none of them surface an error type. Everything that *can* go wrong goes
//! wrong while turning a JSON document into a usable clue set, and lands in
//! [`ClueSetError`].
//!
//! # Error Codes
//!
//! Each variant has a unique code (C001-C004) for documentation lookup:
//!
//! - C001: `Json` (clue set is not valid JSON)
//! - C002: `NotAnArray` (top-level value is not an array)
//! - C003: `NoClues` (no usable clue records)
//! - C004: `ClueIndexOutOfRange` (requested clue index past the end)
//!
//! # Example
//!
//! ```
//! use cluedrill::clue_set::ClueSet;
//!
//! match ClueSet::parse_from_str("{\"not\": \"an array\"}") {
//!     Err(e) => {
//!         println!("Error: {e}");
//!         println!("Code: {}", e.code());
//!         if let Some(help) = e.help() {
//!             println!("Help: {help}");
//!         }
//!     }
//!     Ok(set) => println!("Loaded {} clues", set.clues.len()),
//! }
//! ```

use std::io;

/// Error type for everything that can fail while loading a clue set.
#[derive(Debug, thiserror::Error)]
pub enum ClueSetError {
    #[error("clue set is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of clue records (found {found})")]
    NotAnArray { found: String },

    #[error("clue set contains no usable clue records")]
    NoClues,

    #[error("clue index {requested} out of range (clue set has {len} clues)")]
    ClueIndexOutOfRange { requested: usize, len: usize },
}

impl From<ClueSetError> for io::Error {
    fn from(e: ClueSetError) -> Self {
        // String version is the least fragile (no Send/Sync bounds issues)
        io::Error::new(io::ErrorKind::InvalidData, e.to_string())
    }
}

impl ClueSetError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ClueSetError::Json(_) => "C001",
            ClueSetError::NotAnArray { .. } => "C002",
            ClueSetError::NoClues => "C003",
            ClueSetError::ClueIndexOutOfRange { .. } => "C004",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ClueSetError::Json(_) => "Clue set is not valid JSON",
            ClueSetError::NotAnArray { .. } => "Top-level JSON value is not an array",
            ClueSetError::NoClues => "Clue set contains no usable clue records",
            ClueSetError::ClueIndexOutOfRange { .. } => "Requested clue index is past the end of the set",
        }
    }

    /// Returns a detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            ClueSetError::Json(_) => "The input could not be parsed as JSON at all. This usually means a truncated download or a file that is not the clue-set export.",
            ClueSetError::NotAnArray { .. } => "The clue set must be a JSON array with one object per clue. Objects, strings, and numbers at the top level are rejected.",
            ClueSetError::NoClues => "The array parsed, but every record was skipped (not a JSON object) or the array was empty, so there is nothing to play.",
            ClueSetError::ClueIndexOutOfRange { .. } => "Clue indices are zero-based and must be smaller than the number of clues in the set.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ClueSetError::NotAnArray { .. } => {
                Some("Wrap the records in an array: [{\"answer\": \"...\", \"clue\": \"...\"}, ...]")
            }
            ClueSetError::NoClues => {
                Some("Each record must be a JSON object with at least \"answer\" and \"clue\" fields")
            }
            ClueSetError::ClueIndexOutOfRange { .. } => {
                Some("Use --list to see the available clue indices")
            }
            ClueSetError::Json(_) => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
