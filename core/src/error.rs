//! Error types for record parsing.

use thiserror::Error;

/// Errors produced while parsing a textual card record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The record has more fields than there are data columns.
    #[error("record has {count} fields, at most {max} are allowed")]
    TooManyFields { count: usize, max: usize },
}
