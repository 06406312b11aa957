//! Error types for catalog store operations.
//!
//! One error type for everything that can go wrong between the resource
//! adapter and a query result.

use dominion_catalog_core::RecordError;
use dominion_catalog_db::ResourceError;
use thiserror::Error;

/// Errors that can occur while building or querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// SQLite operation failure, including invalid query expressions.
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// The resource adapter could not supply its data.
    #[error("resource error: {0}")]
    ResourceError(#[from] ResourceError),

    /// A record could not be mapped onto the card columns.
    #[error("invalid record {index} in set '{set}': {source}")]
    RecordError {
        set: String,
        index: usize,
        #[source]
        source: RecordError,
    },

    /// A fixed card id does not hold the card callers expect.
    #[error("card {id} should be '{expected}', found {found:?}")]
    IdentityMismatch {
        id: i64,
        expected: &'static str,
        found: Option<String>,
    },

    /// Another caller panicked while holding the store handle.
    #[error("store handle poisoned by a panicked caller")]
    Poisoned,
}

/// Convenience alias for results with [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;
