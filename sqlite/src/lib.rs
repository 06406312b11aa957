//! SQLite store for the Dominion card catalog.
//!
//! This crate builds the `cards` table from a
//! [`CardResources`](dominion_catalog_db::CardResources) adapter, keeps it
//! at the version the adapter declares, and serves it through a read-only
//! query surface.
//!
//! # Architecture
//!
//! The crate is organized into four modules:
//!
//! - **`schema`**: SQL generation from the declared column list
//! - **`loader`**: record parsing, per-set batched inserts, identity check
//! - **`manager`**: versioned create/drop/rebuild lifecycle and status
//! - **`query`**: the read-only [`CardProvider`] and its [`Cursor`]
//!
//! # Quick start: building the store
//!
//! ```no_run
//! use dominion_catalog_db::EmbeddedResources;
//! use dominion_catalog_sqlite::SchemaManager;
//!
//! let mut manager = SchemaManager::open("cards.db").unwrap();
//! manager.ensure_current(&EmbeddedResources::new()).unwrap();
//!
//! let status = manager.status().unwrap();
//! println!("Cards: {}", status.card_count);
//! ```
//!
//! # Quick start: queries
//!
//! ```no_run
//! use dominion_catalog_db::EmbeddedResources;
//! use dominion_catalog_sqlite::CardProvider;
//!
//! let provider = CardProvider::new("cards.db", EmbeddedResources::new());
//! if let Some(card) = provider.card(1).unwrap() {
//!     println!("{} costs {}", card.name.unwrap_or_default(), card.cost.unwrap_or_default());
//! }
//! ```
//!
//! # Versioning
//!
//! The version the table was built at is kept in the store's
//! `user_version` header. When it differs from the declared version in
//! either direction, the table is dropped and rebuilt on the next open.

mod error;
mod loader;
mod manager;
mod query;
mod schema;

pub use error::{CatalogError, Result};
pub use loader::{LoadReport, SetReport, add_cards, load_all, verify_identities};
pub use manager::{Bootstrap, SchemaManager, StoreStatus, store_status};
pub use query::{CardProvider, Cursor, CursorRow};
pub use schema::DEFAULT_SORT_ORDER;
