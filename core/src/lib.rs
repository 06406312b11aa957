//! Core types for the Dominion card catalog.
//!
//! This crate defines what every other layer agrees on:
//!
//! - [`Column`]: the declared columns of the `cards` table, in order.
//! - [`CardSet`]: the named expansion sets in their fixed load order.
//! - [`Card`]: a typed view of one stored row.
//! - [`Record`]: a parsed `;`-delimited card record.
//! - identity constants ([`ID_BLACK_MARKET`], [`ID_YOUNG_WITCH`]) and the
//!   address/MIME strings ([`CARDS_URI`], [`CARD_MIME`]).
//!
//! # Example
//!
//! ```
//! use dominion_catalog_core::*;
//!
//! let record = Record::parse("Black Market;Reveal the top card...;3;0;action;Promo").unwrap();
//! assert_eq!(record.name(), Some(BLACK_MARKET_NAME));
//! assert_eq!(record.get(Column::Expansion), Some(CardSet::Promo.expansion()));
//! assert_eq!(ID_BLACK_MARKET, 1);
//! ```

mod contract;
mod error;
mod record;
mod types;

pub use contract::*;
pub use error::RecordError;
pub use record::{FIELD_SEPARATOR, Record};
pub use types::*;
