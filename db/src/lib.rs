//! Card resources and configuration for the Dominion card catalog.
//!
//! This crate supplies the textual card records the catalog is built from.
//! Every source implements [`CardResources`]:
//!
//! - [`EmbeddedResources`]: the packaged dataset compiled into the binary.
//! - [`DirResources`]: the same file layout read from a directory.
//! - [`StaticResources`]: records supplied in memory.
//!
//! [`CatalogConfig`] picks the store path and the resource source from a
//! YAML file.
//!
//! # Quick start
//!
//! ```
//! use dominion_catalog_core::CardSet;
//! use dominion_catalog_db::{CardResources, EmbeddedResources};
//!
//! let resources = EmbeddedResources::new();
//! let base = resources.card_set(CardSet::Base).unwrap();
//! assert_eq!(base.len(), 25);
//! ```

mod config;
mod embedded;
mod error;
mod resources;

pub use config::CatalogConfig;
pub use embedded::EmbeddedResources;
pub use error::{ResourceError, Result};
pub use resources::{
    CardResources, DirResources, StaticResources, VERSION_FILE, parse_version, single_record,
    single_resource_name, split_records,
};
