//! Catalog configuration.
//!
//! Defines the YAML-serializable settings that say where the store lives
//! and where its card data comes from.
//!
//! # Example YAML
//!
//! ```yaml
//! database: /var/lib/dominion/cards.db
//! resources: /usr/share/dominion/cards
//! version: 8
//! ```
//!
//! Every key is optional. Without `resources` the packaged dataset is used;
//! `version` overrides whatever version the resources declare.

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use dominion_catalog_core::DEFAULT_DB_FILE;
use serde::{Deserialize, Serialize};

use crate::embedded::EmbeddedResources;
use crate::error::Result;
use crate::resources::{CardResources, DirResources};

/// Top-level catalog configuration.
///
/// # Examples
///
/// ```
/// use dominion_catalog_db::{CardResources, CatalogConfig};
///
/// let config: CatalogConfig = serde_yaml::from_str("version: 12").unwrap();
/// assert_eq!(config.database.to_str(), Some("cards.db"));
/// assert_eq!(config.resources().version().unwrap(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path of the store file.
    pub database: PathBuf,
    /// Directory overriding the packaged card data.
    pub resources: Option<PathBuf>,
    /// Version overriding the one the resources declare.
    pub version: Option<u32>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DB_FILE),
            resources: None,
            version: None,
        }
    }
}

impl CatalogConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ResourceError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::ResourceError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ResourceError::IoError) if the file cannot
    /// be written, or [`YamlError`](crate::ResourceError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Builds the resource adapter this configuration describes.
    pub fn resources(&self) -> Box<dyn CardResources> {
        match &self.resources {
            Some(dir) => Box::new(DirResources::new(dir).with_version(self.version)),
            None => Box::new(EmbeddedResources::new().with_version(self.version)),
        }
    }
}
