//! Card resource adapters.
//!
//! A [`CardResources`] implementation is the only way card data enters the
//! catalog. It declares a schema version and hands out the textual records
//! of each [`CardSet`] plus named singleton cards.
//!
//! # Resource layout
//!
//! File-backed adapters share one layout:
//!
//! - `version`: the declared schema version, a positive integer
//! - `cards_<set>.txt`: one record per line, in load order
//! - `card_<name>.txt`: a single record
//!
//! ```no_run
//! use dominion_catalog_core::CardSet;
//! use dominion_catalog_db::{CardResources, DirResources};
//!
//! let resources = DirResources::new("resources/");
//! println!("version {}", resources.version().unwrap());
//! for record in resources.card_set(CardSet::Base).unwrap() {
//!     println!("{record}");
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dominion_catalog_core::CardSet;
use tracing::debug;

use crate::error::{ResourceError, Result};

/// File name holding the declared version.
pub const VERSION_FILE: &str = "version";

/// Source of textual card records.
///
/// Implementations must return records in a stable order: ids are
/// assigned in insertion order, so the order is part of the catalog's
/// contract.
pub trait CardResources: Send + Sync {
    /// Returns the declared schema version.
    fn version(&self) -> Result<u32>;

    /// Returns the ordered records of one expansion set.
    fn card_set(&self, set: CardSet) -> Result<Vec<String>>;

    /// Returns the single record of a named singleton card.
    fn single_card(&self, name: &str) -> Result<String>;
}

impl<T: CardResources + ?Sized> CardResources for Box<T> {
    fn version(&self) -> Result<u32> {
        (**self).version()
    }

    fn card_set(&self, set: CardSet) -> Result<Vec<String>> {
        (**self).card_set(set)
    }

    fn single_card(&self, name: &str) -> Result<String> {
        (**self).single_card(name)
    }
}

impl<T: CardResources + ?Sized> CardResources for Arc<T> {
    fn version(&self) -> Result<u32> {
        (**self).version()
    }

    fn card_set(&self, set: CardSet) -> Result<Vec<String>> {
        (**self).card_set(set)
    }

    fn single_card(&self, name: &str) -> Result<String> {
        (**self).single_card(name)
    }
}

/// Returns the resource file name of a singleton card.
pub fn single_resource_name(name: &str) -> String {
    format!("card_{name}")
}

/// Parses a version declaration.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidVersion`] unless the trimmed text is an
/// integer of at least 1.
pub fn parse_version(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    match trimmed.parse::<u32>() {
        Ok(v) if v >= 1 => Ok(v),
        _ => Err(ResourceError::InvalidVersion(trimmed.to_string())),
    }
}

/// Splits a set resource into records, one per line.
///
/// A trailing line break does not produce an extra record; blank lines
/// inside the text are kept as empty records.
pub fn split_records(text: &str) -> Vec<String> {
    text.lines().map(String::from).collect()
}

/// Extracts a singleton record, dropping the trailing line break.
pub fn single_record(text: &str) -> String {
    text.trim_end_matches(['\r', '\n']).to_string()
}

/// Reads card resources from a directory at call time.
///
/// Useful for shipping a data update without rebuilding the binary.
#[derive(Debug, Clone)]
pub struct DirResources {
    root: PathBuf,
    version: Option<u32>,
}

impl DirResources {
    /// Creates an adapter over the given directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            version: None,
        }
    }

    /// Overrides the version declared by the `version` file.
    pub fn with_version(mut self, version: Option<u32>) -> Self {
        self.version = version;
        self
    }

    /// Returns the directory this adapter reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, file: &str) -> Result<String> {
        let path = self.root.join(file);
        debug!(path = %path.display(), "Reading card resource");
        std::fs::read_to_string(&path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => {
                ResourceError::MissingResource(path.display().to_string())
            }
            _ => ResourceError::IoError(err),
        })
    }
}

impl CardResources for DirResources {
    fn version(&self) -> Result<u32> {
        match self.version {
            Some(v) => parse_version(&v.to_string()),
            None => parse_version(&self.read(VERSION_FILE)?),
        }
    }

    fn card_set(&self, set: CardSet) -> Result<Vec<String>> {
        let text = self.read(&format!("{}.txt", set.resource_name()))?;
        Ok(split_records(&text))
    }

    fn single_card(&self, name: &str) -> Result<String> {
        let text = self.read(&format!("{}.txt", single_resource_name(name)))?;
        Ok(single_record(&text))
    }
}

/// In-memory card resources.
///
/// Sets that were never supplied are empty; singletons that were never
/// supplied are missing.
///
/// # Examples
///
/// ```
/// use dominion_catalog_core::CardSet;
/// use dominion_catalog_db::{CardResources, StaticResources};
///
/// let resources = StaticResources::new(3)
///     .with_set(CardSet::Promo, ["Black Market;...;3"])
///     .with_single("prince", "Prince;...;8");
///
/// assert_eq!(resources.version().unwrap(), 3);
/// assert_eq!(resources.card_set(CardSet::Promo).unwrap().len(), 1);
/// assert!(resources.card_set(CardSet::Base).unwrap().is_empty());
/// assert!(resources.single_card("duke").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticResources {
    version: u32,
    sets: HashMap<CardSet, Vec<String>>,
    singles: HashMap<String, String>,
}

impl StaticResources {
    /// Creates an empty adapter declaring `version`.
    pub fn new(version: u32) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    /// Sets the records of one expansion set.
    pub fn with_set<I, S>(mut self, set: CardSet, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sets
            .insert(set, records.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the record of a singleton card.
    pub fn with_single(mut self, name: &str, record: impl Into<String>) -> Self {
        self.singles.insert(name.to_string(), record.into());
        self
    }

    /// Changes the declared version.
    pub fn set_version(&mut self, version: u32) {
        self.version = version;
    }
}

impl CardResources for StaticResources {
    fn version(&self) -> Result<u32> {
        parse_version(&self.version.to_string())
    }

    fn card_set(&self, set: CardSet) -> Result<Vec<String>> {
        Ok(self.sets.get(&set).cloned().unwrap_or_default())
    }

    fn single_card(&self, name: &str) -> Result<String> {
        self.singles
            .get(name)
            .cloned()
            .ok_or_else(|| ResourceError::MissingResource(single_resource_name(name)))
    }
}
