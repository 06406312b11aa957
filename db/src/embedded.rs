//! Card data compiled into the binary.
//!
//! The files under `resources/` are embedded with `include_str!`, so a
//! fresh store can always be built without touching the filesystem.

use dominion_catalog_core::{CardSet, PRINCE};

use crate::error::{ResourceError, Result};
use crate::resources::{
    CardResources, parse_version, single_record, single_resource_name, split_records,
};

const VERSION: &str = include_str!("../resources/version");

fn set_text(set: CardSet) -> &'static str {
    match set {
        CardSet::Promo => include_str!("../resources/cards_promo.txt"),
        CardSet::Base => include_str!("../resources/cards_base.txt"),
        CardSet::Alchemy => include_str!("../resources/cards_alchemy.txt"),
        CardSet::Intrigue => include_str!("../resources/cards_intrigue.txt"),
        CardSet::Prosperity => include_str!("../resources/cards_prosperity.txt"),
        CardSet::Seaside => include_str!("../resources/cards_seaside.txt"),
        CardSet::DarkAges => include_str!("../resources/cards_dark_ages.txt"),
        CardSet::Cornucopia => include_str!("../resources/cards_cornucopia.txt"),
        CardSet::Guilds => include_str!("../resources/cards_guilds.txt"),
        CardSet::Hinterlands => include_str!("../resources/cards_hinterlands.txt"),
    }
}

fn single_text(name: &str) -> Option<&'static str> {
    match name {
        PRINCE => Some(include_str!("../resources/card_prince.txt")),
        _ => None,
    }
}

/// The packaged card dataset.
///
/// # Examples
///
/// ```
/// use dominion_catalog_core::{CardSet, PRINCE};
/// use dominion_catalog_db::{CardResources, EmbeddedResources};
///
/// let resources = EmbeddedResources::new();
/// let promo = resources.card_set(CardSet::Promo).unwrap();
/// assert!(promo[0].starts_with("Black Market;"));
/// assert!(resources.single_card(PRINCE).unwrap().starts_with("Prince;"));
///
/// let bumped = EmbeddedResources::new().with_version(Some(99));
/// assert_eq!(bumped.version().unwrap(), 99);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedResources {
    version: Option<u32>,
}

impl EmbeddedResources {
    /// Creates the adapter with the packaged version declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the packaged version declaration.
    pub fn with_version(mut self, version: Option<u32>) -> Self {
        self.version = version;
        self
    }

    /// Returns the version declared by the packaged `version` file.
    pub fn packaged_version() -> Result<u32> {
        parse_version(VERSION)
    }
}

impl CardResources for EmbeddedResources {
    fn version(&self) -> Result<u32> {
        match self.version {
            Some(v) => parse_version(&v.to_string()),
            None => Self::packaged_version(),
        }
    }

    fn card_set(&self, set: CardSet) -> Result<Vec<String>> {
        Ok(split_records(set_text(set)))
    }

    fn single_card(&self, name: &str) -> Result<String> {
        single_text(name)
            .map(single_record)
            .ok_or_else(|| ResourceError::MissingResource(single_resource_name(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dominion_catalog_core::{Column, Record};

    #[test]
    fn test_packaged_version_is_valid() {
        assert!(EmbeddedResources::packaged_version().unwrap() >= 1);
    }

    #[test]
    fn test_every_packaged_record_parses() {
        let resources = EmbeddedResources::new();
        for set in CardSet::LOAD_ORDER {
            let records = resources.card_set(set).unwrap();
            assert!(!records.is_empty(), "{set} has no records");
            for raw in &records {
                let record = Record::parse(raw).unwrap();
                assert_eq!(record.len(), Column::DATA.len(), "short record: {raw}");
                assert_eq!(record.get(Column::Expansion), Some(set.expansion()));
            }
        }
    }

    #[test]
    fn test_unknown_singleton_is_missing() {
        let resources = EmbeddedResources::new();
        assert!(matches!(
            resources.single_card("duke"),
            Err(ResourceError::MissingResource(name)) if name == "card_duke"
        ));
    }

    #[test]
    fn test_young_witch_position() {
        let resources = EmbeddedResources::new();
        let before: usize = CardSet::LOAD_ORDER
            .iter()
            .take_while(|s| **s != CardSet::Cornucopia)
            .map(|s| resources.card_set(*s).unwrap().len())
            .sum();
        let cornucopia = resources.card_set(CardSet::Cornucopia).unwrap();
        let index = cornucopia
            .iter()
            .position(|r| r.starts_with("Young Witch;"))
            .unwrap();
        assert_eq!(before + index + 1, 161);
    }
}
