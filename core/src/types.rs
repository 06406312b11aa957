//! Card catalog type definitions.
//!
//! This module defines the data model shared by every layer of the catalog:
//! the declared [`Column`] set of the `cards` table, the named expansion
//! [`CardSet`]s in their fixed load order, and the typed [`Card`] read model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A declared column of the `cards` table.
///
/// The declaration order matters: the i-th field of a textual record maps
/// to the (i+1)-th column, skipping the auto-assigned [`Column::Id`].
///
/// # Examples
///
/// ```
/// use dominion_catalog_core::Column;
///
/// assert_eq!(Column::ALL[0], Column::Id);
/// assert_eq!(Column::DATA[0], Column::Name);
/// assert_eq!(Column::Action.name(), "action");
/// assert_eq!(Column::from_name("curser"), Some(Column::Curser));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    /// Auto-assigned primary key.
    Id,
    /// Display name.
    Name,
    /// Rules text.
    Description,
    /// Coin cost, kept as text so tokens like `*` survive.
    Cost,
    /// Number of potions needed to buy.
    Potion,
    /// Comma-joined role tags (action, reaction, victory, ...).
    Category,
    /// Name of the source expansion.
    Expansion,
    /// "+N buys" contribution.
    Buy,
    /// "+N actions" contribution.
    Action,
    /// "+N cards" contribution.
    Draw,
    /// "+N coin" contribution.
    Gold,
    /// Victory points, possibly symbolic.
    Victory,
    /// Marks cards that hand out curses.
    Curser,
}

impl Column {
    /// Every declared column, in table order.
    pub const ALL: [Column; 13] = [
        Column::Id,
        Column::Name,
        Column::Description,
        Column::Cost,
        Column::Potion,
        Column::Category,
        Column::Expansion,
        Column::Buy,
        Column::Action,
        Column::Draw,
        Column::Gold,
        Column::Victory,
        Column::Curser,
    ];

    /// Columns fed by a textual record, in field order.
    pub const DATA: [Column; 12] = [
        Column::Name,
        Column::Description,
        Column::Cost,
        Column::Potion,
        Column::Category,
        Column::Expansion,
        Column::Buy,
        Column::Action,
        Column::Draw,
        Column::Gold,
        Column::Victory,
        Column::Curser,
    ];

    /// Returns the SQL column name.
    pub fn name(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Name => "name",
            Column::Description => "description",
            Column::Cost => "cost",
            Column::Potion => "potion",
            Column::Category => "category",
            Column::Expansion => "expansion",
            Column::Buy => "buy",
            Column::Action => "action",
            Column::Draw => "draw",
            Column::Gold => "gold",
            Column::Victory => "victory",
            Column::Curser => "curser",
        }
    }

    /// Returns the column definition used in `CREATE TABLE`.
    pub fn sql_type(self) -> &'static str {
        match self {
            Column::Id => "INTEGER PRIMARY KEY AUTOINCREMENT",
            Column::Potion => "INTEGER",
            _ => "TEXT",
        }
    }

    /// Looks up a column by its SQL name.
    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named group of cards released together.
///
/// [`CardSet::LOAD_ORDER`] is fixed: card ids are assigned in the order
/// records are inserted, so reordering sets shifts every id after the
/// change.
///
/// # Examples
///
/// ```
/// use dominion_catalog_core::CardSet;
///
/// assert_eq!(CardSet::LOAD_ORDER[0], CardSet::Promo);
/// assert_eq!(CardSet::DarkAges.name(), "dark_ages");
/// assert_eq!(CardSet::DarkAges.resource_name(), "cards_dark_ages");
/// assert_eq!(CardSet::DarkAges.expansion(), "Dark Ages");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSet {
    Promo,
    Base,
    Alchemy,
    Intrigue,
    Prosperity,
    Seaside,
    DarkAges,
    Cornucopia,
    Guilds,
    Hinterlands,
}

impl CardSet {
    /// Order in which sets are loaded into a fresh store.
    pub const LOAD_ORDER: [CardSet; 10] = [
        CardSet::Promo,
        CardSet::Base,
        CardSet::Alchemy,
        CardSet::Intrigue,
        CardSet::Prosperity,
        CardSet::Seaside,
        CardSet::DarkAges,
        CardSet::Cornucopia,
        CardSet::Guilds,
        CardSet::Hinterlands,
    ];

    /// Short set name used by resource adapters.
    pub fn name(self) -> &'static str {
        match self {
            CardSet::Promo => "promo",
            CardSet::Base => "base",
            CardSet::Alchemy => "alchemy",
            CardSet::Intrigue => "intrigue",
            CardSet::Prosperity => "prosperity",
            CardSet::Seaside => "seaside",
            CardSet::DarkAges => "dark_ages",
            CardSet::Cornucopia => "cornucopia",
            CardSet::Guilds => "guilds",
            CardSet::Hinterlands => "hinterlands",
        }
    }

    /// Name of the packaged resource holding this set's records.
    pub fn resource_name(self) -> &'static str {
        match self {
            CardSet::Promo => "cards_promo",
            CardSet::Base => "cards_base",
            CardSet::Alchemy => "cards_alchemy",
            CardSet::Intrigue => "cards_intrigue",
            CardSet::Prosperity => "cards_prosperity",
            CardSet::Seaside => "cards_seaside",
            CardSet::DarkAges => "cards_dark_ages",
            CardSet::Cornucopia => "cards_cornucopia",
            CardSet::Guilds => "cards_guilds",
            CardSet::Hinterlands => "cards_hinterlands",
        }
    }

    /// Expansion name as written in the `expansion` column.
    pub fn expansion(self) -> &'static str {
        match self {
            CardSet::Promo => "Promo",
            CardSet::Base => "Base",
            CardSet::Alchemy => "Alchemy",
            CardSet::Intrigue => "Intrigue",
            CardSet::Prosperity => "Prosperity",
            CardSet::Seaside => "Seaside",
            CardSet::DarkAges => "Dark Ages",
            CardSet::Cornucopia => "Cornucopia",
            CardSet::Guilds => "Guilds",
            CardSet::Hinterlands => "Hinterlands",
        }
    }

    /// Looks up a set by its short name.
    pub fn from_name(name: &str) -> Option<CardSet> {
        CardSet::LOAD_ORDER.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the `cards` table.
///
/// Text columns are `None` when the source record stopped before that
/// field. A row loaded from the empty record has every field unset except
/// `id`.
///
/// # Examples
///
/// ```
/// use dominion_catalog_core::Card;
///
/// let mut card = Card::new(1);
/// card.name = Some("Witch".into());
/// card.category = Some("action, attack".into());
/// card.curser = Some("1".into());
///
/// assert_eq!(card.categories(), vec!["action", "attack"]);
/// assert!(card.is_curser());
/// assert!(!card.costs_potion());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub cost: Option<String>,
    pub potion: Option<i64>,
    pub category: Option<String>,
    pub expansion: Option<String>,
    pub buy: Option<String>,
    pub action: Option<String>,
    pub draw: Option<String>,
    pub gold: Option<String>,
    pub victory: Option<String>,
    pub curser: Option<String>,
}

impl Card {
    /// Creates a card with only its id set.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Returns the role tags from the comma-joined `category` column.
    pub fn categories(&self) -> Vec<&str> {
        self.category
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns `true` if the card hands out curses.
    pub fn is_curser(&self) -> bool {
        matches!(self.curser.as_deref().map(str::trim), Some(v) if !v.is_empty() && v != "0")
    }

    /// Returns `true` if buying the card needs at least one potion.
    pub fn costs_potion(&self) -> bool {
        self.potion.unwrap_or(0) > 0
    }

    /// Returns the text value of a column, or `None` for `id`, `potion`,
    /// and unset fields.
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::Id | Column::Potion => None,
            Column::Name => self.name.as_deref(),
            Column::Description => self.description.as_deref(),
            Column::Cost => self.cost.as_deref(),
            Column::Category => self.category.as_deref(),
            Column::Expansion => self.expansion.as_deref(),
            Column::Buy => self.buy.as_deref(),
            Column::Action => self.action.as_deref(),
            Column::Draw => self.draw.as_deref(),
            Column::Gold => self.gold.as_deref(),
            Column::Victory => self.victory.as_deref(),
            Column::Curser => self.curser.as_deref(),
        }
    }
}

/// Parses a stored potion value.
///
/// Blank or non-numeric text reads as 0.
pub fn parse_potion(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}
