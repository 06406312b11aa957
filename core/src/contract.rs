//! Identifiers that callers match literally.
//!
//! The two card ids are bound to specific cards by the fixed load order;
//! the address and MIME strings identify the catalog to external callers.

/// Id of the Black Market card.
pub const ID_BLACK_MARKET: i64 = 1;

/// Id of the Young Witch card.
pub const ID_YOUNG_WITCH: i64 = 161;

/// Expected name of the card stored at [`ID_BLACK_MARKET`].
pub const BLACK_MARKET_NAME: &str = "Black Market";

/// Expected name of the card stored at [`ID_YOUNG_WITCH`].
pub const YOUNG_WITCH_NAME: &str = "Young Witch";

/// Every `(id, name)` pair the catalog guarantees.
pub const IDENTITIES: [(i64, &str); 2] = [
    (ID_BLACK_MARKET, BLACK_MARKET_NAME),
    (ID_YOUNG_WITCH, YOUNG_WITCH_NAME),
];

/// Routing authority of the catalog.
pub const AUTHORITY: &str = "ca.marklauman.dominionpicker";

/// Symbolic address of the card table.
pub const CARDS_URI: &str = "content://ca.marklauman.dominionpicker/cards";

/// Content type of a card row.
pub const CARD_MIME: &str = "ca.marklauman.dominionpicker.card";

/// Name of the table holding all cards.
pub const TABLE_CARDS: &str = "cards";

/// Conventional file name of the store.
pub const DEFAULT_DB_FILE: &str = "cards.db";

/// Name of the singleton card loaded after every set.
pub const PRINCE: &str = "prince";
