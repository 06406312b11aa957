//! Query workflow example.
//!
//! Builds an in-memory catalog from the packaged card data and runs the
//! queries a card picker typically needs.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p dominion-catalog-demos --example query_catalog
//! ```

use dominion_catalog_core::{CARDS_URI, ID_YOUNG_WITCH};
use dominion_catalog_db::EmbeddedResources;
use dominion_catalog_sqlite::CardProvider;

fn main() {
    let provider = CardProvider::in_memory(EmbeddedResources::new());

    // === Step 1: First query builds the store ===
    println!("=== Catalog ===");
    println!("Cards: {}", provider.count().unwrap());
    println!("Content type: {}", provider.get_type(CARDS_URI));

    // === Step 2: Filter one expansion ===
    println!("\n=== Alchemy ===");
    let cursor = provider
        .query(
            Some(&["name", "cost", "potion"]),
            Some("expansion = ?"),
            Some(&["Alchemy"]),
            Some("name"),
        )
        .unwrap();
    for row in cursor {
        println!(
            "  {} ({} coins, {} potion)",
            row.get_str("name").unwrap_or_default(),
            row.get_str("cost").unwrap_or_default(),
            row.get_i64("potion").unwrap_or(0)
        );
    }

    // === Step 3: Cards that hand out curses ===
    println!("\n=== Cursers ===");
    let cursers = provider
        .query(None, Some("curser != ?"), Some(&["0"]), None)
        .unwrap()
        .into_cards();
    for card in &cursers {
        println!(
            "  {} [{}]",
            card.name.as_deref().unwrap_or_default(),
            card.expansion.as_deref().unwrap_or_default()
        );
    }

    // === Step 4: Fixed ids ===
    println!("\n=== Young Witch ===");
    if let Some(card) = provider.card(ID_YOUNG_WITCH).unwrap() {
        println!("{}", serde_json::to_string_pretty(&card).unwrap());
    }

    // === Step 5: Mutations are refused ===
    println!("\n=== Mutations ===");
    println!(
        "insert -> {:?}",
        provider.insert(CARDS_URI, &[("name", "Homebrew")])
    );
    println!("delete -> {}", provider.delete(CARDS_URI, None, None));
    println!("Cards: {}", provider.count().unwrap());
}
