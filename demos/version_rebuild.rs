//! Store versioning example.
//!
//! Builds a store file, then reopens it with a bumped data version to show
//! the destructive rebuild, and finally reopens it unchanged.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p dominion-catalog-demos --example version_rebuild
//! ```

use dominion_catalog_db::EmbeddedResources;
use dominion_catalog_sqlite::{Bootstrap, SchemaManager};

fn describe(outcome: &Bootstrap) -> String {
    match outcome {
        Bootstrap::Current { version } => format!("already at version {version}"),
        Bootstrap::Created { version, report } => {
            format!("created at version {version} ({} cards)", report.rows_inserted())
        }
        Bootstrap::Rebuilt { from, to, report } => format!(
            "rebuilt from version {from} to {to} ({} cards)",
            report.rows_inserted()
        ),
    }
}

fn main() {
    let path = std::env::temp_dir().join("dominion_catalog_version_example.db");
    let _ = std::fs::remove_file(&path);

    let packaged = EmbeddedResources::new();
    let bumped = EmbeddedResources::new()
        .with_version(Some(EmbeddedResources::packaged_version().unwrap() + 1));

    for (label, resources) in [
        ("first open", packaged),
        ("data update", bumped),
        ("reopen", bumped),
    ] {
        let mut manager = SchemaManager::open(&path).unwrap();
        let outcome = manager.ensure_current(&resources).unwrap();
        println!("{label}: {}", describe(&outcome));
    }

    let status = SchemaManager::open(&path).unwrap().status().unwrap();
    println!("\nStore at {}", path.display());
    println!("  Version: {}", status.stored_version);
    for (expansion, count) in &status.expansions {
        println!("  {expansion}: {count}");
    }

    let _ = std::fs::remove_file(&path);
}
