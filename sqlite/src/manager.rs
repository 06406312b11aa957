//! Versioned lifecycle of the card store.
//!
//! [`SchemaManager`] owns the store connection and decides, on open,
//! whether the cards table can be used as is or has to be rebuilt from the
//! resource adapter. The version the table was built at lives in SQLite's
//! `user_version` header field; 0 means "never built".
//!
//! Any difference between the recorded and the declared version, upgrade
//! or downgrade, drops the table and reloads it. The data is derived, so
//! nothing is lost by rebuilding.
//!
//! # Example
//!
//! ```no_run
//! use dominion_catalog_db::EmbeddedResources;
//! use dominion_catalog_sqlite::SchemaManager;
//!
//! let mut manager = SchemaManager::open("cards.db").unwrap();
//! let outcome = manager.ensure_current(&EmbeddedResources::new()).unwrap();
//! println!("{outcome:?}");
//!
//! let status = manager.status().unwrap();
//! println!("{} cards at version {}", status.card_count, status.stored_version);
//! ```

use std::path::Path;

use dominion_catalog_core::TABLE_CARDS;
use dominion_catalog_db::CardResources;
use rusqlite::Connection;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::loader::{LoadReport, load_all, verify_identities};
use crate::schema::{generate_drop_sql, generate_schema_sql};

/// What [`SchemaManager::ensure_current`] had to do.
#[derive(Debug, Clone)]
pub enum Bootstrap {
    /// The table was already built at the declared version.
    Current { version: u32 },
    /// The store had never been built, or its table was missing.
    Created { version: u32, report: LoadReport },
    /// The table was built at another version and has been rebuilt.
    Rebuilt {
        from: u32,
        to: u32,
        report: LoadReport,
    },
}

/// Snapshot of the store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStatus {
    /// Whether the cards table exists.
    pub table_exists: bool,
    /// Version recorded by the last successful build, 0 if none.
    pub stored_version: u32,
    /// Number of rows in the cards table.
    pub card_count: usize,
    /// Row count per expansion, sorted by expansion name.
    pub expansions: Vec<(String, usize)>,
}

/// Reads the version recorded by the last successful build.
pub fn stored_version(conn: &Connection) -> Result<u32> {
    let version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(u32::try_from(version).unwrap_or(0))
}

/// Checks whether the cards table exists.
pub fn table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1")?;
    let count: i64 = stmt.query_row([TABLE_CARDS], |row| row.get(0))?;
    Ok(count > 0)
}

/// Collects a [`StoreStatus`] from any connection to the store.
pub fn store_status(conn: &Connection) -> Result<StoreStatus> {
    let stored_version = stored_version(conn)?;
    if !table_exists(conn)? {
        return Ok(StoreStatus {
            stored_version,
            ..StoreStatus::default()
        });
    }

    let card_count: i64 =
        conn.query_row(&format!("SELECT COUNT(*) FROM {TABLE_CARDS}"), [], |row| {
            row.get(0)
        })?;

    let mut stmt = conn.prepare(&format!(
        "SELECT COALESCE(expansion, ''), COUNT(*) FROM {TABLE_CARDS} GROUP BY 1 ORDER BY 1"
    ))?;
    let expansions = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(StoreStatus {
        table_exists: true,
        stored_version,
        card_count: card_count as usize,
        expansions,
    })
}

/// Owns the store connection and its create/drop/rebuild lifecycle.
///
/// Creating or rebuilding the table records the declared version only
/// after the load and the identity check succeed. A failure part way
/// through leaves an empty table and the recorded version at 0, so the
/// next open starts over.
pub struct SchemaManager {
    conn: Connection,
}

impl SchemaManager {
    /// Wraps an open connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens (creating if needed) the store file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Connection::open(path)?))
    }

    /// Opens a store that lives only as long as the manager.
    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(Connection::open_in_memory()?))
    }

    /// Returns the version recorded by the last successful build.
    pub fn stored_version(&self) -> Result<u32> {
        stored_version(&self.conn)
    }

    /// Checks whether the cards table exists.
    pub fn table_exists(&self) -> Result<bool> {
        table_exists(&self.conn)
    }

    /// Returns a snapshot of the store.
    pub fn status(&self) -> Result<StoreStatus> {
        store_status(&self.conn)
    }

    /// Creates the cards table.
    ///
    /// Fails if the table already exists.
    pub fn create(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(&generate_schema_sql())?;
        tx.commit()?;
        Ok(())
    }

    /// Drops the cards table if present and clears the recorded version.
    pub fn drop_table(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(&generate_drop_sql())?;
        tx.pragma_update(None, "user_version", 0)?;
        tx.commit()?;
        Ok(())
    }

    /// Drops, recreates, and reloads the table regardless of versions.
    ///
    /// Records the declared version once the load is verified. If the load
    /// or the identity check fails, the table is left dropped and recreated
    /// empty, and the error is returned.
    pub fn rebuild(&mut self, resources: &dyn CardResources) -> Result<LoadReport> {
        let version = resources.version()?;
        self.reset_table()?;

        let loaded = load_all(&self.conn, resources)
            .and_then(|report| verify_identities(&self.conn).map(|()| report));
        match loaded {
            Ok(report) => {
                self.conn.pragma_update(None, "user_version", version)?;
                Ok(report)
            }
            Err(err) => {
                warn!(error = %err, "Card load failed, leaving the table empty");
                if let Err(reset) = self.reset_table() {
                    warn!(error = %reset, "Could not empty the card table");
                }
                Err(err)
            }
        }
    }

    fn reset_table(&mut self) -> Result<()> {
        self.drop_table()?;
        self.create()
    }

    /// Brings the store to the version the resources declare.
    ///
    /// Leaves the table alone when the recorded version matches. A store
    /// that was never built, or whose table is missing, is built fresh; any
    /// other version difference rebuilds it.
    pub fn ensure_current(&mut self, resources: &dyn CardResources) -> Result<Bootstrap> {
        let declared = resources.version()?;
        let stored = self.stored_version()?;

        let exists = self.table_exists()?;
        if stored == declared && exists {
            return Ok(Bootstrap::Current { version: declared });
        }

        if stored == 0 || !exists {
            info!(version = declared, recorded = stored, "Building card store");
            let report = self.rebuild(resources)?;
            return Ok(Bootstrap::Created {
                version: declared,
                report,
            });
        }

        warn!(
            from = stored,
            to = declared,
            "Card store version changed, rebuilding"
        );
        let report = self.rebuild(resources)?;
        Ok(Bootstrap::Rebuilt {
            from: stored,
            to: declared,
            report,
        })
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consumes the manager and returns the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }
}
