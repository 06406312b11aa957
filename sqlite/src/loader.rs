//! Parse-and-load pipeline from textual records into the cards table.
//!
//! [`load_all`] pulls every set from a [`CardResources`] adapter in the
//! fixed [`CardSet::LOAD_ORDER`], followed by the Prince singleton. Each set
//! is inserted by [`add_cards`] inside its own transaction, so a reader on
//! another connection sees a set entirely or not at all.
//!
//! Ids are assigned in insertion order. [`verify_identities`] confirms the
//! fixed ids still land on the cards callers expect.

use dominion_catalog_core::{CardSet, Column, IDENTITIES, PRINCE, Record, TABLE_CARDS};
use dominion_catalog_db::CardResources;
use rusqlite::{Connection, OptionalExtension, params_from_iter};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{CatalogError, Result};
use crate::schema::generate_insert_sql;

/// Outcome of loading one set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SetReport {
    /// Set or singleton name.
    pub set: String,
    /// Records supplied by the adapter.
    pub records_read: usize,
    /// Rows actually inserted; conflicting records are skipped.
    pub rows_inserted: usize,
}

/// Outcome of a full load, one entry per set in load order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub sets: Vec<SetReport>,
}

impl LoadReport {
    /// Total records supplied by the adapter.
    pub fn records_read(&self) -> usize {
        self.sets.iter().map(|s| s.records_read).sum()
    }

    /// Total rows inserted.
    pub fn rows_inserted(&self) -> usize {
        self.sets.iter().map(|s| s.rows_inserted).sum()
    }
}

/// Inserts one set of records inside a single transaction.
///
/// The i-th field of a record goes to the i-th data column. Records that
/// violate a constraint are dropped silently. A record with too many fields
/// aborts the set and nothing from it is kept.
///
/// # Errors
///
/// Returns [`CatalogError::RecordError`] for an over-long record, or
/// [`CatalogError::DatabaseError`] if the transaction fails.
pub fn add_cards<S: AsRef<str>>(conn: &Connection, set: &str, records: &[S]) -> Result<SetReport> {
    let tx = conn.unchecked_transaction()?;
    let mut report = SetReport {
        set: set.to_string(),
        records_read: records.len(),
        rows_inserted: 0,
    };

    for (index, raw) in records.iter().enumerate() {
        let record = Record::parse(raw.as_ref()).map_err(|source| CatalogError::RecordError {
            set: set.to_string(),
            index,
            source,
        })?;

        let columns: Vec<Column> = record.fields().iter().map(|(c, _)| *c).collect();
        let mut stmt = tx.prepare_cached(&generate_insert_sql(&columns))?;
        let values = record.fields().iter().map(|(_, v)| v.as_str());
        report.rows_inserted += stmt.execute(params_from_iter(values))?;
    }

    tx.commit()?;
    debug!(
        set,
        records = report.records_read,
        inserted = report.rows_inserted,
        "Loaded card set"
    );
    Ok(report)
}

/// Loads every set and the Prince singleton, in the fixed order.
///
/// Stops at the first failing set. Sets committed before it are not undone
/// here; [`SchemaManager::rebuild`](crate::SchemaManager::rebuild) empties
/// the table on failure.
pub fn load_all(conn: &Connection, resources: &dyn CardResources) -> Result<LoadReport> {
    let mut report = LoadReport::default();

    for set in CardSet::LOAD_ORDER {
        let records = resources.card_set(set)?;
        report.sets.push(add_cards(conn, set.name(), &records)?);
    }

    let prince = resources.single_card(PRINCE)?;
    report.sets.push(add_cards(conn, PRINCE, &[prince])?);

    info!(
        records = report.records_read(),
        inserted = report.rows_inserted(),
        "Card catalog loaded"
    );
    Ok(report)
}

/// Checks that every fixed card id holds its expected card.
///
/// # Errors
///
/// Returns [`CatalogError::IdentityMismatch`] naming the first id whose
/// row is missing or carries another name.
pub fn verify_identities(conn: &Connection) -> Result<()> {
    let sql = format!("SELECT name FROM {TABLE_CARDS} WHERE id = ?1");
    for (id, expected) in IDENTITIES {
        let found: Option<String> = conn
            .query_row(&sql, [id], |row| row.get::<_, Option<String>>(0))
            .optional()?
            .flatten();
        if found.as_deref() != Some(expected) {
            return Err(CatalogError::IdentityMismatch {
                id,
                expected,
                found,
            });
        }
    }
    Ok(())
}
