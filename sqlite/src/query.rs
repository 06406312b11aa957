//! Read-only query surface over the card store.
//!
//! [`CardProvider`] is the one public gateway to the catalog. It opens the
//! store on first use, bringing it to the declared version through
//! [`SchemaManager`], and then serves queries from a connection switched to
//! `query_only`. Mutations are part of the surface but always refuse.
//!
//! # Example
//!
//! ```no_run
//! use dominion_catalog_db::EmbeddedResources;
//! use dominion_catalog_sqlite::CardProvider;
//!
//! let provider = CardProvider::new("cards.db", EmbeddedResources::new());
//!
//! let cursor = provider
//!     .query(Some(&["name"]), Some("expansion = ?"), Some(&["Alchemy"]), Some("name"))
//!     .unwrap();
//! for row in cursor {
//!     println!("{}", row.get_str("name").unwrap_or_default());
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use dominion_catalog_core::{CARD_MIME, Card, Column, TABLE_CARDS, parse_potion};
use dominion_catalog_db::{CardResources, CatalogConfig};
use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::manager::{SchemaManager, StoreStatus, store_status};
use crate::schema::generate_select_sql;

/// Read-only gateway to the card catalog.
///
/// The store is opened lazily and shared by every caller through an
/// internal lock, so a provider can sit behind an `Arc` and serve queries
/// from several threads. If opening fails the error is returned and the
/// next call tries again.
pub struct CardProvider {
    path: Option<PathBuf>,
    resources: Box<dyn CardResources>,
    store: Mutex<Option<Connection>>,
}

impl CardProvider {
    /// Creates a provider backed by the store file at `path`.
    pub fn new(path: impl AsRef<Path>, resources: impl CardResources + 'static) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            resources: Box::new(resources),
            store: Mutex::new(None),
        }
    }

    /// Creates a provider whose store lives only in memory.
    pub fn in_memory(resources: impl CardResources + 'static) -> Self {
        Self {
            path: None,
            resources: Box::new(resources),
            store: Mutex::new(None),
        }
    }

    /// Creates a provider from a catalog configuration.
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            path: Some(config.database.clone()),
            resources: config.resources(),
            store: Mutex::new(None),
        }
    }

    /// Returns the store file path, or `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Runs a query against the cards table.
    ///
    /// - `projection`: columns or expressions to return; `None` or empty
    ///   returns every declared column.
    /// - `selection`: filter expression with `?` placeholders; `None` or
    ///   empty matches every row.
    /// - `selection_args`: values bound to the placeholders, in order.
    /// - `sort_order`: `ORDER BY` expression; `None` means
    ///   [`DEFAULT_SORT_ORDER`](crate::DEFAULT_SORT_ORDER), empty means
    ///   unordered.
    ///
    /// The first query on a provider may build the store.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DatabaseError`] if an expression is invalid or
    /// the placeholders and arguments disagree.
    pub fn query(
        &self,
        projection: Option<&[&str]>,
        selection: Option<&str>,
        selection_args: Option<&[&str]>,
        sort_order: Option<&str>,
    ) -> Result<Cursor> {
        let sql = generate_select_sql(projection, selection, sort_order);
        let args = selection_args.unwrap_or(&[]);
        debug!(%sql, args = args.len(), "Querying cards");

        self.with_store(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let columns: Arc<[String]> = stmt
                .column_names()
                .into_iter()
                .map(String::from)
                .collect();

            let mut rows = stmt.query(params_from_iter(args.iter().copied()))?;
            let mut values = Vec::new();
            while let Some(row) = rows.next()? {
                let row_values = (0..columns.len())
                    .map(|i| row.get::<_, Value>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                values.push(row_values);
            }

            Ok(Cursor {
                columns,
                rows: values.into_iter(),
            })
        })
    }

    /// Looks up one card by id.
    pub fn card(&self, id: i64) -> Result<Option<Card>> {
        let id = id.to_string();
        let cursor = self.query(None, Some("id = ?"), Some(&[id.as_str()]), Some(""))?;
        Ok(cursor.into_cards().into_iter().next())
    }

    /// Returns the number of cards in the catalog.
    pub fn count(&self) -> Result<usize> {
        self.with_store(|conn| {
            let count: i64 =
                conn.query_row(&format!("SELECT COUNT(*) FROM {TABLE_CARDS}"), [], |row| {
                    row.get(0)
                })?;
            Ok(count as usize)
        })
    }

    /// Returns a snapshot of the store, building it first if needed.
    pub fn status(&self) -> Result<StoreStatus> {
        self.with_store(store_status)
    }

    /// Returns the content type of rows at `address`.
    ///
    /// Every address served by the catalog holds cards.
    pub fn get_type(&self, address: &str) -> &'static str {
        debug!(address, "Resolving content type");
        CARD_MIME
    }

    /// Refuses to insert. Always returns `None`, meaning no address was
    /// assigned.
    pub fn insert(&self, address: &str, values: &[(&str, &str)]) -> Option<String> {
        debug!(address, fields = values.len(), "Refusing insert");
        None
    }

    /// Refuses to update. Always returns 0 rows affected.
    pub fn update(
        &self,
        address: &str,
        values: &[(&str, &str)],
        selection: Option<&str>,
        selection_args: Option<&[&str]>,
    ) -> usize {
        debug!(
            address,
            fields = values.len(),
            selection,
            args = selection_args.map_or(0, <[&str]>::len),
            "Refusing update"
        );
        0
    }

    /// Refuses to delete. Always returns 0 rows affected.
    pub fn delete(
        &self,
        address: &str,
        selection: Option<&str>,
        selection_args: Option<&[&str]>,
    ) -> usize {
        debug!(
            address,
            selection,
            args = selection_args.map_or(0, <[&str]>::len),
            "Refusing delete"
        );
        0
    }

    /// Releases the store connection. The next call opens it again.
    pub fn close(&self) -> Result<()> {
        let mut guard = self.store.lock().map_err(|_| CatalogError::Poisoned)?;
        if guard.take().is_some() {
            debug!("Closed card store");
        }
        Ok(())
    }

    fn with_store<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let mut guard = self.store.lock().map_err(|_| CatalogError::Poisoned)?;
        let conn = match &mut *guard {
            Some(conn) => conn,
            empty => empty.insert(self.open_store()?),
        };
        f(conn)
    }

    fn open_store(&self) -> Result<Connection> {
        let mut manager = match &self.path {
            Some(path) => SchemaManager::open(path)?,
            None => SchemaManager::in_memory()?,
        };
        let outcome = manager.ensure_current(self.resources.as_ref())?;
        debug!(?outcome, "Card store ready");

        let conn = manager.into_connection();
        conn.pragma_update(None, "query_only", true)?;
        Ok(conn)
    }
}

/// Forward-only cursor over query results.
///
/// Rows are read from the store when the query runs; dropping the cursor
/// early releases them.
#[derive(Debug)]
pub struct Cursor {
    columns: Arc<[String]>,
    rows: std::vec::IntoIter<Vec<Value>>,
}

impl Cursor {
    /// Returns the result column names, in projection order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the position of a result column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Consumes the remaining rows as cards.
    pub fn into_cards(self) -> Vec<Card> {
        self.map(|row| row.to_card()).collect()
    }
}

impl Iterator for Cursor {
    type Item = CursorRow;

    fn next(&mut self) -> Option<CursorRow> {
        self.rows.next().map(|values| CursorRow {
            columns: Arc::clone(&self.columns),
            values,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for Cursor {}

/// One row of a [`Cursor`].
#[derive(Debug, Clone)]
pub struct CursorRow {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl CursorRow {
    /// Returns the result column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the values in column order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Returns the value at a column position.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Returns the value of a named column.
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|c| c == name)?;
        self.values.get(index)
    }

    /// Returns a named column as text, or `None` if it is not text.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get_by_name(name)? {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns a named column as an integer, or `None` if it is not one.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.get_by_name(name)? {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Builds a [`Card`] from the declared columns present in this row.
    ///
    /// Columns outside the declared set are ignored; missing ones stay
    /// unset. A potion stored as text is read with [`parse_potion`].
    pub fn to_card(&self) -> Card {
        let mut card = Card::default();
        for (name, value) in self.columns.iter().zip(&self.values) {
            let Some(column) = Column::from_name(name) else {
                continue;
            };
            match column {
                Column::Id => {
                    if let Value::Integer(id) = value {
                        card.id = *id;
                    }
                }
                Column::Potion => {
                    card.potion = match value {
                        Value::Integer(n) => Some(*n),
                        Value::Text(text) => Some(parse_potion(text)),
                        Value::Real(r) => Some(*r as i64),
                        Value::Null | Value::Blob(_) => None,
                    };
                }
                _ => {
                    if let Some(slot) = text_slot(&mut card, column) {
                        *slot = value_text(value);
                    }
                }
            }
        }
        card
    }
}

fn text_slot(card: &mut Card, column: Column) -> Option<&mut Option<String>> {
    match column {
        Column::Id | Column::Potion => None,
        Column::Name => Some(&mut card.name),
        Column::Description => Some(&mut card.description),
        Column::Cost => Some(&mut card.cost),
        Column::Category => Some(&mut card.category),
        Column::Expansion => Some(&mut card.expansion),
        Column::Buy => Some(&mut card.buy),
        Column::Action => Some(&mut card.action),
        Column::Draw => Some(&mut card.draw),
        Column::Gold => Some(&mut card.gold),
        Column::Victory => Some(&mut card.victory),
        Column::Curser => Some(&mut card.curser),
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Text(text) => Some(text.clone()),
        Value::Integer(n) => Some(n.to_string()),
        Value::Real(r) => Some(r.to_string()),
        Value::Null | Value::Blob(_) => None,
    }
}
