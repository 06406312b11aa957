//! SQL generation for the `cards` table.
//!
//! Every statement the catalog runs is built here from the declared
//! [`Column`] list, so the table definition, the loader's inserts, and the
//! query surface can never disagree on column names.

use dominion_catalog_core::{Column, TABLE_CARDS};

/// Ordering applied when a query supplies none.
pub const DEFAULT_SORT_ORDER: &str = "expansion, name";

/// Generates the `CREATE TABLE` statement for the cards table.
pub fn generate_schema_sql() -> String {
    let columns: Vec<String> = Column::ALL
        .iter()
        .map(|c| format!("    {} {}", c.name(), c.sql_type()))
        .collect();
    format!("CREATE TABLE {TABLE_CARDS} (\n{}\n);", columns.join(",\n"))
}

/// Generates the statement dropping the cards table.
pub fn generate_drop_sql() -> String {
    format!("DROP TABLE IF EXISTS {TABLE_CARDS};")
}

/// Generates a conflict-ignoring insert for the given columns.
///
/// With no columns the row gets only its auto-assigned id.
pub fn generate_insert_sql(columns: &[Column]) -> String {
    if columns.is_empty() {
        return format!("INSERT OR IGNORE INTO {TABLE_CARDS} DEFAULT VALUES");
    }
    let names: Vec<&str> = columns.iter().map(|c| c.name()).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
    format!(
        "INSERT OR IGNORE INTO {TABLE_CARDS} ({}) VALUES ({})",
        names.join(", "),
        placeholders.join(", ")
    )
}

/// Generates the `SELECT` behind a catalog query.
///
/// - `projection`: `None` or an empty list selects every declared column.
/// - `selection`: `None` or empty text means no `WHERE` clause.
/// - `sort_order`: `None` falls back to [`DEFAULT_SORT_ORDER`]; empty text
///   means no `ORDER BY` clause.
///
/// Projection, selection, and sort order are passed through verbatim; the
/// store reports any invalid expression.
pub fn generate_select_sql(
    projection: Option<&[&str]>,
    selection: Option<&str>,
    sort_order: Option<&str>,
) -> String {
    let columns = match projection {
        Some(cols) if !cols.is_empty() => cols.join(", "),
        _ => Column::ALL
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", "),
    };

    let mut sql = format!("SELECT {columns} FROM {TABLE_CARDS}");
    if let Some(selection) = selection.filter(|s| !s.is_empty()) {
        sql.push_str(&format!(" WHERE ({selection})"));
    }
    let order = sort_order.unwrap_or(DEFAULT_SORT_ORDER);
    if !order.is_empty() {
        sql.push_str(&format!(" ORDER BY {order}"));
    }
    sql
}
