//! Textual card records.
//!
//! A record is one `;`-separated line of card data in the field order of
//! [`Column::DATA`]. There is no escaping, so the separator must not occur
//! inside a field.

use crate::error::RecordError;
use crate::types::Column;

/// Separator between the fields of a record.
pub const FIELD_SEPARATOR: char = ';';

/// A parsed record: the leading columns that the source line supplied.
///
/// Records may stop early; columns past the last field stay unset. Empty
/// fields inside the supplied range are kept as empty strings.
///
/// # Examples
///
/// ```
/// use dominion_catalog_core::{Column, Record};
///
/// let record = Record::parse("Village;+1 Card, +2 Actions.;3;0").unwrap();
/// assert_eq!(record.name(), Some("Village"));
/// assert_eq!(record.get(Column::Cost), Some("3"));
/// assert_eq!(record.get(Column::Expansion), None);
/// assert_eq!(record.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(Column, String)>,
}

impl Record {
    /// Parses one record.
    ///
    /// The empty string yields a record with no fields.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::TooManyFields`] if the line has more fields
    /// than there are data columns.
    pub fn parse(raw: &str) -> Result<Self, RecordError> {
        if raw.is_empty() {
            return Ok(Self::default());
        }

        let values: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
        if values.len() > Column::DATA.len() {
            return Err(RecordError::TooManyFields {
                count: values.len(),
                max: Column::DATA.len(),
            });
        }

        let fields = Column::DATA
            .into_iter()
            .zip(values)
            .map(|(column, value)| (column, value.to_string()))
            .collect();
        Ok(Self { fields })
    }

    /// Returns the supplied `(column, value)` pairs in field order.
    pub fn fields(&self) -> &[(Column, String)] {
        &self.fields
    }

    /// Returns the value supplied for `column`, if any.
    pub fn get(&self, column: Column) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the card name, if supplied.
    pub fn name(&self) -> Option<&str> {
        self.get(Column::Name)
    }

    /// Number of supplied fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record supplied no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
