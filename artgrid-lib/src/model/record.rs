//! Listing records

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::FieldValue;

/// Stable identifier of a record in the remote listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId(value)
    }
}

impl From<RecordId> for i64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the remote listing.
///
/// Records are immutable snapshots of what a single fetch returned. Field
/// lookups never fail: an attribute the source left out reads as
/// [`FieldValue::Unknown`].
///
/// # Example
///
/// ```
/// use artgrid_lib::model::{FieldValue, Record, RecordId};
///
/// let record = Record::new(RecordId(27992))
///     .set("title", "A Sunday on La Grande Jatte")
///     .set("date_start", 1884i64);
///
/// assert_eq!(record.get("title").as_str(), Some("A Sunday on La Grande Jatte"));
/// assert_eq!(record.get("inscriptions"), &FieldValue::Unknown);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub(crate) id: RecordId,
    pub(crate) fields: HashMap<String, FieldValue>,
}

static UNKNOWN: FieldValue = FieldValue::Unknown;

impl Record {
    /// Creates a record with no attributes.
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    /// Returns the record ID.
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the value of an attribute, or `Unknown` if it is absent.
    pub fn get(&self, field: &str) -> &FieldValue {
        self.fields.get(field).unwrap_or(&UNKNOWN)
    }

    /// Returns `true` if the source provided this attribute, even if unknown.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all attributes.
    pub fn fields(&self) -> &HashMap<String, FieldValue> {
        &self.fields
    }

    /// Returns the display text for each of `columns`, in order.
    pub fn display_values<'a>(&self, columns: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        columns
            .into_iter()
            .map(|column| self.get(column).to_string())
            .collect()
    }

    /// Sets an attribute, consuming and returning the record.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_reads_unknown() {
        let record = Record::new(RecordId(7)).set("title", "Nighthawks");
        assert!(record.contains("title"));
        assert!(!record.contains("artist_display"));
        assert!(record.get("artist_display").is_unknown());
    }

    #[test]
    fn test_display_values_follow_column_order() {
        let record = Record::new(RecordId(1))
            .set("title", "Water Lilies")
            .set("date_end", 1906i64);

        assert_eq!(
            record.display_values(["date_end", "title", "inscriptions"]),
            vec!["1906", "Water Lilies", "N/A"]
        );
    }

    #[test]
    fn test_record_id_conversions() {
        let id = RecordId::from(42i64);
        assert_eq!(i64::from(id), 42);
        assert_eq!(id.to_string(), "42");
    }
}
