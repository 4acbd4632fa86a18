//! Deserialization of listing rows into [`Record`].
//!
//! The listing returns one JSON object per row. `id` must be an integer; every
//! other key becomes a [`FieldValue`]:
//! - strings become `Text`, blank strings become `Unknown`
//! - numbers become `Number`
//! - `null`, booleans, arrays and objects become `Unknown`

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error as _;
use serde::de::MapAccess;
use serde::de::Visitor;

use super::FieldValue;
use super::Record;
use super::RecordId;

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a listing record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut id: Option<RecordId> = None;
        let mut record = Record::new(RecordId(0));

        while let Some(key) = map.next_key::<String>()? {
            let value: serde_json::Value = map.next_value()?;

            if key == "id" {
                let raw = value
                    .as_i64()
                    .ok_or_else(|| M::Error::custom(format!("record id is not an integer: {value}")))?;
                id = Some(RecordId(raw));
            } else {
                record.fields.insert(key, json_value_to_field(value));
            }
        }

        record.id = id.ok_or_else(|| M::Error::missing_field("id"))?;
        Ok(record)
    }
}

/// Converts a serde_json::Value to a [`FieldValue`].
fn json_value_to_field(json: serde_json::Value) -> FieldValue {
    match json {
        serde_json::Value::String(s) => FieldValue::from(s),
        serde_json::Value::Number(n) => n.as_f64().map(FieldValue::Number).unwrap_or_default(),
        serde_json::Value::Null
        | serde_json::Value::Bool(_)
        | serde_json::Value::Array(_)
        | serde_json::Value::Object(_) => FieldValue::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_simple_fields() {
        let json = r#"{"id": 27992, "title": "A Sunday on La Grande Jatte", "date_start": 1884}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.id(), RecordId(27992));
        assert_eq!(record.get("title").as_str(), Some("A Sunday on La Grande Jatte"));
        assert_eq!(record.get("date_start").as_f64(), Some(1884.0));
    }

    #[test]
    fn test_deserialize_malformed_fields_become_unknown() {
        let json = r#"{
            "id": 1,
            "inscriptions": null,
            "place_of_origin": "",
            "is_boosted": true,
            "color": {"h": 1},
            "term_titles": ["oil"]
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();

        for field in ["inscriptions", "place_of_origin", "is_boosted", "color", "term_titles"] {
            assert!(record.contains(field), "{field} should be kept");
            assert!(record.get(field).is_unknown(), "{field} should be unknown");
        }
    }

    #[test]
    fn test_deserialize_rejects_missing_id() {
        let result: Result<Record, _> = serde_json::from_str(r#"{"title": "Untitled"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_non_integer_id() {
        let result: Result<Record, _> = serde_json::from_str(r#"{"id": "abc"}"#);
        assert!(result.is_err());

        let result: Result<Record, _> = serde_json::from_str(r#"{"id": 1.5}"#);
        assert!(result.is_err());
    }
}
