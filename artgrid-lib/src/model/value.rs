//! Field values for displayed records

use std::fmt;

/// Text shown for a field the source did not provide.
pub const UNKNOWN_DISPLAY: &str = "N/A";

/// A single attribute value of a [`Record`](super::Record).
///
/// The listing source only produces text and numbers. Anything else, and any
/// attribute that is missing, `null` or blank, is carried as `Unknown` so the
/// selection and pagination code never sees a hole.
///
/// # Example
///
/// ```
/// use artgrid_lib::model::FieldValue;
///
/// assert_eq!(FieldValue::from("Paris").to_string(), "Paris");
/// assert_eq!(FieldValue::from(1890i64).to_string(), "1890");
/// assert_eq!(FieldValue::Unknown.to_string(), "N/A");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// String attribute.
    Text(String),
    /// Numeric attribute.
    Number(f64),
    /// Missing or unusable attribute.
    #[default]
    Unknown,
}

impl FieldValue {
    /// Returns `true` if the source did not provide this value.
    pub fn is_unknown(&self) -> bool {
        matches!(self, FieldValue::Unknown)
    }

    /// Returns the text, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number, if this is a numeric value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Unknown => f.write_str(UNKNOWN_DISPLAY),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::from(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        if value.trim().is_empty() {
            FieldValue::Unknown
        } else {
            FieldValue::Text(value)
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Unknown)
    }
}
