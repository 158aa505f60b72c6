use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Values a driver hands back in a row, or accepts as a bound parameter.
///
/// Drivers on the textual side of the boundary mostly produce `Text`; the typecast functions
/// turn those into the typed variants.
/// ```rust
/// use sql_marshal::prelude::*;
///
/// let params = Params::from(vec![
///     RowValues::Int(1),
///     RowValues::Text("alice".into()),
///     RowValues::Bool(true),
/// ]);
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Calendar date
    Date(NaiveDate),
    /// Time of day, no timezone
    Time(NaiveTime),
    /// Timestamp value, no timezone
    Timestamp(NaiveDateTime),
    /// Fixed-point decimal
    Decimal(BigDecimal),
    /// NULL value
    Null,
    /// JSON value
    JSON(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_decimal(&self) -> Option<&BigDecimal> {
        if let RowValues::Decimal(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Text-safe rendering of the value, used when a value has to be shown as part of a
    /// statement (query log) or re-read by a textual typecast.
    ///
    /// Text passes through unchanged; NULL renders as `NULL`; blobs are decoded lossily.
    #[must_use]
    pub fn to_display_text(&self) -> Cow<'_, str> {
        match self {
            RowValues::Text(s) => Cow::Borrowed(s.as_str()),
            RowValues::Int(i) => Cow::Owned(i.to_string()),
            RowValues::Float(f) => Cow::Owned(format!("{f:?}")),
            RowValues::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            RowValues::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
            RowValues::Time(t) => Cow::Owned(t.format("%H:%M:%S%.f").to_string()),
            RowValues::Timestamp(dt) => Cow::Owned(dt.format("%F %T%.f").to_string()),
            RowValues::Decimal(d) => Cow::Owned(d.to_string()),
            RowValues::Null => Cow::Borrowed("NULL"),
            RowValues::JSON(j) => Cow::Owned(j.to_string()),
            RowValues::Blob(bytes) => String::from_utf8_lossy(bytes),
        }
    }

    /// Literal-style rendering: like `to_display_text`, but text-like values are single-quoted.
    pub(crate) fn write_literal(&self, out: &mut impl fmt::Write) -> fmt::Result {
        match self {
            RowValues::Text(_)
            | RowValues::Date(_)
            | RowValues::Time(_)
            | RowValues::Timestamp(_)
            | RowValues::JSON(_)
            | RowValues::Blob(_) => write!(out, "'{}'", self.to_display_text()),
            _ => out.write_str(&self.to_display_text()),
        }
    }
}

impl From<i64> for RowValues {
    fn from(value: i64) -> Self {
        RowValues::Int(value)
    }
}

impl From<&str> for RowValues {
    fn from(value: &str) -> Self {
        RowValues::Text(value.to_string())
    }
}

impl From<String> for RowValues {
    fn from(value: String) -> Self {
        RowValues::Text(value)
    }
}

impl From<bool> for RowValues {
    fn from(value: bool) -> Self {
        RowValues::Bool(value)
    }
}

impl From<BigDecimal> for RowValues {
    fn from(value: BigDecimal) -> Self {
        RowValues::Decimal(value)
    }
}

impl<T: Into<RowValues>> From<Option<T>> for RowValues {
    fn from(value: Option<T>) -> Self {
        value.map_or(RowValues::Null, Into::into)
    }
}

/// Bound parameters for one statement execution.
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    /// Parameters consumed in order by `%s` placeholders.
    Positional(Vec<RowValues>),
    /// Parameters looked up by `%(name)s` placeholders.
    Named(BTreeMap<String, RowValues>),
}

impl Default for Params {
    fn default() -> Self {
        Params::Positional(Vec::new())
    }
}

impl Params {
    /// An empty positional parameter list.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Build named parameters from `(name, value)` pairs.
    pub fn named<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, RowValues)>,
    {
        Params::Named(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Params::Positional(values) => values.len(),
            Params::Named(map) => map.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the parameter set as one literal blob: `(1, 'a')` or `{'id': 1}`.
    pub(crate) fn write_literal(&self, out: &mut impl fmt::Write) -> fmt::Result {
        match self {
            Params::Positional(values) => {
                out.write_char('(')?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        out.write_str(", ")?;
                    }
                    value.write_literal(out)?;
                }
                out.write_char(')')
            }
            Params::Named(map) => {
                out.write_char('{')?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        out.write_str(", ")?;
                    }
                    write!(out, "'{key}': ")?;
                    value.write_literal(out)?;
                }
                out.write_char('}')
            }
        }
    }
}

impl From<Vec<RowValues>> for Params {
    fn from(values: Vec<RowValues>) -> Self {
        Params::Positional(values)
    }
}

impl From<BTreeMap<String, RowValues>> for Params {
    fn from(map: BTreeMap<String, RowValues>) -> Self {
        Params::Named(map)
    }
}

/// Result of `parse_timestamp`: text without a time part decodes to a bare date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampValue {
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl TimestampValue {
    /// The value as a timestamp; a bare date is taken at midnight.
    #[must_use]
    pub fn to_datetime(self) -> NaiveDateTime {
        match self {
            TimestampValue::Date(d) => d.and_time(NaiveTime::MIN),
            TimestampValue::Timestamp(dt) => dt,
        }
    }
}

/// Native value produced by a typecast.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Boolean(bool),
    Decimal(BigDecimal),
    Null,
}

impl TypedValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<TimestampValue> for TypedValue {
    fn from(value: TimestampValue) -> Self {
        match value {
            TimestampValue::Date(d) => TypedValue::Date(d),
            TimestampValue::Timestamp(dt) => TypedValue::Timestamp(dt),
        }
    }
}

/// Column type a driver reports, selecting which typecast applies to the column's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ColumnType {
    Date,
    Time,
    Timestamp,
    Boolean,
    Decimal,
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(ColumnType::Date),
            "time" => Ok(ColumnType::Time),
            "timestamp" | "datetime" => Ok(ColumnType::Timestamp),
            "bool" | "boolean" => Ok(ColumnType::Boolean),
            "decimal" | "numeric" => Ok(ColumnType::Decimal),
            other => Err(format!("unknown column type: {other}")),
        }
    }
}

impl TryFrom<String> for ColumnType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_text_passes_strings_through() {
        assert_eq!(RowValues::Text("it's".into()).to_display_text(), "it's");
        assert_eq!(RowValues::Int(7).to_display_text(), "7");
        assert_eq!(RowValues::Null.to_display_text(), "NULL");
        assert_eq!(RowValues::Blob(b"abc".to_vec()).to_display_text(), "abc");
    }

    #[test]
    fn floats_keep_their_decimal_point() {
        assert_eq!(RowValues::Float(1.0).to_display_text(), "1.0");
        assert_eq!(RowValues::Float(2.5).to_display_text(), "2.5");
        assert_eq!(RowValues::Float(-0.125).to_display_text(), "-0.125");
    }

    #[test]
    fn literal_rendering_quotes_text() {
        let params = Params::from(vec![RowValues::Int(1), RowValues::Text("a".into())]);
        let mut out = String::new();
        params.write_literal(&mut out).unwrap();
        assert_eq!(out, "(1, 'a')");

        let named = Params::named([("id", RowValues::Int(2)), ("flag", RowValues::Bool(false))]);
        let mut out = String::new();
        named.write_literal(&mut out).unwrap();
        assert_eq!(out, "{'flag': false, 'id': 2}");
    }

    #[test]
    fn column_type_names() {
        assert_eq!("DATETIME".parse::<ColumnType>(), Ok(ColumnType::Timestamp));
        assert_eq!("numeric".parse::<ColumnType>(), Ok(ColumnType::Decimal));
        assert_eq!(" bool ".parse::<ColumnType>(), Ok(ColumnType::Boolean));
        assert!("blob".parse::<ColumnType>().is_err());

        let parsed: ColumnType = serde_json::from_str("\"time\"").unwrap();
        assert_eq!(parsed, ColumnType::Time);
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(RowValues::from(None::<i64>), RowValues::Null);
        assert_eq!(RowValues::from(Some("x")), RowValues::Text("x".into()));
    }
}
