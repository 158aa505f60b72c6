use std::collections::HashMap;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::TypecastError;
use crate::typecast::typecast_value;
use crate::types::{ColumnType, RowValues, TypedValue};

/// One result row keyed by column name.
///
/// Iteration and serialization follow the column order of the cursor description.
#[derive(Debug, Clone)]
pub struct Record {
    /// The column names for this record (shared across all records of one fetch)
    column_names: Arc<Vec<String>>,
    values: Vec<RowValues>,
    // Name -> position, shared like the column names
    column_index: Arc<HashMap<String, usize>>,
}

pub(crate) fn build_column_index(column_names: &[String]) -> Arc<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(column_names.len());
    for (i, name) in column_names.iter().enumerate() {
        // First occurrence wins for duplicated names
        index.entry(name.clone()).or_insert(i);
    }
    Arc::new(index)
}

impl Record {
    /// Create a record; `values` must line up with `column_names`.
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<RowValues>) -> Self {
        let column_index = build_column_index(&column_names);
        Self::with_index(column_names, values, column_index)
    }

    pub(crate) fn with_index(
        column_names: Arc<Vec<String>>,
        values: Vec<RowValues>,
        column_index: Arc<HashMap<String, usize>>,
    ) -> Self {
        Self {
            column_names,
            values,
            column_index,
        }
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn values(&self) -> &[RowValues] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a value by column name, or `None` if the column is absent.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.column_index
            .get(column_name)
            .and_then(|&idx| self.values.get(idx))
    }

    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.values.get(index)
    }

    /// `(name, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValues)> {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Typecast the named column's value. Returns `Ok(None)` when the column is absent.
    ///
    /// # Errors
    ///
    /// Returns `TypecastError` if the column's text does not parse as `column_type`.
    pub fn typecast(
        &self,
        column_name: &str,
        column_type: ColumnType,
    ) -> Result<Option<TypedValue>, TypecastError> {
        self.get(column_name)
            .map(|value| typecast_value(column_type, value))
            .transpose()
    }

    /// Consume the record into owned `(name, value)` pairs in column order.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, RowValues)> {
        self.column_names
            .iter()
            .cloned()
            .zip(self.values)
            .collect()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.column_names == other.column_names && self.values == other.values
    }
}

struct ValueSer<'a>(&'a RowValues);

impl Serialize for ValueSer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            RowValues::Int(i) => serializer.serialize_i64(*i),
            RowValues::Float(f) => serializer.serialize_f64(*f),
            RowValues::Bool(b) => serializer.serialize_bool(*b),
            RowValues::Null => serializer.serialize_none(),
            RowValues::JSON(j) => j.serialize(serializer),
            other => serializer.serialize_str(&other.to_display_text()),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &ValueSer(value))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record::new(
            Arc::new(vec!["id".to_string(), "active".to_string()]),
            vec![RowValues::Int(1), RowValues::Text("t".into())],
        )
    }

    #[test]
    fn lookup_by_name_and_index() {
        let r = record();
        assert_eq!(r.get("id"), Some(&RowValues::Int(1)));
        assert_eq!(r.get("missing"), None);
        assert_eq!(r.get_by_index(1), Some(&RowValues::Text("t".into())));
    }

    #[test]
    fn typecasts_named_column() {
        let r = record();
        assert_eq!(
            r.typecast("active", ColumnType::Boolean).unwrap(),
            Some(TypedValue::Boolean(true))
        );
        assert_eq!(r.typecast("missing", ColumnType::Boolean).unwrap(), None);
    }

    #[test]
    fn serializes_in_column_order() {
        let r = Record::new(
            Arc::new(vec!["z".to_string(), "a".to_string()]),
            vec![RowValues::Int(1), RowValues::Null],
        );
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"{"z":1,"a":null}"#);
    }
}
