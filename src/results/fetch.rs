use std::collections::HashMap;
use std::sync::Arc;

use super::row::{Record, build_column_index};
use crate::cursor::Cursor;
use crate::types::RowValues;

/// Pair column names with a positional row.
///
/// Returns `None` when there are no columns or the row is empty. If the lengths differ, pairs
/// are taken up to the shorter of the two.
#[must_use]
pub fn row_to_record(column_names: &[String], row: Vec<RowValues>) -> Option<Record> {
    if column_names.is_empty() || row.is_empty() {
        return None;
    }
    let mut row = row;
    let width = column_names.len().min(row.len());
    row.truncate(width);
    Some(Record::new(Arc::new(column_names[..width].to_vec()), row))
}

fn column_names<C: Cursor>(cursor: &C) -> Arc<Vec<String>> {
    Arc::new(
        cursor
            .description()
            .iter()
            .map(|col| col.name.clone())
            .collect(),
    )
}

/// Fetch a single row as a record; `None` when no row is available.
///
/// # Errors
///
/// Returns the cursor's error if the fetch fails.
pub fn fetch_one_as_record<C: Cursor>(cursor: &mut C) -> Result<Option<Record>, C::Error> {
    let Some(row) = cursor.fetchone()? else {
        return Ok(None);
    };
    Ok(row_to_record(&column_names(cursor), row))
}

/// Fetch up to `n` rows, converting each to a record as the iterator is advanced.
///
/// Rows beyond `n` stay in the cursor.
///
/// # Errors
///
/// Returns the cursor's error if the fetch fails.
pub fn fetch_many_as_records<C: Cursor>(cursor: &mut C, n: usize) -> Result<Records, C::Error> {
    let columns = column_names(cursor);
    let rows = cursor.fetchmany(n)?;
    Ok(Records::new(columns, rows))
}

/// Fetch every remaining row, converting each to a record as the iterator is advanced.
///
/// # Errors
///
/// Returns the cursor's error if the fetch fails.
pub fn fetch_all_as_records<C: Cursor>(cursor: &mut C) -> Result<Records, C::Error> {
    let columns = column_names(cursor);
    let rows = cursor.fetchall()?;
    Ok(Records::new(columns, rows))
}

/// Forward-only iterator of records over one fetched batch.
///
/// Rows that cannot form a record (no columns, empty row) are skipped.
#[derive(Debug)]
pub struct Records {
    column_names: Arc<Vec<String>>,
    column_index: Arc<HashMap<String, usize>>,
    rows: std::vec::IntoIter<Vec<RowValues>>,
}

impl Records {
    fn new(column_names: Arc<Vec<String>>, rows: Vec<Vec<RowValues>>) -> Self {
        let column_index = build_column_index(&column_names);
        Self {
            column_names,
            column_index,
            rows: rows.into_iter(),
        }
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    fn materialize(&self, row: Vec<RowValues>) -> Option<Record> {
        if self.column_names.is_empty() || row.is_empty() {
            return None;
        }
        if row.len() == self.column_names.len() {
            Some(Record::with_index(
                Arc::clone(&self.column_names),
                row,
                Arc::clone(&self.column_index),
            ))
        } else {
            row_to_record(&self.column_names, row)
        }
    }
}

impl Iterator for Records {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        loop {
            let row = self.rows.next()?;
            if let Some(record) = self.materialize(row) {
                return Some(record);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.rows.size_hint().1)
    }
}
