use crate::config::CursorOptions;
use crate::debug_cursor::DebugCursor;
use crate::query_log::QueryLogSink;
use crate::types::{ColumnType, Params, RowValues};

/// Metadata for one result column, in positional order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescription {
    pub name: String,
    /// Driver-reported type name, when the driver provides one.
    pub type_name: Option<String>,
}

impl ColumnDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: None,
        }
    }

    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// The typecast that applies to this column, if the driver reported a known type name.
    #[must_use]
    pub fn column_type(&self) -> Option<ColumnType> {
        self.type_name.as_deref()?.parse().ok()
    }
}

/// The surface a driver cursor must provide.
///
/// Rows come back positionally; `description` lists the column of each position and is empty
/// until a statement has produced a result set.
pub trait Cursor {
    /// Whatever the driver returns from an execution (row count, status, ...).
    type Output;
    /// The driver's own error type; this crate never translates it.
    type Error;

    /// Execute one statement with its bound parameters.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if execution fails.
    fn execute(&mut self, sql: &str, params: &Params) -> Result<Self::Output, Self::Error>;

    /// Execute one statement once per parameter set.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if execution fails.
    fn executemany(&mut self, sql: &str, param_list: &[Params])
    -> Result<Self::Output, Self::Error>;

    /// Fetch the next row, or `None` when the result set is exhausted.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if fetching fails.
    fn fetchone(&mut self) -> Result<Option<Vec<RowValues>>, Self::Error>;

    /// Fetch up to `n` further rows.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if fetching fails.
    fn fetchmany(&mut self, n: usize) -> Result<Vec<Vec<RowValues>>, Self::Error>;

    /// Fetch every remaining row.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if fetching fails.
    fn fetchall(&mut self) -> Result<Vec<Vec<RowValues>>, Self::Error>;

    fn description(&self) -> &[ColumnDescription];
}

/// A cursor as handed out by a session: plain, or instrumented when debugging is on.
pub enum SessionCursor<C, L> {
    Plain(C),
    Debug(DebugCursor<C, L>),
}

/// Wrap `cursor` according to `options`.
///
/// With `debug` set, every statement run through the returned cursor is appended to `log`.
pub fn wrap_cursor<C, L>(cursor: C, log: L, options: &CursorOptions) -> SessionCursor<C, L>
where
    C: Cursor,
    L: QueryLogSink,
{
    if options.debug {
        SessionCursor::Debug(DebugCursor::new(cursor, log))
    } else {
        SessionCursor::Plain(cursor)
    }
}

impl<C, L> SessionCursor<C, L> {
    #[must_use]
    pub fn is_debug(&self) -> bool {
        matches!(self, SessionCursor::Debug(_))
    }

    /// Unwrap to the driver cursor, discarding any instrumentation.
    pub fn into_inner(self) -> C {
        match self {
            SessionCursor::Plain(cursor) => cursor,
            SessionCursor::Debug(debug) => debug.into_inner(),
        }
    }
}

impl<C, L> Cursor for SessionCursor<C, L>
where
    C: Cursor,
    L: QueryLogSink,
{
    type Output = C::Output;
    type Error = C::Error;

    fn execute(&mut self, sql: &str, params: &Params) -> Result<Self::Output, Self::Error> {
        match self {
            SessionCursor::Plain(cursor) => cursor.execute(sql, params),
            SessionCursor::Debug(cursor) => cursor.execute(sql, params),
        }
    }

    fn executemany(
        &mut self,
        sql: &str,
        param_list: &[Params],
    ) -> Result<Self::Output, Self::Error> {
        match self {
            SessionCursor::Plain(cursor) => cursor.executemany(sql, param_list),
            SessionCursor::Debug(cursor) => cursor.executemany(sql, param_list),
        }
    }

    fn fetchone(&mut self) -> Result<Option<Vec<RowValues>>, Self::Error> {
        match self {
            SessionCursor::Plain(cursor) => cursor.fetchone(),
            SessionCursor::Debug(cursor) => cursor.fetchone(),
        }
    }

    fn fetchmany(&mut self, n: usize) -> Result<Vec<Vec<RowValues>>, Self::Error> {
        match self {
            SessionCursor::Plain(cursor) => cursor.fetchmany(n),
            SessionCursor::Debug(cursor) => cursor.fetchmany(n),
        }
    }

    fn fetchall(&mut self) -> Result<Vec<Vec<RowValues>>, Self::Error> {
        match self {
            SessionCursor::Plain(cursor) => cursor.fetchall(),
            SessionCursor::Debug(cursor) => cursor.fetchall(),
        }
    }

    fn description(&self) -> &[ColumnDescription] {
        match self {
            SessionCursor::Plain(cursor) => cursor.description(),
            SessionCursor::Debug(cursor) => cursor.description(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_type_from_driver_name() {
        let col = ColumnDescription::new("created").with_type_name("TIMESTAMP");
        assert_eq!(col.column_type(), Some(ColumnType::Timestamp));
        assert_eq!(ColumnDescription::new("id").column_type(), None);
        let col = ColumnDescription::new("id").with_type_name("integer");
        assert_eq!(col.column_type(), None);
    }
}
