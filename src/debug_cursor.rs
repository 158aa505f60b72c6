use std::fmt;
use std::time::Instant;

use crate::cursor::{ColumnDescription, Cursor};
use crate::interpolation::interpolate_params;
use crate::query_log::{QueryLogEntry, QueryLogSink};
use crate::types::{Params, RowValues};

const MANY_PREFIX: &str = "MANY: ";

/// Cursor proxy that records every executed statement, with its duration, in a query log.
///
/// Only `execute` and `executemany` are instrumented; fetches and `description` go straight to
/// the wrapped cursor. Driver errors are returned unchanged, after the log entry is written.
/// ```rust
/// use sql_marshal::prelude::*;
/// use sql_marshal::test_utils::MemoryCursor;
///
/// let log = QueryLog::new();
/// let mut cursor = DebugCursor::new(MemoryCursor::new(), &log);
/// cursor.execute("SELECT * FROM t WHERE id = %s", &Params::from(vec![RowValues::Int(7)]))?;
/// assert_eq!(log.snapshot()[0].sql, "SELECT * FROM t WHERE id = 7");
/// # Ok::<(), sql_marshal::test_utils::MemoryCursorError>(())
/// ```
#[derive(Debug)]
pub struct DebugCursor<C, L> {
    cursor: C,
    log: L,
}

impl<C, L> DebugCursor<C, L> {
    pub fn new(cursor: C, log: L) -> Self {
        Self { cursor, log }
    }

    #[must_use]
    pub fn inner(&self) -> &C {
        &self.cursor
    }

    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.cursor
    }

    #[must_use]
    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn into_inner(self) -> C {
        self.cursor
    }
}

enum Statement<'a> {
    Single(&'a str, &'a Params),
    Many(&'a str, &'a [Params]),
}

impl Statement<'_> {
    fn render(&self) -> String {
        match self {
            Statement::Single(sql, params) => interpolate_params(sql, params).into_owned(),
            Statement::Many(sql, param_list) => {
                let mut out = String::with_capacity(MANY_PREFIX.len() + sql.len() + 2);
                // `fmt::Write` for `String` never returns an error.
                write_many(&mut out, sql, param_list).ok();
                out
            }
        }
    }
}

fn write_many(out: &mut impl fmt::Write, sql: &str, param_list: &[Params]) -> fmt::Result {
    write!(out, "{MANY_PREFIX}{sql} [")?;
    for (i, params) in param_list.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        params.write_literal(out)?;
    }
    out.write_char(']')
}

/// Appends the log entry when dropped, so it is written on every exit path of an execution,
/// including unwinding.
struct LogOnDrop<'a, L: QueryLogSink> {
    log: &'a L,
    statement: Statement<'a>,
    started: Instant,
}

impl<'a, L: QueryLogSink> LogOnDrop<'a, L> {
    fn start(log: &'a L, statement: Statement<'a>) -> Self {
        Self {
            log,
            statement,
            started: Instant::now(),
        }
    }
}

impl<L: QueryLogSink> Drop for LogOnDrop<'_, L> {
    fn drop(&mut self) {
        let elapsed = self.started.elapsed();
        let entry = QueryLogEntry::new(self.statement.render(), elapsed);
        tracing::debug!(sql = %entry.sql, time = %entry.time, "query executed");
        self.log.append(entry);
    }
}

impl<C, L> Cursor for DebugCursor<C, L>
where
    C: Cursor,
    L: QueryLogSink,
{
    type Output = C::Output;
    type Error = C::Error;

    fn execute(&mut self, sql: &str, params: &Params) -> Result<Self::Output, Self::Error> {
        let _entry = LogOnDrop::start(&self.log, Statement::Single(sql, params));
        self.cursor.execute(sql, params)
    }

    fn executemany(
        &mut self,
        sql: &str,
        param_list: &[Params],
    ) -> Result<Self::Output, Self::Error> {
        let _entry = LogOnDrop::start(&self.log, Statement::Many(sql, param_list));
        self.cursor.executemany(sql, param_list)
    }

    fn fetchone(&mut self) -> Result<Option<Vec<RowValues>>, Self::Error> {
        self.cursor.fetchone()
    }

    fn fetchmany(&mut self, n: usize) -> Result<Vec<Vec<RowValues>>, Self::Error> {
        self.cursor.fetchmany(n)
    }

    fn fetchall(&mut self) -> Result<Vec<Vec<RowValues>>, Self::Error> {
        self.cursor.fetchall()
    }

    fn description(&self) -> &[ColumnDescription] {
        self.cursor.description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_many_as_one_blob() {
        let list = vec![
            Params::from(vec![RowValues::Int(1), RowValues::Text("a".into())]),
            Params::from(vec![RowValues::Int(2), RowValues::Null]),
        ];
        let rendered = Statement::Many("INSERT INTO t VALUES (%s, %s)", &list).render();
        assert_eq!(
            rendered,
            "MANY: INSERT INTO t VALUES (%s, %s) [(1, 'a'), (2, NULL)]"
        );
    }

    #[test]
    fn renders_single_with_interpolation() {
        let params = Params::named([("name", RowValues::Text("x".into()))]);
        let rendered = Statement::Single("SELECT %(name)s", &params).render();
        assert_eq!(rendered, "SELECT x");
    }
}
