//! In-memory cursor for exercising the proxy and fetch helpers without a driver.

use std::collections::VecDeque;
use std::time::Duration;

use thiserror::Error;

use crate::cursor::{ColumnDescription, Cursor};
use crate::types::{Params, RowValues};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryCursorError {
    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}

/// A statement as received by the `MemoryCursor`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutedStatement {
    Single { sql: String, params: Params },
    Many { sql: String, param_list: Vec<Params> },
}

/// Scripted cursor: serves a fixed result set and records what was executed.
#[derive(Debug, Default)]
pub struct MemoryCursor {
    description: Vec<ColumnDescription>,
    rows: VecDeque<Vec<RowValues>>,
    executed: Vec<ExecutedStatement>,
    fail_with: Option<String>,
    panic_with: Option<String>,
    delay: Option<Duration>,
}

impl MemoryCursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A cursor already positioned on a result set with the given columns and rows.
    #[must_use]
    pub fn with_result(columns: &[&str], rows: Vec<Vec<RowValues>>) -> Self {
        Self {
            description: columns.iter().map(|c| ColumnDescription::new(*c)).collect(),
            rows: rows.into(),
            ..Self::default()
        }
    }

    /// Make every execution fail with `message`.
    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    /// Make every execution panic with `message`.
    #[must_use]
    pub fn panicking(mut self, message: impl Into<String>) -> Self {
        self.panic_with = Some(message.into());
        self
    }

    /// Sleep for `delay` inside every execution.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    #[must_use]
    pub fn executed(&self) -> &[ExecutedStatement] {
        &self.executed
    }

    #[must_use]
    pub fn remaining_rows(&self) -> usize {
        self.rows.len()
    }

    fn run(&mut self, statement: ExecutedStatement) -> Result<usize, MemoryCursorError> {
        self.executed.push(statement);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if let Some(message) = &self.panic_with {
            panic!("{message}");
        }
        match &self.fail_with {
            Some(message) => Err(MemoryCursorError::ExecutionError(message.clone())),
            None => Ok(self.rows.len()),
        }
    }
}

impl Cursor for MemoryCursor {
    type Output = usize;
    type Error = MemoryCursorError;

    fn execute(&mut self, sql: &str, params: &Params) -> Result<usize, MemoryCursorError> {
        self.run(ExecutedStatement::Single {
            sql: sql.to_string(),
            params: params.clone(),
        })
    }

    fn executemany(
        &mut self,
        sql: &str,
        param_list: &[Params],
    ) -> Result<usize, MemoryCursorError> {
        self.run(ExecutedStatement::Many {
            sql: sql.to_string(),
            param_list: param_list.to_vec(),
        })
    }

    fn fetchone(&mut self) -> Result<Option<Vec<RowValues>>, MemoryCursorError> {
        Ok(self.rows.pop_front())
    }

    fn fetchmany(&mut self, n: usize) -> Result<Vec<Vec<RowValues>>, MemoryCursorError> {
        let take = n.min(self.rows.len());
        Ok(self.rows.drain(..take).collect())
    }

    fn fetchall(&mut self) -> Result<Vec<Vec<RowValues>>, MemoryCursorError> {
        Ok(self.rows.drain(..).collect())
    }

    fn description(&self) -> &[ColumnDescription] {
        &self.description
    }
}
