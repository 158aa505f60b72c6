use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;

/// One executed statement as recorded for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryLogEntry {
    /// Statement text with parameters interpolated for display.
    pub sql: String,
    /// Elapsed wall-clock seconds, three decimal places.
    pub time: String,
}

impl QueryLogEntry {
    #[must_use]
    pub fn new(sql: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            sql: sql.into(),
            time: format!("{:.3}", elapsed.as_secs_f64()),
        }
    }
}

/// Append-only destination for query log entries, owned by a session.
///
/// Appends must be atomic with respect to each other; every proxy wrapping a cursor of the
/// session shares the same sink.
pub trait QueryLogSink {
    fn append(&self, entry: QueryLogEntry);
}

impl<T: QueryLogSink + ?Sized> QueryLogSink for &T {
    fn append(&self, entry: QueryLogEntry) {
        (**self).append(entry);
    }
}

impl<T: QueryLogSink + ?Sized> QueryLogSink for Arc<T> {
    fn append(&self, entry: QueryLogEntry) {
        (**self).append(entry);
    }
}

/// In-memory query log for a session.
///
/// Unbounded by default; `bounded` keeps only the most recent entries.
#[derive(Debug, Default)]
pub struct QueryLog {
    entries: Mutex<VecDeque<QueryLogEntry>>,
    limit: Option<usize>,
}

impl QueryLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that retains at most `limit` entries, discarding the oldest first.
    #[must_use]
    pub fn bounded(limit: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(limit.min(1024))),
            limit: Some(limit),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<QueryLogEntry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            // Clear the poison and continue with the recovered entries
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Copy of the current entries, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<QueryLogEntry> {
        self.lock().iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every entry; called by the owning session (for example between requests).
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl QueryLogSink for QueryLog {
    fn append(&self, entry: QueryLogEntry) {
        let mut entries = self.lock();
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            while entries.len() >= limit {
                entries.pop_front();
            }
        }
        entries.push_back(entry);
    }
}
