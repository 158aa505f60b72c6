use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;

use regex::Regex;
use sql_marshal::prelude::*;
use sql_marshal::test_utils::{ExecutedStatement, MemoryCursor, MemoryCursorError};

fn time_pattern() -> Regex {
    Regex::new(r"^\d+\.\d{3}$").unwrap()
}

#[test]
fn execute_logs_interpolated_sql_and_time() {
    let log = QueryLog::new();
    let mut cursor = DebugCursor::new(MemoryCursor::new(), &log);

    let params = Params::from(vec![RowValues::Int(7)]);
    cursor
        .execute("SELECT * FROM t WHERE id = %s", &params)
        .unwrap();

    let entries = log.snapshot();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].sql.contains("SELECT * FROM t WHERE id = 7"));
    assert!(time_pattern().is_match(&entries[0].time), "{}", entries[0].time);

    // the driver saw the untouched statement and params
    assert_eq!(
        cursor.inner().executed(),
        [ExecutedStatement::Single {
            sql: "SELECT * FROM t WHERE id = %s".to_string(),
            params,
        }]
    );
}

#[test]
fn failing_execute_still_logs_once() {
    let log = QueryLog::new();
    let mut cursor = DebugCursor::new(
        MemoryCursor::new()
            .failing("relation \"t\" does not exist")
            .with_delay(Duration::from_millis(20)),
        &log,
    );

    let err = cursor
        .execute("SELECT * FROM t", &Params::none())
        .unwrap_err();
    assert_eq!(
        err,
        MemoryCursorError::ExecutionError("relation \"t\" does not exist".to_string())
    );

    let entries = log.snapshot();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].sql, "SELECT * FROM t");
    assert!(time_pattern().is_match(&entries[0].time));
    let secs: f64 = entries[0].time.parse().unwrap();
    assert!(secs >= 0.019, "elapsed {secs} should reflect the driver call");
}

#[test]
fn panicking_execute_still_logs_once() {
    let log = QueryLog::new();
    let mut cursor = DebugCursor::new(MemoryCursor::new().panicking("driver crashed"), &log);

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        cursor.execute("DELETE FROM t WHERE id = %s", &Params::from(vec![RowValues::Int(3)]))
    }));
    assert!(outcome.is_err());

    let entries = log.snapshot();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].sql, "DELETE FROM t WHERE id = 3");
}

#[test]
fn executemany_logs_aggregate_params() {
    let log = QueryLog::new();
    let mut cursor = DebugCursor::new(MemoryCursor::new(), &log);

    let batch = vec![
        Params::from(vec![RowValues::Int(1), RowValues::Text("alice".into())]),
        Params::from(vec![RowValues::Int(2), RowValues::Text("bob".into())]),
    ];
    cursor
        .executemany("INSERT INTO users (id, name) VALUES (%s, %s)", &batch)
        .unwrap();

    let entries = log.snapshot();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].sql,
        "MANY: INSERT INTO users (id, name) VALUES (%s, %s) [(1, 'alice'), (2, 'bob')]"
    );
    assert!(time_pattern().is_match(&entries[0].time));
}

#[test]
fn failing_executemany_still_logs_once() {
    let log = QueryLog::new();
    let mut cursor = DebugCursor::new(MemoryCursor::new().failing("duplicate key"), &log);

    let batch = vec![
        Params::from(vec![RowValues::Int(1)]),
        Params::from(vec![RowValues::Int(1)]),
    ];
    let err = cursor
        .executemany("INSERT INTO t (id) VALUES (%s)", &batch)
        .unwrap_err();
    assert_eq!(
        err,
        MemoryCursorError::ExecutionError("duplicate key".to_string())
    );

    let entries = log.snapshot();
    assert_eq!(log.len(), 1);
    assert!(entries[0].sql.starts_with("MANY: "));
    assert_eq!(entries[0].sql, "MANY: INSERT INTO t (id) VALUES (%s) [(1), (1)]");
    assert!(time_pattern().is_match(&entries[0].time));
}

#[test]
fn entries_follow_call_order_across_proxies() {
    let log = Arc::new(QueryLog::new());
    let mut first = DebugCursor::new(MemoryCursor::new(), Arc::clone(&log));
    let mut second = DebugCursor::new(MemoryCursor::new().failing("boom"), Arc::clone(&log));

    first.execute("SELECT 1", &Params::none()).unwrap();
    let _ = second.execute("SELECT 2", &Params::none());
    first
        .execute(
            "SELECT %(n)s",
            &Params::named([("n", RowValues::Int(3))]),
        )
        .unwrap();

    let sql: Vec<String> = log.snapshot().into_iter().map(|e| e.sql).collect();
    assert_eq!(sql, vec!["SELECT 1", "SELECT 2", "SELECT 3"]);
}

#[test]
fn fetches_are_forwarded_without_logging() {
    let log = QueryLog::new();
    let inner = MemoryCursor::with_result(
        &["id"],
        vec![vec![RowValues::Int(1)], vec![RowValues::Int(2)]],
    );
    let mut cursor = DebugCursor::new(inner, &log);

    assert_eq!(cursor.description()[0].name, "id");
    assert_eq!(cursor.fetchone().unwrap(), Some(vec![RowValues::Int(1)]));
    assert_eq!(cursor.fetchall().unwrap(), vec![vec![RowValues::Int(2)]]);
    assert!(log.is_empty());
}

#[test]
fn session_cursor_wraps_only_in_debug_mode() {
    let log = QueryLog::new();

    let mut plain = wrap_cursor(MemoryCursor::new(), &log, &CursorOptions::default());
    assert!(!plain.is_debug());
    plain.execute("SELECT 1", &Params::none()).unwrap();
    assert!(log.is_empty());

    let opts = CursorOptions::new().with_debug(true);
    let mut debug = wrap_cursor(MemoryCursor::new(), &log, &opts);
    assert!(debug.is_debug());
    debug.execute("SELECT 1", &Params::none()).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(debug.into_inner().executed().len(), 1);
}
