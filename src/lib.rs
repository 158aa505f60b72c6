//! Marshalling between the textual values a database driver speaks and native Rust values.
//!
//! - [`typecast`]: parse dates, times, timestamps, booleans and decimals out of driver text,
//!   and render booleans and decimals back.
//! - [`DebugCursor`]: a cursor proxy that appends every executed statement, with its duration,
//!   to a session's [`QueryLog`].
//! - [`results`]: turn positional rows into [`Record`]s keyed by column name.
//!
//! ```rust
//! use sql_marshal::prelude::*;
//!
//! let active = parse_boolean(Some("true"));
//! assert_eq!(active, Some(true));
//! let price = parse_decimal(Some("3.50"))?;
//! assert_eq!(format_decimal(price.as_ref()).as_deref(), Some("3.50"));
//! # Ok::<(), TypecastError>(())
//! ```

pub mod prelude;

pub mod config;
pub mod cursor;
pub mod debug_cursor;
pub mod error;
pub mod interpolation;
pub mod query_log;
pub mod results;
pub mod typecast;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use config::CursorOptions;
pub use cursor::{ColumnDescription, Cursor, SessionCursor, wrap_cursor};
pub use debug_cursor::DebugCursor;
pub use error::TypecastError;
pub use query_log::{QueryLog, QueryLogEntry, QueryLogSink};
pub use results::{
    Record, Records, fetch_all_as_records, fetch_many_as_records, fetch_one_as_record,
    row_to_record,
};
pub use types::{ColumnType, Params, RowValues, TimestampValue, TypedValue};
