//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::config::CursorOptions;
pub use crate::cursor::{ColumnDescription, Cursor, SessionCursor, wrap_cursor};
pub use crate::debug_cursor::DebugCursor;
pub use crate::error::TypecastError;
pub use crate::interpolation::interpolate_params;
pub use crate::query_log::{QueryLog, QueryLogEntry, QueryLogSink};
pub use crate::results::{
    Record, Records, fetch_all_as_records, fetch_many_as_records, fetch_one_as_record,
    row_to_record,
};
pub use crate::typecast::{
    format_boolean, format_decimal, parse_boolean, parse_date, parse_decimal, parse_time,
    parse_timestamp, typecast_text, typecast_value,
};
pub use crate::types::{ColumnType, Params, RowValues, TimestampValue, TypedValue};
