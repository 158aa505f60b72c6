//! Conversions between the textual form a driver transmits and native values.
//!
//! The parsers accept `Option<&str>` where `None` is SQL NULL. NULL (and, for the date and time
//! family, empty text) decodes to `None` rather than an error.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime};

use crate::error::TypecastError;
use crate::types::{ColumnType, RowValues, TimestampValue, TypedValue};

mod format;
mod parsers;

pub use format::{format_boolean, format_decimal};

use parsers::{find_offset_start, fraction_to_micros, parse_component, split_three};

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|s| !s.is_empty())
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `TypecastError::MalformedValue` if the text does not have three numeric `-`-separated
/// components or names an impossible date.
pub fn parse_date(text: Option<&str>) -> Result<Option<NaiveDate>, TypecastError> {
    let Some(s) = non_empty(text) else {
        return Ok(None);
    };
    decode_date(s).map(Some)
}

fn decode_date(s: &str) -> Result<NaiveDate, TypecastError> {
    const KIND: &str = "date";
    let [y, m, d] = split_three(KIND, s, '-')?;
    let year: i32 = parse_component(KIND, s, y, "year")?;
    let month: u32 = parse_component(KIND, s, m, "month")?;
    let day: u32 = parse_component(KIND, s, d, "day")?;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| TypecastError::malformed(KIND, s, "date out of range"))
}

/// Parse an `HH:MM:SS[.ffffff]` time of day. No timezone is retained.
///
/// # Errors
///
/// Returns `TypecastError::MalformedValue` if the text is not a valid clock time.
pub fn parse_time(text: Option<&str>) -> Result<Option<NaiveTime>, TypecastError> {
    let Some(s) = non_empty(text) else {
        return Ok(None);
    };
    decode_time("time", s).map(Some)
}

fn decode_time(kind: &'static str, s: &str) -> Result<NaiveTime, TypecastError> {
    let [h, m, sec] = split_three(kind, s, ':')?;
    let (whole_seconds, micros) = match sec.split_once('.') {
        Some((whole, fraction)) => (whole, fraction_to_micros(kind, s, fraction)?),
        None => (sec, 0),
    };
    let hour: u32 = parse_component(kind, s, h, "hour")?;
    let minute: u32 = parse_component(kind, s, m, "minute")?;
    let second: u32 = parse_component(kind, s, whole_seconds, "second")?;
    NaiveTime::from_hms_micro_opt(hour, minute, second, micros)
        .ok_or_else(|| TypecastError::malformed(kind, s, "time out of range"))
}

/// Parse `YYYY-MM-DD[ HH:MM:SS[.ffffff][±HH[:MM]]]`.
///
/// Text without a space is a bare date. A trailing UTC offset is accepted and dropped: the
/// result is the wall-clock value as written, never shifted to UTC.
///
/// # Errors
///
/// Returns `TypecastError::MalformedValue` if either the date or the time part is malformed.
pub fn parse_timestamp(text: Option<&str>) -> Result<Option<TimestampValue>, TypecastError> {
    const KIND: &str = "timestamp";
    let Some(s) = non_empty(text) else {
        return Ok(None);
    };
    let Some((date_part, time_and_zone)) = s.split_once(' ') else {
        return decode_date(s).map(|d| Some(TimestampValue::Date(d)));
    };

    let time_part = match find_offset_start(time_and_zone) {
        Some(idx) => {
            let offset = &time_and_zone[idx..];
            tracing::trace!(offset, "dropping UTC offset from timestamp");
            &time_and_zone[..idx]
        }
        None => time_and_zone,
    };

    let date = decode_date(date_part)
        .map_err(|_| TypecastError::malformed(KIND, s, format!("bad date part {date_part:?}")))?;
    let time = decode_time(KIND, time_part)?;
    Ok(Some(TimestampValue::Timestamp(date.and_time(time))))
}

/// Decode a boolean: true iff the first character is `t` or `T`.
///
/// NULL stays `None` and empty text is `false`. Numeric encodings such as `"1"` are `false`
/// under this rule.
#[must_use]
pub fn parse_boolean(text: Option<&str>) -> Option<bool> {
    let s = text?;
    Some(
        s.chars()
            .next()
            .is_some_and(|c| c.to_ascii_lowercase() == 't'),
    )
}

/// Parse an arbitrary-precision fixed-point decimal, keeping the scale as written.
///
/// # Errors
///
/// Returns `TypecastError::NumericParse` if the text is not a decimal literal.
pub fn parse_decimal(text: Option<&str>) -> Result<Option<BigDecimal>, TypecastError> {
    let Some(raw) = text else {
        return Ok(None);
    };
    BigDecimal::from_str(raw.trim())
        .map(Some)
        .map_err(|source| TypecastError::NumericParse {
            value: raw.to_string(),
            source,
        })
}

/// Run the typecast registered for `column_type` over a textual value.
///
/// # Errors
///
/// Propagates the underlying parser's `TypecastError`.
pub fn typecast_text(
    column_type: ColumnType,
    text: Option<&str>,
) -> Result<TypedValue, TypecastError> {
    let value = match column_type {
        ColumnType::Date => parse_date(text)?.map(TypedValue::Date),
        ColumnType::Time => parse_time(text)?.map(TypedValue::Time),
        ColumnType::Timestamp => parse_timestamp(text)?.map(TypedValue::from),
        ColumnType::Boolean => parse_boolean(text).map(TypedValue::Boolean),
        ColumnType::Decimal => parse_decimal(text)?.map(TypedValue::Decimal),
    };
    Ok(value.unwrap_or(TypedValue::Null))
}

/// Typecast a value as returned by a driver.
///
/// Non-text values are rendered to text first, so they follow the same rules as the wire
/// form (`Int(1)` as a boolean is `false`).
///
/// # Errors
///
/// Propagates the underlying parser's `TypecastError`.
pub fn typecast_value(
    column_type: ColumnType,
    value: &RowValues,
) -> Result<TypedValue, TypecastError> {
    match value {
        RowValues::Null => Ok(TypedValue::Null),
        RowValues::Text(s) => typecast_text(column_type, Some(s)),
        other => typecast_text(column_type, Some(other.to_display_text().as_ref())),
    }
}
