use thiserror::Error;

/// Errors raised while converting a textual database value into a native value.
///
/// NULL and empty input are never errors; they decode to `None` (or `false` for booleans).
#[derive(Debug, Error)]
pub enum TypecastError {
    /// The text does not follow the date/time/timestamp grammar, or names an impossible
    /// calendar date or clock time.
    #[error("Malformed {kind} value {value:?}: {reason}")]
    MalformedValue {
        kind: &'static str,
        value: String,
        reason: String,
    },

    /// The text is not a valid decimal literal.
    #[error("Numeric parse error for {value:?}: {source}")]
    NumericParse {
        value: String,
        #[source]
        source: bigdecimal::ParseBigDecimalError,
    },
}

impl TypecastError {
    pub(crate) fn malformed(kind: &'static str, value: &str, reason: impl Into<String>) -> Self {
        TypecastError::MalformedValue {
            kind,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
