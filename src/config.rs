use serde::Deserialize;

/// Options controlling how a session hands out cursors.
///
/// Deserializable so it can sit inside an application's own settings file:
/// ```rust
/// use sql_marshal::prelude::*;
///
/// let opts: CursorOptions = serde_json::from_str(r#"{"debug": true}"#).unwrap();
/// assert!(opts.debug);
/// let opts = CursorOptions::default().with_debug(false);
/// assert!(!opts.debug);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CursorOptions {
    /// Wrap cursors in a `DebugCursor` that records every statement in the session's query log.
    pub debug: bool,
}

impl CursorOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let opts: CursorOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, CursorOptions::new());
        assert!(!opts.debug);
    }
}
