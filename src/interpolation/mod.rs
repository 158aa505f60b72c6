use std::borrow::Cow;
use std::collections::BTreeMap;

mod scanner;

use scanner::{Directive, scan_directive};

use crate::types::Params;

/// Parameter values reduced to their text-safe display form.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedParams<'a> {
    Positional(Vec<Cow<'a, str>>),
    Named(BTreeMap<&'a str, Cow<'a, str>>),
}

/// Normalize every parameter to display text. Strings pass through unchanged.
#[must_use]
pub fn normalize_params(params: &Params) -> NormalizedParams<'_> {
    match params {
        Params::Positional(values) => {
            NormalizedParams::Positional(values.iter().map(|v| v.to_display_text()).collect())
        }
        Params::Named(map) => NormalizedParams::Named(
            map.iter()
                .map(|(k, v)| (k.as_str(), v.to_display_text()))
                .collect(),
        ),
    }
}

/// Substitute `%s` / `%(name)s` placeholders with parameter text, for display only.
///
/// `%%` renders as `%`. A placeholder that cannot be satisfied (too few positional values, an
/// unknown name, or a style that does not match the parameters) is left as written. The result
/// is never executed; quoting is not applied.
/// ```rust
/// use sql_marshal::prelude::*;
///
/// let params = Params::from(vec![RowValues::Int(7)]);
/// let shown = interpolate_params("SELECT * FROM t WHERE id = %s", &params);
/// assert_eq!(shown, "SELECT * FROM t WHERE id = 7");
/// ```
/// Returns a borrowed `Cow` when the text has no directives.
#[must_use]
pub fn interpolate_params<'a>(sql: &'a str, params: &Params) -> Cow<'a, str> {
    let normalized = normalize_params(params);
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut idx = 0;
    let mut next_positional = 0;
    let mut unresolved = 0usize;

    while let Some(offset) = sql[idx..].find('%') {
        let start = idx + offset;
        let Some((directive, end)) = scan_directive(sql, start) else {
            idx = start + 1;
            continue;
        };

        let replacement: Option<&str> = match (directive, &normalized) {
            (Directive::Escape, _) => Some("%"),
            (Directive::Positional, NormalizedParams::Positional(values)) => {
                let value = values.get(next_positional).map(AsRef::as_ref);
                next_positional += 1;
                value
            }
            (Directive::Named(name), NormalizedParams::Named(map)) => {
                map.get(name).map(AsRef::as_ref)
            }
            _ => None,
        };

        match replacement {
            Some(text) => {
                let buf = out.get_or_insert_with(|| String::with_capacity(sql.len()));
                buf.push_str(&sql[copied..start]);
                buf.push_str(text);
                copied = end;
            }
            None => unresolved += 1,
        }
        idx = end;
    }

    if unresolved > 0 {
        tracing::warn!(
            unresolved,
            "query log: placeholders without a matching parameter were left as written"
        );
    }
    if let NormalizedParams::Positional(values) = &normalized
        && next_positional < values.len()
    {
        tracing::warn!(
            unused = values.len() - next_positional,
            "query log: more parameters than placeholders"
        );
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&sql[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(sql),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RowValues;

    #[test]
    fn substitutes_positional() {
        let params = Params::from(vec![RowValues::Int(7), RowValues::Text("bob".into())]);
        let res = interpolate_params("select * from t where id = %s and name = %s", &params);
        assert_eq!(res, "select * from t where id = 7 and name = bob");
    }

    #[test]
    fn substitutes_named() {
        let params = Params::named([("id", RowValues::Int(3))]);
        let res = interpolate_params("select * from t where id = %(id)s", &params);
        assert_eq!(res, "select * from t where id = 3");
    }

    #[test]
    fn escapes_and_untouched_text() {
        let res = interpolate_params("select '100%%' as pct", &Params::none());
        assert_eq!(res, "select '100%' as pct");

        let res = interpolate_params("select 1", &Params::none());
        assert!(matches!(res, Cow::Borrowed(_)));
    }

    #[test]
    fn leaves_unresolved_placeholders() {
        let res = interpolate_params("a = %s and b = %s", &Params::from(vec![RowValues::Int(1)]));
        assert_eq!(res, "a = 1 and b = %s");

        let res = interpolate_params("a = %(missing)s", &Params::named([("id", RowValues::Int(1))]));
        assert_eq!(res, "a = %(missing)s");

        let res = interpolate_params("a = %s", &Params::named([("id", RowValues::Int(1))]));
        assert_eq!(res, "a = %s");
    }

    #[test]
    fn keeps_multibyte_text_intact() {
        let params = Params::from(vec![RowValues::Text("café".into())]);
        let res = interpolate_params("select 'ü' || %s", &params);
        assert_eq!(res, "select 'ü' || café");
    }
}
