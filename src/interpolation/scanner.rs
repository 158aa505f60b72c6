/// A `%` directive found in statement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Directive<'a> {
    /// `%%`
    Escape,
    /// `%s`
    Positional,
    /// `%(name)s`
    Named(&'a str),
}

/// Recognise the directive starting at `idx` (which must hold `%`).
///
/// Returns the directive and the index one past its end.
pub(super) fn scan_directive(sql: &str, idx: usize) -> Option<(Directive<'_>, usize)> {
    let bytes = sql.as_bytes();
    match bytes.get(idx + 1)? {
        b'%' => Some((Directive::Escape, idx + 2)),
        b's' => Some((Directive::Positional, idx + 2)),
        b'(' => {
            let name_start = idx + 2;
            let close = name_start + sql.get(name_start..)?.find(')')?;
            if bytes.get(close + 1) != Some(&b's') {
                return None;
            }
            Some((Directive::Named(&sql[name_start..close]), close + 2))
        }
        _ => None,
    }
}
