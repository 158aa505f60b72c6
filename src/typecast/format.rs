use bigdecimal::BigDecimal;

/// Render a boolean the way the textual drivers store it: `"1"` or `"0"`.
///
/// `None` collapses to `"0"`; NULL is not preserved in this direction.
#[must_use]
pub fn format_boolean(value: Option<bool>) -> &'static str {
    if value.unwrap_or(false) { "1" } else { "0" }
}

/// Render a decimal in its canonical form, keeping the stored scale. `None` stays NULL.
#[must_use]
pub fn format_decimal(value: Option<&BigDecimal>) -> Option<String> {
    value.map(BigDecimal::to_string)
}
