use crate::error::TypecastError;

const MICROS_DIGITS: usize = 6;

pub(super) fn parse_component<T: std::str::FromStr>(
    kind: &'static str,
    whole: &str,
    part: &str,
    label: &str,
) -> Result<T, TypecastError> {
    part.parse::<T>()
        .map_err(|_| TypecastError::malformed(kind, whole, format!("non-numeric {label} {part:?}")))
}

/// Split `text` on `sep` into exactly three parts.
pub(super) fn split_three<'a>(
    kind: &'static str,
    text: &'a str,
    sep: char,
) -> Result<[&'a str; 3], TypecastError> {
    let mut parts = text.split(sep);
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), Some(c), None) => Ok([a, b, c]),
        _ => Err(TypecastError::malformed(
            kind,
            text,
            format!("expected three {sep:?}-separated components"),
        )),
    }
}

/// Read the digits after the decimal point as a fraction of a second in microseconds.
///
/// Digits past the sixth are truncated; fewer than six are right-padded with zeros.
pub(super) fn fraction_to_micros(
    kind: &'static str,
    whole: &str,
    digits: &str,
) -> Result<u32, TypecastError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TypecastError::malformed(
            kind,
            whole,
            format!("invalid fractional seconds {digits:?}"),
        ));
    }

    let mut micros = 0u32;
    let mut bytes = digits.bytes();
    for _ in 0..MICROS_DIGITS {
        let digit = bytes.next().map_or(0, |b| u32::from(b - b'0'));
        micros = micros * 10 + digit;
    }
    Ok(micros)
}

/// Index of the character that starts a UTC offset (`+` or `-`) in a time string.
pub(super) fn find_offset_start(time_and_zone: &str) -> Option<usize> {
    time_and_zone.find(['-', '+'])
}
