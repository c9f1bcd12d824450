//! Numeric normalization for prices and month counts.
//!
//! Catalog sheets are typed by hand, so a price may read `15.990`,
//! `15990,5`, `$ 9.990,50`, `No aplica` or be blank. Everything is mapped to
//! a [`CellValue`] and nothing here ever fails.

use tarifa_model::CellValue;

/// Markers meaning "this plan has no such value" (compared lowercase).
pub const NOT_APPLICABLE_TOKENS: [&str; 5] = ["no aplica", "noaplica", "n/a", "na", "-"];

/// Normalizes a raw cell.
///
/// - blank or a [`NOT_APPLICABLE_TOKENS`] marker: `Empty`
/// - the first run of an optional `-`, a digit, then digits/`.`/`,` is parsed
///   with the separator rules below; `integer` floors the result
/// - unparseable: the trimmed text when `allow_text`, else `Empty`
///
/// Separators: with both `.` and `,` present, dots are thousands separators
/// and the first comma is the decimal mark; a lone comma is the decimal mark;
/// several dots without a comma are all thousands separators.
pub fn normalize_number(raw: &str, integer: bool, allow_text: bool) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    let lowered = trimmed.to_lowercase();
    if NOT_APPLICABLE_TOKENS.contains(&lowered.as_str()) {
        return CellValue::Empty;
    }

    if let Some(candidate) = first_numeric_run(trimmed) {
        let numeric = disambiguate_separators(candidate);
        if let Ok(value) = numeric.parse::<f64>()
            && value.is_finite()
        {
            return CellValue::Number(if integer { value.floor() } else { value });
        }
    }

    if allow_text {
        CellValue::Text(trimmed.to_string())
    } else {
        CellValue::Empty
    }
}

/// Re-normalizes an already normalized value. Numbers pass through (floored
/// in integer mode), text is normalized again.
pub fn renormalize(value: &CellValue, integer: bool, allow_text: bool) -> CellValue {
    match value {
        CellValue::Empty => CellValue::Empty,
        CellValue::Number(number) => CellValue::Number(if integer { number.floor() } else { *number }),
        CellValue::Text(text) => normalize_number(text, integer, allow_text),
    }
}

fn first_numeric_run(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut start = None;
    for idx in 0..bytes.len() {
        if bytes[idx].is_ascii_digit() {
            start = Some(idx);
            break;
        }
        if bytes[idx] == b'-' && bytes.get(idx + 1).is_some_and(u8::is_ascii_digit) {
            start = Some(idx);
            break;
        }
    }
    let start = start?;
    let mut end = start + 1;
    while end < bytes.len() && matches!(bytes[end], b'0'..=b'9' | b'.' | b',') {
        end += 1;
    }
    Some(&text[start..end])
}

fn disambiguate_separators(candidate: &str) -> String {
    let has_dot = candidate.contains('.');
    let has_comma = candidate.contains(',');
    if has_dot && has_comma {
        candidate.replace('.', "").replacen(',', ".", 1)
    } else if has_comma {
        candidate.replacen(',', ".", 1)
    } else if candidate.matches('.').count() > 1 {
        candidate.replace('.', "")
    } else {
        candidate.to_string()
    }
}
