//! Phone number normalization.
//!
//! Contact phone numbers are stored in the canonical display format
//! `+1 (XXX) XXX-XXXX`. Normalization is total: inputs that cannot be
//! recognized are returned unchanged and rejected later by validation.

/// Normalizes a raw phone string to the canonical format.
///
/// Strips every non-digit character; a 10-digit remainder is formatted
/// directly, an 11-digit remainder with a leading `1` drops the country
/// digit first. Any other digit count returns the input as-is.
pub fn normalize(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        10 => format_digits(&digits),
        11 if digits.starts_with('1') => format_digits(&digits[1..]),
        _ => raw.to_string(),
    }
}

fn format_digits(digits: &str) -> String {
    format!(
        "+1 ({}) {}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..10]
    )
}
