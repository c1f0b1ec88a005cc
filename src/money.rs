// 💵 Money Input - Sanitizer + Validator for the compensation field
// Keeps a free-text field a well-formed partial amount while the user types,
// then re-checks the stored text at submit time.
//
// Shared by the create form and the edit form. Both functions are pure.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// LIMITS
// ============================================================================

/// Maximum digits before the decimal separator
pub const MAX_INTEGER_DIGITS: usize = 8;

/// Maximum digits after the decimal separator
pub const MAX_FRACTION_DIGITS: usize = 2;

/// Maximum total length of the amount text ("12345678.99" is 11)
pub const MAX_AMOUNT_LEN: usize = 12;

pub const SEPARATOR: char = '.';

// ============================================================================
// SANITIZER
// ============================================================================

/// Normalize a proposed field value.
///
/// Called on every edit event with the field's current value and the raw
/// text the edit would produce. Returns the new field value, which is
/// `previous` unchanged when the edit is rejected.
///
/// Low-order overflow (a third fraction digit) is truncated. High-order
/// overflow (a ninth integer digit, or an over-long text) rejects the
/// whole edit.
pub fn sanitize(previous: &str, raw: &str) -> String {
    normalize(raw).unwrap_or_else(|| previous.to_string())
}

/// The value `raw` normalizes to, or `None` when the edit hits a hard stop.
///
/// `None` is the only rejection signal: a truncated or stripped edit can
/// still come out equal to the previous value.
pub fn normalize(raw: &str) -> Option<String> {
    // 1. Keep digits and separators only
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == SEPARATOR)
        .collect();

    // 2. First separator wins, later fragments are merged into the fraction
    let collapsed = collapse_separators(&stripped);

    // 3. Truncate the fraction
    let (integer, fraction) = split_amount(&collapsed);
    let value = match fraction {
        Some(fraction) if fraction.len() > MAX_FRACTION_DIGITS => {
            format!("{}{}{}", integer, SEPARATOR, &fraction[..MAX_FRACTION_DIGITS])
        }
        _ => collapsed.clone(),
    };

    // 4. Integer digit overflow is a hard stop
    if count_digits(integer) > MAX_INTEGER_DIGITS {
        return None;
    }

    // 5. So is total length
    if value.len() > MAX_AMOUNT_LEN {
        return None;
    }

    Some(value)
}

/// `"1.2.3"` → `"1.23"`. Text with zero or one separator is returned as is.
fn collapse_separators(text: &str) -> String {
    let mut parts = text.split(SEPARATOR);
    let head = parts.next().unwrap_or_default();
    let tail: Vec<&str> = parts.collect();

    if tail.len() > 1 {
        format!("{}{}{}", head, SEPARATOR, tail.concat())
    } else {
        text.to_string()
    }
}

/// Split at the first separator into (integer fragment, fraction fragment).
fn split_amount(text: &str) -> (&str, Option<&str>) {
    match text.split_once(SEPARATOR) {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text, None),
    }
}

fn count_digits(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_digit()).count()
}

/// True when `text` satisfies every invariant the sanitizer maintains:
/// digits plus at most one separator, ≤8 integer digits, ≤2 fraction digits,
/// ≤12 characters.
pub fn is_well_formed(text: &str) -> bool {
    if text.len() > MAX_AMOUNT_LEN {
        return false;
    }
    if !text.chars().all(|c| c.is_ascii_digit() || c == SEPARATOR) {
        return false;
    }
    if text.matches(SEPARATOR).count() > 1 {
        return false;
    }

    let (integer, fraction) = split_amount(text);
    integer.len() <= MAX_INTEGER_DIGITS
        && fraction.map_or(true, |f| f.len() <= MAX_FRACTION_DIGITS)
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Why a submitted amount was refused. Exactly one reason is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    TooLong,
    NotANumber,
    TooManyIntegerDigits,
    TooManyFractionDigits,
}

impl RejectReason {
    /// Inline message shown next to the compensation field
    pub fn message(&self) -> &'static str {
        match self {
            RejectReason::TooLong => "Compensation value is too large",
            RejectReason::NotANumber => "Please enter a valid compensation number",
            RejectReason::TooManyIntegerDigits => {
                "Compensation cannot exceed 8 digits before decimal point"
            }
            RejectReason::TooManyFractionDigits => "Compensation can have maximum 2 decimal places",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationOutcome {
    Accepted(f64),
    Rejected(RejectReason),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted(_))
    }
}

/// Authoritative submit-time check.
///
/// Re-derives every constraint from `text` itself; the text may never have
/// passed through [`sanitize`] (e.g. a value loaded from the server).
/// Checks run in a fixed order and the first failure wins.
pub fn validate(text: &str) -> ValidationOutcome {
    if text.chars().count() > MAX_AMOUNT_LEN {
        return ValidationOutcome::Rejected(RejectReason::TooLong);
    }

    let value = match parse_decimal(text) {
        Some(value) => value,
        None => return ValidationOutcome::Rejected(RejectReason::NotANumber),
    };

    let (integer, fraction) = split_amount(text);

    if count_digits(integer) > MAX_INTEGER_DIGITS {
        return ValidationOutcome::Rejected(RejectReason::TooManyIntegerDigits);
    }

    if fraction.map_or(false, |f| f.len() > MAX_FRACTION_DIGITS) {
        return ValidationOutcome::Rejected(RejectReason::TooManyFractionDigits);
    }

    ValidationOutcome::Accepted(value)
}

/// Plain non-negative decimal: `digits`, `digits.digits`, `.digits` or
/// `digits.`, with at least one digit. No sign, exponent or whitespace.
fn parse_decimal(text: &str) -> Option<f64> {
    let (integer, fraction) = split_amount(text);
    let fraction = fraction.unwrap_or("");

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(integer) || !all_digits(fraction) {
        return None;
    }
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let integer = if integer.is_empty() { "0" } else { integer };
    let fraction = if fraction.is_empty() { "0" } else { fraction };

    format!("{}.{}", integer, fraction)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_plain_digits() {
        assert_eq!(sanitize("", "12345"), "12345");
        assert_eq!(sanitize("", "12345.67"), "12345.67");
    }

    #[test]
    fn test_sanitize_strips_foreign_characters() {
        assert_eq!(sanitize("", "$1,234.5"), "1234.5");
        assert_eq!(sanitize("", "abc"), "");
        assert_eq!(sanitize("", " 4 2 "), "42");
    }

    #[test]
    fn test_sanitize_truncates_fraction() {
        assert_eq!(sanitize("", "1.2345"), "1.23");
        assert_eq!(sanitize("1.23", "1.234"), "1.23");
    }

    #[test]
    fn test_sanitize_collapses_separators() {
        assert_eq!(sanitize("", "1.2.3"), "1.23");
        assert_eq!(sanitize("", "1.2.3.4"), "1.23");
        assert_eq!(sanitize("", "1..5"), "1.5");
    }

    #[test]
    fn test_sanitize_lone_separator_is_valid_intermediate() {
        assert_eq!(sanitize("", "."), ".");
        assert_eq!(sanitize("", ".5"), ".5");
        assert_eq!(sanitize("", "5."), "5.");
    }

    #[test]
    fn test_sanitize_rejects_ninth_integer_digit() {
        assert_eq!(sanitize("12345678", "123456789"), "12345678");
        assert_eq!(sanitize("1.5", "123456789.5"), "1.5");
    }

    #[test]
    fn test_sanitize_integer_cap_applies_after_collapse() {
        // letters stripped, then "12345.678.9" collapses: integer is 5 digits
        assert_eq!(sanitize("", "12a345.678.9"), "12345.67");
        // paste with 9 integer digits around letters is rejected
        assert_eq!(sanitize("7", "1x2x3x4x5x6x7x8x9.1.2"), "7");
    }

    #[test]
    fn test_normalize_separates_truncation_from_rejection() {
        // same text as a stored "1500.00", but the edit was taken
        assert_eq!(normalize("1500.009"), Some("1500.00".to_string()));
        assert_eq!(normalize("$1500.00"), Some("1500.00".to_string()));
        assert_eq!(normalize("123456789"), None);
    }

    #[test]
    fn test_sanitize_max_width_accepted() {
        assert_eq!(sanitize("", "12345678.99"), "12345678.99");
    }

    #[test]
    fn test_sanitize_empty_input() {
        assert_eq!(sanitize("12", ""), "");
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed(""));
        assert!(is_well_formed("."));
        assert!(is_well_formed("12345678.99"));
        assert!(!is_well_formed("123456789"));
        assert!(!is_well_formed("1.234"));
        assert!(!is_well_formed("1.2.3"));
        assert!(!is_well_formed("1a"));
    }

    #[test]
    fn test_validate_accepts_boundary() {
        assert_eq!(validate("12345678.99"), ValidationOutcome::Accepted(12345678.99));
        assert_eq!(validate("0"), ValidationOutcome::Accepted(0.0));
        assert_eq!(validate(".5"), ValidationOutcome::Accepted(0.5));
        assert_eq!(validate("7."), ValidationOutcome::Accepted(7.0));
    }

    #[test]
    fn test_validate_rejections() {
        assert_eq!(
            validate("123456789"),
            ValidationOutcome::Rejected(RejectReason::TooManyIntegerDigits)
        );
        assert_eq!(
            validate("1.999"),
            ValidationOutcome::Rejected(RejectReason::TooManyFractionDigits)
        );
        assert_eq!(validate("."), ValidationOutcome::Rejected(RejectReason::NotANumber));
        assert_eq!(validate(""), ValidationOutcome::Rejected(RejectReason::NotANumber));
        assert_eq!(validate("abc"), ValidationOutcome::Rejected(RejectReason::NotANumber));
        assert_eq!(validate("1e5"), ValidationOutcome::Rejected(RejectReason::NotANumber));
        assert_eq!(validate("-5"), ValidationOutcome::Rejected(RejectReason::NotANumber));
    }

    #[test]
    fn test_validate_too_long_wins_over_not_a_number() {
        assert_eq!(
            validate("not-a-number-at-all"),
            ValidationOutcome::Rejected(RejectReason::TooLong)
        );
        assert_eq!(
            validate("1234567890123"),
            ValidationOutcome::Rejected(RejectReason::TooLong)
        );
    }

    #[test]
    fn test_validate_integer_digits_before_fraction_digits() {
        assert_eq!(
            validate("123456789.123"),
            ValidationOutcome::Rejected(RejectReason::TooLong)
        );
        assert_eq!(
            validate("123456789.12"),
            ValidationOutcome::Rejected(RejectReason::TooManyIntegerDigits)
        );
    }

    #[test]
    fn test_reject_reason_messages() {
        assert_eq!(
            RejectReason::TooManyFractionDigits.to_string(),
            "Compensation can have maximum 2 decimal places"
        );
        assert!(!ValidationOutcome::Rejected(RejectReason::TooLong).is_accepted());
    }
}
