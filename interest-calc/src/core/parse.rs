//! Numeric field parsing
//!
//! Form fields arrive as text and may carry thousands separators
//! (`"1,234.56"`). [`parse_number`] strips them and produces a finite `f64`.

use super::CalcError;

/// Thousands separator accepted (and ignored) in numeric fields
const THOUSANDS_SEPARATOR: char = ',';

/// Parse a numeric form field, ignoring thousands separators
///
/// Surrounding whitespace is ignored. The sign is preserved so that
/// callers can report negative values separately.
///
/// # Errors
///
/// Returns [`CalcError::InvalidNumber`] if the cleaned text is empty, not a
/// numeric literal (e.g. `"abc"`, `"1.2.3"`), or names a non-finite value
/// such as `"inf"` or `"NaN"`.
///
/// # Example
///
/// ```
/// use interest_calc::parse_number;
///
/// assert_eq!(parse_number("1,234.56").unwrap(), 1234.56);
/// assert!(parse_number("").is_err());
/// ```
pub fn parse_number(raw: &str) -> Result<f64, CalcError> {
    let cleaned: String = raw.chars().filter(|&c| c != THOUSANDS_SEPARATOR).collect();

    match cleaned.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::InvalidNumber(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_grouped_numbers() {
        assert_eq!(parse_number("1000").unwrap(), 1000.0);
        assert_eq!(parse_number("1,234.56").unwrap(), 1234.56);
        assert_eq!(parse_number("1,000,000").unwrap(), 1_000_000.0);
        assert_eq!(parse_number("0.5").unwrap(), 0.5);
        assert_eq!(parse_number("  42 ").unwrap(), 42.0);
    }

    #[test]
    fn test_sign_is_kept() {
        assert_eq!(parse_number("-5").unwrap(), -5.0);
    }

    #[test]
    fn test_invalid_literals() {
        for raw in ["", "   ", "abc", "1.2.3", "12abc", ",", "--1"] {
            assert_eq!(
                parse_number(raw),
                Err(CalcError::InvalidNumber(raw.to_string())),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_non_finite_values_rejected() {
        for raw in ["inf", "-inf", "infinity", "NaN"] {
            assert!(parse_number(raw).is_err(), "{raw:?} should be rejected");
        }
    }
}
