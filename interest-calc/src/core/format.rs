//! Result formatting
//!
//! Renders calculation results as human-readable text, e.g.
//!
//! ```text
//! Compound Interest: 102.50 INR
//! Total Amount: 1,102.50 INR
//! ```
//!
//! Amounts are grouped in thousands and shown with two decimals.

use super::InterestType;

/// Default currency label appended to every amount
pub const DEFAULT_CURRENCY: &str = "INR";

/// Presentation options for [`format_result`]
///
/// The library default separates the two result lines with `"\n"`;
/// [`FormatOptions::html`] uses `"<br>"` for responses that are injected
/// into a web page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Text placed between the interest line and the total line
    pub line_break: String,
    /// Currency label appended to each amount
    pub currency: String,
    /// Separator between groups of three integer digits
    pub separator: char,
    /// Digits after the decimal point
    pub precision: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            line_break: "\n".to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            separator: ',',
            precision: 2,
        }
    }
}

impl FormatOptions {
    /// Options for HTML output (`<br>` between lines)
    pub fn html() -> Self {
        Self {
            line_break: "<br>".to_string(),
            ..Self::default()
        }
    }
}

/// Format a number with grouped thousands and a fixed number of decimals
///
/// Non-finite values are rendered as-is (`inf`, `NaN`); callers are expected
/// to reject them before presentation.
///
/// # Example
///
/// ```
/// use interest_calc::format_grouped;
///
/// assert_eq!(format_grouped(1234567.891, ',', 2), "1,234,567.89");
/// assert_eq!(format_grouped(-1000.0, ' ', 0), "-1 000");
/// ```
pub fn format_grouped(value: f64, separator: char, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", precision, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    // Drop the sign when rounding produced zero (no "-0.00")
    if value < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        out.push('-');
    }

    let lead = integer.len() % 3;
    for (i, digit) in integer.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(separator);
        }
        out.push(digit);
    }

    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }

    out
}

/// Render a result as two lines: the interest and the total amount
///
/// The heading comes from the closed set of [`InterestType`] labels, never
/// from request text, so the output is safe to embed in a page.
///
/// # Example
///
/// ```
/// use interest_calc::{FormatOptions, InterestType, format_result};
///
/// let text = format_result(InterestType::Simple, 100.0, 1100.0, &FormatOptions::default());
/// assert_eq!(text, "Simple Interest: 100.00 INR\nTotal Amount: 1,100.00 INR");
/// ```
pub fn format_result(
    interest_type: InterestType,
    interest: f64,
    total: f64,
    options: &FormatOptions,
) -> String {
    let currency = &options.currency;
    format!(
        "{}: {} {currency}{}Total Amount: {} {currency}",
        interest_type.label(),
        format_grouped(interest, options.separator, options.precision),
        options.line_break,
        format_grouped(total, options.separator, options.precision),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping() {
        assert_eq!(format_grouped(0.0, ',', 2), "0.00");
        assert_eq!(format_grouped(999.0, ',', 2), "999.00");
        assert_eq!(format_grouped(1000.0, ',', 2), "1,000.00");
        assert_eq!(format_grouped(12345.678, ',', 2), "12,345.68");
        assert_eq!(format_grouped(123456.0, ',', 2), "123,456.00");
        assert_eq!(format_grouped(1234567.0, ',', 0), "1,234,567");
    }

    #[test]
    fn test_rounding_carries_into_integer_part() {
        assert_eq!(format_grouped(999.999, ',', 2), "1,000.00");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(format_grouped(-1234.5, ',', 2), "-1,234.50");
        assert_eq!(format_grouped(-0.001, ',', 2), "0.00");
    }

    #[test]
    fn test_custom_separator_and_precision() {
        assert_eq!(format_grouped(1234567.5, '.', 1), "1.234.567.5");
        assert_eq!(format_grouped(1234.5678, '_', 3), "1_234.568");
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert_eq!(format_grouped(f64::INFINITY, ',', 2), "inf");
        assert_eq!(format_grouped(f64::NAN, ',', 2), "NaN");
    }

    #[test]
    fn test_format_result_lines() {
        let text = format_result(
            InterestType::Compound,
            102.5,
            1102.5,
            &FormatOptions::default(),
        );
        assert_eq!(
            text,
            "Compound Interest: 102.50 INR\nTotal Amount: 1,102.50 INR"
        );

        let html = format_result(InterestType::Simple, 100.0, 1100.0, &FormatOptions::html());
        assert_eq!(
            html,
            "Simple Interest: 100.00 INR<br>Total Amount: 1,100.00 INR"
        );
    }
}
