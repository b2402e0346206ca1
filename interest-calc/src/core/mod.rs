//! Core components of the interest-calc library
//!
//! This module contains the fundamental building blocks:
//! - [`parse`]: Numeric field parsing with thousands separators
//! - [`engine`]: Time normalization and the simple/compound interest formulas
//! - [`format`]: Grouped, fixed-precision rendering of results
//! - [`limiter`]: Sliding-window admission control per client
//! - [`calculator`]: The entry point that ties the pieces together per request

pub mod calculator;
pub mod engine;
pub mod format;
pub mod limiter;
pub mod parse;

pub use calculator::{
    CalculationRequest, CalculationResponse, CalculationResult, Calculator, FormFields, calculate,
};
pub use engine::{Accrual, Frequency, InterestType, MAX_TIME_YEARS, TimeUnit};
pub use format::{FormatOptions, format_grouped, format_result};
pub use limiter::{
    RateLimitConfig, RateLimitDecision, SlidingWindowLimiter, SlidingWindowLimiterBuilder,
};
pub use parse::parse_number;

use std::error::Error;
use std::fmt;

/// Errors that can occur while handling a calculation request
///
/// Every variant renders (via [`Display`](fmt::Display)) as the message shown
/// to the end user, so callers can forward `err.to_string()` unchanged.
///
/// # Variants
///
/// - [`InvalidNumber`](CalcError::InvalidNumber): A numeric field could not be parsed
/// - [`MissingField`](CalcError::MissingField): A required form field was absent
/// - [`NegativeValue`](CalcError::NegativeValue): Principal, rate or time was below zero
/// - [`TimeTooLarge`](CalcError::TimeTooLarge): A `Years` duration exceeded the ceiling
/// - [`UnknownInterestType`](CalcError::UnknownInterestType): Neither `simple` nor `compound`
/// - [`UnknownFrequency`](CalcError::UnknownFrequency): Unrecognized compounding frequency
/// - [`Overflow`](CalcError::Overflow): The result is not representable as a finite float
/// - [`RateLimited`](CalcError::RateLimited): The client exceeded its request allowance
///
/// # Example
///
/// ```
/// use interest_calc::{CalcError, parse_number};
///
/// match parse_number("12.3.4") {
///     Err(CalcError::InvalidNumber(raw)) => assert_eq!(raw, "12.3.4"),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    /// The field text is not a finite numeric literal
    InvalidNumber(String),
    /// A required form field was not supplied
    MissingField(&'static str),
    /// Principal, rate or time was negative
    NegativeValue,
    /// Time expressed in years exceeded the allowed maximum
    TimeTooLarge { max_years: f64 },
    /// Interest type was not `simple` or `compound`
    UnknownInterestType,
    /// Compounding frequency label was not recognized
    UnknownFrequency,
    /// The computation left the representable floating-point range
    Overflow,
    /// The client has used up its allowance for the current window
    RateLimited,
}

impl CalcError {
    /// Whether this error is an admission denial rather than a computation failure
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, CalcError::RateLimited)
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::InvalidNumber(_) => write!(f, "Please enter valid numeric values."),
            CalcError::MissingField(name) => write!(f, "Missing required field: '{name}'"),
            CalcError::NegativeValue => write!(f, "Negative values are not allowed."),
            CalcError::TimeTooLarge { max_years } => {
                write!(f, "Time period is too long (max {max_years} years).")
            }
            CalcError::UnknownInterestType => write!(f, "Please select an interest type."),
            CalcError::UnknownFrequency => {
                write!(f, "Please select a valid compounding frequency.")
            }
            CalcError::Overflow => write!(f, "Result too large to calculate."),
            CalcError::RateLimited => write!(f, "Too many requests. Please try again later."),
        }
    }
}

impl Error for CalcError {}
