//! Request-level entry point
//!
//! [`Calculator`] is what a hosting layer talks to: it takes the raw form
//! fields of one request together with a client identifier and the current
//! time, applies the rate limit, validates the fields and returns either the
//! formatted result or a user-facing error.
//!
//! Validation follows a fixed order so that the first problem reported is
//! predictable:
//!
//! 1. `principal`, `rate` and `time` are read and parsed, in that order
//! 2. `time_unit` and `interest_type` must be present
//! 3. no value may be negative
//! 4. a duration in `Years` may not exceed [`MAX_TIME_YEARS`]
//! 5. `interest_type` must be `simple` or `compound`
//! 6. for compound interest, `frequency` (default `Annually`) must be known

use super::engine::{self, Accrual, MAX_TIME_YEARS};
use super::{
    CalcError, FormatOptions, InterestType, SlidingWindowLimiter, TimeUnit, format_result,
    parse_number,
};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::time::{Duration, SystemTime};

/// Frequency used when the form does not carry one
pub const DEFAULT_FREQUENCY: &str = "Annually";

/// Read access to submitted form fields
///
/// Implemented for string maps and for slices/arrays of `(name, value)`
/// pairs, so both decoded HTTP forms and literal fixtures can be passed in.
pub trait FormFields {
    /// Value of the field called `name`, if submitted
    fn field(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> FormFields for HashMap<String, String, S> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FormFields for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<'a> FormFields for [(&'a str, &'a str)] {
    fn field(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

impl<'a, const N: usize> FormFields for [(&'a str, &'a str); N] {
    fn field(&self, name: &str) -> Option<&str> {
        self.as_slice().field(name)
    }
}

fn required<'f, F: FormFields + ?Sized>(
    fields: &'f F,
    name: &'static str,
) -> Result<&'f str, CalcError> {
    fields.field(name).ok_or(CalcError::MissingField(name))
}

fn required_number<F: FormFields + ?Sized>(
    fields: &F,
    name: &'static str,
) -> Result<f64, CalcError> {
    parse_number(required(fields, name)?)
}

/// A validated calculation request
///
/// The time unit and frequency keep their submitted labels: an unknown time
/// unit is read as years, and the frequency is only checked when compound
/// interest is requested.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    /// Initial amount
    pub principal: f64,
    /// Annual rate in percent
    pub rate: f64,
    /// Duration in `time_unit`s
    pub time_value: f64,
    /// Label of the unit `time_value` is expressed in
    pub time_unit: String,
    /// Simple or compound
    pub interest_type: InterestType,
    /// Compounding frequency label
    pub frequency: String,
}

impl CalculationRequest {
    /// Parse and validate a request from form fields
    ///
    /// # Errors
    ///
    /// - [`CalcError::MissingField`]: a required field is absent
    /// - [`CalcError::InvalidNumber`]: a numeric field does not parse
    /// - [`CalcError::NegativeValue`]: principal, rate or time is below zero
    /// - [`CalcError::TimeTooLarge`]: more than [`MAX_TIME_YEARS`] `Years`
    /// - [`CalcError::UnknownInterestType`]: not `simple` or `compound`
    pub fn from_fields<F: FormFields + ?Sized>(fields: &F) -> Result<Self, CalcError> {
        let principal = required_number(fields, "principal")?;
        let rate = required_number(fields, "rate")?;
        let time_value = required_number(fields, "time")?;
        let time_unit = required(fields, "time_unit")?;
        let interest_type = required(fields, "interest_type")?;
        let frequency = fields.field("frequency").unwrap_or(DEFAULT_FREQUENCY);

        if principal < 0.0 || rate < 0.0 || time_value < 0.0 {
            return Err(CalcError::NegativeValue);
        }

        if time_value > MAX_TIME_YEARS && time_unit.parse::<TimeUnit>() == Ok(TimeUnit::Years) {
            return Err(CalcError::TimeTooLarge {
                max_years: MAX_TIME_YEARS,
            });
        }

        Ok(CalculationRequest {
            principal,
            rate,
            time_value,
            time_unit: time_unit.to_string(),
            interest_type: interest_type.parse()?,
            frequency: frequency.to_string(),
        })
    }

    /// Duration of the request in fractional years
    pub fn years(&self) -> f64 {
        engine::to_years(self.time_value, &self.time_unit)
    }

    /// Run the interest engine for this request
    ///
    /// # Errors
    ///
    /// - [`CalcError::UnknownFrequency`]: compound interest with an unknown frequency
    /// - [`CalcError::Overflow`]: the result is not a finite number
    pub fn compute(&self) -> Result<CalculationResult, CalcError> {
        let years = self.years();
        let accrual = match self.interest_type {
            InterestType::Simple => engine::simple(self.principal, self.rate, years),
            InterestType::Compound => {
                engine::compound(self.principal, self.rate, years, &self.frequency)?
            }
        };

        if !accrual.is_finite() {
            return Err(CalcError::Overflow);
        }

        Ok(CalculationResult {
            interest_type: self.interest_type,
            accrual,
        })
    }
}

/// Outcome of a successful calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationResult {
    /// Which formula produced the result
    pub interest_type: InterestType,
    /// Interest and total
    pub accrual: Accrual,
}

impl CalculationResult {
    /// Heading for this result ("Simple Interest" or "Compound Interest")
    pub fn label(&self) -> &'static str {
        self.interest_type.label()
    }

    /// Interest earned
    pub fn interest(&self) -> f64 {
        self.accrual.interest
    }

    /// Principal plus interest
    pub fn total(&self) -> f64 {
        self.accrual.total
    }

    /// Render the result for presentation
    pub fn render(&self, options: &FormatOptions) -> String {
        format_result(self.interest_type, self.interest(), self.total(), options)
    }
}

/// Validate, compute and format a request without rate limiting
///
/// # Example
///
/// ```
/// use interest_calc::{FormatOptions, calculate};
///
/// let fields = [
///     ("principal", "1,000"),
///     ("rate", "5"),
///     ("time", "2"),
///     ("time_unit", "Years"),
///     ("interest_type", "simple"),
/// ];
/// let text = calculate(&fields, &FormatOptions::default()).unwrap();
/// assert_eq!(text, "Simple Interest: 100.00 INR\nTotal Amount: 1,100.00 INR");
/// ```
pub fn calculate<F: FormFields + ?Sized>(
    fields: &F,
    options: &FormatOptions,
) -> Result<String, CalcError> {
    let result = CalculationRequest::from_fields(fields)?.compute()?;
    Ok(result.render(options))
}

/// Response to one request handled by a [`Calculator`]
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResponse {
    /// Formatted result, or the error to show the user
    pub outcome: Result<String, CalcError>,
    /// Whether the request was turned away by the rate limiter
    pub rate_limited: bool,
    /// How long a rate-limited client should wait (0 otherwise)
    pub retry_after: Duration,
}

impl CalculationResponse {
    fn rejected(retry_after: Duration) -> Self {
        Self {
            outcome: Err(CalcError::RateLimited),
            rate_limited: true,
            retry_after,
        }
    }

    fn completed(outcome: Result<String, CalcError>) -> Self {
        Self {
            outcome,
            rate_limited: false,
            retry_after: Duration::ZERO,
        }
    }
}

/// Rate-limited calculation service
///
/// Owns the [`SlidingWindowLimiter`]; like the limiter it takes `&mut self`
/// and must be serialized by the caller when shared.
///
/// # Example
///
/// ```
/// use interest_calc::{Calculator, RateLimitConfig, SlidingWindowLimiter};
/// use std::time::SystemTime;
///
/// let limiter = SlidingWindowLimiter::with_config(RateLimitConfig::new(1, 60));
/// let mut calculator = Calculator::new(limiter);
/// let fields = [
///     ("principal", "1000"),
///     ("rate", "5"),
///     ("time", "2"),
///     ("time_unit", "Years"),
///     ("interest_type", "compound"),
/// ];
///
/// let now = SystemTime::now();
/// let first = calculator.handle("203.0.113.7", &fields, now);
/// assert!(first.outcome.unwrap().starts_with("Compound Interest: 102.50 INR"));
///
/// let second = calculator.handle("203.0.113.7", &fields, now);
/// assert!(second.rate_limited);
/// ```
pub struct Calculator {
    limiter: SlidingWindowLimiter,
    format: FormatOptions,
}

impl Calculator {
    /// Create a calculator with plain-text output
    pub fn new(limiter: SlidingWindowLimiter) -> Self {
        Self {
            limiter,
            format: FormatOptions::default(),
        }
    }

    /// Use the given presentation options for results
    pub fn with_format(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }

    /// The underlying limiter
    pub fn limiter(&self) -> &SlidingWindowLimiter {
        &self.limiter
    }

    /// Handle one request from `client_id` at `now`
    ///
    /// The admission check runs first; rejected requests are never parsed
    /// or computed. Admitted requests count against the allowance even when
    /// their fields turn out to be invalid.
    pub fn handle<F: FormFields + ?Sized>(
        &mut self,
        client_id: &str,
        fields: &F,
        now: SystemTime,
    ) -> CalculationResponse {
        let decision = self.limiter.check(client_id, now);
        if !decision.allowed {
            return CalculationResponse::rejected(decision.retry_after);
        }

        CalculationResponse::completed(calculate(fields, &self.format))
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(SlidingWindowLimiter::new())
    }
}
