//! # interest-calc
//!
//! Simple and compound interest calculation for untrusted form input, with a
//! per-client sliding-window limiter to keep request floods in check.
//!
//! ## Overview
//!
//! A request travels through a short pipeline:
//!
//! 1. **Rate limiter** ([`SlidingWindowLimiter`]): admits at most `limit`
//!    requests per client in any trailing `window`
//! 2. **Numeric parser** ([`parse_number`]): accepts `"1,234.56"`-style text
//! 3. **Time normalizer** ([`TimeUnit`]): converts months, days, minutes and
//!    seconds to fractional years
//! 4. **Interest engine** ([`core::engine`]): simple and compound formulas
//! 5. **Result formatter** ([`format_result`]): grouped thousands, two decimals
//!
//! ## Quick Start
//!
//! ```
//! use interest_calc::{FormatOptions, calculate};
//!
//! let fields = [
//!     ("principal", "1000"),
//!     ("rate", "5"),
//!     ("time", "2"),
//!     ("time_unit", "Years"),
//!     ("interest_type", "compound"),
//!     ("frequency", "Annually"),
//! ];
//!
//! let text = calculate(&fields, &FormatOptions::default())?;
//! assert_eq!(text, "Compound Interest: 102.50 INR\nTotal Amount: 1,102.50 INR");
//! # Ok::<(), interest_calc::CalcError>(())
//! ```
//!
//! ## Serving Requests
//!
//! [`Calculator`] combines the limiter with the calculation and is what a
//! hosting layer calls once per request:
//!
//! ```
//! use interest_calc::{Calculator, SlidingWindowLimiter};
//! use std::collections::HashMap;
//! use std::time::SystemTime;
//!
//! let mut calculator = Calculator::new(SlidingWindowLimiter::new());
//!
//! let mut form = HashMap::new();
//! form.insert("principal".to_string(), "-5".to_string());
//! form.insert("rate".to_string(), "5".to_string());
//! form.insert("time".to_string(), "1".to_string());
//! form.insert("time_unit".to_string(), "Years".to_string());
//! form.insert("interest_type".to_string(), "simple".to_string());
//!
//! let response = calculator.handle("192.0.2.10", &form, SystemTime::now());
//! assert!(!response.rate_limited);
//! assert_eq!(
//!     response.outcome.unwrap_err().to_string(),
//!     "Negative values are not allowed."
//! );
//! ```
//!
//! ## Thread Safety
//!
//! Neither the limiter nor the calculator is synchronized internally. For
//! concurrent access, wrap it in a mutex or own it from a single task:
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use interest_calc::Calculator;
//!
//! let calculator = Arc::new(Mutex::new(Calculator::default()));
//! ```
//!
//! ## Features
//!
//! - `ahash` (default): Use AHash for the limiter's client map

pub mod core;

pub use core::{
    Accrual, CalcError, CalculationRequest, CalculationResponse, CalculationResult, Calculator,
    FormFields, FormatOptions, Frequency, InterestType, MAX_TIME_YEARS, RateLimitConfig,
    RateLimitDecision, SlidingWindowLimiter, SlidingWindowLimiterBuilder, TimeUnit, calculate,
    format_grouped, format_result, parse_number,
};
