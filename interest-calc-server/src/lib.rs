//! # interest-calc server
//!
//! An HTTP front end for the [`interest_calc`] library: it accepts form
//! submissions from the calculator page, rate-limits them per client, and
//! answers with a JSON result or error.
//!
//! ## Quick Start
//!
//! ```bash
//! # Show all available options
//! interest-calc --help
//!
//! # Listen on all interfaces, port 8000, 60 calculations per client per minute
//! interest-calc --host 0.0.0.0 --port 8000 --rate-limit 60
//! ```
//!
//! ## Configuration
//!
//! Configure via CLI arguments or environment variables (CLI takes precedence):
//!
//! ```bash
//! export INTEREST_CALC_PORT=8000
//! export INTEREST_CALC_RATE_WINDOW=30
//! interest-calc
//!
//! # List all available environment variables
//! interest-calc --list-env-vars
//! ```
//!
//! ## Usage
//!
//! ```bash
//! curl -X POST http://localhost:5000/calculate_interest \
//!   -d 'principal=1,000' -d rate=5 -d time=2 -d time_unit=Years \
//!   -d interest_type=compound -d frequency=Annually
//! # {"result":"Compound Interest: 102.50 INR<br>Total Amount: 1,102.50 INR"}
//! ```
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────┐
//!   │    HTTP     │  client id from X-Forwarded-For or peer address
//!   │  Transport  │
//!   └──────┬──────┘
//!          │
//!    ┌─────▼─────┐
//!    │   Actor   │  single task, requests handled one at a time
//!    └─────┬─────┘
//!          │
//!    ┌─────▼──────┐
//!    │ Calculator │  sliding-window limiter, then parse/compute/format
//!    └────────────┘
//! ```

pub mod actor;
pub mod config;
pub mod metrics;
pub mod transport;
pub mod types;

#[cfg(test)]
mod actor_tests;
