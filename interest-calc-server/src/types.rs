//! Common types used across the server
//!
//! The transport turns an incoming HTTP request into a [`CalculateRequest`],
//! the actor answers with the library's
//! [`CalculationResponse`](interest_calc::CalculationResponse), and the
//! transport renders that as a [`CalculatePayload`].

use interest_calc::CalculationResponse;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::SystemTime;

/// Internal calculation request structure
///
/// # Fields
///
/// - `client_id`: Key the rate limit is tracked under (usually an IP address)
/// - `fields`: Submitted form fields, undecoded beyond URL encoding
/// - `timestamp`: Arrival time used for the sliding window
#[derive(Debug, Clone)]
pub struct CalculateRequest {
    /// Client identifier for rate limiting
    pub client_id: String,
    /// Raw form fields (`principal`, `rate`, `time`, ...)
    pub fields: HashMap<String, String>,
    /// Request timestamp
    pub timestamp: SystemTime,
}

/// JSON body returned for a calculation
///
/// Exactly one of `result` and `error` is present:
///
/// ```json
/// { "result": "Simple Interest: 100.00 INR<br>Total Amount: 1,100.00 INR" }
/// ```
///
/// ```json
/// { "error": "Negative values are not allowed." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatePayload {
    /// Formatted result text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// User-facing error message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalculatePayload {
    /// Payload carrying only an error message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(message.into()),
        }
    }
}

impl From<&CalculationResponse> for CalculatePayload {
    fn from(response: &CalculationResponse) -> Self {
        match &response.outcome {
            Ok(text) => CalculatePayload {
                result: Some(text.clone()),
                error: None,
            },
            Err(err) => CalculatePayload::error(err.to_string()),
        }
    }
}
