//! Transport layer for the calculator service
//!
//! Transports accept client connections, turn protocol-specific requests into
//! [`CalculateRequest`](crate::types::CalculateRequest)s and forward them to
//! the calculator actor.
//!
//! # Available Transports
//!
//! - [`http`]: Form-encoded requests with JSON responses

pub mod http;


use crate::actor::CalculatorHandle;
use anyhow::Result;
use async_trait::async_trait;

/// Common interface for all transport implementations
///
/// Each transport is responsible for:
/// - Accepting client connections
/// - Deriving a client identifier for rate limiting
/// - Forwarding requests to the calculator actor
/// - Sending responses back to clients
#[async_trait]
pub trait Transport {
    /// Start the transport server
    ///
    /// Runs until an error occurs or the server shuts down.
    async fn start(self, calculator: CalculatorHandle) -> Result<()>;
}
