//! HTTP transport
//!
//! # API Endpoints
//!
//! ## POST /calculate_interest
//!
//! Form body (`application/x-www-form-urlencoded` or `multipart/form-data`,
//! as sent by a browser `FormData`) with the fields `principal`, `rate`,
//! `time`, `time_unit`, `interest_type` and optionally `frequency`:
//!
//! ```text
//! principal=1,000&rate=5&time=2&time_unit=Years&interest_type=compound&frequency=Annually
//! ```
//!
//! ### Response
//!
//! `200` with either a result or an error:
//!
//! ```json
//! { "result": "Compound Interest: 102.50 INR<br>Total Amount: 1,102.50 INR" }
//! ```
//!
//! ```json
//! { "error": "Please enter valid numeric values." }
//! ```
//!
//! `429` with an `error` body and a `Retry-After` header when the client is
//! over its allowance.
//!
//! The client is identified by the first address in `X-Forwarded-For`, or
//! by the peer address when the header is absent.
//!
//! ## GET /health
//!
//! Health check endpoint. Returns "OK" with 200 status.
//!
//! ## GET /metrics
//!
//! Prometheus text exposition of the server counters.

use super::Transport;
use crate::actor::CalculatorHandle;
use crate::metrics::{Metrics, Outcome};
use crate::types::{CalculatePayload, CalculateRequest};
use anyhow::Result;
use async_trait::async_trait;
use axum::{
    Router,
    extract::{
        ConnectInfo, Form, FromRequest, Multipart, Request, State, multipart::MultipartError,
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

/// Header carrying the original client address behind a proxy
const FORWARDED_FOR: &str = "x-forwarded-for";

/// HTTP transport implementation
pub struct HttpTransport {
    addr: String,
    metrics: Arc<Metrics>,
}

impl HttpTransport {
    pub fn new(host: &str, port: u16, metrics: Arc<Metrics>) -> Self {
        Self {
            addr: format!("{host}:{port}"),
            metrics,
        }
    }

    /// Build the router serving all endpoints
    ///
    /// The router reads the peer address from [`ConnectInfo`], so it must be
    /// served with `into_make_service_with_connect_info::<SocketAddr>()`.
    pub fn router(calculator: CalculatorHandle, metrics: Arc<Metrics>) -> Router {
        let app_state = Arc::new(AppState {
            calculator,
            metrics,
        });

        Router::new()
            .route("/calculate_interest", post(handle_calculate))
            .route("/health", get(|| async { "OK" }))
            .route("/metrics", get(handle_metrics))
            .route(
                "/.well-known/appspecific/com.chrome.devtools.json",
                get(|| async { Json(serde_json::json!({})) }),
            )
            .with_state(app_state)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn start(self, calculator: CalculatorHandle) -> Result<()> {
        let app = Self::router(calculator, self.metrics);

        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        tracing::info!("HTTP server listening on {}", listener.local_addr()?);

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;

        Ok(())
    }
}

struct AppState {
    calculator: CalculatorHandle,
    metrics: Arc<Metrics>,
}

/// Rate limit key: first `X-Forwarded-For` entry, else the peer IP
pub fn client_id(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| peer.ip().to_string())
}

/// Whole seconds a client should wait, rounded up and never zero
fn retry_after_secs(retry_after: Duration) -> u64 {
    let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
    secs.max(1)
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().starts_with("multipart/form-data"))
}

async fn read_multipart(
    mut multipart: Multipart,
) -> std::result::Result<HashMap<String, String>, MultipartError> {
    let mut fields = HashMap::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let value = field.text().await?;
        // First occurrence wins for repeated names
        fields.entry(name).or_insert(value);
    }
    Ok(fields)
}

/// Decode the submitted fields from either form encoding
///
/// An undecodable body is treated as an empty form and reported as a missing
/// field by the calculator.
async fn read_fields(request: Request) -> HashMap<String, String> {
    let fields = if is_multipart(request.headers()) {
        match Multipart::from_request(request, &()).await {
            Ok(multipart) => read_multipart(multipart).await.map_err(|e| e.to_string()),
            Err(rejection) => Err(rejection.to_string()),
        }
    } else {
        Form::<HashMap<String, String>>::from_request(request, &())
            .await
            .map(|Form(fields)| fields)
            .map_err(|rejection| rejection.to_string())
    };

    fields.unwrap_or_else(|e| {
        tracing::debug!("Unreadable form body: {}", e);
        HashMap::new()
    })
}

async fn handle_calculate(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request,
) -> Response {
    let start = Instant::now();

    let client_id = client_id(request.headers(), peer);
    let fields = read_fields(request).await;

    let request = CalculateRequest {
        client_id,
        fields,
        timestamp: SystemTime::now(),
    };

    match state.calculator.calculate(request).await {
        Ok(response) => {
            let latency_us = start.elapsed().as_micros() as u64;
            let payload = CalculatePayload::from(&response);

            if response.rate_limited {
                state
                    .metrics
                    .record_request(Outcome::RateLimited, latency_us);
                let retry_after = retry_after_secs(response.retry_after).to_string();
                return (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(header::RETRY_AFTER, retry_after)],
                    Json(payload),
                )
                    .into_response();
            }

            let outcome = if response.outcome.is_ok() {
                Outcome::Computed
            } else {
                Outcome::Failed
            };
            state.metrics.record_request(outcome, latency_us);

            Json(payload).into_response()
        }
        Err(e) => {
            tracing::error!("Calculator error: {}", e);
            state
                .metrics
                .record_error(start.elapsed().as_micros() as u64);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(CalculatePayload::error(format!(
                    "Internal server error: {e}"
                ))),
            )
                .into_response()
        }
    }
}

async fn handle_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.export_prometheus(),
    )
}
