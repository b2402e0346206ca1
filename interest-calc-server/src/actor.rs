use crate::metrics::Metrics;
use crate::types::CalculateRequest;
use anyhow::Result;
use interest_calc::{CalculationResponse, Calculator};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Message types for the calculator actor
pub enum CalculatorMessage {
    Calculate {
        request: CalculateRequest,
        response_tx: oneshot::Sender<CalculationResponse>,
    },
}

/// Handle to communicate with the calculator actor
#[derive(Clone)]
pub struct CalculatorHandle {
    tx: mpsc::Sender<CalculatorMessage>,
}

impl CalculatorHandle {
    /// Rate-limit and compute a request
    pub async fn calculate(&self, request: CalculateRequest) -> Result<CalculationResponse> {
        let (response_tx, response_rx) = oneshot::channel();

        self.tx
            .send(CalculatorMessage::Calculate {
                request,
                response_tx,
            })
            .await
            .map_err(|_| anyhow::anyhow!("Calculator actor has shut down"))?;

        response_rx
            .await
            .map_err(|_| anyhow::anyhow!("Calculator actor dropped response channel"))
    }
}

/// The calculator actor
///
/// Owns the [`Calculator`] (and with it the rate limiter) on a single task,
/// so each request's prune, count and record steps never interleave with
/// another request's.
pub struct CalculatorActor;

impl CalculatorActor {
    /// Spawn a new calculator actor
    pub fn spawn(
        buffer_size: usize,
        calculator: Calculator,
        metrics: Arc<Metrics>,
    ) -> CalculatorHandle {
        let (tx, rx) = mpsc::channel(buffer_size);

        tokio::spawn(async move {
            run_actor(rx, calculator, metrics).await;
        });

        CalculatorHandle { tx }
    }
}

async fn run_actor(
    mut rx: mpsc::Receiver<CalculatorMessage>,
    mut calculator: Calculator,
    metrics: Arc<Metrics>,
) {
    while let Some(msg) = rx.recv().await {
        match msg {
            CalculatorMessage::Calculate {
                request,
                response_tx,
            } => {
                let response =
                    calculator.handle(&request.client_id, &request.fields, request.timestamp);
                metrics.update_active_clients(calculator.limiter().len());

                if response.rate_limited {
                    tracing::debug!(
                        client = %request.client_id,
                        retry_after = response.retry_after.as_secs(),
                        "Rate limited"
                    );
                }

                // Ignore send errors - receiver may have gone away
                let _ = response_tx.send(response);
            }
        }
    }

    tracing::info!("Calculator actor shutting down");
}
