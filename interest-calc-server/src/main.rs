use anyhow::Result;
use interest_calc::{Calculator, FormatOptions};
use interest_calc_server::actor::CalculatorActor;
use interest_calc_server::config::Config;
use interest_calc_server::metrics::Metrics;
use interest_calc_server::transport::{Transport, http::HttpTransport};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse configuration from environment variables and CLI arguments
    let config = Config::from_env_and_args()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("interest_calc={}", config.log_level).parse()?)
                .add_directive(format!("interest_calc_server={}", config.log_level).parse()?),
        )
        .init();

    let metrics = Arc::new(Metrics::new());

    // Results are injected into the page as HTML
    let calculator = Calculator::new(config.limiter.build()).with_format(FormatOptions::html());
    let handle = CalculatorActor::spawn(config.buffer_size, calculator, metrics.clone());

    tracing::info!(
        "Rate limit: {} requests per {}s per client",
        config.limiter.limit,
        config.limiter.window_seconds
    );
    tracing::info!(
        "Starting HTTP transport on {}:{}",
        config.http.host,
        config.http.port
    );

    let transport = HttpTransport::new(&config.http.host, config.http.port, metrics);
    if let Err(e) = transport.start(handle).await {
        tracing::error!("HTTP transport failed: {}", e);
        return Err(e);
    }

    Ok(())
}
