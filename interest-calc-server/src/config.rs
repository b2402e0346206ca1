//! Server configuration and CLI argument parsing
//!
//! Configuration comes from command-line arguments and environment variables
//! (with the `INTEREST_CALC_` prefix).
//!
//! # Configuration Priority
//!
//! 1. CLI arguments (highest priority)
//! 2. `INTEREST_CALC_*` environment variables
//! 3. `PORT` (port only, for platforms that assign one)
//! 4. Default values (lowest priority)
//!
//! # Example Usage
//!
//! ```bash
//! # Using CLI arguments
//! interest-calc --host 0.0.0.0 --port 8000 --rate-limit 60
//!
//! # Using environment variables
//! export INTEREST_CALC_PORT=8000
//! export INTEREST_CALC_RATE_LIMIT=60
//! interest-calc
//! ```

use anyhow::{Result, anyhow};
use clap::Parser;
use interest_calc::{RateLimitConfig, SlidingWindowLimiter};
use std::time::Duration;

/// Port used when neither the CLI, `INTEREST_CALC_PORT` nor `PORT` sets one
pub const DEFAULT_PORT: u16 = 5000;

/// Main configuration structure for the server
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listener configuration
    pub http: HttpConfig,
    /// Per-client rate limit configuration
    pub limiter: LimiterConfig,
    /// Channel buffer size for actor communication
    pub buffer_size: usize,
    /// Logging level (error, warn, info, debug, trace)
    pub log_level: String,
}

/// HTTP transport configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,
    /// Port number to listen on
    pub port: u16,
}

/// Sliding-window limiter configuration
#[derive(Debug, Clone)]
pub struct LimiterConfig {
    /// Maximum admitted requests per client per window
    pub limit: usize,
    /// Window length in seconds
    pub window_seconds: u64,
    /// Interval between sweeps of idle clients (seconds)
    pub cleanup_interval: u64,
    /// Expected number of distinct clients
    pub capacity: usize,
}

impl LimiterConfig {
    /// Build the limiter described by this configuration
    pub fn build(&self) -> SlidingWindowLimiter {
        SlidingWindowLimiter::builder()
            .config(RateLimitConfig::new(self.limit, self.window_seconds))
            .capacity(self.capacity)
            .cleanup_interval(Duration::from_secs(self.cleanup_interval))
            .build()
    }
}

/// Command-line arguments for the server
///
/// All arguments can also be set via environment variables with the
/// `INTEREST_CALC_` prefix. CLI arguments take precedence.
#[derive(Parser, Debug)]
#[command(
    name = "interest-calc",
    about = "Simple and compound interest calculator service",
    long_about = "An HTTP service computing simple and compound interest with per-client rate limiting.\n\nEnvironment variables with INTEREST_CALC_ prefix are supported. CLI arguments take precedence over environment variables."
)]
pub struct Args {
    // HTTP
    #[arg(
        long,
        value_name = "HOST",
        help = "HTTP host",
        default_value = "127.0.0.1",
        env = "INTEREST_CALC_HOST"
    )]
    pub host: String,
    #[arg(
        long,
        value_name = "PORT",
        help = "HTTP port [default: $PORT or 5000]",
        env = "INTEREST_CALC_PORT"
    )]
    pub port: Option<u16>,

    // Rate limiting
    #[arg(
        long,
        value_name = "N",
        help = "Maximum requests per client per window",
        default_value_t = 30,
        env = "INTEREST_CALC_RATE_LIMIT"
    )]
    pub rate_limit: usize,
    #[arg(
        long,
        value_name = "SECS",
        help = "Rate limit window (seconds)",
        default_value_t = 60,
        env = "INTEREST_CALC_RATE_WINDOW"
    )]
    pub rate_window: u64,
    #[arg(
        long,
        value_name = "SECS",
        help = "Interval between sweeps of idle clients (seconds)",
        default_value_t = 60,
        env = "INTEREST_CALC_CLEANUP_INTERVAL"
    )]
    pub cleanup_interval: u64,
    #[arg(
        long,
        value_name = "SIZE",
        help = "Expected number of distinct clients",
        default_value_t = 1000,
        env = "INTEREST_CALC_STORE_CAPACITY"
    )]
    pub store_capacity: usize,

    // General options
    #[arg(
        long,
        value_name = "SIZE",
        help = "Channel buffer size",
        default_value_t = 10_000,
        env = "INTEREST_CALC_BUFFER_SIZE"
    )]
    pub buffer_size: usize,
    #[arg(
        long,
        value_name = "LEVEL",
        help = "Log level: error, warn, info, debug, trace",
        default_value = "info",
        env = "INTEREST_CALC_LOG_LEVEL"
    )]
    pub log_level: String,

    // Utility options
    #[arg(
        long,
        help = "List all environment variables and exit",
        action = clap::ArgAction::SetTrue
    )]
    pub list_env_vars: bool,
}

impl Config {
    /// Build configuration from environment variables and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but not a valid port, or if the
    /// resulting configuration fails [validation](Self::validate).
    pub fn from_env_and_args() -> Result<Self> {
        let args = Args::parse();

        if args.list_env_vars {
            Self::print_env_vars();
            std::process::exit(0);
        }

        Self::from_args(args, std::env::var("PORT").ok())
    }

    /// Build configuration from already parsed arguments
    ///
    /// `platform_port` is the value of the plain `PORT` variable, used only
    /// when no port was given via CLI or `INTEREST_CALC_PORT`.
    pub fn from_args(args: Args, platform_port: Option<String>) -> Result<Self> {
        let port = match (args.port, platform_port) {
            (Some(port), _) => port,
            (None, Some(raw)) => raw
                .trim()
                .parse()
                .map_err(|e| anyhow!("Invalid PORT value {raw:?}: {e}"))?,
            (None, None) => DEFAULT_PORT,
        };

        let config = Config {
            http: HttpConfig {
                host: args.host,
                port,
            },
            limiter: LimiterConfig {
                limit: args.rate_limit,
                window_seconds: args.rate_window,
                cleanup_interval: args.cleanup_interval,
                capacity: args.store_capacity,
            },
            buffer_size: args.buffer_size,
            log_level: args.log_level,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the rate limit, window or buffer size is zero.
    fn validate(&self) -> Result<()> {
        if self.limiter.limit == 0 {
            return Err(anyhow!(
                "--rate-limit must be at least 1 (a limit of 0 would reject every request)"
            ));
        }
        if self.limiter.window_seconds == 0 {
            return Err(anyhow!("--rate-window must be at least 1 second"));
        }
        if self.limiter.cleanup_interval == 0 {
            return Err(anyhow!("--cleanup-interval must be at least 1 second"));
        }
        if self.buffer_size == 0 {
            return Err(anyhow!("--buffer-size must be at least 1"));
        }

        Ok(())
    }

    /// Print all available environment variables and their descriptions
    fn print_env_vars() {
        println!("interest-calc Environment Variables");
        println!("===================================");
        println!();
        println!("All environment variables use the INTEREST_CALC_ prefix.");
        println!("CLI arguments take precedence over environment variables.");
        println!();

        println!("HTTP Configuration:");
        println!("  INTEREST_CALC_HOST=<host>                HTTP host [default: 127.0.0.1]");
        println!(
            "  INTEREST_CALC_PORT=<port>                HTTP port [default: $PORT, then 5000]"
        );
        println!();

        println!("Rate Limiting:");
        println!(
            "  INTEREST_CALC_RATE_LIMIT=<n>             Requests per client per window [default: 30]"
        );
        println!(
            "  INTEREST_CALC_RATE_WINDOW=<secs>         Window length in seconds [default: 60]"
        );
        println!(
            "  INTEREST_CALC_CLEANUP_INTERVAL=<secs>    Idle client sweep interval [default: 60]"
        );
        println!(
            "  INTEREST_CALC_STORE_CAPACITY=<size>      Expected distinct clients [default: 1000]"
        );
        println!();

        println!("General Configuration:");
        println!(
            "  INTEREST_CALC_BUFFER_SIZE=<size>         Channel buffer size [default: 10000]"
        );
        println!(
            "  INTEREST_CALC_LOG_LEVEL=<level>          Log level: error, warn, info, debug, trace [default: info]"
        );
        println!();

        println!("Examples:");
        println!("  # Allow 10 calculations per client per minute");
        println!("  export INTEREST_CALC_RATE_LIMIT=10");
        println!();
        println!("  # Run server (CLI args override env vars)");
        println!("  interest-calc --port 9090");
    }
}
