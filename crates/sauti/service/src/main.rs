//! sautid - the Sauti feedback daemon.
//!
//! Accepts feedback over HTTP, scores it asynchronously through the
//! pipeline, and serves fleet analytics.

use clap::Parser;
use sauti_engine::AlertConfig;
use sauti_pipeline::PipelineConfig;
use sauti_service::{FeatureFlags, Server, ServiceConfig, ServiceError, ServiceResult};
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Sauti daemon CLI.
#[derive(Parser)]
#[command(name = "sautid")]
#[command(about = "Sauti - async feedback sentiment pipeline", long_about = None)]
#[command(version)]
struct Cli {
    /// Listen address
    #[arg(short, long, env = "SAUTI_LISTEN_ADDR", default_value = "127.0.0.1:3000")]
    listen: String,

    /// Shared secret for the admin API
    #[arg(long, env = "SAUTI_API_KEY")]
    api_key: String,

    /// Averages below this raise alerts
    #[arg(long, env = "SAUTI_ALERT_THRESHOLD", default_value_t = 2.5)]
    alert_threshold: f64,

    /// Minimum reviews before an entity can alert
    #[arg(long, env = "SAUTI_ALERT_MIN_REVIEWS", default_value_t = 3)]
    alert_min_reviews: u64,

    /// Alert suppression window in seconds
    #[arg(long, env = "SAUTI_ALERT_COOLDOWN_TTL", default_value_t = 3600)]
    alert_cooldown_secs: u64,

    /// Concurrent worker slots
    #[arg(long, env = "SAUTI_WORKERS", default_value_t = 5)]
    workers: usize,

    /// Accept driver feedback
    #[arg(long, env = "SAUTI_FEATURE_DRIVER", default_value_t = true, action = clap::ArgAction::Set)]
    feature_driver: bool,

    /// Accept trip feedback
    #[arg(long, env = "SAUTI_FEATURE_TRIP", default_value_t = true, action = clap::ArgAction::Set)]
    feature_trip: bool,

    /// Accept app feedback
    #[arg(long, env = "SAUTI_FEATURE_APP", default_value_t = true, action = clap::ArgAction::Set)]
    feature_app: bool,

    /// Accept marshal feedback
    #[arg(long, env = "SAUTI_FEATURE_MARSHAL", default_value_t = true, action = clap::ArgAction::Set)]
    feature_marshal: bool,

    /// Log level
    #[arg(long, env = "SAUTI_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "SAUTI_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> ServiceResult<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let listen_addr: SocketAddr = cli
        .listen
        .parse()
        .map_err(|e| ServiceError::Config(format!("invalid listen address: {e}")))?;

    let config = ServiceConfig {
        listen_addr,
        api_key: cli.api_key,
        features: FeatureFlags {
            driver: cli.feature_driver,
            trip: cli.feature_trip,
            app: cli.feature_app,
            marshal: cli.feature_marshal,
        },
        alert: AlertConfig {
            threshold: cli.alert_threshold,
            min_reviews: cli.alert_min_reviews,
            cooldown_ttl: Duration::from_secs(cli.alert_cooldown_secs),
        },
        pipeline: PipelineConfig {
            concurrency: cli.workers,
            ..Default::default()
        },
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.listen_addr,
        "starting sautid"
    );

    Server::new(config).run().await
}
