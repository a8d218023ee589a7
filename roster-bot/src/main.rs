mod report;
mod sync;

use std::process::ExitCode;

use rustls::crypto::ring::default_provider;
use tracing::{error, info};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use roster_alert::AlertSink;
use roster_core::{AlertConfig, Config};

#[tokio::main]
async fn main() -> ExitCode {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("hyper") || target.starts_with("rustls"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    if default_provider().install_default().is_err() {
        error!("failed to install rustls ring provider");
        return ExitCode::FAILURE;
    }

    // Nothing is configured yet, so a broken .env can only be logged.
    if let Err(err) = dotenvy::dotenv() {
        error!(?err, "Error loading .env file");
        return ExitCode::FAILURE;
    }

    let alert = AlertSink::new(&AlertConfig::from_env());
    if !alert.is_configured() {
        info!("DISCORD_WEBHOOK is not set; failures will only be logged.");
    }

    let result = match Config::from_env() {
        Ok(config) => sync::run(&config).await,
        Err(err) => Err(err.context("Error loading configuration")),
    };

    match result {
        Ok(summary) => {
            info!(rows = summary.rows_written, "Sync complete.");
            ExitCode::SUCCESS
        }
        Err(err) => report::report_failure(&alert, &err).await,
    }
}
