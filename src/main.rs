use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use drivewise::{AppState, DriveWiseConfig, DriveWiseError, config::LoggingConfig, web};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "drivewise={level},tower_http={level}",
            level = logging.level
        ))
    });
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    }
    .context("Failed to initialize logging")
}

/// Log the user-facing summary; the full error is returned for the exit report
fn report_startup_error(error: DriveWiseError) -> anyhow::Error {
    tracing::error!("{}", error.user_message());
    anyhow::Error::new(error)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config_path = env::var_os("DRIVEWISE_CONFIG").map(PathBuf::from);
    let config = DriveWiseConfig::load_from_path(config_path)?;
    init_tracing(&config.logging)?;

    tracing::info!(
        version = drivewise::VERSION,
        tomtom = config.tomtom.api_key.is_some(),
        openweather = config.openweather.api_key.is_some(),
        gemini = config.gemini.api_key.is_some(),
        "Configuration loaded"
    );

    let state = AppState::from_config(&config)
        .map_err(report_startup_error)
        .context("Failed to build services")?;
    web::run(&config.server, state)
        .await
        .map_err(report_startup_error)
        .context("Web server failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_error_keeps_details() {
        let error = report_startup_error(DriveWiseError::config("Failed to create HTTP client"));
        assert!(error.to_string().contains("Failed to create HTTP client"));
        assert!(error.downcast_ref::<DriveWiseError>().is_some());
    }
}
