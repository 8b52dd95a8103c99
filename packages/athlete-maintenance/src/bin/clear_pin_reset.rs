//! Clear the pending PIN reset for Edwin Escobar
//!
//! Connection settings come from DB_HOST, DB_PORT, DB_NAME, DB_USER and
//! DB_PASSWORD (a .env file is honoured).

use std::process::ExitCode;

use athlete_maintenance::maintenance::{report, MaintenanceRunner};
use athlete_maintenance::DatabaseConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,athlete_maintenance=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    let config = match DatabaseConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("❌ Invalid database configuration: {:#}", e);
            tracing::error!(error = ?e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let result = MaintenanceRunner::new(config).run().await;
    report(&result)
}
