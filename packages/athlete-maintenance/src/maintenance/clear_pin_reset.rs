//! Fix: clear the pending PIN reset for a single athlete
//!
//! Edwin Escobar's account was left with `pin_reset_required = true` and the
//! app keeps prompting for a new PIN. This clears the flag on that one row.

use super::{MaintenanceError, Outcome};
use crate::config::DatabaseConfig;
use sqlx::{Connection, PgConnection};
use tracing::{debug, info, warn};

/// Athlete whose flag is cleared by this fix
pub const TARGET_ATHLETE: &str = "Edwin Escobar";

/// Column cleared by this fix
pub const PIN_RESET_FLAG: &str = "pin_reset_required";

/// Runs the fix over a connection it owns for the duration of [`run`](Self::run).
pub struct MaintenanceRunner {
    config: DatabaseConfig,
}

impl MaintenanceRunner {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    /// Connect, clear the flag for [`TARGET_ATHLETE`], then close the
    /// connection whatever the update returned.
    pub async fn run(&self) -> Result<Outcome, MaintenanceError> {
        let mut conn = self.connect().await?;

        let result = clear_pin_reset(&mut conn, TARGET_ATHLETE).await;

        if let Err(e) = conn.close().await {
            warn!(error = %e, "Failed to close database connection cleanly");
        }

        result
    }

    async fn connect(&self) -> Result<PgConnection, MaintenanceError> {
        debug!(
            host = %self.config.host,
            port = self.config.port,
            database = %self.config.database,
            username = %self.config.username,
            "Connecting to database"
        );

        PgConnection::connect_with(&self.config.connect_options())
            .await
            .map_err(|source| MaintenanceError::Connect {
                host: self.config.host.clone(),
                port: self.config.port,
                database: self.config.database.clone(),
                source,
            })
    }
}

/// Clear `pin_reset_required` on the athlete called `athlete`.
///
/// The update is rolled back if the name matches more than one row.
pub async fn clear_pin_reset(
    conn: &mut PgConnection,
    athlete: &str,
) -> Result<Outcome, MaintenanceError> {
    let mut tx = conn.begin().await?;

    let rows_affected =
        sqlx::query("UPDATE athletes SET pin_reset_required = false WHERE name = $1")
            .bind(athlete)
            .execute(&mut *tx)
            .await?
            .rows_affected();

    info!(athlete = %athlete, rows_affected, "Executed PIN reset update");

    match Outcome::from_rows_affected(athlete, rows_affected) {
        Ok(outcome) => {
            tx.commit().await?;
            Ok(outcome)
        }
        Err(e) => Err(keep_error_after_rollback(e, tx.rollback().await)),
    }
}

/// A failed rollback leaves the transaction to be aborted when the connection
/// closes, so the error that caused the rollback is the one reported.
fn keep_error_after_rollback(
    err: MaintenanceError,
    rollback: Result<(), sqlx::Error>,
) -> MaintenanceError {
    if let Err(rollback_err) = rollback {
        warn!(error = %rollback_err, cause = %err, "Failed to roll back PIN reset update");
    }
    err
}
