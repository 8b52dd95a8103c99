//! One-off data corrections
//!
//! A maintenance fix is a single targeted statement run over its own scoped
//! connection. Running a fix yields either an [`Outcome`] (the change was
//! applied, or there was nothing to change) or a [`MaintenanceError`].
//!
//! # Usage
//!
//! ```rust,ignore
//! let config = DatabaseConfig::from_env()?;
//! let result = MaintenanceRunner::new(config).run().await;
//! report(&result);
//! ```

pub mod clear_pin_reset;

pub use clear_pin_reset::{clear_pin_reset, MaintenanceRunner, PIN_RESET_FLAG, TARGET_ATHLETE};

use std::error::Error as _;
use std::fmt;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info, warn};

/// Terminal result of a fix that ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The flag was cleared on the matched row
    Cleared { athlete: String, rows_affected: u64 },
    /// No row matched; nothing was changed
    NotFound { athlete: String },
}

impl Outcome {
    /// Classify an affected row count. More than one row means the name is
    /// not unique and the change must not be kept.
    pub fn from_rows_affected(
        athlete: &str,
        rows_affected: u64,
    ) -> Result<Self, MaintenanceError> {
        match rows_affected {
            0 => Ok(Outcome::NotFound {
                athlete: athlete.to_string(),
            }),
            1 => Ok(Outcome::Cleared {
                athlete: athlete.to_string(),
                rows_affected,
            }),
            matched => Err(MaintenanceError::AmbiguousTarget {
                name: athlete.to_string(),
                matched,
            }),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Cleared {
                athlete,
                rows_affected,
            } => write!(
                f,
                "✅ Cleared {} for {} ({} row updated)",
                PIN_RESET_FLAG, athlete, rows_affected
            ),
            Outcome::NotFound { athlete } => {
                write!(f, "⚠️ No athlete named {} found; nothing updated", athlete)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum MaintenanceError {
    #[error("failed to connect to {host}:{port}/{database}")]
    Connect {
        host: String,
        port: u16,
        database: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("database query failed")]
    Query(#[from] sqlx::Error),

    #[error("{matched} athletes are named {name:?}; refusing to update more than one row")]
    AmbiguousTarget { name: String, matched: u64 },
}

/// Human-readable status line for a finished run
pub fn status_line(result: &Result<Outcome, MaintenanceError>) -> String {
    match result {
        Ok(outcome) => outcome.to_string(),
        Err(e) => format!("❌ Failed to clear {}: {}", PIN_RESET_FLAG, error_chain(e)),
    }
}

/// Error message followed by each of its sources, separated by ": "
fn error_chain(err: &MaintenanceError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Print the status line and emit the matching log event.
pub fn report(result: &Result<Outcome, MaintenanceError>) -> ExitCode {
    println!("{}", status_line(result));

    match result {
        Ok(Outcome::Cleared {
            athlete,
            rows_affected,
        }) => {
            info!(athlete = %athlete, rows_affected, "PIN reset flag cleared");
            ExitCode::SUCCESS
        }
        Ok(Outcome::NotFound { athlete }) => {
            warn!(athlete = %athlete, "No matching athlete; nothing updated");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = ?e, "Maintenance run failed");
            ExitCode::FAILURE
        }
    }
}
