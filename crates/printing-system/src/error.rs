//! Error types for the printing system.

use print_monitor::MonitorError;
use thiserror::Error;

/// Errors that stop a simulation run.
#[derive(Debug, Error)]
pub enum SystemError {
    /// Settings could not be read or merged.
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    /// Settings were read but describe a run that cannot work.
    #[error("Invalid simulation settings: {0}")]
    InvalidSettings(String),

    /// The printer rejected its configuration or a job.
    #[error(transparent)]
    Monitor(#[from] MonitorError),

    /// An actor task panicked or was cancelled.
    #[error("Actor {name} failed: {reason}")]
    ActorFailed { name: String, reason: String },

    /// The operator interrupted the run while actors were still working.
    #[error("Interrupted while waiting for actors to finish")]
    Interrupted,
}
