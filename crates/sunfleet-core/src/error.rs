// ── Core error types ──
//
// The simulator itself never fails. Errors only surface at the edges:
// lookups by id, contact-form validation, configuration checks, and
// talking to a controller whose loop is not running.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Lookup errors ────────────────────────────────────────────────
    #[error("Vehicle not found: {identifier}")]
    VehicleNotFound { identifier: String },

    #[error("Alert not found: {identifier}")]
    AlertNotFound { identifier: String },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Lifecycle errors ─────────────────────────────────────────────
    #[error("Simulator is not running")]
    SimulatorStopped,

    #[error("Simulator is already running")]
    AlreadyRunning,

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::VehicleNotFound { .. } | Self::AlertNotFound { .. }
        )
    }
}
