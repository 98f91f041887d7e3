// src/error.rs
//
// Error taxonomy for the event runtime.
//
// Engine-level failures are recovered by the runtime facade (logged and
// turned into a no-op or `false`). Only `InvalidArguments` is meant to
// reach the host as a distinct error.

use thiserror::Error;

/// Result alias used by the registry, loader and command layer.
pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("engine session not initialized")]
    NotInitialized,

    #[error("failed to create engine session: {reason}")]
    EngineInitFailure { reason: String },

    #[error("failed to load bank #{index}: {reason}")]
    BankLoadFailure { index: usize, reason: String },

    #[error("event not found: {path}")]
    EventNotFound { path: String },

    #[error("no instance registered for {path}")]
    InstanceNotFound { path: String },

    #[error("parameter '{name}' rejected by {path}")]
    ParameterRejected { path: String, name: String },

    #[error("engine rejected {op} on {path}")]
    EngineCallFailed { path: String, op: &'static str },

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

impl RuntimeError {
    /// Short machine-readable code, used by the FFI and method-call layers.
    pub fn code(&self) -> &'static str {
        match self {
            RuntimeError::NotInitialized => "NOT_INITIALIZED",
            RuntimeError::EngineInitFailure { .. } => "ENGINE_INIT_FAILURE",
            RuntimeError::BankLoadFailure { .. } => "BANK_LOAD_FAILURE",
            RuntimeError::EventNotFound { .. } => "EVENT_NOT_FOUND",
            RuntimeError::InstanceNotFound { .. } => "INSTANCE_NOT_FOUND",
            RuntimeError::ParameterRejected { .. } => "PARAMETER_REJECTED",
            RuntimeError::EngineCallFailed { .. } => "ENGINE_CALL_FAILED",
            RuntimeError::InvalidArguments(_) => "INVALID_ARGS",
        }
    }
}
