//! Shared error types used across submodules.

use thiserror::Error;

/// Message carried by fringing models asked for a query mode they do not implement.
pub const FRINGING_NOT_IMPLEMENTED: &str = "Fringing field not implemented for this model";

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum MagneticFieldError {
    /// A model variant was asked for an operation it does not implement.
    #[error("{message} ({model}::{operation})")]
    UnsupportedOperation {
        /// Model that rejected the call.
        model: &'static str,
        /// Operation that was requested.
        operation: &'static str,
        /// Human-readable reason.
        message: &'static str,
    },
    /// Raised when inputs are missing or inconsistent.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Raised when a gap lies outside the validity range of a fringing formula.
    #[error("gap geometry error: {0}")]
    GapGeometry(String),
    /// Raised when a computed field component is NaN.
    #[error("NaN found in {0}")]
    NaNResult(String),
}

impl MagneticFieldError {
    /// Builds the error returned by fringing models for their unsupported query mode.
    #[must_use]
    pub const fn fringing_not_implemented(model: &'static str, operation: &'static str) -> Self {
        Self::UnsupportedOperation {
            model,
            operation,
            message: FRINGING_NOT_IMPLEMENTED,
        }
    }

    /// Returns `true` for [`MagneticFieldError::UnsupportedOperation`].
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. })
    }
}

/// Convenience alias for results produced by this crate.
pub type Result<T, E = MagneticFieldError> = std::result::Result<T, E>;
