//! # Common Error Types
//!
//! Centralized error type for the portal crate. Backend failures never
//! escape the flow layer (submit always resolves into a UI outcome), so
//! [`AppError`] only surfaces on setup paths and in the public API.

use shared::BackendFailure;
use thiserror::Error;

/// Application-wide error type.
///
/// Note: the `Backend` variant is exported for public API use by embedders
/// that call [`crate::core::service::PortalBackend`] directly.
#[derive(Debug, Error)]
#[allow(dead_code)] // Exported for public API use
pub enum AppError {
    /// Backend-reported failure escaping the flow layer.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendFailure),

    /// Invalid portal configuration.
    #[error("Config error: {0}")]
    Config(String),
}

/// Convenience alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;
