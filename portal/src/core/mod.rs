//! # Core Abstractions
//!
//! Foundational abstractions used throughout the portal:
//!
//! - **[`error`]**: Application error types (`AppError`, `Result<T>`)
//! - **[`service`]**: The backend capability trait (`PortalBackend`) for
//!   dependency injection; the flow layer is written against this trait so
//!   any concrete backend (in-memory mock, real hotspot gateway) can stand in
//! - **[`config`]**: Environment-driven portal configuration

pub mod config;
pub mod error;
pub mod service;

// Re-export commonly used types for convenience
pub use config::PortalConfig;
pub use error::{AppError, Result};
pub use service::PortalBackend;
