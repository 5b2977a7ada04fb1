//! # Shared Portal Contract Types
//!
//! This library defines the contract between the portal front end and the
//! authentication backend. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for the backend contract
//!   - **[`dto::auth`]**: Grant payloads returned by the four auth operations
//!   - **[`dto::failure`]**: Typed failure reason codes and display messages
//!   - **[`dto::plans`]**: The purchasable plan catalog
//!
//! ## Wire Format
//!
//! All DTOs serialize with default `serde` behavior: snake_case field names,
//! both `Serialize` and `Deserialize` derived so any concrete backend
//! (in-memory mock or remote service) can speak the same shapes.

pub mod dto;

// Re-export commonly used types for convenience
pub use dto::*;
