//! # SPEED.NET Captive Portal - Library Root
//!
//! Headless orchestration core for a Wi-Fi captive portal offering four
//! mutually-exclusive ways to get online: credential login, voucher
//! redemption, receipt verification and M-Pesa push payment.
//!
//! ## Module Structure
//!
//! - **app**: Orchestrator, state machine and event handling
//!   - Per-flow lifecycle (`Idle → Validating → Pending → Succeeded|Failed`)
//!   - Submit handlers spawn backend calls; results return over an async
//!     channel and are applied on [`app::App::on_tick`]
//!
//! - **core**: Abstractions
//!   - `service`: the `PortalBackend` capability trait - the flow layer is
//!     written against this, so any concrete backend can stand in
//!   - `error`, `config`: crate error type and env-driven configuration
//!
//! - **services**: Backend implementations
//!   - `mock`: in-memory backend with seeded demo records, simulated
//!     latency and a configurable STK settlement rate
//!
//! - **ui**: User-feedback state
//!   - `notifications`: headless toast stack (info/success/error/pending)
//!
//! - **utils**: Pure input validation and Kenyan phone normalization
//!
//! ## Boundary
//!
//! The rendering shell (modal chrome, tab slider, CSS) is an external
//! collaborator: it reads form fields and notification state from
//! [`app::AppState`], writes raw input into the same, and binds its submit
//! buttons and Enter keys to the [`app::App`] action methods. The demo
//! binary (`main.rs`) drives exactly that contract from a script.

// Re-export main modules for testing and integration
pub mod app;
pub mod core;
pub mod services;
pub mod ui;
pub mod utils;

// Re-export commonly used types for convenience
pub use app::{App, AppEvent, AppState};
pub use crate::core::{AppError, PortalBackend, PortalConfig, Result};
