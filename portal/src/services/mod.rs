//! # Services Module
//!
//! Backend implementations for the portal.
//!
//! ```text
//! services/
//! └── mock.rs   - In-memory backend simulating MikroTik/RADIUS auth,
//!                 hotspot vouchers, billing receipts and M-Pesa STK push
//! ```
//!
//! A production deployment would add a gateway client here implementing the
//! same [`crate::core::service::PortalBackend`] trait.

pub mod mock;

pub use mock::MockBackend;
