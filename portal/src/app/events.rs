//! # Application Events
//!
//! Results of async backend calls, sent from spawned tasks back to the
//! orchestrator over the event channel.

use shared::{BackendFailure, LoginGrant, PaymentGrant, ReceiptGrant, VoucherGrant};

/// Async task results sent to the orchestrator.
///
/// Each result carries the attempt number it was spawned for, so the event
/// handler can drop resolutions belonging to a dismissed or superseded
/// attempt without touching state.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Credential login resolved
    LoginResult {
        attempt: u64,
        result: Result<LoginGrant, BackendFailure>,
    },
    /// Voucher redemption resolved
    VoucherResult {
        attempt: u64,
        result: Result<VoucherGrant, BackendFailure>,
    },
    /// Receipt verification resolved
    ReceiptResult {
        attempt: u64,
        result: Result<ReceiptGrant, BackendFailure>,
    },
    /// Push payment resolved
    PaymentResult {
        attempt: u64,
        result: Result<PaymentGrant, BackendFailure>,
    },
    /// Re-present the payment surface after a failed push
    ReopenPaymentSurface { attempt: u64 },
}
