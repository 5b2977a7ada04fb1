//! # Service Traits
//!
//! The backend capability trait, enabling dependency injection and mocking
//! in tests.

use async_trait::async_trait;
use shared::{BackendFailure, LoginGrant, PaymentGrant, ReceiptGrant, VoucherGrant};

/// The four asynchronous auth operations offered by the backend.
///
/// Every operation resolves to a grant payload or a [`BackendFailure`]
/// carrying a stable reason code. The flow layer holds the backend as
/// `Arc<dyn PortalBackend>`, so an in-memory mock and a real gateway client
/// are interchangeable.
#[async_trait]
pub trait PortalBackend: Send + Sync {
    /// Authenticate hotspot credentials.
    async fn login(&self, username: &str, password: &str) -> Result<LoginGrant, BackendFailure>;

    /// Redeem a voucher code. A successful redemption consumes the voucher;
    /// replaying a consumed code is rejected with `VOUCHER_USED`.
    async fn redeem_voucher(&self, code: &str) -> Result<VoucherGrant, BackendFailure>;

    /// Look up a billing receipt by its number.
    async fn verify_receipt(&self, receipt_id: &str) -> Result<ReceiptGrant, BackendFailure>;

    /// Send an STK push to `phone` for the selected plan and await the
    /// settlement outcome.
    async fn initiate_push_payment(
        &self,
        phone: &str,
        plan_label: &str,
    ) -> Result<PaymentGrant, BackendFailure>;
}
