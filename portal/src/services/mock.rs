//! # Mock Backend
//!
//! In-memory stand-in for the hotspot gateway, voucher pool and billing
//! records. Simulates per-operation network latency and the STK push
//! settlement outcome, and tracks call counts so tests can verify that
//! invalid input never reaches the backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use rand::Rng;
use shared::{
    BackendFailure, FailureCode, LoginGrant, PaymentGrant, ReceiptGrant, VoucherGrant,
};

use crate::core::service::PortalBackend;

/// Account standing for a hotspot user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccountStatus {
    Active,
    Expired,
}

#[derive(Debug, Clone)]
struct UserRecord {
    username: String,
    password: String,
    session_label: String,
    status: AccountStatus,
}

#[derive(Debug, Clone)]
struct VoucherRecord {
    code: String,
    plan_label: String,
    used: bool,
}

#[derive(Debug, Clone)]
struct ReceiptRecord {
    receipt_id: String,
    plan_label: String,
    phone: String,
    settled: bool,
}

/// The mock's record store. Owned by the backend and mutated under defined
/// rules: redeeming a voucher marks it used, nothing else changes.
#[derive(Debug, Default)]
struct MockRecords {
    users: Vec<UserRecord>,
    vouchers: Vec<VoucherRecord>,
    receipts: Vec<ReceiptRecord>,
}

impl MockRecords {
    fn seeded() -> Self {
        let user = |username: &str, password: &str, session: &str, status| UserRecord {
            username: username.to_string(),
            password: password.to_string(),
            session_label: session.to_string(),
            status,
        };
        let voucher = |code: &str, plan: &str, used| VoucherRecord {
            code: code.to_string(),
            plan_label: plan.to_string(),
            used,
        };
        let receipt = |id: &str, plan: &str, phone: &str, settled| ReceiptRecord {
            receipt_id: id.to_string(),
            plan_label: plan.to_string(),
            phone: phone.to_string(),
            settled,
        };

        Self {
            users: vec![
                user("demo", "1234", "8h", AccountStatus::Active),
                user("testuser", "pass123", "24h", AccountStatus::Active),
                user("expired", "exp999", "0", AccountStatus::Expired),
            ],
            vouchers: vec![
                voucher("SPEED-1234", "4 hours", false),
                voucher("SPEED-5678", "24 hours", false),
                voucher("SPEED-USED", "1 hour", true),
                voucher("SPEED-9999", "1 week", false),
            ],
            receipts: vec![
                receipt("RCP001", "Individual – 1 hour – Ksh 10", "0712345678", true),
                receipt("RCP002", "Family – 1 month – Ksh 900", "0798765432", true),
                receipt("RCP003", "Shared – 24 hours – Ksh 80", "0711000111", false),
            ],
        }
    }
}

/// Simulated per-operation latency, matching observed hotspot timings.
#[derive(Debug, Clone, Copy)]
struct Latency {
    login: Duration,
    voucher: Duration,
    receipt: Duration,
    stk_push: Duration,
}

impl Latency {
    fn realistic() -> Self {
        Self {
            login: Duration::from_millis(1200),
            voucher: Duration::from_millis(1000),
            receipt: Duration::from_millis(900),
            // STK push wait: the user has to find their phone and enter a PIN
            stk_push: Duration::from_millis(3500),
        }
    }

    fn zero() -> Self {
        Self {
            login: Duration::ZERO,
            voucher: Duration::ZERO,
            receipt: Duration::ZERO,
            stk_push: Duration::ZERO,
        }
    }
}

/// In-memory [`PortalBackend`] with seeded demo records.
pub struct MockBackend {
    records: RwLock<MockRecords>,
    latency: Latency,
    stk_success_rate: f64,
    login_calls: AtomicUsize,
    voucher_calls: AtomicUsize,
    receipt_calls: AtomicUsize,
    payment_calls: AtomicUsize,
}

impl MockBackend {
    /// Backend with realistic latency and an 80% STK settlement rate.
    pub fn new() -> Self {
        Self::with_latency(Latency::realistic())
    }

    /// Backend with zero latency, for tests and scripted demos.
    pub fn instant() -> Self {
        Self::with_latency(Latency::zero())
    }

    fn with_latency(latency: Latency) -> Self {
        Self {
            records: RwLock::new(MockRecords::seeded()),
            latency,
            stk_success_rate: 0.8,
            login_calls: AtomicUsize::new(0),
            voucher_calls: AtomicUsize::new(0),
            receipt_calls: AtomicUsize::new(0),
            payment_calls: AtomicUsize::new(0),
        }
    }

    /// Override the STK settlement probability (1.0 and 0.0 give
    /// deterministic outcomes for tests).
    pub fn with_stk_success_rate(mut self, rate: f64) -> Self {
        self.stk_success_rate = rate;
        self
    }

    pub fn login_call_count(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn voucher_call_count(&self) -> usize {
        self.voucher_calls.load(Ordering::SeqCst)
    }

    pub fn receipt_call_count(&self) -> usize {
        self.receipt_calls.load(Ordering::SeqCst)
    }

    pub fn payment_call_count(&self) -> usize {
        self.payment_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PortalBackend for MockBackend {
    async fn login(&self, username: &str, password: &str) -> Result<LoginGrant, BackendFailure> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.latency.login).await;

        let records = self.records.read();
        let user = records
            .users
            .iter()
            .find(|u| u.username == username && u.password == password);

        match user {
            None => Err(BackendFailure::from_code(FailureCode::InvalidCredentials)),
            Some(u) if u.status == AccountStatus::Expired => {
                Err(BackendFailure::from_code(FailureCode::AccountExpired))
            }
            Some(u) => Ok(LoginGrant {
                username: u.username.clone(),
                session_label: u.session_label.clone(),
            }),
        }
    }

    async fn redeem_voucher(&self, code: &str) -> Result<VoucherGrant, BackendFailure> {
        self.voucher_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.latency.voucher).await;

        // The store is authoritative on replay: a consumed code stays consumed.
        let code = code.to_uppercase();
        let mut records = self.records.write();
        match records.vouchers.iter_mut().find(|v| v.code == code) {
            None => Err(BackendFailure::from_code(FailureCode::InvalidVoucher)),
            Some(v) if v.used => Err(BackendFailure::from_code(FailureCode::VoucherUsed)),
            Some(v) => {
                v.used = true;
                Ok(VoucherGrant {
                    plan_label: v.plan_label.clone(),
                })
            }
        }
    }

    async fn verify_receipt(&self, receipt_id: &str) -> Result<ReceiptGrant, BackendFailure> {
        self.receipt_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.latency.receipt).await;

        let receipt_id = receipt_id.to_uppercase();
        let records = self.records.read();
        match records.receipts.iter().find(|r| r.receipt_id == receipt_id) {
            None => Err(BackendFailure::from_code(FailureCode::NotFound)),
            Some(r) if !r.settled => Err(BackendFailure::from_code(FailureCode::Pending)),
            Some(r) => Ok(ReceiptGrant {
                plan_label: r.plan_label.clone(),
                phone: r.phone.clone(),
            }),
        }
    }

    async fn initiate_push_payment(
        &self,
        phone: &str,
        plan_label: &str,
    ) -> Result<PaymentGrant, BackendFailure> {
        self.payment_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.latency.stk_push).await;

        let settled = rand::rng().random_bool(self.stk_success_rate);
        if settled {
            Ok(PaymentGrant {
                receipt_id: mint_receipt_id(),
                plan_label: plan_label.to_string(),
                phone: phone.to_string(),
            })
        } else {
            Err(BackendFailure::from_code(FailureCode::StkTimeout))
        }
    }
}

/// Mint a billing receipt id like `RCP4K7Q2M`.
fn mint_receipt_id() -> String {
    let suffix: String = rand::rng()
        .sample_iter(rand::distr::Alphanumeric)
        .take(6)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();
    format!("RCP{}", suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_scenarios() {
        let backend = MockBackend::instant();

        let grant = backend.login("demo", "1234").await.unwrap();
        assert_eq!(grant.username, "demo");
        assert_eq!(grant.session_label, "8h");

        let failure = backend.login("demo", "wrong").await.unwrap_err();
        assert_eq!(failure.code, FailureCode::InvalidCredentials);

        let failure = backend.login("expired", "exp999").await.unwrap_err();
        assert_eq!(failure.code, FailureCode::AccountExpired);

        assert_eq!(backend.login_call_count(), 3);
    }

    #[tokio::test]
    async fn test_voucher_redemption_consumes_the_code() {
        let backend = MockBackend::instant();

        let grant = backend.redeem_voucher("SPEED-1234").await.unwrap();
        assert_eq!(grant.plan_label, "4 hours");

        let failure = backend.redeem_voucher("SPEED-1234").await.unwrap_err();
        assert_eq!(failure.code, FailureCode::VoucherUsed);
    }

    #[tokio::test]
    async fn test_voucher_lookup_is_case_insensitive() {
        let backend = MockBackend::instant();
        let grant = backend.redeem_voucher("speed-5678").await.unwrap();
        assert_eq!(grant.plan_label, "24 hours");
    }

    #[tokio::test]
    async fn test_unknown_and_preused_vouchers_rejected() {
        let backend = MockBackend::instant();

        let failure = backend.redeem_voucher("SPEED-0000").await.unwrap_err();
        assert_eq!(failure.code, FailureCode::InvalidVoucher);

        let failure = backend.redeem_voucher("SPEED-USED").await.unwrap_err();
        assert_eq!(failure.code, FailureCode::VoucherUsed);
    }

    #[tokio::test]
    async fn test_receipt_scenarios() {
        let backend = MockBackend::instant();

        let grant = backend.verify_receipt("RCP001").await.unwrap();
        assert_eq!(grant.plan_label, "Individual – 1 hour – Ksh 10");
        assert_eq!(grant.phone, "0712345678");

        let failure = backend.verify_receipt("RCP003").await.unwrap_err();
        assert_eq!(failure.code, FailureCode::Pending);

        let failure = backend.verify_receipt("RCP999").await.unwrap_err();
        assert_eq!(failure.code, FailureCode::NotFound);
    }

    #[tokio::test]
    async fn test_push_payment_deterministic_outcomes() {
        let backend = MockBackend::instant().with_stk_success_rate(1.0);
        let grant = backend
            .initiate_push_payment("+254712345678", "Shared – 24 hours – Ksh 80")
            .await
            .unwrap();
        assert!(grant.receipt_id.starts_with("RCP"));
        assert_eq!(grant.receipt_id.len(), 9);
        assert_eq!(grant.phone, "+254712345678");
        assert_eq!(grant.plan_label, "Shared – 24 hours – Ksh 80");

        let backend = MockBackend::instant().with_stk_success_rate(0.0);
        let failure = backend
            .initiate_push_payment("+254712345678", "Shared – 24 hours – Ksh 80")
            .await
            .unwrap_err();
        assert_eq!(failure.code, FailureCode::StkTimeout);
    }
}
