//! # Application State Types
//!
//! All state for the portal: the four auth flow forms, the presenting
//! surfaces that host them, the notification stack and the granted session.

use std::sync::Arc;

use crate::core::service::PortalBackend;
use crate::ui::notifications::{NotificationCenter, NotificationHandle};

/// Lifecycle of one auth flow attempt.
///
/// Transitions are strictly sequential:
/// `Idle → Validating → Pending → Succeeded | Failed`, with
/// `Validating → Idle` on an input error (no backend call issued).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlowPhase {
    /// Awaiting input
    #[default]
    Idle,
    /// Syntactic checks running (transient, same tick as submit)
    Validating,
    /// Backend call in flight; re-submission is ignored
    Pending,
    /// Terminal: access granted
    Succeeded,
    /// Terminal: attempt rejected; the surface stays open for retry
    Failed,
}

impl FlowPhase {
    /// A busy flow has a request in flight; its submit control is disabled.
    pub fn is_busy(self) -> bool {
        matches!(self, FlowPhase::Pending)
    }
}

/// The four auth methods offered by the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowId {
    Login,
    Voucher,
    Receipt,
    Payment,
}

/// Panels hosted by the connect modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTab {
    Login,
    Voucher,
    Receipt,
}

impl AuthTab {
    /// All tabs in slider order.
    pub fn all() -> &'static [AuthTab] {
        &[AuthTab::Login, AuthTab::Voucher, AuthTab::Receipt]
    }

    /// Tab display name.
    pub fn title(&self) -> &'static str {
        match self {
            AuthTab::Login => "Account Login",
            AuthTab::Voucher => "Voucher",
            AuthTab::Receipt => "Receipt",
        }
    }
}

/// Credential login panel state.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub username_error: Option<String>,
    pub password_error: Option<String>,
    pub phase: FlowPhase,
    pub pending_toast: Option<NotificationHandle>,
    /// Bumped per submission; resolutions from older attempts are dropped
    pub attempt: u64,
}

impl LoginForm {
    pub fn clear_errors(&mut self) {
        self.username_error = None;
        self.password_error = None;
    }

    pub fn clear_input(&mut self) {
        self.username.clear();
        self.password.clear();
    }

    /// Back to `Idle` with errors cleared. Inputs are kept.
    pub fn reset(&mut self) {
        self.clear_errors();
        self.phase = FlowPhase::Idle;
        self.pending_toast = None;
    }
}

/// Voucher redemption panel state.
#[derive(Debug, Clone, Default)]
pub struct VoucherForm {
    pub code: String,
    pub code_error: Option<String>,
    pub phase: FlowPhase,
    pub pending_toast: Option<NotificationHandle>,
    pub attempt: u64,
}

impl VoucherForm {
    pub fn clear_errors(&mut self) {
        self.code_error = None;
    }

    pub fn reset(&mut self) {
        self.clear_errors();
        self.phase = FlowPhase::Idle;
        self.pending_toast = None;
    }
}

/// Receipt verification panel state.
#[derive(Debug, Clone, Default)]
pub struct ReceiptForm {
    pub receipt_id: String,
    pub receipt_error: Option<String>,
    pub phase: FlowPhase,
    pub pending_toast: Option<NotificationHandle>,
    pub attempt: u64,
}

impl ReceiptForm {
    pub fn clear_errors(&mut self) {
        self.receipt_error = None;
    }

    pub fn reset(&mut self) {
        self.clear_errors();
        self.phase = FlowPhase::Idle;
        self.pending_toast = None;
    }
}

/// M-Pesa push-payment panel state.
///
/// `selected_plan` is bound from the plan-selection collaborator before
/// submit becomes meaningful.
#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    pub phone: String,
    pub phone_error: Option<String>,
    pub selected_plan: Option<String>,
    pub phase: FlowPhase,
    pub pending_toast: Option<NotificationHandle>,
    pub attempt: u64,
}

impl PaymentForm {
    pub fn clear_errors(&mut self) {
        self.phone_error = None;
    }

    pub fn reset(&mut self) {
        self.clear_errors();
        self.phase = FlowPhase::Idle;
        self.pending_toast = None;
    }
}

/// Access granted by a completed flow, retained for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    /// Flow that granted access
    pub via: FlowId,
    /// Session or plan label from the grant
    pub label: String,
}

/// Global portal state, shared between the shell, submit handlers and the
/// event handler.
pub struct AppState {
    /// Connect modal (hosts the login/voucher/receipt panels)
    pub connect_modal_open: bool,
    /// Active panel inside the connect modal
    pub active_tab: AuthTab,
    /// Payment modal (phone entry for the selected plan)
    pub payment_modal_open: bool,
    pub login: LoginForm,
    pub voucher: VoucherForm,
    pub receipt: ReceiptForm,
    pub payment: PaymentForm,
    /// Transient status messages, stacked in arrival order
    pub notifications: NotificationCenter,
    /// Granted session, if any flow has succeeded
    pub session: Option<ActiveSession>,
    /// Injected backend capability
    pub backend: Arc<dyn PortalBackend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn PortalBackend>) -> Self {
        Self {
            connect_modal_open: false,
            active_tab: AuthTab::Login,
            payment_modal_open: false,
            login: LoginForm::default(),
            voucher: VoucherForm::default(),
            receipt: ReceiptForm::default(),
            payment: PaymentForm::default(),
            notifications: NotificationCenter::new(),
            session: None,
            backend,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }
}
