//! # Application Orchestrator
//!
//! The [`App`] struct coordinates the four auth flows, the shared state and
//! the async backend calls.
//!
//! ## Architecture
//!
//! Event-driven, single logical thread for state mutation:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  Shell thread                                        │
//! │  App (orchestrator)                                  │
//! │  - submit_*() / accept_key() - user action handlers  │
//! │  - on_tick() - drains async results, expires toasts  │
//! │  State: Arc<RwLock<AppState>> (locked briefly,       │
//! │  never across an .await)                             │
//! └──────────────┬───────────────────────────────────────┘
//!                │ async_channel (unbounded)
//! ┌──────────────▼───────────────────────────────────────┐
//! │  Tokio tasks                                         │
//! │  - one backend call per submission                   │
//! │  - result sent back as AppEvent, tagged with the     │
//! │    attempt number it was spawned for                 │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Mutual exclusion per flow is by the `Pending` phase (the submit control
//! is disabled while busy), not by a lock: a submission while pending
//! returns without spawning. Flows are independent and may overlap freely;
//! the only shared structure is the notification stack.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use portal::app::App;
//! use portal::services::MockBackend;
//!
//! # async fn run() {
//! let mut app = App::new(Arc::new(MockBackend::new()));
//! app.open_connect_modal();
//! {
//!     let mut state = app.state.write();
//!     state.login.username = "demo".to_string();
//!     state.login.password = "1234".to_string();
//! }
//! app.submit_login();
//! loop {
//!     app.on_tick(); // drain results; render from app.state
//! }
//! # }
//! ```

mod event_handler;
mod events;
mod handlers;
mod state;

pub use events::AppEvent;
pub use state::*;

use std::sync::Arc;

use async_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;

use crate::core::service::PortalBackend;
use event_handler::AppEventHandler;

/// Portal orchestrator: owns the event channel and the shared state.
pub struct App {
    /// Thread-safe shared portal state. Lock briefly; never across an await.
    pub state: Arc<RwLock<AppState>>,

    /// Receiver for async task results, drained in [`App::on_tick`].
    pub event_rx: Receiver<AppEvent>,

    /// Cloned into spawned tasks for sending results back.
    event_tx: Sender<AppEvent>,
}

impl App {
    /// Create the orchestrator around an injected backend capability.
    pub fn new(backend: Arc<dyn PortalBackend>) -> Self {
        let (event_tx, event_rx) = unbounded();
        let app = App {
            state: Arc::new(RwLock::new(AppState::new(backend))),
            event_rx,
            event_tx,
        };
        tracing::info!("Portal state initialized - event channel created");
        app
    }

    /// Drain async results and expire stale notifications. Non-blocking;
    /// the shell calls this from its frame loop.
    pub fn on_tick(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
        self.state.write().notifications.sweep_expired();
    }

    /// Apply one async result to state.
    pub fn handle_event(&mut self, event: AppEvent) {
        self.handle_event_impl(event);
    }

    // ---- Presenting surfaces ----

    /// Open the connect modal (login/voucher/receipt panels).
    pub fn open_connect_modal(&self) {
        handlers::navigation::open_connect_modal(self.state.clone());
    }

    /// Close the connect modal.
    pub fn close_connect_modal(&self) {
        handlers::navigation::close_connect_modal(self.state.clone());
    }

    /// Switch the active panel inside the connect modal.
    pub fn select_tab(&self, tab: AuthTab) {
        handlers::navigation::select_tab(self.state.clone(), tab);
    }

    /// Open the payment modal with a plan bound from the plan-selection
    /// collaborator.
    pub fn open_payment_modal(&self, plan_label: impl Into<String>) {
        handlers::navigation::open_payment_modal(self.state.clone(), plan_label.into());
    }

    /// Close the payment modal.
    pub fn close_payment_modal(&self) {
        handlers::navigation::close_payment_modal(self.state.clone());
    }

    // ---- Submit actions ----

    /// Submit the login panel.
    pub fn submit_login(&self) {
        handlers::auth::handle_login_submit(self.state.clone(), self.event_tx.clone());
    }

    /// Submit the voucher panel.
    pub fn submit_voucher(&self) {
        handlers::auth::handle_voucher_submit(self.state.clone(), self.event_tx.clone());
    }

    /// Submit the receipt panel.
    pub fn submit_receipt(&self) {
        handlers::auth::handle_receipt_submit(self.state.clone(), self.event_tx.clone());
    }

    /// Submit the payment panel.
    pub fn submit_payment(&self) {
        handlers::payment::handle_payment_submit(self.state.clone(), self.event_tx.clone());
    }

    /// Accept key (Enter) inside a flow's inputs activates its submit.
    /// A no-op while that flow is pending.
    pub fn accept_key(&self, flow: FlowId) {
        match flow {
            FlowId::Login => self.submit_login(),
            FlowId::Voucher => self.submit_voucher(),
            FlowId::Receipt => self.submit_receipt(),
            FlowId::Payment => self.submit_payment(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MockBackend;
    use crate::ui::notifications::NotificationKind;

    fn test_app(backend: MockBackend) -> (App, Arc<MockBackend>) {
        let backend = Arc::new(backend);
        (App::new(backend.clone()), backend)
    }

    async fn settle_one(app: &mut App) {
        let event = app.event_rx.recv().await.expect("event channel closed");
        app.handle_event(event);
    }

    // ========== Validation gate ==========

    #[tokio::test]
    async fn test_empty_login_annotates_both_fields_without_backend_call() {
        let (app, backend) = test_app(MockBackend::instant());
        app.open_connect_modal();
        app.submit_login();

        let state = app.state.read();
        assert_eq!(state.login.phase, FlowPhase::Idle);
        assert_eq!(state.login.username_error.as_deref(), Some("Username is required."));
        assert_eq!(state.login.password_error.as_deref(), Some("Password is required."));
        // No backend call, no notification
        assert_eq!(backend.login_call_count(), 0);
        assert!(state.notifications.active().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_phone_stops_before_backend() {
        let (app, backend) = test_app(MockBackend::instant());
        app.open_payment_modal("Shared – 24 hours – Ksh 80");
        app.state.write().payment.phone = "12345".to_string();
        app.submit_payment();

        let state = app.state.read();
        assert_eq!(state.payment.phase, FlowPhase::Idle);
        assert_eq!(
            state.payment.phone_error.as_deref(),
            Some("Enter a valid Kenyan number e.g. 0712 345 678")
        );
        // Surface stays open: validation failed before pending entry
        assert!(state.payment_modal_open);
        assert_eq!(backend.payment_call_count(), 0);
    }

    // ========== Login flow ==========

    #[tokio::test]
    async fn test_login_success_closes_surface_and_notifies() {
        let (mut app, _) = test_app(MockBackend::instant());
        app.open_connect_modal();
        {
            let mut state = app.state.write();
            state.login.username = "demo".to_string();
            state.login.password = "1234".to_string();
        }
        app.submit_login();

        {
            let state = app.state.read();
            assert_eq!(state.login.phase, FlowPhase::Pending);
            assert!(state.login.phase.is_busy());
            let pending = state.login.pending_toast.expect("pending toast shown");
            assert!(state.notifications.is_active(pending));
        }

        settle_one(&mut app).await;

        let state = app.state.read();
        assert_eq!(state.login.phase, FlowPhase::Succeeded);
        assert!(!state.connect_modal_open);
        assert!(state.login.username.is_empty());
        assert!(state.login.password.is_empty());
        assert!(state.is_connected());
        assert_eq!(state.session.as_ref().unwrap().label, "8h");

        let toasts = state.notifications.active();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Success);
        assert_eq!(toasts[0].message, "Welcome back, demo! Connected for 8h.");
    }

    #[tokio::test]
    async fn test_login_failure_keeps_surface_open_for_retry() {
        let (mut app, _) = test_app(MockBackend::instant());
        app.open_connect_modal();
        {
            let mut state = app.state.write();
            state.login.username = "demo".to_string();
            state.login.password = "wrong".to_string();
        }
        app.submit_login();
        settle_one(&mut app).await;

        let state = app.state.read();
        assert_eq!(state.login.phase, FlowPhase::Failed);
        assert!(state.connect_modal_open);
        assert!(!state.login.phase.is_busy());
        assert_eq!(
            state.login.password_error.as_deref(),
            Some("Incorrect username or password.")
        );
        let toasts = state.notifications.active();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Error);
        assert_eq!(toasts[0].message, "Wrong username or password.");
        assert!(!state.is_connected());
    }

    #[tokio::test]
    async fn test_expired_account_is_notification_only() {
        let (mut app, _) = test_app(MockBackend::instant());
        app.open_connect_modal();
        {
            let mut state = app.state.write();
            state.login.username = "expired".to_string();
            state.login.password = "exp999".to_string();
        }
        app.submit_login();
        settle_one(&mut app).await;

        let state = app.state.read();
        assert_eq!(state.login.phase, FlowPhase::Failed);
        // ACCOUNT_EXPIRED does not implicate a specific field
        assert!(state.login.password_error.is_none());
        assert_eq!(
            state.notifications.active()[0].message,
            "Your account has expired. Please purchase a new plan."
        );
    }

    #[tokio::test]
    async fn test_resubmission_while_pending_is_ignored() {
        let (mut app, backend) = test_app(MockBackend::instant());
        app.open_connect_modal();
        {
            let mut state = app.state.write();
            state.login.username = "demo".to_string();
            state.login.password = "1234".to_string();
        }
        app.submit_login();
        // Second activation (e.g. Enter mashed) while pending
        app.accept_key(FlowId::Login);
        app.submit_login();

        settle_one(&mut app).await;
        assert_eq!(backend.login_call_count(), 1);
        assert!(app.event_rx.try_recv().is_err());
        assert_eq!(app.state.read().login.phase, FlowPhase::Succeeded);
    }

    #[tokio::test]
    async fn test_resolution_after_surface_dismissed_mutates_nothing() {
        let (mut app, _) = test_app(MockBackend::instant());
        app.open_connect_modal();
        {
            let mut state = app.state.write();
            state.login.username = "demo".to_string();
            state.login.password = "1234".to_string();
        }
        app.submit_login();
        // User navigates away before the call resolves
        app.close_connect_modal();

        settle_one(&mut app).await;

        let state = app.state.read();
        assert_eq!(state.login.phase, FlowPhase::Idle);
        assert!(!state.connect_modal_open);
        assert!(!state.is_connected());
        assert!(state.notifications.active().is_empty());
    }

    // ========== Voucher flow ==========

    #[tokio::test]
    async fn test_voucher_redeemed_then_replay_rejected() {
        let (mut app, _) = test_app(MockBackend::instant());
        app.open_connect_modal();
        app.select_tab(AuthTab::Voucher);
        app.state.write().voucher.code = "speed-1234".to_string();
        app.submit_voucher();
        settle_one(&mut app).await;

        {
            let state = app.state.read();
            assert_eq!(state.voucher.phase, FlowPhase::Succeeded);
            assert!(!state.connect_modal_open);
            assert!(state.voucher.code.is_empty());
            assert_eq!(
                state.notifications.active()[0].message,
                "Voucher redeemed! Plan: 4 hours. Enjoy your session."
            );
        }

        // Same code again: the backend is authoritative on consumption
        app.open_connect_modal();
        app.state.write().voucher.code = "SPEED-1234".to_string();
        app.submit_voucher();
        settle_one(&mut app).await;

        let state = app.state.read();
        assert_eq!(state.voucher.phase, FlowPhase::Failed);
        assert!(state.connect_modal_open);
        assert_eq!(
            state.voucher.code_error.as_deref(),
            Some("This voucher has already been redeemed.")
        );
    }

    // ========== Receipt flow ==========

    #[tokio::test]
    async fn test_unsettled_receipt_reports_pending_inline() {
        let (mut app, _) = test_app(MockBackend::instant());
        app.open_connect_modal();
        app.select_tab(AuthTab::Receipt);
        app.state.write().receipt.receipt_id = "rcp003".to_string();
        app.submit_receipt();
        settle_one(&mut app).await;

        let state = app.state.read();
        assert_eq!(state.receipt.phase, FlowPhase::Failed);
        assert_eq!(
            state.receipt.receipt_error.as_deref(),
            Some("Payment still processing. Try again in a moment.")
        );
        assert!(state.connect_modal_open);
    }

    #[tokio::test]
    async fn test_settled_receipt_connects() {
        let (mut app, _) = test_app(MockBackend::instant());
        app.open_connect_modal();
        app.select_tab(AuthTab::Receipt);
        app.state.write().receipt.receipt_id = "RCP001".to_string();
        app.submit_receipt();
        settle_one(&mut app).await;

        let state = app.state.read();
        assert_eq!(state.receipt.phase, FlowPhase::Succeeded);
        assert_eq!(
            state.notifications.active()[0].message,
            "Verified! Plan: Individual – 1 hour – Ksh 10. Connecting you now."
        );
    }

    // ========== Payment flow ==========

    #[tokio::test]
    async fn test_payment_success_keeps_surface_closed() {
        let (mut app, _) = test_app(MockBackend::instant().with_stk_success_rate(1.0));
        app.open_payment_modal("Shared – 24 hours – Ksh 80");
        app.state.write().payment.phone = "0712 345 678".to_string();
        app.submit_payment();

        {
            let state = app.state.read();
            // Surface closes at pending entry; toast names the normalized phone
            assert!(!state.payment_modal_open);
            assert_eq!(state.payment.phase, FlowPhase::Pending);
            let pending = &state.notifications.active()[0];
            assert_eq!(pending.kind, NotificationKind::Pending);
            assert!(pending.message.contains("+254712345678"));
        }

        settle_one(&mut app).await;

        let state = app.state.read();
        assert_eq!(state.payment.phase, FlowPhase::Succeeded);
        assert!(!state.payment_modal_open);
        assert!(state.is_connected());
        let toast = &state.notifications.active()[0];
        assert_eq!(toast.kind, NotificationKind::Success);
        assert!(toast.message.starts_with("Payment successful! Receipt: RCP"));
    }

    #[tokio::test]
    async fn test_payment_timeout_reopens_surface_with_phone_preserved() {
        let (mut app, backend) = test_app(MockBackend::instant().with_stk_success_rate(0.0));
        app.open_payment_modal("Shared – 24 hours – Ksh 80");
        app.state.write().payment.phone = "0712 345 678".to_string();
        app.submit_payment();

        settle_one(&mut app).await; // PaymentResult: STK_TIMEOUT
        {
            let state = app.state.read();
            assert_eq!(state.payment.phase, FlowPhase::Failed);
            assert!(!state.payment.phase.is_busy());
            assert!(!state.payment_modal_open);
            assert_eq!(
                state.notifications.active()[0].message,
                "Payment request timed out or was cancelled. Please try again."
            );
        }

        settle_one(&mut app).await; // ReopenPaymentSurface, after the fixed delay
        {
            let state = app.state.read();
            assert!(state.payment_modal_open);
            assert_eq!(state.payment.phone, "0712 345 678");
            assert_eq!(state.payment.selected_plan.as_deref(), Some("Shared – 24 hours – Ksh 80"));
        }

        // Ready for resubmission with the same phone
        app.submit_payment();
        settle_one(&mut app).await;
        assert_eq!(backend.payment_call_count(), 2);
    }

    #[tokio::test]
    async fn test_payment_without_bound_plan_is_rejected() {
        let (app, backend) = test_app(MockBackend::instant());
        {
            let mut state = app.state.write();
            state.payment.phone = "0712345678".to_string();
            state.payment_modal_open = true;
        }
        app.submit_payment();

        let state = app.state.read();
        assert_eq!(state.payment.phase, FlowPhase::Idle);
        assert!(state.payment.phone_error.is_some());
        assert_eq!(backend.payment_call_count(), 0);
    }

    // ========== Concurrent flows ==========

    #[tokio::test]
    async fn test_independent_flows_overlap_freely() {
        let (mut app, backend) = test_app(MockBackend::instant());
        app.open_connect_modal();
        {
            let mut state = app.state.write();
            state.login.username = "demo".to_string();
            state.login.password = "1234".to_string();
            state.voucher.code = "SPEED-5678".to_string();
        }
        app.submit_login();
        app.submit_voucher();

        settle_one(&mut app).await;
        settle_one(&mut app).await;

        assert_eq!(backend.login_call_count(), 1);
        assert_eq!(backend.voucher_call_count(), 1);
        let state = app.state.read();
        assert_eq!(state.login.phase, FlowPhase::Succeeded);
        assert_eq!(state.voucher.phase, FlowPhase::Succeeded);
    }
}
