//! # Event Handler
//!
//! Applies async backend results to portal state: dismisses the pending
//! toast, emits the outcome notification, finalizes the flow phase and
//! adjusts the presenting surfaces.
//!
//! Every result is guarded by attempt number and phase: a resolution that
//! arrives after its surface was dismissed, or after a newer attempt
//! started, is dropped without touching state.

use std::time::Duration;

use shared::{BackendFailure, FailureCode, LoginGrant, PaymentGrant, ReceiptGrant, VoucherGrant};

use crate::app::state::{ActiveSession, FlowId, FlowPhase};
use crate::app::{App, AppEvent};

const LOGIN_SUCCESS_TOAST: Duration = Duration::from_secs(5);
const REDEEM_SUCCESS_TOAST: Duration = Duration::from_secs(6);
const PAYMENT_SUCCESS_TOAST: Duration = Duration::from_secs(7);
const PAYMENT_ERROR_TOAST: Duration = Duration::from_secs(5);

/// Trait for event handling implementation
pub(crate) trait AppEventHandler {
    fn handle_event_impl(&mut self, event: AppEvent);
}

impl AppEventHandler for App {
    fn handle_event_impl(&mut self, event: AppEvent) {
        match event {
            AppEvent::LoginResult { attempt, result } => self.handle_login_result(attempt, result),
            AppEvent::VoucherResult { attempt, result } => {
                self.handle_voucher_result(attempt, result);
            }
            AppEvent::ReceiptResult { attempt, result } => {
                self.handle_receipt_result(attempt, result);
            }
            AppEvent::PaymentResult { attempt, result } => {
                self.handle_payment_result(attempt, result);
            }
            AppEvent::ReopenPaymentSurface { attempt } => self.handle_payment_reopen(attempt),
        }
    }
}

impl App {
    fn handle_login_result(&mut self, attempt: u64, result: Result<LoginGrant, BackendFailure>) {
        tracing::info!(event = "LoginResult", success = result.is_ok(), "Processing login result");

        let mut state = self.state.write();
        if state.login.attempt != attempt || state.login.phase != FlowPhase::Pending {
            tracing::debug!(attempt, "Dropping stale login result");
            return;
        }
        if let Some(toast) = state.login.pending_toast.take() {
            state.notifications.dismiss(toast);
        }

        match result {
            Ok(grant) => {
                state.login.phase = FlowPhase::Succeeded;
                state.login.clear_input();
                state.connect_modal_open = false;
                state.notifications.success(
                    format!(
                        "Welcome back, {}! Connected for {}.",
                        grant.username, grant.session_label
                    ),
                    LOGIN_SUCCESS_TOAST,
                );
                state.session = Some(ActiveSession {
                    via: FlowId::Login,
                    label: grant.session_label,
                });
            }
            Err(failure) => {
                state.login.phase = FlowPhase::Failed;
                state.notifications.error(failure.message.clone());
                // Credential failures implicate the password field
                if failure.code == FailureCode::InvalidCredentials {
                    state.login.password_error =
                        Some("Incorrect username or password.".to_string());
                }
            }
        }
    }

    fn handle_voucher_result(&mut self, attempt: u64, result: Result<VoucherGrant, BackendFailure>) {
        tracing::info!(event = "VoucherResult", success = result.is_ok(), "Processing voucher result");

        let mut state = self.state.write();
        if state.voucher.attempt != attempt || state.voucher.phase != FlowPhase::Pending {
            tracing::debug!(attempt, "Dropping stale voucher result");
            return;
        }
        if let Some(toast) = state.voucher.pending_toast.take() {
            state.notifications.dismiss(toast);
        }

        match result {
            Ok(grant) => {
                state.voucher.phase = FlowPhase::Succeeded;
                state.voucher.code.clear();
                state.connect_modal_open = false;
                state.notifications.success(
                    format!(
                        "Voucher redeemed! Plan: {}. Enjoy your session.",
                        grant.plan_label
                    ),
                    REDEEM_SUCCESS_TOAST,
                );
                state.session = Some(ActiveSession {
                    via: FlowId::Voucher,
                    label: grant.plan_label,
                });
            }
            Err(failure) => {
                state.voucher.phase = FlowPhase::Failed;
                state.notifications.error(failure.message.clone());
                state.voucher.code_error = Some(failure.message);
            }
        }
    }

    fn handle_receipt_result(&mut self, attempt: u64, result: Result<ReceiptGrant, BackendFailure>) {
        tracing::info!(event = "ReceiptResult", success = result.is_ok(), "Processing receipt result");

        let mut state = self.state.write();
        if state.receipt.attempt != attempt || state.receipt.phase != FlowPhase::Pending {
            tracing::debug!(attempt, "Dropping stale receipt result");
            return;
        }
        if let Some(toast) = state.receipt.pending_toast.take() {
            state.notifications.dismiss(toast);
        }

        match result {
            Ok(grant) => {
                state.receipt.phase = FlowPhase::Succeeded;
                state.receipt.receipt_id.clear();
                state.connect_modal_open = false;
                state.notifications.success(
                    format!("Verified! Plan: {}. Connecting you now.", grant.plan_label),
                    REDEEM_SUCCESS_TOAST,
                );
                state.session = Some(ActiveSession {
                    via: FlowId::Receipt,
                    label: grant.plan_label,
                });
            }
            Err(failure) => {
                state.receipt.phase = FlowPhase::Failed;
                state.notifications.error(failure.message.clone());
                state.receipt.receipt_error = Some(failure.message);
            }
        }
    }

    fn handle_payment_result(&mut self, attempt: u64, result: Result<PaymentGrant, BackendFailure>) {
        tracing::info!(event = "PaymentResult", success = result.is_ok(), "Processing payment result");

        let mut state = self.state.write();
        if state.payment.attempt != attempt || state.payment.phase != FlowPhase::Pending {
            tracing::debug!(attempt, "Dropping stale payment result");
            return;
        }
        if let Some(toast) = state.payment.pending_toast.take() {
            state.notifications.dismiss(toast);
        }

        match result {
            Ok(grant) => {
                state.payment.phase = FlowPhase::Succeeded;
                state.payment.phone.clear();
                // Surface stays closed; the session is active
                state.notifications.success(
                    format!(
                        "Payment successful! Receipt: {}. Your session is now active.",
                        grant.receipt_id
                    ),
                    PAYMENT_SUCCESS_TOAST,
                );
                state.session = Some(ActiveSession {
                    via: FlowId::Payment,
                    label: grant.plan_label,
                });
            }
            Err(failure) => {
                state.payment.phase = FlowPhase::Failed;
                state.notifications.notify(
                    failure.message,
                    crate::ui::notifications::NotificationKind::Error,
                    Some(PAYMENT_ERROR_TOAST),
                );
                // Re-present the surface shortly so the user can retry with
                // the phone number still filled in
                crate::app::handlers::payment::schedule_payment_reopen(
                    self.event_tx.clone(),
                    attempt,
                );
            }
        }
    }

    fn handle_payment_reopen(&mut self, attempt: u64) {
        let mut state = self.state.write();
        // Suppressed if a newer attempt started or the failure was resolved
        if state.payment.attempt != attempt || state.payment.phase != FlowPhase::Failed {
            return;
        }
        state.payment_modal_open = true;
    }
}
