//! # Authentication Handlers
//!
//! Submit handlers for the login, voucher and receipt panels. Each follows
//! the same shape: guard against re-submission, validate, flip to pending
//! with a manual-dismiss toast, then spawn exactly one backend call whose
//! result comes back over the event channel.

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;

use crate::app::events::AppEvent;
use crate::app::state::{AppState, FlowPhase};
use crate::utils::validation;

/// Handle login submit
///
/// Internal handler function - use [`crate::app::App::submit_login`] instead.
pub(crate) fn handle_login_submit(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let (username, password, attempt, backend) = {
        let mut state = state.write();
        if state.login.phase.is_busy() {
            // At most one in-flight request per flow
            return;
        }

        state.login.clear_errors();
        state.login.phase = FlowPhase::Validating;

        let username = state.login.username.trim().to_string();
        let password = state.login.password.clone();

        // Both empty fields annotate in a single submission
        let mut invalid = false;
        if let Err(e) = validation::validate_username(&username) {
            state.login.username_error = Some(e.message().to_string());
            invalid = true;
        }
        if let Err(e) = validation::validate_password(&password) {
            state.login.password_error = Some(e.message().to_string());
            invalid = true;
        }
        if invalid {
            state.login.phase = FlowPhase::Idle;
            return;
        }

        state.login.phase = FlowPhase::Pending;
        state.login.attempt += 1;
        let toast = state.notifications.pending("Authenticating…");
        state.login.pending_toast = Some(toast);

        (username, password, state.login.attempt, state.backend.clone())
    };

    tracing::info!(username = %username, "Login submitted");
    tokio::spawn(async move {
        let result = backend.login(&username, &password).await;
        let _ = event_tx.send(AppEvent::LoginResult { attempt, result }).await;
    });
}

/// Handle voucher submit
///
/// Internal handler function - use [`crate::app::App::submit_voucher`] instead.
pub(crate) fn handle_voucher_submit(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let (code, attempt, backend) = {
        let mut state = state.write();
        if state.voucher.phase.is_busy() {
            return;
        }

        state.voucher.clear_errors();
        state.voucher.phase = FlowPhase::Validating;

        // Codes are stored uppercase; normalize before lookup
        let code = state.voucher.code.trim().to_uppercase();
        if let Err(e) = validation::validate_voucher_code(&code) {
            state.voucher.code_error = Some(e.message().to_string());
            state.voucher.phase = FlowPhase::Idle;
            return;
        }

        state.voucher.phase = FlowPhase::Pending;
        state.voucher.attempt += 1;
        let toast = state.notifications.pending("Validating voucher…");
        state.voucher.pending_toast = Some(toast);

        (code, state.voucher.attempt, state.backend.clone())
    };

    tracing::info!(code = %code, "Voucher submitted");
    tokio::spawn(async move {
        let result = backend.redeem_voucher(&code).await;
        let _ = event_tx.send(AppEvent::VoucherResult { attempt, result }).await;
    });
}

/// Handle receipt submit
///
/// Internal handler function - use [`crate::app::App::submit_receipt`] instead.
pub(crate) fn handle_receipt_submit(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let (receipt_id, attempt, backend) = {
        let mut state = state.write();
        if state.receipt.phase.is_busy() {
            return;
        }

        state.receipt.clear_errors();
        state.receipt.phase = FlowPhase::Validating;

        let receipt_id = state.receipt.receipt_id.trim().to_uppercase();
        if let Err(e) = validation::validate_receipt_id(&receipt_id) {
            state.receipt.receipt_error = Some(e.message().to_string());
            state.receipt.phase = FlowPhase::Idle;
            return;
        }

        state.receipt.phase = FlowPhase::Pending;
        state.receipt.attempt += 1;
        let toast = state.notifications.pending("Verifying receipt…");
        state.receipt.pending_toast = Some(toast);

        (receipt_id, state.receipt.attempt, state.backend.clone())
    };

    tracing::info!(receipt_id = %receipt_id, "Receipt submitted");
    tokio::spawn(async move {
        let result = backend.verify_receipt(&receipt_id).await;
        let _ = event_tx.send(AppEvent::ReceiptResult { attempt, result }).await;
    });
}
