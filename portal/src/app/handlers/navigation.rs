//! # Navigation Handlers
//!
//! Presenting-surface and tab management for the connect and payment
//! modals. Re-presenting a surface acknowledges any terminal outcome, so
//! the hosted forms reset to idle; in-flight work is left to finish and its
//! resolution is dropped by the attempt guard.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::app::state::{AppState, AuthTab};

/// Dismiss any pending toasts and return the connect-modal forms to idle.
fn reset_connect_forms(state: &mut AppState) {
    let toasts = [
        state.login.pending_toast.take(),
        state.voucher.pending_toast.take(),
        state.receipt.pending_toast.take(),
    ];
    for toast in toasts.into_iter().flatten() {
        state.notifications.dismiss(toast);
    }
    state.login.reset();
    state.voucher.reset();
    state.receipt.reset();
}

/// Open the connect modal (login/voucher/receipt panels).
pub(crate) fn open_connect_modal(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    reset_connect_forms(&mut state);
    state.connect_modal_open = true;
}

/// Close the connect modal.
pub(crate) fn close_connect_modal(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    reset_connect_forms(&mut state);
    state.connect_modal_open = false;
}

/// Switch the active panel inside the connect modal.
pub(crate) fn select_tab(state: Arc<RwLock<AppState>>, tab: AuthTab) {
    let mut state = state.write();
    state.active_tab = tab;
}

/// Open the payment modal for a plan picked in the plan-selection
/// collaborator. A fresh selection starts with a clean phone field.
pub(crate) fn open_payment_modal(state: Arc<RwLock<AppState>>, plan_label: String) {
    let mut state = state.write();
    if let Some(toast) = state.payment.pending_toast.take() {
        state.notifications.dismiss(toast);
    }
    state.payment.reset();
    state.payment.phone.clear();
    state.payment.selected_plan = Some(plan_label);
    state.payment_modal_open = true;
}

/// Close the payment modal. The phone field is kept; it is cleared on the
/// next plan selection.
pub(crate) fn close_payment_modal(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    if let Some(toast) = state.payment.pending_toast.take() {
        state.notifications.dismiss(toast);
    }
    state.payment.reset();
    state.payment_modal_open = false;
}
