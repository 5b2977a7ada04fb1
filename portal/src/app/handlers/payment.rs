//! # Payment Handlers
//!
//! The M-Pesa push-payment flow. Differs from the other panels in two ways:
//! a plan must be bound before submit, and the payment surface closes at
//! pending entry (the user is told to check their phone), re-opening
//! automatically after a failed push.

use std::sync::Arc;
use std::time::Duration;

use async_channel::Sender;
use parking_lot::RwLock;

use crate::app::events::AppEvent;
use crate::app::state::{AppState, FlowPhase};
use crate::utils::validation;

/// Delay before the payment surface is re-presented after a failed push.
pub(crate) const REOPEN_DELAY: Duration = Duration::from_millis(400);

/// Handle pay-now submit
///
/// Internal handler function - use [`crate::app::App::submit_payment`] instead.
pub(crate) fn handle_payment_submit(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let (phone, plan, attempt, backend) = {
        let mut state = state.write();
        if state.payment.phase.is_busy() {
            return;
        }

        state.payment.clear_errors();
        state.payment.phase = FlowPhase::Validating;

        // Plan binding comes from the plan-selection collaborator; a submit
        // without one cannot normally happen through the shell.
        let plan = match &state.payment.selected_plan {
            Some(plan) => plan.clone(),
            None => {
                state.payment.phone_error = Some("Select a plan first.".to_string());
                state.payment.phase = FlowPhase::Idle;
                return;
            }
        };

        let phone = match validation::validate_phone(&state.payment.phone) {
            Ok(normalized) => normalized,
            Err(e) => {
                state.payment.phone_error = Some(e.message().to_string());
                state.payment.phase = FlowPhase::Idle;
                return;
            }
        };

        state.payment.phase = FlowPhase::Pending;
        state.payment.attempt += 1;
        // The surface closes at pending entry; the push lands on the phone
        state.payment_modal_open = false;
        let toast = state.notifications.pending(format!(
            "STK push sent to {}. Check your phone and enter M-Pesa PIN…",
            phone
        ));
        state.payment.pending_toast = Some(toast);

        (phone, plan, state.payment.attempt, state.backend.clone())
    };

    tracing::info!(phone = %phone, plan = %plan, "Push payment initiated");
    tokio::spawn(async move {
        let result = backend.initiate_push_payment(&phone, &plan).await;
        let _ = event_tx.send(AppEvent::PaymentResult { attempt, result }).await;
    });
}

/// Schedule re-presentation of the payment surface after a failed push, so
/// the user can retry without re-navigating plan selection.
pub(crate) fn schedule_payment_reopen(event_tx: Sender<AppEvent>, attempt: u64) {
    tokio::spawn(async move {
        tokio::time::sleep(REOPEN_DELAY).await;
        let _ = event_tx.send(AppEvent::ReopenPaymentSurface { attempt }).await;
    });
}
