//! # Portal Demo Driver
//!
//! Thin stand-in for the rendering shell: scripts one pass over each auth
//! flow against the mock backend and logs every visible notification. The
//! real shell would bind its inputs and buttons to the same [`App`] contract.

use std::sync::Arc;

use portal::app::{App, AuthTab, FlowId, FlowPhase};
use portal::core::PortalConfig;
use portal::services::MockBackend;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> portal::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("portal=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = PortalConfig::from_env()?;
    let backend = if config.instant_backend {
        MockBackend::instant()
    } else {
        MockBackend::new()
    };
    let backend = Arc::new(backend.with_stk_success_rate(config.stk_success_rate));
    let mut app = App::new(backend);

    // Credential login
    app.open_connect_modal();
    {
        let mut state = app.state.write();
        state.login.username = "demo".to_string();
        state.login.password = "1234".to_string();
    }
    app.submit_login();
    settle(&mut app).await;

    // Voucher redemption
    app.open_connect_modal();
    app.select_tab(AuthTab::Voucher);
    app.state.write().voucher.code = "SPEED-1234".to_string();
    app.submit_voucher();
    settle(&mut app).await;

    // Receipt verification: an unsettled receipt first, then a settled one
    app.open_connect_modal();
    app.select_tab(AuthTab::Receipt);
    app.state.write().receipt.receipt_id = "RCP003".to_string();
    app.submit_receipt();
    settle(&mut app).await;

    app.state.write().receipt.receipt_id = "RCP001".to_string();
    app.accept_key(FlowId::Receipt);
    settle(&mut app).await;

    // Push payment for a plan picked from the catalog
    let plan = shared::plan_catalog()
        .into_iter()
        .find(|p| p.price_ksh == 80)
        .expect("catalog has a Ksh 80 plan");
    app.open_payment_modal(plan.label);
    app.state.write().payment.phone = "0712 345 678".to_string();
    app.submit_payment();
    settle(&mut app).await;

    if app.state.read().payment.phase == FlowPhase::Failed {
        // The payment surface re-presents itself shortly after a timeout
        settle(&mut app).await;
        tracing::info!(
            reopened = app.state.read().payment_modal_open,
            "Payment surface re-presented for retry"
        );
    }

    if let Some(session) = &app.state.read().session {
        tracing::info!(via = ?session.via, label = %session.label, "Portal session active");
    }

    Ok(())
}

/// Wait for one async result, apply it, then log the visible toasts.
async fn settle(app: &mut App) {
    if let Ok(event) = app.event_rx.recv().await {
        app.handle_event(event);
    }
    for toast in app.state.read().notifications.active() {
        tracing::info!(kind = ?toast.kind, "{}", toast.message);
    }
}
