//! # Notification Center
//!
//! Toast notification stack for auth progress and outcome messages.
//! Headless: the shell renders [`NotificationCenter::active`] however it
//! likes; this type owns ordering, expiry and dismissal semantics.

use std::time::{Duration, Instant};

/// Default auto-dismiss duration for info and error toasts.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3500);

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
    /// Spinner-style message for an in-flight request; never auto-dismissed
    Pending,
}

/// Opaque reference to a displayed notification.
///
/// Owned by whoever created the notification until it is dismissed or its
/// duration elapses, whichever comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationHandle(u64);

/// One displayed message.
#[derive(Debug, Clone)]
pub struct Notification {
    id: u64,
    pub kind: NotificationKind,
    pub message: String,
    /// `None` means manual dismiss only
    deadline: Option<Instant>,
}

impl Notification {
    pub fn handle(&self) -> NotificationHandle {
        NotificationHandle(self.id)
    }
}

/// Transient status messages, stacked in arrival order.
///
/// Concurrent notifications are independently dismissible; dismissing one
/// never affects others. Displaying never blocks the caller.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    next_id: u64,
    active: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a message. `duration = None` means manual dismiss only (used
    /// for pending states awaiting an async result).
    pub fn notify(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        duration: Option<Duration>,
    ) -> NotificationHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.active.push(Notification {
            id,
            kind,
            message: message.into(),
            deadline: duration.map(|d| Instant::now() + d),
        });
        NotificationHandle(id)
    }

    /// Show an info toast with the default duration.
    pub fn info(&mut self, message: impl Into<String>) -> NotificationHandle {
        self.notify(message, NotificationKind::Info, Some(DEFAULT_TOAST_DURATION))
    }

    /// Show a success toast. Durations vary by outcome, so callers pass one.
    pub fn success(&mut self, message: impl Into<String>, duration: Duration) -> NotificationHandle {
        self.notify(message, NotificationKind::Success, Some(duration))
    }

    /// Show an error toast with the default duration.
    pub fn error(&mut self, message: impl Into<String>) -> NotificationHandle {
        self.notify(message, NotificationKind::Error, Some(DEFAULT_TOAST_DURATION))
    }

    /// Show a manual-dismiss pending toast for an in-flight request.
    pub fn pending(&mut self, message: impl Into<String>) -> NotificationHandle {
        self.notify(message, NotificationKind::Pending, None)
    }

    /// Dismiss a notification. Idempotent: unknown or already-dismissed
    /// handles are a no-op.
    pub fn dismiss(&mut self, handle: NotificationHandle) {
        self.active.retain(|n| n.id != handle.0);
    }

    /// Drop notifications whose duration has elapsed. Called from the
    /// orchestrator tick.
    pub fn sweep_expired(&mut self) {
        let now = Instant::now();
        self.active.retain(|n| match n.deadline {
            Some(deadline) => now < deadline,
            None => true,
        });
    }

    /// Currently displayed notifications, oldest first.
    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    pub fn is_active(&self, handle: NotificationHandle) -> bool {
        self.active.iter().any(|n| n.id == handle.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stacking_preserves_arrival_order() {
        let mut center = NotificationCenter::new();
        center.info("first");
        center.error("second");
        center.pending("third");

        let messages: Vec<&str> = center.active().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, ["first", "second", "third"]);
    }

    #[test]
    fn test_dismiss_is_independent_and_idempotent() {
        let mut center = NotificationCenter::new();
        let first = center.info("first");
        let second = center.info("second");

        center.dismiss(first);
        assert!(!center.is_active(first));
        assert!(center.is_active(second));

        // Dismissing again is a no-op, not an error
        center.dismiss(first);
        assert!(center.is_active(second));
        assert_eq!(center.active().len(), 1);
    }

    #[test]
    fn test_sweep_drops_expired_but_keeps_manual() {
        let mut center = NotificationCenter::new();
        let expired = center.notify("old", NotificationKind::Info, Some(Duration::ZERO));
        let pending = center.pending("waiting…");

        center.sweep_expired();
        assert!(!center.is_active(expired));
        assert!(center.is_active(pending));
    }

    #[test]
    fn test_handles_stay_distinct_after_dismissal() {
        let mut center = NotificationCenter::new();
        let first = center.info("first");
        center.dismiss(first);

        let second = center.info("second");
        assert_ne!(first, second);
        assert!(center.is_active(second));
    }
}
