//! # Application Events
//!
//! Events sent from the units (and the payment poller task) to the [`crate::app::App`]
//! that owns them, over an unbounded `async-channel`.

use async_channel::{Receiver, Sender};
use shared::{PaymentStatus, Session};

use super::notifications::{Notification, NotificationLevel};

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Toast for the notification queue
    Notify(Notification),
    /// An order's server state changed; the owner should refetch the listing
    /// and hand the fresh order back to its card.
    OrderReloadRequested(String),
    PaymentStatusChanged {
        transaction_id: Option<String>,
        status: PaymentStatus,
    },
    SessionChanged(Session),
}

/// Sending half handed to each unit.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: Sender<AppEvent>,
}

impl EventSink {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        Self { tx }
    }

    /// Fresh sink with its receiver.
    pub fn channel() -> (Self, Receiver<AppEvent>) {
        let (tx, rx) = async_channel::unbounded();
        (Self::new(tx), rx)
    }

    pub fn emit(&self, event: AppEvent) {
        // Only fails once the owner is gone.
        if self.tx.try_send(event).is_err() {
            tracing::debug!("Event dropped: receiver closed");
        }
    }

    pub fn notify(&self, level: NotificationLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NotificationLevel::Error => tracing::warn!(%message, "Error notification"),
            _ => tracing::debug!(level = level.as_str(), %message, "Notification"),
        }
        self.emit(AppEvent::Notify(Notification::new(level, message)));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(NotificationLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(NotificationLevel::Error, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.notify(NotificationLevel::Warning, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(NotificationLevel::Info, message);
    }
}

/// Collect everything currently queued on `rx`.
pub fn drain(rx: &Receiver<AppEvent>) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Notifications queued on `rx`, as `(level, message)`.
    pub fn notifications(rx: &Receiver<AppEvent>) -> Vec<(NotificationLevel, String)> {
        drain(rx)
            .into_iter()
            .filter_map(|event| match event {
                AppEvent::Notify(n) => Some((n.level, n.message)),
                _ => None,
            })
            .collect()
    }
}
