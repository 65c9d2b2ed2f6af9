//! # Notifications
//!
//! Toast queue for success/error/warning/info messages raised by the units.
//! A front-end drains it; the CLI driver prints it.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// How many toasts are kept before the oldest is dropped.
pub const DEFAULT_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "success",
            NotificationLevel::Error => "error",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// Notification manager for the application
#[derive(Debug)]
pub struct NotificationManager {
    toasts: VecDeque<Notification>,
    capacity: usize,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            toasts: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, notification: Notification) {
        if self.toasts.len() == self.capacity {
            self.toasts.pop_front();
        }
        self.toasts.push_back(notification);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::new(NotificationLevel::Success, message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::new(NotificationLevel::Error, message));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Notification::new(NotificationLevel::Warning, message));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::new(NotificationLevel::Info, message));
    }

    /// Take every pending toast, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.toasts.drain(..).collect()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.toasts.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
