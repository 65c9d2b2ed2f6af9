//! # Session Store
//!
//! Explicit owner of the signed-in identity. Created once by [`crate::app::App`]
//! and cloned into whatever needs to read it; there is no global.
//!
//! Lifecycle: [`SessionStore::init`] probes `GET /me` exactly once per store,
//! [`SessionStore::login`] and [`SessionStore::logout`] replace the session
//! explicitly. A failed probe yields the anonymous session.

use std::sync::Arc;

use parking_lot::RwLock;
use shared::{LoginRequest, Role, Session};

use super::events::{AppEvent, EventSink};
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;

#[derive(Debug, Default)]
struct SessionInner {
    session: Session,
    initialized: bool,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<SessionInner>>,
    events: EventSink,
}

impl SessionStore {
    pub fn new(events: EventSink) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionInner::default())),
            events,
        }
    }

    /// Probe the backend for an existing session. Only the first call hits the
    /// network; later calls return the current session.
    pub async fn init(&self, api: &dyn ApiService) -> Session {
        if self.inner.read().initialized {
            return self.current();
        }

        let session = match api.me().await.into_result() {
            Ok(identity) => {
                tracing::info!(user_id = %identity.user_id, role = identity.role.as_str(), "Restored session");
                Session::from(identity)
            }
            Err(reason) => {
                tracing::debug!(%reason, "No active session");
                Session::anonymous()
            }
        };

        {
            let mut inner = self.inner.write();
            // A login that raced the probe wins.
            if inner.initialized {
                return inner.session.clone();
            }
            inner.session = session.clone();
            inner.initialized = true;
        }

        self.events.emit(AppEvent::SessionChanged(session.clone()));
        session
    }

    pub async fn login(&self, api: &dyn ApiService, user_id: &str, password: &str) -> Result<Session> {
        if user_id.trim().is_empty() || password.is_empty() {
            let message = "User ID and password are required.";
            self.events.error(message);
            return Err(AppError::Validation(message.to_string()));
        }

        let request = LoginRequest {
            user_id: user_id.trim().to_string(),
            password: password.to_string(),
        };

        match api.login(&request).await.into_result() {
            Ok(identity) => {
                let session = Session::from(identity);
                self.replace(session.clone());
                self.events.success(format!("Welcome, {}!", session.user.id));
                Ok(session)
            }
            Err(message) => {
                self.events.error(format!("Login failed: {}", message));
                Err(AppError::Api(message))
            }
        }
    }

    /// Drop back to the anonymous session. Local only; the cookie expires server-side.
    pub fn logout(&self) {
        self.replace(Session::anonymous());
        self.events.info("Logged out.");
    }

    pub fn current(&self) -> Session {
        self.inner.read().session.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.read().initialized
    }

    /// Guard for a protected operation: must be signed in, and hold `role` when given.
    pub fn require(&self, role: Option<Role>) -> Result<Session> {
        let session = self.current();
        if !session.is_authenticated {
            return Err(AppError::State("Please log in first.".to_string()));
        }
        if let Some(required) = role {
            if session.user.role != Some(required) {
                return Err(AppError::State(format!(
                    "This action requires the {} role.",
                    required.as_str()
                )));
            }
        }
        Ok(session)
    }

    /// Update the wallet shown for the signed-in user after a confirmed top-up.
    pub fn set_wallet(&self, wallet: f64) {
        let session = {
            let mut inner = self.inner.write();
            if !inner.session.is_authenticated {
                return;
            }
            inner.session.user.wallet = wallet;
            inner.session.clone()
        };
        self.events.emit(AppEvent::SessionChanged(session));
    }

    fn replace(&self, session: Session) {
        {
            let mut inner = self.inner.write();
            inner.session = session.clone();
            inner.initialized = true;
        }
        self.events.emit(AppEvent::SessionChanged(session));
    }
}
