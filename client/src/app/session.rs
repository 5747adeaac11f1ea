//! Session context
//!
//! Wraps the session store behind the few operations the rest of the
//! application needs. Components that talk to protected endpoints receive
//! an `Arc<Session<S>>` instead of reaching for global storage.

use std::sync::Arc;

use crate::domain::entities::SessionToken;
use crate::domain::ports::SessionStore;
use crate::error::AppError;

pub struct Session<S>
where
    S: SessionStore,
{
    store: Arc<S>,
}

impl<S> Session<S>
where
    S: SessionStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Current token, if a session is active
    pub fn token(&self) -> Result<Option<SessionToken>, AppError> {
        Ok(self.store.load()?)
    }

    /// Current token, or `AuthRequired` when there is none
    pub fn require(&self) -> Result<SessionToken, AppError> {
        self.token()?.ok_or(AppError::AuthRequired)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }

    /// Start a session with a freshly issued token
    pub fn begin(&self, token: &SessionToken) -> Result<(), AppError> {
        self.store.save(token)?;
        tracing::info!("Session started");
        Ok(())
    }

    /// Destroy the session
    pub fn end(&self) -> Result<(), AppError> {
        self.store.clear()?;
        tracing::info!("Session ended");
        Ok(())
    }

    /// End the session if `err` says the service rejected our token
    pub fn expire_on(&self, err: &AppError) {
        if !err.is_auth_required() {
            return;
        }
        tracing::warn!("Quote service rejected the session token; logging out");
        if let Err(e) = self.end() {
            tracing::error!("Failed to clear rejected session: {}", e);
        }
    }
}
