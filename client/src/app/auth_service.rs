//! Authentication service
//!
//! Login with username + one-time passcode, and logout.

use std::sync::Arc;

use crate::app::session::Session;
use crate::app::validation::validate_credentials;
use crate::domain::entities::{Credentials, SessionToken};
use crate::domain::ports::{QuoteService, SessionStore};
use crate::error::{AppError, QuoteServiceError};

/// Service for OTP login and logout
pub struct AuthService<Q, S>
where
    Q: QuoteService,
    S: SessionStore,
{
    quotes: Arc<Q>,
    session: Arc<Session<S>>,
}

impl<Q, S> AuthService<Q, S>
where
    Q: QuoteService,
    S: SessionStore,
{
    pub fn new(quotes: Arc<Q>, session: Arc<Session<S>>) -> Self {
        Self { quotes, session }
    }

    /// Log in and persist the issued token
    ///
    /// A failed attempt leaves any existing session untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionToken, AppError> {
        validate_credentials(credentials)?;

        let token = self
            .quotes
            .login(credentials)
            .await
            .map_err(|e| match e {
                // On the login form a 401 means bad credentials, not a missing session
                QuoteServiceError::Unauthorized => {
                    AppError::Network("login rejected: check username and OTP".to_string())
                }
                other => other.into(),
            })
            .inspect_err(|e| tracing::warn!("Login failed for {}: {}", credentials.username, e))?;

        self.session.begin(&token)?;
        tracing::info!("Logged in as {}", credentials.username);
        Ok(token)
    }

    pub fn logout(&self) -> Result<(), AppError> {
        self.session.end()
    }
}
