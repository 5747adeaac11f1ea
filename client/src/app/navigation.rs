//! View activation and the session gate
//!
//! A view that depends on a session checks for a token once, when it is
//! activated. Without one the activation redirects to the login view and
//! nothing else happens.

use serde::Serialize;

use crate::app::session::Session;
use crate::domain::entities::SessionToken;
use crate::domain::ports::SessionStore;
use crate::error::AppError;

/// Navigation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Login,
    Quotes,
    CreateQuote,
}

impl View {
    pub fn requires_session(&self) -> bool {
        !matches!(self, View::Login)
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            View::Login => write!(f, "login"),
            View::Quotes => write!(f, "quotes"),
            View::CreateQuote => write!(f, "create-quote"),
        }
    }
}

/// Result of activating a view
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// Go ahead; carries the session token when one exists
    Proceed(Option<SessionToken>),
    /// Do nothing and show this view instead
    Redirect(View),
}

/// Activate `view`, consulting the session exactly once
pub fn activate<S>(view: View, session: &Session<S>) -> Result<Activation, AppError>
where
    S: SessionStore,
{
    let token = session.token()?;

    if view.requires_session() && token.is_none() {
        tracing::info!("No session for {} view; redirecting to login", view);
        return Ok(Activation::Redirect(View::Login));
    }

    tracing::debug!("Activated {} view", view);
    Ok(Activation::Proceed(token))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_utils::InMemorySessionStore;

    #[test]
    fn protected_view_without_token_redirects() {
        let session = Session::new(Arc::new(InMemorySessionStore::new()));

        assert_eq!(
            activate(View::Quotes, &session).unwrap(),
            Activation::Redirect(View::Login)
        );
        assert_eq!(
            activate(View::CreateQuote, &session).unwrap(),
            Activation::Redirect(View::Login)
        );
    }

    #[test]
    fn protected_view_with_token_proceeds() {
        let session = Session::new(Arc::new(InMemorySessionStore::new().with_token("tok")));

        assert_eq!(
            activate(View::Quotes, &session).unwrap(),
            Activation::Proceed(Some(SessionToken::new("tok")))
        );
    }

    #[test]
    fn login_view_never_redirects() {
        let session = Session::new(Arc::new(InMemorySessionStore::new()));
        assert_eq!(
            activate(View::Login, &session).unwrap(),
            Activation::Proceed(None)
        );
    }
}
