//! Session entities
//!
//! Login credentials and the opaque token the remote service hands back.

use serde::{Deserialize, Serialize};

/// Opaque session token
///
/// Sent verbatim as the `Authorization` header value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are credentials; keep them out of logs.
impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Input of the login form
#[derive(Debug, Clone, Default, Serialize)]
pub struct Credentials {
    pub username: String,
    pub otp: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, otp: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            otp: otp.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_debug_is_redacted() {
        let token = SessionToken::new("secret-value");
        assert_eq!(format!("{:?}", token), "SessionToken(***)");
        assert_eq!(token.as_str(), "secret-value");
    }

    #[test]
    fn credentials_serialize_as_login_body() {
        let creds = Credentials::new("ada", "1234");
        let json = serde_json::to_string(&creds).unwrap();
        assert_eq!(json, r#"{"username":"ada","otp":"1234"}"#);
    }
}
