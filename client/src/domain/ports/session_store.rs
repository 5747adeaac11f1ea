//! Session store port trait
//!
//! The narrow read/write interface for the persisted session token.

use crate::domain::entities::SessionToken;
use crate::error::SessionError;

/// Persistent storage for a single session token
pub trait SessionStore: Send + Sync {
    /// Read the stored token, if any
    fn load(&self) -> Result<Option<SessionToken>, SessionError>;

    /// Replace the stored token
    fn save(&self, token: &SessionToken) -> Result<(), SessionError>;

    /// Remove the stored token
    fn clear(&self) -> Result<(), SessionError>;
}
