//! Quote service port trait
//!
//! Defines the interface for the remote quote service. The service is
//! opaque: this crate only relies on the request/response shapes below.

use async_trait::async_trait;

use crate::domain::entities::{Credentials, MediaUpload, NewQuote, Quote, SessionToken};
use crate::error::QuoteServiceError;

/// Remote quote service
#[async_trait]
pub trait QuoteService: Send + Sync {
    /// Exchange username + one-time passcode for a session token
    async fn login(&self, credentials: &Credentials) -> Result<SessionToken, QuoteServiceError>;

    /// Upload an image and return its hosted URL
    async fn upload_media(&self, media: &MediaUpload) -> Result<String, QuoteServiceError>;

    /// Publish a quote referencing an uploaded image
    ///
    /// Returns the created record as the service sent it.
    async fn create_quote(
        &self,
        quote: &NewQuote,
        token: &SessionToken,
    ) -> Result<serde_json::Value, QuoteServiceError>;

    /// Fetch one page of quotes
    async fn get_quotes(
        &self,
        limit: usize,
        offset: usize,
        token: &SessionToken,
    ) -> Result<Vec<Quote>, QuoteServiceError>;
}
