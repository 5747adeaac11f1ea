//! Create-quote submission
//!
//! Two sequential steps: upload the image, then publish the quote that
//! references the hosted URL. The quote is never published when the upload
//! fails, and nothing is kept locally from a half-finished submission.

use std::sync::Arc;

use crate::app::session::Session;
use crate::app::validation::validate_draft;
use crate::domain::entities::{NewQuote, QuoteDraft};
use crate::domain::ports::{QuoteService, SessionStore};
use crate::error::{AppError, ValidationErrors};

/// A successfully published quote
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedQuote {
    pub media_url: String,
    /// The record as returned by the service
    pub record: serde_json::Value,
}

/// Service for publishing quotes with an uploaded image
pub struct QuoteComposer<Q, S>
where
    Q: QuoteService,
    S: SessionStore,
{
    quotes: Arc<Q>,
    session: Arc<Session<S>>,
}

impl<Q, S> QuoteComposer<Q, S>
where
    Q: QuoteService,
    S: SessionStore,
{
    pub fn new(quotes: Arc<Q>, session: Arc<Session<S>>) -> Self {
        Self { quotes, session }
    }

    pub async fn submit(&self, draft: QuoteDraft) -> Result<PublishedQuote, AppError> {
        validate_draft(&draft)?;
        let token = self.session.require()?;

        let Some(image) = draft.image else {
            let mut errors = ValidationErrors::new();
            errors.add("image", "Image is required");
            return Err(AppError::Validation(errors));
        };

        tracing::info!(
            "Uploading {} ({} bytes, {})",
            image.file_name,
            image.bytes.len(),
            image.content_type
        );
        let media_url = self
            .quotes
            .upload_media(&image)
            .await
            .map_err(AppError::from)
            .inspect_err(|e| tracing::warn!("Image upload failed: {}", e))?;

        let new_quote = NewQuote {
            text: draft.text,
            media_url: media_url.clone(),
        };
        let record = match self.quotes.create_quote(&new_quote, &token).await {
            Ok(record) => record,
            Err(e) => {
                let err = AppError::from(e);
                tracing::warn!("Quote creation failed: {}", err);
                self.session.expire_on(&err);
                return Err(err);
            }
        };

        tracing::info!("Published quote with media {}", media_url);
        Ok(PublishedQuote { media_url, record })
    }
}
