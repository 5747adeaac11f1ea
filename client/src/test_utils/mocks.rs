//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing and that
//! record what they were asked to do.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use tokio::sync::{mpsc, oneshot};

use crate::domain::entities::{Credentials, MediaUpload, NewQuote, Quote, SessionToken};
use crate::domain::ports::{QuoteService, SessionStore};
use crate::error::{QuoteServiceError, SessionError};

// ============================================================================
// In-Memory Session Store
// ============================================================================

#[derive(Default)]
pub struct InMemorySessionStore {
    token: Arc<RwLock<Option<SessionToken>>>,
    should_fail: bool,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation fails with an I/O error
    pub fn failing() -> Self {
        Self {
            token: Arc::new(RwLock::new(None)),
            should_fail: true,
        }
    }

    /// Pre-populate with a token
    pub fn with_token(self, token: &str) -> Self {
        *self.token.write().unwrap() = Some(SessionToken::new(token));
        self
    }

    fn check(&self) -> Result<(), SessionError> {
        if self.should_fail {
            return Err(SessionError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "mock failure",
            )));
        }
        Ok(())
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Option<SessionToken>, SessionError> {
        self.check()?;
        Ok(self.token.read().unwrap().clone())
    }

    fn save(&self, token: &SessionToken) -> Result<(), SessionError> {
        self.check()?;
        *self.token.write().unwrap() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.check()?;
        *self.token.write().unwrap() = None;
        Ok(())
    }
}

// ============================================================================
// Mock Quote Service
// ============================================================================

/// A recorded `get_quotes` call
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
    pub token: String,
}

/// A scripted `get_quotes` response, optionally held back until released
struct PageScript {
    result: Result<Vec<Quote>, QuoteServiceError>,
    gate: Option<oneshot::Receiver<()>>,
}

/// Quote service whose page responses are scripted in order
///
/// Once the script runs out every page request returns an empty page.
#[derive(Default)]
pub struct MockQuoteService {
    pages: Arc<RwLock<VecDeque<PageScript>>>,
    page_requests: Arc<RwLock<Vec<PageRequest>>>,
    request_events: Arc<RwLock<Option<mpsc::UnboundedSender<usize>>>>,
    /// Token handed out by `login`; `None` rejects every login
    login_token: Option<String>,
    login_attempts: Arc<RwLock<Vec<String>>>,
    upload_failure: Arc<RwLock<Option<QuoteServiceError>>>,
    uploads: Arc<RwLock<Vec<String>>>,
    create_failure: Arc<RwLock<Option<QuoteServiceError>>>,
    created: Arc<RwLock<Vec<(NewQuote, String)>>>,
}

impl MockQuoteService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, quotes: Vec<Quote>) -> Self {
        self.push_page(quotes);
        self
    }

    pub fn with_page_failure(self, error: QuoteServiceError) -> Self {
        self.pages.write().unwrap().push_back(PageScript {
            result: Err(error),
            gate: None,
        });
        self
    }

    pub fn with_login_token(mut self, token: &str) -> Self {
        self.login_token = Some(token.to_string());
        self
    }

    pub fn with_upload_failure(self, error: QuoteServiceError) -> Self {
        *self.upload_failure.write().unwrap() = Some(error);
        self
    }

    pub fn with_create_failure(self, error: QuoteServiceError) -> Self {
        *self.create_failure.write().unwrap() = Some(error);
        self
    }

    pub fn push_page(&self, quotes: Vec<Quote>) {
        self.pages.write().unwrap().push_back(PageScript {
            result: Ok(quotes),
            gate: None,
        });
    }

    /// Script a page that is only answered once the returned sender fires
    pub fn push_gated_page(&self, quotes: Vec<Quote>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.pages.write().unwrap().push_back(PageScript {
            result: Ok(quotes),
            gate: Some(rx),
        });
        tx
    }

    /// Script a failed page that is only answered once the returned sender fires
    pub fn push_gated_page_failure(&self, error: QuoteServiceError) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.pages.write().unwrap().push_back(PageScript {
            result: Err(error),
            gate: Some(rx),
        });
        tx
    }

    /// Receive the offset of every page request as it starts
    pub fn request_events(&self) -> mpsc::UnboundedReceiver<usize> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.request_events.write().unwrap() = Some(tx);
        rx
    }

    pub fn page_requests(&self) -> Vec<PageRequest> {
        self.page_requests.read().unwrap().clone()
    }

    pub fn login_attempts(&self) -> Vec<String> {
        self.login_attempts.read().unwrap().clone()
    }

    pub fn uploaded_files(&self) -> Vec<String> {
        self.uploads.read().unwrap().clone()
    }

    /// Created quotes with the token each was sent with
    pub fn created_quotes(&self) -> Vec<(NewQuote, String)> {
        self.created.read().unwrap().clone()
    }
}

#[async_trait]
impl QuoteService for MockQuoteService {
    async fn login(&self, credentials: &Credentials) -> Result<SessionToken, QuoteServiceError> {
        self.login_attempts
            .write()
            .unwrap()
            .push(credentials.username.clone());

        match &self.login_token {
            Some(token) => Ok(SessionToken::new(token.clone())),
            None => Err(QuoteServiceError::Unauthorized),
        }
    }

    async fn upload_media(&self, media: &MediaUpload) -> Result<String, QuoteServiceError> {
        if let Some(error) = self.upload_failure.write().unwrap().take() {
            return Err(error);
        }

        self.uploads.write().unwrap().push(media.file_name.clone());
        Ok(format!("https://media.test/{}", media.file_name))
    }

    async fn create_quote(
        &self,
        quote: &NewQuote,
        token: &SessionToken,
    ) -> Result<serde_json::Value, QuoteServiceError> {
        if let Some(error) = self.create_failure.write().unwrap().take() {
            return Err(error);
        }

        let mut created = self.created.write().unwrap();
        created.push((quote.clone(), token.as_str().to_string()));
        Ok(serde_json::json!({
            "id": created.len(),
            "text": quote.text,
            "mediaUrl": quote.media_url,
        }))
    }

    async fn get_quotes(
        &self,
        limit: usize,
        offset: usize,
        token: &SessionToken,
    ) -> Result<Vec<Quote>, QuoteServiceError> {
        self.page_requests.write().unwrap().push(PageRequest {
            limit,
            offset,
            token: token.as_str().to_string(),
        });
        if let Some(events) = self.request_events.read().unwrap().as_ref() {
            let _ = events.send(offset);
        }

        let script = self.pages.write().unwrap().pop_front();
        let Some(script) = script else {
            return Ok(Vec::new());
        };

        if let Some(gate) = script.gate {
            // A dropped sender releases the page too
            let _ = gate.await;
        }
        script.result
    }
}
