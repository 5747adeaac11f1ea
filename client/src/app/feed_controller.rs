//! Paginated feed controller
//!
//! Loads the quote feed one page at a time. The next page is requested only
//! when the presentation layer reports that the last loaded item (the
//! frontier) became visible. At most one page request is outstanding; a
//! `reset` abandons it, and its response is dropped on arrival by comparing
//! the generation it was issued under with the current one.
//!
//! State machine:
//!
//! ```text
//! idle ──load_more──▶ loading ──▶ idle | exhausted | error
//! error ──load_more / retry──▶ loading
//! exhausted ──reset──▶ loading
//! ```

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::app::session::Session;
use crate::config::{DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::domain::entities::{Quote, QuoteId};
use crate::domain::ports::{QuoteService, SessionStore, VisibilityListener};
use crate::error::AppError;

/// Coarse status derived from `FeedState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedStatus {
    Idle,
    Loading,
    Exhausted,
    Error,
}

/// Everything the presentation layer needs to render the feed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedState {
    /// Loaded quotes in fetch order
    pub items: Vec<Quote>,
    /// Offset of the next page to request
    pub cursor: usize,
    pub exhausted: bool,
    pub loading: bool,
    pub last_error: Option<AppError>,
    /// Items dropped because their id was already in `items`
    pub duplicates_dropped: usize,
}

impl FeedState {
    pub fn status(&self) -> FeedStatus {
        if self.loading {
            FeedStatus::Loading
        } else if self.exhausted {
            FeedStatus::Exhausted
        } else if self.last_error.is_some() {
            FeedStatus::Error
        } else {
            FeedStatus::Idle
        }
    }

    /// Id of the last loaded item
    pub fn frontier(&self) -> Option<&QuoteId> {
        self.items.last().map(|q| &q.id)
    }
}

/// What a single `load_more` call did
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// A page arrived; carries the number of items added
    Appended(usize),
    /// An empty page arrived; the feed is now exhausted
    Exhausted,
    /// The request failed; the error is also kept in `last_error`
    Failed(AppError),
    /// Another request is already in flight
    Busy,
    /// The feed was already exhausted; nothing requested
    AlreadyExhausted,
    /// A response arrived after a reset and was dropped
    Discarded,
    /// The reported item is not the frontier; nothing requested
    NotFrontier,
}

struct Inner {
    state: FeedState,
    /// Bumped by every reset
    generation: u64,
    seen: HashSet<QuoteId>,
}

/// Paginated quote feed driven by viewport reports
pub struct FeedController<Q, S>
where
    Q: QuoteService,
    S: SessionStore,
{
    quotes: Arc<Q>,
    session: Arc<Session<S>>,
    page_size: usize,
    timeout: Duration,
    inner: Mutex<Inner>,
}

impl<Q, S> FeedController<Q, S>
where
    Q: QuoteService,
    S: SessionStore,
{
    pub fn new(quotes: Arc<Q>, session: Arc<Session<S>>) -> Self {
        Self {
            quotes,
            session,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            inner: Mutex::new(Inner {
                state: FeedState::default(),
                generation: 0,
                seen: HashSet::new(),
            }),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // State is always left consistent between statements, so a poisoned
        // lock is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> FeedState {
        self.lock().state.clone()
    }

    /// Start over from the first page
    ///
    /// Any request still in flight is abandoned: its response will be
    /// dropped when it arrives.
    pub async fn reset(&self) -> LoadOutcome {
        {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.state = FeedState::default();
            inner.seen.clear();
            tracing::debug!("Feed reset (generation {})", inner.generation);
        }

        self.load_more().await
    }

    /// Request the next page unless one is in flight or the feed is exhausted
    pub async fn load_more(&self) -> LoadOutcome {
        let (generation, offset) = {
            let mut inner = self.lock();
            if inner.state.loading {
                tracing::debug!("Page request already in flight; ignoring load_more");
                return LoadOutcome::Busy;
            }
            if inner.state.exhausted {
                return LoadOutcome::AlreadyExhausted;
            }
            inner.state.loading = true;
            (inner.generation, inner.state.cursor)
        };

        let result = self.fetch_page(offset).await;

        let mut inner = self.lock();
        if inner.generation != generation {
            tracing::debug!(
                "Dropping stale page for offset {} (generation {}, now {})",
                offset,
                generation,
                inner.generation
            );
            return LoadOutcome::Discarded;
        }

        inner.state.loading = false;
        match result {
            Ok(page) if page.is_empty() => {
                inner.state.exhausted = true;
                inner.state.last_error = None;
                tracing::info!("Feed exhausted after {} items", inner.state.cursor);
                LoadOutcome::Exhausted
            }
            Ok(page) => {
                let received = page.len();
                let mut appended = 0;
                for quote in page {
                    if inner.seen.insert(quote.id.clone()) {
                        inner.state.items.push(quote);
                        appended += 1;
                    } else {
                        tracing::warn!("Dropping duplicate quote {}", quote.id);
                        inner.state.duplicates_dropped += 1;
                    }
                }
                inner.state.cursor += received;
                inner.state.last_error = None;
                tracing::debug!(
                    "Loaded {} quotes at offset {} (cursor now {})",
                    received,
                    offset,
                    inner.state.cursor
                );
                LoadOutcome::Appended(appended)
            }
            Err(err) => {
                tracing::warn!("Failed to load quotes at offset {}: {}", offset, err);
                inner.state.last_error = Some(err.clone());
                drop(inner);
                self.session.expire_on(&err);
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Retry after a failure; same as `load_more`
    pub async fn retry(&self) -> LoadOutcome {
        self.load_more().await
    }

    /// Viewport report: `id` became visible
    ///
    /// Loads the next page only when `id` is the frontier.
    pub async fn notify_visible(&self, id: &QuoteId) -> LoadOutcome {
        let is_frontier = self.lock().state.frontier() == Some(id);
        if !is_frontier {
            return LoadOutcome::NotFrontier;
        }
        self.load_more().await
    }

    async fn fetch_page(&self, offset: usize) -> Result<Vec<Quote>, AppError> {
        let token = self.session.require()?;

        let request = self.quotes.get_quotes(self.page_size, offset, &token);
        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(page)) => Ok(page),
            Ok(Err(e)) => Err(AppError::from(e)),
            Err(_) => Err(AppError::Network("request timed out".to_string())),
        }
    }
}

#[async_trait]
impl<Q, S> VisibilityListener for FeedController<Q, S>
where
    Q: QuoteService,
    S: SessionStore,
{
    async fn item_visible(&self, id: &QuoteId) {
        self.notify_visible(id).await;
    }
}
