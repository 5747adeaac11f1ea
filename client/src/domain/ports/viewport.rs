//! Viewport port trait
//!
//! The presentation layer reports visibility of rendered feed items through
//! this interface, so the feed can be driven without a real viewport.

use async_trait::async_trait;

use crate::domain::entities::QuoteId;

/// Receives "item became visible" events from a viewport
#[async_trait]
pub trait VisibilityListener: Send + Sync {
    async fn item_visible(&self, id: &QuoteId);
}
