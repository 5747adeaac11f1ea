//! Quotewall client
//!
//! Client for a remote quote-sharing service: OTP login, an infinitely
//! paginated quote feed and quote creation with image upload.
//! Uses hexagonal (ports & adapters) architecture: the remote service and
//! the session storage sit behind port traits so the feed logic can be
//! exercised without a network.

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;

#[cfg(test)]
mod test_utils;


pub use adapters::{FileSessionStore, HttpQuoteService};
pub use app::{
    activate, Activation, AuthService, FeedController, FeedState, FeedStatus, LoadOutcome,
    PublishedQuote, QuoteComposer, Session, View,
};
pub use config::Config;
pub use domain::entities::{Credentials, MediaUpload, Quote, QuoteDraft, QuoteId, SessionToken};
pub use error::{AppError, QuoteServiceError, SessionError};
