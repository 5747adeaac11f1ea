//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and the session.

pub mod auth_service;
pub mod feed_controller;
pub mod navigation;
pub mod quote_composer;
pub mod session;
pub mod validation;

pub use auth_service::AuthService;
pub use feed_controller::{FeedController, FeedState, FeedStatus, LoadOutcome};
pub use navigation::{activate, Activation, View};
pub use quote_composer::{PublishedQuote, QuoteComposer};
pub use session::Session;
pub use validation::{validate_credentials, validate_draft};
