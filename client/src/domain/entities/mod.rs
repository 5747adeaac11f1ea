//! Domain entities
//!
//! Plain models for the quote feed, media uploads and sessions.

pub mod media;
pub mod quote;
pub mod session;

pub use media::{ImageFormat, MediaUpload};
pub use quote::{NewQuote, Quote, QuoteDraft, QuoteId};
pub use session::{Credentials, SessionToken};
