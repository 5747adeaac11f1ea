//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod http;
pub mod session;

pub use http::HttpQuoteService;
pub use session::FileSessionStore;
