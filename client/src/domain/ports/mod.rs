//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod quote_service;
pub mod session_store;
pub mod viewport;

pub use quote_service::QuoteService;
pub use session_store::SessionStore;
pub use viewport::VisibilityListener;
