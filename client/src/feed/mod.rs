//! Feed module
//!
//! LLM-readable rendering of the quote feed.

pub mod renderer;

pub use renderer::{format_timestamp, render_error, render_feed, render_published};
