//! Feed renderer
//!
//! Renders feed state and submission results to LLM-readable markdown.

use chrono::{DateTime, Utc};

use crate::app::{FeedState, FeedStatus, PublishedQuote};
use crate::domain::entities::Quote;
use crate::error::{AppError, ValidationErrors};

/// Render the whole feed, followed by a status footer
pub fn render_feed(state: &FeedState) -> String {
    let mut buf = String::new();

    buf.push_str("# Quotes\n\n");

    if state.items.is_empty() {
        if state.status() != FeedStatus::Loading {
            buf.push_str("_No quotes yet._\n\n");
        }
    } else {
        for (i, quote) in state.items.iter().enumerate() {
            buf.push_str(&render_quote(i + 1, quote));
            buf.push('\n');
        }
    }

    buf.push_str("---\n\n");
    buf.push_str(&render_footer(state));

    buf
}

fn render_quote(index: usize, quote: &Quote) -> String {
    let created = quote
        .created_at
        .as_ref()
        .map(format_timestamp)
        .unwrap_or_default();
    format!(
        "{}. \"{}\"\n    Uploaded By {} | {}\n    Image: {}\n    id: {}\n",
        index,
        quote.text,
        quote.author,
        created,
        quote.image_url,
        quote.id
    )
}

fn render_footer(state: &FeedState) -> String {
    match state.status() {
        FeedStatus::Loading => "_Loading more quotes..._\n".to_string(),
        FeedStatus::Exhausted => "_You've reached the end of the feed._\n".to_string(),
        FeedStatus::Error => {
            let detail = state
                .last_error
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_default();
            format!(
                "**Failed to load quotes. Please try again.** ({})\nUse `retry` to request the page again.\n",
                detail
            )
        }
        FeedStatus::Idle => match state.frontier() {
            Some(id) => format!(
                "Showing {} quotes. Report `seen` with item_id `{}` to load more.\n",
                state.items.len(),
                id
            ),
            None => "Use `quotes` to load the feed.\n".to_string(),
        },
    }
}

/// Format a timestamp like `May 1, 2024, 2:05 PM` (UTC)
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%B %-d, %Y, %-I:%M %p").to_string()
}

/// Render a successful create-quote submission
pub fn render_published(published: &PublishedQuote) -> String {
    let mut buf = String::from("Quote created successfully!\n\n");
    buf.push_str(&format!("Image: {}\n", published.media_url));
    if let Some(id) = published.record.get("id") {
        buf.push_str(&format!("id: {}\n", id));
    }
    buf
}

/// Render an error as a short notification
pub fn render_error(err: &AppError) -> String {
    match err {
        AppError::Validation(errors) => render_validation(errors),
        AppError::AuthRequired => {
            "You are not logged in. Use `login` with your username and OTP.\n".to_string()
        }
        AppError::Network(msg) => format!("Request failed: {}. Please try again.\n", msg),
        AppError::Session(msg) => format!("Session storage problem: {}\n", msg),
    }
}

fn render_validation(errors: &ValidationErrors) -> String {
    let mut buf = String::from("Please fix the following:\n");
    for e in errors.fields() {
        buf.push_str(&format!("- {}: {}\n", e.field, e.message));
    }
    buf
}
