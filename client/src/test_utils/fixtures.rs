//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::{Quote, QuoteId};

/// Create a quote with the given id
pub fn test_quote(id: &str) -> Quote {
    Quote {
        id: QuoteId::from(id),
        text: format!("quote {}", id),
        image_url: format!("https://media.test/{}.png", id),
        author: "test-user".to_string(),
        created_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 14, 5, 0).unwrap()),
    }
}

/// Create one quote per id, in order
pub fn test_quotes(ids: &[&str]) -> Vec<Quote> {
    ids.iter().map(|id| test_quote(id)).collect()
}

/// Create a quote with a random id
pub fn random_quote() -> Quote {
    test_quote(&Uuid::new_v4().to_string())
}
