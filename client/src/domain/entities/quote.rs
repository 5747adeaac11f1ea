//! Quote domain entity
//!
//! A quote is a text + image post published on the remote service. Quotes
//! are the items of the paginated feed and are immutable once fetched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::media::MediaUpload;

/// Stable identifier for a quote
///
/// The remote service emits ids as either JSON strings or numbers; both are
/// normalised to their string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct QuoteId(pub String);

impl QuoteId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QuoteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for QuoteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for QuoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for QuoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => QuoteId(s),
            RawId::Number(n) => QuoteId(n.to_string()),
        })
    }
}

/// A quote as listed in the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub text: String,
    /// Hosted URL of the attached image
    #[serde(rename = "mediaUrl", alias = "imageUrl", default)]
    pub image_url: String,
    /// Username of the poster
    #[serde(rename = "username", alias = "author", default)]
    pub author: String,
    /// `None` when the service sent no usable timestamp
    #[serde(rename = "createdAt", default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// RFC 3339 strings or epoch milliseconds; anything else is dropped so one
/// malformed item cannot fail the whole page
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .map(|ts| ts.with_timezone(&Utc))
            .ok(),
        Some(serde_json::Value::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}

/// Body of a quote creation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewQuote {
    pub text: String,
    #[serde(rename = "mediaUrl")]
    pub media_url: String,
}

/// Unvalidated input of the create-quote form
#[derive(Debug, Clone, Default)]
pub struct QuoteDraft {
    pub text: String,
    pub image: Option<MediaUpload>,
}
