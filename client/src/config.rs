use std::env;
use std::path::PathBuf;

/// Default number of quotes requested per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the quote API (`/login`, `/postQuote`, `/getQuotes`)
    pub api_url: String,
    /// Full URL of the media upload endpoint
    pub media_url: String,
    /// File holding the persisted session token
    pub session_file: PathBuf,
    pub page_size: usize,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "https://assignment.stage.crafto.app".to_string(),
            media_url: "https://crafto.app/crafto/v1.0/media/assignment/upload".to_string(),
            session_file: default_session_file(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            api_url: env::var("QUOTEWALL_API_URL").unwrap_or(defaults.api_url),
            media_url: env::var("QUOTEWALL_MEDIA_URL").unwrap_or(defaults.media_url),
            session_file: env::var("QUOTEWALL_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
            page_size: parse_var("QUOTEWALL_PAGE_SIZE", defaults.page_size),
            request_timeout_secs: parse_var(
                "QUOTEWALL_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
        }
    }
}

/// Parse a positive numeric env var, falling back to `default`
fn parse_var<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + PartialEq + Default + Copy,
{
    match env::var(name) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(v) if v != T::default() => v,
            _ => {
                tracing::warn!("Ignoring invalid {}={:?}, using default", name, raw);
                default
            }
        },
        Err(_) => default,
    }
}

fn default_session_file() -> PathBuf {
    let home = env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(".quotewall").join("session.json")
}
