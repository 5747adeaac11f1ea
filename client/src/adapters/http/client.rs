//! HTTP implementation of the quote service port

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Config;
use crate::domain::entities::{Credentials, MediaUpload, NewQuote, Quote, SessionToken};
use crate::domain::ports::QuoteService;
use crate::error::QuoteServiceError;

/// Quote service client backed by `reqwest`
pub struct HttpQuoteService {
    http: Client,
    base_url: String,
    media_url: String,
}

impl HttpQuoteService {
    pub fn new(
        base_url: &str,
        media_url: &str,
        timeout: Duration,
    ) -> Result<Self, QuoteServiceError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            media_url: media_url.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, QuoteServiceError> {
        Self::new(
            &config.api_url,
            &config.media_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, QuoteServiceError> {
        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| QuoteServiceError::Deserialization(e.to_string()))
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, QuoteServiceError> {
    let status = response.status();

    if status.is_success() {
        Ok(response)
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Err(QuoteServiceError::Unauthorized)
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(QuoteServiceError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn request_error(e: reqwest::Error) -> QuoteServiceError {
    if e.is_timeout() {
        QuoteServiceError::Timeout
    } else {
        QuoteServiceError::Request(e)
    }
}

/// Response types from the quote service
#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Deserialize)]
struct UploadedMedia {
    #[serde(rename = "mediaUrl")]
    media_url: String,
}

/// The media endpoint answers with either one object or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum UploadResponse {
    Single(UploadedMedia),
    List(Vec<UploadedMedia>),
}

impl UploadResponse {
    fn into_media_url(self) -> Option<String> {
        match self {
            UploadResponse::Single(media) => Some(media.media_url),
            UploadResponse::List(list) => list.into_iter().next().map(|m| m.media_url),
        }
    }
}

/// `getQuotes` returns either a bare array or `{ "data": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum QuotesResponse {
    List(Vec<Quote>),
    Wrapped {
        #[serde(default)]
        data: Option<Vec<Quote>>,
    },
}

impl From<QuotesResponse> for Vec<Quote> {
    fn from(r: QuotesResponse) -> Self {
        match r {
            QuotesResponse::List(quotes) => quotes,
            QuotesResponse::Wrapped { data } => data.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl QuoteService for HttpQuoteService {
    async fn login(&self, credentials: &Credentials) -> Result<SessionToken, QuoteServiceError> {
        let resp = self
            .http
            .post(self.api_url("/login"))
            .json(credentials)
            .send()
            .await
            .map_err(request_error)?;

        let body: LoginResponse = self.handle_response(resp).await?;
        Ok(SessionToken::new(body.token))
    }

    async fn upload_media(&self, media: &MediaUpload) -> Result<String, QuoteServiceError> {
        let part = Part::bytes(media.bytes.clone())
            .file_name(media.file_name.clone())
            .mime_str(&media.content_type)?;
        let form = Form::new().part("file", part);

        let resp = self
            .http
            .post(&self.media_url)
            .multipart(form)
            .send()
            .await
            .map_err(request_error)?;

        let body: UploadResponse = self.handle_response(resp).await?;
        body.into_media_url().ok_or_else(|| {
            QuoteServiceError::Deserialization("upload response contained no media".to_string())
        })
    }

    async fn create_quote(
        &self,
        quote: &NewQuote,
        token: &SessionToken,
    ) -> Result<serde_json::Value, QuoteServiceError> {
        let resp = self
            .http
            .post(self.api_url("/postQuote"))
            .header(AUTHORIZATION, token.as_str())
            .json(quote)
            .send()
            .await
            .map_err(request_error)?;

        // Some deployments answer 201 with an empty body
        let resp = check_status(resp).await?;
        let body = resp.text().await.map_err(request_error)?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| QuoteServiceError::Deserialization(e.to_string()))
    }

    async fn get_quotes(
        &self,
        limit: usize,
        offset: usize,
        token: &SessionToken,
    ) -> Result<Vec<Quote>, QuoteServiceError> {
        let resp = self
            .http
            .get(self.api_url("/getQuotes"))
            .header(AUTHORIZATION, token.as_str())
            .query(&[("limit", limit), ("offset", offset)])
            .send()
            .await
            .map_err(request_error)?;

        let body: QuotesResponse = self.handle_response(resp).await?;
        Ok(body.into())
    }
}
