//! Quotewall MCP Server implementation
//!
//! Each tool call is one user gesture on the quote wall: logging in,
//! opening the feed, scrolling to its end, retrying, or posting a quote.
//! Tool results are the rendered view.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use quotewall_client::app::validate_credentials;
use quotewall_client::feed::{render_error, render_feed, render_published};
use quotewall_client::{
    activate, Activation, AppError, AuthService, Config, Credentials, FeedController,
    FileSessionStore, HttpQuoteService, LoadOutcome, MediaUpload, QuoteComposer, QuoteDraft,
    QuoteId, Session, View,
};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{
    handler::server::tool::ToolRouter,
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;

type Service = HttpQuoteService;
type Store = FileSessionStore;

/// Quotewall MCP Server
#[derive(Clone)]
pub struct QuoteWallServer {
    auth: Arc<AuthService<Service, Store>>,
    feed: Arc<FeedController<Service, Store>>,
    composer: Arc<QuoteComposer<Service, Store>>,
    session: Arc<Session<Store>>,
    tool_router: ToolRouter<Self>,
}

impl QuoteWallServer {
    pub fn from_env() -> Result<Self> {
        Self::from_config(&Config::from_env())
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        tracing::info!(
            "Using quote API {} (session file {})",
            config.api_url,
            config.session_file.display()
        );

        let service = Arc::new(HttpQuoteService::from_config(config)?);
        let store = Arc::new(FileSessionStore::new(config.session_file.clone()));
        let session = Arc::new(Session::new(store));

        let feed = FeedController::new(service.clone(), session.clone())
            .with_page_size(config.page_size)
            .with_timeout(Duration::from_secs(config.request_timeout_secs));

        Ok(Self {
            auth: Arc::new(AuthService::new(service.clone(), session.clone())),
            feed: Arc::new(feed),
            composer: Arc::new(QuoteComposer::new(service, session.clone())),
            session,
            tool_router: Self::tool_router(),
        })
    }
}

// --- Tool Parameter Types ---

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LoginParams {
    /// Your username
    pub username: String,
    /// The one-time passcode
    pub otp: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SeenParams {
    /// The `id` of the quote that scrolled into view
    pub item_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateQuoteParams {
    /// The quote text
    pub text: String,
    /// Local path of a JPEG, PNG or GIF image to attach
    #[serde(default)]
    pub image_path: Option<String>,
}

// --- View logic ---

/// Text for a tool call: `Ok` renders normally, `Err` is a tool error
type ViewResult = std::result::Result<String, String>;

fn respond(result: ViewResult) -> std::result::Result<CallToolResult, McpError> {
    match result {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(text) => Ok(CallToolResult::error(vec![Content::text(text)])),
    }
}

impl QuoteWallServer {
    /// Render the feed after a load attempt
    fn feed_view(&self, outcome: LoadOutcome) -> ViewResult {
        let state = self.feed.snapshot();
        match outcome {
            LoadOutcome::Failed(AppError::AuthRequired) => {
                Err(render_error(&AppError::AuthRequired))
            }
            LoadOutcome::Failed(err) => Err(format!("{}\n{}", render_error(&err), render_feed(&state))),
            _ => Ok(render_feed(&state)),
        }
    }

    /// Activate the quotes view: gate, then start over from the first page
    async fn open_quotes(&self) -> ViewResult {
        match activate(View::Quotes, &self.session).map_err(|e| render_error(&e))? {
            Activation::Redirect(_) => Err(render_error(&AppError::AuthRequired)),
            Activation::Proceed(_) => {
                let outcome = self.feed.reset().await;
                self.feed_view(outcome)
            }
        }
    }

    async fn login_view(&self, params: LoginParams) -> ViewResult {
        let credentials = Credentials::new(params.username, params.otp);
        validate_credentials(&credentials).map_err(|e| render_error(&e))?;

        self.auth
            .login(&credentials)
            .await
            .map_err(|e| render_error(&e))?;

        let feed = self.open_quotes().await?;
        Ok(format!("Logged in as {}.\n\n{}", credentials.username, feed))
    }

    fn logout_view(&self) -> ViewResult {
        self.auth.logout().map_err(|e| render_error(&e))?;
        Ok("Successfully logged out!".to_string())
    }

    async fn seen_view(&self, params: SeenParams) -> ViewResult {
        let id = QuoteId::from(params.item_id);
        match self.feed.notify_visible(&id).await {
            LoadOutcome::NotFrontier => Ok(format!(
                "Quote {} is not the last loaded quote; nothing to load.",
                id
            )),
            LoadOutcome::Busy => Ok("Already loading the next page.".to_string()),
            LoadOutcome::AlreadyExhausted => Ok("You've reached the end of the feed.".to_string()),
            outcome => self.feed_view(outcome),
        }
    }

    async fn retry_view(&self) -> ViewResult {
        let outcome = self.feed.retry().await;
        self.feed_view(outcome)
    }

    async fn create_quote_view(&self, params: CreateQuoteParams) -> ViewResult {
        if let Activation::Redirect(_) =
            activate(View::CreateQuote, &self.session).map_err(|e| render_error(&e))?
        {
            return Err(render_error(&AppError::AuthRequired));
        }

        let image = match params.image_path.as_deref().filter(|p| !p.trim().is_empty()) {
            Some(path) => Some(read_image(path).await?),
            None => None,
        };
        let draft = QuoteDraft {
            text: params.text,
            image,
        };

        let published = self
            .composer
            .submit(draft)
            .await
            .map_err(|e| render_error(&e))?;

        // Back to the feed so the new quote shows up
        let feed = match self.open_quotes().await {
            Ok(feed) | Err(feed) => feed,
        };
        Ok(format!("{}\n{}", render_published(&published), feed))
    }
}

async fn read_image(path: &str) -> std::result::Result<MediaUpload, String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| format!("Could not read image {}: {}", path, e))?;
    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    Ok(MediaUpload::new(file_name, bytes))
}

#[tool_router]
impl QuoteWallServer {
    // === Session ===

    #[tool(description = "Log in with your username and one-time passcode (OTP). Opens the quote feed on success.")]
    async fn login(&self, params: Parameters<LoginParams>) -> Result<CallToolResult, McpError> {
        respond(self.login_view(params.0).await)
    }

    #[tool(description = "Log out and forget the stored session.")]
    async fn logout(&self) -> Result<CallToolResult, McpError> {
        respond(self.logout_view())
    }

    // === Feed ===

    #[tool(description = "Open the quote feed from the top and show the first page. Requires login.")]
    async fn quotes(&self) -> Result<CallToolResult, McpError> {
        respond(self.open_quotes().await)
    }

    #[tool(
        description = "Report that a quote scrolled into view. Reporting the last loaded quote loads the next page."
    )]
    async fn seen(&self, params: Parameters<SeenParams>) -> Result<CallToolResult, McpError> {
        respond(self.seen_view(params.0).await)
    }

    #[tool(description = "Retry loading the next page after a failure.")]
    async fn retry(&self) -> Result<CallToolResult, McpError> {
        respond(self.retry_view().await)
    }

    // === Posting ===

    #[tool(description = "Create a quote: uploads the image, then publishes the quote. Requires login.")]
    async fn create_quote(
        &self,
        params: Parameters<CreateQuoteParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.create_quote_view(params.0).await)
    }
}

#[tool_handler]
impl ServerHandler for QuoteWallServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "quotewall".into(),
                title: Some("Quotewall MCP Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                r#"Quotewall - browse and post quotes

WORKFLOW:
1. 'login' - Sign in with username + OTP (the session is remembered)
2. 'quotes' - Open the feed from the top
3. 'seen' - When you reach the last quote shown, report its id to load more
4. 'retry' - If a page failed to load, try again
5. 'create_quote' - Post a quote with a JPEG/PNG/GIF image
6. 'logout' - Sign out

The feed ends when a page comes back empty; call 'quotes' to start over."#
                    .into(),
            ),
        }
    }
}
