//! Quotewall MCP Server
//!
//! Exposes the quote wall to AI agents over stdio. Configuration comes from
//! `QUOTEWALL_*` environment variables (or a `.env` file); the login session
//! is persisted to `QUOTEWALL_SESSION_FILE` between runs.

mod server;

use anyhow::Result;
use rmcp::ServiceExt;
use server::QuoteWallServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP protocol
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Quotewall MCP server");

    let server = QuoteWallServer::from_env()?;

    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server.serve(transport).await?;

    service.waiting().await?;

    Ok(())
}
