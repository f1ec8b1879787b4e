//! MCP server initialization for the stdio transport.
//!
//! [`serve_stdio`] wires the already-loaded memory session and the MCP tool
//! handler into a running server.

use crate::config::QuickmemConfig;
use crate::memory::MemorySession;
use crate::tools::MemoryTools;
use anyhow::Result;
use rmcp::ServiceExt;
use std::sync::Arc;

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: QuickmemConfig, session: MemorySession) -> Result<()> {
    tracing::info!(
        entities = session.store().len(),
        keywords = session.index().keyword_count(),
        "starting quickmem MCP server on stdio"
    );

    let tools = MemoryTools::new(Arc::new(session), Arc::new(config));
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running, waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}
