//! MCP server for the UpStac workflow.
//!
//! This module provides the MCP protocol server that exposes the lab and
//! consultation controllers to MCP clients over stdio.

pub mod handlers;

pub use handlers::UpstacMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the UpStac MCP server with stdio transport.
///
/// This function starts the MCP server and runs it until completion.
/// It communicates via stdin/stdout using the MCP protocol.
///
/// # Arguments
/// * `server` - The configured UpstacMcpServer instance
///
/// # Returns
/// An error if the server fails to start or encounters a fatal error
pub async fn run_server(server: UpstacMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    // Wait for completion
    service.waiting().await?;

    Ok(())
}
