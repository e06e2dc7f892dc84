//! UpStac Workflow Server - Main entry point
//!
//! Serves the test request workflow over the Model Context Protocol (MCP),
//! acting as the user named in the configuration.

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use upstac_workflow::repositories::{
    InMemoryFlowRepository, InMemoryTestRequestRepository, TestRequestFlowRepository,
    TestRequestRepository,
};
use upstac_workflow::session::{StaticUserProvider, UserProvider};
use upstac_workflow::{Config, UpstacMcpServer};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL can drive the filter
    let config = Config::from_env();
    let log_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Initialize repositories
    let request_repo = match &config.seed_file {
        Some(path) => {
            info!("Loading test requests from {}", path.display());
            InMemoryTestRequestRepository::from_json_file(path)?
        }
        None => InMemoryTestRequestRepository::new(),
    };
    let request_repo = Arc::new(request_repo) as Arc<dyn TestRequestRepository>;
    let flow_repo = Arc::new(InMemoryFlowRepository::new()) as Arc<dyn TestRequestFlowRepository>;

    let user = config.session_user();
    info!("Acting as {} ({})", user.user_name, user.role);
    let users = Arc::new(StaticUserProvider::new(user)) as Arc<dyn UserProvider>;

    let server = UpstacMcpServer::new(request_repo, flow_repo, users);
    info!("UpStac workflow server initialized");

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    upstac_workflow::server::run_server(server).await?;

    info!("UpStac workflow server shutdown complete");
    Ok(())
}
