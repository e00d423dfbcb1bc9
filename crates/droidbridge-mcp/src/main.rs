//! droidbridge-mcp - MCP server for Android device control through adb.

use std::sync::Arc;

use droidbridge_adb::client;
use droidbridge_mcp::config::Config;
use droidbridge_mcp::{logging, DroidBridgeServer};
use rmcp::ServiceExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init("droidbridge_mcp")?;

    tracing::info!("Starting droidbridge MCP server");

    let config = Config::load();
    let adb = Arc::new(config.client());

    // Bring the adb server up before accepting requests; repeating this on
    // an already-running server is harmless.
    client::start_server(adb.as_ref()).await?;

    let server = DroidBridgeServer::new(adb);
    let service = server.serve(rmcp::transport::stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
