mod app_system;
mod clients;
mod config;
mod domain;
mod messages;
mod notification;
mod rpc;
mod user_actor;

#[cfg(test)]
mod mock_framework;

use tokio::net::TcpListener;
use tracing::info;

use crate::app_system::{setup_tracing, DirectorySystem};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = config::load_default()?;
    setup_tracing(config.logging.format);

    info!("Starting user directory service");

    let system = DirectorySystem::from_config(&config)?;
    let listener = TcpListener::bind(config.bind_addr()?).await?;

    system
        .serve(listener, async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("User directory service stopped");
    Ok(())
}
