use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use crate::clients::UserClient;
use crate::config::AppConfig;
use crate::notification::{NotificationClient, NotificationDispatcher, NotificationSender};
use crate::rpc::{self, RpcState};
use crate::user_actor::{UserService, UserStore};

/// Starts the user service actor and wires it to the notification dispatcher
/// and the RPC router.
pub struct DirectorySystem {
    pub user_client: UserClient,
    handle: JoinHandle<()>,
}

impl DirectorySystem {
    /// Builds the notification client from configuration. The client does not
    /// connect yet, so an unreachable downstream does not block startup.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let client = NotificationClient::new(&config.notification)
            .context("building notification client")?;
        info!(endpoint = %client.endpoint(), "Notification client configured");
        Ok(Self::new(config, Arc::new(client)))
    }

    #[instrument(name = "directory_system", skip_all)]
    pub fn new(config: &AppConfig, notifier: Arc<dyn NotificationSender>) -> Self {
        info!(seed_count = config.seed.len(), "Starting directory system");

        let store = UserStore::with_seed(config.seed.iter().cloned());
        let dispatcher = NotificationDispatcher::new(notifier);
        let (service, user_client) = UserService::new(config.server.mailbox_size, store, dispatcher);
        let handle = tokio::spawn(service.run());

        Self {
            user_client,
            handle,
        }
    }

    pub fn router(&self) -> axum::Router {
        rpc::build_router(RpcState {
            users: self.user_client.clone(),
        })
    }

    /// Serves RPCs on `listener` until `shutdown` resolves, then stops the actor.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let addr: SocketAddr = listener.local_addr()?;
        info!(%addr, "User service listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .context("serving rpc")?;

        self.shutdown().await
    }

    #[instrument(skip(self))]
    pub async fn shutdown(self) -> anyhow::Result<()> {
        info!("Shutting down directory system");

        // Outstanding notification tasks are detached and die with the runtime.
        if let Err(e) = self.user_client.shutdown().await {
            error!(error = %e, "UserService already stopped");
        }
        if let Err(e) = self.handle.await {
            error!(error = ?e, "Service shutdown error");
            return Err(anyhow::anyhow!("user service task failed: {e}"));
        }

        info!("Directory system shutdown complete");
        Ok(())
    }
}
