//! HTTP server setup and lifecycle.
//!
//! # Responsibilities
//! - Create Axum Router with the WebSocket and health handlers
//! - Wire up middleware (tracing)
//! - Bind, serve, and stop on a `Shutdown` signal
//!
//! # Lifecycle
//! ```text
//! RelayServer::new(config)   build provider client + handler table
//!     → start()              bind listener, spawn serve task → RunningServer
//!     → RunningServer::stop  trigger shutdown, wait for the serve task
//! ```

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ws::WebSocketUpgrade, FromRequestParts, Request, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::handlers;
use crate::http::{health, websocket};
use crate::lifecycle::Shutdown;
use crate::net::ConnectionTracker;
use crate::provider::{PokeApiClient, ProviderResult};
use crate::routing::MessageRouter;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<MessageRouter>,
    pub shutdown: Shutdown,
    pub connections: ConnectionTracker,
}

/// WebSocket relay server. Owns its configuration; no global state.
pub struct RelayServer {
    config: RelayConfig,
    router: Arc<MessageRouter>,
    connections: ConnectionTracker,
}

impl RelayServer {
    /// Build a server backed by the PokeAPI client described in `config`.
    pub fn new(config: RelayConfig) -> ProviderResult<Self> {
        let provider = Arc::new(PokeApiClient::new(&config.provider)?);
        let router = handlers::build_router(&config.handlers, provider);
        Ok(Self::with_router(config, router))
    }

    /// Build a server around an existing handler table.
    pub fn with_router(config: RelayConfig, router: MessageRouter) -> Self {
        Self {
            config,
            router: Arc::new(router),
            connections: ConnectionTracker::new(),
        }
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Open-connection count for this server.
    pub fn connections(&self) -> &ConnectionTracker {
        &self.connections
    }

    /// The Axum application, wired to `shutdown` for open connections.
    pub fn app(&self, shutdown: Shutdown) -> Router {
        let state = AppState {
            router: self.router.clone(),
            shutdown,
            connections: self.connections.clone(),
        };

        Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health::get_health))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server on `listener` until `shutdown` is triggered.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            key_style = self.config.handlers.key_style.as_str(),
            ev_profile = ?self.config.handlers.ev_profile,
            "WebSocket relay starting"
        );

        let app = self.app(shutdown.clone());
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .await?;

        tracing::info!("WebSocket relay stopped");
        Ok(())
    }

    /// Bind the configured address and serve in the background.
    pub async fn start(self) -> io::Result<RunningServer> {
        let listener = TcpListener::bind(self.config.listener.bind_address()).await?;
        let local_addr = listener.local_addr()?;
        let shutdown = Shutdown::new();

        let handle = tokio::spawn(self.run(listener, shutdown.clone()));

        Ok(RunningServer {
            local_addr,
            shutdown,
            handle,
        })
    }
}

/// Handle to a started server.
pub struct RunningServer {
    local_addr: SocketAddr,
    shutdown: Shutdown,
    handle: JoinHandle<io::Result<()>>,
}

impl RunningServer {
    /// Address actually bound (resolves port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// A handle that can trigger shutdown from elsewhere.
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Stop accepting, close open connections, and wait for the server to exit.
    pub async fn stop(self) -> io::Result<()> {
        self.shutdown.trigger();
        self.wait().await
    }

    /// Wait for the server to exit.
    pub async fn wait(self) -> io::Result<()> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(io::Error::other(e)),
        }
    }
}

/// `GET /`: WebSocket upgrade when requested, banner text otherwise.
async fn root_handler(State(state): State<AppState>, request: Request) -> Response {
    let (mut parts, _body) = request.into_parts();
    match WebSocketUpgrade::from_request_parts(&mut parts, &state).await {
        Ok(upgrade) => upgrade
            .on_upgrade(move |socket| websocket::handle_socket(socket, state))
            .into_response(),
        Err(_) => health::BANNER.into_response(),
    }
}
