//! Development server implementation.
//!
//! Serves the built site, watches page sources, and rebuilds on change. The
//! build itself is the same pass `folio build` runs, with the live-reload
//! hook enabled so every page knows how to hear about rebuilds.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use tower_http::services::ServeDir;

use folio_runtime::RELOAD_SCRIPT_PATH;
use folio_static::{BuildConfig, SiteBuilder};

use crate::reload::{reload_client_script, ReloadHub, ReloadMessage, RELOAD_WS_PATH};
use crate::watcher::{FileWatcher, WatchEvent};

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Build configuration used for the initial build and every rebuild.
    pub build: BuildConfig,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        let mut build = BuildConfig::default();
        build.live_reload = true;

        Self {
            build,
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind to {0}: {1}")]
    BindError(String, String),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error("Build error: {0}")]
    BuildError(String),
}

/// Shared server state.
struct ServerState {
    build: BuildConfig,
    hub: ReloadHub,
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(mut config: DevServerConfig) -> Self {
        // Dev builds always carry the reload client
        config.build.live_reload = true;
        Self { config }
    }

    /// Build the site, start watching sources, and serve until shutdown.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr_raw = format!("{}:{}", self.config.host, self.config.port);
        let addr: SocketAddr = addr_raw
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ServerError::BindError(addr_raw.clone(), e.to_string())
            })?;

        // Initial build so there is something to serve
        let result = SiteBuilder::new(self.config.build.clone())
            .build()
            .await
            .map_err(|e| ServerError::BuildError(e.to_string()))?;
        tracing::info!(
            pages = result.pages,
            mounted = result.mounted,
            duration_ms = result.duration_ms,
            "initial build complete"
        );

        let state = Arc::new(ServerState {
            build: self.config.build.clone(),
            hub: ReloadHub::new(),
        });

        // Watch page sources and the site config
        let (watcher, mut rx) = FileWatcher::new(&[self.config.build.src_dir.clone()])
            .map_err(|e| ServerError::WatchError(e.to_string()))?;

        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&state_clone, event).await;
            }
            drop(watcher);
        });

        let app = Router::new()
            .route(RELOAD_WS_PATH, get(ws_handler))
            .route(RELOAD_SCRIPT_PATH, get(reload_script_handler))
            .fallback_service(ServeDir::new(&self.config.build.output_dir))
            .with_state(state);

        tracing::info!("Starting dev server at http://{}", addr);

        if self.config.open {
            let namespace = self.config.build.namespace.trim_end_matches('/');
            let url = format!("http://{addr}{namespace}/");
            let _ = open::that(&url);
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr.to_string(), e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr.to_string(), e.to_string()))?;

        Ok(())
    }
}

/// Rebuild the site and tell connected pages to reload.
async fn handle_watch_event(state: &Arc<ServerState>, event: WatchEvent) {
    match &event {
        WatchEvent::PageChanged(path) => {
            tracing::info!(path = %path.display(), "page changed");
        }
        WatchEvent::AssetChanged(path) => {
            tracing::info!(path = %path.display(), "asset changed");
        }
    }

    match SiteBuilder::new(state.build.clone()).build().await {
        Ok(result) => {
            tracing::info!(
                pages = result.pages,
                duration_ms = result.duration_ms,
                "rebuilt site"
            );
            state.hub.send(ReloadMessage::Reload);
        }
        Err(e) => {
            tracing::warn!(error = %e, "rebuild failed; keeping previous output");
        }
    }
}

/// Handler for the reload WebSocket endpoint.
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Handle a WebSocket connection.
async fn handle_ws(mut socket: WebSocket, state: Arc<ServerState>) {
    let mut rx = state.hub.subscribe();

    let msg = serde_json::to_string(&ReloadMessage::Connected).unwrap();
    if socket.send(Message::Text(msg.into())).await.is_err() {
        return;
    }

    while let Ok(reload_msg) = rx.recv().await {
        let json = serde_json::to_string(&reload_msg).unwrap();
        if socket.send(Message::Text(json.into())).await.is_err() {
            break;
        }
    }
}

/// Handler for the reload client script.
async fn reload_script_handler() -> impl IntoResponse {
    (
        [("content-type", "application/javascript")],
        reload_client_script(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_server_with_default_config() {
        let server = DevServer::new(DevServerConfig::default());

        assert_eq!(server.config.port, 7777);
        assert!(server.config.build.live_reload);
    }

    #[test]
    fn new_forces_live_reload_on() {
        let mut config = DevServerConfig::default();
        config.build.live_reload = false;

        let server = DevServer::new(config);

        assert!(server.config.build.live_reload);
    }
}
