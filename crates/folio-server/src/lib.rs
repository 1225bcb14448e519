//! Development server with live reload for folio sites.
//!
//! Watches page sources, reruns the build pass on change, and signals
//! connected pages to reload over WebSocket.

pub mod reload;
pub mod server;
pub mod watcher;

pub use reload::{reload_client_script, ReloadHub, ReloadMessage, RELOAD_WS_PATH};
pub use server::{DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
