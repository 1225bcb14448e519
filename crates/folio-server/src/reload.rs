//! WebSocket-based live reload.
//!
//! The dev protocol is deliberately dumb: the server rebuilds the whole site
//! on change and tells connected pages to reload. No patching, no state
//! transfer. Enhanced pages are cheap to rebuild, so full reloads keep the
//! dev loop honest.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// WebSocket route the reload hub is served on.
pub const RELOAD_WS_PATH: &str = "/__folio";

/// Messages sent to connected pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReloadMessage {
    /// The site was rebuilt; reload the page.
    Reload,

    /// Connection established.
    Connected,
}

/// Hub broadcasting reload messages to every connected page.
#[derive(Debug, Clone)]
pub struct ReloadHub {
    sender: broadcast::Sender<ReloadMessage>,
}

impl ReloadHub {
    /// Create a new hub.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Send a message to all connected pages.
    pub fn send(&self, msg: ReloadMessage) {
        // Ignore send errors (no receivers)
        let _ = self.sender.send(msg);
    }

    /// Subscribe to reload messages.
    pub fn subscribe(&self) -> broadcast::Receiver<ReloadMessage> {
        self.sender.subscribe()
    }

    /// Number of connected pages.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Client-side reload script, injected into dev builds by the
/// `reload-on-change` hook.
///
/// The socket URL is derived from `location` so the script works on whatever
/// host and port the server was bound to.
pub fn reload_client_script() -> String {
    format!(
        r#"
(function() {{
  'use strict';

  var attempts = 0;

  function connect() {{
    var proto = location.protocol === 'https:' ? 'wss://' : 'ws://';
    var ws = new WebSocket(proto + location.host + '{RELOAD_WS_PATH}');

    ws.onopen = function() {{
      console.log('[folio] live reload connected');
      attempts = 0;
    }};

    ws.onmessage = function(event) {{
      var msg = JSON.parse(event.data);
      if (msg.type === 'reload') {{
        location.reload();
      }}
    }};

    ws.onclose = function() {{
      if (attempts < 10) {{
        attempts++;
        setTimeout(connect, 500 * attempts);
      }}
    }};
  }}

  connect();
}})();
"#
    )
}
