use crate::config::ServerConfig;
use crate::render::{font, OverlayRenderer};
use std::sync::Arc;

/// Shared application state
///
/// Read-only after startup: every request gets its own image buffer, so the
/// renderer can be shared freely across connections.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Overlay renderer (shared across requests)
    pub renderer: Arc<OverlayRenderer>,
}

impl ServerState {
    /// Create new server state
    pub fn new(config: ServerConfig) -> Self {
        let font = font::load_font(config.font_path.as_deref());
        if font.is_none() {
            tracing::warn!("no overlay font available; text instructions will be skipped");
        }

        let renderer = Arc::new(OverlayRenderer::new(font, config.jpeg_quality));

        Self {
            config: Arc::new(config),
            renderer,
        }
    }
}
