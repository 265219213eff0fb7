//! Imprint - HTTP drawing service
//!
//! This binary serves the overlay-drawing API: upload an image and a JSON
//! list of rectangles, get back a JPEG with the overlays burned in.

use imprint::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Start server
    imprint::start_server(config).await?;

    Ok(())
}
