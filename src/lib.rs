//! Imprint - HTTP drawing service
//!
//! This crate provides a small HTTP server that accepts an uploaded image
//! plus a JSON description of shape/text overlays, burns the overlays into
//! the decoded image, and returns the result as a JPEG.
//!
//! The core is the [`render::OverlayRenderer`]: an ordered list of
//! [`render::ShapeDescriptor`] values is applied to the raster buffer in
//! list order (later shapes win on overlapping pixels), then the buffer is
//! re-encoded once. Everything else is HTTP glue.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use imprint::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     imprint::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `POST /drawing/draw` - Composite overlays onto an uploaded image
//! - `GET /docs` - Redirect to the static documentation page
//! - `GET /static/*` - Static files (docs)

pub mod config;
pub mod error;
pub mod middleware;
pub mod render;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use render::{DrawRequest, OverlayRenderer, RenderError, ShapeDescriptor};
pub use server::{build_router, start_server};
pub use state::ServerState;
