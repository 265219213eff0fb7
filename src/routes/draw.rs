use crate::error::{ServerError, ServerResult};
use crate::render::DrawRequest;
use crate::state::ServerState;
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Redirect};
use std::sync::Arc;

/// Draw overlays onto an uploaded image.
///
/// `POST /drawing/draw`, multipart form with two fields:
///
/// - `file`: the image bytes (required; any format the decoder recognizes)
/// - `json`: a [`DrawRequest`] as JSON text (optional; absent means no
///   overlays and the image is still re-encoded and returned)
///
/// Responds `200` with `image/jpeg` bytes on success, `417` when the file
/// field is missing, `401` when the upload cannot be decoded as an image,
/// `400` on an unparsable `json` field, and `418` on any other draw failure.
pub async fn draw(
    State(state): State<Arc<ServerState>>,
    mut multipart: Multipart,
) -> ServerResult<impl IntoResponse> {
    let mut file: Option<Bytes> = None;
    let mut json: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => file = Some(field.bytes().await?),
            "json" => json = Some(field.text().await?),
            // Unknown fields are ignored.
            _ => {}
        }
    }

    let Some(image_bytes) = file else {
        tracing::info!("draw request without file field");
        return Err(ServerError::MissingFile);
    };

    let request: DrawRequest = match json {
        Some(raw) => serde_json::from_str(&raw)?,
        None => DrawRequest::default(),
    };

    let output = state.renderer.compose(&image_bytes, &request.rectangles)?;

    tracing::info!(
        shapes = request.rectangles.len(),
        bytes_in = image_bytes.len(),
        bytes_out = output.len(),
        "composited overlays"
    );

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], output))
}

/// `GET /docs` - redirect to the static documentation page.
pub async fn docs() -> Redirect {
    Redirect::to("/static/docs.html")
}
