use crate::render::RenderError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The multipart form did not carry a `file` field.
    #[error("no file")]
    MissingFile,

    /// The upload could not be decoded as an image.
    #[error("cannot identify image file: {0}")]
    UndecodableImage(#[source] image::ImageError),

    /// Compositing or re-encoding failed after a successful decode.
    #[error("draw failed: {0}")]
    DrawFailed(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal server error: {0}")]
    Internal(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not found")]
    NotFound,
}

impl ServerError {
    /// Get HTTP status code for this error
    ///
    /// The 417/401/418 mapping is the service's documented wire contract.
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::MissingFile => StatusCode::EXPECTATION_FAILED,
            ServerError::UndecodableImage(_) => StatusCode::UNAUTHORIZED,
            ServerError::DrawFailed(_) => StatusCode::IM_A_TEAPOT,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Internal(_) | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::MissingFile => "NO_FILE",
            ServerError::UndecodableImage(_) => "UNDECODABLE_IMAGE",
            ServerError::DrawFailed(_) => "DRAW_FAILED",
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code().to_string();
        let message = self.to_string();

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<RenderError> for ServerError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Decode(err) => ServerError::UndecodableImage(err),
            RenderError::Encode(err) => ServerError::DrawFailed(err.to_string()),
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for ServerError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        ServerError::BadRequest(format!("multipart error: {err}"))
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::BadRequest(format!("JSON parse error: {err}"))
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(err: std::net::AddrParseError) -> Self {
        ServerError::Config(format!("Invalid address: {err}"))
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {err}"))
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_status_codes() {
        assert_eq!(ServerError::MissingFile.status_code(), StatusCode::EXPECTATION_FAILED);
        assert_eq!(
            ServerError::DrawFailed("boom".into()).status_code(),
            StatusCode::IM_A_TEAPOT
        );
        let decode = match image::load_from_memory(b"junk") {
            Err(err) => err,
            Ok(_) => unreachable!(),
        };
        assert_eq!(
            ServerError::UndecodableImage(decode).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn render_errors_map_onto_wire_codes() {
        let decode = image::load_from_memory(b"junk").unwrap_err();
        let err: ServerError = RenderError::Decode(decode).into();
        assert!(matches!(err, ServerError::UndecodableImage(_)));
    }
}
