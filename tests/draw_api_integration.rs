//! Integration tests for the drawing API
//!
//! These tests drive the real router with in-memory requests and verify the
//! documented wire contract: 200 + image/jpeg on success, 417 for a missing
//! file field, 401 for undecodable uploads, 400 for unparsable json, and
//! the docs redirect.

use std::io::Cursor;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use image::{Rgb, RgbImage};
use imprint::{ServerConfig, ServerState};
use tower::ServiceExt;

const BOUNDARY: &str = "imprint-test-boundary";

/// Build a router backed by test configuration.
fn app() -> Router {
    let config = ServerConfig {
        jpeg_quality: 90,
        ..ServerConfig::default()
    };
    imprint::build_router(Arc::new(ServerState::new(config)))
}

/// Encode a solid black PNG for upload.
fn test_png(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    RgbImage::from_pixel(width, height, Rgb([0, 0, 0]))
        .write_to(&mut buf, image::ImageFormat::Png)
        .expect("encode test png");
    buf.into_inner()
}

/// Hand-rolled multipart/form-data body.
fn multipart_body(parts: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        if *name == "file" {
            body.extend_from_slice(
                b"Content-Disposition: form-data; name=\"file\"; filename=\"input.png\"\r\n\
                  Content-Type: image/png\r\n\r\n",
            );
        } else {
            body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            );
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn draw_request(parts: &[(&str, &[u8])]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/drawing/draw")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

#[tokio::test]
async fn empty_rectangle_list_returns_reencoded_image() {
    let png = test_png(64, 64);
    let request = draw_request(&[("file", &png), ("json", br#"{"rectangles":[]}"#)]);

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/jpeg"
    );

    let out = body_bytes(response).await;
    assert_eq!(image::guess_format(&out).unwrap(), image::ImageFormat::Jpeg);
    let decoded = image::load_from_memory(&out).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 64));
}

#[tokio::test]
async fn missing_json_field_still_reencodes() {
    let png = test_png(32, 32);
    let response = app().oneshot(draw_request(&[("file", &png)])).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let out = body_bytes(response).await;
    assert_eq!(image::guess_format(&out).unwrap(), image::ImageFormat::Jpeg);
}

#[tokio::test]
async fn rectangle_outline_is_burned_in() {
    let png = test_png(64, 64);
    let json = br#"{"rectangles":[{"x":8,"y":8,"w":40,"h":40,"line_width":6}]}"#;
    let response = app()
        .oneshot(draw_request(&[("file", &png), ("json", json)]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let out = body_bytes(response).await;
    let decoded = image::load_from_memory(&out).unwrap().into_rgb8();

    // Inside the stroke band: strongly green even after JPEG loss.
    let Rgb([r, g, b]) = *decoded.get_pixel(11, 11);
    assert!(g > 150, "expected green stroke, got ({r},{g},{b})");
    assert!(r < 100 && b < 100, "expected green stroke, got ({r},{g},{b})");

    // Box interior stays dark.
    let Rgb([r, g, b]) = *decoded.get_pixel(32, 32);
    assert!(
        r < 60 && g < 60 && b < 60,
        "expected untouched interior, got ({r},{g},{b})"
    );
}

#[tokio::test]
async fn malformed_color_falls_back_to_default() {
    let png = test_png(64, 64);
    let json =
        br#"{"rectangles":[{"x":8,"y":8,"w":40,"h":40,"line_width":6,"frame_color":"lime"}]}"#;
    let response = app()
        .oneshot(draw_request(&[("file", &png), ("json", json)]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let out = body_bytes(response).await;
    let decoded = image::load_from_memory(&out).unwrap().into_rgb8();
    let Rgb([r, g, b]) = *decoded.get_pixel(11, 11);
    assert!(g > 150 && r < 100 && b < 100, "default green expected, got ({r},{g},{b})");
}

#[tokio::test]
async fn missing_file_field_yields_417() {
    let response = app()
        .oneshot(draw_request(&[("json", br#"{"rectangles":[]}"#)]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::EXPECTATION_FAILED);

    let out = body_bytes(response).await;
    let body: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(body["error"]["code"], "NO_FILE");
}

#[tokio::test]
async fn non_image_upload_yields_401() {
    let response = app()
        .oneshot(draw_request(&[("file", b"these are not image bytes")]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let out = body_bytes(response).await;
    let body: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(body["error"]["code"], "UNDECODABLE_IMAGE");
}

#[tokio::test]
async fn unparsable_json_field_yields_400() {
    let png = test_png(16, 16);
    let response = app()
        .oneshot(draw_request(&[("file", &png), ("json", b"{not json")]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn docs_redirects_to_static_page() {
    let request = Request::builder()
        .uri("/docs")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/static/docs.html"
    );
}

#[tokio::test]
async fn health_check_is_public() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let out = body_bytes(response).await;
    let body: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn unknown_route_yields_404() {
    let request = Request::builder()
        .uri("/nope")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
