//! Overlay Renderer: turns declarative shape descriptors into pixel
//! mutations on a decoded raster image.
//!
//! Shapes are applied in list order, so later shapes win on overlapping
//! pixels. Each shape is an unfilled rectangle outline whose stroke grows
//! inward from the `(x,y)-(x+w,y+h)` bounding box, optionally labelled with
//! text anchored at the rectangle's top-left corner. Out-of-bounds geometry
//! is clipped, never an error.

pub mod color;
pub mod font;

use ab_glyph::{FontArc, PxScale};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// One overlay: rectangle geometry plus optional styling and label.
///
/// Every field except geometry carries a documented default, applied when
/// the field is absent or (for colors) unparsable.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ShapeDescriptor {
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub w: Option<i64>,
    pub h: Option<i64>,

    /// Outline color as an `RRGGBB` hex triplet; defaults to green.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_color: Option<String>,

    /// Label color as an `RRGGBB` hex triplet; defaults to white.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,

    /// Stroke width in pixels; defaults to 20.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<u32>,

    /// Label size in pixels; defaults to 50.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,

    /// Optional label drawn at the rectangle's top-left corner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ShapeDescriptor {
    pub const DEFAULT_LINE_WIDTH: u32 = 20;
    pub const DEFAULT_FONT_SIZE: u32 = 50;

    /// Rectangle geometry, present only when all four coordinates are set.
    fn geometry(&self) -> Option<(i64, i64, i64, i64)> {
        Some((self.x?, self.y?, self.w?, self.h?))
    }

    fn stroke_width(&self) -> u32 {
        self.line_width.unwrap_or(Self::DEFAULT_LINE_WIDTH)
    }

    fn label_size(&self) -> u32 {
        self.font_size.unwrap_or(Self::DEFAULT_FONT_SIZE)
    }
}

/// The request body carried in the multipart `json` field.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DrawRequest {
    #[serde(default)]
    pub rectangles: Vec<ShapeDescriptor>,
}

/// Errors from decoding, compositing, or re-encoding an image.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("cannot identify image file: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode output image: {0}")]
    Encode(#[source] image::ImageError),
}

/// Composites shape overlays onto raster images.
///
/// Holds the per-process font and encoder settings; all per-request state
/// lives on the caller's stack, so one renderer is shared across requests.
pub struct OverlayRenderer {
    font: Option<FontArc>,
    jpeg_quality: u8,
}

impl OverlayRenderer {
    pub fn new(font: Option<FontArc>, jpeg_quality: u8) -> Self {
        Self { font, jpeg_quality }
    }

    /// Decode `bytes`, burn `shapes` in list order, re-encode as JPEG.
    ///
    /// An undecodable input is a hard failure before any drawing; per-shape
    /// problems (missing geometry, bad colors) are handled best-effort.
    pub fn compose(&self, bytes: &[u8], shapes: &[ShapeDescriptor]) -> Result<Vec<u8>, RenderError> {
        let decoded = image::load_from_memory(bytes).map_err(RenderError::Decode)?;
        let mut canvas = decoded.into_rgb8();

        self.apply(&mut canvas, shapes);

        let mut out = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut out, self.jpeg_quality)
            .encode_image(&canvas)
            .map_err(RenderError::Encode)?;
        Ok(out.into_inner())
    }

    /// Apply all shapes to an already-decoded canvas, in list order.
    pub fn apply(&self, canvas: &mut RgbImage, shapes: &[ShapeDescriptor]) {
        for shape in shapes {
            self.draw_shape(canvas, shape);
        }
    }

    fn draw_shape(&self, canvas: &mut RgbImage, shape: &ShapeDescriptor) {
        // A descriptor without full geometry has no anchor for either the
        // outline or the label; skip it entirely.
        let Some((x, y, w, h)) = shape.geometry() else {
            tracing::warn!("shape descriptor missing x/y/w/h, skipping");
            return;
        };

        let frame = color::resolve(shape.frame_color.as_deref(), color::DEFAULT_FRAME_COLOR);
        draw_frame(canvas, x, y, w, h, frame, shape.stroke_width());

        if let Some(text) = shape.text.as_deref().filter(|t| !t.is_empty()) {
            match &self.font {
                Some(font) => {
                    let fill = color::resolve(shape.text_color.as_deref(), color::DEFAULT_TEXT_COLOR);
                    draw_label(canvas, x, y, text, fill, shape.label_size(), font);
                }
                None => tracing::warn!("no overlay font loaded, skipping text instruction"),
            }
        }
    }
}

/// Draw the outline of the inclusive box `(x,y)-(x+w,y+h)`.
///
/// The stroke grows inward, as four filled edge bands clipped to the
/// canvas. A stroke wider than the box degenerates into a filled box.
fn draw_frame(canvas: &mut RgbImage, x: i64, y: i64, w: i64, h: i64, color: Rgb<u8>, width: u32) {
    if w < 0 || h < 0 || width == 0 {
        return;
    }
    // Inclusive box spans w+1 by h+1 pixels; the thickest useful stroke
    // meets itself in the middle. Saturating arithmetic keeps arbitrary
    // client-supplied coordinates from overflowing.
    let t = i64::from(width).min(w / 2 + 1).min(h / 2 + 1);
    let x1 = x.saturating_add(w).saturating_add(1);
    let y1 = y.saturating_add(h).saturating_add(1);

    fill_band(canvas, x, y, x1, y.saturating_add(t), color); // top
    fill_band(canvas, x, y1.saturating_sub(t), x1, y1, color); // bottom
    fill_band(canvas, x, y, x.saturating_add(t), y1, color); // left
    fill_band(canvas, x1.saturating_sub(t), y, x1, y1, color); // right
}

/// Fill the half-open band `[x0,x1) x [y0,y1)`, clipped to the canvas.
fn fill_band(canvas: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
    let (cw, ch) = (i64::from(canvas.width()), i64::from(canvas.height()));
    let (x0, y0) = (x0.max(0), y0.max(0));
    let (x1, y1) = (x1.min(cw), y1.min(ch));
    if x0 >= x1 || y0 >= y1 {
        return;
    }
    let rect = Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32);
    draw_filled_rect_mut(canvas, rect, color);
}

fn draw_label(
    canvas: &mut RgbImage,
    x: i64,
    y: i64,
    text: &str,
    color: Rgb<u8>,
    size: u32,
    font: &FontArc,
) {
    if size == 0 {
        return;
    }
    let x = x.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    let y = y.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    draw_text_mut(canvas, color, x, y, PxScale::from(size as f32), font, text);
}
