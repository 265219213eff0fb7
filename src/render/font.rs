//! Overlay font loading.
//!
//! The service renders text labels with a TrueType font resolved once at
//! startup: the configured path wins, otherwise a short list of well-known
//! system font locations is probed. A missing font is non-fatal; the
//! renderer skips text instructions when none is available.

use ab_glyph::FontArc;
use std::path::Path;

/// System font locations probed when no `font_path` is configured.
const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Medium.ttc",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
];

/// Load the overlay font, preferring the configured path.
pub fn load_font(configured: Option<&Path>) -> Option<FontArc> {
    if let Some(path) = configured {
        return load_from(path);
    }
    FALLBACK_FONTS.iter().find_map(|p| load_from(Path::new(p)))
}

fn load_from(path: &Path) -> Option<FontArc> {
    let bytes = std::fs::read(path).ok()?;
    match FontArc::try_from_vec(bytes) {
        Ok(font) => {
            tracing::info!(path = %path.display(), "loaded overlay font");
            Some(font)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "font file could not be parsed");
            None
        }
    }
}
