//! Hex color parsing and the documented style defaults.

use image::Rgb;

/// Frame color used when a descriptor omits or mangles `frame_color`.
pub const DEFAULT_FRAME_COLOR: Rgb<u8> = Rgb([0x00, 0xFF, 0x00]);

/// Text color used when a descriptor omits or mangles `text_color`.
pub const DEFAULT_TEXT_COLOR: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);

/// Parse a 24-bit `RRGGBB` hex triplet, with or without a leading `#`.
///
/// Returns `None` for anything that is not exactly six hex digits; the
/// caller decides which default applies.
pub fn parse_hex(input: &str) -> Option<Rgb<u8>> {
    let hex = input.strip_prefix('#').unwrap_or(input);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgb([r, g, b]))
}

/// Resolve an optional color string against its default.
///
/// A malformed string falls back to the default rather than failing the
/// shape; the bad value is only logged.
pub fn resolve(spec: Option<&str>, default: Rgb<u8>) -> Rgb<u8> {
    match spec {
        Some(raw) => parse_hex(raw).unwrap_or_else(|| {
            tracing::warn!(color = %raw, "unparsable color string, using default");
            default
        }),
        None => default,
    }
}
