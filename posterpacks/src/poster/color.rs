//! HTML-style colour strings.

use image::Rgba;

/// Opaque black, the fallback for unreadable colours.
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("red", [0xFF, 0x00, 0x00]),
    ("cyan", [0x00, 0xFF, 0xFF]),
    ("blue", [0x00, 0x00, 0xFF]),
    ("darkblue", [0x00, 0x00, 0xA0]),
    ("lightblue", [0xAD, 0xD8, 0xE6]),
    ("purple", [0x80, 0x00, 0x80]),
    ("yellow", [0xFF, 0xFF, 0x00]),
    ("lime", [0x00, 0xFF, 0x00]),
    ("fuchsia", [0xFF, 0x00, 0xFF]),
    ("white", [0xFF, 0xFF, 0xFF]),
    ("silver", [0xC0, 0xC0, 0xC0]),
    ("grey", [0x80, 0x80, 0x80]),
    ("gray", [0x80, 0x80, 0x80]),
    ("black", [0x00, 0x00, 0x00]),
    ("orange", [0xFF, 0xA5, 0x00]),
    ("brown", [0xA5, 0x2A, 0x2A]),
    ("maroon", [0x80, 0x00, 0x00]),
    ("green", [0x00, 0x80, 0x00]),
    ("olive", [0x80, 0x80, 0x00]),
    ("navy", [0x00, 0x00, 0x80]),
    ("teal", [0x00, 0x80, 0x80]),
    ("aqua", [0x00, 0xFF, 0xFF]),
    ("magenta", [0xFF, 0x00, 0xFF]),
];

/// Parse `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` or a named colour.
pub fn parse_html_color(value: &str) -> Option<Rgba<u8>> {
    let value = value.trim();

    let Some(hex) = value.strip_prefix('#') else {
        let lower = value.to_ascii_lowercase();
        return NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, [r, g, b])| Rgba([*r, *g, *b, 255]));
    };

    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|n| n * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Rgba([nibble(0)?, nibble(1)?, nibble(2)?, 255])),
        4 => Some(Rgba([nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?])),
        6 => Some(Rgba([byte(0)?, byte(2)?, byte(4)?, 255])),
        8 => Some(Rgba([byte(0)?, byte(2)?, byte(4)?, byte(6)?])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_hex() {
        assert_eq!(parse_html_color("#FF8000"), Some(Rgba([255, 128, 0, 255])));
        assert_eq!(parse_html_color("#ff800080"), Some(Rgba([255, 128, 0, 128])));
    }

    #[test]
    fn test_short_hex() {
        assert_eq!(parse_html_color("#F80"), Some(Rgba([255, 136, 0, 255])));
        assert_eq!(parse_html_color("#F808"), Some(Rgba([255, 136, 0, 136])));
    }

    #[test]
    fn test_named() {
        assert_eq!(parse_html_color("White"), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(parse_html_color(" black "), Some(BLACK));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(parse_html_color("FF8000"), None);
        assert_eq!(parse_html_color("#GG0000"), None);
        assert_eq!(parse_html_color("#12345"), None);
        assert_eq!(parse_html_color("chartreuse-ish"), None);
        assert_eq!(parse_html_color(""), None);
    }
}
