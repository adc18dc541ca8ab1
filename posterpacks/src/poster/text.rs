//! Text overlays drawn on top of posters.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use image::Rgba;
use tracing::warn;

/// Font used when a requested font is not in the table.
pub const FALLBACK_FONT: &str = "COMIC_24_Pro";

bitflags! {
    /// Style flags applied to overlay text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FontStyle: u8 {
        const BOLD = 0b001;
        const ITALIC = 0b010;
        const UNDERLINE = 0b100;
    }
}

impl FontStyle {
    /// Compose flags from individual switches.
    pub fn from_switches(bold: bool, italic: bool, underline: bool) -> Self {
        let mut style = FontStyle::empty();
        style.set(FontStyle::BOLD, bold);
        style.set(FontStyle::ITALIC, italic);
        style.set(FontStyle::UNDERLINE, underline);
        style
    }
}

/// Text alignment inside an overlay box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlignment {
    TopLeft,
    Top,
    TopRight,
    Left,
    #[default]
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl FromStr for TextAlignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let alignment = match s.trim().to_ascii_lowercase().as_str() {
            "topleft" => TextAlignment::TopLeft,
            "top" => TextAlignment::Top,
            "topright" => TextAlignment::TopRight,
            "left" => TextAlignment::Left,
            "center" | "centre" | "middle" => TextAlignment::Center,
            "right" => TextAlignment::Right,
            "bottomleft" => TextAlignment::BottomLeft,
            "bottom" => TextAlignment::Bottom,
            "bottomright" => TextAlignment::BottomRight,
            _ => return Err(s.to_string()),
        };
        Ok(alignment)
    }
}

/// Handle to a font provided by the host's font renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u32);

impl FontHandle {
    /// The renderer's built-in default font.
    pub const SYSTEM_DEFAULT: FontHandle = FontHandle(u32::MAX);
}

impl fmt::Display for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::SYSTEM_DEFAULT {
            write!(f, "system-default")
        } else {
            write!(f, "font#{}", self.0)
        }
    }
}

/// Preloaded font name to handle table.
#[derive(Debug, Clone, Default)]
pub struct FontTable {
    fonts: HashMap<String, FontHandle>,
}

impl FontTable {
    /// Build a table from `(name, handle)` pairs.
    ///
    /// On duplicate names the first handle is kept and a warning is logged.
    pub fn build<I, S>(fonts: I) -> Self
    where
        I: IntoIterator<Item = (S, FontHandle)>,
        S: Into<String>,
    {
        let mut table = HashMap::new();
        for (name, handle) in fonts {
            let name = name.into();
            if table.contains_key(&name) {
                warn!(font = %name, "Duplicate font name, keeping the first one");
                continue;
            }
            table.insert(name, handle);
        }
        Self { fonts: table }
    }

    /// Exact lookup.
    pub fn get(&self, name: &str) -> Option<FontHandle> {
        self.fonts.get(name).copied()
    }

    /// Number of fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Resolve a font for `poster`, falling back to [`FALLBACK_FONT`] and
    /// then to [`FontHandle::SYSTEM_DEFAULT`].
    pub fn resolve(&self, name: &str, poster: &str) -> FontHandle {
        if let Some(handle) = self.get(name) {
            return handle;
        }

        warn!(poster = %poster, font = %name, fallback = FALLBACK_FONT, "Unknown font, using fallback");
        if let Some(handle) = self.get(FALLBACK_FONT) {
            return handle;
        }

        warn!(poster = %poster, font = FALLBACK_FONT, "Fallback font missing, using system default");
        FontHandle::SYSTEM_DEFAULT
    }
}

/// A resolved text overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    /// Localisation key of the text.
    pub text_key: String,

    /// Top-left corner in poster pixels.
    pub position: (i32, i32),

    /// Box size in poster pixels.
    pub size: (i32, i32),

    pub font: FontHandle,
    pub font_size: i32,
    pub style: FontStyle,
    pub color: Rgba<u8>,
    pub alignment: TextAlignment,

    /// Multi-poster tile this overlay belongs to (0 = base tile).
    pub segment_id: u32,
}
