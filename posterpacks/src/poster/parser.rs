//! Turns pack entries into poster assets.

use std::borrow::Cow;

use tracing::{debug, warn};

use crate::context::LoadContext;
use crate::format::{PackFileEntry, PackFormat};
use crate::pack::PackId;

use super::asset::CustomPoster;
use super::color::{parse_html_color, BLACK};
use super::error::AssetError;
use super::properties::{default_properties, PosterProperties, TextDescriptor};
use super::room::SpawnMode;
use super::text::{FontStyle, TextAlignment, TextOverlay};
use super::texture::PosterImage;

/// Lowercase extensions treated as poster images.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Suffix appended to an image's full name to find its properties file.
pub const SIDECAR_SUFFIX: &str = ".json";

/// A parsed poster and the extra tiles cut from it.
///
/// `siblings` is empty unless the image spans several square tiles.
#[derive(Debug)]
pub struct ParsedPoster {
    pub poster: CustomPoster,
    pub siblings: Vec<CustomPoster>,
}

/// Builds [`CustomPoster`]s for one pack.
#[derive(Debug)]
pub struct AssetEntryParser<'a> {
    ctx: &'a LoadContext<'a>,
    pack: PackId,
}

impl<'a> AssetEntryParser<'a> {
    pub fn new(ctx: &'a LoadContext<'a>, pack: PackId) -> Self {
        Self { ctx, pack }
    }

    /// Whether the entry looks like a poster image.
    pub fn is_image_entry(entry: &PackFileEntry) -> bool {
        if entry.stem_path().trim().is_empty() {
            return false;
        }
        entry
            .extension()
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
    }

    /// Decode an image entry and its sidecar into a poster.
    pub fn parse(
        &self,
        format: &mut dyn PackFormat,
        entry: &PackFileEntry,
    ) -> Result<ParsedPoster, AssetError> {
        let name = entry.stem_path().to_string();
        let image_name = name.replace('/', "-");

        let bytes = format.read_bytes(entry)?;
        let image = PosterImage::decode(image_name, &bytes)?;
        let properties = self.load_properties(format, entry, &name)?;

        self.build(name, image, &properties)
    }

    fn load_properties(
        &self,
        format: &mut dyn PackFormat,
        entry: &PackFileEntry,
        name: &str,
    ) -> Result<Cow<'static, PosterProperties>, AssetError> {
        let sidecar_name = format!("{}{}", entry.full_name(), SIDECAR_SUFFIX);
        let Some(sidecar) = format.get(&sidecar_name) else {
            return Ok(Cow::Borrowed(default_properties()));
        };

        debug!(poster = %name, sidecar = %sidecar_name, "Reading poster properties");
        let json = format.read_text(&sidecar)?;
        let properties =
            PosterProperties::from_json(&json).map_err(|source| AssetError::Properties {
                name: name.to_string(),
                source,
            })?;
        Ok(Cow::Owned(properties))
    }

    /// Assemble a poster from a decoded image and its properties.
    pub fn build(
        &self,
        name: String,
        image: PosterImage,
        properties: &PosterProperties,
    ) -> Result<ParsedPoster, AssetError> {
        let segments = image.segment_count()?;

        let spawn_mode = self.spawn_mode(&name, properties);
        let target_rooms = match spawn_mode {
            SpawnMode::Global => Vec::new(),
            _ => self.ctx.rooms.resolve_all(&properties.target_rooms, &name),
        };
        let overlays: Vec<TextOverlay> = properties
            .text_data
            .iter()
            .map(|descriptor| self.overlay(&name, descriptor))
            .collect();

        let mut poster = CustomPoster {
            name,
            image,
            pack: self.pack,
            weight: properties.poster_weight,
            spawn_mode,
            target_rooms,
            level_whitelist: properties.level_whitelist.clone(),
            reverse_whitelist: properties.reverse_whitelist,
            text: Vec::new(),
            multi_poster: Vec::new(),
        };

        if segments == 1 {
            poster.text = overlays;
            return Ok(ParsedPoster {
                poster,
                siblings: Vec::new(),
            });
        }

        let mut tiles = poster.image.split_tiles()?.into_iter();
        if let Some(base) = tiles.next() {
            poster.image = base;
        }
        poster.text = overlays_for(&overlays, 0);

        let siblings = tiles
            .zip(1u32..)
            .map(|(tile, segment)| poster.sibling(segment, tile, overlays_for(&overlays, segment)))
            .collect();

        debug!(poster = %poster.name, segments, "Split multi-poster");
        Ok(ParsedPoster { poster, siblings })
    }

    fn spawn_mode(&self, name: &str, properties: &PosterProperties) -> SpawnMode {
        if self.ctx.config.global_posters_only {
            return SpawnMode::Global;
        }
        match properties.spawn_mode.as_deref() {
            None => SpawnMode::Global,
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(poster = %name, error = %e, "Invalid spawn mode, using Global");
                SpawnMode::Global
            }),
        }
    }

    fn overlay(&self, name: &str, descriptor: &TextDescriptor) -> TextOverlay {
        let color = parse_html_color(&descriptor.color).unwrap_or_else(|| {
            warn!(poster = %name, color = %descriptor.color, "Invalid text color, using black");
            BLACK
        });
        let alignment = descriptor
            .alignment
            .parse()
            .unwrap_or_else(|_: String| {
                warn!(poster = %name, alignment = %descriptor.alignment, "Invalid text alignment, using Center");
                TextAlignment::Center
            });

        TextOverlay {
            text_key: descriptor.text_key.clone(),
            position: (descriptor.position.x, descriptor.position.y),
            size: (descriptor.size.x, descriptor.size.y),
            font: self.ctx.fonts.resolve(&descriptor.font, name),
            font_size: descriptor.font_size,
            style: FontStyle::from_switches(descriptor.bold, descriptor.italic, descriptor.underline),
            color,
            alignment,
            segment_id: descriptor.segment_id,
        }
    }
}

fn overlays_for(overlays: &[TextOverlay], segment: u32) -> Vec<TextOverlay> {
    overlays
        .iter()
        .filter(|overlay| overlay.segment_id == segment)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PostersConfig;
    use crate::format::LocalPackFormat;
    use crate::poster::{FontHandle, FontTable, RoomCategories, RoomCategory};
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255]))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    struct Fixture {
        config: PostersConfig,
        rooms: RoomCategories,
        fonts: FontTable,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                config: PostersConfig::default(),
                rooms: RoomCategories::builtin(),
                fonts: FontTable::build([("COMIC_24_Pro", FontHandle(1)), ("Arial", FontHandle(2))]),
            }
        }

        fn ctx(&self) -> LoadContext<'_> {
            LoadContext::new(&self.config, &self.rooms, &self.fonts)
        }
    }

    fn blank(width: u32, height: u32) -> PosterImage {
        PosterImage::new("p", RgbaImage::new(width, height))
    }

    #[test]
    fn test_is_image_entry() {
        assert!(AssetEntryParser::is_image_entry(&PackFileEntry::archived(0, "a/b.PNG")));
        assert!(AssetEntryParser::is_image_entry(&PackFileEntry::archived(0, "c.jpeg")));
        assert!(!AssetEntryParser::is_image_entry(&PackFileEntry::archived(0, "c.png.json")));
        assert!(!AssetEntryParser::is_image_entry(&PackFileEntry::archived(0, "notes.txt")));
    }

    #[test]
    fn test_build_square_keeps_all_overlays() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx();
        let parser = AssetEntryParser::new(&ctx, PackId(0));
        let properties = PosterProperties {
            text_data: vec![
                TextDescriptor::default(),
                TextDescriptor {
                    segment_id: 3,
                    ..TextDescriptor::default()
                },
            ],
            ..PosterProperties::default()
        };

        let parsed = parser.build("p".to_string(), blank(8, 8), &properties).unwrap();

        assert!(parsed.siblings.is_empty());
        assert_eq!(parsed.poster.text().len(), 2);
        assert_eq!(parsed.poster.spawn_mode(), SpawnMode::Global);
        assert!(parsed.poster.target_rooms().is_empty());
    }

    #[test]
    fn test_build_splits_and_partitions_overlays() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx();
        let parser = AssetEntryParser::new(&ctx, PackId(2));
        let properties = PosterProperties {
            poster_weight: 7,
            text_data: vec![
                TextDescriptor {
                    text_key: "left".to_string(),
                    ..TextDescriptor::default()
                },
                TextDescriptor {
                    text_key: "right".to_string(),
                    segment_id: 2,
                    ..TextDescriptor::default()
                },
            ],
            ..PosterProperties::default()
        };

        let parsed = parser.build("wide".to_string(), blank(12, 4), &properties).unwrap();

        assert_eq!(parsed.poster.image().width(), 4);
        assert_eq!(parsed.poster.text().len(), 1);
        assert_eq!(parsed.poster.text()[0].text_key, "left");

        let names: Vec<&str> = parsed.siblings.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["wide_1", "wide_2"]);
        assert!(parsed.siblings[0].text().is_empty());
        assert_eq!(parsed.siblings[1].text()[0].text_key, "right");
        assert!(parsed.siblings.iter().all(|s| s.declared_weight() == 7));
        assert!(parsed.siblings.iter().all(|s| s.pack() == PackId(2)));
    }

    #[test]
    fn test_build_rejects_bad_aspect_ratio() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx();
        let parser = AssetEntryParser::new(&ctx, PackId(0));

        let err = parser
            .build("odd".to_string(), blank(10, 4), default_properties())
            .unwrap_err();
        assert!(matches!(err, AssetError::AspectRatio { .. }));
    }

    #[test]
    fn test_build_resolves_rooms_and_modes() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx();
        let parser = AssetEntryParser::new(&ctx, PackId(0));
        let properties = PosterProperties {
            spawn_mode: Some("room".to_string()),
            target_rooms: vec!["class".to_string(), "Nowhere".to_string(), "Class".to_string()],
            ..PosterProperties::default()
        };

        let parsed = parser.build("r".to_string(), blank(4, 4), &properties).unwrap();

        assert_eq!(parsed.poster.spawn_mode(), SpawnMode::Room);
        assert_eq!(parsed.poster.target_rooms(), &[fixture.rooms.resolve("Class").unwrap()]);
        assert_ne!(parsed.poster.target_rooms()[0], RoomCategory::NULL);
    }

    #[test]
    fn test_global_mode_ignores_rooms() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx();
        let parser = AssetEntryParser::new(&ctx, PackId(0));
        let properties = PosterProperties {
            spawn_mode: Some("sideways".to_string()),
            target_rooms: vec!["Class".to_string()],
            ..PosterProperties::default()
        };

        let parsed = parser.build("g".to_string(), blank(4, 4), &properties).unwrap();

        assert_eq!(parsed.poster.spawn_mode(), SpawnMode::Global);
        assert!(parsed.poster.target_rooms().is_empty());
    }

    #[test]
    fn test_global_posters_only_forces_global() {
        let mut fixture = Fixture::new();
        fixture.config = PostersConfig::default().with_global_posters_only(true);
        let ctx = fixture.ctx();
        let parser = AssetEntryParser::new(&ctx, PackId(0));
        let properties = PosterProperties {
            spawn_mode: Some("Chalkboard".to_string()),
            target_rooms: vec!["Class".to_string()],
            ..PosterProperties::default()
        };

        let parsed = parser.build("c".to_string(), blank(4, 4), &properties).unwrap();

        assert_eq!(parsed.poster.spawn_mode(), SpawnMode::Global);
        assert!(parsed.poster.target_rooms().is_empty());
    }

    #[test]
    fn test_overlay_fallbacks() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx();
        let parser = AssetEntryParser::new(&ctx, PackId(0));
        let descriptor = TextDescriptor {
            font: "Missing".to_string(),
            color: "not-a-color".to_string(),
            alignment: "Diagonal".to_string(),
            bold: true,
            ..TextDescriptor::default()
        };

        let overlay = parser.overlay("p", &descriptor);

        assert_eq!(overlay.font, FontHandle(1));
        assert_eq!(overlay.color, BLACK);
        assert_eq!(overlay.alignment, TextAlignment::Center);
        assert!(overlay.style.contains(FontStyle::BOLD));
    }

    #[test]
    fn test_parse_reads_sidecar() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("set")).unwrap();
        std::fs::write(temp.path().join("set/hello.png"), png(4, 4)).unwrap();
        std::fs::write(
            temp.path().join("set/hello.png.json"),
            r#"{"posterWeight": 90, "levelWhitelist": ["F1"]}"#,
        )
        .unwrap();

        let fixture = Fixture::new();
        let ctx = fixture.ctx();
        let parser = AssetEntryParser::new(&ctx, PackId(0));
        let mut format = LocalPackFormat::new(temp.path());
        let entry = format.get("set/hello.png").unwrap();

        let parsed = parser.parse(&mut format, &entry).unwrap();

        assert_eq!(parsed.poster.name(), "set/hello");
        assert_eq!(parsed.poster.image().name(), "set-hello");
        assert_eq!(parsed.poster.declared_weight(), 90);
        assert_eq!(parsed.poster.level_whitelist(), &["F1".to_string()]);
    }

    #[test]
    fn test_parse_bad_sidecar_is_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("bad.png"), png(4, 4)).unwrap();
        std::fs::write(temp.path().join("bad.png.json"), "{ not json").unwrap();

        let fixture = Fixture::new();
        let ctx = fixture.ctx();
        let parser = AssetEntryParser::new(&ctx, PackId(0));
        let mut format = LocalPackFormat::new(temp.path());
        let entry = format.get("bad.png").unwrap();

        let err = parser.parse(&mut format, &entry).unwrap_err();
        assert!(matches!(err, AssetError::Properties { .. }));
    }

    #[test]
    fn test_parse_undecodable_image_is_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("broken.png"), b"not a png").unwrap();

        let fixture = Fixture::new();
        let ctx = fixture.ctx();
        let parser = AssetEntryParser::new(&ctx, PackId(0));
        let mut format = LocalPackFormat::new(temp.path());
        let entry = format.get("broken.png").unwrap();

        let err = parser.parse(&mut format, &entry).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }
}
