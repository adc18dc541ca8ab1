//! Decoded poster textures and multi-poster splitting.

use image::imageops;
use image::RgbaImage;

use super::error::AssetError;

/// A decoded poster image.
#[derive(Debug, Clone, PartialEq)]
pub struct PosterImage {
    name: String,
    pixels: RgbaImage,
}

impl PosterImage {
    /// Wrap an already decoded buffer.
    pub fn new(name: impl Into<String>, pixels: RgbaImage) -> Self {
        Self {
            name: name.into(),
            pixels,
        }
    }

    /// Decode PNG or JPEG bytes.
    pub fn decode(name: impl Into<String>, bytes: &[u8]) -> Result<Self, AssetError> {
        let name = name.into();
        match image::load_from_memory(bytes) {
            Ok(decoded) => Ok(Self::new(name, decoded.to_rgba8())),
            Err(source) => Err(AssetError::Decode { name, source }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Number of square tiles the image splits into.
    ///
    /// Fails unless the width is a whole, non-zero multiple of the height.
    pub fn segment_count(&self) -> Result<u32, AssetError> {
        let (width, height) = (self.width(), self.height());
        if height == 0 || width == 0 || width % height != 0 {
            return Err(AssetError::AspectRatio {
                name: self.name.clone(),
                width,
                height,
            });
        }
        Ok(width / height)
    }

    /// Cut the image into square tiles, left to right.
    ///
    /// Tile 0 keeps this image's name; tile `i` is named `<name>_<i>`.
    pub fn split_tiles(&self) -> Result<Vec<PosterImage>, AssetError> {
        let segments = self.segment_count()?;
        let side = self.height();

        let tiles = (0..segments)
            .map(|i| {
                let tile = imageops::crop_imm(&self.pixels, i * side, 0, side, side).to_image();
                let name = if i == 0 {
                    self.name.clone()
                } else {
                    format!("{}_{}", self.name, i)
                };
                PosterImage::new(name, tile)
            })
            .collect();

        Ok(tiles)
    }
}
