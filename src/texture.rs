use std::path::Path;

use crate::error::ResourceError;

/// A decoded image as packed `0xAARRGGBB` pixels, rows stored top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgbImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl ArgbImage {
    /// Create an image from packed pixels. `pixels` must hold exactly `width * height` entries.
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self { width, height, pixels }
    }

    /// Decode an image file of any format the `image` crate supports.
    pub fn load(path: &Path) -> Result<Self, ResourceError> {
        let rgba = image::open(path)
            .map_err(|source| ResourceError::Image { path: path.to_owned(), source })?
            .to_rgba8();

        let (width, height) = rgba.dimensions();
        let pixels = rgba.pixels().map(|pixel| {
            let [r, g, b, a] = pixel.0;
            (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
        }).collect();

        Ok(Self::new(width, height, pixels))
    }

    /// The same image flipped upside down.
    pub fn mirrored(&self) -> Self {
        let width = self.width as usize;
        let pixels = if width == 0 {
            Vec::new()
        } else {
            self.pixels.chunks_exact(width).rev().flatten().copied().collect()
        };

        Self::new(self.width, self.height, pixels)
    }
}

/// Flatten an image into the RGBA8 bytes OpenGL expects. OpenGL puts (0, 0) at the bottom left,
/// so the image is mirrored vertically first.
pub fn image_to_linear_bytes(image: &ArgbImage) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(image.pixels.len() * 4);

    for pixel in image.mirrored().pixels {
        bytes.push(((pixel >> 16) & 0xFF) as u8);
        bytes.push(((pixel >> 8) & 0xFF) as u8);
        bytes.push((pixel & 0xFF) as u8);
        bytes.push(((pixel >> 24) & 0xFF) as u8);
    }

    bytes
}
