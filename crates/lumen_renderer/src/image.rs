//! Linear-color image buffer used by render workers and the reduction.

use crate::Color;
use std::path::Path;

/// Simple image buffer for storing render output.
///
/// Coordinates put `y = 0` at the bottom of the picture, matching the
/// camera's `v` axis. Rows are stored top to bottom so the pixel vector can
/// be handed straight to an encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Create an image where every pixel has the same color.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels in storage order (top row first).
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let row = (self.height - 1 - y) as usize;
        Some(row * self.width as usize + x as usize)
    }

    /// Get the pixel at (x, y). Out-of-range coordinates read black.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.index(x, y).map_or(Color::ZERO, |i| self.pixels[i])
    }

    /// Set the pixel at (x, y). Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Replace every pixel with the mean of itself and the matching pixel
    /// of `other`.
    ///
    /// # Panics
    ///
    /// If the two images differ in size.
    pub fn average(&mut self, other: &ImageBuffer) {
        assert_eq!(
            (self.width, self.height),
            (other.width, other.height),
            "cannot average images of different sizes"
        );
        for (dst, src) in self.pixels.iter_mut().zip(&other.pixels) {
            *dst = (*dst + *src) / 2.0;
        }
    }

    /// Convert to RGBA bytes, clamping each channel to `[0, 1]` first.
    /// No gamma is applied here; pixels are expected to be display-ready.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            let c = (*color * 255.999).clamp(Color::ZERO, Color::splat(255.0));
            bytes.extend_from_slice(&[c.x as u8, c.y as u8, c.z as u8, 255]);
        }
        bytes
    }

    /// Encode and write the image; the format follows the path's extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        image::save_buffer(
            path,
            &self.to_rgba8(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )
    }
}
