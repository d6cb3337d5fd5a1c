// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Image store
//!
//! An [`Image`] owns a decoded pixel buffer in texture storage: both storage
//! dimensions are rounded up to the next power of two, as required by the
//! fixed-function texture unit. Only the logical `image_width`×`image_height`
//! sub-rectangle is meaningful.
//!
//! # Storage Layout
//!
//! ```text
//! <------------- texture_width (2^n) ------------->
//! +----------------------------+-----------------+  ^
//! | logical image              | padding         |  |
//! | image_width × image_height |                 |  texture_height (2^m)
//! +----------------------------+                 |  |
//! | padding                                      |  |
//! +----------------------------------------------+  v
//! ```
//!
//! Images are created by [`Image::new`] (blank), [`Image::from_memory`] or
//! [`Image::open`] (decode), mutated in place through [`SurfaceMut`] and the
//! blitter, and released on drop.

mod decode;
mod encode;

pub use encode::{encode, save, SaveOptions};

use std::path::Path;

use super::color::Color;
use super::error::{GraphicsError, Result};
use super::surface::{Surface, SurfaceMut};

/// Largest logical width or height an image may have
pub const MAX_TEXTURE_SIZE: u32 = 512;

/// Compressed container formats understood by the image store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];

    /// Detect the format from the leading bytes
    ///
    /// # Examples
    ///
    /// ```
    /// use pspgfx::core::ImageFormat;
    ///
    /// assert_eq!(ImageFormat::from_signature(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageFormat::Jpeg));
    /// assert_eq!(ImageFormat::from_signature(b"GIF89a"), None);
    /// ```
    pub fn from_signature(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&Self::PNG_SIGNATURE) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(&Self::JPEG_SIGNATURE) {
            Some(ImageFormat::Jpeg)
        } else {
            None
        }
    }

    /// Detect the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }

    pub(crate) fn codec_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

/// Round up to the next power of two, with a floor of 1
///
/// # Examples
///
/// ```
/// use pspgfx::core::image::next_power_of_two;
///
/// assert_eq!(next_power_of_two(0), 1);
/// assert_eq!(next_power_of_two(204), 256);
/// assert_eq!(next_power_of_two(256), 256);
/// ```
pub fn next_power_of_two(value: u32) -> u32 {
    value.max(1).next_power_of_two()
}

/// Decoded or blank image in power-of-two texture storage
///
/// # Examples
///
/// ```
/// use pspgfx::core::{Color, Image, Surface, SurfaceMut};
///
/// let mut image = Image::new(100, 30).unwrap();
/// assert_eq!(image.texture_width(), 128);
/// assert_eq!(image.texture_height(), 32);
///
/// image.set_pixel(99, 29, Color::RED).unwrap();
/// assert_eq!(image.get_pixel(99, 29).unwrap(), Color::RED);
/// assert!(image.get_pixel(100, 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Storage width, 2^n with n >= 0
    texture_width: u32,
    /// Storage height, 2^n with n >= 0
    texture_height: u32,
    image_width: u32,
    image_height: u32,
    /// `texture_width * texture_height` cells, row-major
    data: Vec<Color>,
}

impl Image {
    /// Create a blank image with every pixel set to color 0
    ///
    /// # Errors
    ///
    /// [`GraphicsError::InvalidSize`] unless `0 < width, height <= 512`.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 || width > MAX_TEXTURE_SIZE || height > MAX_TEXTURE_SIZE {
            return Err(GraphicsError::InvalidSize {
                width,
                height,
                max: MAX_TEXTURE_SIZE,
            });
        }
        Ok(Self::allocate(width, height))
    }

    /// Allocate padded storage for a logical size already known to be valid
    pub(crate) fn allocate(width: u32, height: u32) -> Self {
        let texture_width = next_power_of_two(width);
        let texture_height = next_power_of_two(height);
        Self {
            texture_width,
            texture_height,
            image_width: width,
            image_height: height,
            data: vec![Color::TRANSPARENT; (texture_width * texture_height) as usize],
        }
    }

    /// Decode a PNG or JPEG from memory, detecting the format by signature
    ///
    /// # Errors
    ///
    /// [`GraphicsError::Decode`] if the data is malformed, in an unsupported
    /// format, or larger than [`MAX_TEXTURE_SIZE`] in either dimension.
    pub fn from_memory(bytes: &[u8]) -> Result<Self> {
        decode::decode(bytes, None)
    }

    /// Decode from memory with a known format
    pub fn from_memory_with_format(bytes: &[u8], format: ImageFormat) -> Result<Self> {
        decode::decode(bytes, Some(format))
    }

    /// Load an image file
    ///
    /// The format is taken from the file extension. Files with an unknown
    /// extension are sniffed by signature instead.
    ///
    /// # Errors
    ///
    /// [`GraphicsError::Io`] if the file cannot be read, otherwise as
    /// [`Image::from_memory`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        log::debug!("Loading image {} ({} bytes)", path.display(), bytes.len());
        decode::decode(&bytes, ImageFormat::from_path(path))
    }

    #[inline(always)]
    pub fn texture_width(&self) -> u32 {
        self.texture_width
    }

    #[inline(always)]
    pub fn texture_height(&self) -> u32 {
        self.texture_height
    }

    #[inline(always)]
    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    #[inline(always)]
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Raw texture storage including padding
    pub fn data(&self) -> &[Color] {
        &self.data
    }

    /// Set every logical pixel to `color`
    pub fn clear(&mut self, color: Color) {
        self.fill(color);
    }

    /// Invert the RGB channels of every logical pixel, keeping alpha
    pub fn negate(&mut self) {
        for y in 0..self.height() {
            for pixel in self.row_mut(y) {
                *pixel = pixel.inverted();
            }
        }
    }

    /// Encode the logical image to a file, format chosen by extension
    pub fn save<P: AsRef<Path>>(&self, path: P, options: SaveOptions) -> Result<()> {
        save(path, self, options)
    }
}

impl Surface for Image {
    #[inline(always)]
    fn width(&self) -> usize {
        self.image_width as usize
    }

    #[inline(always)]
    fn height(&self) -> usize {
        self.image_height as usize
    }

    #[inline(always)]
    fn stride(&self) -> usize {
        self.texture_width as usize
    }

    fn pixels(&self) -> &[Color] {
        &self.data
    }
}

impl SurfaceMut for Image {
    fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests;
