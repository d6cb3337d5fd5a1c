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

//! Surface → compressed image
//!
//! Works on any [`Surface`], so both images and the display buffer (screenshots)
//! can be saved. Only the logical area is written; row stride padding is skipped.

use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::ImageFormat;
use crate::core::error::{GraphicsError, Result};
use crate::core::surface::Surface;

/// Options for [`encode`] and [`save`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Write the alpha channel (PNG only; JPEG never has alpha)
    pub save_alpha: bool,
    /// JPEG quality, clamped to 1..=100
    pub jpeg_quality: u8,
}

impl SaveOptions {
    /// Default options with the alpha channel dropped
    pub fn without_alpha() -> Self {
        Self {
            save_alpha: false,
            ..Self::default()
        }
    }
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            save_alpha: true,
            jpeg_quality: 90,
        }
    }
}

/// Encode the logical area of `surface` in `format`
///
/// # Examples
///
/// ```
/// use pspgfx::core::{Color, Image, ImageFormat, SurfaceMut};
/// use pspgfx::core::image::{encode, SaveOptions};
///
/// let mut image = Image::new(3, 2).unwrap();
/// image.fill(Color::GREEN);
/// let png = encode(&image, ImageFormat::Png, SaveOptions::default()).unwrap();
///
/// let decoded = Image::from_memory(&png).unwrap();
/// assert_eq!(decoded, image);
/// ```
pub fn encode<S: Surface + ?Sized>(
    surface: &S,
    format: ImageFormat,
    options: SaveOptions,
) -> Result<Vec<u8>> {
    let width = surface.width();
    let height = surface.height();
    let with_alpha = options.save_alpha && format == ImageFormat::Png;
    let channels = if with_alpha { 4 } else { 3 };

    let mut buffer = Vec::with_capacity(width * height * channels);
    for y in 0..height {
        for pixel in surface.row(y) {
            let [r, g, b, a] = pixel.to_rgba();
            buffer.extend_from_slice(&[r, g, b]);
            if with_alpha {
                buffer.push(a);
            }
        }
    }

    let color_type = if with_alpha {
        ExtendedColorType::Rgba8
    } else {
        ExtendedColorType::Rgb8
    };

    let mut out = Vec::new();
    let encoded = match format {
        ImageFormat::Png => {
            PngEncoder::new(&mut out).write_image(&buffer, width as u32, height as u32, color_type)
        }
        ImageFormat::Jpeg => {
            let quality = options.jpeg_quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut out, quality).write_image(
                &buffer,
                width as u32,
                height as u32,
                color_type,
            )
        }
    };
    encoded.map_err(|e| GraphicsError::Encode(e.to_string()))?;

    Ok(out)
}

/// Encode `surface` and write it to `path`, format chosen by extension
///
/// # Errors
///
/// [`GraphicsError::Encode`] for an unknown extension or codec failure,
/// [`GraphicsError::Io`] if the file cannot be written.
pub fn save<P: AsRef<Path>, S: Surface + ?Sized>(
    path: P,
    surface: &S,
    options: SaveOptions,
) -> Result<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path).ok_or_else(|| {
        GraphicsError::Encode(format!(
            "cannot pick an output format for {}",
            path.display()
        ))
    })?;

    let bytes = encode(surface, format, options)?;
    std::fs::write(path, &bytes)?;

    log::debug!(
        "Saved {}x{} {:?} to {} ({} bytes, alpha={})",
        surface.width(),
        surface.height(),
        format,
        path.display(),
        bytes.len(),
        options.save_alpha && format == ImageFormat::Png
    );

    Ok(())
}
