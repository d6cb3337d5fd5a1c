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

//! Compressed image → texture storage
//!
//! The header is read first so oversized images are rejected before any pixel
//! data is decoded. The container is then decoded by the `image` crate into
//! RGBA8 under texture-sized limits and copied row by row into the logical
//! area of freshly allocated power-of-two storage.

use std::io::Cursor;

use super::{Image, ImageFormat, MAX_TEXTURE_SIZE};
use crate::core::color::Color;
use crate::core::error::{DecodeError, GraphicsError, Result};
use crate::core::surface::SurfaceMut;

pub(super) fn decode(bytes: &[u8], hint: Option<ImageFormat>) -> Result<Image> {
    let sniffed = ImageFormat::from_signature(bytes);

    let format = match (hint, sniffed) {
        (Some(hinted), Some(actual)) if hinted != actual => {
            // Misnamed file; the signature wins
            log::warn!(
                "Image named as {:?} but data is {:?}, decoding as {:?}",
                hinted,
                actual,
                actual
            );
            actual
        }
        (Some(hinted), _) => hinted,
        (None, Some(actual)) => actual,
        (None, None) => {
            return Err(DecodeError::UnsupportedFormat(describe_signature(bytes)).into());
        }
    };

    // Size checks run on the header alone, before any pixel is decoded
    let (width, height) = {
        let mut header = reader(bytes, format);
        header.no_limits();
        header.into_dimensions().map_err(classify_error)?
    };

    if width > MAX_TEXTURE_SIZE || height > MAX_TEXTURE_SIZE {
        return Err(DecodeError::TooLarge {
            width,
            height,
            max: MAX_TEXTURE_SIZE,
        }
        .into());
    }
    if width == 0 || height == 0 {
        return Err(GraphicsError::InvalidSize {
            width,
            height,
            max: MAX_TEXTURE_SIZE,
        });
    }

    let mut decoder = reader(bytes, format);
    decoder.limits(texture_limits());
    let decoded = decoder.decode().map_err(|err| match err {
        image::ImageError::Limits(_) => DecodeError::TooLarge {
            width,
            height,
            max: MAX_TEXTURE_SIZE,
        },
        other => classify_error(other),
    })?;

    let rgba = decoded.to_rgba8();
    let mut image = Image::allocate(width, height);

    let row_bytes = width as usize * 4;
    for (y, src_row) in rgba.as_raw().chunks_exact(row_bytes).enumerate() {
        let dst_row = image.row_mut(y);
        for (dst, px) in dst_row.iter_mut().zip(src_row.chunks_exact(4)) {
            *dst = Color::rgba(px[0], px[1], px[2], px[3]);
        }
    }

    log::debug!(
        "Decoded {:?} image {}x{} into {}x{} texture",
        format,
        width,
        height,
        image.texture_width(),
        image.texture_height()
    );

    Ok(image)
}

fn reader(bytes: &[u8], format: ImageFormat) -> image::ImageReader<Cursor<&[u8]>> {
    image::ImageReader::with_format(Cursor::new(bytes), format.codec_format())
}

/// Codec limits matching texture storage
fn texture_limits() -> image::Limits {
    let mut limits = image::Limits::default();
    limits.max_image_width = Some(MAX_TEXTURE_SIZE);
    limits.max_image_height = Some(MAX_TEXTURE_SIZE);
    limits
}

fn classify_error(err: image::ImageError) -> DecodeError {
    match err {
        image::ImageError::Unsupported(unsupported) => {
            DecodeError::UnsupportedFormat(unsupported.to_string())
        }
        other => DecodeError::Malformed(other),
    }
}

fn describe_signature(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "empty input".to_string();
    }
    let head: Vec<String> = bytes.iter().take(8).map(|b| format!("{:02X}", b)).collect();
    format!("unknown signature {}", head.join(" "))
}
