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

//! Error types
//!
//! Two classes of failure exist:
//!
//! - Input failures ([`DecodeError`], I/O, config): bad data from outside,
//!   reported to the caller which decides whether to abort.
//! - Caller errors ([`GraphicsError::InvalidSize`], [`GraphicsError::OutOfBounds`],
//!   [`GraphicsError::RectOutOfBounds`]): reported instead of silently
//!   writing outside a pixel buffer.
//!
//! Nothing is retried or recovered automatically.

use thiserror::Error;

use super::surface::Rect;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, GraphicsError>;

/// Failure while turning compressed bytes into an [`Image`](super::image::Image)
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The data does not start with a known signature, or the extension is not supported
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The codec rejected the data
    #[error("malformed image data: {0}")]
    Malformed(#[source] image::ImageError),

    /// The image does not fit into texture storage
    #[error("image {width}x{height} exceeds maximum texture size {max}")]
    TooLarge { width: u32, height: u32, max: u32 },
}

/// Errors produced by the image store, blitter and display
#[derive(Debug, Error)]
pub enum GraphicsError {
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("encode failed: {0}")]
    Encode(String),

    #[error("invalid image size {width}x{height} (must be 1..={max})")]
    InvalidSize { width: u32, height: u32, max: u32 },

    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} surface")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("rectangle {rect:?} not contained in {bounds:?}")]
    RectOutOfBounds { rect: Rect, bounds: Rect },

    #[error("invalid surface: {0}")]
    InvalidSurface(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for GraphicsError {
    fn from(err: toml::de::Error) -> Self {
        GraphicsError::Config(err.to_string())
    }
}
