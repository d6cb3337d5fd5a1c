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

//! Core graphics components
//!
//! - [`color`]: Packed 32-bit PSP color
//! - [`surface`]: Pixel surface traits, rectangles and borrowed framebuffer views
//! - [`image`]: Image store (decode, blank create, save)
//! - [`blit`]: Rectangle copies, fills and lines
//! - [`display`]: Double-buffered VRAM and vertical blank pacing
//! - [`error`]: Error types

pub mod blit;
pub mod color;
pub mod display;
pub mod error;
pub mod image;
pub mod surface;

pub use blit::{BlitMode, Blitter, BlitterConfig, ClipPolicy};
pub use color::Color;
pub use display::{Display, DisplayConfig, NoVsync, VBlank, VBlankClock, MAX_DISPLAY_DIMENSION};
pub use error::{DecodeError, GraphicsError, Result};
pub use image::{Image, ImageFormat, SaveOptions, MAX_TEXTURE_SIZE};
pub use surface::{Rect, Surface, SurfaceMut, SurfaceView, SurfaceViewMut};
