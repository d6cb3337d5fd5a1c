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

//! Blitter
//!
//! Rectangle copies, fills and lines between pixel surfaces. Every operation is
//! generic over [`Surface`]/[`SurfaceMut`], so the source and destination may
//! each be an [`Image`](super::image::Image) or a framebuffer view.
//!
//! # Clipping
//!
//! Drawing is limited to the destination's logical bounds intersected with the
//! optional clip rectangle. What happens to rectangles that cross those bounds
//! depends on the [`ClipPolicy`]:
//!
//! - [`ClipPolicy::Clip`] (default): the rectangle is trimmed to the overlap;
//!   copies shift so source and destination pixels stay aligned.
//! - [`ClipPolicy::Reject`]: the call fails with
//!   [`GraphicsError::RectOutOfBounds`](super::error::GraphicsError::RectOutOfBounds)
//!   and nothing is written.
//!
//! Lines always clip per pixel regardless of policy. [`Blitter::clear`] fills the
//! whole surface and ignores the clip rectangle.
//!
//! # Alpha Test
//!
//! [`BlitMode::AlphaTest`] skips source pixels whose alpha is 0. This is a
//! binary cutout: partially transparent pixels are copied as-is, nothing is
//! blended.

mod copy;
mod fill;
mod line;

use serde::{Deserialize, Serialize};

use super::surface::{Rect, Surface};

/// How source pixels are written to the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlitMode {
    /// Every source pixel overwrites the destination
    #[default]
    Opaque,
    /// Source pixels with alpha 0 are skipped
    AlphaTest,
}

impl From<bool> for BlitMode {
    /// `true` selects the alpha test
    fn from(alpha_test: bool) -> Self {
        if alpha_test {
            BlitMode::AlphaTest
        } else {
            BlitMode::Opaque
        }
    }
}

/// What to do with rectangles that cross the drawable bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipPolicy {
    #[default]
    Clip,
    Reject,
}

/// Blitter settings from the `[blitter]` config table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlitterConfig {
    pub clip_policy: ClipPolicy,
}

/// Software blitter with an optional clip rectangle
///
/// # Examples
///
/// ```
/// use pspgfx::core::{BlitMode, Blitter, Color, Image, Rect, Surface, SurfaceMut};
///
/// let mut sprite = Image::new(2, 2).unwrap();
/// sprite.fill(Color::RED);
/// sprite.set_pixel(1, 1, Color::TRANSPARENT).unwrap();
///
/// let mut canvas = Image::new(2, 2).unwrap();
/// canvas.fill(Color::WHITE);
///
/// let blitter = Blitter::new();
/// blitter
///     .copy_rect(&sprite, Rect::with_size(2, 2), &mut canvas, (0, 0), BlitMode::AlphaTest)
///     .unwrap();
///
/// assert_eq!(canvas.get_pixel(0, 0).unwrap(), Color::RED);
/// assert_eq!(canvas.get_pixel(1, 1).unwrap(), Color::WHITE);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Blitter {
    /// Additional clip rectangle, intersected with each destination's bounds
    clip_rect: Option<Rect>,
    policy: ClipPolicy,
}

impl Blitter {
    /// Blitter with [`ClipPolicy::Clip`] and no clip rectangle
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ClipPolicy) -> Self {
        Self {
            clip_rect: None,
            policy,
        }
    }

    pub fn from_config(config: &BlitterConfig) -> Self {
        Self::with_policy(config.clip_policy)
    }

    #[inline(always)]
    pub fn policy(&self) -> ClipPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ClipPolicy) {
        self.policy = policy;
    }

    /// Restrict all drawing (except [`Blitter::clear`]) to `rect`
    pub fn set_clip_rect(&mut self, rect: Rect) {
        self.clip_rect = Some(rect);
    }

    pub fn reset_clip_rect(&mut self) {
        self.clip_rect = None;
    }

    #[inline(always)]
    pub fn clip_rect(&self) -> Option<Rect> {
        self.clip_rect
    }

    /// Drawable area of `dest`: its bounds intersected with the clip rectangle
    pub(crate) fn drawable<D: Surface + ?Sized>(&self, dest: &D) -> Rect {
        match self.clip_rect {
            Some(clip) => dest.bounds().intersect(&clip),
            None => dest.bounds(),
        }
    }
}
