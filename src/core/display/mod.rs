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

//! Double-buffered display
//!
//! The display owns one VRAM block holding two frames. One frame is scanned
//! out (the display buffer), the other is drawn into (the draw buffer).
//! [`Display::present`] waits for vertical blank and exchanges them.
//!
//! # VRAM Layout
//!
//! ```text
//! 0                          line_size * height         2 * line_size * height
//! +--------------------------+--------------------------+
//! | frame 0                  | frame 1                  |
//! +--------------------------+--------------------------+
//! ```
//!
//! Each frame is `height` rows of `line_size` cells, of which the first
//! `width` are visible. The default geometry matches the PSP LCD: 480×272
//! visible, 512-pixel lines.

mod vblank;

pub use vblank::{NoVsync, VBlank, VBlankClock};

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::error::{GraphicsError, Result};
use super::image::{self, SaveOptions};
use super::surface::{SurfaceView, SurfaceViewMut};

/// Largest accepted width, height or line size in pixels
pub const MAX_DISPLAY_DIMENSION: u32 = 4096;

/// Display geometry and pacing from the `[display]` config table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Visible width in pixels
    pub width: u32,
    /// Visible height in pixels
    pub height: u32,
    /// Physical line length in pixels (framebuffer stride)
    pub line_size: u32,
    /// Vertical blank rate in Hz
    pub refresh_hz: u32,
    /// Pace [`Display::present`] to the refresh rate
    pub vsync: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 272,
            line_size: 512,
            refresh_hz: 60,
            vsync: true,
        }
    }
}

impl DisplayConfig {
    /// Check the geometry is usable
    ///
    /// # Errors
    ///
    /// [`GraphicsError::Config`] for a zero size or refresh rate, a line
    /// size smaller than the width, or any dimension above
    /// [`MAX_DISPLAY_DIMENSION`].
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GraphicsError::Config(format!(
                "display size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if self.width.max(self.height).max(self.line_size) > MAX_DISPLAY_DIMENSION {
            return Err(GraphicsError::Config(format!(
                "display {}x{} line_size={} exceeds {} pixels",
                self.width, self.height, self.line_size, MAX_DISPLAY_DIMENSION
            )));
        }
        if self.line_size < self.width {
            return Err(GraphicsError::Config(format!(
                "line size {} is smaller than display width {}",
                self.line_size, self.width
            )));
        }
        if self.refresh_hz == 0 {
            return Err(GraphicsError::Config(
                "refresh rate must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Cells in one frame, including line padding
    #[inline(always)]
    pub fn frame_len(&self) -> usize {
        self.line_size as usize * self.height as usize
    }
}

/// Two framebuffers in one VRAM block, flipped on vertical blank
///
/// # Example
///
/// ```
/// use pspgfx::core::{Blitter, Color, Display, DisplayConfig, NoVsync, Surface};
///
/// let mut display = Display::new(DisplayConfig::default(), NoVsync).unwrap();
/// Blitter::new().clear(&mut display.draw_buffer(), Color::BLUE);
///
/// assert_eq!(display.present(), 1);
/// assert_eq!(display.display_buffer().get_pixel(0, 0).unwrap(), Color::BLUE);
/// ```
#[derive(Debug)]
pub struct Display<V: VBlank> {
    config: DisplayConfig,
    /// Both frames, back to back
    vram: Vec<Color>,
    /// Frame currently drawn into (0 or 1); the other one is displayed
    draw_index: usize,
    /// Number of completed presents
    frames: u64,
    vblank: V,
}

impl<V: VBlank> Display<V> {
    /// Allocate VRAM for two frames of `config`'s geometry
    ///
    /// Both frames start out as color 0.
    ///
    /// # Errors
    ///
    /// [`GraphicsError::Config`] if the geometry is invalid.
    pub fn new(config: DisplayConfig, vblank: V) -> Result<Self> {
        config.validate()?;
        let vram_len = config
            .frame_len()
            .checked_mul(2)
            .ok_or_else(|| GraphicsError::Config("display VRAM size overflows".to_string()))?;
        log::debug!(
            "Display {}x{} line_size={} refresh={}Hz vsync={}",
            config.width,
            config.height,
            config.line_size,
            config.refresh_hz,
            config.vsync
        );

        Ok(Self {
            config,
            vram: vec![Color::TRANSPARENT; vram_len],
            draw_index: 0,
            frames: 0,
            vblank,
        })
    }

    #[inline(always)]
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    #[inline(always)]
    pub fn width(&self) -> u32 {
        self.config.width
    }

    #[inline(always)]
    pub fn height(&self) -> u32 {
        self.config.height
    }

    /// Index (0 or 1) of the frame being drawn into
    #[inline(always)]
    pub fn draw_index(&self) -> usize {
        self.draw_index
    }

    /// Number of completed [`Display::present`] calls
    #[inline(always)]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// The vblank source, e.g. for FPS statistics
    pub fn vblank(&self) -> &V {
        &self.vblank
    }

    /// Writable view of the frame being drawn
    pub fn draw_buffer(&mut self) -> SurfaceViewMut<'_> {
        let (width, height, stride) = self.geometry();
        let range = self.frame_range(self.draw_index);
        SurfaceViewMut::from_validated(&mut self.vram[range], width, height, stride)
    }

    /// Read-only view of the frame being shown
    pub fn display_buffer(&self) -> SurfaceView<'_> {
        let (width, height, stride) = self.geometry();
        let range = self.frame_range(self.draw_index ^ 1);
        SurfaceView::from_validated(&self.vram[range], width, height, stride)
    }

    /// Both frames at once: `(display, draw)`
    ///
    /// Lets the previous frame be copied into the next one.
    pub fn buffers(&mut self) -> (SurfaceView<'_>, SurfaceViewMut<'_>) {
        let (width, height, stride) = self.geometry();
        let (first, second) = self.vram.split_at_mut(self.config.frame_len());
        let (shown, drawn) = if self.draw_index == 0 {
            (second, first)
        } else {
            (first, second)
        };
        (
            SurfaceView::from_validated(shown, width, height, stride),
            SurfaceViewMut::from_validated(drawn, width, height, stride),
        )
    }

    /// Block until the next vertical blank without flipping
    pub fn wait_vblank(&mut self) {
        self.vblank.wait_for_vblank();
    }

    /// Wait for vertical blank, then exchange the draw and display buffers
    ///
    /// The previously displayed frame becomes the new draw buffer with its
    /// content intact; nothing is cleared.
    ///
    /// # Returns
    ///
    /// Total number of frames presented, including this one
    pub fn present(&mut self) -> u64 {
        self.vblank.wait_for_vblank();
        self.draw_index ^= 1;
        self.frames += 1;
        log::trace!("Present frame {} (draw index {})", self.frames, self.draw_index);
        self.frames
    }

    /// Save the display buffer to an image file
    ///
    /// # Errors
    ///
    /// As [`image::save`].
    pub fn screenshot<P: AsRef<Path>>(&self, path: P, options: SaveOptions) -> Result<()> {
        image::save(path, &self.display_buffer(), options)
    }

    fn geometry(&self) -> (usize, usize, usize) {
        (
            self.config.width as usize,
            self.config.height as usize,
            self.config.line_size as usize,
        )
    }

    fn frame_range(&self, index: usize) -> std::ops::Range<usize> {
        let frame_len = self.config.frame_len();
        index * frame_len..(index + 1) * frame_len
    }
}
