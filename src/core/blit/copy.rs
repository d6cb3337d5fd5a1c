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

//! Rectangle copies
//!
//! Surface→surface and surface→itself transfers.

use super::{BlitMode, Blitter, ClipPolicy};
use crate::core::color::Color;
use crate::core::error::{GraphicsError, Result};
use crate::core::surface::{Rect, Surface, SurfaceMut};

impl Blitter {
    /// Copy `src` from `source` to `dest` with its top-left corner at `at`
    ///
    /// # Arguments
    ///
    /// * `source` - Surface to read from (image or framebuffer)
    /// * `src` - Rectangle in source coordinates
    /// * `dest` - Surface to write to (image or framebuffer)
    /// * `at` - Destination position of the rectangle's top-left corner
    /// * `mode` - [`BlitMode::Opaque`] or [`BlitMode::AlphaTest`]
    ///
    /// # Returns
    ///
    /// The destination rectangle actually written. It is empty when the copy
    /// was clipped away entirely.
    ///
    /// # Errors
    ///
    /// Under [`ClipPolicy::Reject`], [`GraphicsError::RectOutOfBounds`] if the
    /// source rectangle leaves the source or the destination rectangle leaves
    /// the drawable area. Nothing is written in that case.
    pub fn copy_rect<S, D>(
        &self,
        source: &S,
        src: Rect,
        dest: &mut D,
        at: (i32, i32),
        mode: BlitMode,
    ) -> Result<Rect>
    where
        S: Surface + ?Sized,
        D: SurfaceMut + ?Sized,
    {
        let (src, dst) = match self.resolve_copy(source.bounds(), src, self.drawable(dest), at)? {
            Some(rects) => rects,
            None => return Ok(Rect::new(at.0, at.1, 0, 0)),
        };

        log::trace!(
            "Blit ({}, {}) {}x{} → ({}, {}) {:?}",
            src.x,
            src.y,
            src.width,
            src.height,
            dst.x,
            dst.y,
            mode
        );

        let sx = src.x as usize;
        let dx = dst.x as usize;
        let width = src.width as usize;
        for row in 0..src.height as usize {
            let src_row = &source.row(src.y as usize + row)[sx..sx + width];
            let dst_row = &mut dest.row_mut(dst.y as usize + row)[dx..dx + width];
            write_span(src_row, dst_row, mode);
        }

        Ok(dst)
    }

    /// Copy a rectangle within one surface
    ///
    /// Overlapping source and destination regions are handled by staging the
    /// source pixels in a temporary buffer first.
    ///
    /// # Errors
    ///
    /// Same as [`Blitter::copy_rect`].
    pub fn copy_within<D>(
        &self,
        surface: &mut D,
        src: Rect,
        at: (i32, i32),
        mode: BlitMode,
    ) -> Result<Rect>
    where
        D: SurfaceMut + ?Sized,
    {
        let (src, dst) =
            match self.resolve_copy(surface.bounds(), src, self.drawable(surface), at)? {
                Some(rects) => rects,
                None => return Ok(Rect::new(at.0, at.1, 0, 0)),
            };

        log::trace!(
            "Blit within ({}, {}) {}x{} → ({}, {}) {:?}",
            src.x,
            src.y,
            src.width,
            src.height,
            dst.x,
            dst.y,
            mode
        );

        let sx = src.x as usize;
        let width = src.width as usize;
        let mut staged: Vec<Color> = Vec::with_capacity(width * src.height as usize);
        for row in 0..src.height as usize {
            staged.extend_from_slice(&surface.row(src.y as usize + row)[sx..sx + width]);
        }

        let dx = dst.x as usize;
        for (row, src_row) in staged.chunks_exact(width).enumerate() {
            let dst_row = &mut surface.row_mut(dst.y as usize + row)[dx..dx + width];
            write_span(src_row, dst_row, mode);
        }

        Ok(dst)
    }

    /// Work out the source and destination rectangles of a copy
    ///
    /// Returns `None` when nothing is left to copy. Both returned rectangles
    /// have the same size and lie inside their bounds.
    fn resolve_copy(
        &self,
        src_bounds: Rect,
        src: Rect,
        dst_bounds: Rect,
        at: (i32, i32),
    ) -> Result<Option<(Rect, Rect)>> {
        let dst = src.moved_to(at.0, at.1);

        if self.policy == ClipPolicy::Reject {
            if !src_bounds.contains_rect(&src) {
                return Err(GraphicsError::RectOutOfBounds {
                    rect: src,
                    bounds: src_bounds,
                });
            }
            if !dst_bounds.contains_rect(&dst) {
                return Err(GraphicsError::RectOutOfBounds {
                    rect: dst,
                    bounds: dst_bounds,
                });
            }
            return Ok((!src.is_empty()).then_some((src, dst)));
        }

        // Trim against the source, dragging the destination along
        let src_clipped = src.intersect(&src_bounds);
        if src_clipped.is_empty() {
            return Ok(None);
        }
        let (Some(shift_x), Some(shift_y)) = (
            offset(at.0, src_clipped.x as i64 - src.x as i64),
            offset(at.1, src_clipped.y as i64 - src.y as i64),
        ) else {
            return Ok(None);
        };
        let shifted = src_clipped.moved_to(shift_x, shift_y);

        // Trim against the destination, dragging the source along
        let dst_clipped = shifted.intersect(&dst_bounds);
        if dst_clipped.is_empty() {
            return Ok(None);
        }
        let src_final = Rect::new(
            (src_clipped.x as i64 + (dst_clipped.x as i64 - shifted.x as i64)) as i32,
            (src_clipped.y as i64 + (dst_clipped.y as i64 - shifted.y as i64)) as i32,
            dst_clipped.width,
            dst_clipped.height,
        );

        Ok(Some((src_final, dst_clipped)))
    }
}

/// `base + delta`, or `None` if the result leaves the `i32` coordinate space
fn offset(base: i32, delta: i64) -> Option<i32> {
    i32::try_from(base as i64 + delta).ok()
}

/// Write one pre-clipped row span
#[inline(always)]
fn write_span(src: &[Color], dst: &mut [Color], mode: BlitMode) {
    match mode {
        BlitMode::Opaque => dst.copy_from_slice(src),
        BlitMode::AlphaTest => {
            for (d, s) in dst.iter_mut().zip(src) {
                if !s.is_transparent() {
                    *d = *s;
                }
            }
        }
    }
}
