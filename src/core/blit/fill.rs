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

//! Solid fills

use super::{Blitter, ClipPolicy};
use crate::core::color::Color;
use crate::core::error::{GraphicsError, Result};
use crate::core::surface::{Rect, SurfaceMut};

impl Blitter {
    /// Set every pixel of `rect` to `color`
    ///
    /// No alpha handling: the color is written as-is, including its alpha.
    ///
    /// # Returns
    ///
    /// The rectangle actually filled (empty if clipped away).
    ///
    /// # Errors
    ///
    /// Under [`ClipPolicy::Reject`], [`GraphicsError::RectOutOfBounds`] if
    /// `rect` leaves the drawable area.
    pub fn fill_rect<D>(&self, target: &mut D, color: Color, rect: Rect) -> Result<Rect>
    where
        D: SurfaceMut + ?Sized,
    {
        let bounds = self.drawable(target);
        let area = match self.policy {
            ClipPolicy::Clip => rect.intersect(&bounds),
            ClipPolicy::Reject => {
                if !bounds.contains_rect(&rect) {
                    return Err(GraphicsError::RectOutOfBounds { rect, bounds });
                }
                rect
            }
        };

        if area.is_empty() {
            return Ok(area);
        }

        log::trace!(
            "Fill ({}, {}) {}x{} with {:08X}",
            area.x,
            area.y,
            area.width,
            area.height,
            color.raw()
        );

        let x = area.x as usize;
        let width = area.width as usize;
        for y in area.y as usize..area.bottom() as usize {
            target.row_mut(y)[x..x + width].fill(color);
        }

        Ok(area)
    }

    /// Fill the whole logical surface, ignoring the clip rectangle
    pub fn clear<D>(&self, target: &mut D, color: Color)
    where
        D: SurfaceMut + ?Sized,
    {
        target.fill(color);
    }
}
