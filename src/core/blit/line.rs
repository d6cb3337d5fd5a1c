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

//! Line rendering
//!
//! Lines use Bresenham's algorithm in its closed form: at step `i` along the
//! major axis the minor axis has advanced by `i * minor / major`, rounded to
//! the nearest pixel with halves rounding up. That lets a line be clipped to
//! the drawable area analytically, so only the visible steps are walked no
//! matter how far away the endpoints are. Clipped pixels are dropped, never
//! reported as errors.
//!
//! # References
//!
//! - [Bresenham's Line Algorithm](https://en.wikipedia.org/wiki/Bresenham%27s_line_algorithm)

use super::Blitter;
use crate::core::color::Color;
use crate::core::surface::{Rect, SurfaceMut};

/// One line in major/minor axis form
///
/// Pixel `i` for `i` in `0..=major` sits at `major_step * i` along the major
/// axis and `minor_step * minor_offset(i)` along the minor one.
#[derive(Debug, Clone, Copy)]
struct Segment {
    major: i128,
    minor: i128,
}

impl Segment {
    #[inline(always)]
    fn minor_offset(&self, i: i128) -> i128 {
        if self.major == 0 {
            0
        } else {
            (2 * i * self.minor + self.major).div_euclid(2 * self.major)
        }
    }

    /// First step whose minor offset is at least `k`
    fn first_step_reaching(&self, k: i128) -> i128 {
        if k <= 0 {
            return 0;
        }
        if self.minor == 0 {
            return self.major + 1;
        }
        div_ceil(2 * self.major * k - self.major, 2 * self.minor)
    }

    /// Last step whose minor offset is at most `k`
    fn last_step_within(&self, k: i128) -> i128 {
        if k < 0 {
            return -1;
        }
        if self.minor == 0 {
            return self.major;
        }
        (2 * self.major * (k + 1) - self.major - 1).div_euclid(2 * self.minor)
    }
}

#[inline(always)]
fn div_ceil(num: i128, den: i128) -> i128 {
    -(-num).div_euclid(den)
}

/// Offsets `o` along one axis for which `origin + step * o` lies in `start..end`
fn axis_window(origin: i64, step: i64, start: i64, end: i64) -> (i128, i128) {
    let (origin, start, end) = (origin as i128, start as i128, end as i128);
    if step > 0 {
        (start - origin, end - 1 - origin)
    } else {
        (origin - (end - 1), origin - start)
    }
}

impl Blitter {
    /// Draw a line from `from` to `to`, both endpoints inclusive
    ///
    /// # Returns
    ///
    /// Number of pixels written after clipping
    ///
    /// # Examples
    ///
    /// ```
    /// use pspgfx::core::{Blitter, Color, Image, Surface};
    ///
    /// let mut image = Image::new(8, 8).unwrap();
    /// let written = Blitter::new().draw_line(&mut image, (-4, 0), (7, 0), Color::WHITE);
    /// assert_eq!(written, 8);
    /// assert_eq!(image.get_pixel(0, 0).unwrap(), Color::WHITE);
    /// ```
    pub fn draw_line<D>(&self, target: &mut D, from: (i32, i32), to: (i32, i32), color: Color) -> usize
    where
        D: SurfaceMut + ?Sized,
    {
        let bounds = self.drawable(target);
        if bounds.is_empty() {
            return 0;
        }

        let (x0, y0) = (from.0 as i64, from.1 as i64);
        let (x1, y1) = (to.0 as i64, to.1 as i64);
        let sx = if x1 < x0 { -1 } else { 1 };
        let sy = if y1 < y0 { -1 } else { 1 };
        let (adx, ady) = ((x1 - x0).abs(), (y1 - y0).abs());

        let x_window = axis_window(x0, sx, bounds.x as i64, bounds.right());
        let y_window = axis_window(y0, sy, bounds.y as i64, bounds.bottom());

        let x_major = adx >= ady;
        let (segment, major_window, minor_window) = if x_major {
            (Segment { major: adx as i128, minor: ady as i128 }, x_window, y_window)
        } else {
            (Segment { major: ady as i128, minor: adx as i128 }, y_window, x_window)
        };

        // Steps inside the drawable area along both axes
        let first = 0i128
            .max(major_window.0)
            .max(segment.first_step_reaching(minor_window.0));
        let last = segment
            .major
            .min(major_window.1)
            .min(segment.last_step_within(minor_window.1));
        if first > last {
            return 0;
        }

        log::trace!(
            "Line ({}, {}) → ({}, {}) color={:08X}, steps {}..={}",
            from.0,
            from.1,
            to.0,
            to.1,
            color.raw(),
            first,
            last
        );

        let stride = target.stride();
        let pixels = target.pixels_mut();
        let mut written = 0;

        for i in first..=last {
            let m = segment.minor_offset(i);
            let (dx, dy) = if x_major { (i, m) } else { (m, i) };
            let x = x0 as i128 + sx as i128 * dx;
            let y = y0 as i128 + sy as i128 * dy;
            debug_assert!(bounds.contains_point(x as i32, y as i32));
            pixels[y as usize * stride + x as usize] = color;
            written += 1;
        }

        written
    }

    /// Draw connected line segments through `points`
    ///
    /// Fewer than two points draw nothing. Shared vertices are written once
    /// per segment.
    pub fn draw_polyline<D>(&self, target: &mut D, points: &[(i32, i32)], color: Color) -> usize
    where
        D: SurfaceMut + ?Sized,
    {
        points
            .windows(2)
            .map(|segment| self.draw_line(target, segment[0], segment[1], color))
            .sum()
    }

    /// Draw the one-pixel outline of `rect`
    ///
    /// Clipped like lines; an empty rectangle draws nothing.
    pub fn draw_rect<D>(&self, target: &mut D, color: Color, rect: Rect) -> usize
    where
        D: SurfaceMut + ?Sized,
    {
        if rect.is_empty() {
            return 0;
        }

        let left = rect.x;
        let top = rect.y;
        let right = (rect.right() - 1).min(i32::MAX as i64) as i32;
        let bottom = (rect.bottom() - 1).min(i32::MAX as i64) as i32;

        let mut written = self.draw_line(target, (left, top), (right, top), color);
        if bottom > top {
            written += self.draw_line(target, (left, bottom), (right, bottom), color);
        }
        if bottom as i64 - top as i64 > 1 {
            written += self.draw_line(target, (left, top + 1), (left, bottom - 1), color);
            if right > left {
                written += self.draw_line(target, (right, top + 1), (right, bottom - 1), color);
            }
        }
        written
    }
}
