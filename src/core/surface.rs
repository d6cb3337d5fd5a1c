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

//! Pixel surfaces
//!
//! A surface is a row-major array of [`Color`] cells with a logical size and a
//! physical row stride. Images use their power-of-two texture width as stride;
//! framebuffers use the hardware line size (512 on PSP).
//!
//! # Coordinate System
//!
//! The origin (0, 0) is the top-left corner. Coordinates are `i32` so that
//! callers can position rectangles partially off-surface and let the blitter
//! clip them. Pixel `(x, y)` lives at index `y * stride + x`.
//!
//! Public accessors validate coordinates against the logical size. The row
//! accessors ([`Surface::row`], [`SurfaceMut::row_mut`]) are the inner fast
//! path: they take pre-validated `usize` rows and index with slices.

use super::color::Color;
use super::error::{GraphicsError, Result};

/// Axis-aligned rectangle in surface coordinates
///
/// `width`/`height` of zero make an empty rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin
    pub const fn with_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Exclusive right edge
    #[inline(always)]
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge
    #[inline(always)]
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Overlapping part of two rectangles
    ///
    /// Returns an empty rectangle anchored at the would-be top-left corner when
    /// they don't overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use pspgfx::core::Rect;
    ///
    /// let a = Rect::new(0, 0, 10, 10);
    /// let b = Rect::new(5, -5, 10, 10);
    /// assert_eq!(a.intersect(&b), Rect::new(5, 0, 5, 5));
    /// assert!(a.intersect(&Rect::new(20, 20, 1, 1)).is_empty());
    /// ```
    pub fn intersect(&self, other: &Rect) -> Rect {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left as i64 || bottom <= top as i64 {
            return Rect::new(left, top, 0, 0);
        }

        Rect::new(
            left,
            top,
            (right - left as i64) as u32,
            (bottom - top as i64) as u32,
        )
    }

    /// Same size, moved by `(dx, dy)`
    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// Same size, top-left corner at `(x, y)`
    pub fn moved_to(&self, x: i32, y: i32) -> Rect {
        Rect::new(x, y, self.width, self.height)
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && (x as i64) < self.right() && (y as i64) < self.bottom()
    }

    /// True when `other` lies entirely inside `self`
    ///
    /// An empty `other` is contained if its corner is inside or on the edge.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Read access to a pixel surface
pub trait Surface {
    /// Logical width in pixels
    fn width(&self) -> usize;

    /// Logical height in pixels
    fn height(&self) -> usize;

    /// Physical row length in pixels (`>= width`)
    fn stride(&self) -> usize;

    /// Backing storage, `stride * height` cells or more
    fn pixels(&self) -> &[Color];

    /// Logical bounds as a rectangle at the origin
    fn bounds(&self) -> Rect {
        Rect::with_size(self.width() as u32, self.height() as u32)
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    /// Read a pixel, checked against the logical size
    ///
    /// # Errors
    ///
    /// [`GraphicsError::OutOfBounds`] if `(x, y)` is outside the surface.
    fn get_pixel(&self, x: i32, y: i32) -> Result<Color> {
        if !self.contains(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        Ok(self.pixels()[y as usize * self.stride() + x as usize])
    }

    /// Logical part of row `y`
    ///
    /// # Panics
    ///
    /// Panics if `y >= height()`. Callers validate rows first.
    #[inline(always)]
    fn row(&self, y: usize) -> &[Color] {
        let start = y * self.stride();
        &self.pixels()[start..start + self.width()]
    }

    #[doc(hidden)]
    fn out_of_bounds(&self, x: i32, y: i32) -> GraphicsError {
        GraphicsError::OutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        }
    }
}

/// Write access to a pixel surface
pub trait SurfaceMut: Surface {
    fn pixels_mut(&mut self) -> &mut [Color];

    /// Write a pixel, checked against the logical size
    ///
    /// # Errors
    ///
    /// [`GraphicsError::OutOfBounds`] if `(x, y)` is outside the surface.
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<()> {
        if !self.contains(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        let index = y as usize * self.stride() + x as usize;
        self.pixels_mut()[index] = color;
        Ok(())
    }

    /// Mutable logical part of row `y`
    ///
    /// # Panics
    ///
    /// Panics if `y >= height()`. Callers validate rows first.
    #[inline(always)]
    fn row_mut(&mut self, y: usize) -> &mut [Color] {
        let start = y * self.stride();
        let width = self.width();
        &mut self.pixels_mut()[start..start + width]
    }

    /// Set every logical pixel to `color`; padding is left alone
    fn fill(&mut self, color: Color) {
        for y in 0..self.height() {
            self.row_mut(y).fill(color);
        }
    }
}

fn validate_layout(len: usize, width: usize, height: usize, stride: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(GraphicsError::InvalidSurface(format!(
            "zero-sized surface {}x{}",
            width, height
        )));
    }
    if stride < width {
        return Err(GraphicsError::InvalidSurface(format!(
            "stride {} is smaller than width {}",
            stride, width
        )));
    }
    let required = stride
        .checked_mul(height)
        .ok_or_else(|| GraphicsError::InvalidSurface("surface size overflows".to_string()))?;
    if len < required {
        return Err(GraphicsError::InvalidSurface(format!(
            "buffer holds {} pixels, {}x{} with stride {} needs {}",
            len, width, height, stride, required
        )));
    }
    Ok(())
}

/// Borrowed read-only view over an external pixel buffer
///
/// # Examples
///
/// ```
/// use pspgfx::core::{Color, Surface, SurfaceView};
///
/// let pixels = vec![Color::RED; 8 * 2];
/// let view = SurfaceView::new(&pixels, 6, 2, 8).unwrap();
/// assert_eq!(view.get_pixel(5, 1).unwrap(), Color::RED);
/// assert!(view.get_pixel(6, 1).is_err()); // padding is not addressable
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SurfaceView<'a> {
    pixels: &'a [Color],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> SurfaceView<'a> {
    /// Wrap `pixels` as a `width`×`height` surface with row length `stride`
    ///
    /// # Errors
    ///
    /// [`GraphicsError::InvalidSurface`] if the size is zero, the stride is
    /// smaller than the width, or the buffer is too short.
    pub fn new(pixels: &'a [Color], width: usize, height: usize, stride: usize) -> Result<Self> {
        validate_layout(pixels.len(), width, height, stride)?;
        Ok(Self::from_validated(pixels, width, height, stride))
    }

    /// Wrap a buffer whose layout the caller has already validated
    pub(crate) fn from_validated(
        pixels: &'a [Color],
        width: usize,
        height: usize,
        stride: usize,
    ) -> Self {
        debug_assert!(validate_layout(pixels.len(), width, height, stride).is_ok());
        Self {
            pixels,
            width,
            height,
            stride,
        }
    }
}

impl Surface for SurfaceView<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn stride(&self) -> usize {
        self.stride
    }

    fn pixels(&self) -> &[Color] {
        self.pixels
    }
}

/// Borrowed mutable view over an external pixel buffer
#[derive(Debug)]
pub struct SurfaceViewMut<'a> {
    pixels: &'a mut [Color],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> SurfaceViewMut<'a> {
    /// Wrap `pixels` as a mutable `width`×`height` surface with row length `stride`
    ///
    /// # Errors
    ///
    /// Same validation as [`SurfaceView::new`].
    pub fn new(
        pixels: &'a mut [Color],
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<Self> {
        validate_layout(pixels.len(), width, height, stride)?;
        Ok(Self::from_validated(pixels, width, height, stride))
    }

    pub(crate) fn from_validated(
        pixels: &'a mut [Color],
        width: usize,
        height: usize,
        stride: usize,
    ) -> Self {
        debug_assert!(validate_layout(pixels.len(), width, height, stride).is_ok());
        Self {
            pixels,
            width,
            height,
            stride,
        }
    }

    /// Reborrow as a read-only view
    pub fn as_view(&self) -> SurfaceView<'_> {
        SurfaceView {
            pixels: &*self.pixels,
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }
}

impl Surface for SurfaceViewMut<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn stride(&self) -> usize {
        self.stride
    }

    fn pixels(&self) -> &[Color] {
        &*self.pixels
    }
}

impl SurfaceMut for SurfaceViewMut<'_> {
    fn pixels_mut(&mut self) -> &mut [Color] {
        &mut *self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersect_partial() {
        let a = Rect::new(-4, -4, 8, 8);
        let b = Rect::with_size(480, 272);
        assert_eq!(a.intersect(&b), Rect::new(0, 0, 4, 4));
    }

    #[test]
    fn test_rect_intersect_disjoint_is_empty() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(4, 0, 4, 4);
        assert!(a.intersect(&b).is_empty());
    }

    #[test]
    fn test_rect_contains() {
        let bounds = Rect::with_size(16, 16);
        assert!(bounds.contains_rect(&Rect::new(0, 0, 16, 16)));
        assert!(!bounds.contains_rect(&Rect::new(1, 0, 16, 16)));
        assert!(!bounds.contains_rect(&Rect::new(-1, 0, 2, 2)));
        assert!(bounds.contains_point(15, 15));
        assert!(!bounds.contains_point(16, 0));
    }

    #[test]
    fn test_rect_extreme_coordinates_do_not_overflow() {
        let a = Rect::new(i32::MAX, i32::MAX, u32::MAX, u32::MAX);
        let b = Rect::with_size(10, 10);
        assert!(a.intersect(&b).is_empty());
        assert_eq!(a.right(), i32::MAX as i64 + u32::MAX as i64);
    }

    #[test]
    fn test_view_rejects_short_buffer() {
        let pixels = vec![Color::BLACK; 10];
        assert!(SurfaceView::new(&pixels, 4, 3, 4).is_err());
        assert!(SurfaceView::new(&pixels, 4, 2, 3).is_err());
        assert!(SurfaceView::new(&pixels, 0, 2, 4).is_err());
        assert!(SurfaceView::new(&pixels, 4, 2, 5).is_ok());
    }

    #[test]
    fn test_view_mut_respects_stride() {
        let mut pixels = vec![Color::BLACK; 8 * 4];
        let mut view = SurfaceViewMut::new(&mut pixels, 5, 4, 8).unwrap();
        view.set_pixel(4, 2, Color::RED).unwrap();
        view.fill(Color::BLUE);
        assert_eq!(view.get_pixel(4, 2).unwrap(), Color::BLUE);

        // Padding columns are never touched
        assert_eq!(pixels[2 * 8 + 6], Color::BLACK);
        assert_eq!(pixels[2 * 8 + 4], Color::BLUE);
    }

    #[test]
    fn test_out_of_bounds_reports_coordinates() {
        let pixels = vec![Color::BLACK; 4];
        let view = SurfaceView::new(&pixels, 2, 2, 2).unwrap();
        match view.get_pixel(-1, 1) {
            Err(GraphicsError::OutOfBounds {
                x,
                y,
                width,
                height,
            }) => {
                assert_eq!((x, y, width, height), (-1, 1, 2, 2));
            }
            other => panic!("expected OutOfBounds, got {:?}", other),
        }
    }
}
