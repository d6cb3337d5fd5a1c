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

//! 32-bit packed color
//!
//! Colors use the PSP framebuffer byte order (PSM 8888):
//! - Bits 0-7: Red
//! - Bits 8-15: Green
//! - Bits 16-23: Blue
//! - Bits 24-31: Alpha
//!
//! An alpha of 0 marks a pixel as fully transparent for alpha-test blits.

/// Packed ABGR color as stored in image data and framebuffers
///
/// # Examples
///
/// ```
/// use pspgfx::core::Color;
///
/// let color = Color::rgb(255, 128, 64);
/// assert_eq!(color.r(), 255);
/// assert_eq!(color.g(), 128);
/// assert_eq!(color.b(), 64);
/// assert_eq!(color.a(), 255);
/// assert_eq!(color.raw(), 0xFF40_80FF);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Color(u32);

impl Color {
    pub const TRANSPARENT: Color = Color(0x0000_0000);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    /// Opaque color from 8-bit channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xFF)
    }

    /// Color from 8-bit channels with explicit alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color((r as u32) | ((g as u32) << 8) | ((b as u32) << 16) | ((a as u32) << 24))
    }

    /// Wrap a raw packed value
    #[inline(always)]
    pub const fn from_raw(value: u32) -> Self {
        Color(value)
    }

    /// Raw packed value
    #[inline(always)]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub const fn r(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    #[inline(always)]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[inline(always)]
    pub const fn b(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[inline(always)]
    pub const fn a(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    /// True when the alpha channel is zero
    #[inline(always)]
    pub const fn is_transparent(self) -> bool {
        self.0 & 0xFF00_0000 == 0
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Color((self.0 & 0x00FF_FFFF) | ((a as u32) << 24))
    }

    /// Invert the RGB channels, keeping alpha
    pub const fn inverted(self) -> Self {
        Color(self.0 ^ 0x00FF_FFFF)
    }

    /// Channels in `[r, g, b, a]` order
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r(), self.g(), self.b(), self.a()]
    }

    pub const fn from_rgba(rgba: [u8; 4]) -> Self {
        Self::rgba(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color(value)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_layout() {
        let color = Color::rgba(0x11, 0x22, 0x33, 0x44);
        assert_eq!(color.raw(), 0x4433_2211);
        assert_eq!(color.to_rgba(), [0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn test_rgb_is_opaque() {
        assert!(!Color::WHITE.is_transparent());
        assert_eq!(Color::RED.a(), 0xFF);
        assert!(Color::TRANSPARENT.is_transparent());
        assert!(Color::rgba(255, 255, 255, 0).is_transparent());
    }

    #[test]
    fn test_inverted_keeps_alpha() {
        let color = Color::rgba(0, 128, 255, 7);
        let inv = color.inverted();
        assert_eq!(inv.to_rgba(), [255, 127, 0, 7]);
    }

    #[test]
    fn test_with_alpha() {
        assert_eq!(Color::RED.with_alpha(0).raw(), 0x0000_00FF);
    }

    #[test]
    fn test_from_rgba_matches_channels() {
        let color = Color::from_rgba([1, 2, 3, 4]);
        assert_eq!((color.r(), color.g(), color.b(), color.a()), (1, 2, 3, 4));
    }
}
