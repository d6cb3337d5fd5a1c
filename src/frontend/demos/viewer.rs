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

//! Image viewer

use super::Demo;
use crate::core::blit::{BlitMode, Blitter};
use crate::core::color::Color;
use crate::core::error::Result;
use crate::core::image::Image;
use crate::core::surface::{Rect, SurfaceMut};
use crate::frontend::app::AppState;

/// Shows one image horizontally centered at the top of the screen
///
/// Transparent pixels are alpha-tested away and show the background color.
#[derive(Debug)]
pub struct ImageViewer {
    image: Image,
    background: Color,
}

impl ImageViewer {
    pub fn new(image: Image) -> Self {
        Self {
            image,
            background: Color::BLACK,
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Top-left corner of the image on a `screen_width` wide screen
    ///
    /// Images wider than the screen get a negative x and are clipped on both
    /// sides.
    pub fn position(&self, screen_width: usize) -> (i32, i32) {
        let x = (screen_width as i64 - self.image.image_width() as i64) / 2;
        (x as i32, 0)
    }
}

impl Demo for ImageViewer {
    fn name(&self) -> &'static str {
        "image viewer"
    }

    fn update(&mut self, _state: &AppState) {}

    fn render(&mut self, blitter: &Blitter, target: &mut dyn SurfaceMut) -> Result<()> {
        blitter.clear(target, self.background);

        let at = self.position(target.width());
        let source = Rect::with_size(self.image.image_width(), self.image.image_height());
        blitter.copy_rect(&self.image, source, target, at, BlitMode::AlphaTest)?;
        Ok(())
    }
}
