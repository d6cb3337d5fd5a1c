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

//! Player movement

use super::Demo;
use crate::core::blit::{BlitMode, Blitter};
use crate::core::color::Color;
use crate::core::error::Result;
use crate::core::image::Image;
use crate::core::surface::{Rect, Surface, SurfaceMut};
use crate::frontend::app::AppState;
use crate::frontend::input::Buttons;

/// Size of the player sprite cell
pub const PLAYER_SIZE: u32 = 32;

/// Starting position of the player
pub const PLAYER_START: (i32, i32) = (100, 100);

/// Moves a sprite one pixel per frame with the D-pad
///
/// The position is not clamped: the player can walk off screen, where the
/// blitter clips it.
#[derive(Debug)]
pub struct PlayerMovement {
    player: Image,
    background: Option<Image>,
    x: i32,
    y: i32,
}

impl PlayerMovement {
    pub fn new(player: Image, background: Option<Image>) -> Self {
        Self {
            player,
            background,
            x: PLAYER_START.0,
            y: PLAYER_START.1,
        }
    }

    #[inline(always)]
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }
}

impl Demo for PlayerMovement {
    fn name(&self) -> &'static str {
        "player movement"
    }

    fn update(&mut self, state: &AppState) {
        if state.is_held(Buttons::UP) {
            self.y = self.y.saturating_sub(1);
        }
        if state.is_held(Buttons::DOWN) {
            self.y = self.y.saturating_add(1);
        }
        if state.is_held(Buttons::RIGHT) {
            self.x = self.x.saturating_add(1);
        }
        if state.is_held(Buttons::LEFT) {
            self.x = self.x.saturating_sub(1);
        }
    }

    fn render(&mut self, blitter: &Blitter, target: &mut dyn SurfaceMut) -> Result<()> {
        blitter.clear(target, Color::WHITE);

        if let Some(background) = &self.background {
            let screen = target.bounds();
            let source = background.bounds().intersect(&screen);
            blitter.copy_rect(background, source, target, (0, 0), BlitMode::AlphaTest)?;
        }

        let cell = Rect::with_size(PLAYER_SIZE, PLAYER_SIZE).intersect(&self.player.bounds());
        blitter.copy_rect(&self.player, cell, target, (self.x, self.y), BlitMode::AlphaTest)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::SurfaceViewMut;
    use crate::frontend::app::Event;
    use crate::frontend::input::PadState;

    fn sprite(color: Color) -> Image {
        let mut image = Image::new(PLAYER_SIZE, PLAYER_SIZE).unwrap();
        image.fill(color);
        image
    }

    fn held(buttons: Buttons) -> AppState {
        let mut state = AppState::new();
        state.process_event(Event::Pad(PadState::new(buttons)));
        state
    }

    #[test]
    fn test_dpad_moves_one_pixel_per_frame() {
        let mut demo = PlayerMovement::new(sprite(Color::RED), None);
        assert_eq!(demo.position(), PLAYER_START);

        let right_down = held(Buttons::RIGHT | Buttons::DOWN);
        for _ in 0..5 {
            demo.update(&right_down);
        }
        assert_eq!(demo.position(), (105, 105));

        demo.update(&held(Buttons::UP | Buttons::LEFT | Buttons::CROSS));
        assert_eq!(demo.position(), (104, 104));

        // Opposite directions cancel out
        demo.update(&held(Buttons::UP | Buttons::DOWN));
        assert_eq!(demo.position(), (104, 104));
    }

    #[test]
    fn test_player_walks_off_screen_unclamped() {
        let mut demo = PlayerMovement::new(sprite(Color::RED), None);
        demo.set_position(0, 0);
        let left = held(Buttons::LEFT);
        for _ in 0..40 {
            demo.update(&left);
        }
        assert_eq!(demo.position(), (-40, 0));

        let mut pixels = vec![Color::TRANSPARENT; 64 * 64];
        let mut screen = SurfaceViewMut::new(&mut pixels, 64, 64, 64).unwrap();
        demo.render(&Blitter::new(), &mut screen).unwrap();
        assert_eq!(screen.get_pixel(0, 0).unwrap(), Color::WHITE);
    }

    #[test]
    fn test_render_layers() {
        let mut background = Image::new(64, 16).unwrap();
        background.fill(Color::GREEN);
        // Transparent hole shows the white clear color
        background.set_pixel(0, 0, Color::TRANSPARENT).unwrap();

        let mut player = sprite(Color::RED);
        player.set_pixel(0, 0, Color::TRANSPARENT).unwrap();

        let mut demo = PlayerMovement::new(player, Some(background));
        demo.set_position(10, 2);

        let mut pixels = vec![Color::TRANSPARENT; 64 * 48];
        let mut screen = SurfaceViewMut::new(&mut pixels, 60, 48, 64).unwrap();
        demo.render(&Blitter::new(), &mut screen).unwrap();

        assert_eq!(screen.get_pixel(0, 0).unwrap(), Color::WHITE);
        assert_eq!(screen.get_pixel(1, 0).unwrap(), Color::GREEN);
        assert_eq!(screen.get_pixel(0, 20).unwrap(), Color::WHITE);
        assert_eq!(screen.get_pixel(10, 2).unwrap(), Color::GREEN);
        assert_eq!(screen.get_pixel(11, 2).unwrap(), Color::RED);
        assert_eq!(screen.get_pixel(41, 33).unwrap(), Color::RED);
        assert_eq!(screen.get_pixel(42, 34).unwrap(), Color::WHITE);
    }

    #[test]
    fn test_small_player_image_uses_whole_image() {
        let mut player = Image::new(4, 4).unwrap();
        player.fill(Color::BLUE);
        let mut demo = PlayerMovement::new(player, None);
        demo.set_position(0, 0);

        let mut pixels = vec![Color::TRANSPARENT; 8 * 8];
        let mut screen = SurfaceViewMut::new(&mut pixels, 8, 8, 8).unwrap();
        demo.render(&Blitter::new(), &mut screen).unwrap();
        assert_eq!(screen.get_pixel(3, 3).unwrap(), Color::BLUE);
        assert_eq!(screen.get_pixel(4, 4).unwrap(), Color::WHITE);
    }
}
