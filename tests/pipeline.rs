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

//! End-to-end tests: decode → blit → present → screenshot

use std::io::Cursor;

use pspgfx::core::{
    BlitMode, Blitter, ClipPolicy, Color, Display, DisplayConfig, GraphicsError, Image, NoVsync,
    Rect, SaveOptions, Surface,
};
use pspgfx::frontend::{AppConfig, ImageViewer, PlayerMovement, Runner, ScriptedInput};

/// Encode an RGBA image as PNG with the codec directly
fn png_bytes(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 4]) -> Vec<u8> {
    let image = image::RgbaImage::from_fn(width, height, |x, y| image::Rgba(pixel(x, y)));
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn display() -> Display<NoVsync> {
    Display::new(DisplayConfig::default(), NoVsync).unwrap()
}

#[test]
fn test_viewer_shows_decoded_image_centered() {
    // 204x272 portrait with a transparent left half
    let bytes = png_bytes(204, 272, |x, _| {
        if x < 102 {
            [0, 0, 0, 0]
        } else {
            [255, 255, 0, 255]
        }
    });
    let image = Image::from_memory(&bytes).unwrap();
    assert_eq!((image.texture_width(), image.texture_height()), (256, 512));

    let input = ScriptedInput::from_toml("[[frames]]").unwrap();
    let mut runner = Runner::new(input, display(), Blitter::new());
    let mut viewer = ImageViewer::new(image);
    assert_eq!(runner.run(&mut viewer).unwrap(), 1);

    let screen = runner.display().display_buffer();
    // x = (480 - 204) / 2 = 138
    assert_eq!(screen.get_pixel(138, 0).unwrap(), Color::BLACK);
    assert_eq!(screen.get_pixel(240, 100).unwrap(), Color::rgb(255, 255, 0));
    assert_eq!(screen.get_pixel(341, 271).unwrap(), Color::rgb(255, 255, 0));
    assert_eq!(screen.get_pixel(342, 0).unwrap(), Color::BLACK);
}

#[test]
fn test_movement_script_and_screenshot() {
    let dir = tempfile::tempdir().unwrap();
    let shot = dir.path().join("frame.png");

    let player = Image::from_memory(&png_bytes(32, 32, |_, _| [255, 0, 0, 255])).unwrap();
    let input = ScriptedInput::from_toml("[[frames]]\nbuttons = [\"RIGHT\"]\nrepeat = 10").unwrap();

    let mut runner = Runner::new(input, display(), Blitter::new());
    let mut demo = PlayerMovement::new(player, None);
    assert_eq!(runner.run(&mut demo).unwrap(), 10);
    assert_eq!(demo.position(), (110, 100));

    runner
        .into_display()
        .screenshot(&shot, SaveOptions::default())
        .unwrap();

    let saved = Image::open(&shot).unwrap();
    assert_eq!((saved.image_width(), saved.image_height()), (480, 272));
    assert_eq!(saved.get_pixel(110, 100).unwrap(), Color::RED);
    assert_eq!(saved.get_pixel(109, 100).unwrap(), Color::WHITE);
    assert_eq!(saved.get_pixel(142, 100).unwrap(), Color::WHITE);
}

#[test]
fn test_reject_policy_from_config() {
    let config = AppConfig::from_toml("[blitter]\nclip_policy = \"reject\"").unwrap();
    let blitter = Blitter::from_config(&config.blitter);
    assert_eq!(blitter.policy(), ClipPolicy::Reject);

    let mut display = Display::new(config.display, NoVsync).unwrap();
    let sprite = Image::new(32, 32).unwrap();
    let result = blitter.copy_rect(
        &sprite,
        Rect::with_size(32, 32),
        &mut display.draw_buffer(),
        (470, 0),
        BlitMode::Opaque,
    );
    assert!(matches!(result, Err(GraphicsError::RectOutOfBounds { .. })));
}

#[test]
fn test_framebuffer_to_image_grab() {
    let mut display = display();
    let blitter = Blitter::new();
    blitter.clear(&mut display.draw_buffer(), Color::GREEN);
    blitter
        .fill_rect(&mut display.draw_buffer(), Color::BLUE, Rect::new(10, 10, 4, 4))
        .unwrap();
    display.present();

    let mut grab = Image::new(8, 8).unwrap();
    blitter
        .copy_rect(&display.display_buffer(), Rect::new(8, 8, 8, 8), &mut grab, (0, 0), BlitMode::Opaque)
        .unwrap();

    assert_eq!(grab.get_pixel(0, 0).unwrap(), Color::GREEN);
    assert_eq!(grab.get_pixel(2, 2).unwrap(), Color::BLUE);
    assert_eq!(grab.get_pixel(5, 5).unwrap(), Color::BLUE);
    assert_eq!(grab.get_pixel(6, 6).unwrap(), Color::GREEN);
}

#[test]
fn test_decoded_cutout_onto_blank_canvas() {
    // 2x2 PNG, bottom-left pixel fully transparent
    let bytes = png_bytes(2, 2, |x, y| {
        if (x, y) == (0, 1) {
            [9, 9, 9, 0]
        } else {
            [40, 80, 120, 255]
        }
    });
    let sprite = Image::from_memory(&bytes).unwrap();
    let mut canvas = Image::new(2, 2).unwrap();

    Blitter::new()
        .copy_rect(&sprite, Rect::with_size(2, 2), &mut canvas, (0, 0), BlitMode::AlphaTest)
        .unwrap();

    assert_eq!(canvas.get_pixel(0, 1).unwrap(), Color::TRANSPARENT);
    for (x, y) in [(0, 0), (1, 0), (1, 1)] {
        assert_eq!(canvas.get_pixel(x, y).unwrap(), sprite.get_pixel(x, y).unwrap());
        assert_eq!(canvas.get_pixel(x, y).unwrap(), Color::rgb(40, 80, 120));
    }
}
