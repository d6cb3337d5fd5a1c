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

use std::io::Cursor;

use super::*;
use crate::core::error::DecodeError;
use tempfile::tempdir;

/// Encode an RGBA test pattern as PNG bytes with the `image` crate directly
fn png_bytes(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(width, height, |x, y| image::Rgba(f(x, y)));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn test_blank_image_is_zero_filled() {
    for (w, h) in [(1, 1), (3, 5), (64, 64), (480, 272), (512, 512)] {
        let image = Image::new(w, h).unwrap();
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                assert_eq!(image.get_pixel(x, y).unwrap(), Color::TRANSPARENT);
            }
        }
    }
}

#[test]
fn test_blank_image_texture_padding() {
    let image = Image::new(480, 272).unwrap();
    assert_eq!(image.texture_width(), 512);
    assert_eq!(image.texture_height(), 512);
    assert_eq!(image.image_width(), 480);
    assert_eq!(image.image_height(), 272);
    assert_eq!(image.data().len(), 512 * 512);
    assert_eq!(image.stride(), 512);
}

#[test]
fn test_blank_image_invalid_sizes() {
    for (w, h) in [(0, 1), (1, 0), (513, 1), (1, 513)] {
        match Image::new(w, h) {
            Err(GraphicsError::InvalidSize { width, height, max }) => {
                assert_eq!((width, height, max), (w, h, MAX_TEXTURE_SIZE));
            }
            other => panic!("expected InvalidSize for {}x{}, got {:?}", w, h, other),
        }
    }
}

#[test]
fn test_pixel_access_out_of_bounds() {
    let mut image = Image::new(4, 4).unwrap();
    assert!(matches!(
        image.get_pixel(4, 0),
        Err(GraphicsError::OutOfBounds { .. })
    ));
    assert!(matches!(
        image.set_pixel(0, -1, Color::RED),
        Err(GraphicsError::OutOfBounds { .. })
    ));
}

#[test]
fn test_padding_is_not_addressable() {
    // 5 wide → 8 wide storage; x = 5..8 is padding
    let image = Image::new(5, 5).unwrap();
    assert_eq!(image.texture_width(), 8);
    assert!(image.get_pixel(5, 0).is_err());
    assert!(image.get_pixel(7, 7).is_err());
}

#[test]
fn test_next_power_of_two() {
    assert_eq!(next_power_of_two(0), 1);
    assert_eq!(next_power_of_two(1), 1);
    assert_eq!(next_power_of_two(3), 4);
    assert_eq!(next_power_of_two(272), 512);
    assert_eq!(next_power_of_two(512), 512);
}

#[test]
fn test_decode_png_fills_logical_area() {
    let bytes = png_bytes(3, 2, |x, y| [x as u8 * 10, y as u8 * 20, 7, 255]);
    let image = Image::from_memory(&bytes).unwrap();

    assert_eq!(image.image_width(), 3);
    assert_eq!(image.image_height(), 2);
    assert_eq!(image.texture_width(), 4);
    assert_eq!(image.texture_height(), 2);
    assert_eq!(image.get_pixel(2, 1).unwrap(), Color::rgba(20, 20, 7, 255));
    assert_eq!(image.get_pixel(0, 0).unwrap(), Color::rgba(0, 0, 7, 255));
}

#[test]
fn test_decode_keeps_transparent_pixel() {
    let bytes = png_bytes(2, 2, |x, y| {
        if x == 1 && y == 1 {
            [0, 0, 0, 0]
        } else {
            [255, 0, 0, 255]
        }
    });
    let image = Image::from_memory(&bytes).unwrap();
    assert!(image.get_pixel(1, 1).unwrap().is_transparent());
    assert_eq!(image.get_pixel(0, 1).unwrap(), Color::RED);
}

#[test]
fn test_decode_unknown_signature() {
    let result = Image::from_memory(b"GIF89a\x01\x00\x01\x00");
    assert!(matches!(
        result,
        Err(GraphicsError::Decode(DecodeError::UnsupportedFormat(_)))
    ));

    let result = Image::from_memory(&[]);
    assert!(matches!(
        result,
        Err(GraphicsError::Decode(DecodeError::UnsupportedFormat(_)))
    ));
}

#[test]
fn test_decode_truncated_png_is_malformed() {
    let bytes = png_bytes(8, 8, |_, _| [1, 2, 3, 255]);
    let truncated = &bytes[..bytes.len() / 2];
    assert!(matches!(
        Image::from_memory(truncated),
        Err(GraphicsError::Decode(DecodeError::Malformed(_)))
    ));
}

#[test]
fn test_decode_too_large() {
    let bytes = png_bytes(513, 1, |_, _| [0, 0, 0, 255]);
    match Image::from_memory(&bytes) {
        Err(GraphicsError::Decode(DecodeError::TooLarge { width, height, max })) => {
            assert_eq!((width, height, max), (513, 1, 512));
        }
        other => panic!("expected TooLarge, got {:?}", other),
    }
}

/// CRC-32 as used by PNG chunks
fn png_crc(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ 0xEDB8_8320 } else { crc >> 1 };
        }
    }
    !crc
}

#[test]
fn test_decode_rejects_oversized_header_before_decoding() {
    // 1x1 PNG whose IHDR claims 100000x100000
    let mut bytes = png_bytes(1, 1, |_, _| [0, 0, 0, 255]);
    bytes[16..20].copy_from_slice(&100_000u32.to_be_bytes());
    bytes[20..24].copy_from_slice(&100_000u32.to_be_bytes());
    let crc = png_crc(&bytes[12..29]);
    bytes[29..33].copy_from_slice(&crc.to_be_bytes());

    match Image::from_memory(&bytes) {
        Err(GraphicsError::Decode(DecodeError::TooLarge { width, height, max })) => {
            assert_eq!((width, height, max), (100_000, 100_000, 512));
        }
        other => panic!("expected TooLarge, got {:?}", other),
    }
}

#[test]
fn test_png_round_trip_is_pixel_identical() {
    let bytes = png_bytes(5, 3, |x, y| [x as u8 * 40, y as u8 * 60, 200, (x * 50) as u8]);
    let first = Image::from_memory(&bytes).unwrap();

    let encoded = encode(&first, ImageFormat::Png, SaveOptions::default()).unwrap();
    let second = Image::from_memory(&encoded).unwrap();

    assert_eq!(first.image_width(), second.image_width());
    assert_eq!(first.image_height(), second.image_height());
    for y in 0..3 {
        assert_eq!(first.row(y), second.row(y));
    }
}

#[test]
fn test_save_without_alpha_makes_opaque() {
    let mut image = Image::new(2, 2).unwrap();
    image.fill(Color::rgba(10, 20, 30, 0));

    let encoded = encode(&image, ImageFormat::Png, SaveOptions::without_alpha()).unwrap();
    let decoded = Image::from_memory(&encoded).unwrap();
    assert_eq!(decoded.get_pixel(1, 1).unwrap(), Color::rgba(10, 20, 30, 255));
}

#[test]
fn test_jpeg_encode_decode_approximate() {
    let mut image = Image::new(16, 16).unwrap();
    image.fill(Color::rgb(200, 100, 50));

    let encoded = encode(&image, ImageFormat::Jpeg, SaveOptions::default()).unwrap();
    assert_eq!(ImageFormat::from_signature(&encoded), Some(ImageFormat::Jpeg));

    let decoded = Image::from_memory(&encoded).unwrap();
    let pixel = decoded.get_pixel(8, 8).unwrap();
    assert_eq!(pixel.a(), 255);
    assert!((pixel.r() as i32 - 200).abs() < 8);
    assert!((pixel.g() as i32 - 100).abs() < 8);
    assert!((pixel.b() as i32 - 50).abs() < 8);
}

#[test]
fn test_open_and_save_files() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sprite.png");

    let mut image = Image::new(7, 9).unwrap();
    image.fill(Color::BLUE);
    image.set_pixel(3, 4, Color::TRANSPARENT).unwrap();
    image.save(&path, SaveOptions::default()).unwrap();

    let loaded = Image::open(&path).unwrap();
    assert_eq!(loaded, image);
}

#[test]
fn test_open_sniffs_misnamed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("actually_png.jpg");
    std::fs::write(&path, png_bytes(2, 2, |_, _| [9, 9, 9, 255])).unwrap();

    let loaded = Image::open(&path).unwrap();
    assert_eq!(loaded.get_pixel(0, 0).unwrap(), Color::rgb(9, 9, 9));
}

#[test]
fn test_open_unknown_extension_uses_signature() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("player.bin");
    std::fs::write(&path, png_bytes(1, 1, |_, _| [1, 2, 3, 4])).unwrap();

    let loaded = Image::open(&path).unwrap();
    assert_eq!(loaded.get_pixel(0, 0).unwrap(), Color::rgba(1, 2, 3, 4));
}

#[test]
fn test_open_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = Image::open(dir.path().join("missing.png"));
    assert!(matches!(result, Err(GraphicsError::Io(_))));
}

#[test]
fn test_save_unknown_extension_fails() {
    let dir = tempdir().unwrap();
    let image = Image::new(1, 1).unwrap();
    let result = image.save(dir.path().join("out.bmp"), SaveOptions::default());
    assert!(matches!(result, Err(GraphicsError::Encode(_))));
}

#[test]
fn test_clear_and_negate() {
    let mut image = Image::new(3, 3).unwrap();
    image.clear(Color::rgba(0, 255, 16, 128));
    image.negate();
    assert_eq!(image.get_pixel(2, 2).unwrap(), Color::rgba(255, 0, 239, 128));

    // Padding column stays zero
    assert_eq!(image.data()[3], Color::TRANSPARENT);
}

#[test]
fn test_format_from_path() {
    assert_eq!(
        ImageFormat::from_path(Path::new("a/B.PNG")),
        Some(ImageFormat::Png)
    );
    assert_eq!(
        ImageFormat::from_path(Path::new("photo.jpeg")),
        Some(ImageFormat::Jpeg)
    );
    assert_eq!(ImageFormat::from_path(Path::new("noext")), None);
}
