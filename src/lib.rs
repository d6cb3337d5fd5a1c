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

//! pspgfx: software graphics layer for PSP-style homebrew
//!
//! This crate provides the image store, blitter and double-buffered display
//! that simple PSP demos are built on, implemented in software over plain
//! pixel buffers.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`core`]: Graphics components (images, blitter, display)
//! - [`frontend`]: Pad input, application state, main loop and demos
//!
//! # Example
//!
//! ```
//! use pspgfx::core::{BlitMode, Blitter, Color, Display, DisplayConfig, Image, NoVsync, Rect, Surface};
//!
//! let mut sprite = Image::new(32, 32)?;
//! sprite.clear(Color::RED);
//!
//! let mut display = Display::new(DisplayConfig::default(), NoVsync)?;
//! let blitter = Blitter::new();
//! blitter.clear(&mut display.draw_buffer(), Color::WHITE);
//! blitter.copy_rect(&sprite, Rect::with_size(32, 32), &mut display.draw_buffer(), (100, 100), BlitMode::AlphaTest)?;
//! display.present();
//!
//! assert_eq!(display.display_buffer().get_pixel(100, 100)?, Color::RED);
//! # Ok::<(), pspgfx::GraphicsError>(())
//! ```
//!
//! # Getting Started
//!
//! 1. Load or create an [`core::image::Image`]
//! 2. Create a [`core::display::Display`] with a vblank source
//! 3. Draw into the draw buffer with a [`core::blit::Blitter`]
//! 4. Call [`core::display::Display::present`] once per frame
//!
//! # Error Handling
//!
//! All fallible operations return [`core::error::Result<T>`] which is an alias for
//! `Result<T, GraphicsError>`.

pub mod core;
pub mod frontend;

// Re-export commonly used types
pub use core::error::{GraphicsError, Result};
