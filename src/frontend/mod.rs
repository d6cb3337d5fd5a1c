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

//! Frontend module
//!
//! Headless application layer on top of [`core`](crate::core): pad input,
//! explicit application state, the main loop and the demo programs.
//!
//! # Architecture
//!
//! - [`input`]: PSP pad buttons, [`InputSource`] and scripted input
//! - [`app`]: [`AppState`], [`Event`] and the [`Runner`] main loop
//! - [`demos`]: [`ImageViewer`], [`PlayerMovement`], [`Calculator`]
//! - [`config`]: [`AppConfig`] loaded from TOML
//!
//! # Example
//!
//! ```
//! use pspgfx::core::{Blitter, Display, DisplayConfig, Image, NoVsync};
//! use pspgfx::frontend::{IdleInput, ImageViewer, Runner};
//!
//! let display = Display::new(DisplayConfig::default(), NoVsync).unwrap();
//! let mut runner = Runner::new(IdleInput, display, Blitter::new()).with_frame_limit(Some(1));
//! let mut viewer = ImageViewer::new(Image::new(204, 272).unwrap());
//! assert_eq!(runner.run(&mut viewer).unwrap(), 1);
//! ```

pub mod app;
pub mod config;
pub mod demos;
pub mod input;

pub use app::{AppState, Event, Runner};
pub use config::AppConfig;
pub use demos::{Calculator, Demo, ImageViewer, PlayerMovement};
pub use input::{Buttons, IdleInput, InputScript, InputSource, PadState, ScriptedInput};
