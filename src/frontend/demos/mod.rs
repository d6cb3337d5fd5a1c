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

//! Demo programs
//!
//! - [`ImageViewer`]: shows one image centered at the top of the screen
//! - [`PlayerMovement`]: moves a sprite over a background with the D-pad
//! - [`Calculator`]: adds two operands picked with the face buttons

mod calculator;
mod movement;
mod viewer;

pub use calculator::Calculator;
pub use movement::PlayerMovement;
pub use viewer::ImageViewer;

use super::app::AppState;
use crate::core::blit::Blitter;
use crate::core::error::Result;
use crate::core::surface::SurfaceMut;

/// A program driven by the [`Runner`](super::app::Runner)
pub trait Demo {
    /// Short name for logging
    fn name(&self) -> &'static str;

    /// Advance one frame using the current input state
    fn update(&mut self, state: &AppState);

    /// Draw the current frame into `target`
    ///
    /// # Errors
    ///
    /// Blitter errors, e.g. under [`ClipPolicy::Reject`](crate::core::blit::ClipPolicy::Reject).
    fn render(&mut self, blitter: &Blitter, target: &mut dyn SurfaceMut) -> Result<()>;
}
