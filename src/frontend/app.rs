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

//! Application state and main loop
//!
//! All state the demos share lives in [`AppState`] and changes only through
//! [`AppState::process_event`]. The [`Runner`] owns the display, the blitter
//! and the input source, and drives one frame at a time:
//!
//! ```text
//! InputSource::poll → AppState::process_event → Demo::update → Demo::render → Display::present
//! ```

use super::demos::Demo;
use super::input::{Buttons, InputSource, PadState};
use crate::core::blit::Blitter;
use crate::core::display::{Display, VBlank};
use crate::core::error::Result;

/// Input event delivered once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// New pad sample
    Pad(PadState),
    /// The user or the platform asked the application to stop
    Exit,
}

/// State shared between the main loop and the demos
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Current pad sample
    pad: PadState,
    /// Pad sample of the previous frame
    previous: PadState,
    /// Exit requested
    done: bool,
    /// Number of pad samples processed
    frame: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the state
    ///
    /// # Example
    ///
    /// ```
    /// use pspgfx::frontend::{AppState, Buttons, Event, PadState};
    ///
    /// let mut state = AppState::new();
    /// state.process_event(Event::Pad(PadState::new(Buttons::CROSS)));
    /// assert!(state.just_pressed(Buttons::CROSS));
    ///
    /// state.process_event(Event::Pad(PadState::new(Buttons::CROSS)));
    /// assert!(state.is_held(Buttons::CROSS));
    /// assert!(!state.just_pressed(Buttons::CROSS));
    ///
    /// state.process_event(Event::Exit);
    /// assert!(state.is_done());
    /// ```
    pub fn process_event(&mut self, event: Event) {
        match event {
            Event::Pad(pad) => {
                self.previous = self.pad;
                self.pad = pad;
                self.frame += 1;
            }
            Event::Exit => {
                log::debug!("Exit requested after {} frames", self.frame);
                self.done = true;
            }
        }
    }

    #[inline(always)]
    pub fn pad(&self) -> &PadState {
        &self.pad
    }

    /// True while every button in `buttons` is held
    #[inline(always)]
    pub fn is_held(&self, buttons: Buttons) -> bool {
        self.pad.buttons.contains(buttons)
    }

    /// True on the frame every button in `buttons` went down
    pub fn just_pressed(&self, buttons: Buttons) -> bool {
        self.pressed().contains(buttons)
    }

    /// Buttons held now that were not held on the previous frame
    pub fn pressed(&self) -> Buttons {
        self.pad.buttons & !self.previous.buttons
    }

    /// Buttons held on the previous frame that are no longer held
    pub fn released(&self) -> Buttons {
        self.previous.buttons & !self.pad.buttons
    }

    #[inline(always)]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Number of pad samples processed so far
    #[inline(always)]
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// Main loop driver
///
/// # Example
///
/// ```
/// use pspgfx::core::{Blitter, Display, DisplayConfig, NoVsync};
/// use pspgfx::frontend::{Calculator, Runner, ScriptedInput};
///
/// let display = Display::new(DisplayConfig::default(), NoVsync).unwrap();
/// let input = ScriptedInput::from_toml("[[frames]]\nbuttons = [\"SQUARE\", \"CIRCLE\"]\n[[frames]]\nbuttons = [\"CROSS\"]").unwrap();
///
/// let mut runner = Runner::new(input, display, Blitter::new());
/// let mut calculator = Calculator::new();
/// assert_eq!(runner.run(&mut calculator).unwrap(), 2);
/// assert_eq!(calculator.answer(), Some(4));
/// ```
pub struct Runner<I: InputSource, V: VBlank> {
    input: I,
    display: Display<V>,
    blitter: Blitter,
    state: AppState,
    /// Stop after this many presented frames
    frame_limit: Option<u64>,
}

impl<I: InputSource, V: VBlank> Runner<I, V> {
    pub fn new(input: I, display: Display<V>, blitter: Blitter) -> Self {
        Self {
            input,
            display,
            blitter,
            state: AppState::new(),
            frame_limit: None,
        }
    }

    /// Stop after `frames` presents even if no exit was requested
    pub fn with_frame_limit(mut self, frames: Option<u64>) -> Self {
        self.frame_limit = frames;
        self
    }

    #[inline(always)]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[inline(always)]
    pub fn display(&self) -> &Display<V> {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut Display<V> {
        &mut self.display
    }

    /// Run one frame
    ///
    /// # Returns
    ///
    /// `false` once exit has been requested; nothing is drawn in that case.
    ///
    /// # Errors
    ///
    /// Propagates blitter errors from [`Demo::render`].
    pub fn step(&mut self, demo: &mut dyn Demo) -> Result<bool> {
        let event = self.input.poll();
        self.state.process_event(event);
        if self.state.is_done() {
            return Ok(false);
        }

        demo.update(&self.state);
        demo.render(&self.blitter, &mut self.display.draw_buffer())?;
        self.display.present();
        Ok(true)
    }

    /// Run until exit is requested or the frame limit is reached
    ///
    /// # Returns
    ///
    /// Number of frames presented by this call
    pub fn run(&mut self, demo: &mut dyn Demo) -> Result<u64> {
        log::info!("Running {}", demo.name());
        let start = self.display.frame_count();

        loop {
            let presented = self.display.frame_count() - start;
            if self.frame_limit.is_some_and(|limit| presented >= limit) {
                log::debug!("Frame limit {} reached", presented);
                break;
            }
            if !self.step(demo)? {
                break;
            }
        }

        let presented = self.display.frame_count() - start;
        log::info!("{} finished after {} frames", demo.name(), presented);
        Ok(presented)
    }

    /// Take the display back, e.g. to save a screenshot
    pub fn into_display(self) -> Display<V> {
        self.display
    }
}
