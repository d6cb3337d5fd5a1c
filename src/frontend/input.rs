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

//! Pad input
//!
//! Pad state uses the PSP control bit layout. Input reaches the demos through
//! the [`InputSource`] trait; the headless build replays scripts instead of
//! sampling hardware.
//!
//! # Script Format
//!
//! ```toml
//! [[frames]]
//! buttons = ["RIGHT"]
//! repeat = 30
//!
//! [[frames]]
//! buttons = ["CROSS", "UP"]
//! ```
//!
//! Each entry is held for `repeat` frames (default 1). After the last entry
//! the source requests exit.

use std::path::Path;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::app::Event;
use crate::core::error::{GraphicsError, Result};

bitflags! {
    /// PSP control pad buttons
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u32 {
        const SELECT = 0x0000_0001;
        const START = 0x0000_0008;
        const UP = 0x0000_0010;
        const RIGHT = 0x0000_0020;
        const DOWN = 0x0000_0040;
        const LEFT = 0x0000_0080;
        const LTRIGGER = 0x0000_0100;
        const RTRIGGER = 0x0000_0200;
        const TRIANGLE = 0x0000_1000;
        const CIRCLE = 0x0000_2000;
        const CROSS = 0x0000_4000;
        const SQUARE = 0x0000_8000;
        const HOME = 0x0001_0000;
        const HOLD = 0x0002_0000;
    }
}

impl Buttons {
    /// D-pad directions
    pub const DPAD: Buttons = Buttons::UP
        .union(Buttons::RIGHT)
        .union(Buttons::DOWN)
        .union(Buttons::LEFT);

    /// Parse a button name, case-insensitive
    ///
    /// Accepts the flag names plus `L`/`R` for the shoulder triggers.
    ///
    /// # Examples
    ///
    /// ```
    /// use pspgfx::frontend::Buttons;
    ///
    /// assert_eq!(Buttons::parse("cross"), Some(Buttons::CROSS));
    /// assert_eq!(Buttons::parse("L"), Some(Buttons::LTRIGGER));
    /// assert_eq!(Buttons::parse("turbo"), None);
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        match upper.as_str() {
            "L" => Some(Buttons::LTRIGGER),
            "R" => Some(Buttons::RTRIGGER),
            other => Buttons::from_name(other),
        }
    }
}

/// Analog stick center value
pub const ANALOG_CENTER: u8 = 128;

/// One sample of the control pad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PadState {
    pub buttons: Buttons,
    /// Analog stick X (0 = left, 255 = right)
    pub lx: u8,
    /// Analog stick Y (0 = up, 255 = down)
    pub ly: u8,
}

impl PadState {
    /// Pad with `buttons` held and the stick centered
    pub const fn new(buttons: Buttons) -> Self {
        Self {
            buttons,
            lx: ANALOG_CENTER,
            ly: ANALOG_CENTER,
        }
    }

    /// Nothing pressed, stick centered
    pub const fn released() -> Self {
        Self::new(Buttons::empty())
    }

    #[inline(always)]
    pub fn is_pressed(&self, button: Buttons) -> bool {
        self.buttons.contains(button)
    }
}

impl Default for PadState {
    fn default() -> Self {
        Self::released()
    }
}

/// Source of per-frame input events
pub trait InputSource {
    /// Sample the pad once per frame
    ///
    /// Returns [`Event::Exit`] when the application should stop.
    fn poll(&mut self) -> Event;
}

impl<I: InputSource + ?Sized> InputSource for Box<I> {
    fn poll(&mut self) -> Event {
        (**self).poll()
    }
}

/// Input source with nothing pressed, forever
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn poll(&mut self) -> Event {
        Event::Pad(PadState::released())
    }
}

/// One entry of an input script as written in TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptFrame {
    /// Held button names, see [`Buttons::parse`]
    #[serde(default)]
    pub buttons: Vec<String>,

    /// Number of frames to hold this state
    #[serde(default = "default_repeat")]
    pub repeat: u32,

    #[serde(default = "default_analog")]
    pub lx: u8,

    #[serde(default = "default_analog")]
    pub ly: u8,
}

fn default_repeat() -> u32 {
    1
}

fn default_analog() -> u8 {
    ANALOG_CENTER
}

/// Input script file (TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputScript {
    #[serde(default)]
    pub frames: Vec<ScriptFrame>,
}

impl InputScript {
    /// Load a script from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        log::debug!("Loading input script {}", path.display());
        Ok(toml::from_str(&contents)?)
    }

    /// Save the script to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| GraphicsError::Config(format!("Failed to serialize script: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Replays a fixed sequence of pad states, then requests exit
///
/// # Example
///
/// ```
/// use pspgfx::frontend::{Buttons, Event, InputSource, PadState, ScriptedInput};
///
/// let mut input = ScriptedInput::from_toml("[[frames]]\nbuttons = [\"UP\"]\nrepeat = 2").unwrap();
/// assert_eq!(input.poll(), Event::Pad(PadState::new(Buttons::UP)));
/// assert_eq!(input.poll(), Event::Pad(PadState::new(Buttons::UP)));
/// assert_eq!(input.poll(), Event::Exit);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    /// Pad states with their remaining hold counts, in order
    steps: Vec<(PadState, u32)>,
    /// Current step
    position: usize,
    /// Frames already spent on the current step
    held: u32,
}

impl ScriptedInput {
    /// Replay `(state, repeat)` pairs in order
    pub fn new(steps: Vec<(PadState, u32)>) -> Self {
        Self {
            steps: steps.into_iter().filter(|&(_, repeat)| repeat > 0).collect(),
            position: 0,
            held: 0,
        }
    }

    /// Build from a parsed script
    ///
    /// Unknown button names are logged and ignored.
    pub fn from_script(script: &InputScript) -> Self {
        let steps = script
            .frames
            .iter()
            .map(|frame| {
                let mut buttons = Buttons::empty();
                for name in &frame.buttons {
                    match Buttons::parse(name) {
                        Some(button) => buttons |= button,
                        None => log::warn!("Unknown button name in script: {}", name),
                    }
                }
                let state = PadState {
                    buttons,
                    lx: frame.lx,
                    ly: frame.ly,
                };
                (state, frame.repeat)
            })
            .collect();
        Self::new(steps)
    }

    /// Parse a TOML script
    ///
    /// # Errors
    ///
    /// [`GraphicsError::Config`] if the TOML is invalid.
    pub fn from_toml(source: &str) -> Result<Self> {
        let script: InputScript = toml::from_str(source)?;
        Ok(Self::from_script(&script))
    }

    /// Load a TOML script file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_script(&InputScript::load(path)?))
    }

    /// Total number of frames before exit is requested
    pub fn total_frames(&self) -> u64 {
        self.steps.iter().map(|&(_, repeat)| repeat as u64).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.steps.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Event {
        let Some(&(state, repeat)) = self.steps.get(self.position) else {
            return Event::Exit;
        };

        self.held += 1;
        if self.held >= repeat {
            self.position += 1;
            self.held = 0;
        }
        Event::Pad(state)
    }
}
