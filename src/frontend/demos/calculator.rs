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

//! Two-operand button calculator
//!
//! | Button   | Action               |
//! |----------|----------------------|
//! | Square   | first operand = 1    |
//! | Triangle | second operand = 2   |
//! | Circle   | second operand = 3   |
//! | Cross    | show the sum         |
//!
//! Results are reported through the log. The screen shows each value as a row
//! of blocks, one block per unit.

use super::Demo;
use crate::core::blit::Blitter;
use crate::core::color::Color;
use crate::core::error::Result;
use crate::core::surface::{Rect, SurfaceMut};
use crate::frontend::app::AppState;
use crate::frontend::input::Buttons;

/// Side of one value block in pixels
const BLOCK: u32 = 16;
/// Gap between blocks and rows
const GAP: u32 = 4;
/// Left/top margin
const MARGIN: i32 = 10;

/// Buttons that are only reported, in report order
const REPORTED: [(Buttons, &str); 8] = [
    (Buttons::UP, "Up"),
    (Buttons::DOWN, "Down"),
    (Buttons::LEFT, "Left"),
    (Buttons::RIGHT, "Right"),
    (Buttons::START, "Start"),
    (Buttons::SELECT, "Select"),
    (Buttons::LTRIGGER, "L-trigger"),
    (Buttons::RTRIGGER, "R-trigger"),
];

/// Adds two operands chosen with the face buttons
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    first: Option<i32>,
    second: Option<i32>,
    answer: Option<i32>,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn first(&self) -> Option<i32> {
        self.first
    }

    #[inline(always)]
    pub fn second(&self) -> Option<i32> {
        self.second
    }

    /// Last computed sum
    #[inline(always)]
    pub fn answer(&self) -> Option<i32> {
        self.answer
    }

    fn calculate(&mut self) {
        match (self.first, self.second) {
            (Some(a), Some(b)) => {
                let sum = a + b;
                log::info!("The answer is {}.", sum);
                self.answer = Some(sum);
            }
            (first, second) => {
                log::warn!(
                    "Cannot calculate: {} operand missing",
                    if first.is_none() && second.is_none() {
                        "every"
                    } else if first.is_none() {
                        "first"
                    } else {
                        "second"
                    }
                );
            }
        }
    }
}

impl Demo for Calculator {
    fn name(&self) -> &'static str {
        "calculator"
    }

    /// Act on buttons pressed this frame
    ///
    /// Buttons pressed together are handled in table order, so Circle wins
    /// over Triangle.
    fn update(&mut self, state: &AppState) {
        let pressed = state.pressed();
        if pressed.is_empty() {
            return;
        }

        if pressed.contains(Buttons::SQUARE) {
            self.first = Some(1);
            log::info!("First # is 1");
        }
        if pressed.contains(Buttons::TRIANGLE) {
            self.second = Some(2);
            log::info!("Second # is 2");
        }
        if pressed.contains(Buttons::CIRCLE) {
            self.second = Some(3);
            log::info!("Second # is 3");
        }
        if pressed.contains(Buttons::CROSS) {
            self.calculate();
        }

        for (button, name) in REPORTED {
            if pressed.contains(button) {
                log::info!("{} pressed", name);
            }
        }
    }

    fn render(&mut self, blitter: &Blitter, target: &mut dyn SurfaceMut) -> Result<()> {
        blitter.clear(target, Color::BLACK);

        let rows = [
            (self.first, Color::RED),
            (self.second, Color::GREEN),
            (self.answer, Color::WHITE),
        ];
        for (row, (value, color)) in rows.into_iter().enumerate() {
            let count = value.unwrap_or(0).max(0) as u32;
            let y = MARGIN + (row as u32 * (BLOCK + GAP)) as i32;
            for block in 0..count {
                let x = MARGIN + (block * (BLOCK + GAP)) as i32;
                blitter.fill_rect(target, color, Rect::new(x, y, BLOCK, BLOCK))?;
            }
        }
        Ok(())
    }
}
