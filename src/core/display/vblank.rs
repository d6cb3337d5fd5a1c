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

//! Vertical blank pacing
//!
//! [`Display::present`](super::Display::present) blocks on a [`VBlank`] source
//! before flipping buffers. On hardware this is the display controller's
//! vblank interrupt; here it is either a wall-clock pacer ([`VBlankClock`]) or
//! nothing at all ([`NoVsync`]).

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use crate::core::error::{GraphicsError, Result};

/// Source of vertical blank events
pub trait VBlank {
    /// Block until the start of the next vertical blank
    fn wait_for_vblank(&mut self);
}

impl<V: VBlank + ?Sized> VBlank for Box<V> {
    fn wait_for_vblank(&mut self) {
        (**self).wait_for_vblank();
    }
}

/// Vblank source that never waits
///
/// Used by tests, batch rendering and `--no-vsync`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVsync;

impl VBlank for NoVsync {
    #[inline(always)]
    fn wait_for_vblank(&mut self) {}
}

/// Wall-clock vblank pacer
///
/// Vblanks fall on a fixed grid of refresh periods starting at creation.
/// Waiting sleeps until the next grid point. A caller that arrives after one
/// or more grid points have passed does not wait; the vblanks it slept
/// through are counted as missed and the grid moves on from the most recent
/// one.
///
/// # Example
///
/// ```
/// use pspgfx::core::{VBlank, VBlankClock};
///
/// let mut clock = VBlankClock::new(60).unwrap();
/// clock.wait_for_vblank();
/// assert_eq!(clock.frame_count(), 1);
/// println!(
///     "FPS: {:.1}, interval: {:.2}ms, missed: {}",
///     clock.fps(),
///     clock.frame_time_ms(),
///     clock.missed_vblanks()
/// );
/// ```
#[derive(Debug)]
pub struct VBlankClock {
    period: Duration,
    /// Next grid point
    next_vblank: Instant,
    /// When the previous wait returned
    last_return: Option<Instant>,
    frame_count: u64,
    missed: u64,
    frame_time_ms: f32,
    /// Return times within the last second
    recent: VecDeque<Instant>,
}

impl VBlankClock {
    /// Create a pacer for `refresh_hz` vblanks per second
    ///
    /// # Errors
    ///
    /// [`GraphicsError::Config`] if `refresh_hz` is 0.
    pub fn new(refresh_hz: u32) -> Result<Self> {
        if refresh_hz == 0 {
            return Err(GraphicsError::Config(
                "refresh rate must be greater than 0".to_string(),
            ));
        }
        let period = Duration::from_nanos(1_000_000_000 / refresh_hz as u64);

        Ok(Self {
            period,
            next_vblank: Instant::now() + period,
            last_return: None,
            frame_count: 0,
            missed: 0,
            frame_time_ms: 0.0,
            recent: VecDeque::with_capacity(refresh_hz.min(1024) as usize + 1),
        })
    }

    /// Instant at which the next vblank starts
    #[inline(always)]
    pub fn next_vblank_instant(&self) -> Instant {
        self.next_vblank
    }

    /// Refresh period
    #[inline(always)]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Vblanks per second over the last second of waits
    pub fn fps(&self) -> f32 {
        match (self.recent.front(), self.recent.back()) {
            (Some(first), Some(last)) if self.recent.len() > 1 => {
                let span = last.duration_since(*first).as_secs_f32();
                if span > 0.0 {
                    (self.recent.len() - 1) as f32 / span
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }

    /// Time between the last two returns from [`VBlank::wait_for_vblank`]
    #[inline(always)]
    pub fn frame_time_ms(&self) -> f32 {
        self.frame_time_ms
    }

    #[inline(always)]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Grid points that passed while nobody was waiting
    #[inline(always)]
    pub fn missed_vblanks(&self) -> u64 {
        self.missed
    }

    fn record(&mut self, now: Instant) {
        if let Some(last) = self.last_return {
            self.frame_time_ms = now.duration_since(last).as_secs_f32() * 1000.0;
        }
        self.last_return = Some(now);
        self.frame_count += 1;

        self.recent.push_back(now);
        while self
            .recent
            .front()
            .is_some_and(|first| now.duration_since(*first) > Duration::from_secs(1))
        {
            self.recent.pop_front();
        }
    }
}

impl VBlank for VBlankClock {
    fn wait_for_vblank(&mut self) {
        let now = Instant::now();
        if now < self.next_vblank {
            thread::sleep(self.next_vblank - now);
        } else {
            let late = now.duration_since(self.next_vblank);
            let skipped = (late.as_nanos() / self.period.as_nanos()) as u64;
            if skipped > 0 {
                log::trace!("Missed {} vblank(s)", skipped);
            }
            self.missed += skipped;
            self.next_vblank = now;
        }

        self.record(Instant::now());
        self.next_vblank += self.period;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vblank_clock_new() {
        let clock = VBlankClock::new(60).unwrap();
        assert_eq!(clock.fps(), 0.0);
        assert_eq!(clock.frame_time_ms(), 0.0);
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.period(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn test_vblank_clock_rejects_zero_rate() {
        assert!(matches!(
            VBlankClock::new(0),
            Err(GraphicsError::Config(_))
        ));
    }

    #[test]
    fn test_vblank_clock_paces_frames() {
        let mut clock = VBlankClock::new(100).unwrap();
        let start = Instant::now();

        for _ in 0..3 {
            clock.wait_for_vblank();
        }

        // Three 10ms periods
        assert!(start.elapsed() >= Duration::from_millis(30));
        assert_eq!(clock.frame_count(), 3);
        assert!(clock.frame_time_ms() > 0.0);
    }

    #[test]
    fn test_vblank_clock_does_not_wait_when_late() {
        let mut clock = VBlankClock::new(1000).unwrap();
        thread::sleep(Duration::from_millis(5));

        let before = Instant::now();
        clock.wait_for_vblank();
        assert!(before.elapsed() < Duration::from_millis(50));
        assert_eq!(clock.frame_count(), 1);
        assert!(clock.missed_vblanks() >= 4);
    }

    #[test]
    fn test_vblank_clock_stays_on_grid() {
        let mut clock = VBlankClock::new(100).unwrap();
        let first = clock.next_vblank_instant();
        clock.wait_for_vblank();
        clock.wait_for_vblank();

        // Deadlines advance by whole periods, not from the wake-up time
        assert_eq!(clock.next_vblank_instant(), first + clock.period() * 2);
        assert_eq!(clock.missed_vblanks(), 0);
    }

    #[test]
    fn test_vblank_clock_fps() {
        let mut clock = VBlankClock::new(200).unwrap();
        clock.wait_for_vblank();
        assert_eq!(clock.fps(), 0.0);

        for _ in 0..9 {
            clock.wait_for_vblank();
        }
        assert!(clock.fps() > 0.0 && clock.fps() < 250.0);
        assert!(clock.frame_time_ms() > 0.0);
    }

    #[test]
    fn test_no_vsync_through_box() {
        let mut source: Box<dyn VBlank> = Box::new(NoVsync);
        source.wait_for_vblank();
    }
}
