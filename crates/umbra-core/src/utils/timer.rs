// Copyright 2025 eraflo
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

use std::time::{Duration, Instant};

/// Measures elapsed wall-clock time from its creation or last reset.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start_time: Instant,
}

impl Stopwatch {
    /// Creates a new, running stopwatch.
    #[inline]
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Returns the elapsed time since the stopwatch was started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Restarts the stopwatch and returns the time elapsed before the reset.
    #[inline]
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now - self.start_time;
        self.start_time = now;
        elapsed
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts frames and reports the frame rate once per reporting interval.
#[derive(Debug)]
pub struct FrameClock {
    stopwatch: Stopwatch,
    interval: Duration,
    frames_in_interval: u32,
    total_frames: u64,
}

impl FrameClock {
    /// Creates a clock that reports every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            stopwatch: Stopwatch::new(),
            interval,
            frames_in_interval: 0,
            total_frames: 0,
        }
    }

    /// Records one presented frame.
    ///
    /// Returns the average frames per second when a reporting interval has
    /// elapsed, `None` otherwise.
    pub fn tick(&mut self) -> Option<f64> {
        self.frames_in_interval += 1;
        self.total_frames += 1;
        if self.stopwatch.elapsed() < self.interval {
            return None;
        }
        let elapsed = self.stopwatch.lap().as_secs_f64();
        let fps = self.frames_in_interval as f64 / elapsed.max(f64::EPSILON);
        self.frames_in_interval = 0;
        Some(fps)
    }

    /// Total number of frames recorded.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn stopwatch_lap_resets() {
        let mut sw = Stopwatch::new();
        thread::sleep(Duration::from_millis(50));
        assert!(sw.lap() >= Duration::from_millis(50));
        assert!(sw.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn frame_clock_reports_after_interval() {
        let mut clock = FrameClock::new(Duration::from_millis(20));
        assert_eq!(clock.tick(), None);
        thread::sleep(Duration::from_millis(25));
        let fps = clock.tick().expect("interval elapsed");
        assert!(fps > 0.0);
        assert_eq!(clock.total_frames(), 2);
        assert_eq!(clock.tick(), None);
    }

    #[test]
    fn frame_clock_zero_interval_reports_every_frame() {
        let mut clock = FrameClock::new(Duration::ZERO);
        assert!(clock.tick().is_some());
        assert!(clock.tick().is_some());
    }
}
