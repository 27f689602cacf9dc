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

//! Monotonic frame clock.

use std::time::{Duration, Instant};

/// Produces the time elapsed between successive frames.
///
/// The clock starts when it is created and is never reset. The first call to
/// [`Clock::delta`] returns the time since creation.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    started_at: Instant,
    last_tick: Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock {
    /// Starts a new clock at the current instant.
    pub fn start() -> Self {
        Self::start_at(Instant::now())
    }

    /// Starts a new clock at a given instant.
    pub fn start_at(now: Instant) -> Self {
        Self {
            started_at: now,
            last_tick: now,
        }
    }

    /// Seconds since the previous call (or since the clock started).
    pub fn delta(&mut self) -> f32 {
        self.delta_at(Instant::now())
    }

    /// Same as [`Clock::delta`], sampled at `now`.
    ///
    /// An instant earlier than the previous tick yields `0.0`.
    pub fn delta_at(&mut self, now: Instant) -> f32 {
        let delta = now.saturating_duration_since(self.last_tick);
        self.last_tick = self.last_tick.max(now);
        delta.as_secs_f32()
    }

    /// Total time since the clock started.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// The instant the clock was started.
    pub fn started_at(&self) -> Instant {
        self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_delta_measures_from_start() {
        let t0 = Instant::now();
        let mut clock = Clock::start_at(t0);
        assert_relative_eq!(clock.delta_at(t0 + Duration::from_millis(250)), 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_successive_deltas() {
        let t0 = Instant::now();
        let mut clock = Clock::start_at(t0);
        clock.delta_at(t0 + Duration::from_secs(1));
        assert_relative_eq!(clock.delta_at(t0 + Duration::from_millis(1500)), 0.5, epsilon = 1e-6);
        assert_eq!(clock.started_at(), t0);
    }

    #[test]
    fn test_delta_never_negative() {
        let t0 = Instant::now();
        let mut clock = Clock::start_at(t0 + Duration::from_secs(2));
        assert_eq!(clock.delta_at(t0), 0.0);
        assert_relative_eq!(clock.delta_at(t0 + Duration::from_secs(3)), 1.0, epsilon = 1e-6);
    }
}
