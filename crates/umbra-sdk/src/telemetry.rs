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

//! Periodic frame-rate reporting.

use std::time::{Duration, Instant};

use umbra_core::renderer::RenderStats;

/// Counts frames and produces a summary once per interval.
#[derive(Debug, Clone)]
pub struct FrameTelemetry {
    interval: Duration,
    window_start: Option<Instant>,
    frames: u32,
    last_stats: RenderStats,
}

/// One reporting window's worth of frame data.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    /// Average frames per second over the window.
    pub fps: f64,
    /// Frames counted in the window.
    pub frames: u32,
    /// Statistics of the most recent frame.
    pub last: RenderStats,
}

impl FrameTelemetry {
    /// Creates a reporter that summarizes every `interval`. A zero interval
    /// disables reporting.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            window_start: None,
            frames: 0,
            last_stats: RenderStats::default(),
        }
    }

    /// Records a frame rendered at `now`. Returns a summary when the current
    /// window has elapsed, then starts a new window.
    pub fn record_at(&mut self, now: Instant, stats: &RenderStats) -> Option<FrameSummary> {
        if self.interval.is_zero() {
            return None;
        }
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;
        self.last_stats = stats.clone();

        let elapsed = now.saturating_duration_since(start);
        if elapsed < self.interval {
            return None;
        }
        let summary = FrameSummary {
            fps: f64::from(self.frames) / elapsed.as_secs_f64(),
            frames: self.frames,
            last: self.last_stats.clone(),
        };
        self.window_start = Some(now);
        self.frames = 0;
        Some(summary)
    }

    /// Records a frame and logs the summary at `info` when one is due.
    pub fn record(&mut self, stats: &RenderStats) {
        if let Some(summary) = self.record_at(Instant::now(), stats) {
            log::info!(
                "{:.1} fps | {} draws ({} shadow) | {} triangles | {:.2} ms cpu",
                summary.fps,
                summary.last.draw_calls,
                summary.last.shadow_draw_calls,
                summary.last.triangles_rendered,
                summary.last.cpu_frame_time_ms
            );
        }
    }
}

impl Default for FrameTelemetry {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
