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

//! The size of the drawable area.

use serde::{Deserialize, Serialize};

/// A viewport size in logical units plus the device pixel ratio.
///
/// The render target is sized in physical pixels (`logical * pixel_ratio`)
/// while the camera aspect only depends on the logical size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in logical (device-independent) units.
    pub logical_width: f32,
    /// Height in logical (device-independent) units.
    pub logical_height: f32,
    /// Physical pixels per logical unit.
    pub pixel_ratio: f32,
}

impl Viewport {
    /// Creates a viewport from a logical size and pixel ratio.
    pub const fn new(logical_width: f32, logical_height: f32, pixel_ratio: f32) -> Self {
        Self {
            logical_width,
            logical_height,
            pixel_ratio,
        }
    }

    /// Creates a viewport from a physical size as reported by a window.
    pub fn from_physical(width: u32, height: u32, scale_factor: f64) -> Self {
        let ratio = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        Self::new(
            (width as f64 / ratio) as f32,
            (height as f64 / ratio) as f32,
            ratio as f32,
        )
    }

    /// `true` if either dimension is zero, as happens while minimized.
    pub fn is_empty(&self) -> bool {
        self.logical_width <= 0.0 || self.logical_height <= 0.0 || self.pixel_ratio <= 0.0
    }

    /// Logical width over logical height, or `None` for an empty viewport.
    pub fn aspect_ratio(&self) -> Option<f32> {
        (!self.is_empty()).then(|| self.logical_width / self.logical_height)
    }

    /// Size of the render target in physical pixels, rounded to the nearest pixel.
    pub fn render_target_size(&self) -> (u32, u32) {
        if self.is_empty() {
            return (0, 0);
        }
        (
            (self.logical_width * self.pixel_ratio).round() as u32,
            (self.logical_height * self.pixel_ratio).round() as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_render_target_scales_with_pixel_ratio() {
        let vp = Viewport::new(1920.0, 1080.0, 2.0);
        assert_eq!(vp.render_target_size(), (3840, 2160));
        assert_relative_eq!(vp.aspect_ratio().unwrap(), 1920.0 / 1080.0);
    }

    #[test]
    fn test_from_physical_recovers_logical_size() {
        let vp = Viewport::from_physical(3840, 2160, 2.0);
        assert_eq!(vp, Viewport::new(1920.0, 1080.0, 2.0));
        assert_eq!(vp.render_target_size(), (3840, 2160));
    }

    #[test]
    fn test_fractional_ratio_rounds() {
        let vp = Viewport::new(801.0, 601.0, 1.25);
        assert_eq!(vp.render_target_size(), (1001, 751));
    }

    #[test]
    fn test_empty_viewport() {
        let vp = Viewport::new(800.0, 0.0, 1.0);
        assert!(vp.is_empty());
        assert_eq!(vp.aspect_ratio(), None);
        assert_eq!(vp.render_target_size(), (0, 0));
    }
}
