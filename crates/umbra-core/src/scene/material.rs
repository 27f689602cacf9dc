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

use crate::math::LinearRgba;

/// A metallic-roughness surface description.
///
/// Materials are plain values; meshes that look alike hold their own copies,
/// usually derived from a shared base through the `with_*` builders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardMaterial {
    /// Base color in linear space.
    pub color: LinearRgba,
    /// Microfacet roughness in `[0, 1]`.
    pub roughness: f32,
    /// Metalness in `[0, 1]`.
    pub metalness: f32,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: LinearRgba::WHITE,
            roughness: 1.0,
            metalness: 0.0,
        }
    }
}

impl StandardMaterial {
    /// Returns a copy with a different base color.
    pub fn with_color(mut self, color: LinearRgba) -> Self {
        self.color = color;
        self
    }

    /// Returns a copy with a different roughness, clamped to `[0, 1]`.
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Returns a copy with a different metalness, clamped to `[0, 1]`.
    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_leave_base_untouched() {
        let base = StandardMaterial::default().with_roughness(0.5).with_metalness(0.5);
        let cube = base.with_color(LinearRgba::rgb(1.0, 1.0, 0.5)).with_roughness(0.1);
        assert_eq!(base.color, LinearRgba::WHITE);
        assert_eq!(base.roughness, 0.5);
        assert_eq!(cube.roughness, 0.1);
        assert_eq!(cube.metalness, 0.5);
    }

    #[test]
    fn test_parameters_are_clamped() {
        let m = StandardMaterial::default().with_roughness(2.0).with_metalness(-1.0);
        assert_eq!((m.roughness, m.metalness), (1.0, 0.0));
    }
}
