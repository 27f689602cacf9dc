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

//! Defines the `LinearRgba` color type.

use serde::{Deserialize, Serialize};

/// A color in **linear** RGBA space with `f32` components.
///
/// Lighting is computed in linear space; hex colors authored in sRGB must go
/// through [`LinearRgba::from_srgb_hex`].
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct LinearRgba {
    /// The red component in linear space.
    pub r: f32,
    /// The green component in linear space.
    pub g: f32,
    /// The blue component in linear space.
    pub b: f32,
    /// The alpha component.
    pub a: f32,
}

impl Default for LinearRgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl LinearRgba {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque red.
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);

    /// Creates a color with explicit RGBA values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Decodes a `0xRRGGBB` sRGB hex value into an opaque linear color.
    pub fn from_srgb_hex(hex: u32) -> Self {
        let channel = |shift: u32| match (hex >> shift) & 0xff {
            0 => 0.0,
            0xff => 1.0,
            byte => srgb_to_linear(byte as f32 / 255.0),
        };
        Self::rgb(channel(16), channel(8), channel(0))
    }

    /// Multiplies the RGB channels by `factor`, leaving alpha untouched.
    #[inline]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    /// Returns `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Converts an sRGB component to linear space.
#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_srgb_hex_primaries() {
        assert_eq!(LinearRgba::from_srgb_hex(0xffffff), LinearRgba::WHITE);
        assert_eq!(LinearRgba::from_srgb_hex(0xff0000), LinearRgba::RED);
        assert_eq!(LinearRgba::from_srgb_hex(0x000000), LinearRgba::BLACK);
    }

    #[test]
    fn test_from_srgb_hex_midtone_is_darker_in_linear() {
        let grey = LinearRgba::from_srgb_hex(0x808080);
        assert_relative_eq!(grey.r, 0.2158605, epsilon = 1e-4);
        assert_eq!(grey.r, grey.g);
        assert_eq!(grey.a, 1.0);
    }

    #[test]
    fn test_scaled_keeps_alpha() {
        let c = LinearRgba::new(1.0, 0.5, 0.25, 0.5).scaled(2.0);
        assert_eq!(c, LinearRgba::new(2.0, 1.0, 0.5, 0.5));
    }
}
