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

//! Small linear-algebra toolkit used by the scene graph and renderer.
//!
//! All matrices are column-major and all projections target a right-handed
//! view space with a `[0, 1]` clip depth range, matching what `wgpu` expects.

pub mod color;
pub mod euler;
pub mod matrix;
pub mod vector;

pub use self::color::LinearRgba;
pub use self::euler::Euler;
pub use self::matrix::Mat4;
pub use self::vector::{Vec3, Vec4};

/// A small constant used for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

/// π as `f32`.
pub const PI: f32 = std::f32::consts::PI;

/// Converts an angle from degrees to radians.
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}

/// Converts an angle from radians to degrees.
#[inline]
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * (180.0 / PI)
}

/// Clamps a value to the `[0.0, 1.0]` range.
#[inline]
pub fn saturate(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}
