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

//! Euler angles.

use serde::{Deserialize, Serialize};

/// Rotation angles in radians around the X, Y and Z axes.
///
/// Angles are applied in X-Y-Z intrinsic order (see [`super::Mat4::from_euler`]).
/// They are never wrapped, so they grow without bound under animation.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct Euler {
    /// Rotation around the X axis.
    pub x: f32,
    /// Rotation around the Y axis.
    pub y: f32,
    /// Rotation around the Z axis.
    pub z: f32,
}

impl Euler {
    /// No rotation.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new set of angles.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}
