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

//! # Umbra Core
//!
//! Backend-agnostic building blocks of the Umbra viewer: math, the scene
//! graph and its procedural geometry, the camera and orbit controls, and the
//! window and render-system contracts implemented by `umbra-infra`.

#![warn(missing_docs)]

pub mod camera;
pub mod clock;
pub mod controls;
pub mod math;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod viewport;

pub use self::camera::PerspectiveCamera;
pub use self::clock::Clock;
pub use self::controls::{OrbitControls, OrbitControlsSettings};
pub use self::viewport::Viewport;
