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

//! # Umbra Infra
//!
//! Concrete backends for the contracts in `umbra-core`: a `winit` window with
//! input translation, and a `wgpu` render system with directional shadow
//! mapping.

#![warn(missing_docs)]

pub mod graphics;
pub mod platform;

pub use graphics::wgpu::WgpuRenderSystem;
pub use platform::input::translate_winit_input;
pub use platform::window::{WinitWindow, WinitWindowBuilder};
