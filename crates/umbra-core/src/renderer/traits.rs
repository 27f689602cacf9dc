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

use crate::camera::PerspectiveCamera;
use crate::platform::window::ViewerWindow;
use crate::scene::Scene;

use super::{RenderError, RenderSettings, RenderStats};

/// Identifies the GPU a render system runs on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RendererAdapterInfo {
    /// The name of the adapter (e.g., "NVIDIA GeForce RTX 4090").
    pub name: String,
    /// The graphics API in use (e.g., "Vulkan").
    pub backend: String,
}

/// A backend able to draw a [`Scene`] into a window.
pub trait RenderSystem: std::fmt::Debug {
    /// Creates the surface and GPU resources for `window`.
    ///
    /// `settings` are fixed for the lifetime of the render system.
    fn init(&mut self, window: &dyn ViewerWindow, settings: &RenderSettings) -> Result<(), RenderError>;

    /// Re-fits the render target to `width` x `height` physical pixels.
    /// Zero sizes are ignored.
    fn resize(&mut self, width: u32, height: u32);

    /// Draws one frame of `scene` as seen through `camera`.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<RenderStats, RenderError>;

    /// Current render target size in physical pixels.
    fn surface_size(&self) -> (u32, u32);

    /// Information about the adapter, once initialized.
    fn adapter_info(&self) -> Option<RendererAdapterInfo>;

    /// Releases GPU resources. Safe to call more than once.
    fn shutdown(&mut self);
}
