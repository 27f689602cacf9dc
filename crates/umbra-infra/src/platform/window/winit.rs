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

//! A `winit`-based implementation of the `ViewerWindow` trait.

use raw_window_handle::{DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle};
use std::sync::Arc;
use umbra_core::platform::window::{ViewerWindow, ViewerWindowHandle};
use winit::{
    dpi::LogicalSize,
    error::OsError,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

/// A shared `winit` window.
#[derive(Debug, Clone)]
pub struct WinitWindow {
    inner: Arc<Window>,
}

impl WinitWindow {
    /// The `winit` identifier, for matching incoming window events.
    pub fn winit_id(&self) -> WindowId {
        self.inner.id()
    }
}

/// Builds a [`WinitWindow`] with a title and a logical inner size.
#[derive(Debug, Clone)]
pub struct WinitWindowBuilder {
    title: String,
    width: f64,
    height: f64,
}

impl WinitWindowBuilder {
    /// A builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "Umbra".to_string(),
            width: 1280.0,
            height: 720.0,
        }
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial inner size in logical units.
    pub fn with_logical_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Creates the window on the running event loop.
    ///
    /// # Errors
    /// Returns an `OsError` if `winit` cannot create the window.
    pub fn build(self, event_loop: &ActiveEventLoop) -> Result<WinitWindow, OsError> {
        log::info!(
            "Creating window '{}' ({}x{} logical)",
            self.title,
            self.width,
            self.height
        );

        let attributes = Window::default_attributes()
            .with_title(self.title)
            .with_inner_size(LogicalSize::new(self.width, self.height));
        let window = event_loop.create_window(attributes)?;

        log::info!(
            "Window ready (id: {:?}, scale factor {:.2}).",
            window.id(),
            window.scale_factor()
        );
        Ok(WinitWindow {
            inner: Arc::new(window),
        })
    }
}

impl Default for WinitWindowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HasWindowHandle for WinitWindow {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        self.inner.window_handle()
    }
}

impl HasDisplayHandle for WinitWindow {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        self.inner.display_handle()
    }
}

impl ViewerWindow for WinitWindow {
    fn inner_size(&self) -> (u32, u32) {
        let size = self.inner.inner_size();
        (size.width, size.height)
    }

    fn scale_factor(&self) -> f64 {
        self.inner.scale_factor()
    }

    fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    fn clone_handle_arc(&self) -> ViewerWindowHandle {
        self.inner.clone()
    }

    fn id(&self) -> u64 {
        self.inner.id().into()
    }
}
