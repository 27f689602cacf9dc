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

//! Abstract window contract.

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use std::sync::Arc;

use crate::viewport::Viewport;

/// Both raw-window-handle traits in one, so they can sit in a trait object.
pub trait WindowHandle: HasWindowHandle + HasDisplayHandle {}

impl<T: HasWindowHandle + HasDisplayHandle> WindowHandle for T {}

/// A shareable window handle a render backend can build a surface from.
pub type ViewerWindowHandle = Arc<dyn WindowHandle + Send + Sync>;

/// What the viewer needs from a native window.
pub trait ViewerWindow: HasWindowHandle + HasDisplayHandle + Send + Sync {
    /// Physical dimensions (width, height) of the window's inner area.
    fn inner_size(&self) -> (u32, u32);

    /// Physical pixels per logical unit.
    fn scale_factor(&self) -> f64;

    /// Requests that the window be redrawn.
    fn request_redraw(&self);

    /// Clones an `Arc`'d, thread-safe handle to the window for surface creation.
    fn clone_handle_arc(&self) -> ViewerWindowHandle;

    /// Unique identifier of the window.
    fn id(&self) -> u64;

    /// The current drawable area as a [`Viewport`].
    fn viewport(&self) -> Viewport {
        let (width, height) = self.inner_size();
        Viewport::from_physical(width, height, self.scale_factor())
    }
}
