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

//! Render-system contracts shared by every graphics backend.

pub mod error;
pub mod settings;
pub mod stats;
pub mod traits;

pub use self::error::RenderError;
pub use self::settings::{RenderSettings, ShadowFilter, ShadowSettings};
pub use self::stats::RenderStats;
pub use self::traits::{RenderSystem, RendererAdapterInfo};
