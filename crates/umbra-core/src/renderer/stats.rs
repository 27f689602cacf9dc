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

/// Counters collected while rendering one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderStats {
    /// A sequential counter for rendered frames.
    pub frame_number: u64,
    /// Draw calls issued by the main pass.
    pub draw_calls: u32,
    /// Draw calls issued by the shadow pass.
    pub shadow_draw_calls: u32,
    /// Triangles submitted by the main pass.
    pub triangles_rendered: u32,
    /// CPU time spent preparing and submitting the frame.
    pub cpu_frame_time_ms: f32,
}
