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

//! Creation-time render settings.
//!
//! These are read once when a render system is initialized. Shadow mapping
//! and its filter cannot change afterwards.

use serde::{Deserialize, Serialize};

/// How shadow-map comparisons are filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadowFilter {
    /// A single nearest comparison per fragment.
    Hard,
    /// A 3x3 grid of nearest comparisons.
    Pcf,
    /// A 3x3 grid of bilinearly filtered comparisons.
    #[default]
    PcfSoft,
}

impl ShadowFilter {
    /// Whether the comparison sampler should filter linearly.
    pub fn is_linear(self) -> bool {
        matches!(self, ShadowFilter::PcfSoft)
    }

    /// Number of taps along one side of the sampling grid.
    pub fn kernel_width(self) -> u32 {
        match self {
            ShadowFilter::Hard => 1,
            ShadowFilter::Pcf | ShadowFilter::PcfSoft => 3,
        }
    }
}

/// Shadow-mapping switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowSettings {
    /// Whether shadow maps are rendered at all.
    pub enabled: bool,
    /// The comparison filter.
    pub filter: ShadowFilter,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            filter: ShadowFilter::PcfSoft,
        }
    }
}

/// Settings a render system is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Shadow-mapping configuration.
    pub shadows: ShadowSettings,
    /// Prefer a tear-free present mode over the lowest latency one.
    pub vsync: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            shadows: ShadowSettings::default(),
            vsync: true,
        }
    }
}
