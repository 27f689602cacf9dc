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

//! Viewer configuration, optionally loaded from a RON file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use umbra_core::controls::OrbitControlsSettings;
use umbra_core::renderer::RenderSettings;
use umbra_sdk::EngineConfig;

use crate::scene::LightingRig;

/// Environment variable naming a RON configuration file.
pub const CONFIG_ENV_VAR: &str = "UMBRA_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Umbra - shadow viewer".to_string(),
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Everything the viewer can be configured with. Missing fields take their
/// default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub lighting: LightingRig,
    pub render: RenderSettings,
    pub controls: OrbitControlsSettings,
    /// Seconds between frame-rate log lines; 0 disables them.
    pub telemetry_interval_secs: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            lighting: LightingRig::default(),
            render: RenderSettings::default(),
            controls: OrbitControlsSettings::default(),
            telemetry_interval_secs: 1.0,
        }
    }
}

impl ViewerConfig {
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that parse but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let controls = &self.controls;
        let ordered = controls.min_distance <= controls.max_distance;
        if !ordered {
            return Err(ConfigError::Invalid(format!(
                "controls.min_distance ({}) exceeds controls.max_distance ({})",
                controls.min_distance, controls.max_distance
            )));
        }
        let damping_in_range = controls.damping_factor > 0.0 && controls.damping_factor <= 1.0;
        if !damping_in_range {
            return Err(ConfigError::Invalid(format!(
                "controls.damping_factor must be in (0, 1], got {}",
                controls.damping_factor
            )));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&source)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults when the
    /// variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                log::info!("Loading configuration from {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            title: self.window.title.clone(),
            width: self.window.width,
            height: self.window.height,
            render: self.render,
            telemetry_interval: Duration::try_from_secs_f32(self.telemetry_interval_secs)
                .unwrap_or(Duration::ZERO),
        }
    }
}
