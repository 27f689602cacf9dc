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

// Umbra viewer
// A static shadow test scene with orbit controls.

mod app;
mod config;
mod scene;

use anyhow::Result;
use umbra_sdk::Engine;

use crate::app::ViewerApp;
use crate::config::ViewerConfig;

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .init();

    let config = ViewerConfig::from_env()?;
    log::info!("Lighting rig: {:?}, shadows: {:?}", config.lighting, config.render.shadows);
    Engine::run::<ViewerApp>(config.engine_config(), config)?;
    Ok(())
}
