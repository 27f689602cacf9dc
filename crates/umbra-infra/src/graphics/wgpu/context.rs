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

use umbra_core::platform::window::ViewerWindowHandle;
use umbra_core::renderer::{RenderError, RendererAdapterInfo};

/// The surface, device and queue for one window.
#[derive(Debug)]
pub struct WgpuGraphicsContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub adapter_info: RendererAdapterInfo,
}

impl WgpuGraphicsContext {
    /// Creates a surface for `window_handle`, picks an adapter able to present
    /// to it and configures the swapchain at `width` x `height`.
    pub async fn new(
        window_handle: ViewerWindowHandle,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        log::info!("Initializing wgpu graphics context...");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let surface = instance
            .create_surface(window_handle)
            .map_err(|e| RenderError::InitializationFailed(format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| RenderError::InitializationFailed(format!("No suitable adapter: {e}")))?;

        let info = adapter.get_info();
        log::info!("Using graphics adapter \"{}\" (backend: {:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Umbra Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default().using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
            })
            .await
            .map_err(|e| RenderError::InitializationFailed(format!("Failed to create device: {e}")))?;

        device.on_uncaptured_error(Box::new(|e| {
            log::error!("wgpu uncaptured error: {e}");
        }));

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| RenderError::InitializationFailed("Surface reports no formats".to_string()))?;
        let present_mode = if vsync {
            wgpu::PresentMode::Fifo
        } else {
            caps.present_modes
                .iter()
                .copied()
                .find(|m| *m == wgpu::PresentMode::Mailbox)
                .unwrap_or(wgpu::PresentMode::Fifo)
        };

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode,
            alpha_mode: caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);
        log::info!(
            "Surface configured: {}x{} {:?} ({:?})",
            surface_config.width,
            surface_config.height,
            format,
            present_mode
        );

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
            adapter_info: RendererAdapterInfo {
                name: info.name,
                backend: format!("{:?}", info.backend),
            },
        })
    }

    /// Reconfigures the swapchain. Zero sizes are ignored; returns whether
    /// the surface was reconfigured.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            log::debug!("Ignoring resize to {width}x{height}");
            return false;
        }
        if (width, height) == self.size() {
            return false;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        log::debug!("Surface resized to {width}x{height}");
        true
    }

    /// Re-applies the current configuration after the surface was lost.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }
}
