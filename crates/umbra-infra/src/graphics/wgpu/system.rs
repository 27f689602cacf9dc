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

use std::collections::HashMap;
use std::time::Instant;

use umbra_core::camera::PerspectiveCamera;
use umbra_core::platform::window::ViewerWindow;
use umbra_core::renderer::{
    RenderError, RenderSettings, RenderStats, RenderSystem, RendererAdapterInfo,
};
use umbra_core::scene::{GeometryHandle, NodeId, Scene};

use super::context::WgpuGraphicsContext;
use super::forward::LitPass;
use super::mesh::GpuMesh;
use super::object::{object_bind_group_layout, DrawItem, ObjectBinding};
use super::shadow::ShadowPass;
use super::uniforms::{find_shadow_caster, FrameUniform, ObjectUniform};

/// Everything that only exists once a window has been attached.
#[derive(Debug)]
struct GpuState {
    context: WgpuGraphicsContext,
    object_layout: wgpu::BindGroupLayout,
    shadow: ShadowPass,
    lit: LitPass,
    meshes: HashMap<GeometryHandle, GpuMesh>,
    objects: HashMap<NodeId, ObjectBinding>,
    minimized: bool,
}

/// A forward renderer with one directional shadow map, built on `wgpu`.
#[derive(Debug, Default)]
pub struct WgpuRenderSystem {
    settings: RenderSettings,
    gpu: Option<GpuState>,
    frame_number: u64,
}

impl WgpuRenderSystem {
    /// Creates an uninitialized render system; call [`RenderSystem::init`]
    /// once a window exists.
    pub fn new() -> Self {
        Self::default()
    }
}

impl GpuState {
    /// Uploads missing geometry, writes per-node uniforms and the frame
    /// uniform. Returns whether a shadow pass is needed.
    fn prepare(&mut self, scene: &Scene, camera: &PerspectiveCamera, settings: &RenderSettings) -> bool {
        let device = &self.context.device;
        let queue = &self.context.queue;

        for (handle, geometry) in scene.geometries() {
            self.meshes.entry(handle).or_insert_with(|| {
                let data = geometry.tessellate();
                log::debug!(
                    "Uploading geometry {} ({} triangles)",
                    handle.index(),
                    data.triangle_count()
                );
                GpuMesh::upload(device, &format!("Geometry {}", handle.index()), &data)
            });
        }

        for (id, node, mesh) in scene.meshes() {
            let binding = self.objects.entry(id).or_insert_with(|| {
                ObjectBinding::new(device, &self.object_layout, &format!("Object {}", id.index()))
            });
            binding.write(queue, &ObjectUniform::new(&node.transform, mesh));
        }

        let caster = find_shadow_caster(scene, &settings.shadows);
        if let Some(caster) = &caster {
            if self.shadow.ensure_size(device, caster.map_size) {
                self.lit.rebind_shadow_map(device, self.shadow.view(), self.shadow.sampler());
            }
            self.shadow.write_light(queue, &caster.view_proj);
        }

        let frame = FrameUniform::build(scene, camera, caster.as_ref(), settings.shadows.filter.kernel_width());
        self.lit.write_frame(queue, &frame);
        caster.is_some()
    }

    fn acquire(&mut self) -> Result<Option<wgpu::SurfaceTexture>, RenderError> {
        let mut retried = false;
        loop {
            match self.context.surface.get_current_texture() {
                Ok(texture) => return Ok(Some(texture)),
                Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) if !retried => {
                    log::warn!("Surface lost or outdated ({e:?}); reconfiguring");
                    self.context.reconfigure();
                    retried = true;
                }
                Err(wgpu::SurfaceError::Timeout) => {
                    log::warn!("Timed out acquiring the next frame; skipping it");
                    return Ok(None);
                }
                Err(e @ wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory acquiring the next frame ({e:?})");
                    return Err(RenderError::SurfaceAcquisitionFailed(format!("OutOfMemory: {e:?}")));
                }
                Err(e) => {
                    return Err(RenderError::SurfaceAcquisitionFailed(format!("{e:?}")));
                }
            }
        }
    }
}

impl RenderSystem for WgpuRenderSystem {
    fn init(&mut self, window: &dyn ViewerWindow, settings: &RenderSettings) -> Result<(), RenderError> {
        if self.gpu.is_some() {
            log::warn!("WgpuRenderSystem is already initialized");
            return Ok(());
        }
        let (width, height) = window.inner_size();
        let context = pollster::block_on(WgpuGraphicsContext::new(
            window.clone_handle_arc(),
            width,
            height,
            settings.vsync,
        ))?;

        let device = &context.device;
        let object_layout = object_bind_group_layout(device);
        let shadow = ShadowPass::new(device, &object_layout, settings.shadows.filter);
        let lit = LitPass::new(
            device,
            context.format(),
            context.size(),
            &object_layout,
            shadow.view(),
            shadow.sampler(),
        );
        log::info!(
            "Render system ready (shadows: {}, filter: {:?})",
            settings.shadows.enabled,
            settings.shadows.filter
        );

        self.settings = *settings;
        self.gpu = Some(GpuState {
            context,
            object_layout,
            shadow,
            lit,
            meshes: HashMap::new(),
            objects: HashMap::new(),
            minimized: width == 0 || height == 0,
        });
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        gpu.minimized = width == 0 || height == 0;
        if gpu.context.resize(width, height) {
            gpu.lit.resize(&gpu.context.device, width, height);
        }
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<RenderStats, RenderError> {
        let started = Instant::now();
        let gpu = self.gpu.as_mut().ok_or(RenderError::NotInitialized)?;
        self.frame_number += 1;
        let mut stats = RenderStats {
            frame_number: self.frame_number,
            ..Default::default()
        };
        if gpu.minimized {
            log::trace!("Skipping frame {}: surface has zero size", self.frame_number);
            return Ok(stats);
        }

        let shadowed = gpu.prepare(scene, camera, &self.settings);
        let Some(output) = gpu.acquire()? else {
            return Ok(stats);
        };
        let target = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let draws: Vec<DrawItem<'_>> = scene
            .meshes()
            .filter_map(|(id, _, mesh)| {
                Some(DrawItem {
                    mesh: gpu.meshes.get(&mesh.geometry)?,
                    object: gpu.objects.get(&id)?,
                    cast_shadow: mesh.cast_shadow,
                })
            })
            .collect();

        let mut encoder = gpu
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Umbra Frame Encoder"),
            });
        if shadowed {
            stats.shadow_draw_calls = gpu.shadow.encode(&mut encoder, &draws);
        }
        let (draw_calls, triangles) = gpu.lit.encode(&mut encoder, &target, scene.background, &draws);
        stats.draw_calls = draw_calls;
        stats.triangles_rendered = triangles;

        gpu.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        stats.cpu_frame_time_ms = started.elapsed().as_secs_f32() * 1000.0;
        log::trace!(
            "Frame {}: {} draws, {} shadow draws, {} triangles",
            stats.frame_number,
            stats.draw_calls,
            stats.shadow_draw_calls,
            stats.triangles_rendered
        );
        Ok(stats)
    }

    fn surface_size(&self) -> (u32, u32) {
        self.gpu.as_ref().map_or((0, 0), |gpu| gpu.context.size())
    }

    fn adapter_info(&self) -> Option<RendererAdapterInfo> {
        self.gpu.as_ref().map(|gpu| gpu.context.adapter_info.clone())
    }

    fn shutdown(&mut self) {
        if let Some(gpu) = self.gpu.take() {
            log::info!("Shutting down WgpuRenderSystem...");
            if let Err(e) = gpu.context.device.poll(wgpu::PollType::Wait) {
                log::warn!("Device poll failed during shutdown: {e}");
            }
        }
    }
}

impl Drop for WgpuRenderSystem {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umbra_core::scene::{Geometry, Mesh, StandardMaterial, Transform};

    #[test]
    fn test_render_before_init_fails() {
        let mut system = WgpuRenderSystem::new();
        let scene = Scene::new();
        let camera = PerspectiveCamera::new(70.0, 1.0, 0.1, 1000.0);
        assert!(matches!(system.render(&scene, &camera), Err(RenderError::NotInitialized)));
    }

    #[test]
    fn test_uninitialized_queries() {
        let mut system = WgpuRenderSystem::new();
        assert_eq!(system.surface_size(), (0, 0));
        assert!(system.adapter_info().is_none());
        system.resize(800, 600);
        system.shutdown();
        system.shutdown();
        assert_eq!(system.surface_size(), (0, 0));
    }

    #[test]
    fn test_frame_counter_only_advances_when_initialized() {
        let mut system = WgpuRenderSystem::new();
        let mut scene = Scene::new();
        let cube = scene.add_geometry(Geometry::UNIT_BOX);
        scene.add_mesh(Transform::IDENTITY, Mesh::new(cube, StandardMaterial::default()));
        let camera = PerspectiveCamera::new(70.0, 1.0, 0.1, 1000.0);
        assert!(matches!(system.render(&scene, &camera), Err(RenderError::NotInitialized)));
        assert_eq!(system.frame_number, 0);
    }
}
