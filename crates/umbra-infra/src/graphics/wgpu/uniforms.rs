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

//! CPU-side mirrors of the WGSL uniform blocks and the code that fills them
//! from a [`Scene`].

use umbra_core::camera::PerspectiveCamera;
use umbra_core::math::{LinearRgba, Mat4, Vec3};
use umbra_core::renderer::ShadowSettings;
use umbra_core::scene::{Light, Mesh, NodeId, Scene, Transform};

/// Per-kind light capacity of the frame uniform.
pub const MAX_LIGHTS_PER_KIND: usize = 4;

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirectionalLightUniform {
    pub direction: [f32; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightUniform {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpotLightUniform {
    pub position: [f32; 4],
    pub direction: [f32; 4],
    pub color: [f32; 4],
    pub cone: [f32; 4],
}

/// Everything the lit pass needs once per frame. Mirrors `Frame` in `lit.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    pub ambient: [f32; 4],
    pub hemisphere_sky: [f32; 4],
    pub hemisphere_ground: [f32; 4],
    pub light_counts: [u32; 4],
    pub shadow_view_proj: [[f32; 4]; 4],
    pub shadow_params: [f32; 4],
    pub directional: [DirectionalLightUniform; MAX_LIGHTS_PER_KIND],
    pub point: [PointLightUniform; MAX_LIGHTS_PER_KIND],
    pub spot: [SpotLightUniform; MAX_LIGHTS_PER_KIND],
}

/// Per-mesh data. Mirrors `Object` in both shaders.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub params: [f32; 4],
}

impl ObjectUniform {
    pub fn new(transform: &Transform, mesh: &Mesh) -> Self {
        let material = &mesh.material;
        Self {
            model: transform.matrix().to_cols_array_2d(),
            normal_matrix: transform.normal_matrix().to_cols_array_2d(),
            color: material.color.to_array(),
            params: [
                material.roughness,
                material.metalness,
                if mesh.receive_shadow { 1.0 } else { 0.0 },
                0.0,
            ],
        }
    }
}

/// The directional light that owns the shadow map this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowCaster {
    pub light: NodeId,
    pub view_proj: Mat4,
    pub map_size: u32,
    pub bias: f32,
    pub normal_bias: f32,
}

/// Picks the first shadow-casting directional light with a valid aim.
///
/// Point and spot lights never own a shadow map.
pub fn find_shadow_caster(scene: &Scene, settings: &ShadowSettings) -> Option<ShadowCaster> {
    if !settings.enabled {
        return None;
    }
    scene.lights().find_map(|(id, node, light)| match light {
        Light::Directional(sun) if sun.cast_shadow => {
            scene.light_direction(id)?;
            let target = scene.position_of(sun.target)?;
            Some(ShadowCaster {
                light: id,
                view_proj: sun.shadow.view_projection(node.transform.position, target),
                map_size: sun.shadow.map_size.max(1),
                bias: sun.shadow.bias,
                normal_bias: sun.shadow.normal_bias,
            })
        }
        _ => None,
    })
}

fn rgb_scaled(color: LinearRgba, intensity: f32, w: f32) -> [f32; 4] {
    let c = color.scaled(intensity);
    [c.r, c.g, c.b, w]
}

fn with_w(v: Vec3, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

impl FrameUniform {
    /// Packs the camera and every light of `scene`.
    ///
    /// Ambient and hemisphere lights are summed. The shadow caster, if any,
    /// is always directional slot 0. Lights beyond
    /// [`MAX_LIGHTS_PER_KIND`] of a kind are dropped with a warning.
    pub fn build(
        scene: &Scene,
        camera: &PerspectiveCamera,
        caster: Option<&ShadowCaster>,
        kernel_width: u32,
    ) -> Self {
        let mut frame: Self = bytemuck::Zeroable::zeroed();
        frame.view_proj = camera.view_projection_matrix().to_cols_array_2d();
        frame.camera_position = with_w(camera.position, 1.0);

        let (mut dirs, mut points, mut spots) = (Vec::new(), Vec::new(), Vec::new());
        let mut dropped = 0usize;

        for (id, node, light) in scene.lights() {
            let position = node.transform.position;
            match light {
                Light::Ambient(ambient) => {
                    let c = ambient.color.scaled(ambient.intensity);
                    frame.ambient[0] += c.r;
                    frame.ambient[1] += c.g;
                    frame.ambient[2] += c.b;
                }
                Light::Hemisphere(hemi) => {
                    let sky = hemi.sky_color.scaled(hemi.intensity);
                    let ground = hemi.ground_color.scaled(hemi.intensity);
                    for (dst, src) in [(&mut frame.hemisphere_sky, sky), (&mut frame.hemisphere_ground, ground)] {
                        dst[0] += src.r;
                        dst[1] += src.g;
                        dst[2] += src.b;
                    }
                }
                Light::Directional(sun) => {
                    let Some(direction) = scene.light_direction(id) else {
                        continue;
                    };
                    let shadowed = caster.is_some_and(|c| c.light == id);
                    let packed = DirectionalLightUniform {
                        direction: with_w(direction, if shadowed { 1.0 } else { 0.0 }),
                        color: rgb_scaled(sun.color, sun.intensity, 1.0),
                    };
                    if shadowed {
                        dirs.insert(0, packed);
                    } else {
                        dirs.push(packed);
                    }
                }
                Light::Point(point) => points.push(PointLightUniform {
                    position: with_w(position, point.range),
                    color: rgb_scaled(point.color, point.intensity, point.decay),
                }),
                Light::Spot(spot) => {
                    let Some(direction) = scene.light_direction(id) else {
                        continue;
                    };
                    spots.push(SpotLightUniform {
                        position: with_w(position, spot.range),
                        direction: with_w(direction, 0.0),
                        color: rgb_scaled(spot.color, spot.intensity, spot.decay),
                        cone: [spot.cone_cos(), spot.penumbra_cos(), 0.0, 0.0],
                    });
                }
            }
        }

        dropped += fill(&mut frame.directional[..], &dirs);
        dropped += fill(&mut frame.point[..], &points);
        dropped += fill(&mut frame.spot[..], &spots);
        if dropped > 0 {
            log::warn!("{dropped} light(s) exceed the per-kind limit of {MAX_LIGHTS_PER_KIND} and are ignored");
        }

        frame.light_counts = [
            dirs.len().min(MAX_LIGHTS_PER_KIND) as u32,
            points.len().min(MAX_LIGHTS_PER_KIND) as u32,
            spots.len().min(MAX_LIGHTS_PER_KIND) as u32,
            kernel_width.max(1),
        ];

        if let Some(caster) = caster {
            frame.shadow_view_proj = caster.view_proj.to_cols_array_2d();
            frame.shadow_params = [1.0, caster.bias, caster.normal_bias, 1.0 / caster.map_size as f32];
        }
        frame
    }
}

/// Copies as many entries as fit; returns how many were left out.
fn fill<T: Copy>(slots: &mut [T], list: &[T]) -> usize {
    let n = list.len().min(slots.len());
    slots[..n].copy_from_slice(&list[..n]);
    list.len() - n
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use umbra_core::scene::{
        AmbientLight, DirectionalLight, DirectionalShadow, Geometry, HemisphereLight, PointLight,
        StandardMaterial,
    };

    fn sun(target: NodeId, cast_shadow: bool) -> Light {
        Light::Directional(DirectionalLight {
            color: LinearRgba::WHITE,
            intensity: 1.0,
            target,
            cast_shadow,
            shadow: DirectionalShadow {
                map_size: 4096,
                ..Default::default()
            },
        })
    }

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(70.0, 1.5, 0.1, 1000.0);
        camera.look_at(Vec3::new(0.0, 3.0, 15.0), Vec3::ZERO);
        camera
    }

    #[test]
    fn test_uniform_sizes_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<DirectionalLightUniform>(), 32);
        assert_eq!(std::mem::size_of::<SpotLightUniform>(), 64);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 160);
        assert_eq!(std::mem::size_of::<FrameUniform>(), 64 * 2 + 16 * 6 + 4 * (32 + 32 + 64));
        assert_eq!(std::mem::size_of::<FrameUniform>() % 16, 0);
    }

    #[test]
    fn test_shadow_caster_goes_first() {
        let mut scene = Scene::new();
        let target = scene.add_target(Vec3::ZERO);
        scene.add_light(Vec3::new(0.0, 5.0, 5.0), sun(target, false));
        let shadowed = scene.add_light(Vec3::new(5.0, 20.0, -5.0), sun(target, true));

        let caster = find_shadow_caster(&scene, &ShadowSettings::default()).unwrap();
        assert_eq!(caster.light, shadowed);
        assert_eq!(caster.map_size, 4096);

        let frame = FrameUniform::build(&scene, &camera(), Some(&caster), 3);
        assert_eq!(frame.light_counts, [2, 0, 0, 3]);
        assert_eq!(frame.directional[0].direction[3], 1.0);
        assert_eq!(frame.directional[1].direction[3], 0.0);
        assert_eq!(frame.shadow_params[0], 1.0);
        assert_abs_diff_eq!(frame.shadow_params[3], 1.0 / 4096.0);
    }

    #[test]
    fn test_shadows_disabled_means_no_caster() {
        let mut scene = Scene::new();
        let target = scene.add_target(Vec3::ZERO);
        scene.add_light(Vec3::new(5.0, 20.0, -5.0), sun(target, true));
        let settings = ShadowSettings {
            enabled: false,
            ..Default::default()
        };
        assert!(find_shadow_caster(&scene, &settings).is_none());
        let frame = FrameUniform::build(&scene, &camera(), None, 1);
        assert_eq!(frame.shadow_params, [0.0; 4]);
    }

    #[test]
    fn test_point_lights_never_cast() {
        let mut scene = Scene::new();
        let mut point = PointLight::new(LinearRgba::WHITE, 10.0, 100.0);
        point.cast_shadow = true;
        scene.add_light(Vec3::new(0.0, 2.0, 0.0), Light::Point(point));
        assert!(find_shadow_caster(&scene, &ShadowSettings::default()).is_none());

        let frame = FrameUniform::build(&scene, &camera(), None, 3);
        assert_eq!(frame.light_counts[1], 1);
        assert_eq!(frame.point[0].position, [0.0, 2.0, 0.0, 100.0]);
        assert_eq!(frame.point[0].color, [10.0, 10.0, 10.0, 2.0]);
    }

    #[test]
    fn test_fill_lights_accumulate() {
        let mut scene = Scene::new();
        scene.add_light(
            Vec3::ZERO,
            Light::Hemisphere(HemisphereLight {
                sky_color: LinearRgba::WHITE,
                ground_color: LinearRgba::RED,
                intensity: 0.1,
            }),
        );
        scene.add_light(
            Vec3::ZERO,
            Light::Ambient(AmbientLight {
                color: LinearRgba::WHITE,
                intensity: 0.1,
            }),
        );
        let frame = FrameUniform::build(&scene, &camera(), None, 3);
        assert_eq!(frame.hemisphere_sky, [0.1, 0.1, 0.1, 0.0]);
        assert_eq!(frame.hemisphere_ground, [0.1, 0.0, 0.0, 0.0]);
        assert_eq!(frame.ambient, [0.1, 0.1, 0.1, 0.0]);
        assert_eq!(frame.light_counts, [0, 0, 0, 3]);
    }

    #[test]
    fn test_excess_lights_are_dropped() {
        let mut scene = Scene::new();
        for i in 0..6 {
            scene.add_light(
                Vec3::new(i as f32, 1.0, 0.0),
                Light::Point(PointLight::new(LinearRgba::WHITE, 1.0, 0.0)),
            );
        }
        let frame = FrameUniform::build(&scene, &camera(), None, 3);
        assert_eq!(frame.light_counts[1], MAX_LIGHTS_PER_KIND as u32);
    }

    #[test]
    fn test_object_uniform_flags() {
        let mut scene = Scene::new();
        let g = scene.add_geometry(Geometry::UNIT_BOX);
        let mesh = Mesh::new(g, StandardMaterial::default().with_roughness(0.1)).with_shadows(true, false);
        let uniform = ObjectUniform::new(&Transform::IDENTITY, &mesh);
        assert_eq!(uniform.params, [0.1, 0.0, 0.0, 0.0]);
        assert_eq!(uniform.model, Mat4::IDENTITY.to_cols_array_2d());
        assert_eq!(uniform.color, [1.0, 1.0, 1.0, 1.0]);
    }
}
