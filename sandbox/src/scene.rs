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

//! The static shadow test scene.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_6};

use serde::{Deserialize, Serialize};
use umbra_core::math::{Euler, LinearRgba, Vec3};
use umbra_core::scene::{
    AmbientLight, DirectionalLight, DirectionalShadow, Geometry, HemisphereLight, Light, Mesh,
    Node, NodeId, NodeKind, PointLight, Scene, ShadowFrustum, SpotLight, StandardMaterial,
    Transform,
};

/// Which lights the scene is lit with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LightingRig {
    /// Dim red-tinted hemisphere fill plus a shadow-casting sun.
    #[default]
    HemisphereDirectional,
    /// Flat white ambient light only.
    Ambient,
    /// A single spot light above the cube and torus.
    Spot,
    /// A single point light just above the floor.
    Point,
}

/// Half-size of the sun's shadow frustum.
const SUN_SHADOW_EXTENT: f32 = 128.0;

/// The scene plus handles to the nodes that animate.
#[derive(Debug)]
pub struct ViewerScene {
    pub scene: Scene,
    pub cube: NodeId,
    pub torus: NodeId,
}

pub fn build_scene(rig: LightingRig) -> ViewerScene {
    let mut scene = Scene::new();
    scene.background = LinearRgba::BLACK;

    add_lights(&mut scene, rig);

    let floor_material = StandardMaterial::default()
        .with_color(LinearRgba::from_srgb_hex(0xffffff))
        .with_roughness(0.5)
        .with_metalness(0.5);

    let floor_geo = scene.add_geometry(Geometry::Plane {
        width: 500.0,
        height: 500.0,
    });
    scene.add(
        Node::new(
            Transform::from_position(Vec3::new(0.0, -2.0, 0.0))
                .with_rotation(Euler::new(-FRAC_PI_2, 0.0, 0.0)),
            NodeKind::Mesh(Mesh::new(floor_geo, floor_material).with_shadows(false, true)),
        )
        .named("floor"),
    );

    let wall_geo = scene.add_geometry(Geometry::Box {
        width: 1.0,
        height: 4.0,
        depth: 10.0,
    });
    let wall_material = floor_material.with_color(LinearRgba::rgb(0.5, 0.5, 1.0));
    // Left wall casts only, right wall also receives.
    for (x, receive) in [(-8.0, false), (8.0, true)] {
        scene.add(
            Node::new(
                Transform::from_position(Vec3::new(x, 0.0, 0.0)),
                NodeKind::Mesh(Mesh::new(wall_geo, wall_material).with_shadows(true, receive)),
            )
            .named("wall"),
        );
    }

    let cube_geo = scene.add_geometry(Geometry::UNIT_BOX);
    let cube = scene.add(
        Node::new(
            Transform::from_position(Vec3::new(-3.0, 0.0, 3.0)),
            NodeKind::Mesh(
                Mesh::new(
                    cube_geo,
                    floor_material
                        .with_color(LinearRgba::rgb(1.0, 1.0, 0.5))
                        .with_roughness(0.1),
                )
                .with_shadows(true, true),
            ),
        )
        .named("cube"),
    );

    let torus_geo = scene.add_geometry(Geometry::torus_knot(1.0, 0.3, 100, 16));
    let torus = scene.add(
        Node::new(
            Transform::from_position(Vec3::new(3.0, 0.0, 3.0)),
            NodeKind::Mesh(
                Mesh::new(torus_geo, floor_material.with_color(LinearRgba::rgb(1.0, 0.5, 0.5)))
                    .with_shadows(true, true),
            ),
        )
        .named("torus"),
    );

    let pillar_material = floor_material.with_color(LinearRgba::rgb(0.5, 1.0, 0.5));
    for x in -5..=5 {
        scene.add(
            Node::new(
                Transform::from_position(Vec3::new(x as f32 * 20.0, 3.0, 0.0))
                    .with_scale(Vec3::new(2.0, 10.0, 2.0)),
                NodeKind::Mesh(Mesh::new(cube_geo, pillar_material).with_shadows(true, true)),
            )
            .named("pillar"),
        );
    }

    log::info!(
        "Scene built: {} nodes, {} geometries, {:?} lighting",
        scene.len(),
        scene.geometries().count(),
        rig
    );
    ViewerScene { scene, cube, torus }
}

fn add_lights(scene: &mut Scene, rig: LightingRig) {
    let white = LinearRgba::from_srgb_hex(0xffffff);
    match rig {
        LightingRig::HemisphereDirectional => {
            scene.add_light(
                Vec3::ZERO,
                Light::Hemisphere(HemisphereLight {
                    sky_color: white,
                    ground_color: LinearRgba::from_srgb_hex(0xff0000),
                    intensity: 0.1,
                }),
            );
            let target = scene.add_target(Vec3::ZERO);
            scene.add_light(
                Vec3::new(5.0, 20.0, -5.0),
                Light::Directional(DirectionalLight {
                    color: white,
                    intensity: 1.0,
                    target,
                    cast_shadow: true,
                    shadow: DirectionalShadow {
                        frustum: ShadowFrustum::symmetric(SUN_SHADOW_EXTENT, 0.1, 100.0),
                        map_size: 4096,
                        ..Default::default()
                    },
                }),
            );
        }
        LightingRig::Ambient => {
            scene.add_light(
                Vec3::ZERO,
                Light::Ambient(AmbientLight {
                    color: white,
                    intensity: 0.1,
                }),
            );
        }
        LightingRig::Spot => {
            let target = scene.add_target(Vec3::ZERO);
            scene.add_light(
                Vec3::new(5.0, 5.0, 5.0),
                Light::Spot(SpotLight {
                    color: white,
                    intensity: 20.0,
                    range: 20.0,
                    angle: FRAC_PI_6,
                    penumbra: 0.9,
                    decay: 2.0,
                    target,
                    cast_shadow: true,
                }),
            );
        }
        LightingRig::Point => {
            let mut point = PointLight::new(white, 10.0, 100.0);
            point.cast_shadow = true;
            scene.add_light(Vec3::new(0.0, 2.0, 0.0), Light::Point(point));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(scene: &Scene, name: &str) -> usize {
        scene
            .nodes()
            .filter(|(_, node)| node.name.as_deref() == Some(name))
            .count()
    }

    #[test]
    fn test_default_scene_counts() {
        let ViewerScene { scene, .. } = build_scene(LightingRig::default());
        let lights: Vec<_> = scene.lights().map(|(_, _, l)| *l).collect();
        assert_eq!(lights.len(), 2);
        assert_eq!(lights.iter().filter(|l| matches!(l, Light::Hemisphere(_))).count(), 1);
        assert_eq!(lights.iter().filter(|l| matches!(l, Light::Directional(_))).count(), 1);
        assert_eq!(scene.target_count(), 1);
        assert_eq!(named(&scene, "floor"), 1);
        assert_eq!(named(&scene, "wall"), 2);
        assert_eq!(named(&scene, "cube"), 1);
        assert_eq!(named(&scene, "torus"), 1);
        assert_eq!(named(&scene, "pillar"), 11);
        assert_eq!(scene.meshes().count(), 16);
        assert_eq!(scene.len(), 19);
    }

    #[test]
    fn test_shadow_flags() {
        let ViewerScene { scene, cube, torus } = build_scene(LightingRig::default());
        let flags: Vec<_> = scene
            .meshes()
            .map(|(_, node, mesh)| (node.name.clone().unwrap_or_default(), mesh.cast_shadow, mesh.receive_shadow))
            .collect();
        assert_eq!(flags[0], ("floor".to_string(), false, true));
        assert_eq!(flags[1], ("wall".to_string(), true, false));
        assert_eq!(flags[2], ("wall".to_string(), true, true));
        assert!(flags[3..].iter().all(|(_, cast, receive)| *cast && *receive));

        for id in [cube, torus] {
            let mesh = scene.node(id).and_then(Node::as_mesh).unwrap();
            assert!(mesh.cast_shadow && mesh.receive_shadow);
        }
    }

    #[test]
    fn test_sun_settings() {
        let ViewerScene { scene, .. } = build_scene(LightingRig::HemisphereDirectional);
        let (id, node, light) = scene
            .lights()
            .find(|(_, _, l)| matches!(l, Light::Directional(_)))
            .unwrap();
        let Light::Directional(sun) = light else { unreachable!() };
        assert_eq!(node.transform.position, Vec3::new(5.0, 20.0, -5.0));
        assert_eq!(scene.position_of(sun.target), Some(Vec3::ZERO));
        assert!(sun.cast_shadow);
        assert_eq!(sun.shadow.map_size, 4096);
        assert_eq!(sun.shadow.frustum.left, -128.0);
        assert_eq!(sun.shadow.frustum.top, 128.0);
        assert_eq!(sun.shadow.frustum.near, 0.1);
        assert_eq!(sun.shadow.frustum.far, 100.0);
        assert!(scene.light_direction(id).is_some());
    }

    #[test]
    fn test_object_placement() {
        let ViewerScene { scene, cube, torus } = build_scene(LightingRig::default());
        assert_eq!(scene.position_of(cube), Some(Vec3::new(-3.0, 0.0, 3.0)));
        assert_eq!(scene.position_of(torus), Some(Vec3::new(3.0, 0.0, 3.0)));

        let pillars: Vec<_> = scene
            .nodes()
            .filter(|(_, n)| n.name.as_deref() == Some("pillar"))
            .map(|(_, n)| n.transform)
            .collect();
        assert_eq!(pillars.first().map(|t| t.position.x), Some(-100.0));
        assert_eq!(pillars.last().map(|t| t.position.x), Some(100.0));
        assert!(pillars.iter().all(|t| t.scale == Vec3::new(2.0, 10.0, 2.0) && t.position.y == 3.0));
    }

    #[test]
    fn test_materials_derive_from_floor() {
        let ViewerScene { scene, cube, .. } = build_scene(LightingRig::default());
        let cube_material = scene.node(cube).and_then(Node::as_mesh).unwrap().material;
        assert_eq!(cube_material.roughness, 0.1);
        assert_eq!(cube_material.metalness, 0.5);
        assert_eq!(cube_material.color, LinearRgba::rgb(1.0, 1.0, 0.5));

        let floor = scene
            .meshes()
            .find(|(_, n, _)| n.name.as_deref() == Some("floor"))
            .unwrap()
            .2
            .material;
        assert_eq!(floor.color, LinearRgba::WHITE);
        assert_eq!(floor.roughness, 0.5);
    }

    #[test]
    fn test_alternate_rigs() {
        let ambient = build_scene(LightingRig::Ambient).scene;
        assert_eq!(ambient.lights().count(), 1);
        assert_eq!(ambient.target_count(), 0);

        let spot = build_scene(LightingRig::Spot).scene;
        let (_, _, light) = spot.lights().next().unwrap();
        assert!(matches!(light, Light::Spot(s) if s.cast_shadow && s.angle == FRAC_PI_6));
        assert_eq!(spot.target_count(), 1);

        let point = build_scene(LightingRig::Point).scene;
        let (_, node, light) = point.lights().next().unwrap();
        assert!(matches!(light, Light::Point(p) if p.range == 100.0));
        assert_eq!(node.transform.position, Vec3::new(0.0, 2.0, 0.0));
    }
}
