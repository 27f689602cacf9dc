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

//! Scene, camera and viewport working together.

use approx::assert_relative_eq;
use umbra_core::math::{Euler, LinearRgba, Vec3, PI};
use umbra_core::scene::{
    DirectionalLight, DirectionalShadow, Geometry, Light, Mesh, Scene, ShadowFrustum,
    StandardMaterial, Transform,
};
use umbra_core::{OrbitControls, OrbitControlsSettings, PerspectiveCamera, Viewport};

fn lit_floor_scene() -> Scene {
    let mut scene = Scene::new();
    let plane = scene.add_geometry(Geometry::Plane {
        width: 500.0,
        height: 500.0,
    });
    scene.add_mesh(
        Transform::from_position(Vec3::new(0.0, -2.0, 0.0)).with_rotation(Euler::new(-PI / 2.0, 0.0, 0.0)),
        Mesh::new(plane, StandardMaterial::default()).with_shadows(false, true),
    );
    let target = scene.add_target(Vec3::ZERO);
    scene.add_light(
        Vec3::new(5.0, 20.0, -5.0),
        Light::Directional(DirectionalLight {
            color: LinearRgba::WHITE,
            intensity: 1.0,
            target,
            cast_shadow: true,
            shadow: DirectionalShadow {
                frustum: ShadowFrustum::symmetric(128.0, 0.1, 100.0),
                map_size: 4096,
                ..Default::default()
            },
        }),
    );
    scene
}

#[test]
fn test_floor_corners_fall_inside_shadow_frustum() {
    let scene = lit_floor_scene();
    let (_, light_node, light) = scene.lights().next().unwrap();
    let Light::Directional(sun) = light else {
        panic!("expected a directional light");
    };
    let target = scene.position_of(sun.target).unwrap();
    let light_view_proj = sun.shadow.view_projection(light_node.transform.position, target);

    let (_, floor, _) = scene.meshes().next().unwrap();
    let model = floor.transform.matrix();
    for corner in [Vec3::new(-50.0, 50.0, 0.0), Vec3::new(50.0, -50.0, 0.0)] {
        let world = model.transform_point3(corner);
        assert_relative_eq!(world.y, -2.0, epsilon = 1e-4);
        let clip = light_view_proj.transform_point3(world);
        assert!(clip.x.abs() <= 1.0 && clip.y.abs() <= 1.0);
        assert!((0.0..=1.0).contains(&clip.z));
    }
}

#[test]
fn test_resize_is_idempotent_and_ignores_pixel_ratio() {
    let mut camera = PerspectiveCamera::new(70.0, 1.0, 0.1, 1000.0);
    camera.look_at(Vec3::new(0.0, 3.0, 15.0), Vec3::ZERO);

    let hi_dpi = Viewport::new(1280.0, 720.0, 2.0);
    camera.set_viewport(&hi_dpi);
    let once = camera;
    camera.set_viewport(&hi_dpi);
    assert_eq!(camera, once);

    camera.set_viewport(&Viewport::new(1280.0, 720.0, 1.0));
    assert_eq!(camera.projection_matrix(), once.projection_matrix());
    assert_eq!(hi_dpi.render_target_size(), (2560, 1440));
}

#[test]
fn test_controls_keep_camera_aimed_at_target() {
    use umbra_core::platform::input::{InputEvent, MouseButton};

    let mut camera = PerspectiveCamera::new(70.0, 16.0 / 9.0, 0.1, 1000.0);
    camera.look_at(Vec3::new(0.0, 3.0, 15.0), Vec3::ZERO);
    let mut controls = OrbitControls::new(Vec3::ZERO, OrbitControlsSettings::default());

    let height = 720.0;
    controls.handle_input(&InputEvent::MouseMoved { x: 10.0, y: 10.0 }, &mut camera, height);
    controls.handle_input(&InputEvent::MouseButtonPressed { button: MouseButton::Left }, &mut camera, height);
    controls.handle_input(&InputEvent::MouseMoved { x: 300.0, y: 40.0 }, &mut camera, height);

    let center = camera.view_projection_matrix().transform_point3(controls.target);
    assert_relative_eq!(center.x, 0.0, epsilon = 1e-4);
    assert_relative_eq!(center.y, 0.0, epsilon = 1e-4);
}
