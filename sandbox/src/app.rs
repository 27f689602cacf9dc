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

use umbra_core::camera::PerspectiveCamera;
use umbra_core::controls::OrbitControls;
use umbra_core::math::Vec3;
use umbra_core::platform::input::InputEvent;
use umbra_core::scene::{NodeId, Scene};
use umbra_core::viewport::Viewport;
use umbra_sdk::Application;

use crate::config::ViewerConfig;
use crate::scene::{build_scene, ViewerScene};

const CAMERA_FOV_DEGREES: f32 = 70.0;
const CAMERA_NEAR: f32 = 0.1;
const CAMERA_FAR: f32 = 1000.0;
const CAMERA_START: Vec3 = Vec3::new(0.0, 3.0, 15.0);

/// Angular speeds in radians per second.
const CUBE_SPIN_X: f32 = -0.2;
const CUBE_SPIN_Z: f32 = 0.11;
const TORUS_SPIN_X: f32 = 0.2;
const TORUS_SPIN_Y: f32 = -0.25;

/// The shadow-scene viewer.
#[derive(Debug)]
pub struct ViewerApp {
    scene: Scene,
    cube: NodeId,
    torus: NodeId,
    camera: PerspectiveCamera,
    controls: OrbitControls,
}

impl ViewerApp {
    pub fn from_config(config: &ViewerConfig, viewport: &Viewport) -> Self {
        let ViewerScene { scene, cube, torus } = build_scene(config.lighting);

        let aspect = viewport.aspect_ratio().unwrap_or(1.0);
        let mut camera = PerspectiveCamera::new(CAMERA_FOV_DEGREES, aspect, CAMERA_NEAR, CAMERA_FAR);
        camera.look_at(CAMERA_START, Vec3::ZERO);
        let controls = OrbitControls::new(Vec3::ZERO, config.controls);

        Self {
            scene,
            cube,
            torus,
            camera,
            controls,
        }
    }

    /// Advances the animation by `delta` seconds.
    pub fn step(&mut self, delta: f32) {
        if let Some(cube) = self.scene.transform_mut(self.cube) {
            cube.rotation.z += CUBE_SPIN_Z * delta;
            cube.rotation.x += CUBE_SPIN_X * delta;
        }
        if let Some(torus) = self.scene.transform_mut(self.torus) {
            torus.rotation.x += TORUS_SPIN_X * delta;
            torus.rotation.y += TORUS_SPIN_Y * delta;
        }
        if self.controls.settings.update_each_frame {
            self.controls.update(&mut self.camera);
        }
    }
}

impl Application for ViewerApp {
    type Config = ViewerConfig;

    fn new(config: ViewerConfig, viewport: &Viewport) -> Self {
        Self::from_config(&config, viewport)
    }

    fn resize(&mut self, viewport: &Viewport) {
        if self.camera.set_viewport(viewport) {
            log::debug!("Camera aspect set to {:.3}", self.camera.aspect_ratio);
        }
    }

    fn update(&mut self, delta: f32) {
        self.step(delta);
    }

    fn on_input(&mut self, event: &InputEvent, viewport: &Viewport) {
        let (_, height) = viewport.render_target_size();
        self.controls.handle_input(event, &mut self.camera, height as f32);
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use umbra_core::math::Euler;
    use umbra_core::platform::input::MouseButton;

    fn app() -> ViewerApp {
        ViewerApp::from_config(&ViewerConfig::default(), &Viewport::new(1280.0, 720.0, 1.0))
    }

    fn rotation(app: &ViewerApp, id: NodeId) -> Euler {
        app.scene.node(id).unwrap().transform.rotation
    }

    #[test]
    fn test_one_second_step() {
        let mut app = app();
        app.step(1.0);
        let cube = rotation(&app, app.cube);
        assert_abs_diff_eq!(cube.x, -0.2);
        assert_abs_diff_eq!(cube.y, 0.0);
        assert_abs_diff_eq!(cube.z, 0.11);
        let torus = rotation(&app, app.torus);
        assert_abs_diff_eq!(torus.x, 0.2);
        assert_abs_diff_eq!(torus.y, -0.25);
        assert_abs_diff_eq!(torus.z, 0.0);
    }

    #[test]
    fn test_step_is_linear_in_delta() {
        for delta in [0.016_f32, 0.5, 3.0] {
            let mut app = app();
            app.step(delta);
            let cube = rotation(&app, app.cube);
            let torus = rotation(&app, app.torus);
            assert_abs_diff_eq!(cube.z, 0.11 * delta, epsilon = 1e-6);
            assert_abs_diff_eq!(cube.x, -0.2 * delta, epsilon = 1e-6);
            assert_abs_diff_eq!(torus.x, 0.2 * delta, epsilon = 1e-6);
            assert_abs_diff_eq!(torus.y, -0.25 * delta, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_step_leaves_everything_else_alone() {
        let mut app = app();
        let before: Vec<_> = app.scene.nodes().map(|(id, n)| (id, n.transform)).collect();
        let camera_before = app.camera.position;
        app.step(1.0);
        for (id, transform) in before {
            if id == app.cube || id == app.torus {
                continue;
            }
            assert_eq!(app.scene.node(id).unwrap().transform, transform);
        }
        assert_eq!(app.camera.position, camera_before);
    }

    #[test]
    fn test_camera_setup() {
        let app = app();
        assert_eq!(app.camera.position, Vec3::new(0.0, 3.0, 15.0));
        assert_eq!(app.camera.target, Vec3::ZERO);
        assert_abs_diff_eq!(app.camera.fov_y_radians, 70.0_f32.to_radians(), epsilon = 1e-6);
        assert_eq!(app.camera.z_near, 0.1);
        assert_eq!(app.camera.z_far, 1000.0);
        assert!(app.controls.settings.enable_damping);
        assert_eq!(app.controls.target, Vec3::ZERO);
    }

    #[test]
    fn test_resize_is_idempotent_and_ignores_pixel_ratio() {
        let mut app = app();
        let viewport = Viewport::new(1920.0, 1080.0, 2.0);
        app.resize(&viewport);
        let first = app.camera.projection_matrix();
        app.resize(&viewport);
        assert_eq!(app.camera.projection_matrix(), first);
        assert_abs_diff_eq!(app.camera.aspect_ratio, 1920.0 / 1080.0);

        app.resize(&Viewport::new(1920.0, 1080.0, 1.0));
        assert_eq!(app.camera.projection_matrix(), first);
    }

    #[test]
    fn test_zero_viewport_keeps_aspect() {
        let mut app = app();
        let aspect = app.camera.aspect_ratio;
        app.resize(&Viewport::new(0.0, 720.0, 1.0));
        assert_eq!(app.camera.aspect_ratio, aspect);
    }

    #[test]
    fn test_drag_orbits_without_frame_update() {
        let mut app = app();
        let viewport = Viewport::new(1280.0, 720.0, 1.0);
        let start = app.camera.position;
        for event in [
            InputEvent::MouseMoved { x: 100.0, y: 100.0 },
            InputEvent::MouseButtonPressed {
                button: MouseButton::Left,
            },
            InputEvent::MouseMoved { x: 160.0, y: 100.0 },
        ] {
            app.on_input(&event, &viewport);
        }
        assert_ne!(app.camera.position, start);
        assert_abs_diff_eq!(app.camera.position.length(), start.length(), epsilon = 1e-3);
        assert_eq!(app.camera.target, Vec3::ZERO);
    }
}
