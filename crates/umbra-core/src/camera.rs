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

//! The perspective camera the viewer renders through.

use crate::math::{degrees_to_radians, Mat4, Vec3};
use crate::viewport::Viewport;

/// A perspective camera with a position and a look-at target.
///
/// The projection matrix is cached; changing `aspect_ratio` or the clip
/// planes requires a call to [`PerspectiveCamera::update_projection_matrix`],
/// which [`PerspectiveCamera::set_viewport`] does on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// The vertical field of view in radians.
    pub fov_y_radians: f32,
    /// The aspect ratio of the viewport (width / height).
    pub aspect_ratio: f32,
    /// The distance to the near clipping plane.
    pub z_near: f32,
    /// The distance to the far clipping plane.
    pub z_far: f32,
    /// World-space position of the eye.
    pub position: Vec3,
    /// World-space point the camera looks at.
    pub target: Vec3,
    /// World-space up direction.
    pub up: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    /// Creates a camera at the origin looking down -Z.
    pub fn new(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        let mut camera = Self {
            fov_y_radians: degrees_to_radians(fov_y_degrees),
            aspect_ratio,
            z_near,
            z_far,
            position: Vec3::ZERO,
            target: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Moves the camera to `position` and aims it at `target`.
    pub fn look_at(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
    }

    /// Recomputes the cached projection matrix from the current parameters.
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh_zo(self.fov_y_radians, self.aspect_ratio, self.z_near, self.z_far);
    }

    /// Adopts the aspect ratio of `viewport` and recomputes the projection.
    ///
    /// Returns `false` and leaves the camera untouched for an empty viewport.
    pub fn set_viewport(&mut self, viewport: &Viewport) -> bool {
        match viewport.aspect_ratio() {
            Some(aspect) => {
                self.aspect_ratio = aspect;
                self.update_projection_matrix();
                true
            }
            None => false,
        }
    }

    /// The cached projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// The world-to-view matrix.
    ///
    /// Falls back to a pure translation when the camera sits on its target.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
            .unwrap_or_else(|| Mat4::from_translation(-self.position))
    }

    /// Projection times view.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Unit vector from the eye towards the target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Unit vector pointing to the right of the view direction.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }

    /// The camera's own up vector, orthogonal to `forward` and `right`.
    pub fn local_up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(70.0, 1.0, 0.1, 1000.0);
        camera.look_at(Vec3::new(0.0, 3.0, 15.0), Vec3::ZERO);
        camera
    }

    #[test]
    fn test_set_viewport_updates_projection() {
        let mut cam = camera();
        assert!(cam.set_viewport(&Viewport::new(1920.0, 1080.0, 2.0)));
        assert_relative_eq!(cam.aspect_ratio, 1920.0 / 1080.0);
        let expected = Mat4::perspective_rh_zo(cam.fov_y_radians, 1920.0 / 1080.0, 0.1, 1000.0);
        assert_eq!(cam.projection_matrix(), expected);
    }

    #[test]
    fn test_empty_viewport_is_ignored() {
        let mut cam = camera();
        let before = cam;
        assert!(!cam.set_viewport(&Viewport::new(0.0, 600.0, 1.0)));
        assert_eq!(cam, before);
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let cam = camera();
        let p = cam.view_projection_matrix().transform_point3(Vec3::ZERO);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-5);
        assert!(p.z > 0.0 && p.z < 1.0);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let cam = camera();
        assert_relative_eq!(cam.forward().dot(cam.right()), 0.0, epsilon = 1e-6);
        assert_relative_eq!(cam.forward().dot(cam.local_up()), 0.0, epsilon = 1e-6);
        assert_relative_eq!(cam.local_up().length(), 1.0, epsilon = 1e-6);
        assert!(cam.local_up().y > 0.0);
    }

    #[test]
    fn test_degenerate_view_falls_back() {
        let mut cam = camera();
        cam.look_at(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(cam.view_matrix(), Mat4::from_translation(Vec3::new(-1.0, -2.0, -3.0)));
    }
}
