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

//! Orbit camera controls.
//!
//! The camera circles a target point on a sphere. Left-drag rotates,
//! right- or middle-drag pans, and the wheel dollies in and out. With damping
//! enabled each [`OrbitControls::update`] applies only a fraction of the
//! pending motion and keeps the rest for later updates.

use serde::{Deserialize, Serialize};

use crate::camera::PerspectiveCamera;
use crate::math::{Vec3, EPSILON, PI};
use crate::platform::input::{InputEvent, MouseButton};

/// Polar angles closer than this to a pole are clamped away from it.
const POLE_MARGIN: f32 = 1e-4;

/// Tunables for [`OrbitControls`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitControlsSettings {
    /// Smooth motion over several updates.
    pub enable_damping: bool,
    /// Share of the pending motion applied per update when damping.
    pub damping_factor: f32,
    /// Rotation speed multiplier.
    pub rotate_speed: f32,
    /// Dolly speed multiplier.
    pub zoom_speed: f32,
    /// Pan speed multiplier.
    pub pan_speed: f32,
    /// Closest the camera may get to the target.
    pub min_distance: f32,
    /// Farthest the camera may get from the target.
    pub max_distance: f32,
    /// Whether the frame loop calls `update` every frame.
    pub update_each_frame: bool,
}

impl Default for OrbitControlsSettings {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            update_each_frame: false,
        }
    }
}

/// Spherical coordinates around a target, Y up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Spherical {
    radius: f32,
    /// Azimuth around Y, measured from +Z towards +X.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius < EPSILON {
            return Self {
                radius,
                theta: 0.0,
                phi: PI / 2.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    Rotate,
    Pan,
}

/// Pointer-driven orbit controls for a [`PerspectiveCamera`].
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Tunables.
    pub settings: OrbitControlsSettings,
    /// The point the camera orbits.
    pub target: Vec3,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
    drag: Option<Drag>,
    cursor: Option<(f32, f32)>,
}

impl OrbitControls {
    /// Controls orbiting `target`.
    pub fn new(target: Vec3, settings: OrbitControlsSettings) -> Self {
        Self {
            settings,
            target,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            drag: None,
            cursor: None,
        }
    }

    /// Feeds one input event. Motion is applied immediately through
    /// [`OrbitControls::update`]; returns whether the camera moved.
    ///
    /// `viewport_height` is in the same physical pixels as cursor positions.
    pub fn handle_input(
        &mut self,
        event: &InputEvent,
        camera: &mut PerspectiveCamera,
        viewport_height: f32,
    ) -> bool {
        match *event {
            InputEvent::MouseButtonPressed { button } => {
                self.drag = match button {
                    MouseButton::Left => Some(Drag::Rotate),
                    MouseButton::Right | MouseButton::Middle => Some(Drag::Pan),
                    _ => self.drag,
                };
                false
            }
            InputEvent::MouseButtonReleased { .. } => {
                self.drag = None;
                false
            }
            InputEvent::CursorLeft => {
                self.drag = None;
                self.cursor = None;
                false
            }
            InputEvent::MouseMoved { x, y } => {
                let previous = self.cursor.replace((x, y));
                let (Some(drag), Some((px, py))) = (self.drag, previous) else {
                    return false;
                };
                if viewport_height <= 0.0 {
                    return false;
                }
                let (dx, dy) = (x - px, y - py);
                match drag {
                    Drag::Rotate => self.rotate(dx, dy, viewport_height),
                    Drag::Pan => self.pan(dx, dy, camera, viewport_height),
                }
                self.update(camera)
            }
            InputEvent::MouseWheelScrolled { delta_y, .. } => {
                if delta_y == 0.0 {
                    return false;
                }
                self.dolly(delta_y);
                self.update(camera)
            }
        }
    }

    /// Rotates by a pointer delta in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let k = 2.0 * PI * self.settings.rotate_speed / viewport_height;
        self.delta_theta -= k * dx;
        self.delta_phi -= k * dy;
    }

    /// Pans by a pointer delta in pixels, so that the point under the target
    /// follows the cursor.
    pub fn pan(&mut self, dx: f32, dy: f32, camera: &PerspectiveCamera, viewport_height: f32) {
        let distance = (camera.position - self.target).length() * (camera.fov_y_radians * 0.5).tan();
        let k = 2.0 * distance * self.settings.pan_speed / viewport_height;
        self.pan_offset += camera.right() * (-k * dx) + camera.local_up() * (k * dy);
    }

    /// Dollies by `notches` wheel steps; positive values move closer.
    pub fn dolly(&mut self, notches: f32) {
        let step = 0.95_f32.powf(self.settings.zoom_speed * notches.abs());
        if notches > 0.0 {
            self.scale *= step;
        } else {
            self.scale /= step;
        }
    }

    /// Applies pending motion to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let settings = self.settings;
        let share = if settings.enable_damping {
            settings.damping_factor
        } else {
            1.0
        };

        let mut spherical = Spherical::from_offset(camera.position - self.target);
        spherical.theta += self.delta_theta * share;
        spherical.phi = (spherical.phi + self.delta_phi * share).clamp(POLE_MARGIN, PI - POLE_MARGIN);
        // Inverted bounds resolve to `max_distance`.
        spherical.radius = (spherical.radius * self.scale)
            .max(settings.min_distance)
            .min(settings.max_distance);
        self.target += self.pan_offset * share;

        let position = self.target + spherical.to_offset();
        let moved = position.distance(camera.position) > EPSILON || camera.target != self.target;
        camera.look_at(position, self.target);

        if settings.enable_damping {
            let keep = 1.0 - settings.damping_factor;
            self.delta_theta *= keep;
            self.delta_phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;
        moved
    }
}
