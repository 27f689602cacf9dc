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

//! Light sources.
//!
//! Lights live in scene nodes: a light's position is its node's translation,
//! and directional and spot lights aim at another node (usually a
//! [`super::NodeKind::Target`]).

use crate::math::{LinearRgba, Mat4, Vec3, PI};

use super::NodeId;

/// Uniform light that reaches every surface equally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    /// Light color in linear space.
    pub color: LinearRgba,
    /// Intensity multiplier.
    pub intensity: f32,
}

/// Sky/ground gradient light.
///
/// Surfaces facing up receive `sky_color`, surfaces facing down receive
/// `ground_color`, blended by the normal's vertical component. Never casts
/// shadows.
///
/// # Examples
///
/// ```
/// use umbra_core::math::LinearRgba;
/// use umbra_core::scene::HemisphereLight;
///
/// let light = HemisphereLight {
///     sky_color: LinearRgba::from_srgb_hex(0xffffff),
///     ground_color: LinearRgba::from_srgb_hex(0xff0000),
///     intensity: 0.1,
/// };
/// assert_eq!(light.irradiance(1.0), LinearRgba::WHITE.scaled(0.1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    /// Color received by upward-facing surfaces.
    pub sky_color: LinearRgba,
    /// Color received by downward-facing surfaces.
    pub ground_color: LinearRgba,
    /// Intensity multiplier.
    pub intensity: f32,
}

impl HemisphereLight {
    /// Irradiance for a normal whose world-space Y component is `normal_y`.
    pub fn irradiance(&self, normal_y: f32) -> LinearRgba {
        let t = 0.5 * normal_y.clamp(-1.0, 1.0) + 0.5;
        let mix = |g: f32, s: f32| (g + (s - g) * t) * self.intensity;
        LinearRgba::rgb(
            mix(self.ground_color.r, self.sky_color.r),
            mix(self.ground_color.g, self.sky_color.g),
            mix(self.ground_color.b, self.sky_color.b),
        )
    }
}

/// An orthographic volume in light view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowFrustum {
    /// Left plane.
    pub left: f32,
    /// Right plane.
    pub right: f32,
    /// Bottom plane.
    pub bottom: f32,
    /// Top plane.
    pub top: f32,
    /// Near plane distance.
    pub near: f32,
    /// Far plane distance.
    pub far: f32,
}

impl ShadowFrustum {
    /// A square frustum spanning `[-half_extent, half_extent]` on both axes.
    pub const fn symmetric(half_extent: f32, near: f32, far: f32) -> Self {
        Self {
            left: -half_extent,
            right: half_extent,
            bottom: -half_extent,
            top: half_extent,
            near,
            far,
        }
    }

    /// The projection matrix of this frustum.
    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic_rh_zo(self.left, self.right, self.bottom, self.top, self.near, self.far)
    }
}

/// Shadow-map settings of a directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalShadow {
    /// The volume rendered into the shadow map.
    pub frustum: ShadowFrustum,
    /// Width and height of the square shadow map in texels.
    pub map_size: u32,
    /// Depth offset subtracted before the comparison.
    pub bias: f32,
    /// World-space offset along the surface normal before projection.
    pub normal_bias: f32,
}

impl Default for DirectionalShadow {
    fn default() -> Self {
        Self {
            frustum: ShadowFrustum::symmetric(5.0, 0.5, 500.0),
            map_size: 512,
            bias: 0.0,
            normal_bias: 0.0,
        }
    }
}

impl DirectionalShadow {
    /// The light-space view-projection for a light at `position` aimed at `target`.
    pub fn view_projection(&self, position: Vec3, target: Vec3) -> Mat4 {
        let view = Mat4::look_at_rh(position, target, Vec3::Y)
            .or_else(|| Mat4::look_at_rh(position, target, Vec3::Z))
            .unwrap_or(Mat4::IDENTITY);
        self.frustum.projection() * view
    }
}

/// Parallel light from an infinitely distant source.
///
/// Its direction runs from the node position towards `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Light color in linear space.
    pub color: LinearRgba,
    /// Intensity multiplier.
    pub intensity: f32,
    /// The node the light points at.
    pub target: NodeId,
    /// Whether the light renders a shadow map.
    pub cast_shadow: bool,
    /// Shadow-map settings.
    pub shadow: DirectionalShadow,
}

/// Omnidirectional light from a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Light color in linear space.
    pub color: LinearRgba,
    /// Intensity multiplier.
    pub intensity: f32,
    /// Distance where the light fades to zero; `0.0` means unlimited.
    pub range: f32,
    /// Falloff exponent.
    pub decay: f32,
    /// Recorded shadow request. Only directional lights render shadow maps.
    pub cast_shadow: bool,
}

impl PointLight {
    /// A light with inverse-square falloff.
    pub fn new(color: LinearRgba, intensity: f32, range: f32) -> Self {
        Self {
            color,
            intensity,
            range,
            decay: 2.0,
            cast_shadow: false,
        }
    }
}

/// A cone of light from a point towards a target node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    /// Light color in linear space.
    pub color: LinearRgba,
    /// Intensity multiplier.
    pub intensity: f32,
    /// Distance where the light fades to zero; `0.0` means unlimited.
    pub range: f32,
    /// Half-angle of the cone in radians, at most π/2.
    pub angle: f32,
    /// Fraction of the cone that is attenuated, in `[0, 1]`.
    pub penumbra: f32,
    /// Falloff exponent.
    pub decay: f32,
    /// The node the light points at.
    pub target: NodeId,
    /// Recorded shadow request. Only directional lights render shadow maps.
    pub cast_shadow: bool,
}

impl SpotLight {
    /// Cosine of the outer cone edge.
    pub fn cone_cos(&self) -> f32 {
        self.angle.clamp(0.0, PI / 2.0).cos()
    }

    /// Cosine of the edge where the penumbra starts.
    pub fn penumbra_cos(&self) -> f32 {
        (self.angle.clamp(0.0, PI / 2.0) * (1.0 - self.penumbra.clamp(0.0, 1.0))).cos()
    }
}

/// Any light the scene can hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// See [`AmbientLight`].
    Ambient(AmbientLight),
    /// See [`HemisphereLight`].
    Hemisphere(HemisphereLight),
    /// See [`DirectionalLight`].
    Directional(DirectionalLight),
    /// See [`PointLight`].
    Point(PointLight),
    /// See [`SpotLight`].
    Spot(SpotLight),
}

impl Light {
    /// Whether the light asked to cast shadows.
    pub fn casts_shadow(&self) -> bool {
        match self {
            Light::Directional(l) => l.cast_shadow,
            Light::Point(l) => l.cast_shadow,
            Light::Spot(l) => l.cast_shadow,
            Light::Ambient(_) | Light::Hemisphere(_) => false,
        }
    }

    /// The node this light aims at, if it has one.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Light::Directional(l) => Some(l.target),
            Light::Spot(l) => Some(l.target),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_hemisphere_blend() {
        let light = HemisphereLight {
            sky_color: LinearRgba::WHITE,
            ground_color: LinearRgba::RED,
            intensity: 0.1,
        };
        assert_eq!(light.irradiance(-1.0), LinearRgba::RED.scaled(0.1));
        let side = light.irradiance(0.0);
        assert_abs_diff_eq!(side.r, 0.1, epsilon = 1e-6);
        assert_abs_diff_eq!(side.g, 0.05, epsilon = 1e-6);
    }

    #[test]
    fn test_shadow_view_projection_keeps_target_in_depth_range() {
        let shadow = DirectionalShadow {
            frustum: ShadowFrustum::symmetric(128.0, 0.1, 100.0),
            map_size: 4096,
            ..Default::default()
        };
        let position = Vec3::new(5.0, 20.0, -5.0);
        let p = shadow.view_projection(position, Vec3::ZERO).transform_point3(Vec3::ZERO);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-5);
        let expected = (position.length() - 0.1) / (100.0 - 0.1);
        assert_abs_diff_eq!(p.z, expected, epsilon = 1e-4);
    }

    #[test]
    fn test_shadow_view_projection_straight_down() {
        let shadow = DirectionalShadow::default();
        let m = shadow.view_projection(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO);
        let p = m.transform_point3(Vec3::ZERO);
        assert!(p.z > 0.0 && p.z < 1.0);
    }

    #[test]
    fn test_spot_cone() {
        let spot = SpotLight {
            color: LinearRgba::WHITE,
            intensity: 20.0,
            range: 20.0,
            angle: PI / 6.0,
            penumbra: 0.9,
            decay: 2.0,
            target: NodeId(0),
            cast_shadow: true,
        };
        assert_abs_diff_eq!(spot.cone_cos(), (PI / 6.0).cos());
        assert!(spot.penumbra_cos() > spot.cone_cos());
        assert!(Light::Spot(spot).casts_shadow());
        assert_eq!(Light::Spot(spot).target(), Some(NodeId(0)));
    }
}
