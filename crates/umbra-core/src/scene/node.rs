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

use crate::math::{Euler, Mat4, Vec3};

use super::{GeometryHandle, Light, StandardMaterial};

/// A stable handle to a node inside a [`super::Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The index of the node in insertion order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Position, rotation and scale of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation in world units.
    pub position: Vec3,
    /// Rotation angles in radians.
    pub rotation: Euler,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, rotation or scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Euler::ZERO,
        scale: Vec3::ONE,
    };

    /// A transform with only a translation.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Builder-style rotation override.
    pub fn with_rotation(mut self, rotation: Euler) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder-style scale override.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// The local-to-world matrix, `T * R * S`.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_euler(self.rotation) * Mat4::from_scale(self.scale)
    }

    /// The matrix that carries object-space normals into world space.
    ///
    /// For `T * R * S` the inverse-transpose of the linear part is
    /// `R * S^-1`. A zero scale axis collapses to zero.
    pub fn normal_matrix(&self) -> Mat4 {
        let inv = |s: f32| if s != 0.0 { 1.0 / s } else { 0.0 };
        let inv_scale = Vec3::new(inv(self.scale.x), inv(self.scale.y), inv(self.scale.z));
        Mat4::from_euler(self.rotation) * Mat4::from_scale(inv_scale)
    }
}

/// A drawable object: a shared geometry plus its own material and shadow flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// The geometry this mesh draws.
    pub geometry: GeometryHandle,
    /// Surface parameters.
    pub material: StandardMaterial,
    /// Whether the mesh is drawn into shadow maps.
    pub cast_shadow: bool,
    /// Whether the mesh is darkened by shadow maps.
    pub receive_shadow: bool,
}

impl Mesh {
    /// A mesh that neither casts nor receives shadows.
    pub fn new(geometry: GeometryHandle, material: StandardMaterial) -> Self {
        Self {
            geometry,
            material,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    /// Sets both shadow flags.
    pub fn with_shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
        self
    }
}

/// What a node represents.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A renderable mesh.
    Mesh(Mesh),
    /// A light source. Its position comes from the node transform.
    Light(Light),
    /// An empty transform, used as an aim point.
    Target,
}

/// An entry in the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Optional debug name.
    pub name: Option<String>,
    /// Placement in the world.
    pub transform: Transform,
    /// The node payload.
    pub kind: NodeKind,
}

impl Node {
    /// Creates a node with the given transform and payload.
    pub fn new(transform: Transform, kind: NodeKind) -> Self {
        Self {
            name: None,
            transform,
            kind,
        }
    }

    /// Attaches a debug name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The mesh payload, if this is a mesh node.
    pub fn as_mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// The light payload, if this is a light node.
    pub fn as_light(&self) -> Option<&Light> {
        match &self.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }
}
