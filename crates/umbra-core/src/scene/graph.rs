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

use crate::math::{LinearRgba, Vec3};

use super::{Geometry, GeometryHandle, Light, Mesh, Node, NodeId, NodeKind, Transform};

/// The full set of nodes and geometries drawn each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Clear color behind all geometry.
    pub background: LinearRgba,
    nodes: Vec<Node>,
    geometries: Vec<Geometry>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// An empty scene with a black background.
    pub fn new() -> Self {
        Self {
            background: LinearRgba::BLACK,
            nodes: Vec::new(),
            geometries: Vec::new(),
        }
    }

    /// Registers a geometry so meshes can share it.
    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryHandle {
        self.geometries.push(geometry);
        GeometryHandle(self.geometries.len() as u32 - 1)
    }

    /// Looks up a registered geometry.
    pub fn geometry(&self, handle: GeometryHandle) -> Option<&Geometry> {
        self.geometries.get(handle.index())
    }

    /// All registered geometries with their handles.
    pub fn geometries(&self) -> impl Iterator<Item = (GeometryHandle, &Geometry)> {
        self.geometries
            .iter()
            .enumerate()
            .map(|(i, g)| (GeometryHandle(i as u32), g))
    }

    /// Adds a node and returns its handle.
    pub fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() as u32 - 1)
    }

    /// Adds an empty target node at `position`.
    pub fn add_target(&mut self, position: Vec3) -> NodeId {
        self.add(Node::new(Transform::from_position(position), NodeKind::Target))
    }

    /// Adds a mesh node.
    pub fn add_mesh(&mut self, transform: Transform, mesh: Mesh) -> NodeId {
        self.add(Node::new(transform, NodeKind::Mesh(mesh)))
    }

    /// Adds a light node at `position`.
    ///
    /// A directional or spot light whose target sits on `position` has no
    /// direction and is skipped when rendering; this is logged as a warning.
    pub fn add_light(&mut self, position: Vec3, light: Light) -> NodeId {
        let id = self.add(Node::new(Transform::from_position(position), NodeKind::Light(light)));
        if light.target().is_some() && self.light_direction(id).is_none() {
            log::warn!("Light {} has no usable aim and will not contribute", id.index());
        }
        id
    }

    /// Looks up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Looks up a node for mutation.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// The transform of a node, if it exists.
    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.node_mut(id).map(|n| &mut n.transform)
    }

    /// World position of a node.
    pub fn position_of(&self, id: NodeId) -> Option<Vec3> {
        self.node(id).map(|n| n.transform.position)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` if the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes with their handles, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// All mesh nodes.
    pub fn meshes(&self) -> impl Iterator<Item = (NodeId, &Node, &Mesh)> {
        self.nodes()
            .filter_map(|(id, node)| node.as_mesh().map(|mesh| (id, node, mesh)))
    }

    /// All light nodes.
    pub fn lights(&self) -> impl Iterator<Item = (NodeId, &Node, &Light)> {
        self.nodes()
            .filter_map(|(id, node)| node.as_light().map(|light| (id, node, light)))
    }

    /// Number of target nodes.
    pub fn target_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Target))
            .count()
    }

    /// The world-space direction from a light node to its target.
    ///
    /// Returns `None` for lights without a target or when the target sits on
    /// the light.
    pub fn light_direction(&self, light: NodeId) -> Option<Vec3> {
        let node = self.node(light)?;
        let target = self.position_of(node.as_light()?.target()?)?;
        let dir = (target - node.transform.position).normalize();
        (dir != Vec3::ZERO).then_some(dir)
    }
}
