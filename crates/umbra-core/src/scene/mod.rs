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

//! The static scene graph rendered by the viewer.
//!
//! A [`Scene`] is a flat list of [`Node`]s addressed by [`NodeId`] plus a
//! table of shared [`Geometry`] descriptors. Nodes hold a [`Transform`] and
//! are either meshes, lights, or empty targets that lights aim at.

mod geometry;
mod graph;
mod light;
mod material;
mod node;

pub use self::geometry::{Geometry, GeometryHandle, MeshData, Vertex};
pub use self::graph::Scene;
pub use self::light::{
    AmbientLight, DirectionalLight, DirectionalShadow, HemisphereLight, Light, PointLight,
    ShadowFrustum, SpotLight,
};
pub use self::material::StandardMaterial;
pub use self::node::{Mesh, Node, NodeId, NodeKind, Transform};
