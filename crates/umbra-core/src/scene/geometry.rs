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

//! Procedural geometry descriptors and their tessellation.

use crate::math::{Vec3, PI};

/// An index into a scene's geometry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryHandle(pub(crate) u32);

impl GeometryHandle {
    /// The index of the geometry in insertion order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single vertex as laid out in GPU vertex buffers.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space unit normal.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

impl Vertex {
    fn new(position: Vec3, normal: Vec3, uv: [f32; 2]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv,
        }
    }
}

/// An indexed triangle list. Front faces wind counter-clockwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex attributes.
    pub vertices: Vec<Vertex>,
    /// Triangle indices, three per face.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of triangles in the list.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A procedural shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// A single quad in the XY plane, facing +Z.
    Plane {
        /// Extent along X.
        width: f32,
        /// Extent along Y.
        height: f32,
    },
    /// An axis-aligned box centered on the origin.
    Box {
        /// Extent along X.
        width: f32,
        /// Extent along Y.
        height: f32,
        /// Extent along Z.
        depth: f32,
    },
    /// A tube swept along a (p, q) torus knot.
    TorusKnot {
        /// Radius of the underlying torus.
        radius: f32,
        /// Radius of the tube.
        tube: f32,
        /// Segments along the knot curve.
        tubular_segments: u32,
        /// Segments around the tube.
        radial_segments: u32,
        /// Windings around the torus axis of rotational symmetry.
        p: u32,
        /// Windings around the torus interior circle.
        q: u32,
    },
}

impl Geometry {
    /// A unit cube.
    pub const UNIT_BOX: Self = Self::Box {
        width: 1.0,
        height: 1.0,
        depth: 1.0,
    };

    /// A torus knot with the usual trefoil windings (`p = 2`, `q = 3`).
    pub fn torus_knot(radius: f32, tube: f32, tubular_segments: u32, radial_segments: u32) -> Self {
        Self::TorusKnot {
            radius,
            tube,
            tubular_segments,
            radial_segments,
            p: 2,
            q: 3,
        }
    }

    /// Builds the vertex and index lists for this shape.
    pub fn tessellate(&self) -> MeshData {
        match *self {
            Self::Plane { width, height } => plane(width, height),
            Self::Box {
                width,
                height,
                depth,
            } => cuboid(Vec3::new(width, height, depth)),
            Self::TorusKnot {
                radius,
                tube,
                tubular_segments,
                radial_segments,
                p,
                q,
            } => torus_knot(
                radius,
                tube,
                tubular_segments.max(3),
                radial_segments.max(3),
                p.max(1),
                q,
            ),
        }
    }
}

fn plane(width: f32, height: f32) -> MeshData {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let vertices = [(-hw, hh, [0.0, 1.0]), (hw, hh, [1.0, 1.0]), (-hw, -hh, [0.0, 0.0]), (hw, -hh, [1.0, 0.0])]
        .into_iter()
        .map(|(x, y, uv)| Vertex::new(Vec3::new(x, y, 0.0), Vec3::Z, uv))
        .collect();
    MeshData {
        vertices,
        indices: vec![0, 2, 1, 2, 3, 1],
    }
}

fn cuboid(size: Vec3) -> MeshData {
    let half = size * 0.5;
    // (normal, u, v) with u x v = normal, so the corner order below is CCW.
    let faces = [
        (Vec3::X, -Vec3::Z, Vec3::Y),
        (-Vec3::X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, -Vec3::Z),
        (-Vec3::Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (-Vec3::Z, -Vec3::X, Vec3::Y),
    ];

    let mut mesh = MeshData {
        vertices: Vec::with_capacity(24),
        indices: Vec::with_capacity(36),
    };
    for (normal, u, v) in faces {
        let center = normal.mul_elem(half);
        let du = u.mul_elem(half);
        let dv = v.mul_elem(half);
        let base = mesh.vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = center + du * su + dv * sv;
            let uv = [(su + 1.0) * 0.5, (1.0 - sv) * 0.5];
            mesh.vertices.push(Vertex::new(position, normal, uv));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

fn knot_point(u: f32, p: f32, q: f32, radius: f32) -> Vec3 {
    let qu_over_p = q / p * u;
    let cs = qu_over_p.cos();
    Vec3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * u.sin() * 0.5,
        radius * qu_over_p.sin() * 0.5,
    )
}

fn torus_knot(radius: f32, tube: f32, tubular: u32, radial: u32, p: u32, q: u32) -> MeshData {
    let (pf, qf) = (p as f32, q as f32);
    let ring = radial + 1;
    let mut mesh = MeshData {
        vertices: Vec::with_capacity(((tubular + 1) * ring) as usize),
        indices: Vec::with_capacity((tubular * radial * 6) as usize),
    };

    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * pf * PI * 2.0;
        let p1 = knot_point(u, pf, qf, radius);
        let p2 = knot_point(u + 0.01, pf, qf, radius);

        // Approximate Frenet frame from two nearby curve samples.
        let t = p2 - p1;
        let n = p2 + p1;
        let b = t.cross(n);
        let n = b.cross(t).normalize();
        let b = b.normalize();

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * PI * 2.0;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let position = p1 + n * cx + b * cy;
            let normal = (position - p1).normalize();
            let uv = [i as f32 / tubular as f32, j as f32 / radial as f32];
            mesh.vertices.push(Vertex::new(position, normal, uv));
        }
    }

    for i in 1..=tubular {
        for j in 1..=radial {
            let a = ring * (i - 1) + (j - 1);
            let b = ring * i + (j - 1);
            let c = ring * i + j;
            let d = ring * (i - 1) + j;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn v3(a: [f32; 3]) -> Vec3 {
        Vec3::new(a[0], a[1], a[2])
    }

    /// Every triangle's geometric normal agrees with its vertex normals.
    fn assert_ccw_outward(mesh: &MeshData) {
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| mesh.vertices[tri[k] as usize]);
            let face = (v3(b.position) - v3(a.position)).cross(v3(c.position) - v3(a.position));
            if face.length() < 1e-8 {
                continue;
            }
            let avg = v3(a.normal) + v3(b.normal) + v3(c.normal);
            assert!(face.dot(avg) > 0.0, "triangle {tri:?} winds clockwise");
        }
    }

    #[test]
    fn test_plane_counts_and_extent() {
        let mesh = Geometry::Plane {
            width: 500.0,
            height: 500.0,
        }
        .tessellate();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert!(mesh.vertices.iter().all(|v| v.position[0].abs() == 250.0 && v.normal == [0.0, 0.0, 1.0]));
        assert_ccw_outward(&mesh);
    }

    #[test]
    fn test_box_counts_and_extent() {
        let mesh = Geometry::Box {
            width: 1.0,
            height: 4.0,
            depth: 10.0,
        }
        .tessellate();
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert_eq!(mesh.triangle_count(), 12);
        for v in &mesh.vertices {
            assert_eq!(v.position[0].abs(), 0.5);
            assert_eq!(v.position[1].abs(), 2.0);
            assert_eq!(v.position[2].abs(), 5.0);
        }
        assert_ccw_outward(&mesh);
    }

    #[test]
    fn test_torus_knot_counts() {
        let mesh = Geometry::torus_knot(1.0, 0.3, 100, 16).tessellate();
        assert_eq!(mesh.vertices.len(), 101 * 17);
        assert_eq!(mesh.indices.len(), 100 * 16 * 6);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_torus_knot_normals_are_unit_and_outward() {
        let mesh = Geometry::torus_knot(1.0, 0.3, 100, 16).tessellate();
        for v in &mesh.vertices {
            assert_abs_diff_eq!(v3(v.normal).length(), 1.0, epsilon = 1e-4);
        }
        assert_ccw_outward(&mesh);
    }

    #[test]
    fn test_torus_knot_seam_closes() {
        let mesh = Geometry::torus_knot(1.0, 0.3, 100, 16).tessellate();
        let first = v3(mesh.vertices[0].position);
        let last_ring_start = v3(mesh.vertices[100 * 17].position);
        assert!(first.distance(last_ring_start) < 1e-3);
    }
}
