//! Primitive mesh generation
//!
//! CPU-side meshes for everything the scene draws: direction arrows,
//! bivector parallelogram fills, and the reference grid. Vertices are
//! interleaved `[x, y, z, nx, ny, nz, r, g, b, a]` (40-byte stride) to match
//! the renderer's attribute layout.

use glam::Vec3;

/// Arrow head length, absolute units (matches the original scene's
/// indicator proportions).
const ARROW_HEAD_LENGTH: f32 = 0.2;
/// Arrow head half-width, absolute units.
const ARROW_HEAD_WIDTH: f32 = 0.1;

/// Default arrow color (cyan, like the original direction indicators).
pub const ARROW_COLOR: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
/// Bivector plane fill color, translucent.
pub const PLANE_COLOR: [f32; 4] = [0.0, 0.8, 1.0, 0.35];
/// Grid line color.
pub const GRID_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.6];

/// How a mesh's indices are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshTopology {
    /// Index pairs form line segments
    Lines,
    /// Index triples form triangles
    Triangles,
}

/// Material properties for a primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshMaterial {
    /// Base color (RGBA); alpha below 1.0 renders blended.
    pub color: [f32; 4],
    /// Whether the surface is lit (triangles) or drawn flat (lines).
    pub lit: bool,
}

impl Default for MeshMaterial {
    fn default() -> Self {
        Self {
            color: ARROW_COLOR,
            lit: false,
        }
    }
}

/// A renderable CPU-side mesh
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableMesh {
    /// Interleaved vertex data, 10 floats per vertex.
    pub vertices: Vec<f32>,
    /// Index data, interpreted per `topology`.
    pub indices: Vec<u32>,
    /// Primitive topology.
    pub topology: MeshTopology,
    /// Material.
    pub material: MeshMaterial,
}

impl RenderableMesh {
    /// An empty line mesh
    pub fn empty(topology: MeshTopology) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            topology,
            material: MeshMaterial::default(),
        }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 10
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3, color: [f32; 4]) -> u32 {
        let index = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&[
            position.x, position.y, position.z, normal.x, normal.y, normal.z, color[0], color[1],
            color[2], color[3],
        ]);
        index
    }

    fn push_segment(&mut self, from: Vec3, to: Vec3, color: [f32; 4]) {
        let a = self.push_vertex(from, Vec3::ZERO, color);
        let b = self.push_vertex(to, Vec3::ZERO, color);
        self.indices.push(a);
        self.indices.push(b);
    }
}

/// Build a direction-indicator arrow from the origin to `target`.
///
/// A shaft segment plus four head spokes, head proportions fixed. A
/// zero-length target produces an empty mesh (the entity still exists and
/// keeps its label).
pub fn arrow_mesh(target: Vec3, color: [f32; 4]) -> RenderableMesh {
    let mut mesh = RenderableMesh::empty(MeshTopology::Lines);
    mesh.material = MeshMaterial { color, lit: false };

    let length = target.length();
    if length <= f32::EPSILON {
        return mesh;
    }
    let dir = target / length;

    mesh.push_segment(Vec3::ZERO, target, color);

    // head spokes, clamped so short arrows stay readable
    let head_len = ARROW_HEAD_LENGTH.min(length * 0.5);
    let head_width = ARROW_HEAD_WIDTH.min(length * 0.25);
    let (u, w) = orthonormal_basis(dir);
    let base = target - dir * head_len;
    for spoke in [u, -u, w, -w] {
        mesh.push_segment(target, base + spoke * head_width, color);
    }

    mesh
}

/// Build the translucent parallelogram spanned by `v1` and `v2`.
///
/// Two triangles over the vertices `0, v1, v1+v2, v2`, with the plane
/// normal on every vertex.
pub fn parallelogram_mesh(v1: Vec3, v2: Vec3, color: [f32; 4]) -> RenderableMesh {
    let mut mesh = RenderableMesh::empty(MeshTopology::Triangles);
    mesh.material = MeshMaterial { color, lit: true };

    let cross = v1.cross(v2);
    if cross.length_squared() <= f32::EPSILON {
        return mesh;
    }
    let normal = cross.normalize();

    let a = mesh.push_vertex(Vec3::ZERO, normal, color);
    let b = mesh.push_vertex(v1, normal, color);
    let c = mesh.push_vertex(v1 + v2, normal, color);
    let d = mesh.push_vertex(v2, normal, color);
    mesh.indices.extend_from_slice(&[a, b, c, a, c, d]);

    mesh
}

/// Build the reference grid: unit-spaced lines over the XY plane plus the
/// Z axis segment, all centered on the origin.
pub fn grid_mesh(size: u32) -> RenderableMesh {
    let mut mesh = RenderableMesh::empty(MeshTopology::Lines);
    mesh.material = MeshMaterial {
        color: GRID_COLOR,
        lit: false,
    };

    let half = size as f32 / 2.0;
    for i in 0..=size {
        let offset = i as f32 - half;
        mesh.push_segment(
            Vec3::new(offset, -half, 0.0),
            Vec3::new(offset, half, 0.0),
            GRID_COLOR,
        );
        mesh.push_segment(
            Vec3::new(-half, offset, 0.0),
            Vec3::new(half, offset, 0.0),
            GRID_COLOR,
        );
    }

    // vertical axis through the origin
    mesh.push_segment(
        Vec3::new(0.0, 0.0, -half),
        Vec3::new(0.0, 0.0, half),
        GRID_COLOR,
    );

    mesh
}

/// Two unit vectors orthogonal to `dir` and to each other.
fn orthonormal_basis(dir: Vec3) -> (Vec3, Vec3) {
    let reference = if dir.z.abs() > 0.9 { Vec3::X } else { Vec3::Z };
    let u = dir.cross(reference).normalize();
    let w = dir.cross(u).normalize();
    (u, w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_mesh_has_shaft_and_head() {
        let mesh = arrow_mesh(Vec3::new(0.0, 0.0, 3.0), ARROW_COLOR);
        // 1 shaft + 4 head spokes = 5 segments
        assert_eq!(mesh.indices.len(), 10);
        assert_eq!(mesh.topology, MeshTopology::Lines);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_zero_arrow_is_empty() {
        let mesh = arrow_mesh(Vec3::ZERO, ARROW_COLOR);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_parallelogram_has_two_triangles() {
        let mesh = parallelogram_mesh(Vec3::X, Vec3::Y, PLANE_COLOR);
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.topology, MeshTopology::Triangles);
        // plane normal is +Z for the XY parallelogram
        assert_eq!(&mesh.vertices[3..6], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_degenerate_parallelogram_is_empty() {
        let mesh = parallelogram_mesh(Vec3::X, Vec3::X * 2.0, PLANE_COLOR);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_grid_mesh_line_count() {
        let size = 12;
        let mesh = grid_mesh(size);
        // (size+1) lines each way plus the Z axis
        let expected_segments = 2 * (size as usize + 1) + 1;
        assert_eq!(mesh.indices.len(), expected_segments * 2);
    }
}
