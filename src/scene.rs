use log::warn;
use nalgebra::Vector3;

use crate::utils::wrap_degrees;

/// Vertex and direction type used throughout the pipeline
pub type Vec3 = Vector3<f64>;

/// Rotate a point around the X axis by an angle in degrees.
pub fn rotate_x(p: Vec3, angle: f64) -> Vec3 {
    let (sin, cos) = angle.to_radians().sin_cos();
    Vec3::new(p.x, p.y * cos - p.z * sin, p.y * sin + p.z * cos)
}

/// Rotate a point around the Y axis by an angle in degrees.
pub fn rotate_y(p: Vec3, angle: f64) -> Vec3 {
    let (sin, cos) = angle.to_radians().sin_cos();
    Vec3::new(p.x * cos + p.z * sin, p.y, -p.x * sin + p.z * cos)
}

/// Rotate a point around the Z axis by an angle in degrees.
pub fn rotate_z(p: Vec3, angle: f64) -> Vec3 {
    let (sin, cos) = angle.to_radians().sin_cos();
    Vec3::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos, p.z)
}

/// Normalize a vector to unit length, mapping the zero vector to itself
/// instead of dividing by zero.
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    let magnitude = v.norm();
    if magnitude == 0.0 {
        Vec3::zeros()
    } else {
        v / magnitude
    }
}

/// Outward normal of a planar polygon, computed from the cross product of the
/// two edge vectors spanned by its first three vertices. Returns the zero
/// vector for degenerate input.
pub fn face_normal(vertices: &[Vec3]) -> Vec3 {
    if vertices.len() < 3 {
        return Vec3::zeros();
    }
    let edge1 = vertices[1] - vertices[0];
    let edge2 = vertices[2] - vertices[0];
    normalize_or_zero(edge1.cross(&edge2))
}

/// Running rotation angles in degrees, one per axis, always kept in `[0, 360)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: wrap_degrees(x),
            y: wrap_degrees(y),
            z: wrap_degrees(z),
        }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Advance the angles by per-axis speeds (degrees per frame), wrapping
    /// each result modulo 360.
    pub fn advance(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x = wrap_degrees(self.x + dx);
        self.y = wrap_degrees(self.y + dy);
        self.z = wrap_degrees(self.z + dz);
    }

    /// Apply the rotation to a point: X first, then Y, then Z. The order is
    /// fixed; the rotations do not commute.
    pub fn apply(&self, p: Vec3) -> Vec3 {
        rotate_z(rotate_y(rotate_x(p, self.x), self.y), self.z)
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// A polyhedron: object-space vertices, faces as counter-clockwise vertex
/// index lists, and edges for the wireframe overlay.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Vec<usize>>,
    pub edges: Vec<(usize, usize)>,
}

impl Mesh {
    /// The canonical unit cube: 8 vertices, 6 quad faces, 12 edges.
    pub fn cube() -> Self {
        let vertices = vec![
            Vec3::new(-0.5, -0.5, -0.5), // 0: back lower left
            Vec3::new(0.5, -0.5, -0.5),  // 1: back lower right
            Vec3::new(0.5, 0.5, -0.5),   // 2: back upper right
            Vec3::new(-0.5, 0.5, -0.5),  // 3: back upper left
            Vec3::new(-0.5, -0.5, 0.5),  // 4: front lower left
            Vec3::new(0.5, -0.5, 0.5),   // 5: front lower right
            Vec3::new(0.5, 0.5, 0.5),    // 6: front upper right
            Vec3::new(-0.5, 0.5, 0.5),   // 7: front upper left
        ];

        let faces = vec![
            vec![0, 3, 2, 1], // back
            vec![4, 5, 6, 7], // front
            vec![3, 7, 6, 2], // top
            vec![0, 1, 5, 4], // bottom
            vec![0, 4, 7, 3], // left
            vec![1, 2, 6, 5], // right
        ];

        let edges = vec![
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 4),
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ];

        Self {
            vertices,
            faces,
            edges,
        }
    }

    /// A square-based pyramid: 4 base corners and an apex.
    pub fn pyramid() -> Self {
        let vertices = vec![
            Vec3::new(-0.5, -0.5, -0.5), // 0: base back left
            Vec3::new(0.5, -0.5, -0.5),  // 1: base back right
            Vec3::new(0.5, -0.5, 0.5),   // 2: base front right
            Vec3::new(-0.5, -0.5, 0.5),  // 3: base front left
            Vec3::new(0.0, 0.5, 0.0),    // 4: apex
        ];

        let faces = vec![
            vec![0, 1, 2, 3], // base
            vec![3, 2, 4],    // front
            vec![1, 0, 4],    // back
            vec![2, 1, 4],    // right
            vec![0, 3, 4],    // left
        ];

        let edges = vec![
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            (0, 4),
            (1, 4),
            (2, 4),
            (3, 4),
        ];

        Self {
            vertices,
            faces,
            edges,
        }
    }

    /// Drop faces and edges that reference out-of-range vertices or have too
    /// few vertices to span a plane. Skipped entries are diagnostics, not
    /// errors.
    pub fn validated(mut self) -> Self {
        let vertex_count = self.vertices.len();

        self.faces.retain(|face| {
            if face.len() < 3 {
                warn!("Skipping degenerate face with {} vertices", face.len());
                return false;
            }
            if let Some(&index) = face.iter().find(|&&i| i >= vertex_count) {
                warn!("Skipping face referencing out-of-range vertex {}", index);
                return false;
            }
            true
        });

        self.edges.retain(|&(a, b)| {
            if a >= vertex_count || b >= vertex_count {
                warn!("Skipping edge ({}, {}) referencing out-of-range vertex", a, b);
                return false;
            }
            true
        });

        self
    }

    /// Rotated copies of all vertices for one frame.
    pub fn rotated_vertices(&self, rotation: &RotationState) -> Vec<Vec3> {
        self.vertices.iter().map(|&v| rotation.apply(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!(
            (a - b).norm() < TOLERANCE,
            "expected {:?} to be close to {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_rotation_roundtrip_is_identity() {
        let p = Vec3::new(0.3, -0.7, 0.5);
        for angle in [0.0, 17.5, 90.0, 123.4, 359.0] {
            assert_close(rotate_x(rotate_x(p, angle), -angle), p);
            assert_close(rotate_y(rotate_y(p, angle), -angle), p);
            assert_close(rotate_z(rotate_z(p, angle), -angle), p);
        }
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let p = Vec3::new(0.0, 1.0, 0.0);
        // 90 degrees around X carries +Y onto +Z
        assert_close(rotate_x(p, 90.0), Vec3::new(0.0, 0.0, 1.0));
        // 90 degrees around Z carries +Y onto -X
        assert_close(rotate_z(p, 90.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_rotation_order_is_x_then_y_then_z() {
        let rotation = RotationState::new(30.0, 40.0, 50.0);
        let p = Vec3::new(0.2, 0.4, 0.8);
        let expected = rotate_z(rotate_y(rotate_x(p, 30.0), 40.0), 50.0);
        assert_close(rotation.apply(p), expected);
    }

    #[test]
    fn test_normalize_zero_vector_is_zero() {
        assert_eq!(normalize_or_zero(Vec3::zeros()), Vec3::zeros());
    }

    #[test]
    fn test_normalize_unit_length() {
        let n = normalize_or_zero(Vec3::new(3.0, 4.0, 0.0));
        assert!((n.norm() - 1.0).abs() < TOLERANCE);
        assert_close(n, Vec3::new(0.6, 0.8, 0.0));
    }

    #[test]
    fn test_face_normal_of_xy_square() {
        // Counter-clockwise square in the XY plane faces +Z
        let square = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ];
        assert_close(face_normal(&square), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_face_normal_degenerate_input() {
        assert_eq!(face_normal(&[]), Vec3::zeros());
        assert_eq!(
            face_normal(&[Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0)]),
            Vec3::zeros()
        );
        // Collinear points span no plane
        let collinear = [
            Vec3::zeros(),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ];
        assert_eq!(face_normal(&collinear), Vec3::zeros());
    }

    #[test]
    fn test_rotation_state_wraps_modulo_360() {
        let mut rotation = RotationState::zero();
        // The reference per-frame speeds; their sums hit a multiple of 360 on
        // every axis after 3600 frames
        for _ in 0..3600 {
            rotation.advance(1.0, 1.5, 0.7);
        }
        assert!(rotation.x < TOLERANCE * 3600.0 || rotation.x > 360.0 - TOLERANCE * 3600.0);
        assert!(rotation.y < TOLERANCE * 3600.0 || rotation.y > 360.0 - TOLERANCE * 3600.0);
        assert!(rotation.z < 1e-6 || rotation.z > 360.0 - 1e-6);
    }

    #[test]
    fn test_rotation_state_stays_in_range() {
        let mut rotation = RotationState::new(350.0, 10.0, 0.0);
        for _ in 0..100 {
            rotation.advance(7.3, -5.1, 359.9);
            for angle in [rotation.x, rotation.y, rotation.z] {
                assert!((0.0..360.0).contains(&angle), "angle out of range: {}", angle);
            }
        }
    }

    #[test]
    fn test_cube_shape_counts() {
        let cube = Mesh::cube().validated();
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.faces.len(), 6);
        assert_eq!(cube.edges.len(), 12);
    }

    #[test]
    fn test_pyramid_shape_counts() {
        let pyramid = Mesh::pyramid().validated();
        assert_eq!(pyramid.vertices.len(), 5);
        assert_eq!(pyramid.faces.len(), 5);
        assert_eq!(pyramid.edges.len(), 8);
    }

    #[test]
    fn test_built_in_shapes_have_outward_normals() {
        // Every face normal should point away from the center of the shape
        for mesh in [Mesh::cube(), Mesh::pyramid()] {
            for face in &mesh.faces {
                let corners: Vec<Vec3> = face.iter().map(|&i| mesh.vertices[i]).collect();
                let normal = face_normal(&corners);
                let centroid =
                    corners.iter().copied().sum::<Vec3>() / corners.len() as f64;
                assert!(
                    normal.dot(&centroid) > 0.0,
                    "inward-facing normal on face {:?}",
                    face
                );
            }
        }
    }

    #[test]
    fn test_validated_drops_bad_faces_and_edges() {
        let mut mesh = Mesh::cube();
        mesh.faces.push(vec![0, 1]); // too short
        mesh.faces.push(vec![0, 1, 99]); // out of range
        mesh.edges.push((0, 42)); // out of range
        let mesh = mesh.validated();
        assert_eq!(mesh.faces.len(), 6);
        assert_eq!(mesh.edges.len(), 12);
    }

    #[test]
    fn test_rotated_vertices_identity_at_zero() {
        let cube = Mesh::cube();
        let rotated = cube.rotated_vertices(&RotationState::zero());
        for (original, rotated) in cube.vertices.iter().zip(&rotated) {
            assert_close(*original, *rotated);
        }
    }
}
