/// Geometry primitives: meshes of indexed triangular faces
use nalgebra::Point3;

use crate::transform::Transform;

/// A triangular face referencing mesh vertices by index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub indices: [usize; 3],
}

impl Face {
    pub fn new(i0: usize, i1: usize, i2: usize) -> Self {
        Self {
            indices: [i0, i1, i2],
        }
    }
}

/// An indexed triangle mesh: vertex positions plus face index triples.
///
/// Vertices and faces are append-only; both lists are populated once during
/// scene setup and never mutated by the render loop. Face indices are
/// validated at triangulation time, not on insertion.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Point3<f32>>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
        }
    }

    pub fn add_vertex(&mut self, x: f32, y: f32, z: f32) {
        self.vertices.push(Point3::new(x, y, z));
    }

    pub fn add_face(&mut self, i0: usize, i1: usize, i2: usize) {
        self.faces.push(Face::new(i0, i1, i2));
    }

    /// Create a cube mesh with 8 vertices and 12 triangular faces.
    ///
    /// Faces wind counter-clockwise when viewed from outside, so back-face
    /// culling hides the far side of the cube.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::with_capacity(8, 12);

        // Top ring, then bottom ring
        mesh.add_vertex(-h, h, h);
        mesh.add_vertex(-h, h, -h);
        mesh.add_vertex(h, h, -h);
        mesh.add_vertex(h, h, h);
        mesh.add_vertex(-h, -h, h);
        mesh.add_vertex(-h, -h, -h);
        mesh.add_vertex(h, -h, -h);
        mesh.add_vertex(h, -h, h);

        // Two triangles per cube face
        mesh.add_face(0, 1, 2);
        mesh.add_face(0, 2, 3);
        mesh.add_face(0, 4, 5);
        mesh.add_face(0, 5, 1);
        mesh.add_face(1, 5, 6);
        mesh.add_face(1, 6, 2);
        mesh.add_face(2, 6, 7);
        mesh.add_face(2, 7, 3);
        mesh.add_face(3, 7, 4);
        mesh.add_face(3, 4, 0);
        mesh.add_face(4, 6, 5);
        mesh.add_face(4, 7, 6);

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// The object being rendered: a mesh positioned by its own transform.
#[derive(Debug, Clone)]
pub struct Model {
    pub transform: Transform,
    pub mesh: Mesh,
}

impl Model {
    pub fn new(mesh: Mesh) -> Self {
        Self {
            transform: Transform::new(),
            mesh,
        }
    }
}
