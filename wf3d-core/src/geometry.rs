/// Geometry primitives for wireframe rendering
use nalgebra::Vector3;

use crate::error::MeshError;

/// Upper bound on the number of triangles a mesh may hold.
pub const MAX_TRIANGLES: usize = 1024;

/// Upper bound on the number of vertex records a mesh resource may declare.
pub const MAX_VERTICES: usize = 1024;

/// A triangle holding copies of its three corner positions.
///
/// Corners are values, not indices, so a triangle stays valid independently
/// of the vertex table it was decoded from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vector3<f32>; 3],
}

impl Triangle {
    pub fn new(v0: Vector3<f32>, v1: Vector3<f32>, v2: Vector3<f32>) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// The three edges in drawing order: 0-1, 0-2, 1-2.
    pub fn edges(&self) -> [(Vector3<f32>, Vector3<f32>); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (a, c), (b, c)]
    }
}

/// A capacity-bounded list of triangles.
///
/// Built once from a mesh resource and not edited afterwards. Pushing past
/// [`MAX_TRIANGLES`] is rejected instead of growing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity.min(MAX_TRIANGLES)),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) -> Result<(), MeshError> {
        if self.triangles.len() >= MAX_TRIANGLES {
            return Err(MeshError::TooManyTriangles {
                count: self.triangles.len() + 1,
                max: MAX_TRIANGLES,
            });
        }
        self.triangles.push(triangle);
        Ok(())
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn get(&self, index: usize) -> Option<&Triangle> {
        self.triangles.get(index)
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}
