/// Camera and perspective projection utilities
use nalgebra::{Matrix4, RowVector4, Vector3};

use crate::config::EngineConfig;

/// Perspective camera parameters.
///
/// The camera sits at the origin looking down +z; there is no view matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl Camera {
    /// Camera with the default lens for a `width` x `height` target.
    ///
    /// Aspect is `height / width`, the inverse of the usual convention.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_config(&EngineConfig::default(), width, height)
    }

    pub fn from_config(config: &EngineConfig, width: u32, height: u32) -> Self {
        Self {
            fov_degrees: config.fov_degrees,
            near: config.near,
            far: config.far,
            aspect: height as f32 / width as f32,
        }
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        build_projection(self.fov_degrees, self.near, self.far, self.aspect)
    }
}

/// Build a row-major perspective matrix for row-vector multiplication.
///
/// Entries other than the six set here are zero; in particular `m[(3, 3)]`
/// is zero so that `w` carries the input depth.
pub fn build_projection(fov_degrees: f32, near: f32, far: f32, aspect: f32) -> Matrix4<f32> {
    let f = 1.0 / (fov_degrees * 0.5).to_radians().tan();
    let depth = far - near;

    let mut m = Matrix4::zeros();
    m[(0, 0)] = aspect * f;
    m[(1, 1)] = f;
    m[(2, 2)] = far / depth;
    m[(3, 2)] = -far * near / depth;
    m[(2, 3)] = 1.0;
    m[(3, 3)] = 0.0;
    m
}

/// Transform `vertex` as the row vector `[x, y, z, 1]` and apply the
/// perspective divide.
///
/// When `w` is exactly zero the coordinates are returned undivided. The
/// result is not translated to the buffer centre and may lie anywhere.
pub fn project(vertex: &Vector3<f32>, matrix: &Matrix4<f32>) -> Vector3<f32> {
    let clip = RowVector4::new(vertex.x, vertex.y, vertex.z, 1.0) * matrix;
    let out = Vector3::new(clip[0], clip[1], clip[2]);
    let w = clip[3];

    if w != 0.0 {
        out / w
    } else {
        out
    }
}
