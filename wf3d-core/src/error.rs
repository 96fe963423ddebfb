/// Error types for mesh decoding, encoding and OBJ import
use thiserror::Error;

/// Failures produced while decoding or encoding the compact mesh format.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("mesh declares {count} vertices, at most {max} are supported")]
    TooManyVertices { count: usize, max: usize },

    #[error("mesh declares {count} triangles, at most {max} are supported")]
    TooManyTriangles { count: usize, max: usize },

    #[error("triangle {triangle} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        triangle: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("buffer truncated: header implies {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("{extra} unexpected bytes after the last triangle record")]
    TrailingBytes { extra: usize },

    #[error("vertex {vertex} has coordinate {value}, expected a whole number in [0, 255]")]
    CoordinateOutOfRange { vertex: usize, value: f32 },

    #[error("triangle {triangle} references vertex {index}, which does not fit in one byte")]
    IndexNotEncodable { triangle: usize, index: usize },
}

/// Failures produced while importing a Wavefront OBJ file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObjError {
    #[error("line {line}: cannot parse `{content}`")]
    Syntax { line: usize, content: String },

    #[error("line {line}: OBJ indices are 1-based, found 0")]
    ZeroIndex { line: usize },

    #[error("line {line}: face has {corners} corners, at least 3 are required")]
    DegenerateFace { line: usize, corners: usize },
}
