/// Compact binary mesh format
///
/// Layout (counts are big-endian `u16`):
///
/// ```text
/// [vertex_count: u16][triangle_count: u16]
/// vertex_count   x [x: u8][y: u8][z: u8]
/// triangle_count x [i0: u8][i1: u8][i2: u8]
/// ```
///
/// Vertex bytes are used directly as coordinates in `[0, 255]`. Triangle
/// bytes index the vertex table decoded just before them.
use log::debug;
use nalgebra::Vector3;
use nom::{
    combinator::map,
    multi::count,
    number::complete as number,
    sequence::tuple,
    IResult,
};

use crate::error::MeshError;
use crate::geometry::{Mesh, Triangle, MAX_TRIANGLES, MAX_VERTICES};

/// Size of the two-count header in bytes.
pub const HEADER_LEN: usize = 4;

/// Size of one vertex or triangle record in bytes.
pub const RECORD_LEN: usize = 3;

/// Decode a compact mesh, ignoring any bytes past the last triangle record.
pub fn decode_mesh(data: &[u8]) -> Result<Mesh, MeshError> {
    decode(data, false)
}

/// Decode a compact mesh, rejecting trailing bytes.
pub fn decode_mesh_strict(data: &[u8]) -> Result<Mesh, MeshError> {
    decode(data, true)
}

fn decode(data: &[u8], strict: bool) -> Result<Mesh, MeshError> {
    let truncated = |expected: usize| MeshError::Truncated {
        expected,
        actual: data.len(),
    };

    let (body, (vertex_count, triangle_count)) =
        header(data).map_err(|_| truncated(HEADER_LEN))?;
    let vertex_count = usize::from(vertex_count);
    let triangle_count = usize::from(triangle_count);

    if vertex_count > MAX_VERTICES {
        return Err(MeshError::TooManyVertices {
            count: vertex_count,
            max: MAX_VERTICES,
        });
    }
    if triangle_count > MAX_TRIANGLES {
        return Err(MeshError::TooManyTriangles {
            count: triangle_count,
            max: MAX_TRIANGLES,
        });
    }

    let expected = encoded_len(vertex_count, triangle_count);
    if data.len() < expected {
        return Err(truncated(expected));
    }
    if strict && data.len() > expected {
        return Err(MeshError::TrailingBytes {
            extra: data.len() - expected,
        });
    }

    let (body, vertices) = count(vertex, vertex_count)(body).map_err(|_| truncated(expected))?;
    let (_, faces) = count(face, triangle_count)(body).map_err(|_| truncated(expected))?;

    let mut mesh = Mesh::with_capacity(triangle_count);
    for (triangle, indices) in faces.iter().enumerate() {
        let mut corners = [Vector3::zeros(); 3];
        for (corner, &index) in corners.iter_mut().zip(indices) {
            let index = usize::from(index);
            *corner = *vertices.get(index).ok_or(MeshError::IndexOutOfRange {
                triangle,
                index,
                vertex_count,
            })?;
        }
        mesh.add_triangle(Triangle::new(corners[0], corners[1], corners[2]))?;
    }

    debug!(
        "decoded mesh: {} vertices, {} triangles, {} bytes",
        vertex_count,
        triangle_count,
        data.len()
    );
    Ok(mesh)
}

/// Number of bytes a mesh with the given counts occupies.
pub fn encoded_len(vertex_count: usize, triangle_count: usize) -> usize {
    HEADER_LEN + RECORD_LEN * (vertex_count + triangle_count)
}

fn header(input: &[u8]) -> IResult<&[u8], (u16, u16)> {
    tuple((number::be_u16, number::be_u16))(input)
}

fn vertex(input: &[u8]) -> IResult<&[u8], Vector3<f32>> {
    map(
        tuple((number::u8, number::u8, number::u8)),
        |(x, y, z)| Vector3::new(f32::from(x), f32::from(y), f32::from(z)),
    )(input)
}

fn face(input: &[u8]) -> IResult<&[u8], [u8; 3]> {
    map(tuple((number::u8, number::u8, number::u8)), |(a, b, c)| {
        [a, b, c]
    })(input)
}

/// Encode a vertex table and index triples into the compact format.
///
/// Coordinates must be whole numbers in `[0, 255]` and every index must both
/// reference an existing vertex and fit in a single byte.
pub fn encode_mesh(vertices: &[Vector3<f32>], faces: &[[usize; 3]]) -> Result<Vec<u8>, MeshError> {
    if vertices.len() > MAX_VERTICES {
        return Err(MeshError::TooManyVertices {
            count: vertices.len(),
            max: MAX_VERTICES,
        });
    }
    if faces.len() > MAX_TRIANGLES {
        return Err(MeshError::TooManyTriangles {
            count: faces.len(),
            max: MAX_TRIANGLES,
        });
    }

    let mut out = Vec::with_capacity(encoded_len(vertices.len(), faces.len()));
    // Both counts are bounded by 1024 above.
    out.extend_from_slice(&(vertices.len() as u16).to_be_bytes());
    out.extend_from_slice(&(faces.len() as u16).to_be_bytes());

    for (index, v) in vertices.iter().enumerate() {
        for &value in v.iter() {
            if !(0.0..=255.0).contains(&value) || value.fract() != 0.0 {
                return Err(MeshError::CoordinateOutOfRange {
                    vertex: index,
                    value,
                });
            }
            out.push(value as u8);
        }
    }

    for (triangle, indices) in faces.iter().enumerate() {
        for &index in indices {
            if index >= vertices.len() {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count: vertices.len(),
                });
            }
            let byte = u8::try_from(index)
                .map_err(|_| MeshError::IndexNotEncodable { triangle, index })?;
            out.push(byte);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> Vec<u8> {
        vec![
            0, 3, // vertex count
            0, 1, // triangle count
            10, 20, 30, //
            40, 50, 60, //
            70, 80, 90, //
            0, 1, 2,
        ]
    }

    #[test]
    fn test_decode_single_triangle() {
        let mesh = decode_mesh(&single_triangle()).unwrap();
        assert_eq!(mesh.len(), 1);
        let t = mesh.get(0).unwrap();
        assert_eq!(t.vertices[0], Vector3::new(10.0, 20.0, 30.0));
        assert_eq!(t.vertices[1], Vector3::new(40.0, 50.0, 60.0));
        assert_eq!(t.vertices[2], Vector3::new(70.0, 80.0, 90.0));
    }

    #[test]
    fn test_decode_shared_and_reordered_indices() {
        let data = vec![
            0, 4, 0, 2, //
            0, 0, 1, //
            255, 0, 2, //
            0, 255, 3, //
            7, 7, 7, //
            2, 0, 1, //
            3, 3, 0,
        ];
        let table = [
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(255.0, 0.0, 2.0),
            Vector3::new(0.0, 255.0, 3.0),
            Vector3::new(7.0, 7.0, 7.0),
        ];
        let mesh = decode_mesh(&data).unwrap();
        assert_eq!(mesh.len(), 2);
        let expected = [[2, 0, 1], [3, 3, 0]];
        for (t, indices) in mesh.triangles().iter().zip(expected) {
            for (v, i) in t.vertices.iter().zip(indices) {
                assert_eq!(*v, table[i]);
            }
        }
    }

    #[test]
    fn test_decode_empty_mesh() {
        let mesh = decode_mesh(&[0, 0, 0, 0]).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_rejects_short_header() {
        assert_eq!(
            decode_mesh(&[0, 1]),
            Err(MeshError::Truncated {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn test_rejects_truncated_body() {
        let mut data = single_triangle();
        data.pop();
        assert_eq!(
            decode_mesh(&data),
            Err(MeshError::Truncated {
                expected: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn test_rejects_oversized_counts() {
        // 1025 vertices
        assert_eq!(
            decode_mesh(&[0x04, 0x01, 0, 0]),
            Err(MeshError::TooManyVertices {
                count: 1025,
                max: MAX_VERTICES
            })
        );
        // 2000 triangles
        assert_eq!(
            decode_mesh(&[0, 0, 0x07, 0xD0]),
            Err(MeshError::TooManyTriangles {
                count: 2000,
                max: MAX_TRIANGLES
            })
        );
    }

    #[test]
    fn test_rejects_index_out_of_range() {
        let mut data = single_triangle();
        data[15] = 3;
        assert_eq!(
            decode_mesh(&data),
            Err(MeshError::IndexOutOfRange {
                triangle: 0,
                index: 3,
                vertex_count: 3
            })
        );
    }

    #[test]
    fn test_trailing_bytes() {
        let mut data = single_triangle();
        data.extend_from_slice(&[1, 2]);
        assert!(decode_mesh(&data).is_ok());
        assert_eq!(
            decode_mesh_strict(&data),
            Err(MeshError::TrailingBytes { extra: 2 })
        );
    }

    #[test]
    fn test_encode_matches_layout() {
        let vertices = [
            Vector3::new(10.0, 20.0, 30.0),
            Vector3::new(40.0, 50.0, 60.0),
            Vector3::new(70.0, 80.0, 90.0),
        ];
        let encoded = encode_mesh(&vertices, &[[0, 1, 2]]).unwrap();
        assert_eq!(encoded, single_triangle());
    }

    #[test]
    fn test_encode_rejects_bad_coordinates() {
        let err = encode_mesh(&[Vector3::new(1.5, 0.0, 0.0)], &[]).unwrap_err();
        assert_eq!(
            err,
            MeshError::CoordinateOutOfRange {
                vertex: 0,
                value: 1.5
            }
        );
        let err = encode_mesh(&[Vector3::new(0.0, 256.0, 0.0)], &[]).unwrap_err();
        assert!(matches!(err, MeshError::CoordinateOutOfRange { .. }));
        let err = encode_mesh(&[Vector3::new(0.0, 0.0, -1.0)], &[]).unwrap_err();
        assert!(matches!(err, MeshError::CoordinateOutOfRange { .. }));
    }

    #[test]
    fn test_encode_rejects_bad_indices() {
        let vertices = vec![Vector3::new(1.0, 1.0, 1.0); 300];
        assert_eq!(
            encode_mesh(&vertices[..2], &[[0, 1, 2]]),
            Err(MeshError::IndexOutOfRange {
                triangle: 0,
                index: 2,
                vertex_count: 2
            })
        );
        assert_eq!(
            encode_mesh(&vertices, &[[0, 1, 256]]),
            Err(MeshError::IndexNotEncodable {
                triangle: 0,
                index: 256
            })
        );
    }
}
