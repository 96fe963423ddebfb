/// Wavefront OBJ import for building compact mesh resources
use nalgebra::Vector3;
use nom::{
    bytes::complete::{tag, take_while},
    character::complete::{char, digit1, space1},
    combinator::{map_res, opt},
    multi::many1,
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::error::{MeshError, ObjError};
use crate::mesh::encode_mesh;

/// Vertex positions and triangulated faces read from an OBJ file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjModel {
    pub vertices: Vec<Vector3<f32>>,
    /// Zero-based vertex indices.
    pub faces: Vec<[usize; 3]>,
}

impl ObjModel {
    /// Round every coordinate to a whole number and encode the result.
    pub fn to_compact(&self) -> Result<Vec<u8>, MeshError> {
        let quantized: Vec<_> = self.vertices.iter().map(|v| v.map(f32::round)).collect();
        encode_mesh(&quantized, &self.faces)
    }
}

/// Parse the `v` and `f` statements of an OBJ file.
///
/// Texture and normal references in face corners are skipped, as are all
/// other statements. Polygons are split into a triangle fan.
pub fn parse_obj(input: &str) -> Result<ObjModel, ObjError> {
    let mut model = ObjModel::default();

    for (number, raw) in input.lines().enumerate() {
        let line = number + 1;
        let text = raw.trim();
        let syntax = || ObjError::Syntax {
            line,
            content: text.to_string(),
        };

        match text.split_whitespace().next() {
            Some("v") => {
                let (_, vertex) = vertex_line(text).map_err(|_| syntax())?;
                model.vertices.push(vertex);
            }
            Some("f") => {
                let (rest, corners) = face_line(text).map_err(|_| syntax())?;
                if !rest.trim().is_empty() {
                    return Err(syntax());
                }
                if corners.len() < 3 {
                    return Err(ObjError::DegenerateFace {
                        line,
                        corners: corners.len(),
                    });
                }
                if corners.contains(&0) {
                    return Err(ObjError::ZeroIndex { line });
                }
                for k in 1..corners.len() - 1 {
                    model
                        .faces
                        .push([corners[0] - 1, corners[k] - 1, corners[k + 1] - 1]);
                }
            }
            _ => {}
        }
    }

    Ok(model)
}

fn vertex_line(input: &str) -> IResult<&str, Vector3<f32>> {
    let (input, _) = tag("v")(input)?;
    let (input, x) = preceded(space1, float)(input)?;
    let (input, y) = preceded(space1, float)(input)?;
    let (input, z) = preceded(space1, float)(input)?;
    Ok((input, Vector3::new(x, y, z)))
}

fn face_line(input: &str) -> IResult<&str, Vec<usize>> {
    let (input, _) = tag("f")(input)?;
    many1(preceded(space1, face_corner))(input)
}

fn face_corner(input: &str) -> IResult<&str, usize> {
    let (input, index) = map_res(digit1, str::parse::<usize>)(input)?;
    let (input, _) = opt(preceded(
        char('/'),
        take_while(|c: char| c.is_ascii_digit() || c == '/'),
    ))(input)?;
    Ok((input, index))
}
