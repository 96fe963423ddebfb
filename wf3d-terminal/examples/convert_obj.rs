/// Example: Convert a Wavefront OBJ file into a compact mesh resource
///
/// Usage: cargo run --example convert_obj -- input.obj output.wf3d

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use wf3d_core::{decode_mesh, parse_obj};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        bail!("Usage: {} <input.obj> <output.wf3d>", args[0]);
    }

    let (input, output) = (&args[1], &args[2]);
    println!("Converting OBJ file: {}", input);

    let text = fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?;
    let model = parse_obj(&text).with_context(|| format!("Failed to parse {}", input))?;
    let bytes = model
        .to_compact()
        .context("Model does not fit the compact mesh format")?;

    // Decoding again catches anything the encoder let through
    let mesh = decode_mesh(&bytes).context("Encoded mesh failed to decode")?;

    fs::write(output, &bytes).with_context(|| format!("Failed to write {}", output))?;
    println!(
        "Wrote {} bytes ({} vertices, {} triangles) to {}",
        bytes.len(),
        model.vertices.len(),
        mesh.len(),
        output
    );
    Ok(())
}
