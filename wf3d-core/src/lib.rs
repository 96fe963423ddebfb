/// WF3D Core Library - Wireframe software rendering
///
/// This library provides the compact mesh codec, perspective projection,
/// line rasterization and fixed-timestep scheduling that a host drives one
/// frame at a time.

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod obj;
pub mod pointer;
pub mod projection;
pub mod raster;
pub mod timing;

// Re-export commonly used types
pub use config::EngineConfig;
pub use engine::{Engine, Idle, Simulation, EMBEDDED_MESH};
pub use error::{MeshError, ObjError};
pub use geometry::{Mesh, Triangle, MAX_TRIANGLES, MAX_VERTICES};
pub use mesh::{decode_mesh, decode_mesh_strict, encode_mesh};
pub use obj::{parse_obj, ObjModel};
pub use pointer::{PointerInput, PointerState};
pub use projection::{build_projection, project, Camera};
pub use raster::{PixelBuffer, HEIGHT, WIDTH};
pub use timing::{Tick, TickScheduler};
