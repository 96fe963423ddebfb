/// Command-line configuration for the terminal host
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use log::info;
use wf3d_core::{parse_obj, EngineConfig, EMBEDDED_MESH};

use crate::logging::LoggingConfig;

pub const USAGE: &str = "usage: wf3d-terminal [--no-diagnostic] [--strict] [mesh.obj | mesh.wf3d]";

#[derive(Debug, Clone)]
pub struct TerminalConfig {
    /// OBJ or compact mesh file; the embedded mesh is used when absent.
    pub mesh_path: Option<PathBuf>,
    pub engine: EngineConfig,
    /// How often the host samples input and calls into the engine.
    pub frame_interval: Duration,
    pub logging: LoggingConfig,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            mesh_path: None,
            engine: EngineConfig::default(),
            frame_interval: Duration::from_millis(1000 / 60),
            logging: LoggingConfig::default(),
        }
    }
}

impl TerminalConfig {
    /// Build a configuration from arguments, program name excluded.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();

        for arg in args {
            match arg.as_str() {
                "--no-diagnostic" => config.engine.diagnostic_fill = false,
                "--strict" => config.engine.strict_decode = true,
                flag if flag.starts_with("--") => bail!("unknown option `{flag}`\n{USAGE}"),
                path => {
                    if config.mesh_path.is_some() {
                        bail!("more than one mesh path given\n{USAGE}");
                    }
                    config.mesh_path = Some(PathBuf::from(path));
                }
            }
        }

        Ok(config)
    }

    /// Bytes of the compact mesh resource to initialize the engine with.
    ///
    /// `.obj` files are converted on the fly; anything else is read as a
    /// compact mesh as-is.
    pub fn load_resource(&self) -> Result<Vec<u8>> {
        let Some(path) = &self.mesh_path else {
            return Ok(EMBEDDED_MESH.to_vec());
        };

        let is_obj = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("obj"));

        if is_obj {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read OBJ file {}", path.display()))?;
            let model = parse_obj(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            info!(
                "converted {}: {} vertices, {} triangles",
                path.display(),
                model.vertices.len(),
                model.faces.len()
            );
            model
                .to_compact()
                .with_context(|| format!("{} does not fit the compact mesh format", path.display()))
        } else {
            fs::read(path).with_context(|| format!("failed to read mesh file {}", path.display()))
        }
    }
}
