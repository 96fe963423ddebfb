/// WF3D Terminal - Wireframe renderer host
///
/// Usage: wf3d-terminal [--no-diagnostic] [--strict] [mesh.obj | mesh.wf3d]
///
/// Controls:
///   - Mouse: move the diagnostic pattern, click to toggle its channels
///   - Q/ESC: Quit

use anyhow::{Context, Result};
use wf3d_core::Engine;
use wf3d_terminal::{init_logging, TerminalApp, TerminalConfig};

fn main() -> Result<()> {
    let config = TerminalConfig::from_args(std::env::args().skip(1))?;
    init_logging(config.logging.clone());

    let resource = config.load_resource()?;
    let engine = Engine::initialize(config.engine.clone(), &resource)
        .context("failed to decode mesh resource")?;

    println!(
        "WF3D Terminal Renderer - {} triangles (press Q to quit)...",
        engine.mesh().len()
    );
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(engine, config.frame_interval);
    app.run()?;

    println!("Thank you for using WF3D Terminal Renderer!");
    Ok(())
}
