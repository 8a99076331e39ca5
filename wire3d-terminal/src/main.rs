/// Wire3D Terminal Demo - Rotating Cube
///
/// Spins a non-uniformly scaled cube as a wireframe in the terminal.
/// Controls:
///   - WASD / Arrow Keys: Rotate the cube
///   - E/R: Roll rotation
///   - Q/ESC: Quit

use anyhow::Context;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use wire3d_core::{Camera, Mesh, Model};
use wire3d_terminal::App;

fn main() -> anyhow::Result<()> {
    // Stdout is the render target, so logs go to a file.
    WriteLogger::init(
        LevelFilter::Info,
        Config::default(),
        File::create("wire3d.log").context("failed to create log file")?,
    )
    .context("failed to initialize logger")?;
    info!("starting wire3d terminal renderer");

    // Scene setup: a unit cube stretched along y, camera pulled back on the
    // view axis.
    let mut model = Model::new(Mesh::cube(1.0));
    model.transform.resize(1.0, 2.0, 1.0);
    let mut camera = Camera::new(1.0);
    camera.transform.translate(0.0, 0.0, -5.0);

    let mut app = App::new(model, camera).context("failed to initialize terminal app")?;
    app.run().context("terminal session failed")?;

    info!("shut down cleanly");
    Ok(())
}
