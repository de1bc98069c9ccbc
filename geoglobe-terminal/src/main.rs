/// geoglobe terminal viewer
///
/// Usage: geoglobe-terminal [world.geojson] [flylines.json]
///
/// Without a fly-line file a set of sample routes is shown.
/// Controls:
///   - WASD / Arrow Keys: Orbit the globe
///   - +/-: Zoom
///   - Space: Toggle auto spin
///   - Q/ESC: Quit
use std::path::PathBuf;

use color_eyre::Result;
use geoglobe_core::GlobeConfig;
use geoglobe_terminal::{GlobeScene, TerminalApp};

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let world = args.next();
    let fly_lines = args.next();

    let scene = GlobeScene::load(world.as_deref(), fly_lines.as_deref(), GlobeConfig::default())?;
    log::info!(
        "loaded {} countries and {} fly lines",
        scene.countries.len(),
        scene.fly_lines.len()
    );

    let mut app = TerminalApp::new(scene)?;
    app.run()?;
    Ok(())
}
