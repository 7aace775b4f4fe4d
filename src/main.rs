use std::time::Duration;

use clap::Parser;
use glam::DVec2;

use scentscape::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the demo world
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Hide the egocentric agent panel
    #[arg(long)]
    no_agent_view: bool,

    /// Initial viewbox half-width, in cells
    #[arg(long, default_value_t = 24.0)]
    view_radius: f64,

    /// Frame interval in milliseconds
    #[arg(long, default_value_t = 33)]
    frame_ms: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let settings = ViewerSettings::load()?;

    let mut world = DemoWorld::new(demo_config(), args.seed);
    let radius = args.view_radius;
    let mut viewer = MapViewer::new(
        world.config().clone(),
        settings,
        DVec2::new(-radius, -radius),
        DVec2::new(radius, radius),
        !args.no_agent_view,
    )?;

    log::info!("starting demo loop (seed {})", args.seed);
    loop {
        match viewer.draw(&world) {
            Ok(()) => {}
            Err(ViewerError::SurfaceClosed) => {
                log::info!("window closed, exiting");
                break;
            }
            Err(e) => return Err(e.into()),
        }
        world.step();
        std::thread::sleep(Duration::from_millis(args.frame_ms));
    }
    viewer.close();

    Ok(())
}
