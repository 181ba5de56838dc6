use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());
    debug!("{:?}", args);

    let scene = lumen_core::load_scene(&args.input)
        .with_context(|| format!("Failed to load scene {}", args.input.display()))?;

    if args.dump_scene {
        println!("{}", scene);
    }

    let config = args.render_config();
    let image = lumen_renderer::render(&scene, args.width, args.height, &config)
        .context("Failed to render scene")?;

    let format = args.image_format();
    lumen_renderer::save_image(&args.output, &image, format)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!("Done");
    Ok(())
}
