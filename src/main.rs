use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use chromaray::{RayTracer, Scene, TextureMap, TracerConfig};

mod cli;
mod logger;
mod output;
mod scenes;

use cli::Args;
use logger::init_logger;
use output::save_image_as_png;

/// Texture tiling used for the floor of the demo scenes.
const FLOOR_TEXTURE_REPEAT: f32 = 4.0;

/// Start from the config file (or defaults) and apply command line overrides.
fn load_config(args: &Args) -> chromaray::Result<TracerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading tracer settings from {path}");
            TracerConfig::from_toml_file(path)?
        }
        None => TracerConfig::default(),
    };

    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }
    if args.parallel {
        config.parallel = true;
    }
    if args.no_shadows {
        config.enable_shadows = false;
    }
    if args.no_reflection {
        config.enable_reflection = false;
    }
    if args.no_refraction {
        config.enable_refraction = false;
    }
    config.show_progress = true;
    Ok(config)
}

fn run(args: &Args) -> chromaray::Result<()> {
    let config = load_config(args)?;

    let texture = args
        .texture
        .as_ref()
        .map(|path| TextureMap::open(path, FLOOR_TEXTURE_REPEAT, FLOOR_TEXTURE_REPEAT))
        .transpose()?;

    info!("Scene {:?}, resolution {}x{}", args.scene, args.width, args.height);
    let description = scenes::build_scene(args.scene, texture);
    let scene = Scene::build(args.width, args.height, &description)?;

    let tracer = RayTracer::new(config);
    let image = tracer.render(&scene);

    save_image_as_png(&image, &args.output)
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    info!("ChromaRay - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
