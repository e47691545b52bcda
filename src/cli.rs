use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in demo scenes
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScenePreset {
    /// A single sphere on a floor under a directional light
    Spheres,
    /// One of each primitive under point and spot lights
    Shapes,
    /// Stacked mirror spheres reflecting each other
    Mirrors,
    /// A glass sphere in front of colored blocks
    Glass,
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "chromaray")]
#[command(about = "A recursive Whitted-style ray tracer")]
pub struct Args {
    /// Optional TOML file with tracer settings; flags below override it
    #[arg(short, long, help = "TOML file with tracer settings")]
    pub config: Option<String>,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "800", help = "Image width in pixels")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "600", help = "Image height in pixels")]
    pub height: u32,

    /// Scene to render
    #[arg(long, value_enum, default_value = "shapes", help = "Built-in scene to render")]
    pub scene: ScenePreset,

    /// Depth budget for reflected and refracted rays
    #[arg(long, help = "Depth budget for reflected and refracted rays")]
    pub max_depth: Option<u32>,

    /// Render rows in parallel
    #[arg(long, short = 'p', help = "Render image rows on all CPU cores")]
    pub parallel: bool,

    /// Disable shadow rays
    #[arg(long, help = "Disable shadow rays")]
    pub no_shadows: bool,

    /// Disable mirror reflections
    #[arg(long, help = "Disable mirror reflections")]
    pub no_reflection: bool,

    /// Disable refraction
    #[arg(long, help = "Disable refraction")]
    pub no_refraction: bool,

    /// Image applied to the scene's textured surfaces
    #[arg(long, help = "Image applied to the scene's textured surfaces")]
    pub texture: Option<String>,

    /// Output PNG file path
    #[arg(short, long, default_value = "output.png", help = "Output PNG file path")]
    pub output: String,
}
