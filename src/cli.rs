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

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "lumapath")]
#[command(about = "A physically based path tracer in Rust")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "720", help = "Image width in pixels")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "480", help = "Image height in pixels")]
    pub height: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "64", help = "Number of samples per pixel")]
    pub samples_per_pixel: u32,

    /// Maximum number of path bounces after the camera hit
    #[arg(long, short = 'b', default_value = "4", help = "Maximum number of path bounces")]
    pub max_bounces: u32,

    /// Disable next-event estimation (explicit light sampling)
    #[arg(long, help = "Disable next-event estimation")]
    pub no_nee: bool,

    /// Clamp indirect radiance to reduce fireflies
    #[arg(long, help = "Clamp indirect radiance to reduce fireflies")]
    pub clamp_fireflies: bool,

    /// Display gamma applied when writing the image
    #[arg(long, default_value = "2.2", help = "Display gamma applied when writing the image")]
    pub gamma: f32,

    /// Output file path
    #[arg(short, long, default_value = "output.png", help = "Output PNG path")]
    pub output: String,
}
