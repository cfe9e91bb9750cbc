use clap::{Parser, ValueEnum};
use log::LevelFilter;

use glimmer::renderer::default_thread_count;

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
#[command(name = "glimmer")]
#[command(about = "A multithreaded path tracer in Rust")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "300", help = "Image width in pixels")]
    pub width: u32,

    /// Image aspect ratio (width over height); the height is derived
    #[arg(long, default_value = "1.5", help = "Image aspect ratio (width over height)")]
    pub aspect_ratio: f32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "10", help = "Number of samples per pixel")]
    pub samples_per_pixel: u32,

    /// Maximum number of ray bounces per sample
    #[arg(long, default_value = "30", help = "Maximum number of ray bounces per sample")]
    pub max_depth: u32,

    /// Number of worker threads (defaults to the available CPU parallelism)
    #[arg(long, short = 't', default_value_t = default_thread_count(), help = "Number of worker threads")]
    pub threads: usize,

    /// Seed for the random generators; omit for a fresh seed each run
    #[arg(long, help = "Seed for the random generators (a fixed seed reproduces the render)")]
    pub seed: Option<u64>,

    /// Output file path (.ppm for plain-text P3, .png for 8-bit PNG)
    #[arg(short, long, default_value = "image.ppm", help = "Output file path (.ppm for plain-text P3, .png for 8-bit PNG)")]
    pub output: String,
}
