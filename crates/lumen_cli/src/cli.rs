use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_renderer::RenderConfig;
use std::path::PathBuf;

/// Log verbosity accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

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

#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "Render the default sphere scene with a multi-threaded path tracer")]
pub struct Args {
    /// Number of samples taken per pixel
    #[arg(long, default_value_t = 64)]
    pub samples: u32,

    /// Number of render threads; must be a power of two
    #[arg(long, default_value_t = 4)]
    pub threads: usize,

    /// Image width in pixels
    #[arg(long, default_value_t = 560)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 315)]
    pub height: u32,

    /// Seed for the random scene layout and BVH build
    #[arg(long, default_value_t = 500)]
    pub seed: u32,

    /// Output image path; the extension picks the format
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            thread_count: self.threads,
            samples: self.samples,
        }
    }
}
