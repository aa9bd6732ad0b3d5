//! Command-line interface for `lanyard`.
//!
//! # Examples
//!
//! ```bash
//! # Replay a recorded gesture at 60 FPS
//! lanyard replay gesture.json
//!
//! # Same, as JSON lines, on a phone-sized touch viewport
//! lanyard --viewport-height 740 --coarse --format json replay gesture.json
//!
//! # Pull the badge to 12 degrees and 80px, let go, count frames to rest
//! lanyard settle --angle 12 --stretch 80
//!
//! # Print the effective configuration
//! lanyard --config tuning.toml config
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Headless driver for the lanyard badge simulation.
///
/// Plays pointer gestures through the simulation on a fixed-rate frame
/// clock and prints what the badge would render each frame.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "lanyard",
    author,
    version,
    about = "Replay pointer gestures through the lanyard badge simulation"
)]
pub struct Cli {
    /// TOML file overriding simulation constants
    ///
    /// Any field left out keeps its default value
    #[arg(long, short = 'c', env = "LANYARD_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Viewport height in pixels, used to derive the stretch clamp
    #[arg(long, env = "LANYARD_VIEWPORT_HEIGHT", global = true)]
    pub viewport_height: Option<f64>,

    /// Simulate a touch screen (coarse pointer)
    #[arg(long, global = true)]
    pub coarse: bool,

    /// Frame clock rate
    #[arg(
        long,
        default_value_t = 60,
        value_parser = clap::value_parser!(u32).range(1..=1000),
        global = true
    )]
    pub fps: u32,

    /// Stop after this many frames even if the badge is still moving
    #[arg(long, default_value_t = 3600, global = true)]
    pub max_frames: usize,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Plain, global = true)]
    pub format: OutputFormat,

    /// Enable verbose logging (repeat for more)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Replay a gesture script and print every frame
    Replay(ReplayArgs),

    /// Drag the badge to a pose, release it and report time to rest
    Settle(SettleArgs),

    /// Print the effective configuration as TOML
    Config,
}

/// Arguments for the replay subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ReplayArgs {
    /// Gesture script (JSON array of start/move/end events)
    pub gesture: PathBuf,
}

/// Arguments for the settle subcommand.
#[derive(Parser, Debug, Clone, Copy)]
pub struct SettleArgs {
    /// Rotation to hold the badge at before release, degrees
    #[arg(long, default_value_t = 12.0, allow_negative_numbers = true)]
    pub angle: f64,

    /// Stretch to hold the badge at before release, pixels
    #[arg(long, default_value_t = 0.0)]
    pub stretch: f64,
}

/// How frames and reports are printed.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned, human-readable columns
    #[default]
    Plain,
    /// One JSON object per line
    Json,
}

impl Cli {
    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Get log level based on verbosity.
    #[must_use]
    pub const fn log_level(&self) -> LogLevel {
        match self.verbose {
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Log level for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Only show warnings and errors
    Warn,
    /// Show info messages
    Info,
    /// Show debug messages
    Debug,
    /// Show all messages including trace
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}
