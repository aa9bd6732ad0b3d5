#![forbid(unsafe_code)]

//! # Lanyard
//!
//! Replays pointer gestures through the badge simulation.
//!
//! ## Usage
//!
//! ```bash
//! lanyard replay gesture.json          # Print every frame
//! lanyard settle --angle 16            # Frames until a released badge rests
//! lanyard --config tuning.toml config  # Show the effective constants
//! ```

use std::io::{self, BufWriter, Write};

use anyhow::{Context, bail};
use clap::Parser;
use lanyard::Badge;
use serde_json::json;

use lanyard_cli::cli::{Cli, Command, OutputFormat, ReplayArgs, SettleArgs};
use lanyard_cli::gesture::Gesture;
use lanyard_cli::{config, logging, replay};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level());

    let sim_config = config::resolve(&cli).context("failed to resolve simulation config")?;

    match cli.command {
        Command::Replay(ref args) => run_replay(&cli, args, sim_config),
        Command::Settle(args) => run_settle(&cli, args, sim_config),
        Command::Config => {
            let text = config::to_toml(&sim_config).context("failed to render config")?;
            print!("{text}");
            Ok(())
        }
    }
}

fn run_replay(cli: &Cli, args: &ReplayArgs, sim_config: lanyard::SimConfig) -> anyhow::Result<()> {
    let gesture = Gesture::load(&args.gesture)
        .with_context(|| format!("failed to load gesture {}", args.gesture.display()))?;
    let mut badge = Badge::new(sim_config)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut write_error = None;

    let summary = replay::run(&mut badge, &gesture, cli.fps, cli.max_frames, |record| {
        if write_error.is_none() {
            write_error = replay::write_frame(&mut out, cli.format, record).err();
        }
    });
    if let Some(err) = write_error {
        return Err(err).context("failed to write frames");
    }

    match cli.format {
        OutputFormat::Plain => writeln!(
            out,
            "{} frames, {}",
            summary.frames,
            if summary.settled { "settled" } else { "still moving" }
        )?,
        OutputFormat::Json => writeln!(out, "{}", json!({ "summary": summary }))?,
    }
    out.flush()?;
    Ok(())
}

fn run_settle(cli: &Cli, args: SettleArgs, sim_config: lanyard::SimConfig) -> anyhow::Result<()> {
    let gesture = Gesture::hold_and_release(args.angle, args.stretch, &sim_config);
    let mut badge = Badge::new(sim_config)?;
    let summary = replay::run(&mut badge, &gesture, cli.fps, cli.max_frames, |_| {});

    let Some(frames) = summary.frames_to_rest() else {
        bail!(
            "badge still moving after {} frames; raise --max-frames or the damping",
            summary.frames
        );
    };
    #[expect(clippy::cast_precision_loss, reason = "frame counts stay small")]
    let seconds = frames as f64 / f64::from(cli.fps);

    match cli.format {
        OutputFormat::Plain => {
            println!("settled in {frames} frames ({seconds:.2}s at {} fps)", cli.fps);
        }
        OutputFormat::Json => println!(
            "{}",
            json!({ "frames_to_rest": frames, "seconds": seconds, "fps": cli.fps })
        ),
    }
    Ok(())
}
