#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

//! # Lanyard CLI
//!
//! Headless host for the [`lanyard`] badge simulation.
//!
//! It plays the part of the browser: a pointer source (gesture scripts), a
//! frame clock (fixed-rate [`replay::FrameClock`]) and a viewport metrics
//! provider (command-line flags), and prints what the badge would draw.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p lanyard_cli -- replay crates/lanyard_cli/tests/fixtures/flick.json
//! ```

pub mod cli;
pub mod config;
pub mod gesture;
pub mod logging;
pub mod replay;
