#![forbid(unsafe_code)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::use_self)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::struct_field_names)]

//! # Lanyard
//!
//! Simulation core for an interactive badge hanging from a lanyard.
//!
//! The badge is a damped pendulum whose cord can be stretched. It has three
//! modes:
//!
//! - **Idle**: a gentle cosmetic sway, no physics
//! - **Dragging**: the pointer sets rotation and stretch directly
//! - **Settling**: released, it swings and bounces until it comes to rest
//!
//! The host owns the render loop. It forwards pointer events, calls
//! [`Badge::tick`] once per frame and draws whatever
//! [`Badge::render_transform`] returns.
//!
//! ## Example
//!
//! ```rust
//! use lanyard::{Badge, DragSample, Mode, PointerKind, Viewport};
//!
//! let mut badge = Badge::for_viewport(140.0, Viewport::new(800.0, PointerKind::Fine)).unwrap();
//!
//! // Pull the badge to the right and down, then let go.
//! badge.handle_drag_start(0.0);
//! badge.handle_drag_move(DragSample::new(80.0, 200.0, 16.0));
//! let held = badge.render_transform();
//! assert!(held.rotation_degrees < 0.0);
//! assert!(held.overlay_active);
//! badge.handle_drag_end(32.0);
//!
//! // Drive it from the frame clock until it hangs still again.
//! let mut now = 32.0;
//! while badge.mode() == Mode::Settling {
//!     now += 1000.0 / 60.0;
//!     badge.tick(now);
//! }
//! assert!(!badge.render_transform().overlay_active);
//!
//! badge.dispose();
//! ```
//!
//! ## Sign convention
//!
//! Positive angles rotate the badge clockwise on screen. Dragging to the
//! right produces a negative angle (see [`input::ANGLE_SIGN`]).

pub mod badge;
pub mod config;
pub mod error;
pub mod idle;
pub mod input;
pub mod integrator;
pub mod render;
pub mod state;

pub use badge::{Badge, FrameToken};
pub use config::{PointerKind, SimConfig, Viewport};
pub use error::{ConfigError, Result};
pub use idle::{CubicBezier, IdleSwing};
pub use input::{DragSample, InputAdapter};
pub use integrator::{Bounce, StepOutcome, clamp_dt, fps, frame_ms, is_at_rest};
pub use render::{RenderTransform, overlay_active, render};
pub use state::{Mode, SimState, StatePatch, StateStore};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::badge::{Badge, FrameToken};
    pub use crate::config::{PointerKind, SimConfig, Viewport};
    pub use crate::error::ConfigError;
    pub use crate::input::DragSample;
    pub use crate::integrator::fps;
    pub use crate::render::RenderTransform;
    pub use crate::state::{Mode, SimState};
}
