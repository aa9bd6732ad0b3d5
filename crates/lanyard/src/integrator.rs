//! Damped pendulum with a stretching cord.
//!
//! One call to [`step`] advances the badge by one frame using semi-implicit
//! (symplectic) Euler: velocities are updated from the current forces, then
//! positions from the new velocities. The pendulum length grows with the
//! stretch, and the stretch itself is a damped spring pulling back to zero.
//!
//! ```rust
//! use lanyard::{fps, integrator, SimConfig, SimState};
//!
//! let config = SimConfig::default();
//! let mut state = SimState { angle: 0.2, ..SimState::REST };
//!
//! for _ in 0..600 {
//!     let outcome = integrator::step(&state, &config, fps(60));
//!     state = outcome.state;
//!     if outcome.at_rest {
//!         break;
//!     }
//! }
//! assert!(integrator::is_at_rest(&state));
//! ```

use core::f64::consts::{PI, TAU};

use tracing::{trace, warn};

use crate::config::SimConfig;
use crate::state::SimState;

/// Smallest time step the integrator will take, in seconds.
pub const MIN_DT: f64 = 1.0 / 240.0;

/// Largest time step the integrator will take, in seconds.
///
/// Frames longer than this (a backgrounded tab, a debugger pause) are
/// simulated as if only this much time had passed.
pub const MAX_DT: f64 = 1.0 / 24.0;

/// Angular speed below which the badge may be considered at rest, rad/s.
pub const REST_ANGLE_VELOCITY: f64 = 0.02;

/// Angle below which the badge may be considered at rest, rad.
pub const REST_ANGLE: f64 = 0.01;

/// Stretch below which the badge may be considered at rest, px.
pub const REST_STRETCH: f64 = 0.8;

/// Stretch speed below which the badge may be considered at rest, px/s.
pub const REST_STRETCH_VELOCITY: f64 = 0.6;

/// Returns a time delta for a given number of frames per second.
///
/// ```rust
/// use lanyard::fps;
///
/// assert!((fps(60) - 1.0 / 60.0).abs() < 1e-12);
/// ```
#[inline]
pub fn fps(n: u32) -> f64 {
    1.0 / f64::from(n)
}

/// Frame length in milliseconds for `n` frames per second.
#[inline]
pub fn frame_ms(n: u32) -> f64 {
    fps(n) * 1000.0
}

/// Clamps a frame delta into `[MIN_DT, MAX_DT]`.
///
/// Zero, negative and NaN deltas map to [`MIN_DT`].
#[inline]
pub fn clamp_dt(dt: f64) -> f64 {
    if dt.is_nan() || dt <= 0.0 {
        return MIN_DT;
    }
    dt.clamp(MIN_DT, MAX_DT)
}

/// Which stretch boundary a step collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounce {
    /// The cord retracted past zero.
    Low,
    /// The cord extended past `max_stretch`.
    High,
}

/// Result of one integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// State after the step. The mode is carried over unchanged.
    pub state: SimState,
    /// Whether the new state is within the rest thresholds.
    pub at_rest: bool,
    /// Stretch boundary hit during the step, if any.
    pub bounce: Option<Bounce>,
}

/// Returns `true` when every velocity and displacement is below its rest
/// threshold.
pub fn is_at_rest(state: &SimState) -> bool {
    state.angle_velocity.abs() < REST_ANGLE_VELOCITY
        && state.angle.abs() < REST_ANGLE
        && state.stretch.abs() < REST_STRETCH
        && state.stretch_velocity.abs() < REST_STRETCH_VELOCITY
}

/// Maps an angle into `(-π, π]`, leaving angles already inside untouched.
///
/// A badge flung over the top comes to rest hanging down, not at `2π`.
pub fn wrap_angle(angle: f64) -> f64 {
    if !angle.is_finite() || (-PI < angle && angle <= PI) {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Advances the badge by `dt` seconds (clamped with [`clamp_dt`]).
pub fn step(state: &SimState, config: &SimConfig, dt: f64) -> StepOutcome {
    let dt = clamp_dt(dt);
    let SimState {
        mut angle,
        mut angle_velocity,
        mut stretch,
        mut stretch_velocity,
        mode,
    } = *state;

    let length = (config.base_length + config.slack + stretch)
        .max(config.min_length)
        .max(f64::EPSILON);

    let angle_accel =
        -(config.gravity / length) * angle.sin() - config.angular_damping * angle_velocity;

    // A shortening cord speeds the swing up, a lengthening one slows it.
    angle_velocity -= 2.0 * (stretch_velocity / length) * angle_velocity * dt;

    angle_velocity += angle_accel * dt;
    angle = wrap_angle(angle + angle_velocity * dt);

    let stretch_accel = -config.stiffness * stretch - config.linear_damping * stretch_velocity;
    stretch_velocity += stretch_accel * dt;
    stretch += stretch_velocity * dt;

    let mut bounce = None;
    if stretch < 0.0 {
        stretch = 0.0;
        stretch_velocity = -stretch_velocity * config.restitution_low;
        bounce = Some(Bounce::Low);
    } else if stretch > config.max_stretch {
        stretch = config.max_stretch;
        stretch_velocity = -stretch_velocity * config.restitution_high;
        bounce = Some(Bounce::High);
    }

    let mut next = SimState {
        angle,
        angle_velocity,
        stretch,
        stretch_velocity,
        mode,
    };

    if !next.is_finite() {
        warn!(?state, dt, "integration diverged, dropping badge to rest");
        next = SimState {
            mode,
            ..SimState::REST
        };
    }

    let at_rest = is_at_rest(&next);
    trace!(
        angle = next.angle,
        angle_velocity = next.angle_velocity,
        stretch = next.stretch,
        stretch_velocity = next.stretch_velocity,
        dt,
        at_rest,
        "integration step"
    );

    StepOutcome {
        state: next,
        at_rest,
        bounce,
    }
}
