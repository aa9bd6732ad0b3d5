//! Pointer drag handling.
//!
//! While the badge is held, the pointer sets its pose directly: horizontal
//! offset becomes rotation and downward offset becomes stretch. Velocities
//! are estimated by finite difference between samples so the badge keeps
//! its momentum when released.
//!
//! Sign convention: dragging to the right (positive `offset_x`) produces a
//! negative angle, i.e. the badge tilts counter-clockwise as if the card
//! were pulled sideways while the cord stays pinned at the pivot.

use tracing::trace;

use crate::config::SimConfig;
use crate::state::{SimState, StatePatch};

/// Sign applied to the horizontal drag offset before scaling it to degrees.
pub const ANGLE_SIGN: f64 = -1.0;

/// Shortest interval assumed between two samples, in milliseconds.
pub const MIN_SAMPLE_INTERVAL_MS: f64 = 1.0;

/// Longest interval assumed between two samples, in milliseconds.
pub const MAX_SAMPLE_INTERVAL_MS: f64 = 50.0;

/// One pointer reading during a drag.
///
/// Offsets are cumulative pixel deltas from where the gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragSample {
    /// Horizontal offset, positive to the right.
    pub offset_x: f64,
    /// Vertical offset, positive downwards.
    pub offset_y: f64,
    /// Monotonic timestamp of the reading, in milliseconds.
    pub timestamp_ms: f64,
}

impl DragSample {
    /// Creates a drag sample.
    #[inline]
    pub const fn new(offset_x: f64, offset_y: f64, timestamp_ms: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            timestamp_ms,
        }
    }
}

/// Converts drag samples into badge poses.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputAdapter {
    started_at_ms: Option<f64>,
    last_sample_ms: f64,
}

impl InputAdapter {
    /// Creates an adapter with no gesture in progress.
    pub const fn new() -> Self {
        Self {
            started_at_ms: None,
            last_sample_ms: 0.0,
        }
    }

    /// Starts a gesture at `timestamp_ms`.
    pub fn begin(&mut self, timestamp_ms: f64) {
        let timestamp_ms = if timestamp_ms.is_finite() {
            timestamp_ms
        } else {
            0.0
        };
        self.started_at_ms = Some(timestamp_ms);
        self.last_sample_ms = timestamp_ms;
    }

    /// Ends the gesture, returning how long it lasted in milliseconds.
    pub fn end(&mut self) -> Option<f64> {
        let started = self.started_at_ms.take()?;
        Some((self.last_sample_ms - started).max(0.0))
    }

    /// Computes the pose for a drag sample.
    ///
    /// The returned patch sets position and velocity and leaves the mode
    /// alone. Returns `None` for samples with non-finite offsets, which are
    /// dropped.
    pub fn sample(
        &mut self,
        current: &SimState,
        sample: DragSample,
        config: &SimConfig,
    ) -> Option<StatePatch> {
        if !sample.offset_x.is_finite() || !sample.offset_y.is_finite() {
            trace!(?sample, "dropping drag sample with non-finite offset");
            return None;
        }

        let elapsed_ms = if sample.timestamp_ms.is_finite() {
            let elapsed = sample.timestamp_ms - self.last_sample_ms;
            self.last_sample_ms = sample.timestamp_ms;
            elapsed.clamp(MIN_SAMPLE_INTERVAL_MS, MAX_SAMPLE_INTERVAL_MS)
        } else {
            MAX_SAMPLE_INTERVAL_MS
        };
        let elapsed = elapsed_ms / 1000.0;

        let angle = target_angle(sample.offset_x, config);
        let angle_velocity = ((angle - current.angle) / elapsed)
            .clamp(-config.max_angle_velocity, config.max_angle_velocity);

        let stretch = target_stretch(sample.offset_y, config);
        let stretch_velocity = ((stretch - current.stretch) / elapsed)
            .clamp(-config.max_stretch_velocity, config.max_stretch_velocity);

        Some(StatePatch {
            angle: Some(angle),
            angle_velocity: Some(angle_velocity),
            stretch: Some(stretch),
            stretch_velocity: Some(stretch_velocity),
            mode: None,
        })
    }
}

/// Rotation, in radians, for a horizontal drag offset.
pub fn target_angle(offset_x: f64, config: &SimConfig) -> f64 {
    let max = config.max_angle_degrees;
    (ANGLE_SIGN * offset_x * config.angle_per_px)
        .clamp(-max, max)
        .to_radians()
}

/// Stretch, in pixels, for a vertical drag offset. Upward drags never
/// compress the cord.
pub fn target_stretch(offset_y: f64, config: &SimConfig) -> f64 {
    (offset_y * config.stretch_per_px)
        .max(0.0)
        .min(config.max_stretch)
}
