//! Simulation configuration.
//!
//! [`SimConfig`] carries every clamp and tuning constant the badge uses.
//! Nothing in the simulation hard-codes a physical constant: the defaults
//! below are tuning values chosen for a believable badge-on-a-lanyard feel,
//! and each one can be overridden per badge.
//!
//! # Example
//!
//! ```rust
//! use lanyard::{PointerKind, SimConfig, Viewport};
//!
//! let config = SimConfig::for_viewport(140.0, Viewport::new(900.0, PointerKind::Coarse));
//! assert_eq!(config.max_angle_degrees, 10.0);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{ConfigError, Result};

/// Drag angle clamp for mouse and pen input.
pub const FINE_POINTER_MAX_ANGLE: f64 = 16.0;

/// Drag angle clamp for touch input, where swipes are larger and sloppier.
pub const COARSE_POINTER_MAX_ANGLE: f64 = 10.0;

/// Share of the viewport height the badge may be pulled down.
pub const STRETCH_VIEWPORT_RATIO: f64 = 0.2;

/// Lower bound on the viewport-derived stretch clamp.
pub const MIN_VIEWPORT_STRETCH: f64 = 48.0;

/// Upper bound on the viewport-derived stretch clamp.
pub const MAX_VIEWPORT_STRETCH: f64 = 220.0;

/// Pointer precision reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PointerKind {
    /// Mouse, trackpad or stylus.
    #[default]
    Fine,
    /// Touch screen.
    Coarse,
}

/// Viewport metrics used to derive the drag clamps.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Viewport height in pixels.
    pub height: f64,
    /// Pointer precision of the primary input device.
    pub pointer: PointerKind,
}

impl Viewport {
    /// Creates viewport metrics.
    #[inline]
    pub const fn new(height: f64, pointer: PointerKind) -> Self {
        Self { height, pointer }
    }

    /// Stretch clamp for this viewport.
    ///
    /// Non-finite or non-positive heights fall back to the lower bound.
    pub fn max_stretch(&self) -> f64 {
        if !self.height.is_finite() || self.height <= 0.0 {
            return MIN_VIEWPORT_STRETCH;
        }
        let stretch = self.height * STRETCH_VIEWPORT_RATIO;
        stretch.clamp(MIN_VIEWPORT_STRETCH, MAX_VIEWPORT_STRETCH)
    }

    /// Drag angle clamp, in degrees, for this viewport's pointer.
    pub const fn max_angle_degrees(&self) -> f64 {
        match self.pointer {
            PointerKind::Fine => FINE_POINTER_MAX_ANGLE,
            PointerKind::Coarse => COARSE_POINTER_MAX_ANGLE,
        }
    }
}

/// Clamps and physical constants for one badge.
///
/// Lengths are in CSS pixels, angles in degrees where the field name says
/// so and radians elsewhere, times in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SimConfig {
    /// Measured resting length of the cord segment.
    pub base_length: f64,
    /// Clamp on the stretch position.
    pub max_stretch: f64,
    /// Clamp on the drag-induced angle, in degrees.
    pub max_angle_degrees: f64,
    /// Extra length added to the cord so it never looks taut at rest.
    pub slack: f64,
    /// Lower bound on the effective pendulum length.
    pub min_length: f64,
    /// Gravity coefficient, px/s².
    pub gravity: f64,
    /// Angular damping coefficient, 1/s.
    pub angular_damping: f64,
    /// Stiffness of the spring pulling the stretch back to zero, 1/s².
    pub stiffness: f64,
    /// Damping of the stretch spring, 1/s.
    pub linear_damping: f64,
    /// Velocity kept (and reversed) when the stretch hits zero.
    pub restitution_low: f64,
    /// Velocity kept (and reversed) when the stretch hits `max_stretch`.
    pub restitution_high: f64,
    /// Degrees of rotation per pixel of horizontal drag.
    pub angle_per_px: f64,
    /// Pixels of stretch per pixel of vertical drag.
    pub stretch_per_px: f64,
    /// Stretch above which the badge should draw over page content.
    pub overlay_threshold: f64,
    /// Cap on the angular velocity handed to the integrator on release, rad/s.
    pub max_angle_velocity: f64,
    /// Cap on the stretch velocity handed to the integrator on release, px/s.
    pub max_stretch_velocity: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            base_length: 140.0,
            max_stretch: 140.0,
            max_angle_degrees: FINE_POINTER_MAX_ANGLE,
            slack: 12.0,
            min_length: 40.0,
            gravity: 2400.0,
            angular_damping: 3.0,
            stiffness: 120.0,
            linear_damping: 10.0,
            restitution_low: 0.5,
            restitution_high: 0.45,
            angle_per_px: 0.12,
            stretch_per_px: 0.5,
            overlay_threshold: 24.0,
            max_angle_velocity: 6.0,
            max_stretch_velocity: 2400.0,
        }
    }
}

impl SimConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration whose clamps are derived from the viewport.
    pub fn for_viewport(base_length: f64, viewport: Viewport) -> Self {
        Self {
            base_length,
            ..Self::default()
        }
        .with_viewport(viewport)
    }

    /// Re-derives the viewport-dependent clamps, keeping everything else.
    pub fn with_viewport(self, viewport: Viewport) -> Self {
        Self {
            max_stretch: viewport.max_stretch(),
            max_angle_degrees: viewport.max_angle_degrees(),
            ..self
        }
    }

    /// Drag angle clamp in radians.
    #[inline]
    pub fn max_angle(&self) -> f64 {
        self.max_angle_degrees.to_radians()
    }

    /// Checks that the configuration can drive a stable simulation.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as a [`ConfigError`].
    pub fn validate(&self) -> Result<()> {
        if !positive(self.base_length) {
            return Err(ConfigError::BaseLength(self.base_length));
        }
        if !positive(self.max_stretch) {
            return Err(ConfigError::MaxStretch(self.max_stretch));
        }
        if !positive(self.max_angle_degrees) {
            return Err(ConfigError::MaxAngle(self.max_angle_degrees));
        }

        let constants = [
            ("slack", self.slack),
            ("min_length", self.min_length),
            ("gravity", self.gravity),
            ("angular_damping", self.angular_damping),
            ("stiffness", self.stiffness),
            ("linear_damping", self.linear_damping),
            ("angle_per_px", self.angle_per_px),
            ("stretch_per_px", self.stretch_per_px),
            ("overlay_threshold", self.overlay_threshold),
            ("max_angle_velocity", self.max_angle_velocity),
            ("max_stretch_velocity", self.max_stretch_velocity),
        ];
        for (name, value) in constants {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Constant { name, value });
            }
        }

        let restitutions = [
            ("restitution_low", self.restitution_low),
            ("restitution_high", self.restitution_high),
        ];
        for (name, value) in restitutions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Restitution { name, value });
            }
        }

        Ok(())
    }
}

#[inline]
fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
