//! Error types for the badge simulation.
//!
//! The only failure the simulation surfaces is a rejected configuration.
//! Everything else (out-of-order drag events, odd frame timestamps) is
//! absorbed and degrades to a visually idle badge.

use thiserror::Error;

/// A configuration was rejected by [`SimConfig::validate`].
///
/// When [`Badge::configure`] returns one of these, the badge keeps running
/// with its last known-good configuration.
///
/// [`SimConfig::validate`]: crate::SimConfig::validate
/// [`Badge::configure`]: crate::Badge::configure
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The resting cord length must be finite and strictly positive.
    #[error("invalid base length: {0} (must be finite and > 0)")]
    BaseLength(f64),

    /// The stretch clamp must be finite and strictly positive.
    #[error("invalid max stretch: {0} (must be finite and > 0)")]
    MaxStretch(f64),

    /// The drag angle clamp must be finite and strictly positive.
    #[error("invalid max angle: {0} degrees (must be finite and > 0)")]
    MaxAngle(f64),

    /// A physical or tuning constant is negative or not finite.
    #[error("invalid constant `{name}`: {value} (must be finite and >= 0)")]
    Constant {
        /// Field name of the offending constant.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A bounce restitution factor lies outside `[0, 1]`.
    #[error("invalid restitution `{name}`: {value} (must be within 0..=1)")]
    Restitution {
        /// Field name of the offending factor.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// A specialized [`Result`] type for badge configuration.
pub type Result<T> = std::result::Result<T, ConfigError>;
