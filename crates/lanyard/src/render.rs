//! Translation from simulation state to a 2D transform.

use crate::config::SimConfig;
use crate::state::{Mode, SimState};

/// What the presentation layer needs to draw the badge for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderTransform {
    /// Rotation around the pivot, degrees, positive clockwise.
    pub rotation_degrees: f64,
    /// Downward extension of the cord, pixels.
    pub extension_px: f64,
    /// The badge is pulled far enough that it should draw above page content.
    pub overlay_active: bool,
}

/// Whether a badge stretched by `stretch` pixels should draw as an overlay.
#[inline]
pub fn overlay_active(stretch: f64, config: &SimConfig) -> bool {
    stretch > config.overlay_threshold
}

/// Computes the transform for `state`.
///
/// In [`Mode::Idle`] the rotation comes from the cosmetic swing rather than
/// from the physics angle.
pub fn render(state: &SimState, config: &SimConfig, idle_rotation_degrees: f64) -> RenderTransform {
    let rotation_degrees = match state.mode {
        Mode::Idle => idle_rotation_degrees,
        Mode::Dragging | Mode::Settling => state.angle.to_degrees(),
    };

    RenderTransform {
        rotation_degrees,
        extension_px: state.stretch,
        overlay_active: overlay_active(state.stretch, config),
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn idle_uses_swing_rotation() {
        let config = SimConfig::default();
        let state = SimState {
            angle: 0.5,
            ..SimState::REST
        };
        let t = render(&state, &config, 1.5);
        assert_eq!(t.rotation_degrees, 1.5);
        assert_eq!(t.extension_px, 0.0);
        assert!(!t.overlay_active);
    }

    #[test]
    fn dragging_uses_physics_angle() {
        let config = SimConfig::default();
        let state = SimState {
            angle: core::f64::consts::FRAC_PI_2,
            stretch: 30.0,
            mode: Mode::Dragging,
            ..SimState::REST
        };
        let t = render(&state, &config, 1.5);
        assert!((t.rotation_degrees - 90.0).abs() < 1e-9);
        assert_eq!(t.extension_px, 30.0);
        assert!(t.overlay_active);
    }

    #[test]
    fn overlay_threshold_is_exclusive() {
        let config = SimConfig::default();
        assert!(!overlay_active(config.overlay_threshold, &config));
        assert!(overlay_active(config.overlay_threshold + 0.01, &config));
    }
}
