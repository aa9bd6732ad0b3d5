//! Cosmetic idle swing.
//!
//! While nobody is touching it, the badge sways gently from side to side.
//! This is pure decoration: it does not read or write the physics state.
//! The swing passes through `0°, +A, -A, 0°` once per period, each leg
//! eased with the CSS `ease-in-out` curve.

/// Peak rotation of the idle swing, in degrees.
pub const IDLE_AMPLITUDE_DEGREES: f64 = 2.8;

/// Length of one full idle swing, in seconds.
pub const IDLE_PERIOD_SECS: f64 = 6.0;

/// Bisection steps when inverting the curve's x component.
const BEZIER_STEPS: u32 = 32;

/// A cubic Bézier easing curve from `(0, 0)` to `(1, 1)`.
///
/// Only the two inner control points are stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    p1: (f64, f64),
    p2: (f64, f64),
}

impl CubicBezier {
    /// CSS `ease-in-out`.
    pub const EASE_IN_OUT: Self = Self::new(0.42, 0.0, 0.58, 1.0);

    /// Creates a curve with the given control points.
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            p1: (x1, y1),
            p2: (x2, y2),
        }
    }

    /// One coordinate of the curve at parameter `t`.
    fn component(t: f64, c1: f64, c2: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * t * (u * c1 + t * c2) + t * t * t
    }

    /// Finds the parameter whose x coordinate is `x`.
    ///
    /// x is monotonic in `t` for control points inside the unit square.
    fn solve_t(&self, x: f64) -> f64 {
        let (mut lo, mut hi) = (0.0, 1.0);
        for _ in 0..BEZIER_STEPS {
            let mid = f64::midpoint(lo, hi);
            if Self::component(mid, self.p1.0, self.p2.0) > x {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        f64::midpoint(lo, hi)
    }

    /// Eased progress for linear progress `x` in `[0, 1]`.
    pub fn y(&self, x: f64) -> f64 {
        match x.clamp(0.0, 1.0) {
            x @ (0.0 | 1.0) => x,
            x => Self::component(self.solve_t(x), self.p1.1, self.p2.1),
        }
    }
}

/// The looping idle sway and its clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleSwing {
    amplitude_degrees: f64,
    period_secs: f64,
    easing: CubicBezier,
    started_at_ms: Option<f64>,
    rotation_degrees: f64,
}

impl Default for IdleSwing {
    fn default() -> Self {
        Self::new(IDLE_AMPLITUDE_DEGREES, IDLE_PERIOD_SECS)
    }
}

impl IdleSwing {
    /// Creates a swing with the given peak rotation and period.
    pub const fn new(amplitude_degrees: f64, period_secs: f64) -> Self {
        Self {
            amplitude_degrees,
            period_secs,
            easing: CubicBezier::EASE_IN_OUT,
            started_at_ms: None,
            rotation_degrees: 0.0,
        }
    }

    /// Restarts the swing from its first keyframe.
    ///
    /// The next call to [`IdleSwing::advance`] becomes time zero.
    pub fn restart(&mut self) {
        self.started_at_ms = None;
        self.rotation_degrees = 0.0;
    }

    /// Moves the swing clock to `now_ms` and returns the rotation.
    pub fn advance(&mut self, now_ms: f64) -> f64 {
        if !now_ms.is_finite() {
            return self.rotation_degrees;
        }
        let started = *self.started_at_ms.get_or_insert(now_ms);
        let elapsed = ((now_ms - started) / 1000.0).max(0.0);
        self.rotation_degrees = self.rotation_at(elapsed);
        self.rotation_degrees
    }

    /// Rotation computed by the last [`IdleSwing::advance`].
    #[inline]
    pub const fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    /// Rotation, in degrees, `elapsed_secs` into the swing.
    pub fn rotation_at(&self, elapsed_secs: f64) -> f64 {
        if !elapsed_secs.is_finite() || self.period_secs <= 0.0 {
            return 0.0;
        }

        let a = self.amplitude_degrees;
        let keyframes = [0.0, a, -a, 0.0];
        let legs = (keyframes.len() - 1) as f64;

        let progress = (elapsed_secs / self.period_secs).rem_euclid(1.0) * legs;
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "progress is within 0..3"
        )]
        let leg = (progress.floor() as usize).min(keyframes.len() - 2);
        let local = progress - leg as f64;

        let from = keyframes[leg];
        let to = keyframes[leg + 1];
        from + (to - from) * self.easing.y(local)
    }
}
