//! Simulation state and its store.

/// Which part of the badge drives the visible transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Mode {
    /// Cosmetic swing only; physics is not running.
    #[default]
    Idle,
    /// The pointer holds the badge.
    Dragging,
    /// Released and swinging freely until it comes to rest.
    Settling,
}

impl Mode {
    /// Returns the lowercase name of the mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Settling => "settling",
        }
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position and velocity of the badge.
///
/// `angle` is in radians (positive is clockwise on screen), `stretch` in
/// pixels below the resting cord length.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimState {
    /// Rotation around the pivot, radians.
    pub angle: f64,
    /// Angular velocity, rad/s.
    pub angle_velocity: f64,
    /// Extension of the cord, `0..=max_stretch`.
    pub stretch: f64,
    /// Extension velocity, px/s. Negative while retracting.
    pub stretch_velocity: f64,
    /// Current control mode.
    pub mode: Mode,
}

impl SimState {
    /// The badge hanging still in idle mode.
    pub const REST: Self = Self {
        angle: 0.0,
        angle_velocity: 0.0,
        stretch: 0.0,
        stretch_velocity: 0.0,
        mode: Mode::Idle,
    };

    /// Returns `true` when every field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.angle.is_finite()
            && self.angle_velocity.is_finite()
            && self.stretch.is_finite()
            && self.stretch_velocity.is_finite()
    }
}

/// Partial update applied by [`StateStore::set`].
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatePatch {
    /// New angle, in radians.
    pub angle: Option<f64>,
    /// New angular velocity, in radians per second.
    pub angle_velocity: Option<f64>,
    /// New stretch, in pixels.
    pub stretch: Option<f64>,
    /// New stretch velocity, in pixels per second.
    pub stretch_velocity: Option<f64>,
    /// New control mode.
    pub mode: Option<Mode>,
}

impl StatePatch {
    /// A patch replacing every field with those of `state`.
    pub const fn from_state(state: SimState) -> Self {
        Self {
            angle: Some(state.angle),
            angle_velocity: Some(state.angle_velocity),
            stretch: Some(state.stretch),
            stretch_velocity: Some(state.stretch_velocity),
            mode: Some(state.mode),
        }
    }

    /// A patch changing only the mode.
    pub const fn mode(mode: Mode) -> Self {
        Self {
            angle: None,
            angle_velocity: None,
            stretch: None,
            stretch_velocity: None,
            mode: Some(mode),
        }
    }
}

/// Single owner of a badge's [`SimState`].
///
/// The store does no validation. Producers (the input adapter and the
/// integrator) are responsible for clamping what they write.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    state: SimState,
}

impl StateStore {
    /// Creates a store holding [`SimState::REST`].
    pub fn new() -> Self {
        Self {
            state: SimState::REST,
        }
    }

    /// Returns a copy of the current state.
    #[inline]
    pub fn get(&self) -> SimState {
        self.state
    }

    /// Applies a partial update.
    pub fn set(&mut self, patch: StatePatch) {
        let s = &mut self.state;
        if let Some(angle) = patch.angle {
            s.angle = angle;
        }
        if let Some(v) = patch.angle_velocity {
            s.angle_velocity = v;
        }
        if let Some(stretch) = patch.stretch {
            s.stretch = stretch;
        }
        if let Some(v) = patch.stretch_velocity {
            s.stretch_velocity = v;
        }
        if let Some(mode) = patch.mode {
            s.mode = mode;
        }
    }

    /// Puts the badge back at rest in idle mode.
    pub fn reset(&mut self) {
        self.state = SimState::REST;
    }
}
