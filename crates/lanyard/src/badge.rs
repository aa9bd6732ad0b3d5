//! The badge controller.
//!
//! [`Badge`] owns one badge's state and decides, frame by frame, what drives
//! it:
//!
//! | Mode       | Driven by                          | Leaves on                 |
//! |------------|------------------------------------|---------------------------|
//! | `Idle`     | the cosmetic [`IdleSwing`]         | drag start                |
//! | `Dragging` | pointer samples                    | drag end                  |
//! | `Settling` | the [`integrator`](crate::integrator) | rest, or a new drag start |
//!
//! The badge never registers timers of its own. While it is settling it
//! holds a single [`FrameToken`] standing for "the next frame should run a
//! physics step"; cancelling the token (a new drag, [`Badge::dispose`]) is
//! what guarantees no stale step mutates the state afterwards.

use tracing::{debug, trace, warn};

use crate::config::{SimConfig, Viewport};
use crate::error::Result;
use crate::idle::IdleSwing;
use crate::input::{DragSample, InputAdapter};
use crate::integrator;
use crate::render::{self, RenderTransform};
use crate::state::{Mode, SimState, StatePatch, StateStore};

/// Frame delta used for the first physics step when the release time is
/// unknown.
const FALLBACK_DT: f64 = 1.0 / 60.0;

/// A pending physics step.
///
/// Tokens are never reused within one badge, so a token observed before a
/// cancellation never compares equal to one issued after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(u64);

impl FrameToken {
    /// Sequence number of the token.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// One interactive lanyard badge.
///
/// # Example
///
/// ```rust
/// use lanyard::{Badge, DragSample, Mode, SimConfig};
///
/// let mut badge = Badge::new(SimConfig::default()).unwrap();
///
/// badge.handle_drag_start(0.0);
/// badge.handle_drag_move(DragSample::new(60.0, 120.0, 16.0));
/// badge.handle_drag_end(32.0);
/// assert_eq!(badge.mode(), Mode::Settling);
///
/// let mut now = 32.0;
/// while badge.mode() == Mode::Settling {
///     now += 1000.0 / 60.0;
///     badge.tick(now);
/// }
/// assert_eq!(badge.render_transform().extension_px, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Badge {
    config: SimConfig,
    store: StateStore,
    input: InputAdapter,
    idle: IdleSwing,
    frame: Option<FrameToken>,
    next_frame: u64,
    last_frame_ms: Option<f64>,
    disposed: bool,
}

impl Default for Badge {
    fn default() -> Self {
        Self::from_valid(SimConfig::default())
    }
}

impl Badge {
    /// Creates a badge hanging at rest.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`](crate::ConfigError) if `config` is invalid.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    /// Creates a badge whose clamps are derived from the viewport.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`](crate::ConfigError) if `base_length` is not
    /// a positive number.
    pub fn for_viewport(base_length: f64, viewport: Viewport) -> Result<Self> {
        Self::new(SimConfig::for_viewport(base_length, viewport))
    }

    fn from_valid(config: SimConfig) -> Self {
        Self {
            config,
            store: StateStore::new(),
            input: InputAdapter::new(),
            idle: IdleSwing::default(),
            frame: None,
            next_frame: 0,
            last_frame_ms: None,
            disposed: false,
        }
    }

    /// Replaces the configuration.
    ///
    /// An invalid configuration is rejected and the badge keeps the one it
    /// had. A smaller `max_stretch` takes effect immediately. A disposed
    /// badge ignores the call and returns `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns the validation error of the rejected configuration.
    pub fn configure(&mut self, config: SimConfig) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        if let Err(err) = config.validate() {
            warn!(%err, "rejecting badge configuration, keeping previous");
            return Err(err);
        }

        self.config = config;
        let stretch = self.store.get().stretch;
        if stretch > config.max_stretch {
            self.store.set(StatePatch {
                stretch: Some(config.max_stretch),
                ..StatePatch::default()
            });
        }
        debug!(
            max_stretch = config.max_stretch,
            max_angle_degrees = config.max_angle_degrees,
            "badge configured"
        );
        Ok(())
    }

    /// Re-derives the viewport-dependent clamps after a resize.
    ///
    /// # Errors
    ///
    /// See [`Badge::configure`].
    pub fn resize(&mut self, viewport: Viewport) -> Result<()> {
        self.configure(self.config.with_viewport(viewport))
    }

    /// The pointer grabbed the badge.
    pub fn handle_drag_start(&mut self, timestamp_ms: f64) {
        if self.disposed {
            return;
        }
        match self.mode() {
            Mode::Dragging => {
                debug!("drag start while already dragging, restarting gesture");
            }
            Mode::Idle | Mode::Settling => {
                self.transition(Mode::Dragging);
            }
        }
        self.input.begin(timestamp_ms);
    }

    /// The pointer moved while holding the badge.
    ///
    /// A move without a preceding start begins a gesture implicitly.
    pub fn handle_drag_move(&mut self, sample: DragSample) {
        if self.disposed {
            return;
        }
        if self.mode() != Mode::Dragging {
            debug!(mode = %self.mode(), "drag move without drag start, starting gesture");
            self.handle_drag_start(sample.timestamp_ms);
        }

        let current = self.store.get();
        if let Some(patch) = self.input.sample(&current, sample, &self.config) {
            self.store.set(patch);
            trace!(angle = ?patch.angle, stretch = ?patch.stretch, "drag sample applied");
        }
    }

    /// The pointer let go. The badge starts swinging freely.
    pub fn handle_drag_end(&mut self, timestamp_ms: f64) {
        if self.disposed {
            return;
        }
        if self.mode() != Mode::Dragging {
            debug!(mode = %self.mode(), "ignoring drag end without a gesture");
            return;
        }

        let held_ms = self.input.end();
        self.transition(Mode::Settling);
        self.last_frame_ms = timestamp_ms.is_finite().then_some(timestamp_ms);
        self.schedule_frame();

        let state = self.store.get();
        debug!(
            ?held_ms,
            angle_velocity = state.angle_velocity,
            stretch_velocity = state.stretch_velocity,
            "badge released"
        );
    }

    /// Advances the badge to the frame at `timestamp_ms`.
    ///
    /// Runs one physics step while settling and moves the idle swing while
    /// idle. Does nothing while dragging or after [`Badge::dispose`].
    pub fn tick(&mut self, timestamp_ms: f64) {
        if self.disposed {
            return;
        }
        match self.mode() {
            Mode::Idle => {
                self.idle.advance(timestamp_ms);
            }
            Mode::Dragging => {}
            Mode::Settling => self.step_physics(timestamp_ms),
        }
    }

    fn step_physics(&mut self, timestamp_ms: f64) {
        if self.frame.take().is_none() {
            trace!("no physics step scheduled");
            return;
        }

        let dt = match self.last_frame_ms {
            Some(last) if timestamp_ms.is_finite() => (timestamp_ms - last) / 1000.0,
            _ => FALLBACK_DT,
        };
        if timestamp_ms.is_finite() {
            self.last_frame_ms = Some(timestamp_ms);
        }

        let outcome = integrator::step(&self.store.get(), &self.config, dt);
        self.store.set(StatePatch::from_state(outcome.state));
        if let Some(bounce) = outcome.bounce {
            trace!(?bounce, "stretch hit its limit");
        }

        if outcome.at_rest {
            self.transition(Mode::Idle);
        } else {
            self.schedule_frame();
        }
    }

    /// The transform to draw this frame.
    pub fn render_transform(&self) -> RenderTransform {
        render::render(
            &self.store.get(),
            &self.config,
            self.idle.rotation_degrees(),
        )
    }

    /// Cancels any pending work. Every later call is a no-op.
    ///
    /// Calling this more than once is harmless.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.cancel_frame();
        self.input.end();
        self.disposed = true;
        debug!("badge disposed");
    }

    /// Whether [`Badge::dispose`] has been called.
    #[inline]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Current control mode.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.store.get().mode
    }

    /// Current simulation state.
    #[inline]
    pub fn state(&self) -> SimState {
        self.store.get()
    }

    /// Active configuration.
    #[inline]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The physics step waiting for the next frame, if any.
    #[inline]
    pub const fn scheduled_frame(&self) -> Option<FrameToken> {
        self.frame
    }

    fn schedule_frame(&mut self) {
        self.next_frame = self.next_frame.wrapping_add(1);
        self.frame = Some(FrameToken(self.next_frame));
    }

    fn cancel_frame(&mut self) {
        if let Some(token) = self.frame.take() {
            trace!(token = token.id(), "physics step cancelled");
        }
    }

    /// Moves to `to` if the edge exists, returning whether it did.
    fn transition(&mut self, to: Mode) -> bool {
        let from = self.mode();
        let allowed = matches!(
            (from, to),
            (Mode::Idle | Mode::Settling, Mode::Dragging)
                | (Mode::Dragging, Mode::Settling)
                | (Mode::Settling, Mode::Idle)
        );
        if !allowed {
            warn!(%from, %to, "ignoring invalid mode transition");
            return false;
        }

        match to {
            Mode::Idle => {
                self.cancel_frame();
                self.last_frame_ms = None;
                self.store.reset();
                self.idle.restart();
            }
            Mode::Dragging => self.cancel_frame(),
            Mode::Settling => {}
        }
        self.store.set(StatePatch::mode(to));
        debug!(%from, %to, "badge mode changed");
        true
    }
}
