//! Gesture scripts.
//!
//! A gesture script is a JSON array of pointer events in the order the
//! pointer source emitted them:
//!
//! ```json
//! [
//!   { "kind": "start", "at_ms": 0 },
//!   { "kind": "move", "offset_x": 80, "offset_y": 120, "at_ms": 16 },
//!   { "kind": "end", "at_ms": 48 }
//! ]
//! ```
//!
//! Offsets are cumulative from where the gesture started. Scripts may hold
//! several gestures back to back.

use std::fs;
use std::path::{Path, PathBuf};

use lanyard::{Badge, DragSample, SimConfig};
use serde::{Deserialize, Serialize};

/// One pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GestureEvent {
    /// The pointer grabbed the badge.
    Start { at_ms: f64 },
    /// The pointer moved while holding the badge.
    Move {
        offset_x: f64,
        offset_y: f64,
        at_ms: f64,
    },
    /// The pointer let go.
    End { at_ms: f64 },
}

impl GestureEvent {
    /// When the event happened, in milliseconds.
    pub const fn at_ms(&self) -> f64 {
        match *self {
            Self::Start { at_ms } | Self::Move { at_ms, .. } | Self::End { at_ms } => at_ms,
        }
    }

    /// Forwards the event to a badge.
    pub fn apply(&self, badge: &mut Badge) {
        match *self {
            Self::Start { at_ms } => badge.handle_drag_start(at_ms),
            Self::Move {
                offset_x,
                offset_y,
                at_ms,
            } => badge.handle_drag_move(DragSample::new(offset_x, offset_y, at_ms)),
            Self::End { at_ms } => badge.handle_drag_end(at_ms),
        }
    }
}

/// Errors loading a gesture script.
#[derive(Debug, thiserror::Error)]
pub enum GestureError {
    /// The script file could not be read.
    #[error("Cannot read gesture file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The script is not a JSON array of gesture events.
    #[error("Invalid gesture script: {0}")]
    Parse(#[from] serde_json::Error),

    /// The script contains no events.
    #[error("Gesture script is empty")]
    Empty,

    /// An event has a missing, negative or non-finite timestamp.
    #[error("Event {index} has an invalid timestamp: {at_ms}")]
    BadTimestamp { index: usize, at_ms: f64 },

    /// Events are not in chronological order.
    #[error("Event {index} at {at_ms}ms happens before the previous event at {previous_ms}ms")]
    OutOfOrder {
        index: usize,
        at_ms: f64,
        previous_ms: f64,
    },
}

/// A validated, chronologically ordered list of pointer events.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gesture {
    events: Vec<GestureEvent>,
}

impl Gesture {
    /// Validates a list of events.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or timestamps are invalid or
    /// go backwards.
    pub fn new(events: Vec<GestureEvent>) -> Result<Self, GestureError> {
        if events.is_empty() {
            return Err(GestureError::Empty);
        }

        let mut previous_ms = 0.0;
        for (index, event) in events.iter().enumerate() {
            let at_ms = event.at_ms();
            if !at_ms.is_finite() || at_ms < 0.0 {
                return Err(GestureError::BadTimestamp { index, at_ms });
            }
            if at_ms < previous_ms {
                return Err(GestureError::OutOfOrder {
                    index,
                    at_ms,
                    previous_ms,
                });
            }
            previous_ms = at_ms;
        }

        Ok(Self { events })
    }

    /// Parses and validates a JSON gesture script.
    ///
    /// # Errors
    ///
    /// See [`Gesture::new`]; also fails on malformed JSON.
    pub fn from_json(text: &str) -> Result<Self, GestureError> {
        let events: Vec<GestureEvent> = serde_json::from_str(text)?;
        Self::new(events)
    }

    /// Reads a JSON gesture script from disk.
    ///
    /// # Errors
    ///
    /// See [`Gesture::from_json`]; also fails if the file can't be read.
    pub fn load(path: &Path) -> Result<Self, GestureError> {
        let text = fs::read_to_string(path).map_err(|source| GestureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// A single gesture that holds the badge still at a pose, then lets go.
    ///
    /// The pose is converted back into drag offsets using the config's
    /// drag scales, so the badge is released with zero velocity.
    pub fn hold_and_release(angle_degrees: f64, stretch: f64, config: &SimConfig) -> Self {
        let offset_x = if config.angle_per_px > 0.0 {
            -angle_degrees / config.angle_per_px
        } else {
            0.0
        };
        let offset_y = if config.stretch_per_px > 0.0 {
            stretch / config.stretch_per_px
        } else {
            0.0
        };

        Self {
            events: vec![
                GestureEvent::Start { at_ms: 0.0 },
                GestureEvent::Move {
                    offset_x,
                    offset_y,
                    at_ms: 16.0,
                },
                // Holding still for a while zeroes the release velocity.
                GestureEvent::Move {
                    offset_x,
                    offset_y,
                    at_ms: 100.0,
                },
                GestureEvent::End { at_ms: 100.0 },
            ],
        }
    }

    /// The events, in order.
    pub fn events(&self) -> &[GestureEvent] {
        &self.events
    }

    /// Timestamp of the last event.
    pub fn duration_ms(&self) -> f64 {
        self.events.last().map_or(0.0, GestureEvent::at_ms)
    }
}
