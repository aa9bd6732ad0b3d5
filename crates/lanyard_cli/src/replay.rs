//! Headless render loop.
//!
//! Plays a [`Gesture`] through a [`Badge`] the way a browser would: pointer
//! events are delivered in order as their timestamps come due, then the
//! badge ticks once per display refresh and its transform is recorded.

use std::io::{self, Write};

use lanyard::{Badge, Mode, RenderTransform, frame_ms};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::OutputFormat;
use crate::gesture::Gesture;

/// Fixed-rate display refresh.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    interval_ms: f64,
    frame: usize,
}

impl FrameClock {
    /// Creates a clock ticking `rate` times per second, starting at 0 ms.
    pub fn new(rate: u32) -> Self {
        Self {
            interval_ms: frame_ms(rate.max(1)),
            frame: 0,
        }
    }

    /// Returns the next frame number and its presentation time.
    #[expect(clippy::cast_precision_loss, reason = "frame counts stay small")]
    pub fn next_frame(&mut self) -> (usize, f64) {
        let frame = self.frame;
        self.frame += 1;
        (frame, frame as f64 * self.interval_ms)
    }
}

/// What the badge rendered on one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameRecord {
    pub frame: usize,
    pub time_ms: f64,
    pub mode: &'static str,
    #[serde(flatten)]
    pub transform: RenderTransform,
}

/// Outcome of a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    /// Frames rendered.
    pub frames: usize,
    /// Frame on which the last gesture event was delivered.
    pub release_frame: Option<usize>,
    /// Whether the badge was idle again when the replay stopped.
    pub settled: bool,
}

impl ReplaySummary {
    /// Frames between the last event and the badge coming to rest.
    pub fn frames_to_rest(&self) -> Option<usize> {
        if !self.settled {
            return None;
        }
        self.release_frame.map(|release| self.frames - release - 1)
    }
}

/// Replays `gesture` through `badge`, calling `on_frame` once per frame.
///
/// Stops as soon as every event has been delivered and the badge is idle,
/// or after `max_frames` frames.
pub fn run<F>(
    badge: &mut Badge,
    gesture: &Gesture,
    rate: u32,
    max_frames: usize,
    mut on_frame: F,
) -> ReplaySummary
where
    F: FnMut(&FrameRecord),
{
    let mut clock = FrameClock::new(rate);
    let mut pending = gesture.events().iter().peekable();
    let mut release_frame = None;
    let mut frames = 0;
    let mut settled = false;

    while frames < max_frames {
        let (frame, now) = clock.next_frame();

        while let Some(event) = pending.next_if(|e| e.at_ms() <= now) {
            debug!(frame, ?event, "delivering pointer event");
            event.apply(badge);
            if pending.peek().is_none() {
                release_frame = Some(frame);
            }
        }

        badge.tick(now);
        let record = FrameRecord {
            frame,
            time_ms: now,
            mode: badge.mode().as_str(),
            transform: badge.render_transform(),
        };
        on_frame(&record);
        frames += 1;

        if release_frame.is_some() && badge.mode() == Mode::Idle {
            settled = true;
            break;
        }
    }

    badge.dispose();
    let summary = ReplaySummary {
        frames,
        release_frame,
        settled,
    };
    info!(?summary, "replay finished");
    summary
}

/// Writes one frame in the requested format.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_frame<W: Write>(
    out: &mut W,
    format: OutputFormat,
    record: &FrameRecord,
) -> io::Result<()> {
    match format {
        OutputFormat::Plain => writeln!(
            out,
            "{:>5} {:>9.1}ms {:<8} rot {:>8.3}° ext {:>7.2}px{}",
            record.frame,
            record.time_ms,
            record.mode,
            record.transform.rotation_degrees,
            record.transform.extension_px,
            if record.transform.overlay_active {
                " overlay"
            } else {
                ""
            }
        ),
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, record).map_err(io::Error::other)?;
            writeln!(out)
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::gesture::GestureEvent;
    use lanyard::SimConfig;

    #[test]
    fn clock_advances_at_rate() {
        let mut clock = FrameClock::new(50);
        assert_eq!(clock.next_frame(), (0, 0.0));
        assert_eq!(clock.next_frame(), (1, 20.0));
        assert_eq!(clock.next_frame(), (2, 40.0));
    }

    #[test]
    fn replay_settles_after_release() {
        let config = SimConfig::default();
        let gesture = Gesture::hold_and_release(12.0, 0.0, &config);
        let mut badge = Badge::new(config).unwrap();

        let mut records = Vec::new();
        let summary = run(&mut badge, &gesture, 60, 3600, |r| records.push(*r));

        assert!(summary.settled);
        assert_eq!(records.len(), summary.frames);
        assert_eq!(records.last().unwrap().mode, "idle");
        assert!(records.iter().any(|r| r.mode == "dragging"));
        assert!(records.iter().any(|r| r.mode == "settling"));
        assert!(summary.frames_to_rest().unwrap() > 0);
        assert!(badge.is_disposed());
    }

    #[test]
    fn replay_stops_at_max_frames() {
        let gesture = Gesture::new(vec![
            GestureEvent::Start { at_ms: 0.0 },
            GestureEvent::Move {
                offset_x: 40.0,
                offset_y: 0.0,
                at_ms: 16.0,
            },
        ])
        .unwrap();
        let mut badge = Badge::default();

        let summary = run(&mut badge, &gesture, 60, 30, |_| {});
        assert_eq!(summary.frames, 30);
        assert!(!summary.settled);
        assert_eq!(summary.frames_to_rest(), None);
    }

    #[test]
    fn plain_output_marks_overlay() {
        let record = FrameRecord {
            frame: 3,
            time_ms: 50.0,
            mode: "dragging",
            transform: RenderTransform {
                rotation_degrees: -12.0,
                extension_px: 60.0,
                overlay_active: true,
            },
        };
        let mut out = Vec::new();
        write_frame(&mut out, OutputFormat::Plain, &record).unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(line.contains("dragging"));
        assert!(line.contains("-12.000"));
        assert!(line.trim_end().ends_with("overlay"));
    }

    #[test]
    fn json_output_is_flat() {
        let record = FrameRecord {
            frame: 0,
            time_ms: 0.0,
            mode: "idle",
            transform: RenderTransform::default(),
        };
        let mut out = Vec::new();
        write_frame(&mut out, OutputFormat::Json, &record).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["mode"], "idle");
        assert_eq!(value["rotation_degrees"], 0.0);
        assert_eq!(value["overlay_active"], false);
    }
}
