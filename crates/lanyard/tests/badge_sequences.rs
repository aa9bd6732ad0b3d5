#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::float_cmp)]

//! Scenario tests driving a [`Badge`] through complete gestures the way a
//! host render loop would.

use lanyard::integrator::{REST_ANGLE, REST_ANGLE_VELOCITY, REST_STRETCH, REST_STRETCH_VELOCITY};
use lanyard::{Badge, DragSample, Mode, PointerKind, SimConfig, Viewport, frame_ms};

const FRAME: f64 = 1000.0 / 60.0;

fn portfolio_config() -> SimConfig {
    SimConfig {
        base_length: 140.0,
        max_stretch: 140.0,
        max_angle_degrees: 16.0,
        ..SimConfig::default()
    }
}

/// Holds the badge at `offset_x` long enough for the release velocity to
/// vanish, then lets go. Returns the release timestamp.
fn hold_and_release(badge: &mut Badge, offset_x: f64) -> f64 {
    badge.handle_drag_start(0.0);
    badge.handle_drag_move(DragSample::new(offset_x, 0.0, 16.0));
    badge.handle_drag_move(DragSample::new(offset_x, 0.0, 200.0));
    badge.handle_drag_end(216.0);
    216.0
}

// =============================================================================
// Direct manipulation
// =============================================================================

#[test]
fn drag_sets_rotation_and_extension() {
    let mut badge = Badge::default();
    badge.configure(portfolio_config()).unwrap();
    badge.handle_drag_start(0.0);

    badge.handle_drag_move(DragSample::new(100.0, 0.0, 16.0));
    let t = badge.render_transform();
    assert!((t.rotation_degrees - -12.0).abs() < 1e-9);
    assert!(t.rotation_degrees.abs() <= 16.0);
    assert_eq!(t.extension_px, 0.0);
    assert!(!t.overlay_active);

    badge.handle_drag_move(DragSample::new(0.0, 400.0, 32.0));
    let t = badge.render_transform();
    assert!(t.rotation_degrees.abs() < 1e-9);
    assert_eq!(t.extension_px, 140.0);
    assert!(t.overlay_active);
}

#[test]
fn drag_rotation_is_clamped() {
    let mut badge = Badge::new(portfolio_config()).unwrap();
    badge.handle_drag_start(0.0);

    badge.handle_drag_move(DragSample::new(200.0, 0.0, 16.0));
    assert!((badge.render_transform().rotation_degrees - -16.0).abs() < 1e-9);

    badge.handle_drag_move(DragSample::new(-900.0, 0.0, 32.0));
    assert!((badge.render_transform().rotation_degrees - 16.0).abs() < 1e-9);
}

#[test]
fn touch_viewport_swings_less() {
    let viewport = Viewport::new(800.0, PointerKind::Coarse);
    let mut badge = Badge::for_viewport(140.0, viewport).unwrap();
    badge.handle_drag_start(0.0);
    badge.handle_drag_move(DragSample::new(500.0, 2000.0, 16.0));

    let t = badge.render_transform();
    assert!((t.rotation_degrees - -10.0).abs() < 1e-9);
    assert_eq!(t.extension_px, 160.0);
}

// =============================================================================
// Settling
// =============================================================================

#[test]
fn release_swings_with_shrinking_envelope_until_rest() {
    let mut badge = Badge::new(portfolio_config()).unwrap();
    let mut now = hold_and_release(&mut badge, 100.0);
    assert_eq!(badge.mode(), Mode::Settling);
    assert_eq!(badge.state().angle_velocity, 0.0);

    let mut angles = vec![badge.state().angle];
    let mut steps = 0;
    while badge.mode() == Mode::Settling {
        assert!(steps < 500, "badge did not settle within 500 frames");
        now += FRAME;
        badge.tick(now);
        steps += 1;
        if badge.mode() == Mode::Settling {
            angles.push(badge.state().angle);
        }
    }

    assert_eq!(badge.mode(), Mode::Idle);

    // The badge must actually swing through vertical at least once.
    assert!(angles.iter().any(|a| *a > 0.0));

    let peaks: Vec<f64> = angles
        .windows(3)
        .filter(|w| w[1].abs() >= w[0].abs() && w[1].abs() >= w[2].abs())
        .map(|w| w[1].abs())
        .collect();
    assert!(!peaks.is_empty());
    assert!(peaks[0] < angles[0].abs());
    for pair in peaks.windows(2) {
        assert!(
            pair[1] < pair[0],
            "swing envelope grew: {} -> {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn stretched_release_springs_back() {
    let mut badge = Badge::new(portfolio_config()).unwrap();
    badge.handle_drag_start(0.0);
    badge.handle_drag_move(DragSample::new(0.0, 400.0, 16.0));
    badge.handle_drag_end(32.0);

    let mut now = 32.0;
    let mut min_extension = f64::MAX;
    let mut frames = 0;
    while badge.mode() == Mode::Settling && frames < 1000 {
        now += FRAME;
        badge.tick(now);
        frames += 1;
        let t = badge.render_transform();
        assert!((0.0..=140.0).contains(&t.extension_px));
        min_extension = min_extension.min(t.extension_px);
    }

    assert_eq!(badge.mode(), Mode::Idle);
    assert_eq!(min_extension, 0.0);
    assert!(!badge.render_transform().overlay_active);
}

#[test]
fn fast_pull_bounces_off_max_stretch() {
    let mut badge = Badge::new(portfolio_config()).unwrap();
    badge.handle_drag_start(0.0);
    badge.handle_drag_move(DragSample::new(0.0, 400.0, 5.0));
    assert!(badge.state().stretch_velocity > 0.0);
    badge.handle_drag_end(5.0);

    badge.tick(5.0 + FRAME);
    let state = badge.state();
    assert_eq!(state.stretch, 140.0);
    assert!(state.stretch_velocity < 0.0);
}

#[test]
fn drag_start_preempts_settling() {
    let mut badge = Badge::new(portfolio_config()).unwrap();
    let mut now = hold_and_release(&mut badge, 120.0);
    for _ in 0..5 {
        now += FRAME;
        badge.tick(now);
    }
    assert_eq!(badge.mode(), Mode::Settling);
    assert!(badge.scheduled_frame().is_some());

    badge.handle_drag_start(now);
    assert_eq!(badge.mode(), Mode::Dragging);
    assert!(badge.scheduled_frame().is_none());

    let held = badge.state();
    for _ in 0..10 {
        now += FRAME;
        badge.tick(now);
    }
    assert_eq!(badge.state(), held);

    badge.handle_drag_end(now);
    assert_eq!(badge.mode(), Mode::Settling);
    assert!(badge.scheduled_frame().is_some());
}

#[test]
fn long_pause_does_not_destabilize() {
    let mut badge = Badge::new(portfolio_config()).unwrap();
    let now = hold_and_release(&mut badge, 100.0);

    // A backgrounded tab delivers one frame minutes later.
    badge.tick(now + 300_000.0);
    let state = badge.state();
    assert!(state.is_finite());
    assert!(state.angle.abs() < 0.5);
}

// =============================================================================
// Idle and lifecycle
// =============================================================================

#[test]
fn idle_swing_restarts_after_rest() {
    let mut badge = Badge::new(portfolio_config()).unwrap();
    let mut now = hold_and_release(&mut badge, 60.0);
    while badge.mode() == Mode::Settling {
        now += FRAME;
        badge.tick(now);
    }

    // First idle frame is time zero of the swing.
    now += FRAME;
    badge.tick(now);
    assert_eq!(badge.render_transform().rotation_degrees, 0.0);

    badge.tick(now + 2000.0);
    assert!((badge.render_transform().rotation_degrees - 2.8).abs() < 1e-6);
}

#[test]
fn entering_idle_does_not_jump() {
    // One frame before rest the pose is at most one step from the rest
    // thresholds.
    let dt = FRAME / 1000.0;
    let max_rotation_jump = (REST_ANGLE + REST_ANGLE_VELOCITY * dt).to_degrees();
    let max_extension_jump = REST_STRETCH + 2.0 * REST_STRETCH_VELOCITY * dt;

    for offset_x in [-200.0, -130.0, -60.0, 25.0, 60.0, 100.0, 170.0] {
        for offset_y in [0.0, 40.0, 120.0, 400.0] {
            let mut badge = Badge::new(portfolio_config()).unwrap();
            badge.handle_drag_start(0.0);
            badge.handle_drag_move(DragSample::new(offset_x, offset_y, 16.0));
            badge.handle_drag_move(DragSample::new(offset_x, offset_y, 200.0));
            badge.handle_drag_end(216.0);

            let mut now = 216.0;
            let mut last_settling = badge.render_transform();
            while badge.mode() == Mode::Settling {
                last_settling = badge.render_transform();
                now += FRAME;
                badge.tick(now);
            }
            let first_idle = badge.render_transform();

            let rotation_jump =
                (last_settling.rotation_degrees - first_idle.rotation_degrees).abs();
            let extension_jump = (last_settling.extension_px - first_idle.extension_px).abs();
            assert!(
                rotation_jump < max_rotation_jump,
                "offset ({offset_x}, {offset_y}): rotation jumped {rotation_jump}°"
            );
            assert!(
                extension_jump < max_extension_jump,
                "offset ({offset_x}, {offset_y}): extension jumped {extension_jump}px"
            );
            assert_eq!(first_idle.rotation_degrees, 0.0);
            assert!(!first_idle.overlay_active);
        }
    }
}

#[test]
fn resize_while_stretched_clamps_immediately() {
    let viewport = Viewport::new(1000.0, PointerKind::Fine);
    let mut badge = Badge::for_viewport(140.0, viewport).unwrap();
    badge.handle_drag_start(0.0);
    badge.handle_drag_move(DragSample::new(0.0, 600.0, 16.0));
    assert_eq!(badge.render_transform().extension_px, 200.0);

    badge.resize(Viewport::new(400.0, PointerKind::Fine)).unwrap();
    assert_eq!(badge.render_transform().extension_px, 80.0);
}

#[test]
fn dispose_during_settling_stops_everything() {
    let mut badge = Badge::new(portfolio_config()).unwrap();
    let mut now = hold_and_release(&mut badge, 100.0);
    badge.dispose();
    assert!(badge.scheduled_frame().is_none());

    let frozen = badge.state();
    for _ in 0..30 {
        now += frame_ms(60);
        badge.tick(now);
    }
    assert_eq!(badge.state(), frozen);

    badge.dispose();
    assert!(badge.is_disposed());
}

#[test]
fn rejected_configuration_keeps_badge_running() {
    let mut badge = Badge::new(portfolio_config()).unwrap();
    let bad = SimConfig {
        base_length: 0.0,
        ..portfolio_config()
    };
    assert!(badge.configure(bad).is_err());

    let mut now = hold_and_release(&mut badge, 100.0);
    for _ in 0..500 {
        if badge.mode() == Mode::Idle {
            break;
        }
        now += FRAME;
        badge.tick(now);
    }
    assert_eq!(badge.mode(), Mode::Idle);
}
