//! Property tests for the camera controller.
//!
//! These drive the controller through arbitrary wheel/drag/frame-time sequences and check
//! the invariants the renderer relies on: zoom stays within its limits, the sampled region
//! never leaves the texture when zoomed in, and smoothing never overshoots.

use mag_common::Vec2;
use mag_display::{clamp_pan, pointer_to_texture, CameraConfig, CameraController, InputSnapshot};
use proptest::prelude::*;

const TEXTURE: Vec2 = Vec2::new(6400.0, 1440.0);
const VIEWPORT: Vec2 = Vec2::new(1920.0, 1080.0);

#[derive(Debug, Clone, Copy)]
enum Step {
    Wheel(f64, Vec2),
    Press(Vec2),
    Move(Vec2),
    Release(Vec2),
}

fn arbitrary_pointer() -> impl Strategy<Value = Vec2> {
    (0.0f64..1920.0, 0.0f64..1080.0).prop_map(|(x, y)| Vec2::new(x, y))
}

fn arbitrary_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (prop_oneof![Just(1.0), Just(-1.0), -3.0f64..3.0], arbitrary_pointer())
            .prop_map(|(delta, p)| Step::Wheel(delta, p)),
        1 => arbitrary_pointer().prop_map(Step::Press),
        3 => arbitrary_pointer().prop_map(Step::Move),
        1 => arbitrary_pointer().prop_map(Step::Release),
    ]
}

fn snapshot(step: Step, dt: f64) -> InputSnapshot {
    let base = InputSnapshot {
        dt,
        ..InputSnapshot::default()
    };
    match step {
        Step::Wheel(wheel, pointer) => InputSnapshot {
            pointer,
            wheel,
            ..base
        },
        Step::Press(pointer) => InputSnapshot {
            pointer,
            drag_started: true,
            ..base
        },
        Step::Move(pointer) => InputSnapshot { pointer, ..base },
        Step::Release(pointer) => InputSnapshot {
            pointer,
            drag_ended: true,
            ..base
        },
    }
}

proptest! {
    #[test]
    fn zoom_stays_within_limits(
        steps in prop::collection::vec((arbitrary_step(), 0.0f64..0.25), 1..200)
    ) {
        let config = CameraConfig::default();
        let mut camera = CameraController::new(config, Vec2::new(4480.0, 0.0)).unwrap();

        for (step, dt) in steps {
            let output = camera.update(&snapshot(step, dt), TEXTURE, VIEWPORT);
            let state = camera.state();
            prop_assert!(state.zoom >= config.min_zoom && state.zoom <= config.max_zoom);
            prop_assert!(state.target_zoom >= config.min_zoom && state.target_zoom <= config.max_zoom);

            // When the view is smaller than the texture on an axis, sampling stays inside it
            let source = output.rects.source;
            if source.width < TEXTURE.x {
                prop_assert!(source.x >= -1e-6 && source.right() <= TEXTURE.x + 1e-6);
            }
            if source.height < TEXTURE.y {
                prop_assert!(source.y >= -1e-6 && source.bottom() <= TEXTURE.y + 1e-6);
            }
        }
    }

    #[test]
    fn clamp_is_idempotent(
        pan in (-10_000.0f64..10_000.0, -10_000.0f64..10_000.0),
        zoom in 0.1f64..300.0,
        texture in (1.0f64..8000.0, 1.0f64..8000.0),
        viewport in (1.0f64..4000.0, 1.0f64..4000.0),
    ) {
        let texture = Vec2::new(texture.0, texture.1);
        let viewport = Vec2::new(viewport.0, viewport.1);
        let once = clamp_pan(Vec2::new(pan.0, pan.1), zoom, texture, viewport);
        let twice = clamp_pan(once, zoom, texture, viewport);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn smoothing_converges_without_overshoot(
        notches in -40i32..40,
        pan in (0.0f64..4000.0, 0.0f64..400.0),
        pointer in arbitrary_pointer(),
        dt in 0.001f64..0.1,
    ) {
        let mut camera = CameraController::new(CameraConfig::default(), Vec2::new(pan.0, pan.1)).unwrap();
        for _ in 0..notches.unsigned_abs() {
            camera.apply_wheel(f64::from(notches.signum()), pointer);
        }
        let target = *camera.state();

        let mut previous = target;
        for _ in 0..5000 {
            camera.tick(dt);
            let current = *camera.state();
            prop_assert!(
                (target.target_zoom - current.zoom).abs()
                    <= (target.target_zoom - previous.zoom).abs() + 1e-12
            );
            prop_assert!(
                (target.target_pan.x - current.pan.x).abs()
                    <= (target.target_pan.x - previous.pan.x).abs() + 1e-9
            );
            // Never crosses the target
            prop_assert!(
                (current.zoom - target.target_zoom) * (previous.zoom - target.target_zoom) >= 0.0
            );
            previous = current;
        }

        prop_assert!((camera.zoom() - target.target_zoom).abs() < 1e-6);
        prop_assert!(camera.pan().max_abs_diff(target.target_pan) < 1e-6);
    }

    #[test]
    fn anchor_stays_under_pointer_after_convergence(
        pan in (0.0f64..3000.0, 0.0f64..300.0),
        pointer in arbitrary_pointer(),
        notches in 1u32..20,
        zoom_in in any::<bool>(),
    ) {
        let mut camera = CameraController::new(CameraConfig::default(), Vec2::new(pan.0, pan.1)).unwrap();
        let anchor = camera.pointer_to_texture(pointer);
        camera.apply_wheel(if zoom_in { 1.0 } else { -1.0 }, pointer);
        for _ in 1..notches {
            // Repeated notches before any smoothing keep the same anchor
            camera.apply_wheel(if zoom_in { 1.0 } else { -1.0 }, pointer);
        }
        for _ in 0..4000 {
            camera.tick(1.0 / 60.0);
        }
        let state = camera.state();
        let mapped = pointer_to_texture(pointer, state.pan, state.zoom);
        prop_assert!(mapped.max_abs_diff(anchor) < 1e-6);
    }
}
