use super::*;
use crate::{
    foundation::core::Vec2,
    gesture::{input::PointerPoint, state::AnchorMode},
    render::target::MemoryTarget,
};

fn vp() -> Viewport {
    Viewport::new(1000.0, 1600.0)
}

fn centered() -> GestureController<MemoryTarget> {
    let mut c = GestureController::with_state(
        vp(),
        MemoryTarget::new(MemoryTarget::DEFAULT_BOX, vp()),
        TransformState {
            anchor_mode: AnchorMode::Centered,
            ..TransformState::default()
        },
    );
    c.render_now();
    c
}

fn touches(pts: &[(f64, f64)]) -> PointerEvent {
    PointerEvent::touch(
        pts.iter()
            .enumerate()
            .map(|(i, &(x, y))| PointerPoint::new(i as u32, x, y))
            .collect(),
        false,
    )
}

#[test]
fn drag_moves_and_clamps_offset() {
    let mut c = centered();
    c.begin_drag(1, Point::new(500.0, 800.0));
    c.update_drag(Point::new(700.0, 800.0));
    assert_eq!(c.state().offset, Vec2::new(200.0, 0.0));
    c.update_drag(Point::new(2000.0, 800.0));
    assert_eq!(c.state().offset.x, 400.0);
    c.update_drag(Point::new(500.0, -5000.0));
    assert_eq!(c.state().offset.y, -650.0);
}

#[test]
fn update_drag_without_begin_is_ignored() {
    let mut c = centered();
    c.update_drag(Point::new(900.0, 900.0));
    assert_eq!(c.state().offset, Vec2::ZERO);
    assert!(!c.has_pending_render());
}

#[test]
fn pinch_ratio_and_scale_are_clamped() {
    let mut c = centered();
    assert!(c.begin_pinch(&[Point::new(400.0, 800.0), Point::new(600.0, 800.0)]));
    c.update_pinch(&[Point::new(450.0, 800.0), Point::new(550.0, 800.0)]);
    assert_eq!(c.state().scale, 0.5);
    c.update_pinch(&[Point::new(475.0, 800.0), Point::new(525.0, 800.0)]);
    assert_eq!(c.state().scale, 0.5);
    c.update_pinch(&[Point::new(0.0, 800.0), Point::new(1000.0, 800.0)]);
    assert_eq!(c.state().scale, 2.0);
}

#[test]
fn begin_pinch_ends_drag_even_when_fingers_too_close() {
    let mut c = centered();
    c.begin_drag(0, Point::new(500.0, 800.0));
    assert!(c.target().is_dragging());
    assert!(!c.begin_pinch(&[Point::new(500.0, 800.0), Point::new(505.0, 800.0)]));
    assert!(!c.state().is_dragging());
    assert!(!c.state().is_pinching());
    assert!(!c.target().is_dragging());
}

#[test]
fn update_pinch_with_wrong_touch_count_ends_pinch() {
    let mut c = centered();
    c.begin_pinch(&[Point::new(400.0, 800.0), Point::new(600.0, 800.0)]);
    c.update_pinch(&[Point::new(400.0, 800.0)]);
    assert_eq!(c.state().phase, GesturePhase::Idle);
}

#[test]
fn update_pinch_starts_pinch_when_idle() {
    let mut c = centered();
    c.update_pinch(&[Point::new(400.0, 800.0), Point::new(600.0, 800.0)]);
    assert!(c.state().is_pinching());
    assert_eq!(c.state().scale, 1.0);
}

#[test]
fn updates_coalesce_into_one_frame() {
    let mut c = centered();
    let before = c.target().writes().transform;
    c.begin_drag(0, Point::new(500.0, 800.0));
    c.update_drag(Point::new(510.0, 800.0));
    c.update_drag(Point::new(520.0, 800.0));
    assert!(c.target().frame_requested());
    assert_eq!(c.target().writes().transform, before);

    assert!(c.on_animation_frame().is_some());
    assert_eq!(c.target().writes().transform, before + 1);
    assert!(c.on_animation_frame().is_none());
}

#[test]
fn end_drag_flushes_pending_render() {
    let mut c = centered();
    c.begin_drag(0, Point::new(500.0, 800.0));
    c.update_drag(Point::new(600.0, 800.0));
    c.end_drag();
    assert!(!c.has_pending_render());
    assert!(!c.target().frame_requested());
    assert!(!c.target().is_dragging());
    let css = c.target().css_transform().unwrap_or_default();
    assert!(css.contains("calc(-50% + 100px)"), "{css}");
}

#[test]
fn wheel_zoom_applies_immediately() {
    let mut c = centered();
    c.apply_wheel_zoom(120.0);
    assert!((c.state().scale - 0.9).abs() < 1e-12);
    assert!(!c.has_pending_render());
    assert!(c.target().css_transform().unwrap_or_default().contains("scale(0.9,0.9)"));
    c.apply_wheel_zoom(-1.0);
    assert!((c.state().scale - 0.99).abs() < 1e-12);
    for _ in 0..100 {
        c.apply_wheel_zoom(1.0);
    }
    assert_eq!(c.state().scale, 0.5);
}

#[test]
fn wheel_off_sprite_is_ignored() {
    let mut c = centered();
    assert!(!c.on_wheel(&WheelEvent {
        delta_y: 1.0,
        on_sprite: false
    }));
    assert_eq!(c.state().scale, 1.0);
}

#[test]
fn second_finger_turns_drag_into_pinch_and_never_back() {
    let mut c = centered();
    let mut down = touches(&[(500.0, 800.0)]);
    down.on_sprite = true;
    assert!(c.on_pointer_down(&down));
    assert!(c.state().is_dragging());

    assert!(c.on_pointer_down(&touches(&[(450.0, 800.0), (550.0, 800.0)])));
    assert!(c.state().is_pinching());
    assert!(!c.target().is_dragging());

    assert!(c.on_pointer_move(&touches(&[(425.0, 800.0), (575.0, 800.0)])));
    assert!((c.state().scale - 1.5).abs() < 1e-12);

    // One finger lifts: the pinch ends and the remaining finger does not drag.
    assert!(c.on_pointer_up(&touches(&[(425.0, 800.0)])));
    assert_eq!(c.state().phase, GesturePhase::Idle);
    c.on_pointer_move(&touches(&[(100.0, 100.0)]));
    assert_eq!(c.state().offset, Vec2::ZERO);
}

#[test]
fn far_two_finger_move_does_not_pinch() {
    let mut c = centered();
    assert!(c.on_pointer_move(&touches(&[(0.0, 0.0), (10.0, 20.0)])));
    assert!(!c.state().is_pinching());
    assert_eq!(c.state().scale, 1.0);
}

#[test]
fn near_sprite_two_finger_move_starts_pinch() {
    let mut c = centered();
    // Sprite occupies 400..600 x 650..950; padding 150.
    c.on_pointer_move(&touches(&[(260.0, 800.0), (300.0, 800.0)]));
    assert!(c.state().is_pinching());
}

#[test]
fn mouse_drag_round_trip() {
    let mut c = centered();
    assert!(!c.on_pointer_down(&PointerEvent::mouse(10.0, 10.0, false)));
    assert!(c.on_pointer_down(&PointerEvent::mouse(500.0, 800.0, true)));
    assert!(c.on_pointer_move(&PointerEvent::mouse(450.0, 700.0, false)));
    assert!(c.on_pointer_up(&PointerEvent::mouse(450.0, 700.0, false)));
    assert_eq!(c.state().offset, Vec2::new(-50.0, -100.0));
    assert!(!c.on_pointer_up(&PointerEvent::mouse(450.0, 700.0, false)));
}

#[test]
fn cancel_cleans_up_like_release() {
    let mut c = centered();
    c.begin_drag(0, Point::new(500.0, 800.0));
    c.update_drag(Point::new(550.0, 800.0));
    c.on_pointer_cancel();
    assert_eq!(c.state().phase, GesturePhase::Idle);
    assert!(!c.has_pending_render());
}

#[test]
fn set_viewport_reclamps_offset() {
    let mut c = centered();
    c.begin_drag(0, Point::new(500.0, 800.0));
    c.update_drag(Point::new(900.0, 800.0));
    c.end_drag();
    assert_eq!(c.state().offset.x, 400.0);
    c.set_viewport(Viewport::new(600.0, 1600.0));
    assert_eq!(c.state().offset.x, 200.0);
    assert_eq!(c.target().viewport, Viewport::new(600.0, 1600.0));
}

#[test]
fn corner_mode_render_writes_back_top_band_clamp() {
    let state = TransformState {
        offset: Vec2::new(0.0, -5000.0),
        ..TransformState::default()
    };
    let mut c =
        GestureController::with_state(vp(), MemoryTarget::new(MemoryTarget::DEFAULT_BOX, vp()), state);
    c.render_now();
    assert_eq!(c.state().offset.y, -650.0);
}

#[test]
fn complete_entry_then_reset() {
    let mut c = GestureController::new(vp(), MemoryTarget::new(MemoryTarget::DEFAULT_BOX, vp()));
    assert_eq!(c.state().anchor_mode, AnchorMode::Corner);
    c.complete_entry();
    assert_eq!(c.state().anchor_mode, AnchorMode::Centered);
    assert!(c.target().css_transform().unwrap_or_default().starts_with("translate3d(calc"));

    c.apply_wheel_zoom(-1.0);
    c.set_flip(FlipX::Mirrored);
    c.begin_drag(0, Point::new(0.0, 0.0));
    c.update_drag(Point::new(10.0, 10.0));
    c.reset_transform();
    assert_eq!(c.state().offset, Vec2::ZERO);
    assert_eq!(c.state().scale, 1.0);
    assert_eq!(c.state().phase, GesturePhase::Idle);
    assert!(!c.target().is_dragging());
    assert!(!c.has_pending_render());
}

#[test]
fn non_finite_input_is_ignored() {
    let mut c = centered();
    c.begin_drag(0, Point::new(f64::NAN, 0.0));
    assert!(!c.state().is_dragging());
    c.begin_drag(0, Point::new(0.0, 0.0));
    c.update_drag(Point::new(f64::INFINITY, 0.0));
    assert_eq!(c.state().offset, Vec2::ZERO);
    c.apply_wheel_zoom(f64::NAN);
    assert_eq!(c.state().scale, 1.0);
}

#[test]
fn rotation_survives_gestures() {
    let mut c = centered();
    c.set_rotation(15.0);
    assert!(c.target().css_transform().unwrap_or_default().contains("rotate(15deg)"));
    c.apply_wheel_zoom(-1.0);
    c.begin_drag(0, Point::new(0.0, 0.0));
    c.update_drag(Point::new(30.0, 0.0));
    c.end_drag();
    assert_eq!(c.state().rotation_deg, 15.0);
    c.set_rotation(f64::NAN);
    assert_eq!(c.state().rotation_deg, 15.0);
}
