use super::*;
use crate::animation::descriptor::{BasicAnimation, FillMode, KeyframeAnimation, RepeatCount};
use crate::animation::timing::TimingFunction;

fn t(secs: f64) -> MediaTime {
    MediaTime(secs)
}

fn fade(from: f64, to: f64) -> BasicAnimation {
    BasicAnimation::new(from, to, 0.2)
        .fill_mode(FillMode::Both)
        .removed_on_completion(false)
}

#[test]
fn same_key_supersedes_and_reports_interruption() {
    let mut layer = Layer::new();
    layer.add_animation(AnimationKey::Opacity, fade(0.0, 0.0).delegate(DelegateToken(1)), t(0.0));
    layer.add_animation(AnimationKey::Opacity, fade(0.0, 1.0), t(0.05));

    assert_eq!(layer.animation_count(), 1);
    assert_eq!(layer.pending_events(), 1);
    let target = layer
        .animation(AnimationKey::Opacity)
        .and_then(|a| a.target())
        .and_then(AnimValue::as_scalar);
    assert_eq!(target, Some(1.0));

    let events = layer.advance(t(0.06));
    assert_eq!(
        events,
        vec![StopEvent {
            token: DelegateToken(1),
            finished: false
        }]
    );
}

#[test]
fn natural_completion_reports_finished_once() {
    let mut layer = Layer::new();
    layer.add_animation(AnimationKey::Opacity, fade(1.0, 0.0).delegate(DelegateToken(7)), t(0.0));

    assert!(layer.advance(t(0.1)).is_empty());
    let events = layer.advance(t(0.25));
    assert_eq!(
        events,
        vec![StopEvent {
            token: DelegateToken(7),
            finished: true
        }]
    );
    assert!(layer.advance(t(1.0)).is_empty());
    // Not auto-removed: still attached and filling forwards.
    assert!(layer.animation(AnimationKey::Opacity).is_some());
    assert_eq!(layer.presentation_opacity(t(1.0)), 0.0);

    // Removing a completed descriptor is not an interruption.
    layer.remove_all_animations();
    assert_eq!(layer.pending_events(), 0);
}

#[test]
fn auto_removed_descriptors_detach_after_completion() {
    let mut layer = Layer::new();
    layer.add_animation(AnimationKey::Path, BasicAnimation::new(0.0, 1.0, 0.35), t(0.0));
    layer.advance(t(0.2));
    assert_eq!(layer.animation_count(), 1);
    layer.advance(t(0.4));
    assert_eq!(layer.animation_count(), 0);
}

#[test]
fn presentation_applies_in_attachment_order() {
    let mut layer = Layer::new();
    layer.set_opacity(0.0);
    assert_eq!(layer.presentation_opacity(t(0.0)), 0.0);

    layer.add_animation(AnimationKey::Opacity, fade(0.0, 1.0), t(0.0));
    let mid = layer.presentation_opacity(t(0.1));
    assert!((mid - 0.5).abs() < 1e-9);
    assert_eq!(layer.opacity(), 0.0);
}

#[test]
fn delayed_descriptor_without_backward_fill_leaves_earlier_one_visible() {
    let mut a = BezPath::new();
    a.move_to((0.0, 0.0));
    a.line_to((1.0, 1.0));
    let mut b = BezPath::new();
    b.move_to((0.0, 0.0));
    b.line_to((3.0, 3.0));

    let mut layer = Layer::new();
    layer.set_path(a.clone());
    layer.add_animation(AnimationKey::Path, BasicAnimation::new(a.clone(), b.clone(), 0.35), t(0.0));
    layer.add_animation(
        AnimationKey::Loop,
        KeyframeAnimation::new(
            vec![b.clone().into(), a.clone().into()],
            vec![0.0, 0.5],
            vec![TimingFunction::Linear; 2],
            1.0,
        )
        .begin_offset(0.35)
        .fill_mode(FillMode::Forwards)
        .autoreverses(true)
        .repeat(RepeatCount::Infinite),
        t(0.0),
    );

    // Before the loop begins only the seed contributes.
    let p = layer.presentation_path(t(0.0));
    assert_eq!(p, a);
    // Once the loop begins it takes over at its first waypoint.
    let p = layer.presentation_path(t(0.35));
    assert_eq!(p, b);
}

#[test]
fn position_moves_frame_center() {
    let mut layer = Layer::new();
    layer.set_frame(Rect::new(0.0, 0.0, 10.0, 20.0));
    layer.set_position(Point::new(50.0, 10.0));
    assert_eq!(layer.frame(), Rect::new(45.0, 0.0, 55.0, 20.0));
    assert_eq!(layer.position(), Point::new(50.0, 10.0));
}
