use std::{cell::Cell, rc::Rc};

use super::*;
use crate::animation::descriptor::AnimationDescriptor;
use crate::foundation::clock::ManualClock;

fn engine() -> (IndicatorEngine, ManualClock) {
    let clock = ManualClock::new();
    let mut e = IndicatorEngine::with_parts(
        IndicatorConfig::default(),
        StdRng::seed_from_u64(1),
        clock.clone(),
    )
    .unwrap();
    e.layout(Rect::new(0.0, 0.0, 100.0, 100.0));
    (e, clock)
}

fn counter(e: &mut IndicatorEngine) -> Rc<Cell<u32>> {
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    e.set_completion(move |_| h.set(h.get() + 1));
    hits
}

fn step(e: &mut IndicatorEngine, clock: &ManualClock, secs: f64) {
    clock.advance(secs);
    e.tick();
}

#[test]
fn fresh_engine_is_stopped_and_hidden() {
    let (e, _) = engine();
    assert_eq!(e.state(), PlaybackState::Stopped);
    assert_eq!(e.opacity_target(), None);
    assert_eq!(e.snapshot().opacity, 0.0);
    for beam in e.beams() {
        assert_eq!(beam.layer().animation_count(), 0);
        assert_eq!(beam.layer().fill(), Rgba8::RED);
    }
}

#[test]
fn play_pause_stop_scenario() {
    let (mut e, clock) = engine();
    let hits = counter(&mut e);

    e.animate_playback();
    assert_eq!(e.state(), PlaybackState::Playing);
    step(&mut e, &clock, 1.0);

    e.pause_playback();
    assert_eq!(e.state(), PlaybackState::Paused);
    step(&mut e, &clock, 0.5);

    e.stop_playback();
    assert_eq!(e.state(), PlaybackState::Stopped);

    step(&mut e, &clock, 0.2);
    assert_eq!(hits.get(), 0);
    step(&mut e, &clock, 0.07);
    assert_eq!(hits.get(), 1);
    assert!(!e.has_pending_completion());

    step(&mut e, &clock, 5.0);
    assert_eq!(hits.get(), 1);
    assert_eq!(e.state(), PlaybackState::Stopped);
}

#[test]
fn each_beam_gets_seed_and_loop() {
    let (mut e, _) = engine();
    e.animate_playback();
    for beam in e.beams() {
        let keys: Vec<_> = beam.layer().animation_keys().collect();
        assert_eq!(keys, vec![AnimationKey::Path, AnimationKey::Loop]);
    }
    let target = e.opacity_target();
    assert_eq!(target, Some(1.0));
}

#[test]
fn seeds_are_transient_and_loops_persist() {
    let (mut e, clock) = engine();
    e.animate_playback();
    step(&mut e, &clock, 0.4);
    for beam in e.beams() {
        let keys: Vec<_> = beam.layer().animation_keys().collect();
        assert_eq!(keys, vec![AnimationKey::Loop]);
    }
    step(&mut e, &clock, 100.0);
    assert_eq!(e.state(), PlaybackState::Playing);
}

#[test]
fn seed_starts_from_live_path_and_lands_on_first_waypoint() {
    let (mut e, clock) = engine();
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    e.animate_playback();
    for beam in e.beams() {
        assert!((beam.level(bounds, clock.now()) - 5.0).abs() < 1e-9);
    }

    clock.advance(0.35);
    let first_levels: Vec<f64> = e
        .beams()
        .iter()
        .map(|b| {
            let looped = b.layer().animation(AnimationKey::Loop).unwrap();
            let AnimationDescriptor::Keyframe(k) = looped else {
                panic!("loop must be a keyframe descriptor");
            };
            crate::engine::beam::path_level(k.values[0].as_path().unwrap(), bounds)
        })
        .collect();
    for (beam, level) in e.beams().iter().zip(first_levels) {
        assert!((beam.level(bounds, clock.now()) - level).abs() < 1e-6);
    }
}

#[test]
fn beams_are_randomized_independently() {
    let (mut e, _) = engine();
    e.animate_playback();
    let loops: Vec<_> = e
        .beams()
        .iter()
        .map(|b| b.layer().animation(AnimationKey::Loop).cloned().unwrap())
        .collect();
    assert_ne!(loops[0], loops[1]);
    assert_ne!(loops[1], loops[2]);
}

#[test]
fn replaying_supersedes_every_loop() {
    let (mut e, _) = engine();
    e.animate_playback();
    let before: Vec<_> = e
        .beams()
        .iter()
        .map(|b| b.layer().animation(AnimationKey::Loop).cloned().unwrap())
        .collect();
    e.animate_playback();
    assert_eq!(e.state(), PlaybackState::Playing);
    for (beam, old) in e.beams().iter().zip(before) {
        assert_eq!(beam.layer().animation_count(), 2);
        assert_ne!(beam.layer().animation(AnimationKey::Loop), Some(&old));
    }
}

#[test]
fn interrupted_stop_never_fires() {
    for interrupt in [
        PlaybackState::Playing,
        PlaybackState::Paused,
        PlaybackState::Stopped,
    ] {
        let (mut e, clock) = engine();
        e.animate_playback();
        step(&mut e, &clock, 1.0);
        let hits = counter(&mut e);

        e.stop_playback();
        step(&mut e, &clock, 0.1);
        e.set_state(interrupt);
        step(&mut e, &clock, 0.3);

        let expected = u32::from(interrupt == PlaybackState::Stopped);
        assert_eq!(hits.get(), expected, "interrupted by {interrupt}");
        assert_eq!(e.has_pending_completion(), expected == 0);
    }
}

#[test]
fn completion_can_restart_playback() {
    let (mut e, clock) = engine();
    e.animate_playback();
    step(&mut e, &clock, 1.0);
    e.set_completion(|e| e.animate_playback());

    e.stop_playback();
    step(&mut e, &clock, 0.3);

    assert_eq!(e.state(), PlaybackState::Playing);
    assert_eq!(e.opacity_target(), Some(1.0));
    assert!(!e.has_pending_completion());
    for beam in e.beams() {
        assert!(beam.is_looping());
    }
}

#[test]
fn completion_can_register_the_next_completion() {
    let (mut e, clock) = engine();
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));
    let (f, s) = (first.clone(), second.clone());
    e.set_completion(move |e| {
        f.set(f.get() + 1);
        e.set_completion(move |_| s.set(s.get() + 1));
    });

    e.animate_playback();
    step(&mut e, &clock, 1.0);
    e.stop_playback();
    step(&mut e, &clock, 0.3);
    assert_eq!((first.get(), second.get()), (1, 0));
    assert!(e.has_pending_completion());

    e.animate_playback();
    step(&mut e, &clock, 1.0);
    e.stop_playback();
    step(&mut e, &clock, 0.3);
    assert_eq!((first.get(), second.get()), (1, 1));
    assert!(!e.has_pending_completion());
}

#[test]
fn reset_interrupts_stop_and_clears_everything() {
    let (mut e, clock) = engine();
    e.animate_playback();
    step(&mut e, &clock, 0.5);
    let hits = counter(&mut e);
    e.stop_playback();
    e.reset();
    step(&mut e, &clock, 1.0);

    assert_eq!(hits.get(), 0);
    assert_eq!(e.state(), PlaybackState::Stopped);
    assert_eq!(e.layer().animation_count(), 0);
    for beam in e.beams() {
        assert_eq!(beam.layer().animation_count(), 0);
    }
}

#[test]
fn color_change_keeps_animations() {
    let (mut e, clock) = engine();
    e.animate_playback();
    step(&mut e, &clock, 0.5);
    let loops_before: Vec<_> = e
        .beams()
        .iter()
        .map(|b| b.layer().animation(AnimationKey::Loop).cloned())
        .collect();

    let blue = Rgba8::opaque(0, 0, 255);
    e.set_color(blue);
    assert_eq!(e.color(), blue);
    for (beam, old) in e.beams().iter().zip(loops_before) {
        assert_eq!(beam.layer().fill(), blue);
        assert_eq!(beam.layer().animation(AnimationKey::Loop).cloned(), old);
    }
    assert_eq!(e.state(), PlaybackState::Playing);
    assert_eq!(e.opacity_target(), Some(1.0));
}

#[test]
fn fade_in_continues_from_live_opacity() {
    let (mut e, clock) = engine();
    e.animate_playback();
    step(&mut e, &clock, 0.5);
    e.stop_playback();
    // Halfway through the fade out (0.16 delay + 0.05).
    step(&mut e, &clock, 0.21);
    let live = e.snapshot().opacity;
    assert!(live > 0.0 && live < 1.0);

    e.animate_playback();
    match e.layer().animation(AnimationKey::Opacity) {
        Some(AnimationDescriptor::Basic(b)) => {
            assert!((b.from.as_scalar().unwrap() - live).abs() < 1e-9);
        }
        other => panic!("unexpected opacity descriptor {other:?}"),
    }
}

#[test]
fn layout_recomputes_static_geometry() {
    let (mut e, _) = engine();
    e.layout(Rect::new(10.0, 10.0, 210.0, 50.0));
    assert_eq!(e.bounds(), Rect::new(10.0, 10.0, 210.0, 50.0));

    let frames: Vec<Rect> = e.beams().iter().map(|b| b.layer().frame()).collect();
    assert_eq!(frames[0], Rect::new(0.0, 0.0, 50.0, 40.0));
    assert_eq!(frames[1], Rect::new(75.0, 0.0, 125.0, 40.0));
    assert_eq!(frames[2], Rect::new(150.0, 0.0, 200.0, 40.0));
    for beam in e.beams() {
        assert_eq!(beam.layer().animation_count(), 0);
    }
}

#[test]
fn snapshot_serializes_for_hosts() {
    let (mut e, clock) = engine();
    e.animate_playback();
    clock.advance(0.1);
    let snap = e.snapshot();
    assert_eq!(snap.state, PlaybackState::Playing);
    assert_eq!(snap.beams.len(), 3);
    assert!((snap.opacity - 0.5).abs() < 1e-9);

    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["state"], "playing");
    assert_eq!(json["beams"][1]["placement"], "center");
    assert!(json["beams"][0]["path"].as_str().unwrap().starts_with('M'));
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = IndicatorConfig {
        waypoint_count: 0,
        ..IndicatorConfig::default()
    };
    let built = IndicatorEngine::with_parts(cfg, StdRng::seed_from_u64(0), ManualClock::new());
    assert!(built.is_err());
}
