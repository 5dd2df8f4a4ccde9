// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::config::AnimationKind;
use crate::error::PlaybackError;
use crate::input::{Key, KeyInput, MouseButton, PointerKind, TouchPoint};
use crate::model::Picture;
use crate::test_support::{Recording, RecordingSurface};
use kurbo::{Point, Rect};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const VIEWPORT: Size = Size::new(1000.0, 800.0);

fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Past the default fade-in
fn opened() -> Duration {
    ms(200)
}

fn pictures(count: usize) -> Vec<Slide> {
    (0..count)
        .map(|i| Picture::new(format!("https://example.com/{i}.jpg"), 800.0, 600.0).into())
        .collect()
}

fn build(count: usize, props: SlideshowProps) -> (Slideshow, Rc<RefCell<Recording>>) {
    build_with(count, props, SlideshowCallbacks::default())
}

fn build_with(
    count: usize,
    props: SlideshowProps,
    callbacks: SlideshowCallbacks,
) -> (Slideshow, Rc<RefCell<Recording>>) {
    let (surface, recording) = RecordingSurface::new(VIEWPORT);
    let slideshow = Slideshow::builder(pictures(count))
        .props(props)
        .callbacks(callbacks)
        .build(Box::new(surface))
        .unwrap();
    (slideshow, recording)
}

/// Build, initialize and let the open animation finish
fn open(count: usize, props: SlideshowProps) -> (Slideshow, Rc<RefCell<Recording>>) {
    let (mut slideshow, recording) = build(count, props);
    slideshow.initialize();
    slideshow.tick(opened());
    assert_eq!(slideshow.state().open_close_phase, OpenClosePhase::Open);
    (slideshow, recording)
}

fn close_counter() -> (SlideshowCallbacks, Rc<Cell<usize>>) {
    let closes = Rc::new(Cell::new(0));
    let counter = closes.clone();
    let callbacks = SlideshowCallbacks {
        on_close: Some(Box::new(move || counter.set(counter.get() + 1))),
        ..Default::default()
    };
    (callbacks, closes)
}

fn record(slideshow: &mut Slideshow, kind: EventKind) -> Rc<RefCell<Vec<SlideshowEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    slideshow.on(kind, move |event| {
        sink.borrow_mut().push(event.clone());
        None
    });
    events
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn press(slideshow: &mut Slideshow, x: f64, y: f64, at: Duration) -> bool {
    slideshow.handle_event(PlatformEvent::PointerDown {
        id: 1,
        kind: PointerKind::Mouse,
        button: MouseButton::Primary,
        position: Point::new(x, y),
        at,
    })
}

fn move_to(slideshow: &mut Slideshow, x: f64, y: f64, at: Duration) -> bool {
    slideshow.handle_event(PlatformEvent::PointerMove {
        id: 1,
        kind: PointerKind::Mouse,
        position: Point::new(x, y),
        at,
    })
}

fn release(slideshow: &mut Slideshow, x: f64, y: f64, at: Duration) -> bool {
    slideshow.handle_event(PlatformEvent::PointerUp {
        id: 1,
        kind: PointerKind::Mouse,
        position: Point::new(x, y),
        at,
    })
}

fn key(slideshow: &mut Slideshow, key: Key, at: Duration) -> bool {
    slideshow.handle_event(PlatformEvent::KeyDown {
        key: KeyInput::new(key),
        at,
    })
}

fn touch(id: u64, x: f64, y: f64) -> TouchPoint {
    TouchPoint {
        id,
        position: Point::new(x, y),
    }
}

// ===== Construction =====

#[test]
fn build_rejects_bad_input() {
    let (surface, _) = RecordingSurface::new(VIEWPORT);
    let err = Slideshow::builder(Vec::new())
        .build(Box::new(surface))
        .unwrap_err();
    assert!(matches!(err, SlideshowError::NoSlides));

    let (surface, _) = RecordingSurface::new(VIEWPORT);
    let props = SlideshowProps {
        initial_slide_index: 3,
        ..Default::default()
    };
    let err = Slideshow::builder(pictures(3))
        .props(props)
        .build(Box::new(surface))
        .unwrap_err();
    assert!(matches!(
        err,
        SlideshowError::SlideOutOfRange { index: 3, len: 3 }
    ));

    let (surface, _) = RecordingSurface::new(VIEWPORT);
    let mut props = SlideshowProps::default();
    props.scale.step = -1.0;
    let err = Slideshow::builder(pictures(3))
        .props(props)
        .build(Box::new(surface))
        .unwrap_err();
    assert!(matches!(err, SlideshowError::InvalidProps(_)));
}

// ===== Lifecycle =====

#[test]
fn initialize_opens_with_fade() {
    let (mut slideshow, recording) = build(3, SlideshowProps::default());
    let opens = record(&mut slideshow, EventKind::Open);
    let opened_events = record(&mut slideshow, EventKind::Opened);
    slideshow.initialize();

    assert!(recording.borrow().listeners_attached);
    assert_eq!(slideshow.state().open_close_phase, OpenClosePhase::Opening);
    assert!(slideshow.is_locked());
    assert_eq!(
        opens.borrow().as_slice(),
        &[SlideshowEvent::Open {
            animation: AnimationKind::Fade
        }]
    );
    assert!(opened_events.borrow().is_empty());

    slideshow.tick(opened());
    assert_eq!(slideshow.state().open_close_phase, OpenClosePhase::Open);
    assert!(!slideshow.is_locked());
    assert_eq!(opened_events.borrow().len(), 1);
    assert_eq!(recording.borrow().state().open_close_phase, OpenClosePhase::Open);
    assert_eq!(recording.borrow().opacity(SurfaceTarget::Overlay), Some(0.85));
}

#[test]
fn inline_opens_without_animation() {
    let props = SlideshowProps {
        inline: true,
        ..Default::default()
    };
    let (mut slideshow, _) = build(2, props);
    slideshow.initialize();
    assert_eq!(slideshow.state().open_close_phase, OpenClosePhase::Open);
    assert!(!slideshow.is_locked());

    assert!(slideshow.close(CloseInteraction::Button));
    assert_eq!(slideshow.state().open_close_phase, OpenClosePhase::Closed);
}

#[test]
fn initialize_twice_is_ignored() {
    let (mut slideshow, _) = build(2, SlideshowProps::default());
    let inits = record(&mut slideshow, EventKind::Init);
    slideshow.initialize();
    slideshow.initialize();
    assert_eq!(inits.borrow().len(), 1);
}

#[test]
fn stepping_past_the_last_slide_closes_once() {
    let (callbacks, closes) = close_counter();
    let (mut slideshow, _) = build_with(3, SlideshowProps::default(), callbacks);
    let close_events = record(&mut slideshow, EventKind::Close);
    slideshow.initialize();
    slideshow.tick(opened());

    assert!(slideshow.show_next());
    assert!(slideshow.show_next());
    assert_eq!(slideshow.state().i, 2);

    assert!(slideshow.show_next());
    assert_eq!(slideshow.state().i, 2);
    assert_eq!(slideshow.state().open_close_phase, OpenClosePhase::Closing);
    assert_eq!(
        close_events.borrow().as_slice(),
        &[SlideshowEvent::Close {
            interaction: CloseInteraction::GalleryEnd
        }]
    );
    assert_eq!(closes.get(), 0);

    // Already closing
    assert!(!slideshow.show_next());

    slideshow.tick(ms(1000));
    assert_eq!(slideshow.state().open_close_phase, OpenClosePhase::Closed);
    assert_eq!(closes.get(), 1);

    slideshow.clean_up();
    assert_eq!(closes.get(), 1);
}

#[test]
fn gallery_end_without_close_is_a_no_op() {
    let props = SlideshowProps {
        close_at_gallery_end: false,
        ..Default::default()
    };
    let (mut slideshow, _) = open(2, props);
    assert!(!slideshow.show_previous());
    assert!(slideshow.show_next());
    assert!(!slideshow.show_next());
    assert_eq!(slideshow.state().i, 1);
    assert_eq!(slideshow.state().open_close_phase, OpenClosePhase::Open);
}

#[test]
fn close_waits_for_the_longest_listener_hint() {
    let (mut slideshow, _) = open(2, SlideshowProps::default());
    slideshow.on(EventKind::Close, |_| Some(ms(1000)));
    slideshow.on(EventKind::Close, |_| Some(ms(400)));

    assert!(slideshow.close(CloseInteraction::Programmatic));
    slideshow.tick(opened() + ms(500));
    assert_eq!(slideshow.state().open_close_phase, OpenClosePhase::Closing);
    slideshow.tick(opened() + ms(1000));
    assert_eq!(slideshow.state().open_close_phase, OpenClosePhase::Closed);
}

#[test]
fn clean_up_is_idempotent() {
    let (mut slideshow, recording) = open(3, SlideshowProps::default());
    let clean_ups = record(&mut slideshow, EventKind::CleanUp);

    slideshow.clean_up();
    slideshow.clean_up();

    assert!(!slideshow.is_mounted());
    assert_eq!(clean_ups.borrow().len(), 1);
    assert_eq!(recording.borrow().detach_calls, 1);
    assert!(!recording.borrow().listeners_attached);

    // Everything after clean-up is inert
    let renders = recording.borrow().renders;
    slideshow.set_state(|state| state.i = 2);
    assert_eq!(slideshow.state().i, 0);
    assert!(!slideshow.show_next());
    assert!(!press(&mut slideshow, 500.0, 400.0, ms(300)));
    slideshow.initialize();
    assert!(!slideshow.is_mounted());
    assert_eq!(recording.borrow().renders, renders);
}

#[test]
fn clean_up_while_closing_still_reports_the_close() {
    let (callbacks, closes) = close_counter();
    let (mut slideshow, _) = build_with(2, SlideshowProps::default(), callbacks);
    slideshow.initialize();
    slideshow.tick(opened());

    assert!(slideshow.on_request_close());
    slideshow.clean_up();
    assert_eq!(closes.get(), 1);

    slideshow.tick(ms(2000));
    assert_eq!(closes.get(), 1);
}

#[test]
fn pending_open_elsewhere_skips_the_close_animation() {
    let coordinator = OpenCoordinator::new();
    let (surface, _) = RecordingSurface::new(VIEWPORT);
    let mut first = Slideshow::builder(pictures(2))
        .open_coordinator(coordinator.clone())
        .build(Box::new(surface))
        .unwrap();
    first.initialize();
    first.tick(opened());

    coordinator.announce_open();
    assert!(first.close(CloseInteraction::Programmatic));
    assert_eq!(first.state().open_close_phase, OpenClosePhase::Closed);

    let (surface, _) = RecordingSurface::new(VIEWPORT);
    let mut second = Slideshow::builder(pictures(2))
        .open_coordinator(coordinator.clone())
        .build(Box::new(surface))
        .unwrap();
    second.initialize();
    assert!(!coordinator.is_open_pending());
}

#[test]
fn float_open_spawns_clones_and_clean_up_removes_them() {
    let props = SlideshowProps {
        animation: crate::config::AnimationSettings {
            open_close: AnimationKind::Float,
            ..Default::default()
        },
        ..Default::default()
    };
    let (mut slideshow, recording) = build(2, props);
    recording
        .borrow_mut()
        .thumbnail_rects
        .insert(0, Rect::new(10.0, 10.0, 110.0, 85.0));
    let opened_events = record(&mut slideshow, EventKind::Opened);
    slideshow.initialize();

    assert_eq!(recording.borrow().live_floats(), 2);
    assert!(slideshow.state().hide_current_slide);
    assert_eq!(slideshow.state().overlay_opacity_for_current_slide, 0.95);

    slideshow.clean_up();
    assert_eq!(recording.borrow().live_floats(), 0);
    assert_eq!(recording.borrow().opacity(SurfaceTarget::Overlay), Some(0.95));
    let renders = recording.borrow().renders;

    // Long past the float duration the cancelled open never completes
    slideshow.tick(Duration::from_secs(60));
    assert!(opened_events.borrow().is_empty());
    assert_eq!(slideshow.state().open_close_phase, OpenClosePhase::Closed);
    let recording = recording.borrow();
    assert_eq!(recording.renders, renders);
    assert_eq!(recording.spawned_floats, 2);
}

#[test]
fn float_without_thumbnail_falls_back_to_fade() {
    let props = SlideshowProps {
        animation: crate::config::AnimationSettings {
            open_close: AnimationKind::Float,
            ..Default::default()
        },
        ..Default::default()
    };
    let (mut slideshow, recording) = build(2, props);
    let opens = record(&mut slideshow, EventKind::Open);
    slideshow.initialize();

    assert_eq!(recording.borrow().spawned_floats, 0);
    assert_eq!(
        opens.borrow().as_slice(),
        &[SlideshowEvent::Open {
            animation: AnimationKind::Fade
        }]
    );
    assert!(!slideshow.state().hide_current_slide);
}

#[test]
fn transparent_pictures_skip_the_backdrop() {
    let mut picture = Picture::new("https://example.com/logo.png", 800.0, 600.0);
    picture.transparent = true;
    let slides = vec![picture.into(), pictures(1).remove(0)];
    let (surface, recording) = RecordingSurface::new(VIEWPORT);
    let mut slideshow = Slideshow::builder(slides)
        .build(Box::new(surface))
        .unwrap();
    slideshow.initialize();
    assert!(recording.borrow().last_current.as_ref().unwrap().transparent_background);

    slideshow.show_next();
    assert!(!recording.borrow().last_current.as_ref().unwrap().transparent_background);
}

// ===== Navigation and state =====

#[test]
fn go_to_slide_checks_the_index() {
    let (mut slideshow, _) = open(3, SlideshowProps::default());
    assert!(matches!(
        slideshow.go_to_slide(7),
        Err(SlideshowError::SlideOutOfRange { index: 7, len: 3 })
    ));
    assert_eq!(slideshow.state().i, 0);
    assert!(matches!(slideshow.go_to_slide(0), Ok(false)));
    assert!(matches!(slideshow.go_to_slide(2), Ok(true)));
    assert_eq!(slideshow.state().i, 2);
}

#[test]
fn neighbours_stay_mounted_once_shown() {
    let (mut slideshow, recording) = open(6, SlideshowProps::default());
    assert_eq!(
        slideshow.state().slides_shown,
        vec![true, true, false, false, false, false]
    );

    slideshow.go_to_slide(4).unwrap();
    assert_eq!(
        slideshow.state().slides_shown,
        vec![true, true, false, true, true, true]
    );

    let recording = recording.borrow();
    assert!(recording.last_slides[0].is_some());
    assert!(recording.last_slides[2].is_none());
}

#[test]
fn set_state_keeps_index_and_scale_valid() {
    let (mut slideshow, _) = open(3, SlideshowProps::default());
    slideshow.set_state(|state| state.i = 10);
    assert_eq!(slideshow.state().i, 2);

    let scale = slideshow.state().scale;
    slideshow.set_state(|state| state.scale = f64::NAN);
    assert_eq!(slideshow.state().scale, scale);
    slideshow.set_state(|state| state.scale = -2.0);
    assert_eq!(slideshow.state().scale, scale);
}

#[test]
fn set_state_clamps_scale_and_keeps_engine_owned_fields() {
    let (mut slideshow, _) = open(3, SlideshowProps::default());
    let limits = slideshow.scale_limits();

    slideshow.set_state(|state| state.scale = 100.0);
    assert!(approx(slideshow.state().scale, limits.max));
    slideshow.set_state(|state| state.scale = 1e-6);
    assert!(approx(slideshow.state().scale, limits.min));

    slideshow.set_state(|state| state.pan_and_zoom_mode = true);
    assert!(!slideshow.state().pan_and_zoom_mode);
    slideshow.set_state(|state| state.open_close_phase = OpenClosePhase::Closed);
    assert_eq!(slideshow.state().open_close_phase, OpenClosePhase::Open);

    // The mode still goes through its own commands
    slideshow.enter_pan_and_zoom_mode().unwrap();
    slideshow.set_state(|state| state.scale = 100.0);
    assert_eq!(slideshow.state().scale, 100.0);
    slideshow.exit_pan_and_zoom_mode().unwrap();
    assert!(!slideshow.state().pan_and_zoom_mode);
    assert!(slideshow.state().scale <= limits.max);
}

#[test]
fn commands_keep_index_and_scale_in_bounds() {
    let props = SlideshowProps {
        close_at_gallery_end: false,
        ..Default::default()
    };
    let (mut slideshow, _) = open(4, props);
    let mut now = opened();
    let steps: [fn(&mut Slideshow); 9] = [
        |s| {
            s.scale_up();
        },
        |s| {
            s.scale_down();
        },
        |s| {
            s.toggle_scale();
        },
        |s| {
            s.show_next();
        },
        |s| {
            s.show_previous();
        },
        |s| {
            s.show_last();
        },
        |s| {
            let _ = s.go_to_slide(1);
        },
        |s| s.on_resize(Size::new(400.0, 300.0)),
        |s| s.on_resize(VIEWPORT),
    ];
    for round in 0..3 {
        for (n, step) in steps.iter().enumerate() {
            step(&mut slideshow);
            now += ms(1000);
            slideshow.tick(now);

            let state = slideshow.state();
            assert!(state.i < 4, "round {round} step {n}");
            if !state.pan_and_zoom_mode {
                let limits = slideshow.scale_limits();
                assert!(
                    state.scale >= limits.min - 1e-9 && state.scale <= limits.max + 1e-9,
                    "round {round} step {n}: {} not in {:?}",
                    state.scale,
                    limits
                );
            }
        }
    }
}

// ===== Locking =====

#[test]
fn lock_blocks_user_input_but_not_navigation() {
    let (mut slideshow, _) = open(3, SlideshowProps::default());
    slideshow.lock();

    assert!(!slideshow.close(CloseInteraction::Button));
    assert!(!key(&mut slideshow, Key::Escape, ms(300)));
    assert!(!press(&mut slideshow, 500.0, 400.0, ms(310)));
    assert!(!slideshow.scale_up());
    assert_eq!(slideshow.state().open_close_phase, OpenClosePhase::Open);

    assert!(slideshow.show_next());
    assert_eq!(slideshow.state().i, 1);

    slideshow.unlock();
    assert!(slideshow.close(CloseInteraction::Button));
}

// ===== Drag =====

#[test]
fn drag_starts_past_the_threshold() {
    let (mut slideshow, recording) = open(3, SlideshowProps::default());
    let starts = record(&mut slideshow, EventKind::DragStart);

    assert!(press(&mut slideshow, 500.0, 400.0, ms(300)));
    assert!(!move_to(&mut slideshow, 503.0, 400.0, ms(310)));
    assert!(starts.borrow().is_empty());
    assert!(!slideshow.drag_view().dragging);

    // Leftwards: the first slide resists rightward drags
    assert!(move_to(&mut slideshow, 400.0, 400.0, ms(320)));
    assert_eq!(starts.borrow().len(), 1);
    let view = slideshow.drag_view();
    assert!(view.dragging);
    assert!(approx(view.gesture_offset.x, -95.0));
    let strip = recording
        .borrow()
        .transient(SurfaceTarget::Slides)
        .unwrap();
    assert!(approx(strip.translate.x, -95.0));
}

#[test]
fn long_swipe_changes_slide_after_the_animation() {
    let (mut slideshow, recording) = open(3, SlideshowProps::default());
    let changes = record(&mut slideshow, EventKind::SlideChange);

    press(&mut slideshow, 800.0, 400.0, ms(300));
    move_to(&mut slideshow, 200.0, 400.0, ms(316));
    assert!(release(&mut slideshow, 200.0, 400.0, ms(332)));

    assert!(slideshow.is_locked());
    assert_eq!(slideshow.state().i, 0);

    slideshow.tick(ms(1000));
    assert_eq!(slideshow.state().i, 1);
    assert!(!slideshow.is_locked());
    assert_eq!(
        changes.borrow().as_slice(),
        &[SlideshowEvent::SlideChange { from: 0, to: 1 }]
    );
    assert!(recording.borrow().transient(SurfaceTarget::Slides).is_none());
}

#[test]
fn short_slow_swipe_snaps_back() {
    let (mut slideshow, recording) = open(3, SlideshowProps::default());

    press(&mut slideshow, 500.0, 400.0, ms(300));
    move_to(&mut slideshow, 400.0, 400.0, ms(310));
    // Held still long enough for the speed to go stale
    release(&mut slideshow, 400.0, 400.0, ms(2000));

    assert_eq!(slideshow.state().i, 0);
    assert!(!slideshow.is_locked());
    assert!(slideshow.state().animate_overlay_opacity_duration.is_some());
    slideshow.tick(ms(3000));
    assert!(recording.borrow().transient(SurfaceTarget::Slides).is_none());
    assert_eq!(slideshow.state().animate_overlay_opacity_duration, None);
}

#[test]
fn vertical_drag_closes() {
    let (mut slideshow, recording) = open(3, SlideshowProps::default());
    let closes = record(&mut slideshow, EventKind::Close);

    press(&mut slideshow, 500.0, 100.0, ms(300));
    move_to(&mut slideshow, 500.0, 400.0, ms(316));
    let faded = recording
        .borrow()
        .opacity(SurfaceTarget::Overlay)
        .unwrap();
    assert!(faded < 0.85);

    move_to(&mut slideshow, 500.0, 700.0, ms(332));
    let dragged = recording
        .borrow()
        .transient(SurfaceTarget::Slide(0))
        .unwrap();
    recording.borrow_mut().cleared.clear();
    release(&mut slideshow, 500.0, 700.0, ms(348));

    assert_eq!(slideshow.state().open_close_phase, OpenClosePhase::Closing);
    // The slide drifts on from where it was let go, never back to center
    {
        let recording = recording.borrow();
        assert!(!recording.cleared.contains(&SurfaceTarget::Slide(0)));
        let (drift, duration) = recording.transients[&SurfaceTarget::Slide(0)];
        assert!(duration.is_some());
        assert!(drift.translate.y > dragged.translate.y);
    }
    let closes = closes.borrow();
    assert!(matches!(
        closes.as_slice(),
        [SlideshowEvent::Close {
            interaction: CloseInteraction::Pan { .. }
        }]
    ));
}

#[test]
fn clicks_advance_or_close() {
    let (mut slideshow, _) = open(3, SlideshowProps::default());

    press(&mut slideshow, 500.0, 400.0, ms(300));
    assert!(release(&mut slideshow, 500.0, 400.0, ms(310)));
    assert_eq!(slideshow.state().i, 1);

    press(&mut slideshow, 5.0, 5.0, ms(400));
    assert!(release(&mut slideshow, 5.0, 5.0, ms(410)));
    assert_eq!(slideshow.state().open_close_phase, OpenClosePhase::Closing);
}

// ===== Scale =====

#[test]
fn initial_scale_is_intrinsic_when_it_fits() {
    let (slideshow, _) = open(2, SlideshowProps::default());
    let limits = slideshow.scale_limits();
    // 950x760 available for an 800x600 slide
    assert!(approx(limits.max, 950.0 / 800.0));
    assert!(approx(limits.min, 0.1 * 950.0 / 800.0));
    assert_eq!(slideshow.state().scale, 1.0);
}

#[test]
fn scale_up_clamps_to_fit_then_enters_pan_and_zoom() {
    let modes = Rc::new(RefCell::new(Vec::new()));
    let scales = Rc::new(RefCell::new(Vec::new()));
    let (mode_sink, scale_sink) = (modes.clone(), scales.clone());
    let callbacks = SlideshowCallbacks {
        on_pan_and_zoom_mode_change: Some(Box::new(move |on| mode_sink.borrow_mut().push(on))),
        on_scale_change: Some(Box::new(move |scale| scale_sink.borrow_mut().push(scale))),
        ..Default::default()
    };
    let (mut slideshow, _) = build_with(2, SlideshowProps::default(), callbacks);
    slideshow.initialize();
    slideshow.tick(opened());
    scales.borrow_mut().clear();

    assert!(slideshow.scale_up());
    let fit = 950.0 / 800.0;
    assert!(approx(slideshow.state().scale, fit));
    assert!(!slideshow.state().pan_and_zoom_mode);
    assert!(slideshow.state().animate_scale_duration.is_some());

    assert!(slideshow.scale_up());
    assert!(slideshow.state().pan_and_zoom_mode);
    assert!(approx(slideshow.state().scale, fit * 1.5));
    assert_eq!(modes.borrow().as_slice(), &[true]);
    assert_eq!(scales.borrow().len(), 2);

    slideshow.tick(opened() + ms(500));
    assert_eq!(slideshow.state().animate_scale_duration, None);
}

#[test]
fn scale_up_without_pan_and_zoom_stops_at_fit() {
    let props = SlideshowProps {
        enable_pan_and_zoom_mode: false,
        ..Default::default()
    };
    let (mut slideshow, _) = open(2, props);
    assert!(slideshow.scale_up());
    assert!(!slideshow.scale_up());
    assert!(!slideshow.state().pan_and_zoom_mode);
    assert!(approx(slideshow.state().scale, 950.0 / 800.0));
}

#[test]
fn scale_down_stops_at_min() {
    let (mut slideshow, _) = open(2, SlideshowProps::default());
    let limits = slideshow.scale_limits();
    let mut guard = 0;
    while slideshow.scale_down() {
        guard += 1;
        assert!(guard < 100);
    }
    assert!(approx(slideshow.state().scale, limits.min));
}

#[test]
fn toggle_moves_between_one_and_fit() {
    let (mut slideshow, _) = open(2, SlideshowProps::default());
    assert!(slideshow.toggle_scale());
    assert!(approx(slideshow.state().scale, 950.0 / 800.0));
    assert!(slideshow.toggle_scale());
    assert_eq!(slideshow.state().scale, 1.0);
}

#[test]
fn wheel_zoom_commits_after_the_gesture_settles() {
    let (mut slideshow, _) = open(2, SlideshowProps::default());
    assert!(slideshow.handle_event(PlatformEvent::Wheel {
        position: Point::new(500.0, 400.0),
        delta: Vec2::new(0.0, -100.0),
        ctrl: true,
        at: ms(300),
    }));
    let view = slideshow.scale_view();
    assert!(approx(view.effective(), 1.1));
    assert_eq!(view.scale, 1.0);

    slideshow.tick(ms(500));
    let view = slideshow.scale_view();
    assert!(view.dynamic.is_none());
    assert!(approx(view.scale, 1.1));
}

#[test]
fn plain_wheel_is_ignored_outside_pan_and_zoom() {
    let (mut slideshow, _) = open(2, SlideshowProps::default());
    assert!(!slideshow.handle_event(PlatformEvent::Wheel {
        position: Point::new(500.0, 400.0),
        delta: Vec2::new(0.0, 40.0),
        ctrl: false,
        at: ms(300),
    }));
}

#[test]
fn pinch_past_fit_enters_pan_and_zoom() {
    let (mut slideshow, _) = open(2, SlideshowProps::default());
    let modes = record(&mut slideshow, EventKind::PanAndZoomModeChange);

    assert!(slideshow.handle_event(PlatformEvent::TouchStart {
        touches: vec![touch(1, 400.0, 400.0), touch(2, 600.0, 400.0)],
        at: ms(300),
    }));
    assert!(slideshow.handle_event(PlatformEvent::TouchMove {
        touches: vec![touch(1, 300.0, 400.0), touch(2, 700.0, 400.0)],
        at: ms(316),
    }));
    assert!(slideshow.state().pan_and_zoom_mode);
    assert!(approx(slideshow.scale_view().effective(), 2.0));

    slideshow.handle_event(PlatformEvent::TouchEnd {
        touches: Vec::new(),
        at: ms(332),
    });
    assert!(slideshow.state().pan_and_zoom_mode);
    assert!(approx(slideshow.state().scale, 2.0));
    assert!(slideshow.scale_view().dynamic.is_none());
    assert_eq!(
        modes.borrow().as_slice(),
        &[SlideshowEvent::PanAndZoomModeChange { enabled: true }]
    );
}

// ===== Pan & zoom =====

#[test]
fn pan_and_zoom_round_trip() {
    let (mut slideshow, recording) = open(2, SlideshowProps::default());

    slideshow.enter_pan_and_zoom_mode().unwrap();
    assert!(slideshow.state().pan_and_zoom_mode);
    assert!(matches!(
        slideshow.enter_pan_and_zoom_mode(),
        Err(SlideshowError::PanAndZoomModeAlreadyActive)
    ));

    slideshow.exit_pan_and_zoom_mode().unwrap();
    assert!(!slideshow.state().pan_and_zoom_mode);
    assert_eq!(slideshow.state().scale, 1.0);
    assert!(matches!(
        slideshow.exit_pan_and_zoom_mode(),
        Err(SlideshowError::PanAndZoomModeNotActive)
    ));

    // The bounce holds the lock until it is done
    assert_eq!(recording.borrow().keyframes.len(), 1);
    assert!(slideshow.is_locked());
    slideshow.tick(opened() + ms(1000));
    assert!(!slideshow.is_locked());
}

#[test]
fn slide_change_drops_a_running_bounce() {
    let (mut slideshow, recording) = open(3, SlideshowProps::default());
    slideshow.enter_pan_and_zoom_mode().unwrap();
    slideshow.exit_pan_and_zoom_mode().unwrap();
    assert!(slideshow.is_locked());

    recording.borrow_mut().cleared.clear();
    assert!(slideshow.show_next());
    assert!(!slideshow.is_locked());
    assert!(recording.borrow().cleared.contains(&SurfaceTarget::Slide(0)));

    // The cancelled bounce never touches the new slide
    recording.borrow_mut().cleared.clear();
    slideshow.tick(opened() + ms(1000));
    assert!(!recording.borrow().cleared.contains(&SurfaceTarget::Slide(1)));
}

#[test]
fn panned_exit_clamps_to_fit() {
    let (mut slideshow, _) = open(2, SlideshowProps::default());
    slideshow.scale_up();
    slideshow.scale_up();
    assert!(slideshow.state().pan_and_zoom_mode);

    slideshow.exit_pan_and_zoom_mode().unwrap();
    assert!(approx(slideshow.state().scale, 950.0 / 800.0));
    assert_eq!(slideshow.drag_view().pan_offset, Vec2::ZERO);
}

#[test]
fn slide_change_leaves_pan_and_zoom() {
    let (mut slideshow, _) = open(3, SlideshowProps::default());
    let modes = record(&mut slideshow, EventKind::PanAndZoomModeChange);
    slideshow.enter_pan_and_zoom_mode().unwrap();

    assert!(slideshow.show_next());
    assert!(!slideshow.state().pan_and_zoom_mode);
    assert_eq!(slideshow.state().scale, 1.0);
    assert_eq!(modes.borrow().len(), 2);
}

// ===== Keyboard =====

#[test]
fn arrows_navigate_and_escape_closes() {
    let (mut slideshow, _) = open(3, SlideshowProps::default());
    assert!(key(&mut slideshow, Key::ArrowRight, ms(300)));
    assert_eq!(slideshow.state().i, 1);
    assert!(key(&mut slideshow, Key::ArrowLeft, ms(310)));
    assert_eq!(slideshow.state().i, 0);
    assert!(key(&mut slideshow, Key::Space, ms(315)));
    assert_eq!(slideshow.state().i, 1);
    assert!(key(&mut slideshow, Key::End, ms(320)));
    assert_eq!(slideshow.state().i, 2);
    assert!(!key(&mut slideshow, Key::Character('q'), ms(330)));

    assert!(key(&mut slideshow, Key::Escape, ms(340)));
    assert_eq!(slideshow.state().open_close_phase, OpenClosePhase::Closing);
}

#[test]
fn escape_leaves_pan_and_zoom_before_closing() {
    let (mut slideshow, _) = open(3, SlideshowProps::default());
    slideshow.enter_pan_and_zoom_mode().unwrap();

    let before = slideshow.drag_view().pan_offset;
    assert!(key(&mut slideshow, Key::ArrowRight, ms(300)));
    assert_eq!(slideshow.state().i, 0);
    assert_eq!(
        slideshow.drag_view().pan_offset - before,
        Vec2::new(-50.0, 0.0)
    );

    assert!(key(&mut slideshow, Key::Escape, ms(310)));
    assert!(!slideshow.state().pan_and_zoom_mode);
    assert_eq!(slideshow.state().open_close_phase, OpenClosePhase::Open);
}

#[test]
fn touch_emulation_toggles_with_alt_z() {
    let (mut slideshow, _) = open(2, SlideshowProps::default());
    let alt = crate::input::Modifiers {
        alt: true,
        ..Default::default()
    };
    assert!(slideshow.on_key_down(KeyInput::new(Key::Character('z')).with_modifiers(alt)));
    assert!(slideshow.is_touch_emulation_enabled());
}

// ===== Viewport =====

#[test]
fn resize_reclamps_scale() {
    let (mut slideshow, _) = open(2, SlideshowProps::default());
    let resizes = record(&mut slideshow, EventKind::Resize);
    let scales = record(&mut slideshow, EventKind::ScaleChange);

    assert!(slideshow.handle_event(PlatformEvent::Resize {
        viewport: Size::new(400.0, 300.0),
        at: ms(300),
    }));
    let state = slideshow.state();
    assert!(!state.show_more_controls);
    // 380x280 available
    assert!(approx(state.scale, 280.0 / 600.0));
    assert_eq!(resizes.borrow().len(), 1);
    assert_eq!(scales.borrow().len(), 1);
}

#[test]
fn fullscreen_toggles_and_reports_failures() {
    let (mut slideshow, recording) = open(2, SlideshowProps::default());
    assert!(slideshow.toggle_fullscreen().unwrap());
    assert!(slideshow.state().fullscreen);
    assert!(recording.borrow().fullscreen);

    recording.borrow_mut().fail_fullscreen = true;
    assert!(matches!(
        slideshow.toggle_fullscreen(),
        Err(SlideshowError::Fullscreen(_))
    ));
    assert!(slideshow.state().fullscreen);
}

// ===== Media =====

#[test]
fn shown_pictures_are_loaded_and_failures_retried() {
    let (mut slideshow, recording) = open(4, SlideshowProps::default());
    let failures = record(&mut slideshow, EventKind::LoadFailed);
    {
        let loads = &recording.borrow().loads;
        let indices: Vec<usize> = loads.iter().map(|(index, _)| *index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(loads[1].1, "https://example.com/1.jpg");
    }
    assert_eq!(slideshow.load_status(1), Some(&LoadStatus::Loading));

    slideshow.on_image_load(0, Ok(()));
    slideshow.on_image_load(1, Err("404".into()));
    assert_eq!(slideshow.load_status(0), Some(&LoadStatus::Loaded));
    assert!(matches!(
        slideshow.load_status(1),
        Some(LoadStatus::Failed(_))
    ));
    assert_eq!(failures.borrow().len(), 1);

    slideshow.retry_load(1).unwrap();
    assert_eq!(slideshow.load_status(1), Some(&LoadStatus::Loading));
    assert_eq!(recording.borrow().loads.len(), 3);

    // Moving on mounts and loads the next neighbour only once
    slideshow.show_next();
    slideshow.show_previous();
    slideshow.show_next();
    assert_eq!(recording.borrow().loads.len(), 4);
}

#[test]
fn aborted_playback_is_not_an_error() {
    let (mut slideshow, _) = open(2, SlideshowProps::default());
    assert!(slideshow.on_play_result(0, Ok(())).is_ok());
    assert!(slideshow.on_play_result(0, Err(PlaybackError::Aborted)).is_ok());
    assert!(matches!(
        slideshow.on_play_result(0, Err(PlaybackError::Failed("decode".into()))),
        Err(SlideshowError::Playback(_))
    ));
}
