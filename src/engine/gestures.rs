// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer, touch and wheel handling

use super::{CloseInteraction, Slideshow, SlideshowEvent, Task, TimerSlot};
use crate::config::DragSettings;
use crate::input::{InputEvent, Timestamp};
use crate::interaction::{Axis, DragContext, DragMode, DragUpdate, Scale, XyOutcome};
use crate::layout::{SlideTransform, compensate_origin};
use crate::model::{OpenClosePhase, SlideshowState};
use crate::settings;
use crate::surface::SurfaceTarget;
use kurbo::{Point, Vec2};
use std::time::Duration;

fn drag_context<'a>(
    settings: &'a DragSettings,
    state: &SlideshowState,
    len: usize,
    allow_horizontal: bool,
) -> DragContext<'a> {
    DragContext {
        settings,
        mode: if state.pan_and_zoom_mode {
            DragMode::Free
        } else {
            DragMode::Xy
        },
        viewport: state.viewport,
        at_first: state.i == 0,
        at_last: state.i + 1 >= len,
        allow_horizontal,
    }
}

impl Slideshow {
    pub(super) fn dispatch(&mut self, input: InputEvent) -> bool {
        let emulating = self.touch_emulation.is_enabled();
        match input {
            InputEvent::PointerDown { position, .. } if emulating => {
                let (first, second) = self.touch_emulation.touches(position, self.state.viewport);
                self.pinch_start(first, second)
            }
            InputEvent::PointerMove { position, .. } if emulating && self.pinch.is_active() => {
                let (first, second) = self.touch_emulation.touches(position, self.state.viewport);
                self.pinch_move(first, second)
            }
            InputEvent::PointerUp { .. } if emulating && self.pinch.is_active() => {
                self.pinch_end();
                true
            }
            InputEvent::PointerDown { position, at } | InputEvent::OneTouch { position, at } => {
                self.on_press(position, at)
            }
            InputEvent::PointerMove { position, at } => self.on_move(position, at),
            InputEvent::PointerUp { position, at } => self.on_release(position, at),
            InputEvent::TwoTouches { first, second, .. } => self.pinch_start(first, second),
            InputEvent::TouchMove {
                first, second, at, ..
            } => match second {
                Some(second) if self.pinch.is_active() => self.pinch_move(first, second),
                _ => self.on_move(first, at),
            },
            InputEvent::TouchEnd {
                remaining,
                position,
                at,
            } => {
                if self.pinch.is_active() {
                    if remaining < 2 {
                        self.pinch_end();
                    }
                    true
                } else if remaining == 0 {
                    self.on_release(position, at)
                } else {
                    false
                }
            }
            InputEvent::Cancel { .. } => self.on_cancel(),
            InputEvent::Wheel {
                position,
                delta,
                zoom,
                ..
            } => self.on_wheel(position, delta, zoom),
            InputEvent::KeyDown { key, .. } => self.on_key_down(key),
            InputEvent::Resize { viewport, .. } => {
                self.on_resize(viewport);
                true
            }
        }
    }

    /// Gestures only start on an open, unlocked slideshow
    fn accepts_gestures(&self) -> bool {
        !self.locked && self.state.open_close_phase == OpenClosePhase::Open
    }

    fn can_swipe_current(&self) -> bool {
        let index = self.state.i;
        self.slides.len() > 1
            && self
                .viewer_for(index)
                .is_none_or(|viewer| viewer.can_swipe(&self.slides[index]))
    }

    // ===== Drag =====

    fn on_press(&mut self, position: Point, at: Timestamp) -> bool {
        if !self.accepts_gestures() || self.pinch.is_active() {
            return false;
        }
        if self.drag.has_inertia() {
            // Catch the coasting slide where it is
            self.drag.stop_inertia();
            self.render();
        }
        let mode = if self.state.pan_and_zoom_mode {
            DragMode::Free
        } else {
            DragMode::Xy
        };
        self.drag.press(position, at, mode);
        true
    }

    fn on_move(&mut self, position: Point, at: Timestamp) -> bool {
        if !self.drag.is_pressed() {
            return false;
        }
        let allow_horizontal = self.can_swipe_current();
        let ctx = drag_context(
            &self.props.drag,
            &self.state,
            self.slides.len(),
            allow_horizontal,
        );
        match self.drag.move_to(position, at, &ctx) {
            DragUpdate::None => false,
            DragUpdate::Started { offset } => {
                self.cancel_timer(TimerSlot::Snap);
                if let Some(on_drag_start) = self.callbacks.on_drag_start.as_mut() {
                    on_drag_start();
                }
                self.bus.emit(&SlideshowEvent::DragStart);
                self.apply_drag(offset);
                true
            }
            DragUpdate::Moved { offset } => {
                self.apply_drag(offset);
                true
            }
        }
    }

    fn apply_drag(&mut self, offset: Vec2) {
        let view = self.drag.view();
        match (self.drag.mode(), view.axis) {
            (DragMode::Xy, Some(Axis::X)) => {
                self.surface.apply_transient_transform(
                    SurfaceTarget::Slides,
                    &SlideTransform::translate(offset),
                    None,
                );
            }
            (DragMode::Xy, Some(Axis::Y)) => {
                let (_, mut transform) = self.layout_input(self.state.i).transform();
                transform.translate += offset;
                self.surface.apply_transient_transform(
                    SurfaceTarget::Slide(self.state.i),
                    &transform,
                    None,
                );
                let half = (self.state.viewport.height / 2.0).max(1.0);
                let fade = 1.0 - (offset.y.abs() / half).min(1.0);
                self.surface.set_opacity(
                    SurfaceTarget::Overlay,
                    self.state.overlay_opacity_for_current_slide * fade,
                    None,
                );
            }
            _ => {
                self.pan_and_zoom.mark_touched();
                self.apply_current_transform(None);
            }
        }
    }

    fn on_release(&mut self, position: Point, at: Timestamp) -> bool {
        if !self.drag.is_pressed() {
            return false;
        }
        let mode = self.drag.mode();
        let allow_horizontal = self.can_swipe_current();
        let ctx = drag_context(
            &self.props.drag,
            &self.state,
            self.slides.len(),
            allow_horizontal,
        );
        let Some(velocity) = self.drag.release(at, &ctx) else {
            return self.on_click(position);
        };
        let outcome = (mode == DragMode::Xy).then(|| self.drag.resolve_xy(velocity, &ctx));

        if let Some(on_drag_end) = self.callbacks.on_drag_end.as_mut() {
            on_drag_end();
        }
        self.bus.emit(&SlideshowEvent::DragEnd);

        match outcome {
            None => {
                // Free mode: commit the offset, then coast
                self.render();
                self.drag
                    .start_inertia(velocity, self.scheduler.now(), &self.props.drag);
            }
            Some(outcome) => self.finish_xy_drag(outcome),
        }
        true
    }

    fn finish_xy_drag(&mut self, outcome: XyOutcome) {
        tracing::debug!("[Slideshow] drag outcome {:?}", outcome);
        match outcome {
            XyOutcome::SnapBack { duration } => self.snap_back(duration),
            XyOutcome::ChangeSlide { forward, duration } => {
                let target = if forward {
                    Some(self.state.i + 1).filter(|&i| i < self.slides.len())
                } else {
                    self.state.i.checked_sub(1)
                };
                let Some(to) = target else {
                    // Past the edge without resistance: behave like the
                    // arrow keys would
                    self.snap_back(duration);
                    if self.props.close_at_gallery_end {
                        self.close(CloseInteraction::GalleryEnd);
                    }
                    return;
                };
                let width = self.state.viewport.width;
                let travel = if forward { -width } else { width };
                self.surface.apply_transient_transform(
                    SurfaceTarget::Slides,
                    &SlideTransform::translate(Vec2::new(travel, 0.0)),
                    Some(duration),
                );
                self.lock();
                self.reschedule(
                    TimerSlot::SlideChange,
                    duration,
                    Task::SlideChangeFinished { to },
                );
            }
            XyOutcome::Close { offset } => {
                self.close(CloseInteraction::Pan { offset });
            }
        }
    }

    fn snap_back(&mut self, duration: Duration) {
        self.surface.apply_transient_transform(
            SurfaceTarget::Slides,
            &SlideTransform::IDENTITY,
            Some(duration),
        );
        self.apply_current_transform(Some(duration));
        self.surface.set_opacity(
            SurfaceTarget::Overlay,
            self.state.overlay_opacity_for_current_slide,
            Some(duration),
        );
        self.update_state(|state| state.animate_overlay_opacity_duration = Some(duration));
        self.reschedule(TimerSlot::Snap, duration, Task::SnapBackFinished);
    }

    /// A press that never became a drag
    fn on_click(&mut self, position: Point) -> bool {
        if !self.accepts_gestures() {
            return false;
        }
        let rect = self.layout_input(self.state.i).layout().rect;
        if rect.contains(position) {
            if self.props.go_to_next_slide_on_click && !self.state.pan_and_zoom_mode {
                return self.show_next();
            }
            false
        } else if self.props.close_on_overlay_click && !self.props.inline {
            self.close(CloseInteraction::Overlay)
        } else {
            false
        }
    }

    fn on_cancel(&mut self) -> bool {
        let had_gesture = self.drag.is_pressed() || self.pinch.is_active();
        self.drag.cancel();
        if self.pinch.is_active() {
            self.pinch.cancel();
            self.scale.take_gesture();
        }
        if had_gesture {
            self.clear_gesture_transforms();
            self.surface.set_opacity(
                SurfaceTarget::Overlay,
                self.state.overlay_opacity_for_current_slide,
                None,
            );
        }
        had_gesture
    }

    pub(super) fn inertia_frame(&mut self, now: Timestamp) {
        if !self.drag.has_inertia() {
            return;
        }
        if let Some((_, done)) = self.drag.inertia_frame(now) {
            self.apply_current_transform(None);
            if done {
                self.render();
            }
        }
    }

    // ===== Pinch =====

    fn pinch_start(&mut self, first: Point, second: Point) -> bool {
        if !self.accepts_gestures() {
            return false;
        }
        if self.drag.is_pressed() {
            self.drag.cancel();
            self.clear_gesture_transforms();
        }
        self.drag.stop_inertia();
        // A wheel gesture still settling is committed first
        if self.scale.is_gesture_active() {
            self.cancel_timer(TimerSlot::Wheel);
            self.finish_scale_gesture();
        }

        let limits = self.scale_limits();
        let scale = self.state.scale;
        let origin = self.pinch.start(first, second, scale, limits.fits(scale));
        if let Err(err) = self.scale.set_origin(origin) {
            tracing::error!("[Slideshow] pinch start: {}", err);
        }
        self.scale.set_dynamic(scale);
        true
    }

    fn pinch_move(&mut self, first: Point, second: Point) -> bool {
        let limits = self.scale_limits();
        let Some(update) = self.pinch.update(first, second, |s| limits.fits(s)) else {
            return false;
        };
        let mut value = update.scale.max(settings::scale::ABSOLUTE_MIN);
        if !self.state.pan_and_zoom_mode && !limits.fits(value) {
            if self.props.enable_pan_and_zoom_mode {
                if update.fit_changed == Some(false) {
                    self.enter_pan_and_zoom();
                }
            } else {
                value = value.min(limits.max);
            }
        }
        self.scale.set_dynamic(value);
        self.pan_and_zoom.mark_touched();
        self.apply_current_transform(None);
        true
    }

    fn pinch_end(&mut self) {
        if self.pinch.end().is_some() {
            self.finish_scale_gesture();
        }
    }

    // ===== Wheel =====

    fn on_wheel(&mut self, position: Point, delta: Vec2, zoom: bool) -> bool {
        if !self.accepts_gestures() {
            return false;
        }
        if !zoom {
            if !self.state.pan_and_zoom_mode {
                return false;
            }
            self.drag.stop_inertia();
            let offset = self.drag.pan_offset() - delta;
            self.drag.set_pan_offset(offset);
            self.pan_and_zoom.mark_touched();
            self.apply_current_transform(None);
            return true;
        }
        if delta.y == 0.0 || self.pinch.is_active() {
            return false;
        }

        let current = match self.scale.dynamic() {
            Some(dynamic) => dynamic.value,
            None => {
                if let Err(err) = self.scale.set_origin(position) {
                    tracing::error!("[Slideshow] wheel zoom: {}", err);
                }
                self.state.scale
            }
        };
        let limits = self.scale_limits();
        let mut value =
            Scale::wheel_step(current, delta.y < 0.0, &self.props.scale).max(settings::scale::ABSOLUTE_MIN);
        if !self.state.pan_and_zoom_mode && !limits.fits(value) {
            if self.props.enable_pan_and_zoom_mode {
                self.enter_pan_and_zoom();
            } else {
                value = value.min(limits.max);
            }
        }
        self.scale.set_dynamic(value);
        self.pan_and_zoom.mark_touched();
        self.apply_current_transform(None);

        let timeout = self.props.scale.wheel_gesture_timeout();
        self.reschedule(TimerSlot::Wheel, timeout, Task::WheelGestureEnd);
        true
    }

    /// Commit the dynamic scale of a finished wheel or pinch gesture
    pub(super) fn finish_scale_gesture(&mut self) {
        let Some(dynamic) = self.scale.dynamic() else {
            return;
        };
        let rect = self.layout_input(self.state.i).layout().rect;
        let ratio = dynamic.value / self.state.scale;
        let offset = match dynamic.origin {
            Some(origin) => compensate_origin(self.drag.pan_offset(), ratio, origin, rect),
            None => self.drag.pan_offset(),
        };
        self.scale.take_gesture();
        self.surface
            .clear_transient_transform(SurfaceTarget::Slide(self.state.i));

        let limits = self.scale_limits();
        if self.state.pan_and_zoom_mode {
            self.drag.set_pan_offset(offset);
            self.commit_scale(limits.restrict(dynamic.value, true), false);
            if limits.fits(self.state.scale) {
                if let Err(err) = self.exit_pan_and_zoom(None) {
                    tracing::error!("[Slideshow] {}", err);
                }
            }
        } else {
            self.commit_scale(limits.restrict(dynamic.value, false), true);
        }
    }
}
