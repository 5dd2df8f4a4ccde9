// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Scale commands and pan & zoom mode

use super::{Slideshow, Task, TimerSlot};
use crate::error::{Result, SlideshowError};
use crate::interaction::{pan_and_zoom, scale};
use crate::layout::LayoutInput;
use crate::surface::SurfaceTarget;
use kurbo::Vec2;

impl Slideshow {
    pub fn scale_up(&mut self) -> bool {
        self.step_scale(true)
    }

    pub fn scale_down(&mut self) -> bool {
        self.step_scale(false)
    }

    fn step_scale(&mut self, up: bool) -> bool {
        if !self.mounted || self.locked {
            return false;
        }
        let limits = self.scale_limits();
        let current = self.state.scale;
        let step = self.props.scale.step;

        if up {
            let next = scale::step_up(current, step, 1.0);
            if self.state.pan_and_zoom_mode {
                self.pan_and_zoom.mark_touched();
                self.commit_scale(next, true);
            } else if limits.is_at_max(current) {
                if !self.props.enable_pan_and_zoom_mode {
                    return false;
                }
                self.enter_pan_and_zoom();
                self.pan_and_zoom.mark_touched();
                self.commit_scale(next, true);
            } else {
                self.commit_scale(next.min(limits.max), true);
            }
            return true;
        }

        let next = scale::step_down(current, step, 1.0);
        if self.state.pan_and_zoom_mode {
            self.pan_and_zoom.mark_touched();
            if limits.fits(next) {
                return self.exit_pan_and_zoom(Some(next)).is_ok();
            }
            self.commit_scale(next, true);
            return true;
        }
        if current <= limits.min * (1.0 + 1e-9) {
            return false;
        }
        self.commit_scale(next.max(limits.min), true);
        true
    }

    /// Snap between 1.0 and the fit scale
    pub fn toggle_scale(&mut self) -> bool {
        if !self.mounted || self.locked {
            return false;
        }
        let limits = self.scale_limits();
        let target = scale::toggle_target(
            self.state.scale,
            &limits,
            self.props.scale.toggle_epsilon,
        );

        if self.state.pan_and_zoom_mode {
            self.pan_and_zoom.mark_touched();
            if limits.fits(target) {
                return self.exit_pan_and_zoom(Some(target)).is_ok();
            }
            self.commit_scale(target, true);
            return true;
        }
        if (target - self.state.scale).abs() <= f64::EPSILON {
            return false;
        }
        if !limits.fits(target) {
            // 1.0 is larger than the fit scale: zoom in for real
            if !self.props.enable_pan_and_zoom_mode {
                return false;
            }
            self.enter_pan_and_zoom();
            self.pan_and_zoom.mark_touched();
        }
        self.commit_scale(target, true);
        true
    }

    /// Commit a scale for the current slide
    pub(super) fn commit_scale(&mut self, value: f64, animate: bool) {
        let limits = self.scale_limits();
        let value = limits.restrict(value, self.state.pan_and_zoom_mode);
        if value == self.state.scale {
            return;
        }
        let duration = animate.then(|| self.props.scale.animation_duration());
        self.update_state(|state| {
            state.scale = value;
            state.animate_scale_duration = duration;
        });
        match duration {
            Some(duration) => {
                self.reschedule(TimerSlot::ScaleAnimation, duration, Task::ScaleAnimationFinished);
            }
            None => self.cancel_timer(TimerSlot::ScaleAnimation),
        }
        tracing::debug!("[Slideshow] scale -> {:.3}", value);
        self.notify_scale_change();
    }

    // ===== Pan & zoom =====

    pub fn enter_pan_and_zoom_mode(&mut self) -> Result<()> {
        if !self.mounted {
            return Err(SlideshowError::NotMounted);
        }
        if self.state.pan_and_zoom_mode {
            return Err(SlideshowError::PanAndZoomModeAlreadyActive);
        }
        self.enter_pan_and_zoom();
        Ok(())
    }

    pub fn exit_pan_and_zoom_mode(&mut self) -> Result<()> {
        if !self.mounted {
            return Err(SlideshowError::NotMounted);
        }
        self.exit_pan_and_zoom(None)
    }

    /// Switch to free panning, keeping the slide where it is on screen
    pub(super) fn enter_pan_and_zoom(&mut self) {
        let index = self.state.i;
        let layout = self.layout_input(index).layout();
        if let Err(err) = self.pan_and_zoom.enter(self.state.scale, layout.offset) {
            tracing::error!("[Slideshow] {}", err);
            return;
        }
        // The anchor is folded into the free pan offset
        self.drag.set_pan_offset(layout.offset);
        self.update_state(|state| {
            state.pan_and_zoom_mode = true;
            if state.custom_offset_for(index).is_some() {
                state.slide_with_custom_offset = None;
            }
        });
        tracing::info!("[Slideshow] pan & zoom mode on");
        self.notify_pan_and_zoom_change(true);
    }

    /// Leave pan & zoom: re-center, clamp the scale (or use `target`) and
    /// bounce into place unless zoomed in very far
    pub(super) fn exit_pan_and_zoom(&mut self, target: Option<f64>) -> Result<()> {
        if !self.pan_and_zoom.is_active() {
            return Err(SlideshowError::PanAndZoomModeNotActive);
        }
        let index = self.state.i;
        let current = self.state.scale;
        let limits = self.scale_limits();
        let from = self.layout_input(index).layout().rect;
        let centered = LayoutInput {
            offset: Vec2::ZERO,
            custom_origin: None,
            dynamic_scale: None,
            ..self.layout_input(index)
        };
        let to = move |scale: f64| LayoutInput { scale, ..centered }.layout().rect;

        let plan = self.pan_and_zoom.exit(
            current,
            &limits,
            from,
            to,
            &self.props.pan_and_zoom,
        )?;
        let target = target
            .map(|value| limits.restrict(value, false))
            .unwrap_or(plan.target_scale);
        let bounce = plan
            .bounce
            .map(|_| pan_and_zoom::bounce(from, to(target), &self.props.pan_and_zoom));

        self.drag.reset();
        self.update_state(|state| {
            state.pan_and_zoom_mode = false;
            state.scale = target;
            state.animate_scale_duration = None;
        });
        tracing::info!("[Slideshow] pan & zoom mode off");
        self.notify_pan_and_zoom_change(false);
        if target != current {
            self.notify_scale_change();
        }

        if let Some(bounce) = bounce {
            self.surface.play_keyframes(
                SurfaceTarget::Slide(index),
                &bounce.keyframes,
                bounce.duration,
            );
            self.lock();
            self.reschedule(TimerSlot::Bounce, bounce.duration, Task::BounceFinished);
        }
        Ok(())
    }
}
