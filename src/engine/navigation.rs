// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Slide navigation

use super::{CloseInteraction, Slideshow, SlideshowEvent, TimerSlot};
use crate::error::{Result, SlideshowError};

impl Slideshow {
    pub(super) fn check_index(&self, index: usize) -> Result<()> {
        let len = self.slides.len();
        if index >= len {
            return Err(SlideshowError::SlideOutOfRange { index, len });
        }
        Ok(())
    }

    /// Next slide; past the last one this closes when `close_at_gallery_end`
    /// is set. Returns whether anything happened.
    pub fn show_next(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        let next = self.state.i + 1;
        if next >= self.slides.len() {
            return self.close_at_gallery_end();
        }
        self.change_slide(next)
    }

    pub fn show_previous(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        match self.state.i.checked_sub(1) {
            Some(previous) => self.change_slide(previous),
            None => self.close_at_gallery_end(),
        }
    }

    pub fn show_first(&mut self) -> bool {
        self.mounted && self.change_slide(0)
    }

    pub fn show_last(&mut self) -> bool {
        let last = self.slides.len() - 1;
        self.mounted && self.change_slide(last)
    }

    /// Jump to `index`. Returns `Ok(false)` when it already is the current
    /// slide.
    pub fn go_to_slide(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        if !self.mounted {
            return Err(SlideshowError::NotMounted);
        }
        Ok(self.change_slide(index))
    }

    fn close_at_gallery_end(&mut self) -> bool {
        if self.props.close_at_gallery_end {
            self.close(CloseInteraction::GalleryEnd)
        } else {
            false
        }
    }

    /// Switch the current slide, resetting every per-slide gesture state
    pub(super) fn change_slide(&mut self, to: usize) -> bool {
        let from = self.state.i;
        if to == from || to >= self.slides.len() {
            return false;
        }

        // A pending swipe animation is superseded
        if self.timers.slide_change.is_some() {
            self.cancel_timer(TimerSlot::SlideChange);
            self.unlock();
        }
        // A bounce belongs to the slide being left
        if self.timers.bounce.is_some() {
            self.cancel_timer(TimerSlot::Bounce);
            self.unlock();
        }
        self.cancel_timer(TimerSlot::Wheel);
        self.cancel_timer(TimerSlot::Snap);
        self.cancel_timer(TimerSlot::ScaleAnimation);
        self.clear_gesture_transforms();
        self.drag.reset();
        self.scale.reset();
        self.pinch.cancel();
        let left_pan_and_zoom = self.pan_and_zoom.abandon();

        let scale = self.limits_for(to).initial();
        let previous_scale = self.state.scale;
        tracing::debug!("[Slideshow] slide {} -> {}", from, to);

        self.update_state(|state| {
            state.i = to;
            state.scale = scale;
            state.animate_scale_duration = None;
            state.pan_and_zoom_mode = false;
            state.hide_current_slide = false;
            if state.slide_with_custom_offset.is_some_and(|offset| offset.index != to) {
                state.slide_with_custom_offset = None;
            }
        });

        if left_pan_and_zoom {
            self.notify_pan_and_zoom_change(false);
        }
        self.bus.emit(&SlideshowEvent::SlideChange { from, to });
        if scale != previous_scale {
            self.notify_scale_change();
        }
        true
    }
}
