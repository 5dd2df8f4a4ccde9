// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Mount, open/close phases and clean-up

use super::{CloseInteraction, Slideshow, SlideshowEvent, Task, TimerSlot};
use crate::config::AnimationKind;
use crate::model::{CustomOffset, OpenClosePhase};
use crate::surface::{Surface, SurfaceTarget};
use crate::transitions::{
    FadeTransition, FloatTransition, PendingTransition, Transition, TransitionContext,
};
use kurbo::Point;
use std::cell::Cell;
use std::rc::Rc;

/// Shared between slideshow instances on one page.
///
/// When the host is about to open a new slideshow while another one is
/// still up, it calls `announce_open`; the old instance then closes without
/// an animation so the two do not fight over the screen.
#[derive(Debug, Clone, Default)]
pub struct OpenCoordinator {
    open_pending: Rc<Cell<bool>>,
}

impl OpenCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn announce_open(&self) {
        self.open_pending.set(true);
    }

    pub fn is_open_pending(&self) -> bool {
        self.open_pending.get()
    }

    fn settle(&self) {
        self.open_pending.set(false);
    }
}

impl Slideshow {
    /// Mount: attach listeners, measure, render and start opening
    pub fn initialize(&mut self) {
        if self.mounted || self.cleaned_up {
            tracing::error!("[Slideshow] initialize called twice, ignored");
            return;
        }
        self.mounted = true;
        self.coordinator.settle();
        self.surface.attach_listeners();

        let viewport = self.surface.viewport_size();
        let kind = self.props.animation.kind_for_width(viewport.width);
        let overlay = match kind {
            AnimationKind::Float => self.props.presentation.overlay_opacity_for_float,
            AnimationKind::Fade => self.props.presentation.overlay_opacity,
        };
        let show_more_controls = viewport.width >= self.props.presentation.show_more_controls_min_width;
        self.state.viewport = viewport;
        let scale = self.limits_for(self.state.i).initial();

        tracing::info!(
            "[Slideshow] initialize: {} slides, slide {}, viewport {}x{}",
            self.slides.len(),
            self.state.i,
            viewport.width,
            viewport.height
        );

        self.update_state(|state| {
            state.scale = scale;
            state.overlay_opacity_for_current_slide = overlay;
            state.show_more_controls = show_more_controls;
        });
        self.bus.emit(&SlideshowEvent::Init);
        self.open();
    }

    /// Anchor a slide to a screen point (typically its thumbnail center)
    /// instead of the center of the viewport
    pub fn anchor_slide(&mut self, index: usize, origin: Point) -> crate::Result<()> {
        self.check_index(index)?;
        self.update_state(|state| {
            state.slide_with_custom_offset = Some(CustomOffset { index, origin });
        });
        Ok(())
    }

    fn open(&mut self) {
        if self.props.inline {
            self.update_state(|state| state.open_close_phase = OpenClosePhase::Open);
            self.bus.emit(&SlideshowEvent::Opened);
            return;
        }

        self.lock();
        self.update_state(|state| state.open_close_phase = OpenClosePhase::Opening);

        let kind = self.props.animation.kind_for_width(self.state.viewport.width);
        let pending = self.start_transition(kind, None);
        let animation = pending.as_ref().map(|p| p.kind).unwrap_or(kind);
        tracing::debug!("[Slideshow] opening with {:?}", animation);
        self.bus.emit(&SlideshowEvent::Open { animation });

        match pending {
            Some(pending) => {
                let duration = pending.duration;
                if pending.hides_slide {
                    self.update_state(|state| state.hide_current_slide = true);
                }
                self.transition = Some(pending);
                self.reschedule(TimerSlot::Transition, duration, Task::OpenFinished);
            }
            None => self.finish_open(),
        }
    }

    pub(super) fn finish_open(&mut self) {
        if let Some(pending) = self.transition.take() {
            pending.finish(self.surface.as_mut());
        }
        self.unlock();
        self.update_state(|state| {
            state.open_close_phase = OpenClosePhase::Open;
            state.hide_current_slide = false;
        });
        tracing::debug!("[Slideshow] opened");
        self.bus.emit(&SlideshowEvent::Opened);
    }

    /// Request the close button behavior
    pub fn on_request_close(&mut self) -> bool {
        self.close(CloseInteraction::Button)
    }

    /// Start closing. No-op while locked or already closing. Returns whether
    /// a close was started.
    pub fn close(&mut self, interaction: CloseInteraction) -> bool {
        if !self.mounted {
            return false;
        }
        if self.locked {
            tracing::debug!("[Slideshow] close ({:?}) ignored: locked", interaction);
            return false;
        }
        if matches!(
            self.state.open_close_phase,
            OpenClosePhase::Closing | OpenClosePhase::Closed
        ) {
            return false;
        }

        // A drag-to-close keeps going from where the slide was let go
        let keep_slide = matches!(interaction, CloseInteraction::Pan { .. });
        self.interrupt_gestures(keep_slide);
        self.lock();
        self.update_state(|state| state.open_close_phase = OpenClosePhase::Closing);

        let skip_animation = self.props.inline || self.coordinator.is_open_pending();
        let pending = if skip_animation {
            None
        } else {
            let kind = self.props.animation.kind_for_width(self.state.viewport.width);
            self.start_transition(kind, Some(interaction))
        };
        if pending.as_ref().is_some_and(|p| p.hides_slide) {
            self.update_state(|state| state.hide_current_slide = true);
        }

        let hint = self.bus.emit(&SlideshowEvent::Close { interaction });
        let own = pending.as_ref().map(|p| p.duration);
        let wait = own.max(hint);
        tracing::debug!(
            "[Slideshow] closing ({:?}), waiting {:?}",
            interaction,
            wait
        );
        self.transition = pending;

        match wait {
            Some(wait) if !wait.is_zero() => {
                self.reschedule(TimerSlot::Transition, wait, Task::CloseFinished);
            }
            _ => self.finish_close(),
        }
        true
    }

    pub(super) fn finish_close(&mut self) {
        if let Some(pending) = self.transition.take() {
            pending.finish(self.surface.as_mut());
        }
        self.unlock();
        self.update_state(|state| state.open_close_phase = OpenClosePhase::Closed);
        tracing::debug!("[Slideshow] closed");
        self.bus.emit(&SlideshowEvent::Closed);
        self.notify_close();
    }

    fn notify_close(&mut self) {
        if self.close_notified {
            return;
        }
        self.close_notified = true;
        if let Some(on_close) = self.callbacks.on_close.as_mut() {
            on_close();
        }
    }

    /// Unmount: cancel everything in flight and detach. Safe to call twice.
    pub fn clean_up(&mut self) {
        if !self.mounted {
            return;
        }
        tracing::debug!("[Slideshow] clean up");

        if let Some(pending) = self.transition.take() {
            pending.cancel(self.surface.as_mut());
        }
        self.scheduler.cancel_all();
        self.timers = Default::default();
        self.drag.reset();
        self.scale.reset();
        self.pinch.cancel();
        self.pan_and_zoom.abandon();
        self.normalizer.reset();
        self.clear_gesture_transforms();
        self.surface.detach_listeners();

        let was_closing = self.state.open_close_phase == OpenClosePhase::Closing;
        self.state.open_close_phase = OpenClosePhase::Closed;
        self.state.hide_current_slide = false;
        self.state.pan_and_zoom_mode = false;
        self.locked = false;

        self.bus.emit(&SlideshowEvent::CleanUp);
        if was_closing {
            self.notify_close();
        }
        self.mounted = false;
        self.cleaned_up = true;
        self.bus.clear();
    }

    /// Stop every running gesture without committing it
    fn interrupt_gestures(&mut self, keep_slide_transform: bool) {
        self.drag.cancel();
        self.drag.stop_inertia();
        self.pinch.cancel();
        self.scale.take_gesture();
        self.cancel_timer(TimerSlot::Wheel);
        self.cancel_timer(TimerSlot::Snap);
        if keep_slide_transform {
            self.surface.clear_transient_transform(SurfaceTarget::Slides);
        } else {
            self.clear_gesture_transforms();
        }
    }

    /// Run the open (`interaction == None`) or close transition. Float
    /// falls back to fade when there is no thumbnail to float from.
    fn start_transition(
        &mut self,
        kind: AnimationKind,
        interaction: Option<CloseInteraction>,
    ) -> Option<PendingTransition> {
        let index = self.state.i;
        let (layout, transform) = self.layout_input(index).transform();
        let slide_rect = match interaction {
            Some(CloseInteraction::Pan { offset }) => layout.rect + offset,
            _ => layout.rect,
        };
        let thumbnail_rect = self.surface.thumbnail_rect(index);
        let ctx = TransitionContext {
            index,
            slide: &self.slides[index],
            viewport: self.state.viewport,
            slide_rect,
            slide_transform: transform,
            thumbnail_rect,
            overlay_opacity: self.state.overlay_opacity_for_current_slide,
            settings: &self.props.animation,
        };

        let float = FloatTransition::with_timing(self.float_timing);
        let primary: &dyn Transition = match kind {
            AnimationKind::Float => &float,
            AnimationKind::Fade => &FadeTransition,
        };
        let surface = self.surface.as_mut();
        run_transition(primary, &mut *surface, &ctx, interaction).or_else(|| {
            if kind != AnimationKind::Float {
                return None;
            }
            tracing::debug!("[Slideshow] no thumbnail for slide {}, fading instead", index);
            run_transition(&FadeTransition, surface, &ctx, interaction)
        })
    }
}

fn run_transition(
    transition: &dyn Transition,
    surface: &mut dyn Surface,
    ctx: &TransitionContext<'_>,
    interaction: Option<CloseInteraction>,
) -> Option<PendingTransition> {
    match interaction {
        None => transition.open(surface, ctx),
        Some(interaction) => transition.close(surface, ctx, interaction),
    }
}
