// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! The slideshow coordinator.
//!
//! `Slideshow` owns the committed state and every interaction module, turns
//! normalized input into module calls, and applies what the modules decide:
//! state commits (followed by a render) or transient surface mutations.
//!
//! The implementation is split by concern:
//! - `lifecycle`: initialize, open/close, clean-up
//! - `navigation`: slide changes and mounting
//! - `gestures`: pointer, touch and wheel input
//! - `zoom`: scale commands and pan & zoom mode
//! - `keys`: key bindings
//! - `viewport`: resize and fullscreen
//! - `media`: image loading and video playback results

mod bus;
mod gestures;
mod keys;
mod lifecycle;
mod media;
mod navigation;
mod scheduler;
mod viewport;
mod zoom;

pub use bus::{CloseInteraction, EventBus, EventKind, Listener, ListenerId, SlideshowEvent};
pub use lifecycle::OpenCoordinator;
pub use media::LoadStatus;
pub use scheduler::{Scheduler, TaskId};

use crate::config::{SlideshowCallbacks, SlideshowProps};
use crate::error::{Result, SlideshowError};
use crate::input::{Normalizer, PlatformEvent};
use crate::interaction::{
    Drag, DragView, Keyboard, PanAndZoom, PinchZoom, Scale, ScaleLimits, ScaleView,
    TouchEmulation,
};
use crate::layout::{LayoutInput, Margins};
use crate::model::{OpenClosePhase, PaginationStyle, Slide, SlideshowState};
use crate::surface::{CurrentSlideFrame, RenderFrame, Surface, SurfaceTarget};
use crate::transitions::{FloatTiming, PendingTransition, log_duration};
use crate::viewers::{SlideView, Viewer, ViewerProps, ViewerRegistry};
use kurbo::{Size, Vec2};
use std::time::Duration;

/// Deferred work driven by `Slideshow::tick`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    OpenFinished,
    CloseFinished,
    SnapBackFinished,
    SlideChangeFinished { to: usize },
    ScaleAnimationFinished,
    WheelGestureEnd,
    BounceFinished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerSlot {
    Transition,
    Snap,
    SlideChange,
    ScaleAnimation,
    Wheel,
    Bounce,
}

/// Pending task handles that a newer request supersedes
#[derive(Debug, Default)]
struct Timers {
    transition: Option<TaskId>,
    snap: Option<TaskId>,
    slide_change: Option<TaskId>,
    scale_animation: Option<TaskId>,
    wheel: Option<TaskId>,
    bounce: Option<TaskId>,
}

impl Timers {
    fn slot(&mut self, slot: TimerSlot) -> &mut Option<TaskId> {
        match slot {
            TimerSlot::Transition => &mut self.transition,
            TimerSlot::Snap => &mut self.snap,
            TimerSlot::SlideChange => &mut self.slide_change,
            TimerSlot::ScaleAnimation => &mut self.scale_animation,
            TimerSlot::Wheel => &mut self.wheel,
            TimerSlot::Bounce => &mut self.bounce,
        }
    }
}

/// Builds a `Slideshow`
pub struct SlideshowBuilder {
    slides: Vec<Slide>,
    props: SlideshowProps,
    callbacks: SlideshowCallbacks,
    viewers: ViewerRegistry,
    keyboard: Keyboard,
    coordinator: OpenCoordinator,
    float_timing: FloatTiming,
}

impl SlideshowBuilder {
    pub fn new(slides: Vec<Slide>) -> Self {
        Self {
            slides,
            props: SlideshowProps::default(),
            callbacks: SlideshowCallbacks::default(),
            viewers: ViewerRegistry::with_defaults(),
            keyboard: Keyboard::with_defaults(),
            coordinator: OpenCoordinator::default(),
            float_timing: log_duration,
        }
    }

    pub fn props(mut self, props: SlideshowProps) -> Self {
        self.props = props;
        self
    }

    pub fn callbacks(mut self, callbacks: SlideshowCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn viewers(mut self, viewers: ViewerRegistry) -> Self {
        self.viewers = viewers;
        self
    }

    pub fn keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = keyboard;
        self
    }

    /// Share open/close coordination with other slideshows
    pub fn open_coordinator(mut self, coordinator: OpenCoordinator) -> Self {
        self.coordinator = coordinator;
        self
    }

    pub fn float_timing(mut self, timing: FloatTiming) -> Self {
        self.float_timing = timing;
        self
    }

    pub fn build(self, surface: Box<dyn Surface>) -> Result<Slideshow> {
        let len = self.slides.len();
        if len == 0 {
            return Err(SlideshowError::NoSlides);
        }
        let initial = self.props.initial_slide_index;
        if initial >= len {
            return Err(SlideshowError::SlideOutOfRange {
                index: initial,
                len,
            });
        }
        self.props
            .validate()
            .map_err(|err| SlideshowError::InvalidProps(err.to_string()))?;
        if let Some(index) = self
            .slides
            .iter()
            .position(|slide| self.viewers.find(slide).is_none())
        {
            return Err(SlideshowError::NoViewer(index));
        }

        let state = SlideshowState {
            i: initial,
            scale: 1.0,
            slides_shown: vec![false; len],
            open_close_phase: OpenClosePhase::Closed,
            slide_with_custom_offset: None,
            overlay_opacity_for_current_slide: self.props.presentation.overlay_opacity,
            show_more_controls: false,
            animate_overlay_opacity_duration: None,
            animate_scale_duration: None,
            pan_and_zoom_mode: false,
            fullscreen: false,
            pagination: PaginationStyle::for_count(len, self.props.presentation.pagination_max_dots),
            hide_current_slide: false,
            viewport: Size::ZERO,
        };

        tracing::debug!(
            "[Slideshow] built with {} slides, starting at {}",
            len,
            initial
        );

        Ok(Slideshow {
            load_status: vec![LoadStatus::NotStarted; len],
            props: self.props,
            callbacks: self.callbacks,
            slides: self.slides,
            viewers: self.viewers,
            keyboard: self.keyboard,
            coordinator: self.coordinator,
            float_timing: self.float_timing,
            surface,
            state,
            bus: EventBus::new(),
            scheduler: Scheduler::new(),
            timers: Timers::default(),
            normalizer: Normalizer::new(),
            drag: Drag::new(),
            scale: Scale::new(),
            pinch: PinchZoom::new(),
            touch_emulation: TouchEmulation::default(),
            pan_and_zoom: PanAndZoom::new(),
            transition: None,
            locked: false,
            mounted: false,
            cleaned_up: false,
            close_notified: false,
        })
    }
}

/// A slideshow engine instance.
///
/// Lifecycle: `build` -> `initialize` -> (events, `tick`) -> `clean_up`.
pub struct Slideshow {
    props: SlideshowProps,
    callbacks: SlideshowCallbacks,
    slides: Vec<Slide>,
    viewers: ViewerRegistry,
    keyboard: Keyboard,
    coordinator: OpenCoordinator,
    float_timing: FloatTiming,
    surface: Box<dyn Surface>,

    state: SlideshowState,
    bus: EventBus,
    scheduler: Scheduler<Task>,
    timers: Timers,
    load_status: Vec<LoadStatus>,

    normalizer: Normalizer,
    drag: Drag,
    scale: Scale,
    pinch: PinchZoom,
    touch_emulation: TouchEmulation,
    pan_and_zoom: PanAndZoom,

    /// The running open/close animation
    transition: Option<PendingTransition>,
    /// A blocking animation is in flight
    locked: bool,
    mounted: bool,
    cleaned_up: bool,
    close_notified: bool,
}

impl std::fmt::Debug for Slideshow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slideshow")
            .field("slides", &self.slides.len())
            .field("state", &self.state)
            .field("locked", &self.locked)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

impl Slideshow {
    pub fn builder(slides: Vec<Slide>) -> SlideshowBuilder {
        SlideshowBuilder::new(slides)
    }

    // ===== Queries =====

    pub fn state(&self) -> &SlideshowState {
        &self.state
    }

    pub fn props(&self) -> &SlideshowProps {
        &self.props
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn drag_view(&self) -> DragView {
        self.drag.view()
    }

    pub fn scale_view(&self) -> ScaleView {
        ScaleView {
            scale: self.state.scale,
            limits: self.scale_limits(),
            dynamic: self.scale.dynamic(),
        }
    }

    /// Scale bounds of the current slide
    pub fn scale_limits(&self) -> ScaleLimits {
        self.limits_for(self.state.i)
    }

    pub fn is_touch_emulation_enabled(&self) -> bool {
        self.touch_emulation.is_enabled()
    }

    // ===== State =====

    /// Commit a host state update and re-render. Ignored once cleaned up.
    ///
    /// The open/close phase and pan & zoom mode belong to the engine: host
    /// writes to them are dropped. Use `close` and the pan & zoom commands.
    pub fn set_state(&mut self, update: impl FnOnce(&mut SlideshowState)) {
        if !self.mounted {
            tracing::debug!("[Slideshow] set_state ignored: not mounted");
            return;
        }
        let mut next = self.state.clone();
        update(&mut next);
        if next.open_close_phase != self.state.open_close_phase {
            tracing::error!("[Slideshow] open/close phase is not writable, ignored");
            next.open_close_phase = self.state.open_close_phase;
        }
        if next.pan_and_zoom_mode != self.state.pan_and_zoom_mode {
            tracing::error!("[Slideshow] pan & zoom mode is not writable, ignored");
            next.pan_and_zoom_mode = self.state.pan_and_zoom_mode;
        }
        self.commit(next);
    }

    pub(super) fn update_state(&mut self, update: impl FnOnce(&mut SlideshowState)) {
        if !self.mounted {
            return;
        }
        let mut next = self.state.clone();
        update(&mut next);
        self.commit(next);
    }

    fn commit(&mut self, mut next: SlideshowState) {
        let len = self.slides.len();
        if next.i >= len {
            tracing::error!("[Slideshow] slide index {} out of range, clamped", next.i);
            next.i = len - 1;
        }
        if !next.scale.is_finite() || next.scale <= 0.0 {
            tracing::error!("[Slideshow] rejected scale {}", next.scale);
            next.scale = self.state.scale;
        }
        if !next.pan_and_zoom_mode {
            let limits = self.limits_in(next.i, next.viewport);
            next.scale = limits.restrict(next.scale, false);
        }
        next.slides_shown.resize(len, false);
        // Keep the neighbours mounted; once shown, a slide stays mounted
        let window = next.i.saturating_sub(1)..=(next.i + 1).min(len - 1);
        for index in window {
            next.slides_shown[index] = true;
        }

        let previous_i = self.state.i;
        self.state = next;
        self.request_loads();
        self.render();
        let i = self.state.i;
        self.bus.emit(&SlideshowEvent::StateChange { previous_i, i });
    }

    // ===== Locking =====

    /// Block user-initiated gestures, key handling and close requests
    pub fn lock(&mut self) {
        if !self.locked {
            tracing::trace!("[Slideshow] locked");
        }
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        if self.locked {
            tracing::trace!("[Slideshow] unlocked");
        }
        self.locked = false;
    }

    // ===== Events =====

    pub fn on(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&SlideshowEvent) -> Option<Duration> + 'static,
    ) -> ListenerId {
        self.bus.on(kind, Box::new(listener))
    }

    pub fn once(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&SlideshowEvent) -> Option<Duration> + 'static,
    ) -> ListenerId {
        self.bus.once(kind, Box::new(listener))
    }

    /// Runs before listeners registered with `on`/`once`
    pub fn on_immediate(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&SlideshowEvent) -> Option<Duration> + 'static,
    ) -> ListenerId {
        self.bus.on_immediate(kind, Box::new(listener))
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.bus.off(id)
    }

    // ===== Time =====

    /// Feed one platform event. Returns whether the engine consumed it.
    pub fn handle_event(&mut self, event: PlatformEvent) -> bool {
        if !self.mounted {
            return false;
        }
        self.tick(event.timestamp());
        let Some(input) = self.normalizer.normalize(event) else {
            return false;
        };
        self.dispatch(input)
    }

    /// Advance the clock: run inertia and every task that is now due
    pub fn tick(&mut self, now: Duration) {
        if !self.mounted {
            return;
        }
        self.scheduler.advance_clock(now);
        self.inertia_frame(now);
        while let Some((id, task)) = self.scheduler.pop_due() {
            self.run_task(id, task);
            if !self.mounted {
                break;
            }
        }
    }

    fn run_task(&mut self, id: TaskId, task: Task) {
        tracing::trace!("[Slideshow] task {:?} ({:?})", task, id);
        match task {
            Task::OpenFinished => {
                self.timers.transition = None;
                self.finish_open();
            }
            Task::CloseFinished => {
                self.timers.transition = None;
                self.finish_close();
            }
            Task::SnapBackFinished => {
                self.timers.snap = None;
                self.clear_gesture_transforms();
                self.update_state(|state| state.animate_overlay_opacity_duration = None);
            }
            Task::SlideChangeFinished { to } => {
                self.timers.slide_change = None;
                self.surface.clear_transient_transform(SurfaceTarget::Slides);
                self.unlock();
                self.change_slide(to);
            }
            Task::ScaleAnimationFinished => {
                self.timers.scale_animation = None;
                self.update_state(|state| state.animate_scale_duration = None);
            }
            Task::WheelGestureEnd => {
                self.timers.wheel = None;
                self.finish_scale_gesture();
            }
            Task::BounceFinished => {
                self.timers.bounce = None;
                self.surface
                    .clear_transient_transform(SurfaceTarget::Slide(self.state.i));
                self.unlock();
            }
        }
    }

    /// Schedule `task`, replacing whatever `slot` held
    fn reschedule(&mut self, slot: TimerSlot, delay: Duration, task: Task) {
        self.cancel_timer(slot);
        let id = self.scheduler.schedule(delay, task);
        *self.timers.slot(slot) = Some(id);
    }

    fn cancel_timer(&mut self, slot: TimerSlot) {
        if let Some(id) = self.timers.slot(slot).take() {
            self.scheduler.cancel(id);
        }
    }

    // ===== Geometry =====

    fn viewer_for(&self, index: usize) -> Option<&dyn Viewer> {
        self.slides
            .get(index)
            .and_then(|slide| self.viewers.find(slide))
    }

    /// Slide size at scale 1.0
    fn slide_size(&self, index: usize) -> Size {
        let slide = &self.slides[index];
        self.viewer_for(index)
            .map(|viewer| viewer.max_size(slide))
            .unwrap_or_else(|| slide.size())
    }

    fn margins(&self) -> Margins {
        Margins::compute(&self.props.margins, self.state.viewport)
    }

    fn limits_for(&self, index: usize) -> ScaleLimits {
        self.limits_in(index, self.state.viewport)
    }

    fn limits_in(&self, index: usize, viewport: Size) -> ScaleLimits {
        let slide = &self.slides[index];
        let thumbnail = self
            .viewer_for(index)
            .and_then(|viewer| viewer.thumbnail(slide))
            .map(|thumb| thumb.size);
        ScaleLimits::for_slide(
            self.slide_size(index),
            thumbnail,
            Margins::compute(&self.props.margins, viewport).available(viewport),
            &self.props.scale,
        )
    }

    /// Layout input for a slide; only the current one carries gesture state
    fn layout_input(&self, index: usize) -> LayoutInput {
        let current = index == self.state.i;
        LayoutInput {
            viewport: self.state.viewport,
            margins: self.margins(),
            slide_size: self.slide_size(index),
            scale: if current {
                self.state.scale
            } else {
                self.limits_for(index).initial()
            },
            offset: if current {
                self.drag.pan_offset()
            } else {
                Vec2::ZERO
            },
            custom_origin: self.state.custom_offset_for(index),
            dynamic_scale: if current { self.scale.dynamic() } else { None },
        }
    }

    /// Push the current slide's gesture transform straight to the surface
    fn apply_current_transform(&mut self, transition: Option<Duration>) {
        let (_, transform) = self.layout_input(self.state.i).transform();
        self.surface.apply_transient_transform(
            SurfaceTarget::Slide(self.state.i),
            &transform,
            transition,
        );
    }

    fn clear_gesture_transforms(&mut self) {
        self.surface.clear_transient_transform(SurfaceTarget::Slides);
        self.surface
            .clear_transient_transform(SurfaceTarget::Slide(self.state.i));
    }

    // ===== Rendering =====

    fn render(&mut self) {
        if !self.mounted {
            return;
        }
        let slides = self.slide_views();
        let current = self.current_frame();
        let frame = RenderFrame {
            state: &self.state,
            slides,
            current,
            locked: self.locked,
        };
        self.surface.render(&frame);
    }

    fn slide_views(&self) -> Vec<Option<SlideView>> {
        (0..self.slides.len())
            .map(|index| {
                if !self.state.is_slide_shown(index) {
                    return None;
                }
                let viewer = self.viewer_for(index)?;
                let input = self.layout_input(index);
                let is_current = index == self.state.i;
                Some(viewer.render(&ViewerProps {
                    slide: &self.slides[index],
                    index,
                    size: input.scaled_size(input.scale),
                    is_current,
                    pan_and_zoom_mode: self.state.pan_and_zoom_mode,
                    hidden: is_current && self.state.hide_current_slide,
                }))
            })
            .collect()
    }

    fn current_frame(&self) -> CurrentSlideFrame {
        let index = self.state.i;
        let slide = &self.slides[index];
        let viewer = self.viewer_for(index);
        let (layout, transform) = self.layout_input(index).transform();
        let limits = self.limits_for(index);
        CurrentSlideFrame {
            index,
            viewer: viewer.map(|viewer| viewer.name()).unwrap_or("none"),
            layout,
            transform,
            min_scale: limits.min,
            max_scale: limits.max,
            transparent_background: viewer
                .is_some_and(|viewer| viewer.is_transparent_background(slide)),
            external_link: viewer
                .filter(|viewer| viewer.can_open_external_link(slide))
                .and_then(|viewer| viewer.external_link(slide)),
            other_actions: viewer
                .map(|viewer| viewer.other_actions(slide))
                .unwrap_or_default(),
        }
    }

    // ===== Callbacks =====

    fn notify_scale_change(&mut self) {
        let scale = self.state.scale;
        if let Some(callback) = self.callbacks.on_scale_change.as_mut() {
            callback(scale);
        }
        self.bus.emit(&SlideshowEvent::ScaleChange { scale });
    }

    fn notify_pan_and_zoom_change(&mut self, enabled: bool) {
        if let Some(callback) = self.callbacks.on_pan_and_zoom_mode_change.as_mut() {
            callback(enabled);
        }
        self.bus
            .emit(&SlideshowEvent::PanAndZoomModeChange { enabled });
    }
}

#[cfg(test)]
mod tests;
