// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! A `Surface` that records what the engine asks of it.

use crate::layout::SlideTransform;
use crate::model::SlideshowState;
use crate::surface::{
    CurrentSlideFrame, FloatElement, FloatId, Keyframe, RenderFrame, Surface, SurfaceTarget,
};
use crate::viewers::SlideView;
use kurbo::{Rect, Size};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct Recording {
    pub viewport: Size,
    pub thumbnail_rects: HashMap<usize, Rect>,
    pub fail_fullscreen: bool,

    pub listeners_attached: bool,
    pub detach_calls: usize,
    pub renders: usize,
    pub last_state: Option<SlideshowState>,
    pub last_slides: Vec<Option<SlideView>>,
    pub last_current: Option<CurrentSlideFrame>,
    pub transients: HashMap<SurfaceTarget, (SlideTransform, Option<Duration>)>,
    pub opacities: HashMap<SurfaceTarget, f64>,
    pub floats: HashMap<FloatId, FloatElement>,
    pub spawned_floats: usize,
    pub keyframes: Vec<(SurfaceTarget, Vec<Keyframe>, Duration)>,
    pub fullscreen: bool,
    pub loads: Vec<(usize, String)>,
    pub cleared: Vec<SurfaceTarget>,
}

impl Recording {
    pub fn opacity(&self, target: SurfaceTarget) -> Option<f64> {
        self.opacities.get(&target).copied()
    }

    pub fn transient(&self, target: SurfaceTarget) -> Option<SlideTransform> {
        self.transients.get(&target).map(|(transform, _)| *transform)
    }

    pub fn live_floats(&self) -> usize {
        self.floats.len()
    }

    pub fn state(&self) -> &SlideshowState {
        self.last_state.as_ref().expect("nothing rendered yet")
    }
}

pub struct RecordingSurface {
    recording: Rc<RefCell<Recording>>,
    next_float: u64,
}

impl RecordingSurface {
    pub fn new(viewport: Size) -> (Self, Rc<RefCell<Recording>>) {
        let recording = Rc::new(RefCell::new(Recording {
            viewport,
            ..Recording::default()
        }));
        (
            Self {
                recording: recording.clone(),
                next_float: 0,
            },
            recording,
        )
    }
}

impl Surface for RecordingSurface {
    fn attach_listeners(&mut self) {
        self.recording.borrow_mut().listeners_attached = true;
    }

    fn detach_listeners(&mut self) {
        let mut recording = self.recording.borrow_mut();
        recording.listeners_attached = false;
        recording.detach_calls += 1;
    }

    fn render(&mut self, frame: &RenderFrame<'_>) {
        let mut recording = self.recording.borrow_mut();
        recording.renders += 1;
        recording.last_state = Some(frame.state.clone());
        recording.last_slides = frame.slides.clone();
        recording.last_current = Some(frame.current.clone());
    }

    fn viewport_size(&self) -> Size {
        self.recording.borrow().viewport
    }

    fn thumbnail_rect(&self, index: usize) -> Option<Rect> {
        self.recording.borrow().thumbnail_rects.get(&index).copied()
    }

    fn apply_transient_transform(
        &mut self,
        target: SurfaceTarget,
        transform: &SlideTransform,
        transition: Option<Duration>,
    ) {
        self.recording
            .borrow_mut()
            .transients
            .insert(target, (*transform, transition));
    }

    fn clear_transient_transform(&mut self, target: SurfaceTarget) {
        let mut recording = self.recording.borrow_mut();
        recording.transients.remove(&target);
        recording.cleared.push(target);
    }

    fn set_opacity(&mut self, target: SurfaceTarget, opacity: f64, _transition: Option<Duration>) {
        self.recording.borrow_mut().opacities.insert(target, opacity);
    }

    fn spawn_float(&mut self, element: FloatElement) -> FloatId {
        self.next_float += 1;
        let id = FloatId(self.next_float);
        let mut recording = self.recording.borrow_mut();
        recording.floats.insert(id, element);
        recording.spawned_floats += 1;
        id
    }

    fn animate_float(&mut self, id: FloatId, rect: Rect, opacity: f64, _duration: Duration) {
        if let Some(element) = self.recording.borrow_mut().floats.get_mut(&id) {
            element.rect = rect;
            element.opacity = opacity;
        }
    }

    fn remove_float(&mut self, id: FloatId) {
        self.recording.borrow_mut().floats.remove(&id);
    }

    fn play_keyframes(&mut self, target: SurfaceTarget, keyframes: &[Keyframe], duration: Duration) {
        self.recording
            .borrow_mut()
            .keyframes
            .push((target, keyframes.to_vec(), duration));
    }

    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<(), String> {
        let mut recording = self.recording.borrow_mut();
        if recording.fail_fullscreen {
            return Err("fullscreen not allowed".into());
        }
        recording.fullscreen = fullscreen;
        Ok(())
    }

    fn load_image(&mut self, index: usize, url: &str) {
        self.recording.borrow_mut().loads.push((index, url.to_string()));
    }
}
