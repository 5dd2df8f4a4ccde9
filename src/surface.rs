// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! The view-layer contract.
//!
//! The engine never draws. It hands a `RenderFrame` to the surface after
//! each state commit and, during continuous gestures, pokes transforms
//! straight into the surface through `apply_transient_transform`. That
//! second path skips the commit/render cycle entirely; the next `render`
//! is authoritative again.

use crate::layout::{SlideLayout, SlideTransform};
use crate::model::SlideshowState;
use crate::viewers::{SlideView, ViewerAction};
use kurbo::{Rect, Size};
use std::time::Duration;

/// Element a transient mutation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceTarget {
    /// One slide element
    Slide(usize),
    /// The horizontal strip holding all slides (swipes move this)
    Slides,
    /// The dark backdrop
    Overlay,
}

/// Handle to a floating clone created for the float transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatId(pub u64);

/// A detached element positioned in screen space
#[derive(Debug, Clone, PartialEq)]
pub struct FloatElement {
    pub url: String,
    pub rect: Rect,
    pub opacity: f64,
}

/// One step of a keyframe animation; `progress` runs 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub progress: f64,
    pub transform: SlideTransform,
}

/// Current-slide details the controls need
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSlideFrame {
    pub index: usize,
    pub viewer: &'static str,
    pub layout: SlideLayout,
    pub transform: SlideTransform,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Skip the dark slide backdrop
    pub transparent_background: bool,
    pub external_link: Option<String>,
    pub other_actions: Vec<ViewerAction>,
}

/// Everything the view layer needs for one render pass
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame<'a> {
    pub state: &'a SlideshowState,
    /// One entry per slide; `None` when the slide is not mounted
    pub slides: Vec<Option<SlideView>>,
    pub current: CurrentSlideFrame,
    pub locked: bool,
}

pub trait Surface {
    /// Start delivering native events
    fn attach_listeners(&mut self);

    /// Stop delivering native events; may be called more than once
    fn detach_listeners(&mut self);

    fn render(&mut self, frame: &RenderFrame<'_>);

    fn viewport_size(&self) -> Size;

    /// Screen rect of the thumbnail the slide was opened from
    fn thumbnail_rect(&self, index: usize) -> Option<Rect>;

    /// Direct-render escape hatch for continuous gestures
    fn apply_transient_transform(
        &mut self,
        target: SurfaceTarget,
        transform: &SlideTransform,
        transition: Option<Duration>,
    );

    /// Drop a transient transform, returning to the rendered one
    fn clear_transient_transform(&mut self, target: SurfaceTarget);

    fn set_opacity(&mut self, target: SurfaceTarget, opacity: f64, transition: Option<Duration>);

    fn spawn_float(&mut self, element: FloatElement) -> FloatId;

    fn animate_float(&mut self, id: FloatId, rect: Rect, opacity: f64, duration: Duration);

    fn remove_float(&mut self, id: FloatId);

    fn play_keyframes(&mut self, target: SurfaceTarget, keyframes: &[Keyframe], duration: Duration);

    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<(), String>;

    /// Begin (or retry) loading a slide's image; the host reports back
    /// through `Slideshow::on_image_load`
    fn load_image(&mut self, index: usize, url: &str);
}
