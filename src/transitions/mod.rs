// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Open/close transitions.
//!
//! A transition drives the surface directly and hands back a
//! `PendingTransition` describing what it started. The engine schedules the
//! completion and either `finish`es or `cancel`s it; cancelling puts the
//! surface back the way it would look without the animation.

mod fade;
mod float;

pub use fade::FadeTransition;
pub use float::{FloatTiming, FloatTransition, log_duration};

use crate::config::{AnimationKind, AnimationSettings};
use crate::engine::CloseInteraction;
use crate::layout::SlideTransform;
use crate::model::Slide;
use crate::surface::{FloatId, Surface, SurfaceTarget};
use kurbo::{Rect, Size};
use std::time::Duration;

/// What a transition needs to know about the slide it animates
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext<'a> {
    pub index: usize,
    pub slide: &'a Slide,
    pub viewport: Size,
    /// Slide rect on screen (target when opening, current when closing)
    pub slide_rect: Rect,
    /// Transform currently applied to the slide
    pub slide_transform: SlideTransform,
    pub thumbnail_rect: Option<Rect>,
    pub overlay_opacity: f64,
    pub settings: &'a AnimationSettings,
}

pub trait Transition {
    fn kind(&self) -> AnimationKind;

    /// Start the open animation; `None` when this transition cannot run
    fn open(&self, surface: &mut dyn Surface, ctx: &TransitionContext<'_>)
    -> Option<PendingTransition>;

    fn close(
        &self,
        surface: &mut dyn Surface,
        ctx: &TransitionContext<'_>,
        interaction: CloseInteraction,
    ) -> Option<PendingTransition>;
}

/// A running open/close animation
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTransition {
    pub kind: AnimationKind,
    pub duration: Duration,
    /// Float clones stand in for the current slide until the end
    pub hides_slide: bool,
    floats: Vec<FloatId>,
    /// Final opacities to snap to when cancelled
    restore_opacity: Vec<(SurfaceTarget, f64)>,
    /// Targets carrying a transient transform
    transforms: Vec<SurfaceTarget>,
}

impl PendingTransition {
    fn new(kind: AnimationKind, duration: Duration) -> Self {
        Self {
            kind,
            duration,
            hides_slide: false,
            floats: Vec::new(),
            restore_opacity: Vec::new(),
            transforms: Vec::new(),
        }
    }

    pub fn floats(&self) -> &[FloatId] {
        &self.floats
    }

    /// The animation ran to completion
    pub fn finish(self, surface: &mut dyn Surface) {
        for id in self.floats {
            surface.remove_float(id);
        }
    }

    /// Abort synchronously: clones disappear, opacity and transforms reset
    pub fn cancel(self, surface: &mut dyn Surface) {
        tracing::debug!("[Transition] cancel {:?}", self.kind);
        for id in self.floats {
            surface.remove_float(id);
        }
        for (target, opacity) in self.restore_opacity {
            surface.set_opacity(target, opacity, None);
        }
        for target in self.transforms {
            surface.clear_transient_transform(target);
        }
    }
}
