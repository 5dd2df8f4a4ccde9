// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Pan & zoom mode.
//!
//! Entered when the user zooms past the fit scale. While active, the slide
//! pans freely in 2-D and scale limits are relaxed to an absolute floor.
//! Exiting snaps the slide back inside its limits with a short
//! overshoot-and-settle bounce.

use crate::config::PanAndZoomSettings;
use crate::error::SlideshowError;
use crate::interaction::scale::ScaleLimits;
use crate::layout::SlideTransform;
use crate::surface::Keyframe;
use kurbo::{Rect, Vec2};
use std::time::Duration;

/// Where the slide was when the mode was entered
#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    scale: f64,
    offset: Vec2,
}

/// How to leave the mode
#[derive(Debug, Clone, PartialEq)]
pub struct ExitPlan {
    pub target_scale: f64,
    /// Bounce animation, `None` when it is skipped
    pub bounce: Option<Bounce>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bounce {
    pub keyframes: Vec<Keyframe>,
    pub duration: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct PanAndZoom {
    entry: Option<Entry>,
    /// A pointer or key input changed scale or offset since entry
    touched: bool,
}

impl PanAndZoom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.entry.is_some()
    }

    pub fn enter(&mut self, scale: f64, offset: Vec2) -> Result<(), SlideshowError> {
        if self.entry.is_some() {
            return Err(SlideshowError::PanAndZoomModeAlreadyActive);
        }
        self.entry = Some(Entry { scale, offset });
        self.touched = false;
        tracing::debug!("[PanAndZoom] entered at scale {:.3}", scale);
        Ok(())
    }

    /// Record that the user moved or zoomed inside the mode
    pub fn mark_touched(&mut self) {
        if self.entry.is_some() {
            self.touched = true;
        }
    }

    /// Plan the exit and leave the mode.
    ///
    /// `from` is the slide rect on screen right now, `to` the rect it will
    /// have once the target scale is committed and re-centered.
    pub fn exit(
        &mut self,
        current_scale: f64,
        limits: &ScaleLimits,
        from: Rect,
        to: impl Fn(f64) -> Rect,
        settings: &PanAndZoomSettings,
    ) -> Result<ExitPlan, SlideshowError> {
        let entry = self
            .entry
            .take()
            .ok_or(SlideshowError::PanAndZoomModeNotActive)?;

        // An untouched round trip restores the scale it was entered at
        let target_scale = if self.touched {
            limits.restrict(current_scale, false)
        } else {
            limits.restrict(entry.scale, false)
        };
        self.touched = false;

        let bounce = if current_scale > settings.bounce_skip_scale {
            tracing::debug!(
                "[PanAndZoom] exit from scale {:.3}: bounce skipped",
                current_scale
            );
            None
        } else {
            Some(bounce(from, to(target_scale), settings))
        };
        tracing::debug!("[PanAndZoom] exited, target scale {:.3}", target_scale);
        Ok(ExitPlan {
            target_scale,
            bounce,
        })
    }

    /// Leave immediately without planning anything (slide change, clean-up)
    pub fn abandon(&mut self) -> bool {
        self.touched = false;
        self.entry.take().is_some()
    }
}

/// Keyframes that take the slide from `from` to `to` with a small overshoot.
///
/// The target layout is committed before the keyframes play, so frames are
/// expressed relative to it and end at identity.
pub fn bounce(from: Rect, to: Rect, settings: &PanAndZoomSettings) -> Bounce {
    let translate = from.center() - to.center();
    let scale = from.width() / to.width().max(f64::EPSILON);
    let overshoot = settings.bounce_overshoot;

    let start = SlideTransform {
        translate,
        scale,
        ..SlideTransform::IDENTITY
    };
    let past = SlideTransform {
        translate: -translate * overshoot,
        scale: 1.0 - (scale - 1.0) * overshoot,
        ..SlideTransform::IDENTITY
    };
    let keyframes = vec![
        Keyframe {
            progress: 0.0,
            transform: start,
        },
        Keyframe {
            progress: 0.7,
            transform: past,
        },
        Keyframe {
            progress: 1.0,
            transform: SlideTransform::IDENTITY,
        },
    ];

    let distance = translate.hypot();
    let size_delta = (from.width() - to.width())
        .abs()
        .max((from.height() - to.height()).abs());
    let min = settings.bounce_min_duration_ms as f64;
    let max = settings.bounce_max_duration_ms as f64;
    let ms = (min
        + distance * settings.bounce_distance_factor
        + size_delta * settings.bounce_size_factor)
        .clamp(min, max);

    Bounce {
        keyframes,
        duration: Duration::from_millis(ms.round() as u64),
    }
}
