// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Two-finger pinch zoom, plus a desktop touch emulation mode that turns a
//! single mouse pointer into a mirrored pair of touches.

use crate::layout::viewport_center;
use kurbo::{Point, Size};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pinch {
    initial_distance: f64,
    initial_scale: f64,
    fits: bool,
}

/// Result of a pinch move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchUpdate {
    pub scale: f64,
    /// `Some(fits)` when the slide just crossed the fit boundary
    pub fit_changed: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct PinchZoom {
    gesture: Option<Pinch>,
}

impl PinchZoom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Begin a pinch; returns the zoom origin (midpoint of the touches)
    pub fn start(&mut self, first: Point, second: Point, scale: f64, fits: bool) -> Point {
        let origin = first.midpoint(second);
        self.gesture = Some(Pinch {
            initial_distance: first.distance(second).max(1.0),
            initial_scale: scale,
            fits,
        });
        tracing::debug!("[PinchZoom] start at {:?}, scale {:.3}", origin, scale);
        origin
    }

    /// `fits` decides whether a scale fits inside the margins
    pub fn update(
        &mut self,
        first: Point,
        second: Point,
        fits: impl Fn(f64) -> bool,
    ) -> Option<PinchUpdate> {
        let pinch = self.gesture.as_mut()?;
        let scale = pinch.initial_scale * first.distance(second) / pinch.initial_distance;
        let now_fits = fits(scale);
        let fit_changed = (now_fits != pinch.fits).then_some(now_fits);
        pinch.fits = now_fits;
        Some(PinchUpdate { scale, fit_changed })
    }

    /// Finish; returns the scale the gesture started from
    pub fn end(&mut self) -> Option<f64> {
        self.gesture.take().map(|p| p.initial_scale)
    }

    pub fn cancel(&mut self) {
        self.gesture = None;
    }
}

/// Desktop stand-in for a second finger.
///
/// Toggled with Alt+Z. While enabled, a mouse drag becomes a pinch: the
/// real pointer is one touch and its mirror image around the viewport
/// center is the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchEmulation {
    enabled: bool,
}

impl TouchEmulation {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        tracing::info!(
            "[PinchZoom] touch emulation {}",
            if self.enabled { "on" } else { "off" }
        );
        self.enabled
    }

    /// The emulated touch pair for a pointer position
    pub fn touches(&self, pointer: Point, viewport: Size) -> (Point, Point) {
        let center = viewport_center(viewport);
        let mirrored = center + (center - pointer);
        (pointer, mirrored)
    }
}
