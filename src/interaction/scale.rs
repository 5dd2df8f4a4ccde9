// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Slide scaling.
//!
//! The committed scale lives in `SlideshowState`. This module holds the
//! transient half: the dynamic scale a wheel or pinch gesture applies before
//! it is committed, and the custom origin that gesture zooms around.

use crate::config::ScaleSettings;
use crate::error::SlideshowError;
use crate::layout::{self, DynamicScale};
use crate::settings;
use kurbo::{Point, Size};

/// Scale bounds for the current slide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleLimits {
    pub min: f64,
    /// Fit scale: largest scale at which the slide fits inside the margins
    pub max: f64,
}

impl ScaleLimits {
    /// Bounds for a slide of `slide_size` (at scale 1.0) shown in `available`
    pub fn for_slide(
        slide_size: Size,
        thumbnail: Option<Size>,
        available: Size,
        settings: &ScaleSettings,
    ) -> Self {
        let max = layout::fit_scale(slide_size, available);
        let min = match thumbnail {
            // Never shrink below a bit more than the thumbnail the user
            // opened the slide from
            Some(thumb) => (thumb.width / slide_size.width)
                .max(thumb.height / slide_size.height)
                * settings.min_thumbnail_ratio,
            None => max * settings.min_scaled_slide_ratio,
        };
        Self {
            min: min.min(max),
            max,
        }
    }

    /// Scale a slide opens at: intrinsic size unless that does not fit
    pub fn initial(&self) -> f64 {
        1.0_f64.min(self.max).max(self.min)
    }

    /// Clamp into bounds; pan & zoom mode only keeps the absolute floor
    pub fn restrict(&self, value: f64, pan_and_zoom: bool) -> f64 {
        if pan_and_zoom {
            value.max(settings::scale::ABSOLUTE_MIN)
        } else {
            value.clamp(self.min, self.max)
        }
    }

    pub fn fits(&self, value: f64) -> bool {
        value <= self.max * (1.0 + 1e-9)
    }

    pub fn is_at_max(&self, value: f64) -> bool {
        value >= self.max * (1.0 - 1e-9)
    }
}

pub fn step_up(scale: f64, step: f64, factor: f64) -> f64 {
    scale * (1.0 + step * factor)
}

pub fn step_down(scale: f64, step: f64, factor: f64) -> f64 {
    scale / (1.0 + step * factor)
}

/// Target of a scale toggle: the fit scale from (near) 1.0, else 1.0
pub fn toggle_target(scale: f64, limits: &ScaleLimits, epsilon: f64) -> f64 {
    if (scale - 1.0).abs() <= epsilon {
        limits.max
    } else {
        1.0
    }
}

/// Read-only snapshot for other modules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleView {
    pub scale: f64,
    pub limits: ScaleLimits,
    pub dynamic: Option<DynamicScale>,
}

impl ScaleView {
    /// What is on screen right now
    pub fn effective(&self) -> f64 {
        self.dynamic.map(|d| d.value).unwrap_or(self.scale)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scale {
    dynamic: Option<f64>,
    origin: Option<Point>,
}

impl Scale {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dynamic(&self) -> Option<DynamicScale> {
        self.dynamic.map(|value| DynamicScale {
            value,
            origin: self.origin,
        })
    }

    pub fn set_dynamic(&mut self, value: f64) {
        self.dynamic = Some(value);
    }

    pub fn origin(&self) -> Option<Point> {
        self.origin
    }

    /// Pin the point a gesture zooms around. Fails if one is already set.
    pub fn set_origin(&mut self, origin: Point) -> Result<(), SlideshowError> {
        if self.origin.is_some() {
            return Err(SlideshowError::ScaleOriginAlreadySet);
        }
        self.origin = Some(origin);
        Ok(())
    }

    pub fn is_gesture_active(&self) -> bool {
        self.dynamic.is_some()
    }

    /// End the gesture, returning its dynamic scale and origin
    pub fn take_gesture(&mut self) -> Option<DynamicScale> {
        let taken = self.dynamic();
        self.dynamic = None;
        self.origin = None;
        taken
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// One wheel notch; `zoom_in` for a negative vertical delta
    pub fn wheel_step(current: f64, zoom_in: bool, settings: &ScaleSettings) -> f64 {
        if zoom_in {
            step_up(current, settings.step, settings.wheel_step_factor)
        } else {
            step_down(current, settings.step, settings.wheel_step_factor)
        }
    }
}
