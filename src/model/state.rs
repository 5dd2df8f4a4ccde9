// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Committed slideshow state.
//!
//! The coordinator owns exactly one `SlideshowState` and replaces it as a
//! whole on every commit. High-frequency gesture values (drag offsets,
//! dynamic scale) are deliberately not in here; see `interaction`.

use kurbo::{Point, Size};
use std::time::Duration;

/// Lifecycle of one modal session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenClosePhase {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Anchors a slide to a screen point (usually its thumbnail's center)
/// instead of the viewport center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomOffset {
    pub index: usize,
    pub origin: Point,
}

/// How the view layer should paginate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStyle {
    None,
    Dots,
    Counter,
}

impl PaginationStyle {
    pub fn for_count(count: usize, max_dots: usize) -> Self {
        match count {
            0 | 1 => PaginationStyle::None,
            n if n <= max_dots => PaginationStyle::Dots,
            _ => PaginationStyle::Counter,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlideshowState {
    /// Current slide index
    pub i: usize,
    /// Committed zoom factor of the current slide (1.0 = intrinsic size)
    pub scale: f64,
    /// Which slides are mounted
    pub slides_shown: Vec<bool>,
    pub open_close_phase: OpenClosePhase,
    pub slide_with_custom_offset: Option<CustomOffset>,
    pub overlay_opacity_for_current_slide: f64,
    pub show_more_controls: bool,
    /// Set while the overlay opacity should transition
    pub animate_overlay_opacity_duration: Option<Duration>,
    /// Set while a scale commit should transition
    pub animate_scale_duration: Option<Duration>,
    pub pan_and_zoom_mode: bool,
    pub fullscreen: bool,
    pub pagination: PaginationStyle,
    /// A float clone is standing in for the current slide
    pub hide_current_slide: bool,
    /// Last measured viewport size
    pub viewport: Size,
}

impl SlideshowState {
    pub fn is_slide_shown(&self, index: usize) -> bool {
        self.slides_shown.get(index).copied().unwrap_or(false)
    }

    pub fn custom_offset_for(&self, index: usize) -> Option<Point> {
        self.slide_with_custom_offset
            .filter(|offset| offset.index == index)
            .map(|offset| offset.origin)
    }
}
