// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Slide dimension and transform calculator.
//!
//! Everything in here is pure. The slide element is laid out centered in the
//! viewport at its committed scale; `SlideTransform` is what the view layer
//! applies on top of that (translate, transient scale, transform origin).
//!
//! Coordinate spaces:
//! - screen: viewport pixels, origin top-left
//! - offset: displacement of the slide center from the center of the area
//!   left free by the margins

use crate::config::MarginSettings;
use kurbo::{Point, Rect, Size, Vec2};

// ============================================================================
// MARGINS
// ============================================================================

/// Space kept free around a fitted slide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub const ZERO: Margins = Margins {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// `max(min, ratio * extent)` per axis, plus header/footer space
    pub fn compute(settings: &MarginSettings, viewport: Size) -> Self {
        let horizontal = settings.min.max(settings.ratio * viewport.width);
        let vertical = settings.min.max(settings.ratio * viewport.height);
        Self {
            top: vertical + settings.header,
            right: horizontal,
            bottom: vertical + settings.footer,
            left: horizontal,
        }
    }

    /// Area a slide may occupy without overlapping the margins
    pub fn available(&self, viewport: Size) -> Size {
        Size::new(
            (viewport.width - self.left - self.right).max(1.0),
            (viewport.height - self.top - self.bottom).max(1.0),
        )
    }

    /// Center of the available area in screen space
    pub fn available_center(&self, viewport: Size) -> Point {
        let available = self.available(viewport);
        Point::new(
            self.left + available.width / 2.0,
            self.top + available.height / 2.0,
        )
    }
}

/// Largest scale at which `slide` fits inside `available`
pub fn fit_scale(slide: Size, available: Size) -> f64 {
    (available.width / slide.width).min(available.height / slide.height)
}

/// Whether a slide of `size` fits inside the margins
pub fn fits(size: Size, viewport: Size, margins: &Margins) -> bool {
    let available = margins.available(viewport);
    // Half a pixel of slack for float noise
    size.width <= available.width + 0.5 && size.height <= available.height + 0.5
}

// ============================================================================
// LAYOUT
// ============================================================================

/// A transient scale applied during a wheel or pinch gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicScale {
    pub value: f64,
    /// Screen point the gesture zooms around; viewport-centered slide
    /// center when `None`
    pub origin: Option<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput {
    pub viewport: Size,
    pub margins: Margins,
    /// Slide size at scale 1.0
    pub slide_size: Size,
    /// Committed scale
    pub scale: f64,
    /// Pan offset from dragging
    pub offset: Vec2,
    /// Screen point the slide is anchored to (thumbnail center)
    pub custom_origin: Option<Point>,
    pub dynamic_scale: Option<DynamicScale>,
}

/// Where the slide ends up at the committed scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideLayout {
    /// Screen rect, pan offset included
    pub rect: Rect,
    /// Center displacement from the viewport center
    pub offset: Vec2,
}

/// The view layer's transform for the slide element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideTransform {
    pub translate: Vec2,
    /// Transient scale on top of the committed one
    pub scale: f64,
    /// Transform origin as percentages of the slide box
    pub origin_percent: Point,
    /// Box-shadow is counter-scaled so it keeps its on-screen size
    pub shadow_scale: f64,
    pub opacity: f64,
}

impl SlideTransform {
    pub const IDENTITY: SlideTransform = SlideTransform {
        translate: Vec2::ZERO,
        scale: 1.0,
        origin_percent: Point::new(50.0, 50.0),
        shadow_scale: 1.0,
        opacity: 1.0,
    };

    pub fn translate(translate: Vec2) -> Self {
        Self {
            translate,
            ..Self::IDENTITY
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for SlideTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl LayoutInput {
    pub fn scaled_size(&self, scale: f64) -> Size {
        Size::new(self.slide_size.width * scale, self.slide_size.height * scale)
    }

    /// Layout at the committed scale
    pub fn layout(&self) -> SlideLayout {
        let size = self.scaled_size(self.scale);
        let base = match self.custom_origin {
            Some(origin) => anchored_offset(origin, size, self.viewport, &self.margins),
            None => Vec2::ZERO,
        };
        let offset = base + self.offset;
        let center = self.margins.available_center(self.viewport) + offset;
        SlideLayout {
            rect: Rect::from_center_size(center, size),
            offset,
        }
    }

    /// Layout plus the transform the view layer should apply
    pub fn transform(&self) -> (SlideLayout, SlideTransform) {
        let layout = self.layout();
        let mut transform = SlideTransform::translate(layout.offset);
        if let Some(dynamic) = self.dynamic_scale {
            let ratio = dynamic.value / self.scale;
            transform.scale = ratio;
            transform.shadow_scale = 1.0 / ratio;
            if let Some(origin) = dynamic.origin {
                transform.origin_percent = origin_percent(origin, layout.rect);
            }
        }
        (layout, transform)
    }
}

/// Viewport center in screen space
pub fn viewport_center(viewport: Size) -> Point {
    Point::new(viewport.width / 2.0, viewport.height / 2.0)
}

/// Offset for a slide anchored at `origin`.
///
/// While the slide still fits inside the margins it is pushed back inside
/// them edge by edge, so zooming an anchored slide never bleeds off-screen.
/// Once it no longer fits the raw anchor offset is used.
pub fn anchored_offset(origin: Point, size: Size, viewport: Size, margins: &Margins) -> Vec2 {
    let center = margins.available_center(viewport);
    if !fits(size, viewport, margins) {
        return origin - center;
    }

    let mut left = origin.x - size.width / 2.0;
    let mut top = origin.y - size.height / 2.0;

    if left < margins.left {
        left = margins.left;
    }
    if left + size.width > viewport.width - margins.right {
        left = viewport.width - margins.right - size.width;
    }
    if top < margins.top {
        top = margins.top;
    }
    if top + size.height > viewport.height - margins.bottom {
        top = viewport.height - margins.bottom - size.height;
    }

    Point::new(left + size.width / 2.0, top + size.height / 2.0) - center
}

/// Screen point expressed as percentages of `rect`
pub fn origin_percent(point: Point, rect: Rect) -> Point {
    let width = rect.width().max(f64::EPSILON);
    let height = rect.height().max(f64::EPSILON);
    Point::new(
        (point.x - rect.x0) / width * 100.0,
        (point.y - rect.y0) / height * 100.0,
    )
}

/// Convert "scale by `ratio` around `origin`" into an offset change for a
/// center-origin scale, so the zoomed point stays put on screen once the
/// custom origin is dropped: `T' = T + (1 - r)(O - C)`.
pub fn compensate_origin(offset: Vec2, ratio: f64, origin: Point, rect: Rect) -> Vec2 {
    offset + (origin - rect.center()) * (1.0 - ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(scale: f64) -> LayoutInput {
        LayoutInput {
            viewport: Size::new(1000.0, 800.0),
            margins: Margins {
                top: 20.0,
                right: 20.0,
                bottom: 20.0,
                left: 20.0,
            },
            slide_size: Size::new(400.0, 300.0),
            scale,
            offset: Vec2::ZERO,
            custom_origin: None,
            dynamic_scale: None,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn margins_use_ratio_or_minimum() {
        let settings = MarginSettings {
            ratio: 0.05,
            min: 30.0,
            header: 40.0,
            footer: 0.0,
        };
        let margins = Margins::compute(&settings, Size::new(1000.0, 400.0));
        assert_eq!(margins.left, 50.0);
        assert_eq!(margins.bottom, 30.0);
        assert_eq!(margins.top, 70.0);
        assert_eq!(
            margins.available(Size::new(1000.0, 400.0)),
            Size::new(900.0, 300.0)
        );
    }

    #[test]
    fn fit_scale_picks_tighter_axis() {
        assert_eq!(fit_scale(Size::new(400.0, 300.0), Size::new(800.0, 300.0)), 1.0);
        assert_eq!(fit_scale(Size::new(400.0, 300.0), Size::new(200.0, 600.0)), 0.5);
    }

    #[test]
    fn centered_layout() {
        let layout = input(1.0).layout();
        assert_eq!(layout.rect, Rect::new(300.0, 250.0, 700.0, 550.0));
        assert_eq!(layout.offset, Vec2::ZERO);
    }

    #[test]
    fn anchored_slide_is_clamped_inside_margins() {
        let mut input = input(1.0);
        // Thumbnail near the top-left corner
        input.custom_origin = Some(Point::new(50.0, 40.0));
        let layout = input.layout();
        assert_eq!(layout.rect.x0, 20.0);
        assert_eq!(layout.rect.y0, 20.0);

        // Near the bottom-right corner
        input.custom_origin = Some(Point::new(990.0, 790.0));
        let layout = input.layout();
        assert_eq!(layout.rect.x1, 980.0);
        assert_eq!(layout.rect.y1, 780.0);
    }

    #[test]
    fn anchored_slide_uses_raw_offset_when_too_big() {
        let mut input = input(3.0);
        input.custom_origin = Some(Point::new(100.0, 100.0));
        let layout = input.layout();
        assert_eq!(layout.offset, Vec2::new(-400.0, -300.0));
    }

    #[test]
    fn dynamic_scale_sets_origin_and_counter_scales_shadow() {
        let mut input = input(1.0);
        input.dynamic_scale = Some(DynamicScale {
            value: 2.0,
            origin: Some(Point::new(300.0, 250.0)),
        });
        let (_, transform) = input.transform();
        assert_eq!(transform.scale, 2.0);
        assert_eq!(transform.shadow_scale, 0.5);
        assert_eq!(transform.origin_percent, Point::new(0.0, 0.0));
    }

    #[test]
    fn origin_compensation_keeps_point_fixed() {
        // Scale 2x around the slide's top-left corner
        let input = input(1.0);
        let rect = input.layout().rect;
        let origin = Point::new(rect.x0, rect.y0);
        let offset = compensate_origin(Vec2::ZERO, 2.0, origin, rect);

        // With center origin and the new offset, the corner must land at
        // the same screen point
        let center = rect.center() + offset;
        let corner = center - Vec2::new(rect.width(), rect.height()) * 2.0 / 2.0;
        assert!(approx(corner.x, origin.x));
        assert!(approx(corner.y, origin.y));
    }
}
