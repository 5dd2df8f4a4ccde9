// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Default tuning constants.
//!
//! These are the values `SlideshowProps::default()` starts from. Most of
//! them were tuned by hand against real touch hardware; they are exposed
//! through the config so hosts can adjust them rather than re-derive them.

// ============================================================================
// DRAG SETTINGS
// ============================================================================
/// Pointer travel (px) before a press turns into a drag
const DRAG_OFFSET_THRESHOLD: f64 = 5.0;

/// Fraction of the viewport a drag must cover to commit
const DRAG_COMMIT_RATIO: f64 = 0.5;

/// Release speed (px/ms) that commits a drag regardless of distance
const DRAG_COMMIT_SPEED: f64 = 0.05;

/// Minimum interval between two speed samples (ms)
const DRAG_SPEED_SAMPLE_INTERVAL_MS: u64 = 200;

/// Samples older than this are treated as "not moving" (ms)
const DRAG_SPEED_STALE_AFTER_MS: u64 = 300;

/// Snap-back / slide-change animation bounds (ms)
const DRAG_SNAP_MIN_DURATION_MS: u64 = 120;
const DRAG_SNAP_MAX_DURATION_MS: u64 = 320;

/// Inertia duration per sqrt(px/ms) of release speed (ms)
const DRAG_INERTIA_DURATION_FACTOR: f64 = 420.0;

/// Fraction of `velocity * duration` travelled during inertia
const DRAG_INERTIA_TRAVEL_FACTOR: f64 = 0.35;

/// Rubber-band strength at the first/last slide
const DRAG_EDGE_RESISTANCE: f64 = 0.35;

// ============================================================================
// SCALE SETTINGS
// ============================================================================
/// Zoom step: scale_up multiplies by (1 + step)
const SCALE_STEP: f64 = 0.5;

/// Duration of animated scale commits (ms)
const SCALE_ANIMATION_DURATION_MS: u64 = 120;

/// A slide is never shown smaller than this multiple of its thumbnail
const SCALE_MIN_THUMBNAIL_RATIO: f64 = 1.25;

/// Without a thumbnail, minimum scale as a fraction of the max-fit scale
const SCALE_MIN_SCALED_SLIDE_RATIO: f64 = 0.1;

/// Scales within this distance of 1.0 count as exactly 1.0
const SCALE_TOGGLE_EPSILON: f64 = 0.01;

/// Quiet period that ends a wheel zoom gesture (ms)
const SCALE_WHEEL_GESTURE_TIMEOUT_MS: u64 = 150;

/// Wheel notches are converted to scale steps with this factor
const SCALE_WHEEL_STEP_FACTOR: f64 = 0.2;

/// Hard floor so scale can never reach zero
const SCALE_ABSOLUTE_MIN: f64 = 0.001;

// ============================================================================
// PAN & ZOOM MODE SETTINGS
// ============================================================================
/// Above this scale the exit bounce is skipped
const PAN_AND_ZOOM_BOUNCE_SKIP_SCALE: f64 = 5.0;

/// Exit bounce duration bounds (ms)
const PAN_AND_ZOOM_BOUNCE_MIN_DURATION_MS: u64 = 160;
const PAN_AND_ZOOM_BOUNCE_MAX_DURATION_MS: u64 = 480;

/// Extra bounce time per px of travel and per px of size change (ms)
const PAN_AND_ZOOM_BOUNCE_DISTANCE_FACTOR: f64 = 0.25;
const PAN_AND_ZOOM_BOUNCE_SIZE_FACTOR: f64 = 0.1;

/// Overshoot past the target on the first bounce keyframe
const PAN_AND_ZOOM_BOUNCE_OVERSHOOT: f64 = 0.06;

/// Arrow-key pan distance (px)
const PAN_AND_ZOOM_KEY_PAN_STEP: f64 = 50.0;

// ============================================================================
// OPEN / CLOSE ANIMATION SETTINGS
// ============================================================================
const FADE_DURATION_MS: u64 = 180;
const FADE_LONGER_DURATION_MS: u64 = 300;
const FADE_LONGER_SCALE: f64 = 1.05;
const FADE_LONGER_DRIFT: f64 = 60.0;

const FLOAT_MIN_DURATION_MS: u64 = 150;
/// ms per ln(1 + px) of size difference
const FLOAT_LOG_FACTOR: f64 = 45.0;

/// Viewports narrower than this use the small-screen animation kind (px)
const SMALL_SCREEN_MAX_WIDTH: f64 = 600.0;

// ============================================================================
// OVERLAY & CONTROLS
// ============================================================================
const OVERLAY_OPACITY: f64 = 0.85;
const OVERLAY_OPACITY_FOR_FLOAT: f64 = 0.95;

/// Viewports at least this wide show the extra controls (px)
const SHOW_MORE_CONTROLS_MIN_WIDTH: f64 = 500.0;

/// Galleries with more slides than this use a counter instead of dots
const PAGINATION_MAX_DOTS: usize = 10;

// ============================================================================
// MARGINS
// ============================================================================
const MARGIN_RATIO: f64 = 0.025;
const MARGIN_MIN: f64 = 10.0;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Drag gesture settings
pub mod drag {
    pub const OFFSET_THRESHOLD: f64 = super::DRAG_OFFSET_THRESHOLD;
    pub const COMMIT_RATIO: f64 = super::DRAG_COMMIT_RATIO;
    pub const COMMIT_SPEED: f64 = super::DRAG_COMMIT_SPEED;
    pub const SPEED_SAMPLE_INTERVAL_MS: u64 = super::DRAG_SPEED_SAMPLE_INTERVAL_MS;
    pub const SPEED_STALE_AFTER_MS: u64 = super::DRAG_SPEED_STALE_AFTER_MS;
    pub const SNAP_MIN_DURATION_MS: u64 = super::DRAG_SNAP_MIN_DURATION_MS;
    pub const SNAP_MAX_DURATION_MS: u64 = super::DRAG_SNAP_MAX_DURATION_MS;
    pub const INERTIA_DURATION_FACTOR: f64 = super::DRAG_INERTIA_DURATION_FACTOR;
    pub const INERTIA_TRAVEL_FACTOR: f64 = super::DRAG_INERTIA_TRAVEL_FACTOR;
    pub const EDGE_RESISTANCE: f64 = super::DRAG_EDGE_RESISTANCE;
}

/// Zoom settings
pub mod scale {
    pub const STEP: f64 = super::SCALE_STEP;
    pub const ANIMATION_DURATION_MS: u64 = super::SCALE_ANIMATION_DURATION_MS;
    pub const MIN_THUMBNAIL_RATIO: f64 = super::SCALE_MIN_THUMBNAIL_RATIO;
    pub const MIN_SCALED_SLIDE_RATIO: f64 = super::SCALE_MIN_SCALED_SLIDE_RATIO;
    pub const TOGGLE_EPSILON: f64 = super::SCALE_TOGGLE_EPSILON;
    pub const WHEEL_GESTURE_TIMEOUT_MS: u64 = super::SCALE_WHEEL_GESTURE_TIMEOUT_MS;
    pub const WHEEL_STEP_FACTOR: f64 = super::SCALE_WHEEL_STEP_FACTOR;
    pub const ABSOLUTE_MIN: f64 = super::SCALE_ABSOLUTE_MIN;
}

/// Pan & zoom mode settings
pub mod pan_and_zoom {
    pub const BOUNCE_SKIP_SCALE: f64 = super::PAN_AND_ZOOM_BOUNCE_SKIP_SCALE;
    pub const BOUNCE_MIN_DURATION_MS: u64 = super::PAN_AND_ZOOM_BOUNCE_MIN_DURATION_MS;
    pub const BOUNCE_MAX_DURATION_MS: u64 = super::PAN_AND_ZOOM_BOUNCE_MAX_DURATION_MS;
    pub const BOUNCE_DISTANCE_FACTOR: f64 = super::PAN_AND_ZOOM_BOUNCE_DISTANCE_FACTOR;
    pub const BOUNCE_SIZE_FACTOR: f64 = super::PAN_AND_ZOOM_BOUNCE_SIZE_FACTOR;
    pub const BOUNCE_OVERSHOOT: f64 = super::PAN_AND_ZOOM_BOUNCE_OVERSHOOT;
    pub const KEY_PAN_STEP: f64 = super::PAN_AND_ZOOM_KEY_PAN_STEP;
}

/// Open/close transition settings
pub mod animation {
    pub const FADE_DURATION_MS: u64 = super::FADE_DURATION_MS;
    pub const FADE_LONGER_DURATION_MS: u64 = super::FADE_LONGER_DURATION_MS;
    pub const FADE_LONGER_SCALE: f64 = super::FADE_LONGER_SCALE;
    pub const FADE_LONGER_DRIFT: f64 = super::FADE_LONGER_DRIFT;
    pub const FLOAT_MIN_DURATION_MS: u64 = super::FLOAT_MIN_DURATION_MS;
    pub const FLOAT_LOG_FACTOR: f64 = super::FLOAT_LOG_FACTOR;
    pub const SMALL_SCREEN_MAX_WIDTH: f64 = super::SMALL_SCREEN_MAX_WIDTH;
}

/// Overlay, controls and pagination
pub mod presentation {
    pub const OVERLAY_OPACITY: f64 = super::OVERLAY_OPACITY;
    pub const OVERLAY_OPACITY_FOR_FLOAT: f64 = super::OVERLAY_OPACITY_FOR_FLOAT;
    pub const SHOW_MORE_CONTROLS_MIN_WIDTH: f64 = super::SHOW_MORE_CONTROLS_MIN_WIDTH;
    pub const PAGINATION_MAX_DOTS: usize = super::PAGINATION_MAX_DOTS;
}

/// Slide margins
pub mod margins {
    pub const RATIO: f64 = super::MARGIN_RATIO;
    pub const MIN: f64 = super::MARGIN_MIN;
}
