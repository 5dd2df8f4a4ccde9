// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Slideshow configuration.
//!
//! `SlideshowProps` is plain data: it can be built in code, deserialized
//! from TOML, or left at its defaults (see `settings.rs`). Host callbacks are
//! not data and live separately in `SlideshowCallbacks`.

use crate::error::ConfigError;
use crate::settings;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Open/close transition strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    /// Opacity transition (optionally with scale/drift)
    Fade,
    /// Thumbnail morphs into the slide
    Float,
}

/// Immutable engine configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlideshowProps {
    /// Slide shown when the viewer opens
    pub initial_slide_index: usize,
    /// Embedded in the page instead of a modal overlay
    pub inline: bool,
    /// Stepping past the first/last slide closes the viewer
    pub close_at_gallery_end: bool,
    /// Clicking outside the slide closes the viewer
    pub close_on_overlay_click: bool,
    /// Clicking the slide advances to the next one
    pub go_to_next_slide_on_click: bool,
    /// Allow zooming past the fit scale into pan & zoom mode
    pub enable_pan_and_zoom_mode: bool,
    pub drag: DragSettings,
    pub scale: ScaleSettings,
    pub pan_and_zoom: PanAndZoomSettings,
    pub animation: AnimationSettings,
    pub margins: MarginSettings,
    pub presentation: PresentationSettings,
}

impl Default for SlideshowProps {
    fn default() -> Self {
        Self {
            initial_slide_index: 0,
            inline: false,
            close_at_gallery_end: true,
            close_on_overlay_click: true,
            go_to_next_slide_on_click: true,
            enable_pan_and_zoom_mode: true,
            drag: DragSettings::default(),
            scale: ScaleSettings::default(),
            pan_and_zoom: PanAndZoomSettings::default(),
            animation: AnimationSettings::default(),
            margins: MarginSettings::default(),
            presentation: PresentationSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DragSettings {
    /// Pointer travel (px) before a drag starts
    pub offset_threshold: f64,
    /// Rubber-band at the first/last slide
    pub pan_resistance: bool,
    pub edge_resistance: f64,
    pub commit_ratio: f64,
    /// px/ms
    pub commit_speed: f64,
    pub speed_sample_interval_ms: u64,
    pub speed_stale_after_ms: u64,
    pub snap_min_duration_ms: u64,
    pub snap_max_duration_ms: u64,
    pub inertia_duration_factor: f64,
    pub inertia_travel_factor: f64,
}

impl Default for DragSettings {
    fn default() -> Self {
        use settings::drag::*;
        Self {
            offset_threshold: OFFSET_THRESHOLD,
            pan_resistance: true,
            edge_resistance: EDGE_RESISTANCE,
            commit_ratio: COMMIT_RATIO,
            commit_speed: COMMIT_SPEED,
            speed_sample_interval_ms: SPEED_SAMPLE_INTERVAL_MS,
            speed_stale_after_ms: SPEED_STALE_AFTER_MS,
            snap_min_duration_ms: SNAP_MIN_DURATION_MS,
            snap_max_duration_ms: SNAP_MAX_DURATION_MS,
            inertia_duration_factor: INERTIA_DURATION_FACTOR,
            inertia_travel_factor: INERTIA_TRAVEL_FACTOR,
        }
    }
}

impl DragSettings {
    pub fn speed_sample_interval(&self) -> Duration {
        Duration::from_millis(self.speed_sample_interval_ms)
    }

    pub fn speed_stale_after(&self) -> Duration {
        Duration::from_millis(self.speed_stale_after_ms)
    }

    /// Interpolate the snap duration by how far the user panned (0..=1)
    pub fn snap_duration(&self, ratio: f64) -> Duration {
        let min = self.snap_min_duration_ms as f64;
        let max = self.snap_max_duration_ms as f64;
        let ms = min + (max - min) * ratio.clamp(0.0, 1.0);
        Duration::from_millis(ms.round() as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaleSettings {
    pub step: f64,
    pub animation_duration_ms: u64,
    pub min_thumbnail_ratio: f64,
    pub min_scaled_slide_ratio: f64,
    pub toggle_epsilon: f64,
    pub wheel_gesture_timeout_ms: u64,
    pub wheel_step_factor: f64,
}

impl Default for ScaleSettings {
    fn default() -> Self {
        use settings::scale::*;
        Self {
            step: STEP,
            animation_duration_ms: ANIMATION_DURATION_MS,
            min_thumbnail_ratio: MIN_THUMBNAIL_RATIO,
            min_scaled_slide_ratio: MIN_SCALED_SLIDE_RATIO,
            toggle_epsilon: TOGGLE_EPSILON,
            wheel_gesture_timeout_ms: WHEEL_GESTURE_TIMEOUT_MS,
            wheel_step_factor: WHEEL_STEP_FACTOR,
        }
    }
}

impl ScaleSettings {
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    pub fn wheel_gesture_timeout(&self) -> Duration {
        Duration::from_millis(self.wheel_gesture_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanAndZoomSettings {
    /// Exiting above this scale skips the bounce
    pub bounce_skip_scale: f64,
    pub bounce_min_duration_ms: u64,
    pub bounce_max_duration_ms: u64,
    pub bounce_distance_factor: f64,
    pub bounce_size_factor: f64,
    pub bounce_overshoot: f64,
    /// Arrow-key pan distance (px)
    pub key_pan_step: f64,
}

impl Default for PanAndZoomSettings {
    fn default() -> Self {
        use settings::pan_and_zoom::*;
        Self {
            bounce_skip_scale: BOUNCE_SKIP_SCALE,
            bounce_min_duration_ms: BOUNCE_MIN_DURATION_MS,
            bounce_max_duration_ms: BOUNCE_MAX_DURATION_MS,
            bounce_distance_factor: BOUNCE_DISTANCE_FACTOR,
            bounce_size_factor: BOUNCE_SIZE_FACTOR,
            bounce_overshoot: BOUNCE_OVERSHOOT,
            key_pan_step: KEY_PAN_STEP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationSettings {
    pub open_close: AnimationKind,
    /// Overrides `open_close` on narrow viewports
    pub small_screen: Option<AnimationKind>,
    pub small_screen_max_width: f64,
    pub fade_duration_ms: u64,
    pub fade_longer_duration_ms: u64,
    pub fade_longer_scale: f64,
    pub fade_longer_drift: f64,
    pub float_min_duration_ms: u64,
    pub float_log_factor: f64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        use settings::animation::*;
        Self {
            open_close: AnimationKind::Fade,
            small_screen: None,
            small_screen_max_width: SMALL_SCREEN_MAX_WIDTH,
            fade_duration_ms: FADE_DURATION_MS,
            fade_longer_duration_ms: FADE_LONGER_DURATION_MS,
            fade_longer_scale: FADE_LONGER_SCALE,
            fade_longer_drift: FADE_LONGER_DRIFT,
            float_min_duration_ms: FLOAT_MIN_DURATION_MS,
            float_log_factor: FLOAT_LOG_FACTOR,
        }
    }
}

impl AnimationSettings {
    /// Transition kind for a viewport of the given width
    pub fn kind_for_width(&self, viewport_width: f64) -> AnimationKind {
        match self.small_screen {
            Some(kind) if viewport_width <= self.small_screen_max_width => kind,
            _ => self.open_close,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarginSettings {
    /// Margin as a fraction of the viewport extent
    pub ratio: f64,
    /// Absolute minimum margin (px)
    pub min: f64,
    /// Extra space reserved above the slide (px)
    pub header: f64,
    /// Extra space reserved below the slide (px)
    pub footer: f64,
}

impl Default for MarginSettings {
    fn default() -> Self {
        Self {
            ratio: settings::margins::RATIO,
            min: settings::margins::MIN,
            header: 0.0,
            footer: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PresentationSettings {
    pub overlay_opacity: f64,
    /// Used instead of `overlay_opacity` with the float animation
    pub overlay_opacity_for_float: f64,
    pub show_more_controls_min_width: f64,
    pub pagination_max_dots: usize,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        use settings::presentation::*;
        Self {
            overlay_opacity: OVERLAY_OPACITY,
            overlay_opacity_for_float: OVERLAY_OPACITY_FOR_FLOAT,
            show_more_controls_min_width: SHOW_MORE_CONTROLS_MIN_WIDTH,
            pagination_max_dots: PAGINATION_MAX_DOTS,
        }
    }
}

impl SlideshowProps {
    /// Parse and validate props from a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let props: Self = toml::from_str(source)?;
        props.validate()?;
        Ok(props)
    }

    /// Load props from a TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read slideshow config {}", path.display()))?;
        let props = Self::from_toml_str(&source)
            .with_context(|| format!("Failed to parse slideshow config {}", path.display()))?;
        tracing::info!("Loaded slideshow config from {}", path.display());
        Ok(props)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                })
            }
        }
        fn unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be within 0..=1, got {value}"),
                })
            }
        }

        if self.drag.offset_threshold.is_nan() || self.drag.offset_threshold < 0.0 {
            return Err(ConfigError::Invalid {
                field: "drag.offset_threshold",
                reason: "must not be negative".into(),
            });
        }
        positive("drag.commit_speed", self.drag.commit_speed)?;
        unit("drag.commit_ratio", self.drag.commit_ratio)?;
        if self.drag.snap_min_duration_ms > self.drag.snap_max_duration_ms {
            return Err(ConfigError::Invalid {
                field: "drag.snap_min_duration_ms",
                reason: "must not exceed drag.snap_max_duration_ms".into(),
            });
        }
        positive("scale.step", self.scale.step)?;
        positive("scale.min_thumbnail_ratio", self.scale.min_thumbnail_ratio)?;
        unit("scale.min_scaled_slide_ratio", self.scale.min_scaled_slide_ratio)?;
        positive("pan_and_zoom.bounce_skip_scale", self.pan_and_zoom.bounce_skip_scale)?;
        unit("margins.ratio", self.margins.ratio)?;
        unit("presentation.overlay_opacity", self.presentation.overlay_opacity)?;
        unit(
            "presentation.overlay_opacity_for_float",
            self.presentation.overlay_opacity_for_float,
        )?;
        Ok(())
    }
}

/// Host callbacks fired by the engine
#[derive(Default)]
pub struct SlideshowCallbacks {
    pub on_close: Option<Box<dyn FnMut()>>,
    pub on_scale_change: Option<Box<dyn FnMut(f64)>>,
    pub on_drag_start: Option<Box<dyn FnMut()>>,
    pub on_drag_end: Option<Box<dyn FnMut()>>,
    pub on_pan_and_zoom_mode_change: Option<Box<dyn FnMut(bool)>>,
}

impl std::fmt::Debug for SlideshowCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideshowCallbacks")
            .field("on_close", &self.on_close.is_some())
            .field("on_scale_change", &self.on_scale_change.is_some())
            .field("on_drag_start", &self.on_drag_start.is_some())
            .field("on_drag_end", &self.on_drag_end.is_some())
            .field(
                "on_pan_and_zoom_mode_change",
                &self.on_pan_and_zoom_mode_change.is_some(),
            )
            .finish()
    }
}
