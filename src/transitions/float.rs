// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

use super::{PendingTransition, Transition, TransitionContext};
use crate::config::{AnimationKind, AnimationSettings};
use crate::engine::CloseInteraction;
use crate::surface::{FloatElement, Surface, SurfaceTarget};
use kurbo::Rect;
use std::time::Duration;

/// Maps the pixel size difference between thumbnail and slide to a duration
pub type FloatTiming = fn(f64, &AnimationSettings) -> Duration;

/// `max(floor, ln(1 + delta) * factor)` milliseconds
pub fn log_duration(pixel_delta: f64, settings: &AnimationSettings) -> Duration {
    let ms = ((1.0 + pixel_delta.max(0.0)).ln() * settings.float_log_factor)
        .max(settings.float_min_duration_ms as f64);
    Duration::from_millis(ms.round() as u64)
}

/// The thumbnail morphs into the slide.
///
/// Two clones are spawned over the thumbnail: the thumbnail image itself
/// and the full-size image. Both travel to the slide rect while the
/// thumbnail fades out and the full image fades in. The real slide stays
/// hidden until the clones are removed. Closing runs the same in reverse.
#[derive(Debug, Clone, Copy)]
pub struct FloatTransition {
    timing: FloatTiming,
}

impl Default for FloatTransition {
    fn default() -> Self {
        Self {
            timing: log_duration,
        }
    }
}

impl FloatTransition {
    pub fn with_timing(timing: FloatTiming) -> Self {
        Self { timing }
    }

    fn duration(&self, from: Rect, to: Rect, settings: &AnimationSettings) -> Duration {
        let delta = (from.width() - to.width())
            .abs()
            .max((from.height() - to.height()).abs());
        (self.timing)(delta, settings)
    }

    /// Spawn both clones at `from` and send them to `to`. `to_full` is the
    /// full image's final opacity.
    fn run(
        &self,
        surface: &mut dyn Surface,
        ctx: &TransitionContext<'_>,
        from: Rect,
        to: Rect,
        to_full: f64,
        overlay_to: f64,
    ) -> PendingTransition {
        let duration = self.duration(from, to, ctx.settings);
        let thumb_url = ctx
            .slide
            .thumbnail()
            .map(|thumb| thumb.url.clone())
            .unwrap_or_else(|| ctx.slide.url().to_string());

        let thumb = surface.spawn_float(FloatElement {
            url: thumb_url,
            rect: from,
            opacity: to_full,
        });
        let full = surface.spawn_float(FloatElement {
            url: ctx.slide.url().to_string(),
            rect: from,
            opacity: 1.0 - to_full,
        });
        surface.animate_float(thumb, to, 1.0 - to_full, duration);
        surface.animate_float(full, to, to_full, duration);
        surface.set_opacity(SurfaceTarget::Overlay, overlay_to, Some(duration));

        tracing::debug!(
            "[FloatTransition] {:?} -> {:?} over {:?}",
            from,
            to,
            duration
        );

        let mut pending = PendingTransition::new(AnimationKind::Float, duration);
        pending.hides_slide = true;
        pending.floats = vec![thumb, full];
        pending
    }
}

impl Transition for FloatTransition {
    fn kind(&self) -> AnimationKind {
        AnimationKind::Float
    }

    fn open(
        &self,
        surface: &mut dyn Surface,
        ctx: &TransitionContext<'_>,
    ) -> Option<PendingTransition> {
        let thumb_rect = ctx.thumbnail_rect?;
        surface.set_opacity(SurfaceTarget::Overlay, 0.0, None);
        let mut pending = self.run(
            surface,
            ctx,
            thumb_rect,
            ctx.slide_rect,
            1.0,
            ctx.overlay_opacity,
        );
        pending.restore_opacity = vec![(SurfaceTarget::Overlay, ctx.overlay_opacity)];
        Some(pending)
    }

    fn close(
        &self,
        surface: &mut dyn Surface,
        ctx: &TransitionContext<'_>,
        _interaction: CloseInteraction,
    ) -> Option<PendingTransition> {
        let thumb_rect = ctx.thumbnail_rect?;
        let mut pending = self.run(surface, ctx, ctx.slide_rect, thumb_rect, 0.0, 0.0);
        pending.restore_opacity = vec![(SurfaceTarget::Overlay, ctx.overlay_opacity)];
        Some(pending)
    }
}
