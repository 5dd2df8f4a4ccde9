// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

use super::{PendingTransition, Transition, TransitionContext};
use crate::config::AnimationKind;
use crate::engine::CloseInteraction;
use crate::layout::SlideTransform;
use crate::surface::{Surface, SurfaceTarget};
use kurbo::Vec2;
use std::time::Duration;

/// Opacity transition of the backdrop and the current slide.
///
/// Closing after a vertical drag uses a longer variant that keeps the slide
/// drifting in the drag direction while it grows slightly and fades out.
#[derive(Debug, Clone, Copy, Default)]
pub struct FadeTransition;

impl Transition for FadeTransition {
    fn kind(&self) -> AnimationKind {
        AnimationKind::Fade
    }

    fn open(
        &self,
        surface: &mut dyn Surface,
        ctx: &TransitionContext<'_>,
    ) -> Option<PendingTransition> {
        let duration = Duration::from_millis(ctx.settings.fade_duration_ms);
        let slide = SurfaceTarget::Slide(ctx.index);

        surface.set_opacity(SurfaceTarget::Overlay, 0.0, None);
        surface.set_opacity(slide, 0.0, None);
        surface.set_opacity(SurfaceTarget::Overlay, ctx.overlay_opacity, Some(duration));
        surface.set_opacity(slide, 1.0, Some(duration));

        let mut pending = PendingTransition::new(AnimationKind::Fade, duration);
        pending.restore_opacity = vec![
            (SurfaceTarget::Overlay, ctx.overlay_opacity),
            (slide, 1.0),
        ];
        Some(pending)
    }

    fn close(
        &self,
        surface: &mut dyn Surface,
        ctx: &TransitionContext<'_>,
        interaction: CloseInteraction,
    ) -> Option<PendingTransition> {
        let settings = ctx.settings;
        let slide = SurfaceTarget::Slide(ctx.index);

        let mut pending = match interaction {
            CloseInteraction::Pan { offset } => {
                let duration = Duration::from_millis(settings.fade_longer_duration_ms);
                let direction = if offset.hypot() > 0.0 {
                    offset.normalize()
                } else {
                    Vec2::new(0.0, 1.0)
                };
                let transform = SlideTransform {
                    translate: ctx.slide_transform.translate
                        + offset
                        + direction * settings.fade_longer_drift,
                    scale: settings.fade_longer_scale,
                    opacity: 0.0,
                    ..ctx.slide_transform
                };
                surface.apply_transient_transform(slide, &transform, Some(duration));
                let mut pending = PendingTransition::new(AnimationKind::Fade, duration);
                pending.transforms.push(slide);
                pending
            }
            _ => {
                let duration = Duration::from_millis(settings.fade_duration_ms);
                surface.set_opacity(slide, 0.0, Some(duration));
                PendingTransition::new(AnimationKind::Fade, duration)
            }
        };
        surface.set_opacity(SurfaceTarget::Overlay, 0.0, Some(pending.duration));
        pending.restore_opacity = vec![
            (SurfaceTarget::Overlay, ctx.overlay_opacity),
            (slide, 1.0),
        ];
        Some(pending)
    }
}
