// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Viewport size and fullscreen

use super::{Slideshow, SlideshowEvent};
use crate::error::{Result, SlideshowError};
use kurbo::Size;

impl Slideshow {
    /// The viewport changed size: re-measure, re-clamp, re-render
    pub fn on_resize(&mut self, viewport: Size) {
        if !self.mounted {
            return;
        }
        if viewport == self.state.viewport {
            return;
        }
        tracing::debug!(
            "[Slideshow] resize {}x{}",
            viewport.width,
            viewport.height
        );
        let show_more_controls =
            viewport.width >= self.props.presentation.show_more_controls_min_width;
        // Committing re-clamps the scale against the new limits
        let previous_scale = self.state.scale;
        self.update_state(|state| {
            state.viewport = viewport;
            state.show_more_controls = show_more_controls;
        });
        if self.state.scale != previous_scale {
            self.notify_scale_change();
        }
        self.bus.emit(&SlideshowEvent::Resize { viewport });
    }

    /// Returns the new fullscreen state
    pub fn toggle_fullscreen(&mut self) -> Result<bool> {
        if !self.mounted {
            return Err(SlideshowError::NotMounted);
        }
        let fullscreen = !self.state.fullscreen;
        self.surface.set_fullscreen(fullscreen).map_err(|reason| {
            tracing::warn!("[Slideshow] fullscreen request failed: {}", reason);
            SlideshowError::Fullscreen(reason)
        })?;
        self.update_state(|state| state.fullscreen = fullscreen);
        self.bus
            .emit(&SlideshowEvent::FullscreenChange { fullscreen });
        Ok(fullscreen)
    }
}
