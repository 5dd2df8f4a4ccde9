// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Image loading and video playback results

use super::{Slideshow, SlideshowEvent};
use crate::error::{LoadError, PlaybackError, Result, SlideshowError};
use crate::model::SlideKind;

/// Per-slide image load progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    NotStarted,
    Loading,
    Loaded,
    Failed(LoadError),
}

impl Slideshow {
    pub fn load_status(&self, index: usize) -> Option<&LoadStatus> {
        self.load_status.get(index)
    }

    /// Start loading pictures that just got mounted
    pub(super) fn request_loads(&mut self) {
        for index in 0..self.slides.len() {
            let wanted = self.state.is_slide_shown(index)
                && self.slides[index].kind() == SlideKind::Picture
                && self.load_status[index] == LoadStatus::NotStarted;
            if wanted {
                self.load_status[index] = LoadStatus::Loading;
                self.surface.load_image(index, self.slides[index].url());
            }
        }
    }

    /// The host reports how a load started by `Surface::load_image` ended
    pub fn on_image_load(&mut self, index: usize, result: std::result::Result<(), String>) {
        if !self.mounted || index >= self.slides.len() {
            return;
        }
        match result {
            Ok(()) => {
                tracing::trace!("[Slideshow] slide {} loaded", index);
                self.load_status[index] = LoadStatus::Loaded;
            }
            Err(reason) => {
                tracing::warn!("[Slideshow] slide {} failed to load: {}", index, reason);
                self.load_status[index] = LoadStatus::Failed(LoadError {
                    index,
                    reason: reason.clone(),
                });
                self.bus
                    .emit(&SlideshowEvent::LoadFailed { index, reason });
            }
        }
        self.render();
    }

    /// Load a failed slide again
    pub fn retry_load(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        if !self.mounted {
            return Err(SlideshowError::NotMounted);
        }
        if let LoadStatus::Failed(err) = &self.load_status[index] {
            tracing::info!("[Slideshow] retrying slide {} ({})", index, err.reason);
        } else {
            return Ok(());
        }
        self.load_status[index] = LoadStatus::Loading;
        self.surface.load_image(index, self.slides[index].url());
        Ok(())
    }

    /// Outcome of a play/pause request on a video slide. Interrupted
    /// requests are expected and swallowed; anything else is reported.
    pub fn on_play_result(&mut self, index: usize, result: std::result::Result<(), PlaybackError>) -> Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(PlaybackError::Aborted) => {
                tracing::trace!("[Slideshow] playback request for slide {} aborted", index);
                Ok(())
            }
            Err(PlaybackError::Failed(reason)) => {
                tracing::warn!("[Slideshow] playback failed on slide {}: {}", index, reason);
                Err(SlideshowError::Playback(reason))
            }
        }
    }
}
