// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Nothing here is allowed to cross the event-handler boundary as a panic.
//! Handlers log usage errors and keep the last good state; only the
//! explicit query/command methods hand a `Result` back to the host.

use thiserror::Error;

/// Errors reported by the slideshow engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SlideshowError {
    /// The engine was constructed without any slides
    #[error("slideshow needs at least one slide")]
    NoSlides,

    /// Props failed validation
    #[error("invalid slideshow props: {0}")]
    InvalidProps(String),

    /// A slide index outside `0..len`
    #[error("slide index {index} is out of range (0..{len})")]
    SlideOutOfRange { index: usize, len: usize },

    /// No registered viewer accepted the slide
    #[error("no viewer can render slide {0}")]
    NoViewer(usize),

    /// A custom scale origin was set while another one is active
    #[error("scale origin is already set")]
    ScaleOriginAlreadySet,

    /// Pan & zoom mode was entered while already active
    #[error("pan and zoom mode is already active")]
    PanAndZoomModeAlreadyActive,

    /// Pan & zoom mode was exited while not active
    #[error("pan and zoom mode is not active")]
    PanAndZoomModeNotActive,

    /// The engine has been cleaned up
    #[error("slideshow has been cleaned up")]
    NotMounted,

    /// An image failed to load
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Video playback failed for a reason other than an interrupted request
    #[error("playback failed: {0}")]
    Playback(String),

    /// The surface refused to toggle fullscreen
    #[error("fullscreen request failed: {0}")]
    Fullscreen(String),
}

/// An image preload failure, kept per slide so the view layer can offer a
/// retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load slide {index}: {reason}")]
pub struct LoadError {
    pub index: usize,
    pub reason: String,
}

/// Outcome of a `play()`/`pause()` request on a video element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The request was interrupted by a newer play/pause call. Expected.
    #[error("playback request aborted")]
    Aborted,
    /// Anything else.
    #[error("{0}")]
    Failed(String),
}

/// Configuration parse and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid slideshow config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type Result<T, E = SlideshowError> = std::result::Result<T, E>;
