// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Slides: the pictures and videos a slideshow pages through.
//!
//! Slides are owned by the caller and never mutated by the engine. A slide's
//! identity is its index in the gallery.

use kurbo::Size;

/// A thumbnail the slide was opened from (used by the float animation and
/// the thumbnail-relative minimum scale)
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub url: String,
    pub size: Size,
}

/// A still image
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub url: String,
    /// Intrinsic pixel size
    pub size: Size,
    pub thumbnail: Option<Thumbnail>,
    /// Picture has an alpha channel and should not get a dark backdrop
    pub transparent: bool,
}

impl Picture {
    pub fn new(url: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            url: url.into(),
            size: Size::new(width, height),
            thumbnail: None,
            transparent: false,
        }
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>, width: f64, height: f64) -> Self {
        self.thumbnail = Some(Thumbnail {
            url: url.into(),
            size: Size::new(width, height),
        });
        self
    }
}

/// A video clip
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub url: String,
    /// Intrinsic pixel size
    pub size: Size,
    pub poster: Option<Thumbnail>,
}

impl Video {
    pub fn new(url: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            url: url.into(),
            size: Size::new(width, height),
            poster: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideKind {
    Picture,
    Video,
}

/// One navigable item in the viewer
#[derive(Debug, Clone, PartialEq)]
pub enum Slide {
    Picture(Picture),
    Video(Video),
}

impl Slide {
    pub fn kind(&self) -> SlideKind {
        match self {
            Slide::Picture(_) => SlideKind::Picture,
            Slide::Video(_) => SlideKind::Video,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Slide::Picture(picture) => &picture.url,
            Slide::Video(video) => &video.url,
        }
    }

    /// Intrinsic size; degenerate sizes are bumped to 1px so aspect
    /// ratios and fit scales stay finite.
    pub fn size(&self) -> Size {
        let size = match self {
            Slide::Picture(picture) => picture.size,
            Slide::Video(video) => video.size,
        };
        Size::new(size.width.max(1.0), size.height.max(1.0))
    }

    pub fn thumbnail(&self) -> Option<&Thumbnail> {
        match self {
            Slide::Picture(picture) => picture.thumbnail.as_ref(),
            Slide::Video(video) => video.poster.as_ref(),
        }
    }
}

impl From<Picture> for Slide {
    fn from(picture: Picture) -> Self {
        Slide::Picture(picture)
    }
}

impl From<Video> for Slide {
    fn from(video: Video) -> Self {
        Slide::Video(video)
    }
}
