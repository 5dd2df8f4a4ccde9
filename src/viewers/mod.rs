// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Pluggable slide viewers.
//!
//! A viewer knows how to size and describe one kind of slide. Viewers are
//! tried in registration order and the first one whose `can_render` accepts
//! the slide wins, so more specific viewers should be registered first.

mod picture;
mod video;

pub use picture::PictureViewer;
pub use video::VideoViewer;

use crate::input::KeyInput;
use crate::model::{Slide, Thumbnail};
use kurbo::Size;

/// Everything a viewer needs to describe one mounted slide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerProps<'a> {
    pub slide: &'a Slide,
    pub index: usize,
    /// On-screen size at the committed scale
    pub size: Size,
    pub is_current: bool,
    pub pan_and_zoom_mode: bool,
    /// Hidden while a float clone stands in for it
    pub hidden: bool,
}

/// What the view layer should draw for a slide
#[derive(Debug, Clone, PartialEq)]
pub enum SlideView {
    Image {
        url: String,
        size: Size,
        hidden: bool,
    },
    Video {
        url: String,
        size: Size,
        poster: Option<String>,
        autoplay: bool,
        hidden: bool,
    },
}

/// An extra action a viewer offers for its slide (download, open original…)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerAction {
    pub id: &'static str,
    pub label: String,
}

/// Capability record for one slide type
pub trait Viewer {
    /// Short name for logs
    fn name(&self) -> &'static str;

    fn can_render(&self, slide: &Slide) -> bool;

    /// Largest size the slide may be shown at when scale is 1.0
    fn max_size(&self, slide: &Slide) -> Size;

    fn aspect_ratio(&self, slide: &Slide) -> f64 {
        let size = self.max_size(slide);
        size.width / size.height
    }

    fn render(&self, props: &ViewerProps<'_>) -> SlideView;

    fn thumbnail<'a>(&self, slide: &'a Slide) -> Option<&'a Thumbnail> {
        slide.thumbnail()
    }

    fn can_open_external_link(&self, _slide: &Slide) -> bool {
        false
    }

    fn external_link(&self, _slide: &Slide) -> Option<String> {
        None
    }

    fn other_actions(&self, _slide: &Slide) -> Vec<ViewerAction> {
        Vec::new()
    }

    /// Whether horizontal swipes may change the slide
    fn can_swipe(&self, _slide: &Slide) -> bool {
        true
    }

    /// Veto the engine's default handling of a key press
    fn should_ignore_key_down(&self, _slide: &Slide, _key: &KeyInput) -> bool {
        false
    }

    fn is_transparent_background(&self, _slide: &Slide) -> bool {
        false
    }
}

/// Ordered list of viewers
pub struct ViewerRegistry {
    viewers: Vec<Box<dyn Viewer>>,
}

impl ViewerRegistry {
    pub fn new() -> Self {
        Self {
            viewers: Vec::new(),
        }
    }

    /// Registry with the built-in video and picture viewers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(VideoViewer));
        registry.register(Box::new(PictureViewer));
        registry
    }

    pub fn register(&mut self, viewer: Box<dyn Viewer>) {
        tracing::debug!("[ViewerRegistry] registered viewer '{}'", viewer.name());
        self.viewers.push(viewer);
    }

    /// First viewer that accepts the slide
    pub fn find(&self, slide: &Slide) -> Option<&dyn Viewer> {
        self.viewers
            .iter()
            .find(|viewer| viewer.can_render(slide))
            .map(|viewer| viewer.as_ref())
    }

    pub fn len(&self) -> usize {
        self.viewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewers.is_empty()
    }
}

impl Default for ViewerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for ViewerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.viewers.iter().map(|viewer| viewer.name()))
            .finish()
    }
}
