// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Built-in picture viewer

use super::{SlideView, Viewer, ViewerAction, ViewerProps};
use crate::model::Slide;
use kurbo::Size;

#[derive(Debug, Clone, Copy, Default)]
pub struct PictureViewer;

impl Viewer for PictureViewer {
    fn name(&self) -> &'static str {
        "picture"
    }

    fn can_render(&self, slide: &Slide) -> bool {
        matches!(slide, Slide::Picture(_))
    }

    fn max_size(&self, slide: &Slide) -> Size {
        slide.size()
    }

    fn render(&self, props: &ViewerProps<'_>) -> SlideView {
        SlideView::Image {
            url: props.slide.url().to_string(),
            size: props.size,
            hidden: props.hidden,
        }
    }

    fn can_open_external_link(&self, _slide: &Slide) -> bool {
        true
    }

    fn external_link(&self, slide: &Slide) -> Option<String> {
        Some(slide.url().to_string())
    }

    fn other_actions(&self, _slide: &Slide) -> Vec<ViewerAction> {
        vec![ViewerAction {
            id: "download",
            label: "Download".to_string(),
        }]
    }

    fn is_transparent_background(&self, slide: &Slide) -> bool {
        matches!(slide, Slide::Picture(picture) if picture.transparent)
    }
}
