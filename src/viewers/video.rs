// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Built-in video viewer

use super::{SlideView, Viewer, ViewerProps};
use crate::input::{Key, KeyInput};
use crate::model::Slide;
use kurbo::Size;

#[derive(Debug, Clone, Copy, Default)]
pub struct VideoViewer;

impl Viewer for VideoViewer {
    fn name(&self) -> &'static str {
        "video"
    }

    fn can_render(&self, slide: &Slide) -> bool {
        matches!(slide, Slide::Video(_))
    }

    fn max_size(&self, slide: &Slide) -> Size {
        slide.size()
    }

    fn render(&self, props: &ViewerProps<'_>) -> SlideView {
        let poster = match props.slide {
            Slide::Video(video) => video.poster.as_ref().map(|p| p.url.clone()),
            Slide::Picture(_) => None,
        };
        SlideView::Video {
            url: props.slide.url().to_string(),
            size: props.size,
            poster,
            autoplay: props.is_current,
            hidden: props.hidden,
        }
    }

    // Space is play/pause
    fn should_ignore_key_down(&self, _slide: &Slide, key: &KeyInput) -> bool {
        key.key == Key::Space && !key.modifiers.any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use crate::model::Video;

    #[test]
    fn space_is_reserved_for_playback() {
        let slide = Slide::from(Video::new("clip.mp4", 640.0, 360.0));
        let space = KeyInput::new(Key::Space);
        let shift_space = KeyInput::new(Key::Space).with_modifiers(Modifiers {
            shift: true,
            ..Modifiers::default()
        });
        assert!(VideoViewer.should_ignore_key_down(&slide, &space));
        assert!(!VideoViewer.should_ignore_key_down(&slide, &shift_space));
        assert!(!VideoViewer.should_ignore_key_down(&slide, &KeyInput::new(Key::ArrowRight)));
    }
}
