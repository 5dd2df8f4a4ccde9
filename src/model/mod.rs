// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Slides and committed engine state

pub mod slide;
pub mod state;

pub use slide::{Picture, Slide, SlideKind, Thumbnail, Video};
pub use state::{CustomOffset, OpenClosePhase, PaginationStyle, SlideshowState};
