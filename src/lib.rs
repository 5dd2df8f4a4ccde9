// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Slideshow: a headless lightbox interaction engine.
//!
//! The engine owns the gesture and lifecycle state of an image/video
//! viewer (swipe, drag-to-close, pinch and wheel zoom, pan & zoom mode,
//! open/close transitions) and drives a host-provided `Surface`. The host
//! feeds raw `PlatformEvent`s and a clock via `Slideshow::tick`.

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod settings;
pub mod surface;
pub mod transitions;
pub mod viewers;

#[cfg(test)]
mod test_support;

pub use config::{SlideshowCallbacks, SlideshowProps};
pub use engine::{
    CloseInteraction, EventKind, ListenerId, LoadStatus, OpenCoordinator, Slideshow,
    SlideshowBuilder, SlideshowEvent,
};
pub use error::{Result, SlideshowError};
pub use input::PlatformEvent;
pub use model::{Picture, Slide, SlideshowState, Video};
pub use surface::Surface;

/// Install a fmt subscriber for the crate's logs (controlled via RUST_LOG).
///
/// Does nothing if the host already installed a global subscriber.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("slideshow=info"));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("[Slideshow] tracing subscriber already installed");
    }
}
