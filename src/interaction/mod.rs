// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Interaction modules.
//!
//! Each module is a small state machine fed by the engine. Modules never
//! reach into each other; the engine passes what one module needs from
//! another as a read-only snapshot (`DragView`, `ScaleView`).

pub mod drag;
pub mod keyboard;
pub mod pan_and_zoom;
pub mod pinch_zoom;
pub mod scale;

pub use drag::{Axis, Drag, DragContext, DragMode, DragUpdate, DragView, XyOutcome};
pub use keyboard::{BindingScope, KeyAction, KeyBinding, Keyboard};
pub use pan_and_zoom::{Bounce, ExitPlan, PanAndZoom};
pub use pinch_zoom::{PinchUpdate, PinchZoom, TouchEmulation};
pub use scale::{Scale, ScaleLimits, ScaleView};
