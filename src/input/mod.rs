// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Raw platform input and the normalized events the engine works with.
//!
//! The host forwards whatever its windowing or DOM layer produces as
//! `PlatformEvent`s. `Normalizer` folds pointer, touch and wheel streams
//! into `InputEvent`s so the interaction modules never see device quirks.

mod normalizer;

pub use normalizer::Normalizer;

use kurbo::{Point, Size, Vec2};
use std::time::Duration;

/// Monotonic event time, measured from an arbitrary host epoch
pub type Timestamp = Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Character(char),
}

/// A key press with its modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
}

/// Events as the platform reports them
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    PointerDown {
        id: u64,
        kind: PointerKind,
        button: MouseButton,
        position: Point,
        at: Timestamp,
    },
    PointerMove {
        id: u64,
        kind: PointerKind,
        position: Point,
        at: Timestamp,
    },
    PointerUp {
        id: u64,
        kind: PointerKind,
        position: Point,
        at: Timestamp,
    },
    PointerCancel {
        id: u64,
        kind: PointerKind,
        at: Timestamp,
    },
    /// All touches currently on the surface
    TouchStart {
        touches: Vec<TouchPoint>,
        at: Timestamp,
    },
    TouchMove {
        touches: Vec<TouchPoint>,
        at: Timestamp,
    },
    /// Touches still on the surface after some were lifted
    TouchEnd {
        touches: Vec<TouchPoint>,
        at: Timestamp,
    },
    TouchCancel {
        at: Timestamp,
    },
    Wheel {
        position: Point,
        delta: Vec2,
        /// Ctrl held, or a trackpad pinch reported as wheel
        ctrl: bool,
        at: Timestamp,
    },
    KeyDown {
        key: KeyInput,
        at: Timestamp,
    },
    Resize {
        viewport: Size,
        at: Timestamp,
    },
}

impl PlatformEvent {
    pub fn timestamp(&self) -> Timestamp {
        match self {
            PlatformEvent::PointerDown { at, .. }
            | PlatformEvent::PointerMove { at, .. }
            | PlatformEvent::PointerUp { at, .. }
            | PlatformEvent::PointerCancel { at, .. }
            | PlatformEvent::TouchStart { at, .. }
            | PlatformEvent::TouchMove { at, .. }
            | PlatformEvent::TouchEnd { at, .. }
            | PlatformEvent::TouchCancel { at }
            | PlatformEvent::Wheel { at, .. }
            | PlatformEvent::KeyDown { at, .. }
            | PlatformEvent::Resize { at, .. } => *at,
        }
    }
}

/// Device-independent input
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse or pen press
    PointerDown { position: Point, at: Timestamp },
    PointerMove { position: Point, at: Timestamp },
    PointerUp { position: Point, at: Timestamp },
    /// A single finger went down
    OneTouch { position: Point, at: Timestamp },
    /// A second finger joined
    TwoTouches {
        first: Point,
        second: Point,
        at: Timestamp,
    },
    TouchMove {
        first: Point,
        second: Option<Point>,
        at: Timestamp,
    },
    /// Fingers were lifted; `position` is where the last lifted one was
    TouchEnd {
        remaining: usize,
        position: Point,
        at: Timestamp,
    },
    /// Gesture aborted by the platform
    Cancel { at: Timestamp },
    Wheel {
        position: Point,
        delta: Vec2,
        zoom: bool,
        at: Timestamp,
    },
    KeyDown { key: KeyInput, at: Timestamp },
    Resize { viewport: Size, at: Timestamp },
}
