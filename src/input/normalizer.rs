// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer/touch normalizer.
//!
//! Touch input arrives twice on most platforms (as touch events and as
//! emulated pointer events). Only the touch stream is used for fingers;
//! pointer events with `PointerKind::Touch` are dropped.

use super::{InputEvent, MouseButton, PlatformEvent, PointerKind, TouchPoint};
use kurbo::Point;

#[derive(Debug, Default)]
pub struct Normalizer {
    /// Pointer id of the pressed mouse/pen, if any
    pressed_pointer: Option<u64>,
    /// Fingers currently down, in arrival order
    touches: Vec<TouchPoint>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.pressed_pointer = None;
        self.touches.clear();
    }

    /// Translate one platform event; `None` when the event carries nothing
    /// the engine cares about.
    pub fn normalize(&mut self, event: PlatformEvent) -> Option<InputEvent> {
        match event {
            PlatformEvent::PointerDown {
                id,
                kind,
                button,
                position,
                at,
            } => {
                if kind == PointerKind::Touch || button != MouseButton::Primary {
                    return None;
                }
                self.pressed_pointer = Some(id);
                Some(InputEvent::PointerDown { position, at })
            }
            PlatformEvent::PointerMove {
                id,
                kind,
                position,
                at,
            } => {
                if kind == PointerKind::Touch {
                    return None;
                }
                // Hover moves are still reported so wheel zoom and touch
                // emulation know where the cursor is
                if self.pressed_pointer.is_some_and(|pressed| pressed != id) {
                    return None;
                }
                Some(InputEvent::PointerMove { position, at })
            }
            PlatformEvent::PointerUp {
                id,
                kind,
                position,
                at,
            } => {
                if kind == PointerKind::Touch || self.pressed_pointer != Some(id) {
                    return None;
                }
                self.pressed_pointer = None;
                Some(InputEvent::PointerUp { position, at })
            }
            PlatformEvent::PointerCancel { id, kind, at } => {
                if kind == PointerKind::Touch || self.pressed_pointer != Some(id) {
                    return None;
                }
                self.pressed_pointer = None;
                Some(InputEvent::Cancel { at })
            }
            PlatformEvent::TouchStart { touches, at } => {
                let before = self.touches.len();
                self.sync_touches(&touches);
                match (before, self.touches.len()) {
                    (0, 1) => Some(InputEvent::OneTouch {
                        position: self.touches[0].position,
                        at,
                    }),
                    (b, n) if b < 2 && n >= 2 => Some(InputEvent::TwoTouches {
                        first: self.touches[0].position,
                        second: self.touches[1].position,
                        at,
                    }),
                    _ => None,
                }
            }
            PlatformEvent::TouchMove { touches, at } => {
                self.sync_touches(&touches);
                let first = self.touches.first()?.position;
                let second = self.touches.get(1).map(|t| t.position);
                Some(InputEvent::TouchMove { first, second, at })
            }
            PlatformEvent::TouchEnd { touches, at } => {
                if self.touches.is_empty() {
                    return None;
                }
                let lifted = self
                    .touches
                    .iter()
                    .rev()
                    .find(|t| !touches.iter().any(|remaining| remaining.id == t.id))
                    .map(|t| t.position)
                    .unwrap_or(Point::ORIGIN);
                self.sync_touches(&touches);
                Some(InputEvent::TouchEnd {
                    remaining: self.touches.len(),
                    position: lifted,
                    at,
                })
            }
            PlatformEvent::TouchCancel { at } => {
                if self.touches.is_empty() {
                    return None;
                }
                self.touches.clear();
                Some(InputEvent::Cancel { at })
            }
            PlatformEvent::Wheel {
                position,
                delta,
                ctrl,
                at,
            } => Some(InputEvent::Wheel {
                position,
                delta,
                zoom: ctrl,
                at,
            }),
            PlatformEvent::KeyDown { key, at } => Some(InputEvent::KeyDown { key, at }),
            PlatformEvent::Resize { viewport, at } => Some(InputEvent::Resize { viewport, at }),
        }
    }

    /// Keep arrival order for known touches, append new ones, drop lifted
    fn sync_touches(&mut self, current: &[TouchPoint]) {
        self.touches
            .retain(|known| current.iter().any(|touch| touch.id == known.id));
        for known in &mut self.touches {
            if let Some(touch) = current.iter().find(|touch| touch.id == known.id) {
                known.position = touch.position;
            }
        }
        for touch in current {
            if !self.touches.iter().any(|known| known.id == touch.id) {
                self.touches.push(*touch);
            }
        }
    }
}
