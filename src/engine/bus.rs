// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Typed event bus for host listeners.
//!
//! Events are a closed enum, listeners subscribe by `EventKind`. Immediate
//! listeners run before normal ones; within a group, registration order
//! holds. A `once` listener is unregistered before it runs, and listeners
//! registered while an event is being dispatched only see later events.

use crate::config::AnimationKind;
use kurbo::{Size, Vec2};
use std::time::Duration;

/// How a close was requested
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CloseInteraction {
    /// Close button or host call
    Button,
    Keyboard,
    /// Click on the backdrop
    Overlay,
    /// Vertical drag past the threshold; carries the release offset
    Pan { offset: Vec2 },
    /// Stepped past the first/last slide
    GalleryEnd,
    /// Back navigation or other programmatic request
    Programmatic,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlideshowEvent {
    Init,
    StateChange { previous_i: usize, i: usize },
    Open { animation: AnimationKind },
    Opened,
    Close { interaction: CloseInteraction },
    Closed,
    SlideChange { from: usize, to: usize },
    DragStart,
    DragEnd,
    ScaleChange { scale: f64 },
    PanAndZoomModeChange { enabled: bool },
    FullscreenChange { fullscreen: bool },
    Resize { viewport: Size },
    LoadFailed { index: usize, reason: String },
    CleanUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Init,
    StateChange,
    Open,
    Opened,
    Close,
    Closed,
    SlideChange,
    DragStart,
    DragEnd,
    ScaleChange,
    PanAndZoomModeChange,
    FullscreenChange,
    Resize,
    LoadFailed,
    CleanUp,
}

impl SlideshowEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SlideshowEvent::Init => EventKind::Init,
            SlideshowEvent::StateChange { .. } => EventKind::StateChange,
            SlideshowEvent::Open { .. } => EventKind::Open,
            SlideshowEvent::Opened => EventKind::Opened,
            SlideshowEvent::Close { .. } => EventKind::Close,
            SlideshowEvent::Closed => EventKind::Closed,
            SlideshowEvent::SlideChange { .. } => EventKind::SlideChange,
            SlideshowEvent::DragStart => EventKind::DragStart,
            SlideshowEvent::DragEnd => EventKind::DragEnd,
            SlideshowEvent::ScaleChange { .. } => EventKind::ScaleChange,
            SlideshowEvent::PanAndZoomModeChange { .. } => EventKind::PanAndZoomModeChange,
            SlideshowEvent::FullscreenChange { .. } => EventKind::FullscreenChange,
            SlideshowEvent::Resize { .. } => EventKind::Resize,
            SlideshowEvent::LoadFailed { .. } => EventKind::LoadFailed,
            SlideshowEvent::CleanUp => EventKind::CleanUp,
        }
    }
}

/// Returned from `on`/`once`/`on_immediate`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A listener may answer with a duration hint; `Close` listeners use it to
/// report how long their close animation runs.
pub type Listener = Box<dyn FnMut(&SlideshowEvent) -> Option<Duration>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Once,
    Immediate,
}

struct Entry {
    id: ListenerId,
    kind: EventKind,
    mode: Mode,
    callback: Listener,
}

#[derive(Default)]
pub struct EventBus {
    entries: Vec<Entry>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, kind: EventKind, listener: Listener) -> ListenerId {
        self.add(kind, Mode::Normal, listener)
    }

    pub fn once(&mut self, kind: EventKind, listener: Listener) -> ListenerId {
        self.add(kind, Mode::Once, listener)
    }

    pub fn on_immediate(&mut self, kind: EventKind, listener: Listener) -> ListenerId {
        self.add(kind, Mode::Immediate, listener)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Dispatch an event; returns the longest duration hint
    pub fn emit(&mut self, event: &SlideshowEvent) -> Option<Duration> {
        let kind = event.kind();
        let immediate = self.ids_for(kind, |mode| mode == Mode::Immediate);
        let normal = self.ids_for(kind, |mode| mode != Mode::Immediate);

        let mut longest: Option<Duration> = None;
        for id in immediate.into_iter().chain(normal) {
            let Some(position) = self.entries.iter().position(|entry| entry.id == id) else {
                continue;
            };
            let hint = if self.entries[position].mode == Mode::Once {
                let mut entry = self.entries.remove(position);
                (entry.callback)(event)
            } else {
                (self.entries[position].callback)(event)
            };
            if let Some(hint) = hint {
                longest = Some(longest.map_or(hint, |current| current.max(hint)));
            }
        }
        longest
    }

    fn add(&mut self, kind: EventKind, mode: Mode, callback: Listener) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push(Entry {
            id,
            kind,
            mode,
            callback,
        });
        id
    }

    fn ids_for(&self, kind: EventKind, mode: impl Fn(Mode) -> bool) -> Vec<ListenerId> {
        self.entries
            .iter()
            .filter(|entry| entry.kind == kind && mode(entry.mode))
            .map(|entry| entry.id)
            .collect()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Listener) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let make = {
            let log = log.clone();
            move |name: &'static str| -> Listener {
                let log = log.clone();
                Box::new(move |_| {
                    log.borrow_mut().push(name);
                    None
                })
            }
        };
        (log, make)
    }

    #[test]
    fn listeners_fire_in_registration_order() {
        let (log, make) = recorder();
        let mut bus = EventBus::new();
        bus.on(EventKind::Init, make("a"));
        bus.on(EventKind::Init, make("b"));
        bus.on(EventKind::Closed, make("other"));

        bus.emit(&SlideshowEvent::Init);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn immediate_listeners_run_first() {
        let (log, make) = recorder();
        let mut bus = EventBus::new();
        bus.on(EventKind::StateChange, make("normal"));
        bus.on_immediate(EventKind::StateChange, make("immediate"));

        bus.emit(&SlideshowEvent::StateChange {
            previous_i: 0,
            i: 1,
        });
        assert_eq!(*log.borrow(), vec!["immediate", "normal"]);
    }

    #[test]
    fn once_fires_once() {
        let (log, make) = recorder();
        let mut bus = EventBus::new();
        bus.once(EventKind::Opened, make("once"));

        bus.emit(&SlideshowEvent::Opened);
        bus.emit(&SlideshowEvent::Opened);
        assert_eq!(*log.borrow(), vec!["once"]);
        assert_eq!(bus.listener_count(EventKind::Opened), 0);
    }

    #[test]
    fn off_unsubscribes() {
        let (log, make) = recorder();
        let mut bus = EventBus::new();
        let id = bus.on(EventKind::Init, make("a"));
        assert!(bus.off(id));
        assert!(!bus.off(id));
        bus.emit(&SlideshowEvent::Init);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn longest_duration_hint_wins() {
        let mut bus = EventBus::new();
        bus.on(
            EventKind::Close,
            Box::new(|_| Some(Duration::from_millis(100))),
        );
        bus.on(
            EventKind::Close,
            Box::new(|_| Some(Duration::from_millis(250))),
        );
        bus.on(EventKind::Close, Box::new(|_| None));

        let hint = bus.emit(&SlideshowEvent::Close {
            interaction: CloseInteraction::Button,
        });
        assert_eq!(hint, Some(Duration::from_millis(250)));
    }
}
