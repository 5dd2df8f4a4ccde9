// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Key bindings.
//!
//! Bindings are tried in order. A binding only applies in its scope; the
//! first binding whose action the engine actually performs consumes the key.
//! That is how Escape leaves pan & zoom mode first and closes the viewer
//! only outside of it.

use crate::input::{Key, KeyInput, Modifiers};
use kurbo::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Close,
    ExitPanAndZoom,
    Next,
    Previous,
    First,
    Last,
    ScaleUp,
    ScaleDown,
    ToggleScale,
    ToggleFullscreen,
    ToggleTouchEmulation,
    /// Pan by a multiple of the configured key pan step
    Pan(Vec2),
}

/// When a binding is live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingScope {
    Always,
    /// Only in pan & zoom mode
    PanAndZoom,
    /// Only outside pan & zoom mode
    Gallery,
}

impl BindingScope {
    fn applies(self, pan_and_zoom: bool) -> bool {
        match self {
            BindingScope::Always => true,
            BindingScope::PanAndZoom => pan_and_zoom,
            BindingScope::Gallery => !pan_and_zoom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyBinding {
    pub key: Key,
    pub modifiers: Modifiers,
    pub scope: BindingScope,
    pub action: KeyAction,
}

impl KeyBinding {
    pub fn new(key: Key, scope: BindingScope, action: KeyAction) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
            scope,
            action,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    fn matches(&self, input: &KeyInput) -> bool {
        if self.key != input.key {
            return false;
        }
        let wanted = self.modifiers;
        let got = input.modifiers;
        // Shift is part of the character on most layouts ('+' is Shift+'=')
        let shift_ok = wanted.shift == got.shift || matches!(self.key, Key::Character(_));
        shift_ok && wanted.ctrl == got.ctrl && wanted.alt == got.alt && wanted.meta == got.meta
    }
}

#[derive(Debug, Clone)]
pub struct Keyboard {
    bindings: Vec<KeyBinding>,
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Keyboard {
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn with_defaults() -> Self {
        use BindingScope::*;
        use KeyAction::*;

        let alt = Modifiers {
            alt: true,
            ..Modifiers::NONE
        };
        let mut keyboard = Self::empty();
        for binding in [
            KeyBinding::new(Key::Escape, PanAndZoom, ExitPanAndZoom),
            KeyBinding::new(Key::Escape, Always, Close),
            KeyBinding::new(Key::ArrowLeft, PanAndZoom, Pan(Vec2::new(1.0, 0.0))),
            KeyBinding::new(Key::ArrowRight, PanAndZoom, Pan(Vec2::new(-1.0, 0.0))),
            KeyBinding::new(Key::ArrowUp, PanAndZoom, Pan(Vec2::new(0.0, 1.0))),
            KeyBinding::new(Key::ArrowDown, PanAndZoom, Pan(Vec2::new(0.0, -1.0))),
            KeyBinding::new(Key::ArrowLeft, Gallery, Previous),
            KeyBinding::new(Key::ArrowRight, Gallery, Next),
            KeyBinding::new(Key::Space, Gallery, Next),
            KeyBinding::new(Key::PageUp, Always, Previous),
            KeyBinding::new(Key::PageDown, Always, Next),
            KeyBinding::new(Key::Home, Gallery, First),
            KeyBinding::new(Key::End, Gallery, Last),
            KeyBinding::new(Key::Character('+'), Always, ScaleUp),
            KeyBinding::new(Key::Character('='), Always, ScaleUp),
            KeyBinding::new(Key::Character('-'), Always, ScaleDown),
            KeyBinding::new(Key::Character('0'), Always, ToggleScale),
            KeyBinding::new(Key::Character('f'), Always, ToggleFullscreen),
            KeyBinding::new(Key::Character('z'), Always, ToggleTouchEmulation).with_modifiers(alt),
            KeyBinding::new(Key::Character('Z'), Always, ToggleTouchEmulation).with_modifiers(alt),
        ] {
            keyboard.bind(binding);
        }
        keyboard
    }

    /// Add a binding after the existing ones
    pub fn bind(&mut self, binding: KeyBinding) {
        self.bindings.push(binding);
    }

    /// Remove every binding for `key`
    pub fn unbind(&mut self, key: Key) {
        self.bindings.retain(|binding| binding.key != key);
    }

    /// Candidate actions for a key press, in priority order
    pub fn actions<'a>(
        &'a self,
        input: &'a KeyInput,
        pan_and_zoom: bool,
    ) -> impl Iterator<Item = KeyAction> + 'a {
        self.bindings
            .iter()
            .filter(move |binding| binding.scope.applies(pan_and_zoom) && binding.matches(input))
            .map(|binding| binding.action)
    }
}
