// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Keyboard handling

use super::{CloseInteraction, Slideshow};
use crate::input::KeyInput;
use crate::interaction::KeyAction;
use crate::model::OpenClosePhase;

impl Slideshow {
    /// Handle a key press. Returns whether it was consumed; unconsumed keys
    /// should keep their default platform behavior.
    pub fn on_key_down(&mut self, key: KeyInput) -> bool {
        if !self.mounted || self.locked {
            return false;
        }
        if self.state.open_close_phase != OpenClosePhase::Open {
            return false;
        }
        let index = self.state.i;
        let vetoed = self
            .viewer_for(index)
            .is_some_and(|viewer| viewer.should_ignore_key_down(&self.slides[index], &key));
        if vetoed {
            tracing::trace!("[Slideshow] key {:?} left to the viewer", key.key);
            return false;
        }

        let actions: Vec<KeyAction> = self
            .keyboard
            .actions(&key, self.state.pan_and_zoom_mode)
            .collect();
        for action in actions {
            if self.perform_key_action(action) {
                tracing::debug!("[Slideshow] key {:?} -> {:?}", key.key, action);
                return true;
            }
        }
        false
    }

    fn perform_key_action(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Close => self.close(CloseInteraction::Keyboard),
            KeyAction::ExitPanAndZoom => self.exit_pan_and_zoom(None).is_ok(),
            KeyAction::Next => self.show_next(),
            KeyAction::Previous => self.show_previous(),
            KeyAction::First => self.show_first(),
            KeyAction::Last => self.show_last(),
            KeyAction::ScaleUp => self.scale_up(),
            KeyAction::ScaleDown => self.scale_down(),
            KeyAction::ToggleScale => self.toggle_scale(),
            KeyAction::ToggleFullscreen => self.toggle_fullscreen().is_ok(),
            KeyAction::ToggleTouchEmulation => {
                self.touch_emulation.toggle();
                true
            }
            KeyAction::Pan(direction) => {
                if !self.state.pan_and_zoom_mode {
                    return false;
                }
                let offset = self.drag.pan_offset() + direction * self.props.pan_and_zoom.key_pan_step;
                self.drag.stop_inertia();
                self.drag.set_pan_offset(offset);
                self.pan_and_zoom.mark_touched();
                self.render();
                true
            }
        }
    }
}
