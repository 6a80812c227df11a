// Input manager - tracks held and freshly pressed actions

use super::action::{Action, InputSource};
use super::config::InputConfig;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Snapshot of the movement keys the character reads each tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub dash: bool,
    pub jump: bool,
}

/// Keyboard state for the single local player
pub struct InputManager {
    config: InputConfig,

    /// Actions currently held
    pressed: HashSet<Action>,

    /// Actions pressed since the last `update`
    just_pressed: HashSet<Action>,
}

impl InputManager {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_source(InputSource::key(key_code), event.state, event.repeat);
        }
    }

    fn process_source(&mut self, source: InputSource, state: ElementState, repeat: bool) {
        let Some(action) = self.config.get_action(source) else {
            return;
        };
        match state {
            ElementState::Pressed => {
                if !repeat {
                    self.press(action);
                }
            }
            ElementState::Released => self.release(action),
        }
    }

    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    pub fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Clear edge state once the current key event has been handled
    pub fn update(&mut self) {
        self.just_pressed.clear();
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Release everything, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
    }

    /// Movement flags for the current tick
    pub fn controls(&self) -> Controls {
        Controls {
            left: self.is_pressed(Action::MoveLeft),
            right: self.is_pressed(Action::MoveRight),
            dash: self.is_pressed(Action::Dash),
            jump: self.is_pressed(Action::Jump),
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(InputConfig::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    fn key(manager: &mut InputManager, code: KeyCode, state: ElementState) {
        manager.process_source(InputSource::key(code), state, false);
    }

    #[test]
    fn test_key_press_and_release() {
        let mut manager = InputManager::default();
        key(&mut manager, KeyCode::ArrowRight, ElementState::Pressed);
        assert!(manager.is_pressed(Action::MoveRight));
        key(&mut manager, KeyCode::ArrowRight, ElementState::Released);
        assert!(!manager.is_pressed(Action::MoveRight));
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut manager = InputManager::default();
        key(&mut manager, KeyCode::KeyZ, ElementState::Pressed);
        assert_eq!(manager.controls(), Controls::default());
    }

    #[test]
    fn test_repeat_does_not_retrigger() {
        let mut manager = InputManager::default();
        key(&mut manager, KeyCode::KeyP, ElementState::Pressed);
        manager.update();
        manager.process_source(
            InputSource::key(KeyCode::KeyP),
            ElementState::Pressed,
            true,
        );
        assert!(manager.is_pressed(Action::Pause));
        assert!(!manager.just_pressed(Action::Pause));
    }

    #[test]
    fn test_update_clears_just_pressed() {
        let mut manager = InputManager::default();
        manager.press(Action::Jump);
        assert!(manager.just_pressed(Action::Jump));
        manager.update();
        assert!(!manager.just_pressed(Action::Jump));
        assert!(manager.is_pressed(Action::Jump));
    }

    #[test]
    fn test_controls_snapshot() {
        let mut manager = InputManager::default();
        key(&mut manager, KeyCode::KeyA, ElementState::Pressed);
        key(&mut manager, KeyCode::ShiftLeft, ElementState::Pressed);
        key(&mut manager, KeyCode::Space, ElementState::Pressed);
        assert_eq!(
            manager.controls(),
            Controls {
                left: true,
                right: false,
                dash: true,
                jump: true,
            }
        );
    }

    #[test]
    fn test_reset() {
        let mut manager = InputManager::default();
        manager.press(Action::MoveLeft);
        manager.reset();
        assert!(!manager.is_pressed(Action::MoveLeft));
        assert!(!manager.just_pressed(Action::MoveLeft));
    }
}
