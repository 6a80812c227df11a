// Input handling system
//
// - `action`: game actions and the fixed key layout
// - `config`: binding table lookups
// - `manager`: held/just-pressed state and the per-tick `Controls` snapshot
//
// ```rust
// let mut input = InputManager::default();
// input.process_keyboard_event(&key_event);
// stage.update(input.controls());
// input.update();
// ```

pub mod action;
pub mod config;
pub mod manager;

pub use action::Action;
pub use manager::{Controls, InputManager};
