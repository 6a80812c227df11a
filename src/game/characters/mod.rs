// Character system
//
// This module contains everything about the player character:
// - Shared character data and drawing
// - Movement tuning
// - Animation states and sprite frame selection
// - The controllable character itself

pub mod animation;
pub mod character;
pub mod own_character;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use own_character::OwnCharacter;
pub use stats::MovementStats;
