// Game layer: the stage, its field, the player and the backdrop

pub mod background;
pub mod characters;
pub mod field;
pub mod stage;

pub use stage::Stage;
