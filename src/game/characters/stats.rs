// Movement tuning for the player character
//
// All speeds and accelerations are in sub-pixel units (1px == 32) per tick.

/// Tuning values for walking, running and jumping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementStats {
    /// Horizontal speed walking settles at
    pub walk_upper_limit: i32,
    /// Horizontal speed cap while running
    pub dash_upper_limit: i32,
    /// Horizontal acceleration step
    pub speed: i32,
    /// Added to vertical speed every tick
    pub gravity: i32,
    /// Gravity stops accelerating past this fall speed
    pub max_gravity: i32,
    /// Second kick applied partway through a jump
    pub jumping_power: i32,
    /// Initial lift while the jump key is held
    pub big_jumping_power: i32,
    /// Ticks the jump key keeps adding lift
    pub big_jump_frames: i32,
    /// Jump frame on which `jumping_power` is applied
    pub jump_kick_frame: i32,
    /// Ticks on the ground before a landing finishes
    pub landing_frames: i32,
    /// How far the feet sink into the floor block, in pixels
    pub floor_sink: i32,
}

/// The scrolling field tuning
pub const STANDARD_MOVEMENT: MovementStats = MovementStats {
    walk_upper_limit: 96,
    dash_upper_limit: 192,
    speed: 6,
    gravity: 16,
    max_gravity: 320,
    jumping_power: 160,
    big_jumping_power: 220,
    big_jump_frames: 15,
    jump_kick_frame: 8,
    landing_frames: 5,
    floor_sink: 4,
};

/// The earlier flat-ground tuning: floatier jumps and a longer landing
pub const PROTOTYPE_MOVEMENT: MovementStats = MovementStats {
    jumping_power: 220,
    big_jumping_power: 280,
    landing_frames: 7,
    floor_sink: 0,
    ..STANDARD_MOVEMENT
};

impl Default for MovementStats {
    fn default() -> Self {
        STANDARD_MOVEMENT
    }
}

impl MovementStats {
    pub fn standard() -> Self {
        STANDARD_MOVEMENT
    }

    pub fn prototype() -> Self {
        PROTOTYPE_MOVEMENT
    }
}
