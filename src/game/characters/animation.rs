// Sprite frame selection
//
// The character sheet is 14 columns of 64px cells. Frames larger than one
// cell are drawn starting at their top-left cell.

use super::state::{Animation, Facing};

/// Cells in one row of the character sheet
pub const SHEET_COLUMNS: u32 = 14;
/// Edge length of one character sheet cell
pub const SHEET_CELL: u32 = 64;

/// Ticks each walk or run frame is held
const FRAME_HOLD: u32 = 8;
/// Frames in a walk or run cycle
const CYCLE_LENGTH: u32 = 6;

/// The sheet region drawn for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteFrame {
    pub index: u32,
    pub width: i32,
    pub height: i32,
}

impl SpriteFrame {
    const fn new(index: u32, width: i32, height: i32) -> Self {
        Self {
            index,
            width,
            height,
        }
    }

    fn mirrored(self, facing: Facing, left_offset: u32) -> Self {
        match facing {
            Facing::Right => self,
            Facing::Left => Self {
                index: self.index + left_offset,
                ..self
            },
        }
    }
}

/// Jump phase data the jumping frames depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JumpPhase {
    /// Ticks since takeoff, already advanced for this tick
    pub frame: i32,
    /// Ticks spent on the ground while landing
    pub land_frames: i32,
    /// Vertical speed in sub-pixels per tick
    pub vertical_speed: i32,
}

/// Pick the frame for the current animation state
pub fn select_frame(
    animation: Animation,
    facing: Facing,
    animation_count: u32,
    jump: JumpPhase,
) -> SpriteFrame {
    let cycle = (animation_count / FRAME_HOLD) % CYCLE_LENGTH;
    match animation {
        Animation::Standing => SpriteFrame::new(0, 64, 128).mirrored(facing, 7),
        Animation::Walking => SpriteFrame::new(1 + cycle, 64, 128).mirrored(facing, 7),
        Animation::Running => SpriteFrame::new(28 + cycle * 2, 128, 128).mirrored(facing, 28),
        Animation::Jumping => jump_frame(jump).mirrored(facing, 42),
    }
}

fn jump_frame(jump: JumpPhase) -> SpriteFrame {
    if jump.frame < 4 {
        // Crouch
        SpriteFrame::new(84, 84, 96)
    } else if jump.frame < 8 {
        SpriteFrame::new(86, 90, 91)
    } else if jump.frame < 12 {
        // Takeoff stretch
        SpriteFrame::new(88, 66, 141)
    } else if jump.land_frames > 0 {
        SpriteFrame::new(94, 79, 107)
    } else if jump.vertical_speed <= 0 {
        // Rising
        SpriteFrame::new(90, 60, 175)
    } else {
        // Falling
        SpriteFrame::new(92, 60, 158)
    }
}
