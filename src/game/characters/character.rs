// Base character data shared by everything drawn from the character sheet

use super::state::Facing;
use crate::core::math::{from_subpixel, to_subpixel, Position};
use crate::engine::assets::SpriteSheet;
use crate::engine::renderer::Canvas;
use glam::Vec2;

/// Position, heading, size and scroll of a sprite-sheet character
///
/// `position` is in sub-pixel units; `width` and `height` are the pixel size
/// of the frame currently shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub position: Position<i32>,
    pub vector: Vec2,
    pub angle: f32,
    pub width: i32,
    pub height: i32,
    pub life: i32,
    /// Floor line the character was placed on
    pub ground_position: i32,
    /// Camera offset in pixels
    pub scroll: Position<i32>,
}

impl Character {
    /// Place a character with its top-left at pixel (`x`, `y`)
    pub fn new(x: i32, y: i32, width: i32, height: i32, life: i32, ground_position: i32) -> Self {
        Self {
            position: Position::new(to_subpixel(x), to_subpixel(y)),
            vector: Vec2::new(1.0, 0.0),
            angle: 0.0,
            width,
            height,
            life,
            ground_position,
            scroll: Position::new(0, 0),
        }
    }

    /// Set the heading angle and the matching unit vector
    pub fn set_vector_from_angle(&mut self, angle: f32) {
        self.angle = angle;
        self.vector = Vec2::new(angle.cos(), angle.sin());
    }

    pub fn facing(&self) -> Facing {
        Facing::from_vector_x(self.vector.x)
    }

    pub fn set_facing(&mut self, facing: Facing) {
        if self.facing() != facing {
            self.set_vector_from_angle(facing.angle());
        }
    }

    /// Whole-pixel position
    pub fn pixel_position(&self) -> Position<i32> {
        Position::new(from_subpixel(self.position.x), from_subpixel(self.position.y))
    }

    /// Draw the current frame with its top edge at `y`, centred on `x`
    ///
    /// An odd-width frame starts half a pixel left of `x - width / 2`; its
    /// first column is the first one whose pixel centre it covers.
    pub fn draw(&self, canvas: &mut Canvas, sheet: &SpriteSheet, sprite: u32, x: i32, y: i32) {
        let left = (x as f32 - self.width as f32 / 2.0 - 0.5).ceil() as i32;
        sheet.draw(canvas, sprite, self.width, self.height, left, y);
    }
}
