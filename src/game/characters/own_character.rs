// The player-controlled character: movement, jumping, collision and scrolling
//
// Horizontal and vertical speeds are integers in sub-pixel units per tick.
// Collision is sampled at a handful of points around the frame rectangle at
// the position the character is about to move to.

use super::animation::{select_frame, JumpPhase};
use super::character::Character;
use super::state::{Animation, Facing};
use super::stats::MovementStats;
use crate::core::config::CANVAS_WIDTH;
use crate::core::math::{from_subpixel, to_subpixel};
use crate::engine::assets::SpriteSheet;
use crate::engine::input::Controls;
use crate::engine::renderer::Canvas;
use crate::game::field::Field;

/// Horizontal screen position the camera keeps the character at
const SCROLL_ANCHOR_X: i32 = CANVAS_WIDTH / 5 * 2;

/// Inset of the side samples from the frame edges
const WALL_SAMPLE_INSET: f32 = 10.0;
/// Vertical inset of the upper and lower side samples
const WALL_SAMPLE_MARGIN: f32 = 39.0;

pub struct OwnCharacter {
    base: Character,
    stats: MovementStats,
    accel_x: i32,
    accel_y: i32,
    is_jumping: bool,
    /// Ticks the jump key has been charging; 0 when not charging
    jump_btn_count: i32,
    jump_frame_count: i32,
    land_frame_count: i32,
    animation: Animation,
    animation_count: u32,
    sprite: u32,
    previous_height: i32,
}

impl OwnCharacter {
    pub fn new(
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        life: i32,
        ground_position: i32,
        stats: MovementStats,
    ) -> Self {
        Self {
            base: Character::new(x, y, width, height, life, ground_position),
            stats,
            accel_x: 0,
            accel_y: 0,
            is_jumping: false,
            jump_btn_count: 0,
            jump_frame_count: 0,
            land_frame_count: 0,
            animation: Animation::Standing,
            animation_count: 0,
            sprite: 0,
            previous_height: height,
        }
    }

    pub fn base(&self) -> &Character {
        &self.base
    }

    pub fn scroll_x(&self) -> i32 {
        self.base.scroll.x
    }

    /// Advance one tick
    pub fn update(&mut self, controls: Controls, field: &dyn Field) {
        self.previous_height = self.base.height;

        if self.accel_y < self.stats.max_gravity {
            self.accel_y += self.stats.gravity;
        }
        if self.jump_frame_count == self.stats.jump_kick_frame {
            self.accel_y = -self.stats.jumping_power;
        }
        if self.jump_btn_count != 0 {
            self.jump_btn_count += 1;
        }

        self.check_floor(field);

        if controls.jump {
            self.jump();
        } else if controls.left && controls.dash {
            self.run(Facing::Left);
        } else if controls.right && controls.dash {
            self.run(Facing::Right);
        } else if controls.left {
            self.walk(Facing::Left);
        } else if controls.right {
            self.walk(Facing::Right);
        } else {
            self.standing(field);
        }

        self.animation_count = self.animation_count.wrapping_add(1);
        if self.animation == Animation::Jumping {
            self.jump_frame_count += 1;
        }
        let frame = select_frame(
            self.animation,
            self.base.facing(),
            self.animation_count,
            JumpPhase {
                frame: self.jump_frame_count,
                land_frames: self.land_frame_count,
                vertical_speed: self.accel_y,
            },
        );
        self.sprite = frame.index;
        self.base.width = frame.width;
        self.base.height = frame.height;

        self.check_wall(field);
        self.check_ceiling(field);

        let position = &mut self.base.position;
        position.x = (position.x + self.accel_x).max(0);
        // Keep the feet in place when the frame height changes
        position.y += self.accel_y + to_subpixel(self.previous_height - self.base.height);

        self.update_scroll(field);
    }

    /// Draw relative to the camera
    pub fn draw(&self, canvas: &mut Canvas, sheet: &SpriteSheet) {
        let pixel = self.base.pixel_position();
        let x = pixel.x - self.base.scroll.x;
        let y = pixel.y - self.base.scroll.y;
        self.base.draw(canvas, sheet, self.sprite, x, y);
    }

    fn set_animation(&mut self, animation: Animation) {
        if self.animation != animation {
            log::debug!("animation {} -> {}", self.animation.name(), animation.name());
            self.animation = animation;
        }
    }

    fn jump(&mut self) {
        if !self.is_jumping {
            self.is_jumping = true;
            self.set_animation(Animation::Jumping);
            self.jump_frame_count = 0;
            self.land_frame_count = 0;
            self.jump_btn_count = 1;
        }
        if self.jump_btn_count < self.stats.big_jump_frames {
            self.accel_y = -(self.stats.big_jumping_power - self.jump_btn_count);
        }
    }

    fn run(&mut self, facing: Facing) {
        if !self.is_jumping {
            self.set_animation(Animation::Running);
            self.base.set_facing(facing);
        }
        let limit = self.stats.dash_upper_limit;
        let speed = self.stats.speed;
        match facing {
            Facing::Left => {
                if self.accel_x > -limit {
                    self.accel_x -= speed;
                }
                // Turning around brakes twice as hard
                if self.accel_x > 0 {
                    self.accel_x -= speed;
                }
            }
            Facing::Right => {
                if self.accel_x < limit {
                    self.accel_x += speed;
                }
                if self.accel_x < 0 {
                    self.accel_x += speed;
                }
            }
        }
    }

    fn walk(&mut self, facing: Facing) {
        if !self.is_jumping {
            self.set_animation(Animation::Walking);
            self.base.set_facing(facing);
        }
        let limit = self.stats.walk_upper_limit;
        let speed = self.stats.speed;
        let half = speed / 2;
        match facing {
            Facing::Left => {
                // Coming down from a run
                if self.accel_x <= -limit {
                    self.accel_x += speed;
                }
                if self.accel_x > -limit {
                    self.accel_x -= half;
                }
                if self.accel_x > 0 {
                    self.accel_x -= half;
                }
            }
            Facing::Right => {
                if self.accel_x >= limit {
                    self.accel_x -= speed;
                }
                if self.accel_x < limit {
                    self.accel_x += half;
                }
                if self.accel_x < 0 {
                    self.accel_x += half;
                }
            }
        }
    }

    fn standing(&mut self, field: &dyn Field) {
        if self.is_jumping {
            return;
        }
        let limit = self.stats.walk_upper_limit;
        let speed = self.stats.speed;

        if self.accel_x > 0 {
            if self.accel_x > limit {
                self.accel_x -= speed * 2;
            }
            self.accel_x = (self.accel_x - speed).max(0);
        }
        if self.accel_x < 0 {
            if self.accel_x < -limit {
                self.accel_x += speed * 2;
            }
            self.accel_x = (self.accel_x + speed).min(0);
        }

        let feet = from_subpixel(self.base.position.y + self.accel_y) + self.base.height;
        if self.accel_x == 0 && self.accel_y == 0 && self.base.position.y == self.floor_top(field, feet)
        {
            self.set_animation(Animation::Standing);
        }
    }

    /// Sub-pixel y the character rests at when its feet are in the block row of `feet`
    fn floor_top(&self, field: &dyn Field, feet: i32) -> i32 {
        to_subpixel(field.surface_y(feet) - self.base.height + self.stats.floor_sink)
    }

    /// Left edge and top edge in pixels after this tick's movement
    fn predicted_corner(&self) -> (f32, i32) {
        let left = from_subpixel(self.base.position.x + self.accel_x) as f32
            - self.base.width as f32 / 2.0;
        let top = from_subpixel(self.base.position.y + self.accel_y);
        (left, top)
    }

    /// Sample x coordinates along the top and bottom edges
    fn edge_samples(&self, left: f32) -> [f32; 4] {
        let w = self.base.width as f32;
        [left + 39.0, left + w / 2.0 - 8.0, left + w / 2.0 + 8.0, left + w - 40.0]
    }

    fn check_wall(&mut self, field: &dyn Field) {
        let (left, top) = self.predicted_corner();
        let top = top as f32;
        let w = self.base.width as f32;
        let h = self.base.height as f32;
        let heights = [top + WALL_SAMPLE_MARGIN, top + h / 2.0, top + h - WALL_SAMPLE_MARGIN];

        let right_x = left + w - WALL_SAMPLE_INSET;
        let left_x = left + WALL_SAMPLE_INSET;
        if heights.iter().any(|&y| field.is_block(right_x, y)) {
            if self.accel_x > 0 {
                self.accel_x = 0;
            }
        } else if heights.iter().any(|&y| field.is_block(left_x, y)) && self.accel_x < 0 {
            self.accel_x = 0;
        }
    }

    fn check_ceiling(&mut self, field: &dyn Field) {
        if self.accel_y > 0 {
            return;
        }
        let (left, top) = self.predicted_corner();
        let top = top as f32;
        if self
            .edge_samples(left)
            .iter()
            .any(|&x| field.is_block(x, top))
        {
            self.accel_y = 0;
            // Cancel the feet anchoring so the head stays under the ceiling
            self.base.position.y -= to_subpixel(self.previous_height - self.base.height);
            self.jump_btn_count = self.stats.big_jump_frames;
        }
    }

    fn check_floor(&mut self, field: &dyn Field) {
        if self.accel_y < 0 {
            return;
        }
        let (left, top) = self.predicted_corner();
        let feet = top + self.base.height;
        if !self
            .edge_samples(left)
            .iter()
            .any(|&x| field.is_block(x, feet as f32))
        {
            return;
        }

        let floor_top = self.floor_top(field, feet);
        if self.base.position.y >= floor_top {
            if self.animation == Animation::Jumping {
                self.land_frame_count += 1;
                if self.land_frame_count > self.stats.landing_frames {
                    self.is_jumping = false;
                    self.jump_btn_count = 0;
                    self.set_animation(Animation::Walking);
                }
            }
            self.accel_y = 0;
            self.base.position.y = floor_top;
        }
    }

    fn update_scroll(&mut self, field: &dyn Field) {
        if !field.scrolls() {
            return;
        }
        let x = from_subpixel(self.base.position.x);
        let scroll = &mut self.base.scroll.x;
        if x > *scroll + SCROLL_ANCHOR_X {
            *scroll = x - SCROLL_ANCHOR_X;
        }
        if *scroll > 0 && x < *scroll + SCROLL_ANCHOR_X {
            *scroll = x - SCROLL_ANCHOR_X;
        }
        let max_scroll = field.pixel_width().saturating_sub(CANVAS_WIDTH).max(0);
        *scroll = (*scroll).clamp(0, max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GROUND_Y;
    use crate::game::field::{FlatGround, TileField};

    /// 20x15 open stage with two rows of ground
    fn open_field() -> TileField {
        field_with(&[])
    }

    /// Open stage plus `(col, row)` bricks
    fn field_with(bricks: &[(usize, usize)]) -> TileField {
        let mut rows = vec![vec!['.'; 20]; 15];
        for row in rows.iter_mut().skip(13) {
            row.fill('#');
        }
        for &(col, row) in bricks {
            rows[row][col] = 'B';
        }
        let text: Vec<String> = rows.into_iter().map(|r| r.into_iter().collect()).collect();
        TileField::from_ascii(&text.join("\n")).unwrap()
    }

    fn spawn() -> OwnCharacter {
        OwnCharacter::new(100, GROUND_Y - 128, 128, 128, 100, GROUND_Y, MovementStats::standard())
    }

    fn hold(character: &mut OwnCharacter, field: &dyn Field, controls: Controls, ticks: usize) {
        for _ in 0..ticks {
            character.update(controls, field);
        }
    }

    const IDLE: Controls = Controls {
        left: false,
        right: false,
        dash: false,
        jump: false,
    };
    const RIGHT: Controls = Controls {
        right: true,
        ..IDLE
    };
    const LEFT: Controls = Controls { left: true, ..IDLE };
    const DASH_RIGHT: Controls = Controls {
        right: true,
        dash: true,
        ..IDLE
    };
    const JUMP: Controls = Controls { jump: true, ..IDLE };

    #[test]
    fn test_rests_on_ground() {
        let field = open_field();
        let mut character = spawn();
        hold(&mut character, &field, IDLE, 10);

        assert_eq!(character.animation, Animation::Standing);
        assert_eq!((character.accel_x, character.accel_y), (0, 0));
        assert_eq!(character.base().pixel_position().y, 396);
        assert_eq!((character.base.width, character.base.height), (64, 128));
        assert_eq!(character.sprite, 0);
    }

    #[test]
    fn test_walk_settles_near_limit() {
        let field = open_field();
        let mut character = spawn();
        hold(&mut character, &field, RIGHT, 40);

        let (ax, ay) = (character.accel_x, character.accel_y);
        assert!((90..=96).contains(&ax), "ax = {}", ax);
        assert_eq!(ay, 0);
        assert_eq!(character.animation, Animation::Walking);
        assert_eq!(character.base.facing(), Facing::Right);
    }

    #[test]
    fn test_walk_left_faces_left() {
        let field = open_field();
        let mut character = spawn();
        hold(&mut character, &field, LEFT, 3);

        assert_eq!(character.accel_x, -9);
        assert_eq!(character.base.facing(), Facing::Left);
        // Left-facing walk frames start at 8
        assert!((8..=13).contains(&character.sprite));
    }

    #[test]
    fn test_run_reaches_dash_limit() {
        let field = open_field();
        let mut character = spawn();
        hold(&mut character, &field, DASH_RIGHT, 40);

        assert_eq!(character.accel_x, 192);
        assert_eq!(character.animation, Animation::Running);
        assert_eq!((character.base.width, character.base.height), (128, 128));
    }

    #[test]
    fn test_release_decelerates_to_standing() {
        let field = open_field();
        let mut character = spawn();
        hold(&mut character, &field, DASH_RIGHT, 40);
        hold(&mut character, &field, IDLE, 40);

        assert_eq!(character.accel_x, 0);
        assert_eq!(character.animation, Animation::Standing);
    }

    #[test]
    fn test_reversing_brakes_harder() {
        let field = open_field();
        let mut character = spawn();
        hold(&mut character, &field, DASH_RIGHT, 40);
        character.update(
            Controls {
                left: true,
                dash: true,
                ..IDLE
            },
            &field,
        );
        assert_eq!(character.accel_x, 192 - 12);
    }

    #[test]
    fn test_jump_lifts_off_and_lands() {
        let field = open_field();
        let mut character = spawn();
        hold(&mut character, &field, IDLE, 2);

        character.update(JUMP, &field);
        assert!(character.is_jumping);
        assert_eq!(character.animation, Animation::Jumping);
        assert_eq!(character.accel_y, -219);
        assert_eq!(character.sprite, 84);

        let mut highest_feet = i32::MAX;
        for _ in 0..200 {
            character.update(IDLE, &field);
            let h = character.base.height;
            highest_feet = highest_feet.min(character.base().pixel_position().y + h);
        }

        assert!(highest_feet < GROUND_Y - 40, "feet peaked at {}", highest_feet);
        assert!(!character.is_jumping);
        assert_eq!(character.animation, Animation::Standing);
        assert_eq!(character.base().pixel_position().y, 396);
    }

    #[test]
    fn test_holding_jump_goes_higher() {
        let field = open_field();
        let peak = |charge: usize| {
            let mut character = spawn();
            hold(&mut character, &field, IDLE, 2);
            hold(&mut character, &field, JUMP, charge);
            let mut highest = i32::MAX;
            for _ in 0..120 {
                character.update(IDLE, &field);
                let h = character.base.height;
                highest = highest.min(character.base().pixel_position().y + h);
            }
            highest
        };
        assert!(peak(14) < peak(1));
    }

    #[test]
    fn test_landing_waits_before_walking() {
        let field = open_field();
        let mut character = spawn();
        hold(&mut character, &field, IDLE, 2);
        character.is_jumping = true;
        character.animation = Animation::Jumping;

        for tick in 1..=5 {
            character.check_floor(&field);
            assert!(character.is_jumping, "landed early on tick {}", tick);
        }
        character.check_floor(&field);
        assert!(!character.is_jumping);
        assert_eq!(character.animation, Animation::Walking);
        assert_eq!(character.jump_btn_count, 0);
    }

    #[test]
    fn test_floor_snaps_only_once_below_rest_line() {
        let field = open_field();
        let mut character = spawn();
        character.base.width = 64;
        character.base.height = 128;

        // Above the rest line: keep falling
        character.base.position.y = to_subpixel(390);
        character.accel_y = 320;
        character.check_floor(&field);
        assert_eq!(character.accel_y, 320);

        // Sunk past it: snap back up
        character.base.position.y = to_subpixel(400);
        character.check_floor(&field);
        assert_eq!(character.accel_y, 0);
        assert_eq!(character.base.position.y, to_subpixel(396));
    }

    #[test]
    fn test_wall_blocks_right() {
        let field = field_with(&[(3, 10), (3, 11), (3, 12)]);
        let mut character = spawn();
        character.base.width = 64;
        character.accel_x = 96;
        character.check_wall(&field);
        assert_eq!(character.accel_x, 0);
    }

    #[test]
    fn test_wall_blocks_left() {
        let field = field_with(&[(1, 10), (1, 11), (1, 12)]);
        let mut character = spawn();
        character.base.width = 64;
        character.accel_x = -96;
        character.check_wall(&field);
        assert_eq!(character.accel_x, 0);

        // Moving away from the wall is allowed
        character.accel_x = 96;
        character.check_wall(&field);
        assert_eq!(character.accel_x, 96);
    }

    #[test]
    fn test_walking_into_wall_stops_short() {
        let field = field_with(&[(10, 10), (10, 11), (10, 12)]);
        let mut character = spawn();
        hold(&mut character, &field, RIGHT, 400);

        let x = character.base().pixel_position().x;
        assert!((370..=377).contains(&x), "stopped at {}", x);
    }

    #[test]
    fn test_ceiling_stops_rise() {
        let field = field_with(&[(0, 9), (1, 9), (2, 9), (3, 9), (4, 9)]);
        let mut character = spawn();
        character.base.width = 64;
        character.base.height = 128;
        character.previous_height = 128;
        character.accel_y = -64;

        character.check_ceiling(&field);

        assert_eq!(character.accel_y, 0);
        assert_eq!(character.jump_btn_count, 15);
        assert_eq!(character.base.position.y, to_subpixel(396));
    }

    #[test]
    fn test_ceiling_ignored_while_falling() {
        let field = field_with(&[(0, 9), (1, 9), (2, 9), (3, 9), (4, 9)]);
        let mut character = spawn();
        character.accel_y = 16;
        character.check_ceiling(&field);
        assert_eq!(character.accel_y, 16);
    }

    #[test]
    fn test_x_never_negative() {
        let field = FlatGround::new(500);
        let mut character = OwnCharacter::new(
            1,
            500 - 128,
            128,
            128,
            100,
            500,
            MovementStats::prototype(),
        );
        hold(&mut character, &field, LEFT, 30);
        assert_eq!(character.base().position.x, 0);
    }

    #[test]
    fn test_scroll_follows_and_clamps() {
        let field = open_field();
        let mut character = spawn();

        character.base.position.x = to_subpixel(500);
        character.update_scroll(&field);
        // 20 blocks wide stage cannot scroll at all
        assert_eq!(character.scroll_x(), 0);

        let wide = TileField::builtin().unwrap();
        character.update_scroll(&wide);
        assert_eq!(character.scroll_x(), 180);

        character.base.position.x = to_subpixel(400);
        character.update_scroll(&wide);
        assert_eq!(character.scroll_x(), 80);

        character.base.position.x = to_subpixel(100);
        character.update_scroll(&wide);
        assert_eq!(character.scroll_x(), 0);

        character.base.position.x = to_subpixel(wide.pixel_width() - 10);
        character.update_scroll(&wide);
        assert_eq!(character.scroll_x(), wide.pixel_width() - CANVAS_WIDTH);
    }

    #[test]
    fn test_prototype_ground() {
        let field = FlatGround::new(500);
        let mut character =
            OwnCharacter::new(100, 500 - 128, 128, 128, 100, 500, MovementStats::prototype());
        hold(&mut character, &field, IDLE, 5);
        assert_eq!(character.base().pixel_position().y, 500 - 128);
        assert_eq!(character.animation, Animation::Standing);
    }

    #[test]
    fn test_flat_ground_keeps_camera_still() {
        let field = FlatGround::new(500);
        let mut character =
            OwnCharacter::new(100, 500 - 128, 128, 128, 100, 500, MovementStats::prototype());
        hold(&mut character, &field, DASH_RIGHT, 90);
        assert!(character.base().pixel_position().x > 500);
        assert_eq!(character.scroll_x(), 0);
    }

    #[test]
    fn test_draw_relative_to_scroll() {
        use crate::engine::renderer::Color;

        let field = TileField::builtin().unwrap();
        let mut character = spawn();
        hold(&mut character, &field, IDLE, 1);
        character.base.position.x = to_subpixel(1000);
        character.update_scroll(&field);

        let sheet = SpriteSheet::placeholder(64, 64, 14, 13, Color::rgb(200, 0, 0));
        let mut canvas = Canvas::new(800, 600);
        canvas.clear(Color::BLACK);
        character.draw(&mut canvas, &sheet);

        // Anchored at 320 on screen, frame 64 wide
        assert_ne!(canvas.pixel(320, 450), Some(Color::BLACK));
        assert_eq!(canvas.pixel(100, 450), Some(Color::BLACK));
    }
}
