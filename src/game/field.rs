// Block field the character collides with

use crate::core::config::{BLOCK_SIZE, MAP_HEIGHT_BLOCK, MAP_WIDTH_BLOCK};
use crate::engine::assets::SpriteSheet;
use crate::engine::renderer::Canvas;

/// Map shipped with the game, used when no map file overrides it
pub const BUILTIN_STAGE: &str = include_str!("../../assets/maps/stage1.txt");

/// Errors from parsing an ASCII map
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Map has no rows")]
    Empty,

    #[error("Row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unknown glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { row: usize, col: usize, glyph: char },
}

/// World geometry queried in whole-or-fractional pixel coordinates
pub trait Field {
    /// Whether the point lies inside a solid block
    fn is_block(&self, x: f32, y: f32) -> bool;

    /// Top edge of the block row containing `y`
    fn surface_y(&self, y: i32) -> i32;

    /// Width of the world in pixels
    fn pixel_width(&self) -> i32;

    /// Draw the visible part of the world shifted by the scroll offset
    fn draw(&self, canvas: &mut Canvas, blocks: &SpriteSheet, scroll_x: i32, scroll_y: i32);

    /// Whether the camera follows the character across this world
    fn scrolls(&self) -> bool {
        true
    }
}

/// One cell of a tile field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tile {
    #[default]
    Empty,
    Ground,
    Platform,
    Brick,
}

impl Tile {
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' | ' ' => Some(Self::Empty),
            '#' => Some(Self::Ground),
            '=' => Some(Self::Platform),
            'B' => Some(Self::Brick),
            _ => None,
        }
    }

    pub fn is_solid(&self) -> bool {
        !matches!(self, Self::Empty)
    }

    /// Cell in the block sprite sheet
    pub fn sprite_index(&self) -> Option<u32> {
        match self {
            Self::Empty => None,
            Self::Ground => Some(0),
            Self::Platform => Some(1),
            Self::Brick => Some(2),
        }
    }
}

/// Grid of 40px blocks
///
/// Cells above and below the grid are open. Columns left and right of it are
/// solid so the character cannot leave the stage sideways.
#[derive(Debug, Clone, PartialEq)]
pub struct TileField {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileField {
    /// Parse one text line per row, top to bottom; blank lines are skipped
    pub fn from_ascii(text: &str) -> Result<Self, FieldError> {
        let mut width = None;
        let mut tiles = Vec::new();
        let mut height = 0;

        for line in text.lines().map(|l| l.trim_end_matches('\r')) {
            if line.trim().is_empty() {
                continue;
            }
            let row = height;
            let found = line.chars().count();
            let expected = *width.get_or_insert(found);
            if found != expected {
                return Err(FieldError::RaggedRow {
                    row,
                    expected,
                    found,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let tile =
                    Tile::from_glyph(glyph).ok_or(FieldError::UnknownGlyph { row, col, glyph })?;
                tiles.push(tile);
            }
            height += 1;
        }

        match width {
            Some(width) if width > 0 => Ok(Self {
                width,
                height,
                tiles,
            }),
            _ => Err(FieldError::Empty),
        }
    }

    /// The shipped stage
    pub fn builtin() -> Result<Self, FieldError> {
        Self::from_ascii(BUILTIN_STAGE)
    }

    pub fn width_blocks(&self) -> usize {
        self.width
    }

    pub fn height_blocks(&self) -> usize {
        self.height
    }

    /// Tile at a cell; None outside the grid
    pub fn tile(&self, col: i32, row: i32) -> Option<Tile> {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return None;
        }
        self.tiles.get(row as usize * self.width + col as usize).copied()
    }
}

impl Field for TileField {
    fn is_block(&self, x: f32, y: f32) -> bool {
        let col = (x / BLOCK_SIZE as f32).floor() as i32;
        let row = (y / BLOCK_SIZE as f32).floor() as i32;

        if row < 0 || row as usize >= self.height {
            return false;
        }
        if col < 0 || col as usize >= self.width {
            return true;
        }
        self.tile(col, row).is_some_and(|tile| tile.is_solid())
    }

    fn surface_y(&self, y: i32) -> i32 {
        y.div_euclid(BLOCK_SIZE) * BLOCK_SIZE
    }

    fn pixel_width(&self) -> i32 {
        self.width as i32 * BLOCK_SIZE
    }

    fn draw(&self, canvas: &mut Canvas, blocks: &SpriteSheet, scroll_x: i32, scroll_y: i32) {
        // One screen of blocks plus the partly visible column and row
        let first_col = scroll_x.div_euclid(BLOCK_SIZE);
        let last_col = first_col + MAP_WIDTH_BLOCK;
        let first_row = scroll_y.div_euclid(BLOCK_SIZE);
        let last_row = first_row + MAP_HEIGHT_BLOCK;

        for row in first_row..=last_row {
            for col in first_col..=last_col {
                let Some(index) = self.tile(col, row).and_then(|t| t.sprite_index()) else {
                    continue;
                };
                blocks.draw(
                    canvas,
                    index,
                    BLOCK_SIZE,
                    BLOCK_SIZE,
                    col * BLOCK_SIZE - scroll_x,
                    row * BLOCK_SIZE - scroll_y,
                );
            }
        }
    }
}

/// Endless flat ground of the early prototype
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatGround {
    pub ground_y: i32,
}

impl FlatGround {
    pub fn new(ground_y: i32) -> Self {
        Self { ground_y }
    }
}

impl Field for FlatGround {
    fn is_block(&self, _x: f32, y: f32) -> bool {
        y >= self.ground_y as f32
    }

    fn surface_y(&self, _y: i32) -> i32 {
        self.ground_y
    }

    fn pixel_width(&self) -> i32 {
        i32::MAX
    }

    fn draw(&self, _canvas: &mut Canvas, _blocks: &SpriteSheet, _scroll_x: i32, _scroll_y: i32) {}

    /// The prototype screen is fixed
    fn scrolls(&self) -> bool {
        false
    }
}
