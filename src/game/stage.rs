// Stage: everything that lives in one play session

use super::background::{BgFlash, StarField};
use super::characters::animation::{SHEET_CELL, SHEET_COLUMNS};
use super::characters::{MovementStats, OwnCharacter};
use super::field::{Field, FieldError, FlatGround, TileField};
use crate::core::config::{
    GameConfig, StageKind, BLOCK_SIZE, FIELD_HEIGHT_BLOCK, FIELD_WIDTH_BLOCK, GROUND_Y,
    PROTOTYPE_GROUND_Y,
};
use crate::engine::assets::{AssetError, AssetLoader, AssetType, SpriteSheet};
use crate::engine::input::Controls;
use crate::engine::renderer::{font, Canvas, Color, ColorError};

pub const CHARACTER_SHEET: &str = "character.png";
pub const BLOCK_SHEET: &str = "block.png";
pub const STAGE_MAP: &str = "stage1.txt";

/// Sky behind the scrolling field
pub const FIELD_SKY: &str = "#4A5267";
/// Sky of the flat prototype
pub const PROTOTYPE_SKY: &str = "#6af";

/// Rows of cells in the character sheet
const SHEET_ROWS: u32 = 13;
/// Cells in the block sheet: ground, platform, brick
const BLOCK_KINDS: u32 = 3;

const CHARACTER_SIZE: i32 = 128;
const CHARACTER_LIFE: i32 = 100;
const SPAWN_X: i32 = 100;

const HUD_X: i32 = 10;
const HUD_BASELINE: i32 = 20;
const HUD_SCALE: i32 = 2;

/// Errors from building a stage
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("Invalid stage map: {0}")]
    Field(#[from] FieldError),

    #[error("Invalid stage color: {0}")]
    Color(#[from] ColorError),
}

/// The world, the player and the backdrop, updated once per tick
pub struct Stage {
    field: Box<dyn Field>,
    character: OwnCharacter,
    flash: Option<BgFlash>,
    stars: StarField,
    sky: Color,
    character_sheet: SpriteSheet,
    block_sheet: SpriteSheet,
    frame_count: u64,
}

impl Stage {
    pub fn new(
        config: &GameConfig,
        loader: &AssetLoader,
        rng: &mut fastrand::Rng,
    ) -> Result<Self, StageError> {
        let character_sheet =
            SpriteSheet::load_or_placeholder(loader, CHARACTER_SHEET, SHEET_CELL, SHEET_CELL, || {
                SpriteSheet::placeholder(
                    SHEET_CELL,
                    SHEET_CELL,
                    SHEET_COLUMNS,
                    SHEET_ROWS,
                    Color::rgb(0xe8, 0x9a, 0x3c),
                )
            });
        let block = BLOCK_SIZE as u32;
        let block_sheet = SpriteSheet::load_or_placeholder(loader, BLOCK_SHEET, block, block, || {
            SpriteSheet::placeholder(block, block, BLOCK_KINDS, 1, Color::rgb(0x8b, 0x5a, 0x2b))
        });

        let (field, ground, stats, flash, sky) = match config.stage {
            StageKind::Tiles => (
                Box::new(load_tile_field(loader)?) as Box<dyn Field>,
                GROUND_Y,
                MovementStats::standard(),
                Some(BgFlash::standard()?),
                Color::from_hex(FIELD_SKY)?,
            ),
            StageKind::Flat => (
                Box::new(FlatGround::new(PROTOTYPE_GROUND_Y)) as Box<dyn Field>,
                PROTOTYPE_GROUND_Y,
                MovementStats::prototype(),
                None,
                Color::from_hex(PROTOTYPE_SKY)?,
            ),
        };

        let character = OwnCharacter::new(
            SPAWN_X,
            ground - CHARACTER_SIZE,
            CHARACTER_SIZE,
            CHARACTER_SIZE,
            CHARACTER_LIFE,
            ground,
            stats,
        );

        log::info!(
            "Stage ready ({:?}), player spawned at x {} with {} life",
            config.stage,
            SPAWN_X,
            character.base().life
        );

        Ok(Self {
            field,
            character,
            flash,
            stars: StarField::standard(rng)?,
            sky,
            character_sheet,
            block_sheet,
            frame_count: 0,
        })
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn character(&self) -> &OwnCharacter {
        &self.character
    }

    /// Advance one tick
    pub fn update(&mut self, controls: Controls) {
        self.frame_count += 1;
        self.stars.update();
        self.character.update(controls, self.field.as_ref());
    }

    /// Draw the tick back to front
    pub fn render(&mut self, canvas: &mut Canvas) {
        canvas.clear(self.sky);
        if let Some(flash) = self.flash.as_mut() {
            flash.update(canvas);
        }
        canvas.fill_text(
            &format!("FRAME:{}", self.frame_count),
            HUD_X,
            HUD_BASELINE,
            HUD_SCALE,
            Color::WHITE,
        );
        self.stars.draw(canvas);
        self.field
            .draw(canvas, &self.block_sheet, self.character.scroll_x(), 0);
        self.character.draw(canvas, &self.character_sheet);
    }
}

/// Centered PAUSED banner over whatever was last drawn
pub fn draw_pause_overlay(canvas: &mut Canvas) {
    canvas.fill_rect(
        0,
        0,
        canvas.width() as i32,
        canvas.height() as i32,
        Color::rgba(0, 0, 0, 0x80),
    );
    let scale = 4;
    let text = "PAUSED";
    let x = (canvas.width() as i32 - font::text_width(text, scale)) / 2;
    let baseline = (canvas.height() as i32 + font::GLYPH_HEIGHT * scale) / 2;
    canvas.fill_text(text, x, baseline, scale, Color::WHITE);
}

/// A map file in the asset directory overrides the built-in stage
fn load_tile_field(loader: &AssetLoader) -> Result<TileField, FieldError> {
    match loader.load_text(AssetType::Map, STAGE_MAP) {
        Ok(text) => match TileField::from_ascii(&text) {
            Ok(field) => {
                log_map_size(STAGE_MAP, &field);
                return Ok(field);
            }
            Err(err) => log::warn!("Invalid map {}: {}; using built-in stage", STAGE_MAP, err),
        },
        Err(AssetError::NotFound(_)) => log::debug!("No {} override", STAGE_MAP),
        Err(err) => log::warn!("{}; using built-in stage", err),
    }
    let field = TileField::builtin()?;
    log_map_size("built-in stage", &field);
    Ok(field)
}

fn log_map_size(name: &str, field: &TileField) {
    let (width, height) = (field.width_blocks(), field.height_blocks());
    log::info!("Loaded {} ({}x{} blocks)", name, width, height);
    if (width, height) != (FIELD_WIDTH_BLOCK as usize, FIELD_HEIGHT_BLOCK as usize) {
        log::debug!(
            "{} differs from the standard {}x{} stage",
            name,
            FIELD_WIDTH_BLOCK,
            FIELD_HEIGHT_BLOCK
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn missing_assets() -> AssetLoader {
        AssetLoader::new("/definitely/not/here")
    }

    fn stage(kind: StageKind) -> Stage {
        let config = GameConfig {
            stage: kind,
            ..GameConfig::default()
        };
        Stage::new(&config, &missing_assets(), &mut fastrand::Rng::with_seed(1)).unwrap()
    }

    #[test]
    fn test_spawn_position() {
        let stage = stage(StageKind::Tiles);
        let pos = stage.character().base().pixel_position();
        assert_eq!((pos.x, pos.y), (100, GROUND_Y - 128));
        assert_eq!(stage.frame_count(), 0);
    }

    #[test]
    fn test_update_counts_frames() {
        let mut stage = stage(StageKind::Tiles);
        for _ in 0..10 {
            stage.update(Controls::default());
        }
        assert_eq!(stage.frame_count(), 10);
        assert_eq!(stage.character().base().pixel_position().y, GROUND_Y - 128);
    }

    #[test]
    fn test_render_layers() {
        let mut stage = stage(StageKind::Tiles);
        stage.update(Controls::default());
        let mut canvas = Canvas::new(800, 600);
        stage.render(&mut canvas);

        let sky = Color::from_hex(FIELD_SKY).ok();
        assert_eq!(sky, Some(Color::rgb(0x4a, 0x52, 0x67)));
        // Ground blocks along the bottom rows
        assert_ne!(canvas.pixel(700, 560), sky);
        // Flash core, possibly dotted by a star
        let white = (95..106)
            .flat_map(|x| (95..106).map(move |y| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) == Some(Color::WHITE))
            .count();
        assert!(white > 60);
        // Character body
        assert_ne!(canvas.pixel(100, 450), sky);
    }

    #[test]
    fn test_prototype_stage() {
        let mut stage = stage(StageKind::Flat);
        for _ in 0..5 {
            stage.update(Controls::default());
        }
        let pos = stage.character().base().pixel_position();
        assert_eq!(pos.y, PROTOTYPE_GROUND_Y - 128);

        let mut canvas = Canvas::new(800, 600);
        stage.render(&mut canvas);
        // No flash on the prototype sky
        assert_ne!(canvas.pixel(100, 100), Some(Color::WHITE));
    }

    #[test]
    fn test_prototype_stage_has_fixed_screen() {
        let mut stage = stage(StageKind::Flat);
        let walk_right = Controls {
            right: true,
            ..Controls::default()
        };
        for _ in 0..150 {
            stage.update(walk_right);
        }
        let pos = stage.character().base().pixel_position();
        assert!((400..800).contains(&pos.x), "x = {}", pos.x);
        assert_eq!(stage.character().scroll_x(), 0);

        // Drawn where it stands, not pinned at the scroll anchor
        let mut canvas = Canvas::new(800, 600);
        stage.render(&mut canvas);
        let sky = Color::from_hex(PROTOTYPE_SKY).ok();
        assert_eq!(sky, Some(Color::rgb(0x66, 0xaa, 0xff)));
        assert_ne!(canvas.pixel(pos.x as u32, 450), sky);
    }

    #[test]
    fn test_map_override() {
        let dir = std::env::temp_dir().join(format!("aozora-stage-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("maps")).unwrap();
        std::fs::write(dir.join("maps").join(STAGE_MAP), "....\n....\n####\n").unwrap();

        let field = load_tile_field(&AssetLoader::new(PathBuf::from(&dir))).unwrap();
        assert_eq!(field.width_blocks(), 4);

        std::fs::write(dir.join("maps").join(STAGE_MAP), "..?\n").unwrap();
        let fallback = load_tile_field(&AssetLoader::new(PathBuf::from(&dir))).unwrap();
        assert_eq!(fallback, TileField::builtin().unwrap());

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_pause_overlay_darkens() {
        let mut canvas = Canvas::new(100, 60);
        canvas.clear(Color::WHITE);
        draw_pause_overlay(&mut canvas);
        let corner = canvas.pixel(0, 0).unwrap();
        assert!(corner.r < 200);
        assert_eq!(canvas.pixel(50, 30).map(|c| c.a), Some(255));
    }
}
