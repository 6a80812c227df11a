// Game constants and runtime configuration

use std::path::PathBuf;
use std::time::Duration;

/// Virtual screen width in pixels
pub const CANVAS_WIDTH: i32 = 800;
/// Virtual screen height in pixels
pub const CANVAS_HEIGHT: i32 = 600;

/// Duration of one game tick (1/60 second)
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Y coordinate the character's feet rest on at startup
pub const GROUND_Y: i32 = 524;

/// Edge length of one field block in pixels
pub const BLOCK_SIZE: i32 = 40;
/// Blocks visible across the screen
pub const MAP_WIDTH_BLOCK: i32 = CANVAS_WIDTH / BLOCK_SIZE;
/// Blocks visible down the screen
pub const MAP_HEIGHT_BLOCK: i32 = CANVAS_HEIGHT / BLOCK_SIZE;
/// Width of the built-in stage in blocks
pub const FIELD_WIDTH_BLOCK: i32 = 256;
/// Height of the built-in stage in blocks
pub const FIELD_HEIGHT_BLOCK: i32 = CANVAS_HEIGHT / BLOCK_SIZE;

pub const BACKGROUND_LIGHT_MAX_COUNT: usize = 50;
pub const BACKGROUND_LIGHT_MAX_SIZE: f32 = 3.0;
pub const BACKGROUND_LIGHT_MAX_SPEED: f32 = 1.0;

/// Ground line of the flat prototype stage
pub const PROTOTYPE_GROUND_Y: i32 = 500;

const ENV_MAGNIFICATION: &str = "AOZORA_MAGNIFICATION";
const ENV_ASSETS: &str = "AOZORA_ASSETS";
const ENV_STAGE: &str = "AOZORA_STAGE";

/// Largest accepted window magnification
const MAX_MAGNIFICATION: u32 = 4;

/// Which world the game is played in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageKind {
    /// Scrolling block field
    #[default]
    Tiles,
    /// Endless flat ground of the early prototype
    Flat,
}

impl StageKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tiles" | "field" => Some(Self::Tiles),
            "flat" | "prototype" => Some(Self::Flat),
            _ => None,
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Integer scale from the virtual screen to the window
    pub magnification: u32,
    /// Directory holding the `images/` tree
    pub asset_dir: PathBuf,
    pub stage: StageKind,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            magnification: 1,
            asset_dir: PathBuf::from("assets"),
            stage: StageKind::default(),
        }
    }
}

impl GameConfig {
    /// Build a configuration from `AOZORA_*` environment variables
    ///
    /// Unset variables keep their defaults, invalid ones are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_MAGNIFICATION) {
            match parse_magnification(&raw) {
                Some(value) => config.magnification = value,
                None => log::warn!(
                    "Ignoring {}={:?}: expected an integer between 1 and {}",
                    ENV_MAGNIFICATION,
                    raw,
                    MAX_MAGNIFICATION
                ),
            }
        }

        if let Some(raw) = lookup(ENV_ASSETS) {
            if raw.trim().is_empty() {
                log::warn!("Ignoring empty {}", ENV_ASSETS);
            } else {
                config.asset_dir = PathBuf::from(raw);
            }
        }

        if let Some(raw) = lookup(ENV_STAGE) {
            match StageKind::parse(&raw) {
                Some(stage) => config.stage = stage,
                None => log::warn!(
                    "Ignoring {}={:?}: expected \"tiles\" or \"flat\"",
                    ENV_STAGE,
                    raw
                ),
            }
        }

        config
    }

    /// Window size in logical pixels
    pub fn window_size(&self) -> (u32, u32) {
        (
            CANVAS_WIDTH as u32 * self.magnification,
            CANVAS_HEIGHT as u32 * self.magnification,
        )
    }
}

fn parse_magnification(raw: &str) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|value| (1..=MAX_MAGNIFICATION).contains(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_derived_constants() {
        assert_eq!(MAP_WIDTH_BLOCK, 20);
        assert_eq!(MAP_HEIGHT_BLOCK, 15);
        assert_eq!(FIELD_HEIGHT_BLOCK, 15);
        assert_eq!(FRAME_DURATION.as_micros(), 16_666);
    }

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.magnification, 1);
        assert_eq!(config.stage, StageKind::Tiles);
        assert_eq!(config.window_size(), (800, 600));
    }

    #[test]
    fn test_config_from_lookup() {
        let config = GameConfig::from_lookup(lookup_from(&[
            (ENV_MAGNIFICATION, "2"),
            (ENV_ASSETS, "/tmp/aozora"),
            (ENV_STAGE, "Flat"),
        ]));
        assert_eq!(config.magnification, 2);
        assert_eq!(config.asset_dir, PathBuf::from("/tmp/aozora"));
        assert_eq!(config.stage, StageKind::Flat);
        assert_eq!(config.window_size(), (1600, 1200));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = GameConfig::from_lookup(lookup_from(&[
            (ENV_MAGNIFICATION, "0"),
            (ENV_ASSETS, "  "),
            (ENV_STAGE, "moon"),
        ]));
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_parse_magnification() {
        assert_eq!(parse_magnification(" 3 "), Some(3));
        assert_eq!(parse_magnification("5"), None);
        assert_eq!(parse_magnification("two"), None);
    }

    #[test]
    fn test_stage_kind_parse() {
        assert_eq!(StageKind::parse("tiles"), Some(StageKind::Tiles));
        assert_eq!(StageKind::parse("PROTOTYPE"), Some(StageKind::Flat));
        assert_eq!(StageKind::parse(""), None);
    }
}
