// Asset loading functionality

use super::AssetError;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Image,
    Map,
}

impl AssetType {
    /// Get the default directory for this asset type
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::Image => "images",
            AssetType::Map => "maps",
        }
    }
}

/// Asset loader responsible for finding and loading asset files
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path
            .join(asset_type.default_directory())
            .join(name)
    }

    /// Read a text asset
    pub fn load_text(&self, asset_type: AssetType, name: &str) -> Result<String, AssetError> {
        let path = self.resolve_path(asset_type, name);
        if !path.is_file() {
            return Err(AssetError::NotFound(path.display().to_string()));
        }
        Ok(std::fs::read_to_string(&path)?)
    }

    /// Decode an image into RGBA8
    pub fn load_image(&self, name: &str) -> Result<RgbaImage, AssetError> {
        let path = self.resolve_path(AssetType::Image, name);
        if !path.is_file() {
            return Err(AssetError::NotFound(path.display().to_string()));
        }

        let bytes = std::fs::read(&path)?;
        let image = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
            path: path.display().to_string(),
            source,
        })?;

        log::info!(
            "Loaded image {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(image.to_rgba8())
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("aozora-loader-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(dir.join("images")).unwrap();
        std::fs::create_dir_all(dir.join("maps")).unwrap();
        dir
    }

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/assets");
        let path = loader.resolve_path(AssetType::Image, "chara.png");
        assert_eq!(path, PathBuf::from("/game/assets/images/chara.png"));
        assert_eq!(loader.base_path(), Path::new("/game/assets"));
    }

    #[test]
    fn test_missing_image_is_not_found() {
        let loader = AssetLoader::new("/definitely/not/here");
        assert!(matches!(
            loader.load_image("chara.png"),
            Err(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_image_round_trip() {
        let dir = scratch_dir("png");
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(1, 1, image::Rgba([1, 2, 3, 255]));
        img.save(dir.join("images").join("tiny.png")).unwrap();

        let loader = AssetLoader::new(&dir);
        let loaded = loader.load_image("tiny.png").unwrap();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(1, 1).0, [1, 2, 3, 255]);

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_corrupt_image_is_decode_error() {
        let dir = scratch_dir("corrupt");
        std::fs::write(dir.join("images").join("bad.png"), b"not a png").unwrap();

        let loader = AssetLoader::new(&dir);
        assert!(matches!(
            loader.load_image("bad.png"),
            Err(AssetError::Decode { .. })
        ));

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_load_text() {
        let dir = scratch_dir("text");
        std::fs::write(dir.join("maps").join("tiny.txt"), "..\n##\n").unwrap();

        let loader = AssetLoader::new(&dir);
        assert_eq!(loader.load_text(AssetType::Map, "tiny.txt").unwrap(), "..\n##\n");
        assert!(loader.load_text(AssetType::Map, "absent.txt").is_err());

        std::fs::remove_dir_all(dir).ok();
    }
}
