// Fixed-cell sprite sheets

use super::{AssetError, AssetLoader};
use crate::engine::renderer::{Canvas, Color};
use image::{Rgba, RgbaImage};

/// An image cut into equal cells, numbered left to right, top to bottom
pub struct SpriteSheet {
    image: RgbaImage,
    cell_width: u32,
    cell_height: u32,
    columns: u32,
}

impl SpriteSheet {
    pub fn new(
        name: &str,
        image: RgbaImage,
        cell_width: u32,
        cell_height: u32,
    ) -> Result<Self, AssetError> {
        if cell_width == 0 || cell_height == 0 {
            return Err(AssetError::InvalidSheet {
                name: name.to_string(),
                reason: "zero cell size".to_string(),
            });
        }
        let columns = image.width() / cell_width;
        if columns == 0 || image.height() < cell_height {
            return Err(AssetError::InvalidSheet {
                name: name.to_string(),
                reason: format!(
                    "{}x{} image is smaller than one {}x{} cell",
                    image.width(),
                    image.height(),
                    cell_width,
                    cell_height
                ),
            });
        }
        Ok(Self {
            image,
            cell_width,
            cell_height,
            columns,
        })
    }

    /// Load `name`, falling back to `placeholder` when it is missing or unusable
    pub fn load_or_placeholder<F>(
        loader: &AssetLoader,
        name: &str,
        cell_width: u32,
        cell_height: u32,
        placeholder: F,
    ) -> Self
    where
        F: FnOnce() -> Self,
    {
        let loaded = loader
            .load_image(name)
            .and_then(|image| Self::new(name, image, cell_width, cell_height));
        match loaded {
            Ok(sheet) => sheet,
            Err(err) => {
                log::warn!("{}; using generated placeholder for {}", err, name);
                placeholder()
            }
        }
    }

    /// Generated sheet of `columns`x`rows` cells, each a framed tile of `base`
    pub fn placeholder(cell_width: u32, cell_height: u32, columns: u32, rows: u32, base: Color) -> Self {
        let cell_width = cell_width.max(1);
        let cell_height = cell_height.max(1);
        let columns = columns.max(1);
        let rows = rows.max(1);
        let mut image = RgbaImage::new(cell_width * columns, cell_height * rows);

        for index in 0..columns * rows {
            // Alternate the shade so neighbouring cells stay distinguishable
            let shade = match index % 3 {
                0 => base,
                1 => base.lerp(Color::WHITE, 0.25),
                _ => base.lerp(Color::BLACK, 0.25),
            };
            let edge = base.lerp(Color::BLACK, 0.5);
            let ox = (index % columns) * cell_width;
            let oy = (index / columns) * cell_height;
            for y in 0..cell_height {
                for x in 0..cell_width {
                    let border =
                        x == 0 || y == 0 || x + 1 == cell_width || y + 1 == cell_height;
                    let color = if border { edge } else { shade };
                    image.put_pixel(ox + x, oy + y, Rgba(color.to_array()));
                }
            }
        }

        Self {
            image,
            cell_width,
            cell_height,
            columns,
        }
    }

    /// Top-left pixel of cell `index`
    pub fn cell_origin(&self, index: u32) -> (i32, i32) {
        (
            ((index % self.columns) * self.cell_width) as i32,
            ((index / self.columns) * self.cell_height) as i32,
        )
    }

    /// Draw a `width`x`height` region starting at cell `index`
    pub fn draw(&self, canvas: &mut Canvas, index: u32, width: i32, height: i32, x: i32, y: i32) {
        let (sx, sy) = self.cell_origin(index);
        canvas.draw_image(&self.image, sx, sy, width, height, x, y);
    }
}
