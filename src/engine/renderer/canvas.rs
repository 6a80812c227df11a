// Virtual screen: a CPU pixel buffer the game draws into each tick

use super::color::Color;
use super::font;
use super::gradient::RadialGradient;
use glam::Vec2;
use image::{Rgba, RgbaImage};

/// Off-screen RGBA surface with source-over blending and clipping
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw RGBA8 rows, top to bottom
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width() && y < self.height() {
            let Rgba([r, g, b, a]) = *self.image.get_pixel(x, y);
            Some(Color::rgba(r, g, b, a))
        } else {
            None
        }
    }

    /// Overwrite every pixel
    pub fn clear(&mut self, color: Color) {
        let rgba = Rgba(color.to_array());
        for pixel in self.image.pixels_mut() {
            *pixel = rgba;
        }
    }

    /// Blend a color over one pixel; out-of-bounds coordinates are ignored
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if color.a == 0 || x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32
        {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        if color.is_opaque() {
            *dst = Rgba(color.to_array());
            return;
        }

        let sa = color.a as f32 / 255.0;
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            *dst = Rgba([0, 0, 0, 0]);
            return;
        }
        let channel = |s: u8, d: u8| {
            ((s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a).round() as u8
        };
        *dst = Rgba([
            channel(color.r, dst[0]),
            channel(color.g, dst[1]),
            channel(color.b, dst[2]),
            (out_a * 255.0).round() as u8,
        ]);
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        let (x0, x1) = (x.max(0), (x + width).min(self.width() as i32));
        let (y0, y1) = (y.max(0), (y + height).min(self.height() as i32));
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px, py, color);
            }
        }
    }

    /// Fill a disc; a pixel is covered when its center lies inside the radius
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.fill_circle_by(cx, cy, radius, |_| color);
    }

    /// Fill a disc, coloring each covered pixel from a radial gradient
    pub fn fill_circle_gradient(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        gradient: &RadialGradient,
    ) {
        self.fill_circle_by(cx, cy, radius, |point| gradient.color_at(point));
    }

    fn fill_circle_by<F>(&mut self, cx: f32, cy: f32, radius: f32, shade: F)
    where
        F: Fn(Vec2) -> Color,
    {
        if radius <= 0.0 {
            return;
        }
        let x0 = ((cx - radius).floor() as i32).max(0);
        let x1 = ((cx + radius).ceil() as i32).min(self.width() as i32);
        let y0 = ((cy - radius).floor() as i32).max(0);
        let y1 = ((cy + radius).ceil() as i32).min(self.height() as i32);
        let center = Vec2::new(cx, cy);
        let radius_sq = radius * radius;

        for py in y0..y1 {
            for px in x0..x1 {
                let point = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                if point.distance_squared(center) <= radius_sq {
                    self.blend_pixel(px, py, shade(point));
                }
            }
        }
    }

    /// Copy a `width`x`height` region at (`sx`, `sy`) of `source` to (`dx`, `dy`)
    ///
    /// Source pixels outside the image are skipped. No filtering is applied.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_image(
        &mut self,
        source: &RgbaImage,
        sx: i32,
        sy: i32,
        width: i32,
        height: i32,
        dx: i32,
        dy: i32,
    ) {
        for row in 0..height {
            let src_y = sy + row;
            let dst_y = dy + row;
            if src_y < 0 || src_y >= source.height() as i32 {
                continue;
            }
            if dst_y < 0 || dst_y >= self.height() as i32 {
                continue;
            }
            for col in 0..width {
                let src_x = sx + col;
                if src_x < 0 || src_x >= source.width() as i32 {
                    continue;
                }
                let Rgba([r, g, b, a]) = *source.get_pixel(src_x as u32, src_y as u32);
                self.blend_pixel(dx + col, dst_y, Color::rgba(r, g, b, a));
            }
        }
    }

    /// Draw text with its baseline at `baseline_y`
    pub fn fill_text(&mut self, text: &str, x: i32, baseline_y: i32, scale: i32, color: Color) {
        let scale = scale.max(1);
        let top = baseline_y - font::GLYPH_HEIGHT * scale;
        let mut pen_x = x;

        for c in text.chars() {
            if let Some(rows) = font::glyph(c) {
                for row in 0..font::GLYPH_HEIGHT {
                    for col in 0..font::GLYPH_WIDTH {
                        if font::is_lit(&rows, col, row) {
                            self.fill_rect(
                                pen_x + col * scale,
                                top + row * scale,
                                scale,
                                scale,
                                color,
                            );
                        }
                    }
                }
            }
            pen_x += font::GLYPH_ADVANCE * scale;
        }
    }
}
