// Decorative background: drifting star lights and a pulsing radial flash

use crate::core::config::{
    BACKGROUND_LIGHT_MAX_COUNT, BACKGROUND_LIGHT_MAX_SIZE, BACKGROUND_LIGHT_MAX_SPEED,
    CANVAS_HEIGHT, CANVAS_WIDTH,
};
use crate::core::math::{lerp, Position};
use crate::engine::renderer::{Canvas, Color, ColorError, RadialGradient};
use glam::Vec2;

/// Star color
pub const LIGHT_COLOR: &str = "#242833";
/// Core, middle band and rim of the flash
pub const FLASH_COLORS: [&str; 3] = ["#fff", "#051E4E", "#4A5267"];

const LIGHT_MIN_SIZE: f32 = 1.0;
const LIGHT_MIN_SPEED: f32 = 0.4;

/// A small light drifting up the screen, wrapping to the bottom
#[derive(Debug, Clone, PartialEq)]
pub struct BgLight {
    pub size: f32,
    pub speed: f32,
    pub color: Color,
    pub position: Position<f32>,
}

impl BgLight {
    pub fn new(size: f32, speed: f32, color: Color) -> Self {
        Self {
            size,
            speed,
            color,
            position: Position::new(0.0, 0.0),
        }
    }

    pub fn set(&mut self, x: f32, y: f32) {
        self.position.set(Some(x), Some(y));
    }

    /// Move up by `speed`; once fully above the top edge, restart at the bottom
    pub fn update(&mut self) {
        self.position.y -= self.speed;
        if self.position.y + self.size < 0.0 {
            self.position.y = CANVAS_HEIGHT as f32;
        }
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.fill_circle(
            self.position.x - self.size / 2.0,
            self.position.y - self.size / 2.0,
            self.size,
            self.color,
        );
    }
}

/// The star field behind the stage
pub struct StarField {
    lights: Vec<BgLight>,
}

impl StarField {
    /// Scatter `count` lights with random size, speed and position
    pub fn new(count: usize, color: Color, rng: &mut fastrand::Rng) -> Self {
        let lights = (0..count)
            .map(|_| {
                let size = lerp(LIGHT_MIN_SIZE, BACKGROUND_LIGHT_MAX_SIZE, rng.f32());
                let speed = lerp(LIGHT_MIN_SPEED, BACKGROUND_LIGHT_MAX_SPEED, rng.f32());
                let mut light = BgLight::new(size, speed, color);
                light.set(
                    rng.f32() * CANVAS_WIDTH as f32,
                    rng.f32() * CANVAS_HEIGHT as f32,
                );
                light
            })
            .collect();
        Self { lights }
    }

    /// The standard field of `BACKGROUND_LIGHT_MAX_COUNT` lights
    pub fn standard(rng: &mut fastrand::Rng) -> Result<Self, ColorError> {
        let color = Color::from_hex(LIGHT_COLOR)?;
        Ok(Self::new(BACKGROUND_LIGHT_MAX_COUNT, color, rng))
    }

    pub fn update(&mut self) {
        for light in &mut self.lights {
            light.update();
        }
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        for light in &self.lights {
            light.draw(canvas);
        }
    }
}

/// A radial light whose reach and inner color band breathe over time
#[derive(Debug, Clone, PartialEq)]
pub struct BgFlash {
    pub start: Vec2,
    pub start_radius: f32,
    pub end: Vec2,
    pub end_radius: f32,
    pub colors: [Color; 3],
    pub color_stop1: f32,
    pub color_stop2: f32,
    frame: u32,
}

impl BgFlash {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start: Vec2,
        start_radius: f32,
        end: Vec2,
        end_radius: f32,
        colors: [Color; 3],
        color_stop1: f32,
        color_stop2: f32,
    ) -> Self {
        Self {
            start,
            start_radius,
            end,
            end_radius,
            colors,
            color_stop1,
            color_stop2,
            frame: 0,
        }
    }

    /// White core fading through deep blue into the sky color
    pub fn standard() -> Result<Self, ColorError> {
        let [core, band, rim] = FLASH_COLORS;
        Ok(Self::new(
            Vec2::new(100.0, 100.0),
            16.0,
            Vec2::new(100.0, 100.0),
            300.0,
            [
                Color::from_hex(core)?,
                Color::from_hex(band)?,
                Color::from_hex(rim)?,
            ],
            0.3,
            1.0,
        ))
    }

    /// Outer radius at the current frame
    pub fn radius(&self) -> f32 {
        self.end_radius + (self.frame as f32 / 160.0).sin() * 120.0
    }

    /// Offset of the middle color stop at the current frame
    pub fn middle_stop(&self) -> f32 {
        self.color_stop1 + (self.frame as f32 / 120.0).sin() * 0.2
    }

    /// Gradient for the current frame
    pub fn gradient(&self) -> RadialGradient {
        RadialGradient::new(self.start, self.start_radius, self.end, self.radius())
            .with_stop(0.0, self.colors[0])
            .with_stop(self.middle_stop(), self.colors[1])
            .with_stop(self.color_stop2, self.colors[2])
    }

    /// Draw the current frame, then advance
    pub fn update(&mut self, canvas: &mut Canvas) {
        let gradient = self.gradient();
        canvas.fill_circle_gradient(self.start.x, self.start.y, self.radius(), &gradient);
        self.frame = self.frame.wrapping_add(1);
    }
}
