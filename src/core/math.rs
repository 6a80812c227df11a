// Math utilities: positions and sub-pixel fixed point

/// Number of fractional bits in sub-pixel coordinates (1px == 32 units)
pub const SUBPIXEL_SHIFT: i32 = 5;

/// Convert whole pixels to sub-pixel units
pub fn to_subpixel(px: i32) -> i32 {
    px << SUBPIXEL_SHIFT
}

/// Convert sub-pixel units to whole pixels, flooring toward negative infinity
pub fn from_subpixel(value: i32) -> i32 {
    value >> SUBPIXEL_SHIFT
}

/// A 2D position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position<T> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> Position<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Update only the provided axes
    pub fn set(&mut self, x: Option<T>, y: Option<T>) {
        if let Some(x) = x {
            self.x = x;
        }
        if let Some(y) = y {
            self.y = y;
        }
    }
}

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
