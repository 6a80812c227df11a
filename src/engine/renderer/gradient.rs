// Two-circle radial gradient with canvas-style color stops

use super::color::Color;
use glam::Vec2;

/// A radial gradient between a start circle and an end circle
///
/// Offsets map 0.0 to the start circle and 1.0 to the end circle. Points
/// outside the stop range take the color of the nearest stop.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    start: Vec2,
    start_radius: f32,
    end: Vec2,
    end_radius: f32,
    stops: Vec<(f32, Color)>,
}

impl RadialGradient {
    pub fn new(start: Vec2, start_radius: f32, end: Vec2, end_radius: f32) -> Self {
        Self {
            start,
            start_radius,
            end,
            end_radius,
            stops: Vec::new(),
        }
    }

    /// Add a stop; offsets are clamped to [0, 1] and equal offsets keep insertion order
    pub fn add_color_stop(&mut self, offset: f32, color: Color) {
        let offset = offset.clamp(0.0, 1.0);
        let index = self.stops.partition_point(|(o, _)| *o <= offset);
        self.stops.insert(index, (offset, color));
    }

    pub fn with_stop(mut self, offset: f32, color: Color) -> Self {
        self.add_color_stop(offset, color);
        self
    }

    /// Gradient parameter for `point`, or None where no circle passes through it
    pub fn offset_at(&self, point: Vec2) -> Option<f32> {
        let cd = self.end - self.start;
        let pd = point - self.start;
        let dr = self.end_radius - self.start_radius;

        let a = cd.dot(cd) - dr * dr;
        let b = pd.dot(cd) + self.start_radius * dr;
        let c = pd.dot(pd) - self.start_radius * self.start_radius;

        // Small tolerance so the degenerate zero-radius circle still counts
        let radius_ok = |w: f32| self.start_radius + w * dr >= -1e-3;

        if a.abs() < f32::EPSILON {
            if b.abs() < f32::EPSILON {
                return None;
            }
            let w = c / (2.0 * b);
            return radius_ok(w).then_some(w);
        }

        let discriminant = b * b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let w1 = (b + root) / a;
        let w2 = (b - root) / a;
        let (high, low) = if w1 >= w2 { (w1, w2) } else { (w2, w1) };

        if radius_ok(high) {
            Some(high)
        } else if radius_ok(low) {
            Some(low)
        } else {
            None
        }
    }

    /// Color of the stop ramp at `offset`
    pub fn color_at_offset(&self, offset: f32) -> Color {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Color::TRANSPARENT;
        };
        if offset <= first.0 {
            return first.1;
        }
        if offset >= last.0 {
            return last.1;
        }

        for pair in self.stops.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if offset >= from.0 && offset <= to.0 {
                let span = to.0 - from.0;
                if span <= f32::EPSILON {
                    return to.1;
                }
                return from.1.lerp(to.1, (offset - from.0) / span);
            }
        }
        last.1
    }

    /// Color painted at `point`
    pub fn color_at(&self, point: Vec2) -> Color {
        match self.offset_at(point) {
            Some(offset) => self.color_at_offset(offset),
            None => Color::TRANSPARENT,
        }
    }
}
