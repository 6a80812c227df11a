// Character animation state

use std::f32::consts::PI;

/// Which movement the character is animating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Animation {
    /// At rest on the floor
    #[default]
    Standing,
    /// Moving at walking pace, also used right after landing
    Walking,
    Running,
    /// Airborne after a jump until the landing finishes
    Jumping,
}

impl Animation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Standing => "standing",
            Self::Walking => "walking",
            Self::Running => "running",
            Self::Jumping => "jumping",
        }
    }
}

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Heading angle in radians
    pub fn angle(&self) -> f32 {
        match self {
            Self::Right => 0.0,
            Self::Left => PI,
        }
    }

    /// Facing implied by a heading vector's horizontal component
    pub fn from_vector_x(x: f32) -> Self {
        if x < 0.0 {
            Self::Left
        } else {
            Self::Right
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_animation() {
        assert_eq!(Animation::default(), Animation::Standing);
        assert_eq!(Animation::Jumping.name(), "jumping");
    }

    #[test]
    fn test_facing_angle_round_trip() {
        for facing in [Facing::Right, Facing::Left] {
            assert_eq!(Facing::from_vector_x(facing.angle().cos()), facing);
        }
    }
}
