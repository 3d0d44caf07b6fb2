use super::geometry::{Point, Polygon, Rect, Rotation};

/// Drawable area after padding, the reference for all proportional sizing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }
}

/// Hands in draw order: later ones are painted over earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandKind {
    Second,
    Minute,
    Hour,
}

impl HandKind {
    pub const ALL: [HandKind; 3] = [HandKind::Second, HandKind::Minute, HandKind::Hour];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn spec(self) -> HandSpec {
        match self {
            Self::Second => HandSpec {
                half_width_coefficient: 1,
                protruding_coefficient: 10,
                height_coefficient: 1.0,
            },
            Self::Minute => HandSpec {
                half_width_coefficient: 2,
                protruding_coefficient: 10,
                height_coefficient: 0.75,
            },
            Self::Hour => HandSpec {
                half_width_coefficient: 4,
                protruding_coefficient: 10,
                height_coefficient: 0.5,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandSpec {
    pub half_width_coefficient: u32,
    pub protruding_coefficient: u32,
    /// Fraction of half the surface height used as the main length
    pub height_coefficient: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Minimums {
    pub half_width: u32,
    pub protruding_length: u32,
}

/// Half-width always scales with the width and the tail with the height,
/// whatever the aspect ratio.
pub fn compute_minimums(surface: &Surface) -> Minimums {
    Minimums {
        half_width: surface.width / 200,
        protruding_length: surface.height / 200,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HandState {
    pub half_width: u32,
    pub protruding_length: u32,
    /// Unrotated hand, tip at the top, tail at the bottom
    pub rect: Rect,
    pub angle_degrees: f32,
    pub polygon: Polygon,
}

impl HandState {
    pub fn length(&self) -> u32 {
        self.rect.bottom
    }

    /// Where the rotation center sits inside `rect`.
    pub fn pivot(&self) -> Point {
        Point::from_u32(
            self.half_width,
            self.rect.bottom.saturating_sub(self.protruding_length),
        )
    }
}

pub fn update_hand_state(spec: &HandSpec, surface: &Surface) -> HandState {
    let minimums = compute_minimums(surface);
    let half_width = minimums.half_width * spec.half_width_coefficient;
    let protruding_length = minimums.protruding_length * spec.protruding_coefficient;
    let length =
        (surface.center().y * spec.height_coefficient + protruding_length as f32) as u32;

    HandState {
        half_width,
        protruding_length,
        rect: Rect::from_size(half_width * 2, length),
        ..HandState::default()
    }
}

/// Always starts from the unrotated rectangle so repeated ticks never drift.
pub fn rotate_and_place(hand: &HandState, angle_degrees: f32, surface: &Surface) -> Polygon {
    let pivot = hand.pivot();
    let center = surface.center();

    Polygon::from_rect(&hand.rect)
        .rotated(&Rotation::new(angle_degrees, pivot))
        .translated(center.x - pivot.x, center.y - pivot.y)
}
