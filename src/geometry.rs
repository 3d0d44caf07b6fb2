#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn from_u32(x: u32, y: u32) -> Self {
        Self {
            x: x as f32,
            y: y as f32,
        }
    }

    // Offset by floating point amounts
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    // Distance from this point to another
    pub fn distance_to(self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned rectangle with integral edges, origin at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Rect {
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            right: width,
            bottom: height,
        }
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// Corners in clockwise order (y grows downwards), starting top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::from_u32(self.left, self.top),
            Point::from_u32(self.right, self.top),
            Point::from_u32(self.right, self.bottom),
            Point::from_u32(self.left, self.bottom),
        ]
    }
}

/// Clockwise rotation around a pivot, in screen coordinates (y pointing down).
#[derive(Clone, Copy, Debug)]
pub struct Rotation {
    pub angle_degrees: f32,
    pub pivot: Point,
}

impl Rotation {
    pub fn new(angle_degrees: f32, pivot: Point) -> Self {
        Self {
            angle_degrees,
            pivot,
        }
    }

    // With y pointing down the standard matrix turns positive angles clockwise:
    // [cos  -sin] [dx]
    // [sin   cos] [dy]
    pub fn apply(&self, point: Point) -> Point {
        let (sin_a, cos_a) = self.angle_degrees.to_radians().sin_cos();
        let dx = point.x - self.pivot.x;
        let dy = point.y - self.pivot.y;

        Point {
            x: self.pivot.x + dx * cos_a - dy * sin_a,
            y: self.pivot.y + dx * sin_a + dy * cos_a,
        }
    }
}

/// Closed quadrilateral, the shape of every hand.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Polygon {
    pub points: [Point; 4],
}

impl Polygon {
    pub fn from_rect(rect: &Rect) -> Self {
        Self {
            points: rect.corners(),
        }
    }

    pub fn rotated(self, rotation: &Rotation) -> Self {
        Self {
            points: self.points.map(|p| rotation.apply(p)),
        }
    }

    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self {
            points: self.points.map(|p| p.offset(dx, dy)),
        }
    }

    /// Shoelace area. Positive for clockwise winding on a y-down surface.
    pub fn signed_area(&self) -> f32 {
        let mut sum = 0.0;
        for i in 0..4 {
            let a = self.points[i];
            let b = self.points[(i + 1) % 4];
            sum += a.x * b.y - b.x * a.y;
        }
        sum / 2.0
    }

    pub fn is_degenerate(&self) -> bool {
        self.signed_area().abs() < f32::EPSILON
    }

    /// Inside test for a convex polygon of either winding.
    pub fn contains(&self, p: Point) -> bool {
        let mut has_neg = false;
        let mut has_pos = false;

        for i in 0..4 {
            let a = self.points[i];
            let b = self.points[(i + 1) % 4];
            let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
            if cross < 0.0 {
                has_neg = true;
            } else if cross > 0.0 {
                has_pos = true;
            }
        }

        !(has_neg && has_pos)
    }

    /// Distance from `p` to the nearest edge of a convex polygon of either
    /// winding. Positive inside, negative outside.
    pub fn edge_distance(&self, p: Point) -> f32 {
        let winding = self.signed_area().signum();
        let mut nearest = f32::INFINITY;

        for i in 0..4 {
            let a = self.points[i];
            let b = self.points[(i + 1) % 4];
            let length = a.distance_to(&b);
            if length < f32::EPSILON {
                continue;
            }
            let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
            nearest = nearest.min(winding * cross / length);
        }

        nearest
    }

    /// Smallest (min, max) pair enclosing every corner.
    pub fn bounds(&self) -> (Point, Point) {
        let mut min = self.points[0];
        let mut max = self.points[0];
        for p in &self.points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn approx_eq(a: Point, b: Point) -> bool {
        a.distance_to(&b) < EPSILON
    }

    #[test]
    fn quarter_turn_is_clockwise() {
        let rotation = Rotation::new(90.0, Point::new(0.0, 0.0));
        // Up on screen turns into right
        let p = rotation.apply(Point::new(0.0, -1.0));
        assert!(approx_eq(p, Point::new(1.0, 0.0)), "{p:?}");
    }

    #[test]
    fn rotation_keeps_pivot_fixed() {
        let pivot = Point::new(3.0, 7.0);
        let rotation = Rotation::new(137.0, pivot);
        assert!(approx_eq(rotation.apply(pivot), pivot));
    }

    #[test]
    fn rect_corners_wind_clockwise() {
        let polygon = Polygon::from_rect(&Rect::from_size(4, 10));
        assert_eq!(polygon.signed_area(), 40.0);
        assert!(!polygon.is_degenerate());
    }

    #[test]
    fn contains_ignores_winding() {
        let polygon = Polygon::from_rect(&Rect::from_size(4, 4));
        let mut reversed = polygon;
        reversed.points.reverse();

        for poly in [polygon, reversed] {
            assert!(poly.contains(Point::new(2.0, 2.0)));
            assert!(!poly.contains(Point::new(5.0, 2.0)));
        }
    }

    #[test]
    fn edge_distance_is_signed() {
        let polygon = Polygon::from_rect(&Rect::from_size(4, 6));
        let mut reversed = polygon;
        reversed.points.reverse();

        for poly in [polygon, reversed] {
            assert!((poly.edge_distance(Point::new(1.0, 3.0)) - 1.0).abs() < EPSILON);
            assert!((poly.edge_distance(Point::new(2.0, 0.5)) - 0.5).abs() < EPSILON);
            assert!((poly.edge_distance(Point::new(4.25, 3.0)) + 0.25).abs() < EPSILON);
        }
    }

    #[test]
    fn empty_rect_is_degenerate() {
        assert!(Polygon::from_rect(&Rect::from_size(0, 12)).is_degenerate());
        assert!(Polygon::default().is_degenerate());
    }

    #[test]
    fn bounds_of_rotated_square() {
        let square = Polygon::from_rect(&Rect::from_size(2, 2));
        let rotated = square.rotated(&Rotation::new(45.0, Point::new(1.0, 1.0)));
        let (min, max) = rotated.bounds();
        let half_diag = 2f32.sqrt();
        assert!(approx_eq(min, Point::new(1.0 - half_diag, 1.0 - half_diag)));
        assert!(approx_eq(max, Point::new(1.0 + half_diag, 1.0 + half_diag)));
    }
}
