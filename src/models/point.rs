use serde::Serialize;

/// 2D point with floating point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point
    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Multiply both coordinates by `factor`
    pub fn scale(&self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Z component of the cross product of `(a - self)` and `(b - self)`
    pub fn cross(&self, a: &Point, b: &Point) -> f32 {
        (a.x - self.x) * (b.y - self.y) - (a.y - self.y) * (b.x - self.x)
    }
}

/// True when `p` lies inside (or on the edge of) the convex quadrilateral `quad`.
///
/// The corners may be given in either winding order.
pub fn quad_contains(quad: &[Point; 4], p: &Point) -> bool {
    let mut positive = false;
    let mut negative = false;
    for i in 0..4 {
        let c = quad[i].cross(&quad[(i + 1) % 4], p);
        if c > 0.0 {
            positive = true;
        } else if c < 0.0 {
            negative = true;
        }
    }
    !(positive && negative)
}
