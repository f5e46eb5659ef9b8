//! Perspective mapping between symbol module space and frame pixels

use crate::models::Point;

/// Perspective transformation matrix (3x3, a33 fixed at 1)
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveTransform {
    a11: f32,
    a12: f32,
    a13: f32,
    a21: f32,
    a22: f32,
    a23: f32,
    a31: f32,
    a32: f32,
}

impl PerspectiveTransform {
    /// Create transform from 4 source points to 4 destination points
    pub fn from_points(src: &[Point; 4], dst: &[Point; 4]) -> Option<Self> {
        // Direct linear transform: two equations per correspondence
        let mut a = [[0.0f32; 8]; 8];
        let mut b = [0.0f32; 8];

        for i in 0..4 {
            let (sx, sy) = (src[i].x, src[i].y);
            let (dx, dy) = (dst[i].x, dst[i].y);

            let row = i * 2;
            a[row] = [sx, sy, 1.0, 0.0, 0.0, 0.0, -dx * sx, -dx * sy];
            b[row] = dx;
            a[row + 1] = [0.0, 0.0, 0.0, sx, sy, 1.0, -dy * sx, -dy * sy];
            b[row + 1] = dy;
        }

        solve_linear_system(&a, &b).map(|solution| Self {
            a11: solution[0],
            a12: solution[1],
            a13: solution[2],
            a21: solution[3],
            a22: solution[4],
            a23: solution[5],
            a31: solution[6],
            a32: solution[7],
        })
    }

    /// Map a `cols` x `rows` module grid onto a quadrilateral.
    ///
    /// Grid origin (0, 0) lands on `top_left`, (cols, 0) on `top_right`,
    /// (cols, rows) on `bottom_right` and (0, rows) on `bottom_left`.
    pub fn from_grid(
        cols: usize,
        rows: usize,
        top_left: Point,
        top_right: Point,
        bottom_right: Point,
        bottom_left: Point,
    ) -> Option<Self> {
        let (w, h) = (cols as f32, rows as f32);
        let src = [
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ];
        Self::from_points(&src, &[top_left, top_right, bottom_right, bottom_left])
    }

    /// Transform a point using this perspective matrix
    pub fn transform(&self, p: &Point) -> Option<Point> {
        let denominator = self.a31 * p.x + self.a32 * p.y + 1.0;
        if denominator.abs() < 1e-10 {
            return None;
        }

        let x_new = (self.a11 * p.x + self.a12 * p.y + self.a13) / denominator;
        let y_new = (self.a21 * p.x + self.a22 * p.y + self.a23) / denominator;

        Some(Point::new(x_new, y_new))
    }
}

/// Solve 8x8 linear system using Gaussian elimination with partial pivoting
#[allow(clippy::needless_range_loop)]
fn solve_linear_system(a: &[[f32; 8]; 8], b: &[f32; 8]) -> Option<[f32; 8]> {
    let mut a = *a;
    let mut b = *b;
    let n = 8;

    for i in 0..n {
        let mut max_val = a[i][i].abs();
        let mut max_row = i;
        for k in (i + 1)..n {
            if a[k][i].abs() > max_val {
                max_val = a[k][i].abs();
                max_row = k;
            }
        }

        // Singular: degenerate quadrilateral
        if max_val < 1e-10 {
            return None;
        }

        if max_row != i {
            a.swap(i, max_row);
            b.swap(i, max_row);
        }

        for k in (i + 1)..n {
            let factor = a[k][i] / a[i][i];
            b[k] -= factor * b[i];
            for j in i..n {
                a[k][j] -= factor * a[i][j];
            }
        }
    }

    let mut x = [0.0f32; 8];
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum -= a[i][j] * x[j];
        }
        x[i] = sum / a[i][i];
    }

    Some(x)
}
