//! Orientation and oriented bounding box of a candidate component
//!
//! A Data Matrix outline is a rectangle whose finder edges are long runs of
//! boundary pixels. The coarse angle comes from Sobel gradients folded modulo
//! 90 degrees; it is then refined by maximizing how many boundary pixels sit on
//! two adjacent sides of the oriented box.

use crate::models::Point;

/// Coarse search half-span and step, then fine search, in degrees
const REFINE_PASSES: [(f64, f64); 2] = [(12.0, 0.5), (0.5, 0.05)];

/// Dominant edge direction (radians, in (-pi/4, pi/4]) from Sobel gradients at `points`.
///
/// `gray` is the search plane. Points on the plane border carry no gradient.
pub fn dominant_angle(gray: &[u8], width: usize, height: usize, points: &[Point]) -> f64 {
    let px = |x: usize, y: usize| gray[y * width + x] as f64;
    let mut sum_sin = 0.0f64;
    let mut sum_cos = 0.0f64;

    for p in points {
        let (x, y) = (p.x as usize, p.y as usize);
        if x == 0 || y == 0 || x + 1 >= width || y + 1 >= height {
            continue;
        }
        let gx = (px(x + 1, y - 1) + 2.0 * px(x + 1, y) + px(x + 1, y + 1))
            - (px(x - 1, y - 1) + 2.0 * px(x - 1, y) + px(x - 1, y + 1));
        let gy = (px(x - 1, y + 1) + 2.0 * px(x, y + 1) + px(x + 1, y + 1))
            - (px(x - 1, y - 1) + 2.0 * px(x, y - 1) + px(x + 1, y - 1));
        let magnitude = gx.hypot(gy);
        if magnitude == 0.0 {
            continue;
        }
        let phi = gy.atan2(gx);
        sum_cos += magnitude * (4.0 * phi).cos();
        sum_sin += magnitude * (4.0 * phi).sin();
    }

    if sum_sin == 0.0 && sum_cos == 0.0 {
        return 0.0;
    }
    sum_sin.atan2(sum_cos) / 4.0
}

/// Extents of `points` projected on the axes rotated by `theta`
#[derive(Debug, Clone, Copy)]
struct Extents {
    min_u: f64,
    max_u: f64,
    min_v: f64,
    max_v: f64,
}

fn project(p: &Point, cos: f64, sin: f64) -> (f64, f64) {
    let (x, y) = (p.x as f64, p.y as f64);
    (x * cos + y * sin, -x * sin + y * cos)
}

fn extents(points: &[Point], cos: f64, sin: f64) -> Extents {
    let mut e = Extents {
        min_u: f64::INFINITY,
        max_u: f64::NEG_INFINITY,
        min_v: f64::INFINITY,
        max_v: f64::NEG_INFINITY,
    };
    for p in points {
        let (u, v) = project(p, cos, sin);
        e.min_u = e.min_u.min(u);
        e.max_u = e.max_u.max(u);
        e.min_v = e.min_v.min(v);
        e.max_v = e.max_v.max(v);
    }
    e
}

/// Largest count of boundary points lying within one pixel of two adjacent box sides
pub fn edge_score(points: &[Point], theta: f64) -> usize {
    let (sin, cos) = theta.sin_cos();
    let e = extents(points, cos, sin);

    // Sides in cyclic order: left, bottom, right, top
    let mut counts = [0usize; 4];
    for p in points {
        let (u, v) = project(p, cos, sin);
        if u - e.min_u < 1.0 {
            counts[0] += 1;
        }
        if e.max_v - v < 1.0 {
            counts[1] += 1;
        }
        if e.max_u - u < 1.0 {
            counts[2] += 1;
        }
        if v - e.min_v < 1.0 {
            counts[3] += 1;
        }
    }

    (0..4).map(|i| counts[i] + counts[(i + 1) % 4]).max().unwrap_or(0)
}

/// Refine a coarse angle by local search on [`edge_score`]
pub fn refine_angle(points: &[Point], coarse: f64) -> f64 {
    let mut best = coarse;
    let mut best_score = edge_score(points, coarse);

    for (span, step) in REFINE_PASSES {
        let center = best;
        let steps = (span / step).round() as i32;
        for i in -steps..=steps {
            let theta = center + (i as f64 * step).to_radians();
            let score = edge_score(points, theta);
            if score > best_score {
                best_score = score;
                best = theta;
            }
        }
    }

    best
}

/// Corners of the box around `points` aligned to `theta`, padded by half a pixel.
///
/// Returned cyclically: (min u, min v), (max u, min v), (max u, max v), (min u, max v).
pub fn oriented_corners(points: &[Point], theta: f64) -> [Point; 4] {
    let (sin, cos) = theta.sin_cos();
    let e = extents(points, cos, sin);
    let pad = 0.5 * (cos.abs() + sin.abs());
    let (min_u, max_u) = (e.min_u - pad, e.max_u + pad);
    let (min_v, max_v) = (e.min_v - pad, e.max_v + pad);

    let back = |u: f64, v: f64| Point::new((u * cos - v * sin) as f32, (u * sin + v * cos) as f32);
    [
        back(min_u, min_v),
        back(max_u, min_v),
        back(max_u, max_v),
        back(min_u, max_v),
    ]
}
