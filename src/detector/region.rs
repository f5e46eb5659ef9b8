//! Candidate symbol regions and their size/orientation hypotheses

use tracing::trace;

use super::grid::{GrayView, SymbolGrid};
use crate::config::min_pattern_score;
use crate::models::{Point, SYMBOL_SIZES, SymbolSize};
use crate::utils::geometry::PerspectiveTransform;

/// Modules narrower than this many pixels are not sampled reliably
const MIN_MODULE_PIXELS: f32 = 1.0;
/// Accepted ratio of horizontal to vertical module pitch
const MODULE_ASPECT_RANGE: std::ops::RangeInclusive<f32> = 0.6..=1.6;

/// One way of reading a region: which corner holds the finder "L" and which size it is
#[derive(Debug, Clone, Copy)]
pub struct Hypothesis {
    /// Candidate symbol size
    pub size: SymbolSize,
    /// Top-left, top-right, bottom-right, bottom-left in frame pixels
    pub corners: [Point; 4],
    /// Module grid coordinates to frame pixels
    pub transform: PerspectiveTransform,
    /// Fixed-pattern agreement in [0, 1]
    pub score: f32,
}

/// A located candidate symbol inside one frame
#[derive(Debug, Clone)]
pub struct Region {
    /// Oriented bounding box in frame pixels, cyclic order
    pub outline: [Point; 4],
    /// Ranked best first
    pub hypotheses: Vec<Hypothesis>,
    /// Luma threshold separating dark from light modules
    pub threshold: u8,
}

impl Region {
    /// Build the region for `outline`, scoring every corner assignment and size
    pub fn new(gray: GrayView<'_>, outline: [Point; 4], threshold: u8) -> Self {
        let hypotheses = rank_hypotheses(gray, &outline, threshold);
        Self {
            outline,
            hypotheses,
            threshold,
        }
    }
}

fn rank_hypotheses(gray: GrayView<'_>, outline: &[Point; 4], threshold: u8) -> Vec<Hypothesis> {
    let min_score = min_pattern_score();
    let mut ranked = Vec::new();

    for k in 0..4 {
        let bottom_left = outline[k];
        let bottom_right = outline[(k + 3) % 4];
        let top_left = outline[(k + 1) % 4];
        let top_right = outline[(k + 2) % 4];
        let width = bottom_left.distance(&bottom_right);
        let height = bottom_left.distance(&top_left);

        for size in SYMBOL_SIZES {
            let module_w = width / size.cols as f32;
            let module_h = height / size.rows as f32;
            if module_w.min(module_h) < MIN_MODULE_PIXELS
                || !MODULE_ASPECT_RANGE.contains(&(module_w / module_h))
            {
                continue;
            }

            let Some(transform) = PerspectiveTransform::from_grid(
                size.cols,
                size.rows,
                top_left,
                top_right,
                bottom_right,
                bottom_left,
            ) else {
                continue;
            };

            let grid = SymbolGrid::new(gray, transform, size, threshold);
            let Some(score) = grid.fixed_pattern_score() else {
                continue;
            };
            if score < min_score {
                continue;
            }

            ranked.push(Hypothesis {
                size,
                corners: [top_left, top_right, bottom_right, bottom_left],
                transform,
                score,
            });
        }
    }

    // Stable: equal scores keep corner and table order
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    trace!(count = ranked.len(), "ranked symbol hypotheses");
    ranked
}
