//! Module sampling through a perspective-mapped symbol grid

use crate::models::{BitMatrix, Point, SymbolSize};
use crate::utils::geometry::PerspectiveTransform;

/// Luma plane borrowed for sampling
#[derive(Clone, Copy)]
pub struct GrayView<'a> {
    /// Row-major luma
    pub data: &'a [u8],
    /// Plane width
    pub width: usize,
    /// Plane height
    pub height: usize,
}

impl<'a> GrayView<'a> {
    /// View over `data`, which holds `width * height` pixels
    pub fn new(data: &'a [u8], width: usize, height: usize) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// Pixel containing `p`, `None` outside the plane
    pub fn pixel_at(&self, p: &Point) -> Option<u8> {
        if !(p.x >= 0.0 && p.y >= 0.0) {
            return None;
        }
        let (x, y) = (p.x.floor() as usize, p.y.floor() as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }
}

/// A symbol size laid over the frame by a grid-to-pixel transform
pub struct SymbolGrid<'a> {
    gray: GrayView<'a>,
    transform: PerspectiveTransform,
    size: SymbolSize,
    threshold: u8,
}

impl<'a> SymbolGrid<'a> {
    /// Lay `size` over `gray` through `transform`, classifying at `threshold`
    pub fn new(gray: GrayView<'a>, transform: PerspectiveTransform, size: SymbolSize, threshold: u8) -> Self {
        Self {
            gray,
            transform,
            size,
            threshold,
        }
    }

    /// Darkness of module (row, col), sampled at its centre
    pub fn module(&self, row: usize, col: usize) -> Option<bool> {
        let centre = Point::new(col as f32 + 0.5, row as f32 + 0.5);
        let pixel = self.transform.transform(&centre)?;
        self.gray.pixel_at(&pixel).map(|v| v < self.threshold)
    }

    /// Fraction of finder, timing and alignment modules matching their expected colour.
    ///
    /// `None` when any of them falls outside the frame.
    pub fn fixed_pattern_score(&self) -> Option<f32> {
        let mut total = 0usize;
        let mut matching = 0usize;

        for row in 0..self.size.rows {
            for col in 0..self.size.cols {
                let Some(expected) = self.size.fixed_module(row, col) else {
                    continue;
                };
                total += 1;
                if self.module(row, col)? == expected {
                    matching += 1;
                }
            }
        }

        (total > 0).then(|| matching as f32 / total as f32)
    }

    /// Sample every module into a `cols` x `rows` matrix (x = column)
    pub fn sample(&self) -> Option<BitMatrix> {
        let mut modules = BitMatrix::try_new(self.size.cols, self.size.rows).ok()?;
        for row in 0..self.size.rows {
            for col in 0..self.size.cols {
                modules.set(col, row, self.module(row, col)?);
            }
        }
        Some(modules)
    }
}
