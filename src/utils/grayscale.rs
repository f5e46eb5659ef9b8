//! Convert packed RGB frames to a luma plane
//! Y = 0.299*R + 0.587*G + 0.114*B
//! Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8
//!
//! Frames above `PARALLEL_MIN_PIXELS` are converted with a rayon fork-join over
//! rows; the join completes before the caller regains control.

use std::collections::TryReserveError;

use rayon::prelude::*;

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Frames with at least this many pixels are converted in parallel
pub const PARALLEL_MIN_PIXELS: usize = 2_000_000;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32) >> 8) as u8
}

/// Convert RGB image to grayscale, picking the parallel path for large frames
pub fn rgb_to_grayscale(
    rgb: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, TryReserveError> {
    let pixel_count = width * height;
    let mut gray = Vec::new();
    gray.try_reserve_exact(pixel_count)?;
    gray.resize(pixel_count, 0);

    if pixel_count >= PARALLEL_MIN_PIXELS {
        rgb_to_grayscale_parallel_into(rgb, width, &mut gray);
    } else {
        rgb_to_grayscale_into(rgb, &mut gray);
    }
    Ok(gray)
}

/// Scalar conversion into a pre-sized buffer
pub fn rgb_to_grayscale_into(rgb: &[u8], output: &mut [u8]) {
    for (out, px) in output.iter_mut().zip(rgb.chunks_exact(3)) {
        *out = luma(px[0], px[1], px[2]);
    }
}

/// Row-parallel conversion into a pre-sized buffer
pub fn rgb_to_grayscale_parallel_into(rgb: &[u8], width: usize, output: &mut [u8]) {
    if width == 0 {
        return;
    }
    output
        .par_chunks_mut(width)
        .zip(rgb.par_chunks(width * 3))
        .for_each(|(row, src)| rgb_to_grayscale_into(src, row));
}
