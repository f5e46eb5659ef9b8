use std::collections::TryReserveError;

use crate::models::BitMatrix;

/// Local mean must exceed a pixel by this much for the adaptive path to mark it dark
const ADAPTIVE_BIAS: i64 = 10;

/// Convert grayscale image to binary using Otsu's thresholding method
/// Returns a BitMatrix where true = black, false = white
pub fn otsu_binarize(
    gray: &[u8],
    width: usize,
    height: usize,
) -> Result<BitMatrix, TryReserveError> {
    let threshold = otsu_threshold(gray.iter().copied());
    threshold_binarize(gray, width, height, threshold)
}

/// Calculate Otsu's optimal threshold over a stream of intensities.
///
/// Pixels strictly below the returned value belong to the dark class. When
/// every pixel shares one intensity the midpoint 128 is returned.
pub fn otsu_threshold(pixels: impl IntoIterator<Item = u8>) -> u8 {
    let mut histogram = [0u64; 256];
    let mut total = 0u64;
    for pixel in pixels {
        histogram[pixel as usize] += 1;
        total += 1;
    }
    threshold_from_histogram(&histogram, total)
}

fn threshold_from_histogram(histogram: &[u64; 256], total: u64) -> u8 {
    let sum_all: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &count)| i as f64 * count as f64)
        .sum();

    let mut max_variance = 0.0;
    let mut optimal_threshold = 128u8;
    let mut dark_pixels = 0u64;
    let mut dark_sum = 0.0f64;

    for threshold in 1..=255usize {
        dark_pixels += histogram[threshold - 1];
        dark_sum += (threshold - 1) as f64 * histogram[threshold - 1] as f64;

        let light_pixels = total - dark_pixels;
        if dark_pixels == 0 || light_pixels == 0 {
            continue;
        }

        let dark_mean = dark_sum / dark_pixels as f64;
        let light_mean = (sum_all - dark_sum) / light_pixels as f64;
        let variance =
            dark_pixels as f64 * light_pixels as f64 * (dark_mean - light_mean).powi(2);

        if variance > max_variance {
            max_variance = variance;
            optimal_threshold = threshold as u8;
        }
    }

    optimal_threshold
}

/// Simple global threshold binarization
pub fn threshold_binarize(
    gray: &[u8],
    width: usize,
    height: usize,
    threshold: u8,
) -> Result<BitMatrix, TryReserveError> {
    let mut binary = BitMatrix::try_new(width, height)?;

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            binary.set(x, y, gray[idx] < threshold);
        }
    }

    Ok(binary)
}

/// Local-mean binarization over a `window`-sized square, using an integral image.
///
/// Copes with uneven lighting on large frames. Uniformly dark areas wider than
/// the window come out light, which only punches holes into a symbol's
/// component; its outline survives.
pub fn adaptive_binarize(
    gray: &[u8],
    width: usize,
    height: usize,
    window: usize,
) -> Result<BitMatrix, TryReserveError> {
    let mut binary = BitMatrix::try_new(width, height)?;
    let stride = width + 1;
    let mut integral: Vec<u64> = Vec::new();
    integral.try_reserve_exact(stride * (height + 1))?;
    integral.resize(stride * (height + 1), 0);

    for y in 0..height {
        let mut row_sum = 0u64;
        for x in 0..width {
            row_sum += gray[y * width + x] as u64;
            integral[(y + 1) * stride + x + 1] = integral[y * stride + x + 1] + row_sum;
        }
    }

    let half = window.max(1) / 2;
    for y in 0..height {
        let y0 = y.saturating_sub(half);
        let y1 = (y + half + 1).min(height);
        for x in 0..width {
            let x0 = x.saturating_sub(half);
            let x1 = (x + half + 1).min(width);
            let area = ((x1 - x0) * (y1 - y0)) as i64;
            let sum = integral[y1 * stride + x1] + integral[y0 * stride + x0]
                - integral[y0 * stride + x1]
                - integral[y1 * stride + x0];
            let pixel = gray[y * width + x] as i64;
            binary.set(x, y, pixel * area < sum as i64 - ADAPTIVE_BIAS * area);
        }
    }

    Ok(binary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_binarize() {
        let gray = vec![100, 150, 200, 50]; // 2x2 image
        let binary = threshold_binarize(&gray, 2, 2, 128).unwrap();

        // Pixels < 128 should be black (true)
        assert!(binary.get(0, 0)); // 100 < 128
        assert!(!binary.get(1, 0)); // 150 >= 128
        assert!(!binary.get(0, 1)); // 200 >= 128
        assert!(binary.get(1, 1)); // 50 < 128
    }

    #[test]
    fn test_otsu_binarize() {
        // Create a simple two-class image
        let mut gray = vec![50u8; 50]; // Dark class
        gray.extend(vec![200u8; 50]); // Light class

        let binary = otsu_binarize(&gray, 10, 10).unwrap();

        assert!(binary.get(0, 0)); // Dark
        assert!(!binary.get(0, 7)); // Light
    }

    #[test]
    fn test_otsu_threshold_edges() {
        // Pure black and white split right above black
        assert_eq!(otsu_threshold([0u8, 0, 255, 255]), 1);
        // Single intensity falls back to the midpoint
        assert_eq!(otsu_threshold([90u8; 16]), 128);
        assert_eq!(otsu_threshold(std::iter::empty()), 128);
    }

    #[test]
    fn test_adaptive_handles_gradient() {
        // Horizontal lighting ramp with a dark 4x4 block on the bright side
        let (width, height) = (64, 32);
        let mut gray: Vec<u8> = (0..width * height)
            .map(|i| (100 + (i % width) * 2) as u8)
            .collect();
        for y in 14..18 {
            for x in 50..54 {
                gray[y * width + x] = 120;
            }
        }

        let binary = adaptive_binarize(&gray, width, height, 15).unwrap();
        assert!(binary.get(51, 15));
        assert!(!binary.get(5, 5));
        assert!(!binary.get(60, 28));
    }
}
