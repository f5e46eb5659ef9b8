//! Utility functions for image processing
//!
//! This module provides helper functions for Data Matrix detection:
//! - Grayscale conversion (packed RGB to luminance, rayon for large frames)
//! - Binarization (Otsu's method, threshold-based and adaptive mean)
//! - Box downsampling for the search plane
//! - Geometry (perspective transforms)

/// Otsu, global and adaptive thresholding
pub mod binarization;
/// Perspective transforms
pub mod geometry;
/// RGB to luma conversion
pub mod grayscale;
/// Search plane downsampling
pub mod shrink;
