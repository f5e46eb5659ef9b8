//! Data Matrix detection modules
//!
//! This module contains the logic for locating symbols in a frame:
//! - Connected components of the binarized search plane (candidates)
//! - Orientation from edge gradients and outline fitting
//! - Symbol hypotheses scored against the finder and timing patterns
//! - Grid sampling through a perspective transform

/// Dark-pixel components of the search plane
pub mod connected_components;
/// Module sampling through a perspective-mapped grid
pub mod grid;
/// Edge orientation and oriented bounding boxes
pub mod orientation;
/// Candidate regions and ranked size/corner hypotheses
pub mod region;

pub use region::{Hypothesis, Region};
