use serde::Serialize;

use super::{Point, SymbolSize};

/// Payload decoded from one symbol region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    /// Decoded payload bytes (may be empty)
    pub bytes: Vec<u8>,
    /// Symbol size the region decoded as
    pub symbol: SymbolSize,
    /// Symbol corners in frame pixels: top-left, top-right, bottom-right, bottom-left.
    /// The finder "L" runs along the left and bottom edges.
    pub corners: [Point; 4],
    /// Reed-Solomon symbol corrections applied across all blocks
    pub corrections: usize,
}

impl Message {
    /// Create a message for a decoded region
    pub fn new(bytes: Vec<u8>, symbol: SymbolSize, corners: [Point; 4], corrections: usize) -> Self {
        Self {
            bytes,
            symbol,
            corners,
            corrections,
        }
    }

    /// Centre of the symbol in frame pixels
    pub fn center(&self) -> Point {
        let (sx, sy) = self
            .corners
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / 4.0, sy / 4.0)
    }
}
