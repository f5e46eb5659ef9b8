//! Core data structures shared by detection and decoding

/// Packed bit matrix
pub mod matrix;
/// Decoded symbol payload
pub mod message;
/// 2D points and quad containment
pub mod point;
/// ECC200 symbol size table
pub mod symbol;

pub use matrix::BitMatrix;
pub use message::Message;
pub use point::{Point, quad_contains};
pub use symbol::{SYMBOL_SIZES, SymbolSize};
