//! Data Matrix decoding modules
//!
//! This module contains all the logic for decoding a symbol after its module
//! grid has been sampled:
//! - Module placement (codeword bit positions in the mapping matrix)
//! - Error correction (Reed-Solomon over GF(256), interleaved blocks)
//! - Data encodation decoding (ASCII, C40, Text, X12, EDIFACT, Base 256)

/// Data encodation decoders
pub mod modes;
/// Codeword bit placement in the mapping matrix
pub mod placement;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Sampled grid to payload bytes
pub mod symbol_decoder;

pub use symbol_decoder::{DecodedSymbol, SymbolDecoder};
