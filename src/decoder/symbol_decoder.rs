use tracing::trace;

use super::modes::decode_data;
use super::placement::Placement;
use super::reed_solomon::ReedSolomonDecoder;
use crate::models::{BitMatrix, SymbolSize};

/// Payload and error-correction effort of one decoded symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSymbol {
    /// Decoded payload bytes
    pub bytes: Vec<u8>,
    /// Codewords repaired by Reed-Solomon, summed over all blocks
    pub corrections: usize,
}

/// Decodes a sampled module grid of a known symbol size
pub struct SymbolDecoder;

impl SymbolDecoder {
    /// Decode `modules` (x = column, y = row, `true` = dark).
    ///
    /// Fails when any block is uncorrectable, when the total number of
    /// corrections exceeds `corrections_max`, or when the data codewords are
    /// not a valid encodation.
    pub fn decode(
        modules: &BitMatrix,
        size: &SymbolSize,
        corrections_max: Option<usize>,
    ) -> Option<DecodedSymbol> {
        let mut codewords = read_codewords(modules, size);
        let corrections = correct_blocks(&mut codewords, size)?;

        if corrections_max.is_some_and(|max| corrections > max) {
            trace!(size = %size, corrections, ?corrections_max, "correction budget exceeded");
            return None;
        }

        let bytes = decode_data(&codewords[..size.data_codewords])?;
        Some(DecodedSymbol { bytes, corrections })
    }
}

/// Collect the interleaved codeword stream from the data modules
pub fn read_codewords(modules: &BitMatrix, size: &SymbolSize) -> Vec<u8> {
    let placement = Placement::new(size.mapping_rows(), size.mapping_cols());
    let mut codewords = vec![0u8; size.total_codewords()];

    for row in 0..placement.rows() {
        for col in 0..placement.cols() {
            let Some((index, bit)) = placement.slot(row, col) else {
                continue;
            };
            let (symbol_row, symbol_col) = size.mapping_to_symbol(row, col);
            if modules.get(symbol_col, symbol_row) {
                codewords[index] |= 1 << bit;
            }
        }
    }

    codewords
}

/// Indices of block `block`'s codewords within the interleaved stream
pub fn block_indices(size: &SymbolSize, block: usize) -> Vec<usize> {
    let blocks = size.interleaved_blocks;
    let data = (block..size.data_codewords).step_by(blocks);
    let ecc = (0..size.block_ecc_codewords).map(|j| size.data_codewords + block + j * blocks);
    data.chain(ecc).collect()
}

/// Run Reed-Solomon over every interleaved block in place; returns total corrections
fn correct_blocks(codewords: &mut [u8], size: &SymbolSize) -> Option<usize> {
    let decoder = ReedSolomonDecoder::new(size.block_ecc_codewords);
    let mut corrections = 0;

    for block in 0..size.interleaved_blocks {
        let indices = block_indices(size, block);
        let mut buffer: Vec<u8> = indices.iter().map(|&i| codewords[i]).collect();
        match decoder.decode(&mut buffer) {
            Ok(fixed) => corrections += fixed,
            Err(reason) => {
                trace!(size = %size, block, reason, "reed-solomon failed");
                return None;
            }
        }
        for (&i, &value) in indices.iter().zip(buffer.iter()) {
            codewords[i] = value;
        }
    }

    Some(corrections)
}
