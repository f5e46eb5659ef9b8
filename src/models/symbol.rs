//! ECC200 symbol size table
//!
//! Every Data Matrix symbol is built from one or more data regions. Each
//! region is framed by a solid "L" (left column and bottom row) and a
//! dotted timing border (top row and right column); the data modules of all
//! regions together form the mapping matrix that the placement algorithm
//! fills with codeword bits.

use serde::Serialize;

/// Geometry and error-correction layout of one ECC200 symbol size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SymbolSize {
    /// Symbol height in modules, finder and timing included
    pub rows: usize,
    /// Symbol width in modules, finder and timing included
    pub cols: usize,
    /// Data module rows inside one region
    pub region_rows: usize,
    /// Data module columns inside one region
    pub region_cols: usize,
    /// Regions across
    pub horizontal_regions: usize,
    /// Regions down
    pub vertical_regions: usize,
    /// Data codewords in the whole symbol
    pub data_codewords: usize,
    /// Error codewords per interleaved block
    pub block_ecc_codewords: usize,
    /// Number of interleaved Reed-Solomon blocks
    pub interleaved_blocks: usize,
}

const fn square(
    size: usize,
    region: usize,
    regions: usize,
    data: usize,
    ecc: usize,
    blocks: usize,
) -> SymbolSize {
    SymbolSize {
        rows: size,
        cols: size,
        region_rows: region,
        region_cols: region,
        horizontal_regions: regions,
        vertical_regions: regions,
        data_codewords: data,
        block_ecc_codewords: ecc,
        interleaved_blocks: blocks,
    }
}

const fn rectangle(
    rows: usize,
    cols: usize,
    region_rows: usize,
    region_cols: usize,
    horizontal_regions: usize,
    data: usize,
    ecc: usize,
) -> SymbolSize {
    SymbolSize {
        rows,
        cols,
        region_rows,
        region_cols,
        horizontal_regions,
        vertical_regions: 1,
        data_codewords: data,
        block_ecc_codewords: ecc,
        interleaved_blocks: 1,
    }
}

/// All ECC200 sizes, squares first in ascending order, then rectangles
pub const SYMBOL_SIZES: [SymbolSize; 30] = [
    square(10, 8, 1, 3, 5, 1),
    square(12, 10, 1, 5, 7, 1),
    square(14, 12, 1, 8, 10, 1),
    square(16, 14, 1, 12, 12, 1),
    square(18, 16, 1, 18, 14, 1),
    square(20, 18, 1, 22, 18, 1),
    square(22, 20, 1, 30, 20, 1),
    square(24, 22, 1, 36, 24, 1),
    square(26, 24, 1, 44, 28, 1),
    square(32, 14, 2, 62, 36, 1),
    square(36, 16, 2, 86, 42, 1),
    square(40, 18, 2, 114, 48, 1),
    square(44, 20, 2, 144, 56, 1),
    square(48, 22, 2, 174, 68, 1),
    square(52, 24, 2, 204, 42, 2),
    square(64, 14, 4, 280, 56, 2),
    square(72, 16, 4, 368, 36, 4),
    square(80, 18, 4, 456, 48, 4),
    square(88, 20, 4, 576, 56, 4),
    square(96, 22, 4, 696, 68, 4),
    square(104, 24, 4, 816, 56, 6),
    square(120, 18, 6, 1050, 68, 6),
    square(132, 20, 6, 1304, 62, 8),
    square(144, 22, 6, 1558, 62, 10),
    rectangle(8, 18, 6, 16, 1, 5, 7),
    rectangle(8, 32, 6, 14, 2, 10, 11),
    rectangle(12, 26, 10, 24, 1, 16, 14),
    rectangle(12, 36, 10, 16, 2, 22, 18),
    rectangle(16, 36, 14, 16, 2, 32, 24),
    rectangle(16, 48, 14, 22, 2, 49, 28),
];

impl SymbolSize {
    /// Look up a size by its module dimensions
    pub fn from_dimensions(rows: usize, cols: usize) -> Option<Self> {
        SYMBOL_SIZES
            .iter()
            .copied()
            .find(|s| s.rows == rows && s.cols == cols)
    }

    /// Smallest square symbol holding `data_len` data codewords
    pub fn smallest_square_for(data_len: usize) -> Option<Self> {
        SYMBOL_SIZES
            .iter()
            .copied()
            .find(|s| s.is_square() && s.data_codewords >= data_len)
    }

    /// Square symbols have equal rows and columns
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Rows of the mapping matrix (data modules only)
    pub fn mapping_rows(&self) -> usize {
        self.region_rows * self.vertical_regions
    }

    /// Columns of the mapping matrix (data modules only)
    pub fn mapping_cols(&self) -> usize {
        self.region_cols * self.horizontal_regions
    }

    /// Error codewords in the whole symbol
    pub fn ecc_codewords(&self) -> usize {
        self.block_ecc_codewords * self.interleaved_blocks
    }

    /// Data plus error codewords
    pub fn total_codewords(&self) -> usize {
        self.data_codewords + self.ecc_codewords()
    }

    /// Data codewords carried by interleaved block `block`.
    ///
    /// Codewords are dealt round-robin, so the first `data % blocks` blocks
    /// carry one extra codeword (only the 144x144 symbol is uneven).
    pub fn block_data_len(&self, block: usize) -> usize {
        let base = self.data_codewords / self.interleaved_blocks;
        let extra = self.data_codewords % self.interleaved_blocks;
        if block < extra { base + 1 } else { base }
    }

    /// Expected colour of a finder, timing or alignment module, `None` for data modules
    pub fn fixed_module(&self, row: usize, col: usize) -> Option<bool> {
        let block_rows = self.region_rows + 2;
        let block_cols = self.region_cols + 2;
        let local_row = row % block_rows;
        let local_col = col % block_cols;

        if local_col == 0 || local_row == block_rows - 1 {
            Some(true)
        } else if local_row == 0 {
            Some(col % 2 == 0)
        } else if local_col == block_cols - 1 {
            Some(row % 2 == 1)
        } else {
            None
        }
    }

    /// Translate a mapping-matrix position into symbol module coordinates
    pub fn mapping_to_symbol(&self, row: usize, col: usize) -> (usize, usize) {
        let symbol_row = (row / self.region_rows) * (self.region_rows + 2) + 1 + row % self.region_rows;
        let symbol_col = (col / self.region_cols) * (self.region_cols + 2) + 1 + col % self.region_cols;
        (symbol_row, symbol_col)
    }
}

impl std::fmt::Display for SymbolSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
