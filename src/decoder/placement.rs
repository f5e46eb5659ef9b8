//! ECC200 module placement
//!
//! Codeword bits are laid into the mapping matrix in diagonal sweeps of
//! eight-module "utah" shapes, with four special shapes for the corners.
//! Positions falling off an edge wrap to the opposite side.

/// Codeword and bit index (7 = most significant) stored in one module
pub type Slot = (usize, u8);

/// Placement of every codeword bit inside a mapping matrix
#[derive(Debug, Clone)]
pub struct Placement {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Slot>>,
    codewords: usize,
}

impl Placement {
    /// Lay out a `rows` x `cols` mapping matrix
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut placement = Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            codewords: 0,
        };
        if rows >= 4 && cols >= 4 {
            placement.fill();
        }
        placement
    }

    /// Mapping matrix rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Mapping matrix columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of codewords placed
    pub fn codewords(&self) -> usize {
        self.codewords
    }

    /// Slot assigned to module (row, col); `None` for the unused corner modules
    pub fn slot(&self, row: usize, col: usize) -> Option<Slot> {
        self.cells[row * self.cols + col]
    }

    /// Colour of a module left unassigned by the sweep.
    ///
    /// Some sizes leave a 2x2 block in the bottom-right corner; it carries a
    /// fixed diagonal pattern.
    pub fn unused_module_dark(&self, row: usize, col: usize) -> bool {
        (row == self.rows - 1 && col == self.cols - 1) || (row == self.rows - 2 && col == self.cols - 2)
    }

    fn fill(&mut self) {
        let (nrow, ncol) = (self.rows as isize, self.cols as isize);
        let mut ch = 0usize;
        let mut row: isize = 4;
        let mut col: isize = 0;

        loop {
            if row == nrow && col == 0 {
                self.corner1(ch);
                ch += 1;
            }
            if row == nrow - 2 && col == 0 && ncol % 4 != 0 {
                self.corner2(ch);
                ch += 1;
            }
            if row == nrow - 2 && col == 0 && ncol % 8 == 4 {
                self.corner3(ch);
                ch += 1;
            }
            if row == nrow + 4 && col == 2 && ncol % 8 == 0 {
                self.corner4(ch);
                ch += 1;
            }

            // Sweep up and to the right
            loop {
                if row < nrow && col >= 0 && self.is_free(row, col) {
                    self.utah(row, col, ch);
                    ch += 1;
                }
                row -= 2;
                col += 2;
                if !(row >= 0 && col < ncol) {
                    break;
                }
            }
            row += 1;
            col += 3;

            // Sweep down and to the left
            loop {
                if row >= 0 && col < ncol && self.is_free(row, col) {
                    self.utah(row, col, ch);
                    ch += 1;
                }
                row += 2;
                col -= 2;
                if !(row < nrow && col >= 0) {
                    break;
                }
            }
            row += 3;
            col += 1;

            if !(row < nrow || col < ncol) {
                break;
            }
        }

        self.codewords = ch;
    }

    fn is_free(&self, row: isize, col: isize) -> bool {
        self.cells[row as usize * self.cols + col as usize].is_none()
    }

    fn module(&mut self, mut row: isize, mut col: isize, ch: usize, bit: u8) {
        let (nrow, ncol) = (self.rows as isize, self.cols as isize);
        if row < 0 {
            row += nrow;
            col += 4 - ((nrow + 4) % 8);
        }
        if col < 0 {
            col += ncol;
            row += 4 - ((ncol + 4) % 8);
        }
        self.cells[row as usize * self.cols + col as usize] = Some((ch, bit));
    }

    fn utah(&mut self, row: isize, col: isize, ch: usize) {
        self.module(row - 2, col - 2, ch, 7);
        self.module(row - 2, col - 1, ch, 6);
        self.module(row - 1, col - 2, ch, 5);
        self.module(row - 1, col - 1, ch, 4);
        self.module(row - 1, col, ch, 3);
        self.module(row, col - 2, ch, 2);
        self.module(row, col - 1, ch, 1);
        self.module(row, col, ch, 0);
    }

    fn shape(&mut self, cells: [(isize, isize); 8], ch: usize) {
        for (i, (row, col)) in cells.into_iter().enumerate() {
            self.module(row, col, ch, 7 - i as u8);
        }
    }

    fn corner1(&mut self, ch: usize) {
        let (n, c) = (self.rows as isize, self.cols as isize);
        self.shape(
            [(n - 1, 0), (n - 1, 1), (n - 1, 2), (0, c - 2), (0, c - 1), (1, c - 1), (2, c - 1), (3, c - 1)],
            ch,
        );
    }

    fn corner2(&mut self, ch: usize) {
        let (n, c) = (self.rows as isize, self.cols as isize);
        self.shape(
            [(n - 3, 0), (n - 2, 0), (n - 1, 0), (0, c - 4), (0, c - 3), (0, c - 2), (0, c - 1), (1, c - 1)],
            ch,
        );
    }

    fn corner3(&mut self, ch: usize) {
        let (n, c) = (self.rows as isize, self.cols as isize);
        self.shape(
            [(n - 3, 0), (n - 2, 0), (n - 1, 0), (0, c - 2), (0, c - 1), (1, c - 1), (2, c - 1), (3, c - 1)],
            ch,
        );
    }

    fn corner4(&mut self, ch: usize) {
        let (n, c) = (self.rows as isize, self.cols as isize);
        self.shape(
            [(n - 1, 0), (n - 1, c - 1), (0, c - 3), (0, c - 2), (0, c - 1), (1, c - 3), (1, c - 2), (1, c - 1)],
            ch,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SYMBOL_SIZES;
    use std::collections::HashSet;

    #[test]
    fn test_every_size_places_each_bit_once() {
        for size in SYMBOL_SIZES {
            let placement = Placement::new(size.mapping_rows(), size.mapping_cols());
            assert_eq!(placement.codewords(), size.total_codewords(), "{size}");

            let mut seen = HashSet::new();
            for r in 0..placement.rows() {
                for c in 0..placement.cols() {
                    match placement.slot(r, c) {
                        Some(slot) => assert!(seen.insert(slot), "{size} duplicate {slot:?}"),
                        None => assert!(
                            r + 2 >= placement.rows() && c + 2 >= placement.cols(),
                            "{size} hole at {r},{c}"
                        ),
                    }
                }
            }
            assert_eq!(seen.len(), size.total_codewords() * 8, "{size}");
        }
    }

    #[test]
    fn test_first_codeword_of_smallest_symbol() {
        // 8x8 mapping matrix: codeword 0 is a utah anchored at (4, 0), wrapped left
        let placement = Placement::new(8, 8);
        assert_eq!(placement.slot(4, 0), Some((0, 0)));
        assert_eq!(placement.slot(3, 0), Some((0, 3)));
        assert_eq!(placement.slot(2, 6), Some((0, 7)));
    }

    #[test]
    fn test_unused_corner_pattern() {
        // 10x10 mapping (12x12 symbol) leaves the 2x2 corner free
        let placement = Placement::new(10, 10);
        assert_eq!(placement.slot(9, 9), None);
        assert!(placement.unused_module_dark(9, 9));
        assert!(placement.unused_module_dark(8, 8));
        assert!(!placement.unused_module_dark(8, 9));
    }
}
