use std::collections::TryReserveError;

/// Packed bit matrix; `true` marks a dark pixel or module
#[derive(Debug, Clone)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a cleared matrix, reporting allocation failure instead of aborting
    pub fn try_new(width: usize, height: usize) -> Result<Self, TryReserveError> {
        let bytes_needed = width.saturating_mul(height).div_ceil(8);
        let mut data = Vec::new();
        data.try_reserve_exact(bytes_needed)?;
        data.resize(bytes_needed, 0);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y); out-of-range reads are light
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set bit at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let mask = 1 << (index % 8);
        if value {
            self.data[index / 8] |= mask;
        } else {
            self.data[index / 8] &= !mask;
        }
    }

    #[cfg(test)]
    fn count_dark(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }
}
