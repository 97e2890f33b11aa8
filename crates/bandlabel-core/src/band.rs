//! Row bands
//!
//! A [`RowBand`] is the contiguous, half-open range of image rows owned by
//! one worker. Bands are plain values; how they are derived from the worker
//! count lives in the partitioner.

use crate::error::{Error, Result};
use std::ops::Range;

/// Half-open row range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RowBand {
    start: u32,
    end: u32,
}

impl RowBand {
    /// Create a band, rejecting `end < start`
    pub fn new(start: u32, end: u32) -> Result<Self> {
        if end < start {
            return Err(Error::InvalidBand { start, end });
        }
        Ok(Self { start, end })
    }

    /// A band covering no rows, anchored at `start`
    pub fn empty_at(start: u32) -> Self {
        Self { start, end: start }
    }

    /// First row of the band
    #[inline]
    pub fn start(&self) -> u32 {
        self.start
    }

    /// One past the last row of the band
    #[inline]
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of rows in the band
    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if the band covers no rows
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if a global row index falls inside the band
    pub fn contains(&self, row: u32) -> bool {
        row >= self.start && row < self.end
    }

    /// Global row indices covered by the band
    pub fn rows(&self) -> Range<u32> {
        self.start..self.end
    }

    /// Check the band fits inside an image of `rows` rows
    pub fn check_within(&self, rows: u32) -> Result<()> {
        if self.end > rows {
            return Err(Error::BandOutOfRange {
                start: self.start,
                end: self.end,
                rows,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_basics() {
        let band = RowBand::new(2, 5).unwrap();
        assert_eq!(band.len(), 3);
        assert!(!band.is_empty());
        assert!(band.contains(2));
        assert!(band.contains(4));
        assert!(!band.contains(5));
        assert_eq!(band.rows().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_band_reversed_is_rejected() {
        assert_eq!(
            RowBand::new(4, 3),
            Err(Error::InvalidBand { start: 4, end: 3 })
        );
    }

    #[test]
    fn test_empty_band() {
        let band = RowBand::empty_at(7);
        assert!(band.is_empty());
        assert_eq!(band.len(), 0);
        assert!(!band.contains(7));
    }

    #[test]
    fn test_check_within() {
        let band = RowBand::new(0, 4).unwrap();
        assert!(band.check_within(4).is_ok());
        assert!(band.check_within(3).is_err());
    }
}
