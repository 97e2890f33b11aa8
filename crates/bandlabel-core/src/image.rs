//! Binary image container
//!
//! [`BinaryImage`] is a row-major flat grid of integer pixel values. The
//! labeling engine only ever distinguishes `0` from non-zero, so values are
//! stored as received and never normalized.

use crate::band::RowBand;
use crate::error::{Error, Result};

/// Row-major flat image of `rows x cols` integer pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryImage {
    rows: u32,
    cols: u32,
    data: Vec<i32>,
}

impl BinaryImage {
    /// Create an image with every pixel set to 0
    pub fn new(rows: u32, cols: u32) -> Result<Self> {
        let len = checked_len(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            data: vec![0; len],
        })
    }

    /// Wrap an existing row-major buffer
    ///
    /// # Arguments
    ///
    /// * `rows` - Number of image rows
    /// * `cols` - Number of image columns
    /// * `data` - Pixel values, exactly `rows * cols` of them
    pub fn from_vec(rows: u32, cols: u32, data: Vec<i32>) -> Result<Self> {
        let len = checked_len(rows, cols)?;
        if data.len() != len {
            return Err(Error::LengthMismatch {
                expected: len,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of pixels
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a constructed image; kept for slice-like symmetry
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat row-major pixel data
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    /// Consume the image, returning its pixel buffer
    pub fn into_vec(self) -> Vec<i32> {
        self.data
    }

    /// Get a pixel value, or `None` outside the image
    pub fn get(&self, row: u32, col: u32) -> Option<i32> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[self.index(row, col)])
    }

    /// Set a pixel value
    pub fn set(&mut self, row: u32, col: u32, value: i32) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let idx = self.index(row, col);
        self.data[idx] = value;
        Ok(())
    }

    /// Pixels of the rows covered by `band`, row-major
    pub fn band_pixels(&self, band: RowBand) -> Result<&[i32]> {
        band.check_within(self.rows)?;
        let cols = self.cols as usize;
        let start = band.start() as usize * cols;
        let end = band.end() as usize * cols;
        Ok(&self.data[start..end])
    }

    #[inline]
    fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.cols as usize + col as usize
    }
}

fn checked_len(rows: u32, cols: u32) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidDimension { rows, cols });
    }
    (rows as usize)
        .checked_mul(cols as usize)
        .ok_or(Error::InvalidDimension { rows, cols })
}
