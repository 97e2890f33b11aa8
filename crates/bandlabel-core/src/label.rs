//! Label storage
//!
//! [`LabelBuffer`] holds the labels one worker produced for its row band,
//! indexed in band-local coordinates. [`LabelImage`] is the coordinator's
//! assembled result, built by concatenating buffers in rank order.

use crate::band::RowBand;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Component label value
pub type Label = i32;

/// Initial value of every label cell
pub const UNLABELED: Label = 0;

/// Smallest value that denotes a real component
pub const FIRST_LABEL: Label = 2;

/// Check if a buffer value denotes a component (`>= 2`)
#[inline]
pub fn is_label(value: Label) -> bool {
    value >= FIRST_LABEL
}

/// Labels for one worker's row band
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelBuffer {
    band: RowBand,
    cols: u32,
    labels: Vec<Label>,
}

impl LabelBuffer {
    /// Create a zero-filled buffer of `band.len() * cols` cells
    pub fn new(band: RowBand, cols: u32) -> Self {
        let len = band.len() as usize * cols as usize;
        Self {
            band,
            cols,
            labels: vec![UNLABELED; len],
        }
    }

    /// The band this buffer covers
    pub fn band(&self) -> RowBand {
        self.band
    }

    /// Number of rows in the buffer
    #[inline]
    pub fn rows(&self) -> u32 {
        self.band.len()
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the buffer holds no cells
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Get the label at a band-local coordinate
    pub fn get(&self, row: u32, col: u32) -> Option<Label> {
        if row >= self.rows() || col >= self.cols {
            return None;
        }
        Some(self.labels[row as usize * self.cols as usize + col as usize])
    }

    /// Set the label at a band-local coordinate
    pub fn set(&mut self, row: u32, col: u32, label: Label) -> Result<()> {
        if row >= self.rows() || col >= self.cols {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols,
            });
        }
        self.labels[row as usize * self.cols as usize + col as usize] = label;
        Ok(())
    }

    /// Flat band-local labels
    pub fn as_slice(&self) -> &[Label] {
        &self.labels
    }

    /// Mutable flat band-local labels
    pub fn as_mut_slice(&mut self) -> &mut [Label] {
        &mut self.labels
    }

    /// Consume the buffer, returning its labels
    pub fn into_vec(self) -> Vec<Label> {
        self.labels
    }
}

/// Assembled label image on the coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelImage {
    rows: u32,
    cols: u32,
    labels: Vec<Label>,
}

impl LabelImage {
    /// Wrap a complete row-major label buffer
    pub fn from_vec(rows: u32, cols: u32, labels: Vec<Label>) -> Result<Self> {
        let expected = rows as usize * cols as usize;
        if labels.len() != expected {
            return Err(Error::LengthMismatch {
                expected,
                actual: labels.len(),
            });
        }
        Ok(Self { rows, cols, labels })
    }

    /// Build an image from a gathered prefix
    ///
    /// Rows past the gathered data were not covered by any band and are
    /// filled with [`UNLABELED`].
    pub fn from_gathered(rows: u32, cols: u32, mut labels: Vec<Label>) -> Result<Self> {
        let expected = rows as usize * cols as usize;
        if labels.len() > expected {
            return Err(Error::LengthMismatch {
                expected,
                actual: labels.len(),
            });
        }
        labels.resize(expected, UNLABELED);
        Ok(Self { rows, cols, labels })
    }

    /// Number of rows
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Get the label at a pixel
    pub fn get(&self, row: u32, col: u32) -> Option<Label> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.labels[row as usize * self.cols as usize + col as usize])
    }

    /// Flat row-major labels
    pub fn as_slice(&self) -> &[Label] {
        &self.labels
    }

    /// Consume the image, returning its labels
    pub fn into_vec(self) -> Vec<Label> {
        self.labels
    }

    /// Pixel count per component label, sorted by label
    ///
    /// Sentinel values are not counted.
    pub fn component_sizes(&self) -> Vec<(Label, usize)> {
        let mut counts: BTreeMap<Label, usize> = BTreeMap::new();
        for &label in self.labels.iter().filter(|&&v| is_label(v)) {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts.into_iter().collect()
    }

    /// Number of distinct component labels
    pub fn component_count(&self) -> usize {
        self.component_sizes().len()
    }
}
