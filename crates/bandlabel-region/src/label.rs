//! Two-pass local labeling
//!
//! A worker labels its row band independently of every other worker:
//!
//! 1. **Assignment** - scan the band row-major; each candidate pixel takes
//!    the smallest causal neighbor label (merging all neighbor classes) or
//!    a fresh label when it has none.
//! 2. **Resolution** - rewrite every label to its class root.
//!
//! The band is labeled in band-local coordinates: rows outside the band are
//! out of bounds for the neighbor scan, so components never connect across
//! band edges.

use crate::equivalence::EquivalenceMap;
use crate::error::{RegionError, RegionResult};
use crate::neighbors::causal_neighbors;
use bandlabel_core::{BinaryImage, FIRST_LABEL, Label, LabelBuffer, RowBand, is_label};

/// Which pixels receive a label in the assignment pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidateRule {
    /// Pixel value is 0, or the cell already holds a label.
    ///
    /// This labels background-valued pixels. It is the baseline behavior
    /// and is kept bit-for-bit.
    #[default]
    AsImplemented,
    /// Pixel value is non-zero.
    Foreground,
}

impl CandidateRule {
    /// Check if a pixel takes part in the assignment pass
    #[inline]
    pub fn is_candidate(self, pixel: i32, current: Label) -> bool {
        match self {
            CandidateRule::AsImplemented => pixel == 0 || is_label(current),
            CandidateRule::Foreground => pixel != 0,
        }
    }
}

/// Label one row band of `image`
///
/// The equivalence map is created for this call and dropped when it
/// returns. The result holds only resolved root labels.
///
/// # Arguments
///
/// * `image` - Full input image
/// * `band` - Rows to label; must lie within the image
/// * `rule` - Which pixels are labeled
pub fn label_band(
    image: &BinaryImage,
    band: RowBand,
    rule: CandidateRule,
) -> RegionResult<LabelBuffer> {
    let mut buffer = LabelBuffer::new(band, image.cols());
    let mut equivalences = EquivalenceMap::new();

    let next = assign_labels(image, &mut buffer, &mut equivalences, rule)?;
    resolve_labels(&mut buffer, &mut equivalences);

    tracing::debug!(
        start = band.start(),
        end = band.end(),
        provisional = next - FIRST_LABEL,
        classes = equivalences.class_count(),
        "band labeled"
    );
    Ok(buffer)
}

/// Label the whole image as a single band
pub fn label_image(image: &BinaryImage, rule: CandidateRule) -> RegionResult<LabelBuffer> {
    let band = RowBand::new(0, image.rows())?;
    label_band(image, band, rule)
}

/// Assignment pass
///
/// Fills `buffer` with provisional labels and records their equivalences.
/// Returns the next unused label.
pub fn assign_labels(
    image: &BinaryImage,
    buffer: &mut LabelBuffer,
    equivalences: &mut EquivalenceMap,
    rule: CandidateRule,
) -> RegionResult<Label> {
    if buffer.cols() != image.cols() {
        return Err(RegionError::InvalidParameters(format!(
            "label buffer has {} columns, image has {}",
            buffer.cols(),
            image.cols()
        )));
    }
    if buffer.len() > (Label::MAX - FIRST_LABEL) as usize {
        return Err(RegionError::LabelOverflow {
            cells: buffer.len(),
        });
    }

    let pixels = image.band_pixels(buffer.band())?;
    let rows = buffer.rows();
    let cols = buffer.cols();
    let labels = buffer.as_mut_slice();

    let mut next = FIRST_LABEL;
    let mut neighbors = Vec::with_capacity(3);

    for row in 0..rows {
        for col in 0..cols {
            let pos = row as usize * cols as usize + col as usize;
            if !rule.is_candidate(pixels[pos], labels[pos]) {
                continue;
            }

            causal_neighbors(row, col, rows, cols, labels, &mut neighbors);
            match neighbors.iter().copied().min() {
                None => {
                    labels[pos] = next;
                    next += 1;
                }
                Some(min) => {
                    labels[pos] = min;
                    for &n in &neighbors {
                        equivalences.union(min, n);
                    }
                }
            }
        }
    }

    Ok(next)
}

/// Resolution pass
///
/// Rewrites every label in `buffer` to its class root.
pub fn resolve_labels(buffer: &mut LabelBuffer, equivalences: &mut EquivalenceMap) {
    for label in buffer.as_mut_slice().iter_mut().filter(|l| is_label(**l)) {
        *label = equivalences.root(*label);
    }
}
