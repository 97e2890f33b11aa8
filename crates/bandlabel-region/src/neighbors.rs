//! Causal neighbor scanning
//!
//! During a row-major scan only pixels above and to the left of the current
//! one have been visited. The scanner looks at three of them, in this order:
//!
//! ```text
//!   N  NE
//!   W  *
//! ```

use bandlabel_core::{Label, is_label};

/// Row/column offsets of the causal neighbors: north, west, northeast
pub const CAUSAL_OFFSETS: [(i64, i64); 3] = [(-1, 0), (0, -1), (-1, 1)];

/// Collect the labels of already-visited neighbors of `(row, col)`
///
/// # Arguments
///
/// * `row`, `col` - Pixel coordinate within a `rows x cols` grid
/// * `labels` - Row-major label grid being built
/// * `out` - Cleared, then filled with every in-bounds neighbor label `>= 2`
///
/// Labels keep the offset order and may repeat.
pub fn causal_neighbors(
    row: u32,
    col: u32,
    rows: u32,
    cols: u32,
    labels: &[Label],
    out: &mut Vec<Label>,
) {
    out.clear();
    for (dr, dc) in CAUSAL_OFFSETS {
        let nr = i64::from(row) + dr;
        let nc = i64::from(col) + dc;
        if nr < 0 || nc < 0 || nr >= i64::from(rows) || nc >= i64::from(cols) {
            continue;
        }
        let label = labels[nr as usize * cols as usize + nc as usize];
        if is_label(label) {
            out.push(label);
        }
    }
}
