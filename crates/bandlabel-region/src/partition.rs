//! Row partitioning
//!
//! Each worker owns one contiguous band of rows, derived only from the
//! total row count, the worker count and the worker's rank.

use crate::error::{RegionError, RegionResult};
use bandlabel_core::RowBand;

/// How rows are divided among workers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartitionStrategy {
    /// Every worker gets `rows / workers` rows (truncating division).
    ///
    /// When `rows` is not a multiple of `workers`, the trailing
    /// `rows % workers` rows belong to no band and are never labeled.
    #[default]
    Truncating,
    /// The first `rows % workers` workers get one extra row, so the bands
    /// cover every row.
    Balanced,
}

/// Compute the row band of `rank`
///
/// # Arguments
///
/// * `total_rows` - Number of image rows
/// * `workers` - Number of workers, at least 1
/// * `rank` - Worker index in `0..workers`
pub fn row_band(
    total_rows: u32,
    workers: usize,
    rank: usize,
    strategy: PartitionStrategy,
) -> RegionResult<RowBand> {
    if workers == 0 || rank >= workers {
        return Err(RegionError::InvalidPartition { rank, workers });
    }

    let total = u64::from(total_rows);
    let n = workers as u64;
    let r = rank as u64;
    let base = total / n;

    let (start, end) = match strategy {
        PartitionStrategy::Truncating => (r * base, (r + 1) * base),
        PartitionStrategy::Balanced => {
            let extra = total % n;
            let start = r * base + r.min(extra);
            let len = base + u64::from(r < extra);
            (start, start + len)
        }
    };

    // Both bounds are at most total_rows.
    let start = u32::try_from(start).map_err(|_| RegionError::InvalidPartition { rank, workers })?;
    let end = u32::try_from(end).map_err(|_| RegionError::InvalidPartition { rank, workers })?;
    Ok(RowBand::new(start, end)?)
}

/// Bands of every rank, in rank order
pub fn partition_rows(
    total_rows: u32,
    workers: usize,
    strategy: PartitionStrategy,
) -> RegionResult<Vec<RowBand>> {
    (0..workers)
        .map(|rank| row_band(total_rows, workers, rank, strategy))
        .collect()
}

/// Number of trailing rows no band covers
pub fn uncovered_rows(total_rows: u32, workers: usize, strategy: PartitionStrategy) -> u32 {
    match strategy {
        PartitionStrategy::Truncating if workers > 0 => {
            (u64::from(total_rows) % workers as u64) as u32
        }
        PartitionStrategy::Truncating => total_rows,
        PartitionStrategy::Balanced => 0,
    }
}
