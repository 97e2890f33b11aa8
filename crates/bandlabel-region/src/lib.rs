//! bandlabel-region - Connected component labeling over row bands
//!
//! This crate provides the per-worker labeling engine:
//!
//! - **Equivalence resolution** - union-find forest with path compression
//! - **Neighbor scanning** - labels of the causal (already visited) neighbors
//! - **Local labeling** - two-pass assign/resolve over one row band
//! - **Partitioning** - the row band each worker owns
//!
//! # Example
//!
//! ```
//! use bandlabel_core::BinaryImage;
//! use bandlabel_region::{CandidateRule, PartitionStrategy, label_band, row_band};
//!
//! let image = BinaryImage::new(4, 4).unwrap();
//! let band = row_band(image.rows(), 2, 1, PartitionStrategy::Truncating).unwrap();
//! assert_eq!((band.start(), band.end()), (2, 4));
//!
//! let labels = label_band(&image, band, CandidateRule::AsImplemented).unwrap();
//! assert!(labels.as_slice().iter().all(|&l| l == 2));
//! ```

pub mod config;
pub mod equivalence;
pub mod error;
pub mod label;
pub mod neighbors;
pub mod partition;

// Re-export core types
pub use bandlabel_core;

pub use config::LabelingConfig;
pub use equivalence::EquivalenceMap;
pub use error::{RegionError, RegionResult};
pub use label::{CandidateRule, assign_labels, label_band, label_image, resolve_labels};
pub use neighbors::{CAUSAL_OFFSETS, causal_neighbors};
pub use partition::{PartitionStrategy, partition_rows, row_band, uncovered_rows};
