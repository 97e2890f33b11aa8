//! Bandlabel - Row-band parallel connected-component labeling
//!
//! A binary image is split into horizontal row bands, one per worker. Each
//! worker labels its band with a two-pass union-find scan, and the
//! coordinator gathers the bands into a single label image.
//!
//! # Overview
//!
//! - [`comm`]: fixed-size worker group with blocking collectives
//! - [`region`]: equivalence map, band partitioning and band labeling
//! - [`task`]: four-stage task lifecycle, labeling and reduction tasks
//!
//! # Example
//!
//! ```
//! use bandlabel::comm::{World, WorldConfig};
//! use bandlabel::region::LabelingConfig;
//! use bandlabel::BinaryImage;
//!
//! let image = BinaryImage::new(6, 4).unwrap();
//! let world = World::new(WorldConfig::new(3)).unwrap();
//! let labels = bandlabel::task::run_labeling(&world, &image, LabelingConfig::default()).unwrap();
//! assert_eq!(labels.rows(), 6);
//! assert!(labels.as_slice().iter().all(|&l| l == 2));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use bandlabel_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use bandlabel_comm as comm;
pub use bandlabel_region as region;
pub use bandlabel_task as task;
