//! bandlabel-task - Four-stage tasks over a worker group
//!
//! This crate drives work through the lifecycle every rank runs in lockstep:
//! validation, pre-processing, run and post-processing.
//!
//! - [`LabelingTask`] - distributed connected component labeling
//! - [`SequentialLabelingTask`] - single-band reference labeling
//! - [`ReduceTask`] - distributed sum of numeric values
//!
//! # Example
//!
//! ```
//! use bandlabel_comm::{World, WorldConfig};
//! use bandlabel_core::BinaryImage;
//! use bandlabel_region::LabelingConfig;
//! use bandlabel_task::run_labeling;
//!
//! let world = World::new(WorldConfig::new(2)).unwrap();
//! let image = BinaryImage::new(4, 4).unwrap();
//! let labels = run_labeling(&world, &image, LabelingConfig::default()).unwrap();
//!
//! // Each rank labels its own two rows; numbering restarts per band.
//! assert!(labels.as_slice().iter().all(|&l| l == 2));
//! ```

pub mod data;
pub mod error;
pub mod labeling;
pub mod reduce;
pub mod task;

pub use data::TaskData;
pub use error::{TaskError, TaskResult};
pub use labeling::{
    LabelingTask, SequentialLabelingTask, labeling_task_data, run_labeling, run_sequential,
    validate_labeling_data,
};
pub use reduce::{ReduceStrategy, ReduceTask, share, tree_reduce};
pub use task::{Stage, Task, execute};
