//! bandlabel-core - Basic data structures for banded component labeling
//!
//! This crate provides the data model shared by every stage of the
//! labeling engine:
//!
//! - [`BinaryImage`] - Row-major flat grid of integer pixel values
//! - [`RowBand`] - Half-open range of rows assigned to one worker
//! - [`LabelBuffer`] - Per-worker label storage for one row band
//! - [`LabelImage`] - Assembled label image on the coordinator
//!
//! Labels are plain integers. Values `0` and `1` are sentinels and never
//! denote a component; real labels start at [`FIRST_LABEL`].

pub mod band;
pub mod error;
pub mod image;
pub mod label;

pub use band::RowBand;
pub use error::{Error, Result};
pub use image::BinaryImage;
pub use label::{FIRST_LABEL, Label, LabelBuffer, LabelImage, UNLABELED, is_label};
