//! bandlabel-test - Regression test framework for bandlabel
//!
//! This crate provides the helpers shared by the workspace's regression
//! tests:
//!
//! - [`RegParams`] - indexed comparisons that collect failures and report
//!   them together on [`RegParams::cleanup`]
//! - [`random_binary_image`] - deterministic seeded test images
//! - [`init_tracing`] - log output for test runs
//!
//! # Usage
//!
//! ```ignore
//! use bandlabel_test::{RegParams, random_binary_image};
//!
//! let mut rp = RegParams::new("label");
//! let image = random_binary_image(16, 16, 0.5, 42).unwrap();
//! rp.compare_values(256.0, image.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod generate;
mod params;

pub use error::{TestError, TestResult};
pub use generate::{image_from_rows, random_binary_image};
pub use params::RegParams;

/// Initialize a tracing subscriber for tests
///
/// Safe to call multiple times; only the first call installs a subscriber.
/// Respects `RUST_LOG`, defaults to "info".
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
