//! Test image construction

use crate::error::{TestError, TestResult};
use bandlabel_core::BinaryImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate a random binary image
///
/// # Arguments
///
/// * `rows` - Number of rows
/// * `cols` - Number of columns
/// * `density` - Probability that a pixel is 1
/// * `seed` - RNG seed; equal seeds give equal images
pub fn random_binary_image(
    rows: u32,
    cols: u32,
    density: f64,
    seed: u64,
) -> TestResult<BinaryImage> {
    if !(0.0..=1.0).contains(&density) {
        return Err(TestError::InvalidDensity(density));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let len = rows as usize * cols as usize;
    let data = (0..len)
        .map(|_| i32::from(rng.random_bool(density)))
        .collect();
    Ok(BinaryImage::from_vec(rows, cols, data)?)
}

/// Build an image from literal rows
///
/// ```ignore
/// let img = image_from_rows(&[&[0, 1], &[1, 0]]).unwrap();
/// ```
pub fn image_from_rows(rows: &[&[i32]]) -> TestResult<BinaryImage> {
    let cols = rows.first().map_or(0, |r| r.len());
    let mut data = Vec::with_capacity(rows.len() * cols);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != cols {
            return Err(TestError::RaggedPattern {
                row: i,
                expected: cols,
                actual: row.len(),
            });
        }
        data.extend_from_slice(row);
    }
    Ok(BinaryImage::from_vec(rows.len() as u32, cols as u32, data)?)
}
