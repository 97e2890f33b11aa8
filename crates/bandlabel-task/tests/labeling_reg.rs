//! Distributed labeling regression test
//!
//! Run with:
//! ```
//! cargo test -p bandlabel-task --test labeling_reg
//! ```

use bandlabel_comm::{World, WorldConfig};
use bandlabel_core::{BinaryImage, Label};
use bandlabel_region::{CandidateRule, LabelingConfig, PartitionStrategy, label_band, row_band};
use bandlabel_task::{
    LabelingTask, TaskData, execute, labeling_task_data, run_labeling, run_sequential,
};
use bandlabel_test::{RegParams, random_binary_image};

fn world(size: usize) -> World {
    World::new(WorldConfig::new(size)).unwrap()
}

/// Run a labeling task on every rank; returns each rank's band labels and
/// the coordinator's output buffer.
fn run_ranks(
    world: &World,
    image: &BinaryImage,
    config: LabelingConfig,
) -> (Vec<Vec<Label>>, Vec<Label>) {
    let results = world
        .run(|comm| {
            let data = if comm.is_coordinator() {
                labeling_task_data(image)
            } else {
                TaskData::new()
            };
            let mut task = LabelingTask::new(data, comm, config);
            execute(&mut task).unwrap();
            let local = task.local_labels().unwrap().as_slice().to_vec();
            let output = task.into_task_data().outputs.into_iter().next();
            (local, output)
        })
        .unwrap();

    let output = results[0].1.clone().unwrap();
    let locals = results.into_iter().map(|(local, _)| local).collect();
    (locals, output)
}

#[test]
fn labeling_reg() {
    bandlabel_test::init_tracing();
    let mut rp = RegParams::new("labeling");
    let config = LabelingConfig::default();

    // --- Test 1: 4x4 all-zero image, single worker ---
    let zeros = BinaryImage::new(4, 4).unwrap();
    let labels = run_labeling(&world(1), &zeros, config).unwrap();
    rp.compare_labels(&[2; 16], labels.as_slice());
    rp.compare_values(1.0, labels.component_count() as f64, 0.0);

    // --- Test 2: single worker matches the sequential reference ---
    for seed in 0..4u64 {
        let img = random_binary_image(23, 31, 0.5, seed).unwrap();
        for rule in [CandidateRule::AsImplemented, CandidateRule::Foreground] {
            let config = config.with_candidates(rule);
            let parallel = run_labeling(&world(1), &img, config).unwrap();
            let sequential = run_sequential(&img, config).unwrap();
            rp.compare_labels(sequential.as_slice(), parallel.as_slice());
        }
    }

    // --- Test 3: gather ordering with two workers ---
    let img = random_binary_image(8, 6, 0.5, 99).unwrap();
    let (locals, output) = run_ranks(&world(2), &img, config);
    let band_len = 4 * 6;
    rp.compare_values(band_len as f64, locals[0].len() as f64, 0.0);
    rp.compare_labels(&locals[0], &output[..band_len]);
    rp.compare_labels(&locals[1], &output[band_len..2 * band_len]);

    // --- Test 4: every band equals independent band labeling ---
    let img = random_binary_image(30, 17, 0.4, 5).unwrap();
    let (locals, output) = run_ranks(&world(3), &img, config);
    let mut offset = 0;
    for (rank, local) in locals.iter().enumerate() {
        let band = row_band(30, 3, rank, PartitionStrategy::Truncating).unwrap();
        let expected = label_band(&img, band, CandidateRule::AsImplemented).unwrap();
        rp.compare_labels(expected.as_slice(), local);
        rp.compare_labels(local, &output[offset..offset + local.len()]);
        offset += local.len();
    }

    // --- Test 5: truncating partition leaves trailing rows unlabeled ---
    let zeros = BinaryImage::new(10, 3).unwrap();
    let labels = run_labeling(&world(4), &zeros, config).unwrap();
    rp.compare_labels(&[2; 24], &labels.as_slice()[..24]);
    rp.compare_labels(&[0; 6], &labels.as_slice()[24..]);

    // --- Test 6: balanced partition labels every row ---
    let balanced = config.with_partition(PartitionStrategy::Balanced);
    let labels = run_labeling(&world(4), &zeros, balanced).unwrap();
    rp.compare_labels(&[2; 30], labels.as_slice());

    // --- Test 7: more workers than rows ---
    let labels = run_labeling(&world(5), &BinaryImage::new(3, 2).unwrap(), config).unwrap();
    rp.compare_labels(&[0; 6], labels.as_slice());
    let labels = run_labeling(&world(5), &BinaryImage::new(3, 2).unwrap(), balanced).unwrap();
    rp.compare_labels(&[2; 6], labels.as_slice());

    // --- Test 8: repeated runs are identical ---
    let img = random_binary_image(21, 21, 0.55, 2024).unwrap();
    let first = run_labeling(&world(3), &img, config).unwrap();
    let second = run_labeling(&world(3), &img, config).unwrap();
    rp.compare_labels(first.as_slice(), second.as_slice());

    assert!(rp.cleanup(), "labeling regression test failed");
}
