//! Labeling configuration

use crate::label::CandidateRule;
use crate::partition::PartitionStrategy;

/// Options for a labeling run
///
/// The default reproduces the baseline behavior: truncating row partition
/// and the [`CandidateRule::AsImplemented`] pixel rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelingConfig {
    /// How rows are divided among workers
    pub partition: PartitionStrategy,
    /// Which pixels receive labels
    pub candidates: CandidateRule,
}

impl LabelingConfig {
    /// Set the partition strategy
    pub fn with_partition(mut self, partition: PartitionStrategy) -> Self {
        self.partition = partition;
        self
    }

    /// Set the candidate rule
    pub fn with_candidates(mut self, candidates: CandidateRule) -> Self {
        self.candidates = candidates;
        self
    }
}
