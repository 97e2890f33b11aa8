//! Error types for bandlabel-task

use crate::task::Stage;
use bandlabel_comm::CommError;
use bandlabel_region::RegionError;
use thiserror::Error;

/// Errors reported by task stages
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Input and output counts are zero or disagree
    #[error("invalid counts: input {input}, output {output}")]
    InvalidCounts { input: u32, output: u32 },

    /// Task buffers are missing or too small
    #[error("invalid task data: {0}")]
    InvalidTaskData(String),

    /// A stage ran before the stages it depends on
    #[error("{0} requires the preceding stages to complete first")]
    NotPrepared(Stage),

    /// Communication error
    #[error("communication error: {0}")]
    Comm(#[from] CommError),

    /// Labeling error
    #[error("region error: {0}")]
    Region(#[from] RegionError),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] bandlabel_core::Error),

    /// A stage failed; no later stage was run
    #[error("{stage} failed on rank {rank}: {source}")]
    StageFailed {
        stage: Stage,
        rank: usize,
        #[source]
        source: Box<TaskError>,
    },
}

impl TaskError {
    /// The stage that failed, if this error came out of [`crate::execute`]
    pub fn stage(&self) -> Option<Stage> {
        match self {
            TaskError::StageFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The underlying error, without stage wrapping
    pub fn root_cause(&self) -> &TaskError {
        match self {
            TaskError::StageFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type for task stages
pub type TaskResult<T> = Result<T, TaskError>;
