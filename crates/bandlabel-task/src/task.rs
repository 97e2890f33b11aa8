//! Task lifecycle
//!
//! A task runs four stages in a fixed order, every rank in lockstep:
//! validation, pre-processing, run and post-processing. The first failing
//! stage ends the execution; nothing is retried or rolled back.

use crate::error::{TaskError, TaskResult};
use bandlabel_comm::COORDINATOR;
use std::fmt;

/// Lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Validation,
    PreProcessing,
    Run,
    PostProcessing,
}

impl Stage {
    /// Stages in execution order
    pub const ALL: [Stage; 4] = [
        Stage::Validation,
        Stage::PreProcessing,
        Stage::Run,
        Stage::PostProcessing,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validation => "validation",
            Stage::PreProcessing => "pre-processing",
            Stage::Run => "run",
            Stage::PostProcessing => "post-processing",
        };
        f.write_str(name)
    }
}

/// A unit of work driven through the four lifecycle stages
pub trait Task {
    /// Rank executing this task, used for diagnostics
    fn rank(&self) -> usize {
        COORDINATOR
    }

    /// Check buffers and counts before any communication
    fn validation(&mut self) -> TaskResult<()>;

    /// Distribute inputs
    fn pre_processing(&mut self) -> TaskResult<()>;

    /// Compute and collect results
    fn run(&mut self) -> TaskResult<()>;

    /// Write results to the output buffers
    fn post_processing(&mut self) -> TaskResult<()>;
}

/// Run every stage of `task` in order, stopping at the first failure
///
/// The returned error is [`TaskError::StageFailed`] naming the stage.
pub fn execute<T: Task + ?Sized>(task: &mut T) -> TaskResult<()> {
    let rank = task.rank();
    for stage in Stage::ALL {
        let result = match stage {
            Stage::Validation => task.validation(),
            Stage::PreProcessing => task.pre_processing(),
            Stage::Run => task.run(),
            Stage::PostProcessing => task.post_processing(),
        };

        if let Err(source) = result {
            tracing::error!(rank, %stage, error = %source, "stage failed");
            return Err(TaskError::StageFailed {
                stage,
                rank,
                source: Box::new(source),
            });
        }
        tracing::debug!(rank, %stage, "stage complete");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Stage>,
        fail_at: Option<Stage>,
    }

    impl Recorder {
        fn step(&mut self, stage: Stage) -> TaskResult<()> {
            self.calls.push(stage);
            if self.fail_at == Some(stage) {
                return Err(TaskError::InvalidTaskData("forced".into()));
            }
            Ok(())
        }
    }

    impl Task for Recorder {
        fn validation(&mut self) -> TaskResult<()> {
            self.step(Stage::Validation)
        }
        fn pre_processing(&mut self) -> TaskResult<()> {
            self.step(Stage::PreProcessing)
        }
        fn run(&mut self) -> TaskResult<()> {
            self.step(Stage::Run)
        }
        fn post_processing(&mut self) -> TaskResult<()> {
            self.step(Stage::PostProcessing)
        }
    }

    #[test]
    fn test_stages_run_in_order() {
        let mut task = Recorder::default();
        execute(&mut task).unwrap();
        assert_eq!(task.calls, Stage::ALL.to_vec());
    }

    #[test]
    fn test_failure_is_terminal() {
        let mut task = Recorder {
            fail_at: Some(Stage::Validation),
            ..Default::default()
        };
        let err = execute(&mut task).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Validation));
        assert_eq!(task.calls, vec![Stage::Validation]);
        assert!(matches!(err.root_cause(), TaskError::InvalidTaskData(_)));
    }

    #[test]
    fn test_failure_in_run_skips_post_processing() {
        let mut task = Recorder {
            fail_at: Some(Stage::Run),
            ..Default::default()
        };
        let err = execute(&mut task).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Run));
        assert!(!task.calls.contains(&Stage::PostProcessing));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::PreProcessing.to_string(), "pre-processing");
    }
}
