//! Distributed sum reduction
//!
//! An independent utility: the coordinator's values are broadcast, every
//! rank sums its own contiguous share, and the partial sums are combined on
//! the coordinator. It shares nothing with the labeling engine.

use crate::data::TaskData;
use crate::error::{TaskError, TaskResult};
use crate::task::{Stage, Task};
use bandlabel_comm::{COORDINATOR, CommError, Communicator, Tag};
use num_traits::Num;
use std::ops::Range;

/// Tag of the pairwise exchange messages
const TREE_TAG: Tag = Tag::User(0x5245);

/// How partial sums reach the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReduceStrategy {
    /// Pairwise exchange along a binary tree rooted at rank 0
    #[default]
    BinaryTree,
    /// The communicator's reduce collective
    Collective,
}

/// Contiguous share of `len` elements owned by `rank`
///
/// The first `len % size` ranks own one extra element.
pub fn share(len: usize, size: usize, rank: usize) -> Range<usize> {
    if size == 0 {
        return 0..0;
    }
    let base = len / size;
    let extra = len % size;
    let start = rank * base + rank.min(extra);
    let end = start + base + usize::from(rank < extra);
    start.min(len)..end.min(len)
}

/// Combine values along a binary tree rooted at rank 0
///
/// At step `s` (1, 2, 4, ...) a rank that is a multiple of `2s` receives
/// from `rank + s`; any other rank sends to `rank - s` and stops. Returns
/// the total on rank 0 and `None` elsewhere.
pub fn tree_reduce<T, F>(comm: &Communicator, mut value: T, op: F) -> TaskResult<Option<T>>
where
    T: Send + 'static,
    F: Fn(T, T) -> T,
{
    let rank = comm.rank();
    let size = comm.size();
    let mut step = 1;

    while step < size {
        if rank % (2 * step) == 0 {
            let partner = rank + step;
            if partner < size {
                let other = comm
                    .recv::<T>(partner, TREE_TAG)?
                    .into_iter()
                    .next()
                    .ok_or(CommError::EmptyPayload { peer: partner })?;
                value = op(value, other);
            }
        } else {
            comm.send(rank - step, TREE_TAG, vec![value])?;
            return Ok(None);
        }
        step *= 2;
    }
    Ok(Some(value))
}

/// Sum-reduction task for one rank of a worker group
///
/// Coordinator task data: input 0 holds the values with `inputs_count[0]`
/// their count; output 0 receives the sum and `outputs_count[0]` must be 1.
pub struct ReduceTask<T> {
    task_data: TaskData<T>,
    comm: Communicator,
    strategy: ReduceStrategy,
    values: Option<Vec<T>>,
    result: Option<T>,
}

impl<T> ReduceTask<T>
where
    T: Num + Copy + Send + 'static,
{
    /// Create the task for the rank owning `comm`
    pub fn new(task_data: TaskData<T>, comm: Communicator, strategy: ReduceStrategy) -> Self {
        Self {
            task_data,
            comm,
            strategy,
            values: None,
            result: None,
        }
    }

    /// The task's buffers
    pub fn task_data(&self) -> &TaskData<T> {
        &self.task_data
    }

    /// Consume the task, returning its buffers
    pub fn into_task_data(self) -> TaskData<T> {
        self.task_data
    }

    /// The reduced value, available on the coordinator after the run stage
    pub fn result(&self) -> Option<T> {
        self.result
    }
}

impl<T> Task for ReduceTask<T>
where
    T: Num + Copy + Send + 'static,
{
    fn rank(&self) -> usize {
        self.comm.rank()
    }

    fn validation(&mut self) -> TaskResult<()> {
        if !self.comm.is_coordinator() {
            return Ok(());
        }
        let data = &self.task_data;
        let input = data.inputs_count.first().copied().unwrap_or(0);
        let output = data.outputs_count.first().copied().unwrap_or(0);
        if input == 0 || output != 1 {
            return Err(TaskError::InvalidCounts { input, output });
        }
        if data.inputs.first().is_none_or(|v| v.len() < input as usize) {
            return Err(TaskError::InvalidTaskData(format!(
                "input buffer must hold {input} values"
            )));
        }
        if data.outputs.first().is_none_or(|v| v.is_empty()) {
            return Err(TaskError::InvalidTaskData("missing output slot".into()));
        }
        Ok(())
    }

    fn pre_processing(&mut self) -> TaskResult<()> {
        let mut values = if self.comm.is_coordinator() {
            let count = self.task_data.inputs_count.first().copied().unwrap_or(0) as usize;
            self.task_data
                .inputs
                .first()
                .and_then(|v| v.get(..count))
                .ok_or_else(|| TaskError::InvalidTaskData("input buffer too small".into()))?
                .to_vec()
        } else {
            Vec::new()
        };

        self.comm.broadcast(&mut values, COORDINATOR)?;
        tracing::debug!(rank = self.comm.rank(), len = values.len(), "received values");
        self.values = Some(values);
        Ok(())
    }

    fn run(&mut self) -> TaskResult<()> {
        let values = self.values.as_ref().ok_or(TaskError::NotPrepared(Stage::Run))?;
        let range = share(values.len(), self.comm.size(), self.comm.rank());
        let local = values[range]
            .iter()
            .fold(T::zero(), |acc, &v| acc + v);

        self.result = match self.strategy {
            ReduceStrategy::BinaryTree => tree_reduce(&self.comm, local, |a, b| a + b)?,
            ReduceStrategy::Collective => self.comm.reduce(local, COORDINATOR, |a, b| a + b)?,
        };
        Ok(())
    }

    fn post_processing(&mut self) -> TaskResult<()> {
        if !self.comm.is_coordinator() {
            return Ok(());
        }
        let result = self
            .result
            .ok_or(TaskError::NotPrepared(Stage::PostProcessing))?;
        let slot = self
            .task_data
            .outputs
            .first_mut()
            .and_then(|out| out.first_mut())
            .ok_or_else(|| TaskError::InvalidTaskData("missing output slot".into()))?;
        *slot = result;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_covers_everything() {
        for len in 0..20 {
            for size in 1..7 {
                let ranges: Vec<_> = (0..size).map(|r| share(len, size, r)).collect();
                assert_eq!(ranges[0].start, 0);
                assert_eq!(ranges[size - 1].end, len);
                assert!(ranges.windows(2).all(|w| w[0].end == w[1].start));
            }
        }
    }

    #[test]
    fn test_share_uneven() {
        assert_eq!(share(7, 3, 0), 0..3);
        assert_eq!(share(7, 3, 1), 3..5);
        assert_eq!(share(7, 3, 2), 5..7);
    }
}
