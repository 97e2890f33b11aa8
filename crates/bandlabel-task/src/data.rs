//! Task buffers

/// Input and output buffers handed to a task
///
/// Only the coordinator's task data carries buffers; other ranks pass an
/// empty [`TaskData::new`] and receive what they need by broadcast.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskData<T> {
    /// Input buffers
    pub inputs: Vec<Vec<T>>,
    /// Per-task meaning; for labeling `[rows, cols]`
    pub inputs_count: Vec<u32>,
    /// Output buffers, allocated by the caller
    pub outputs: Vec<Vec<T>>,
    /// Per-task meaning; for labeling `[rows, cols]`
    pub outputs_count: Vec<u32>,
}

impl<T> Default for TaskData<T> {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            inputs_count: Vec::new(),
            outputs: Vec::new(),
            outputs_count: Vec::new(),
        }
    }
}

impl<T> TaskData<T> {
    /// Task data without buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an input buffer
    pub fn with_input(mut self, buffer: Vec<T>) -> Self {
        self.inputs.push(buffer);
        self
    }

    /// Set the input counts
    pub fn with_inputs_count(mut self, counts: &[u32]) -> Self {
        self.inputs_count = counts.to_vec();
        self
    }

    /// Append an output buffer
    pub fn with_output(mut self, buffer: Vec<T>) -> Self {
        self.outputs.push(buffer);
        self
    }

    /// Set the output counts
    pub fn with_outputs_count(mut self, counts: &[u32]) -> Self {
        self.outputs_count = counts.to_vec();
        self
    }
}
