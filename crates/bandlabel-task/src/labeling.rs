//! Distributed labeling task
//!
//! The coordinator owns the input image. Every rank receives a full copy by
//! broadcast, labels its own row band, and the coordinator gathers the
//! bands in rank order into the output buffer.
//!
//! Bands are labeled independently: a component that crosses a band edge
//! gets a different label on each side, and label numbering restarts in
//! every band.

use crate::data::TaskData;
use crate::error::{TaskError, TaskResult};
use crate::task::{Stage, Task, execute};
use bandlabel_comm::{COORDINATOR, Communicator, World};
use bandlabel_core::{BinaryImage, Label, LabelBuffer, LabelImage};
use bandlabel_region::{LabelingConfig, label_band, label_image, row_band, uncovered_rows};

/// Build coordinator task data for labeling `image`
///
/// Input 0 is the flattened image, output 0 a zeroed buffer of the same
/// size; both counts are `[rows, cols]`.
pub fn labeling_task_data(image: &BinaryImage) -> TaskData<Label> {
    let dims = [image.rows(), image.cols()];
    TaskData::new()
        .with_input(image.data().to_vec())
        .with_inputs_count(&dims)
        .with_output(vec![0; image.len()])
        .with_outputs_count(&dims)
}

/// Check coordinator task data for a labeling task
///
/// `inputs_count[0]` and `outputs_count[0]` (the row count) must be equal
/// and non-zero, and the buffers must hold `rows * cols` values.
pub fn validate_labeling_data(data: &TaskData<Label>) -> TaskResult<()> {
    let input = data.inputs_count.first().copied().unwrap_or(0);
    let output = data.outputs_count.first().copied().unwrap_or(0);
    if input == 0 || output == 0 || input != output {
        return Err(TaskError::InvalidCounts { input, output });
    }

    let cols = match data.inputs_count.get(1) {
        Some(&cols) if cols > 0 => cols,
        _ => {
            return Err(TaskError::InvalidTaskData(
                "inputs_count must hold [rows, cols] with cols > 0".into(),
            ));
        }
    };
    let len = input as usize * cols as usize;

    match data.inputs.first() {
        Some(image) if image.len() >= len => {}
        Some(image) => {
            return Err(TaskError::InvalidTaskData(format!(
                "input image holds {} values, expected {}",
                image.len(),
                len
            )));
        }
        None => return Err(TaskError::InvalidTaskData("missing input image".into())),
    }

    match data.outputs.first() {
        Some(out) if out.len() >= len => Ok(()),
        Some(out) => Err(TaskError::InvalidTaskData(format!(
            "output buffer holds {} values, expected {}",
            out.len(),
            len
        ))),
        None => Err(TaskError::InvalidTaskData("missing output buffer".into())),
    }
}

/// Copy the image described by coordinator task data
fn image_from_task_data(data: &TaskData<Label>) -> TaskResult<BinaryImage> {
    let (rows, cols) = match data.inputs_count.as_slice() {
        [rows, cols, ..] => (*rows, *cols),
        _ => return Err(TaskError::InvalidTaskData("missing image dimensions".into())),
    };
    let len = rows as usize * cols as usize;
    let pixels = data
        .inputs
        .first()
        .and_then(|input| input.get(..len))
        .ok_or_else(|| TaskError::InvalidTaskData("input image too small".into()))?;
    Ok(BinaryImage::from_vec(rows, cols, pixels.to_vec())?)
}

/// Labeling task for one rank of a worker group
pub struct LabelingTask {
    task_data: TaskData<Label>,
    comm: Communicator,
    config: LabelingConfig,
    image: Option<BinaryImage>,
    local: Option<LabelBuffer>,
    assembled: Option<LabelImage>,
    covered: usize,
}

impl LabelingTask {
    /// Create the task for the rank owning `comm`
    ///
    /// Only the coordinator's `task_data` needs buffers.
    pub fn new(task_data: TaskData<Label>, comm: Communicator, config: LabelingConfig) -> Self {
        Self {
            task_data,
            comm,
            config,
            image: None,
            local: None,
            assembled: None,
            covered: 0,
        }
    }

    /// The task's buffers
    pub fn task_data(&self) -> &TaskData<Label> {
        &self.task_data
    }

    /// Consume the task, returning its buffers
    pub fn into_task_data(self) -> TaskData<Label> {
        self.task_data
    }

    /// This rank's band labels, available after the run stage
    pub fn local_labels(&self) -> Option<&LabelBuffer> {
        self.local.as_ref()
    }

    /// Assembled label image, available on the coordinator after the run stage
    pub fn label_image(&self) -> Option<&LabelImage> {
        self.assembled.as_ref()
    }
}

impl Task for LabelingTask {
    fn rank(&self) -> usize {
        self.comm.rank()
    }

    fn validation(&mut self) -> TaskResult<()> {
        if !self.comm.is_coordinator() {
            return Ok(());
        }
        validate_labeling_data(&self.task_data)
    }

    fn pre_processing(&mut self) -> TaskResult<()> {
        let rank = self.comm.rank();
        let coordinator = self.comm.is_coordinator();

        if coordinator
            && (self.task_data.inputs.is_empty() || self.task_data.inputs_count.is_empty())
        {
            return Err(TaskError::InvalidTaskData(
                "coordinator has empty inputs or inputs_count".into(),
            ));
        }

        let (mut rows, mut cols, mut image) = if coordinator {
            let image = image_from_task_data(&self.task_data)?;
            (image.rows(), image.cols(), image.into_vec())
        } else {
            (0, 0, Vec::new())
        };

        self.comm.broadcast_value(&mut rows, COORDINATOR)?;
        self.comm.broadcast_value(&mut cols, COORDINATOR)?;
        tracing::debug!(rank, rows, cols, "received image dimensions");

        self.comm.broadcast(&mut image, COORDINATOR)?;
        tracing::debug!(rank, len = image.len(), "received image data");

        self.image = Some(BinaryImage::from_vec(rows, cols, image)?);
        Ok(())
    }

    fn run(&mut self) -> TaskResult<()> {
        let image = self.image.as_ref().ok_or(TaskError::NotPrepared(Stage::Run))?;
        let rank = self.comm.rank();
        let workers = self.comm.size();

        let band = row_band(image.rows(), workers, rank, self.config.partition)?;
        tracing::debug!(rank, start = band.start(), end = band.end(), "assigned row band");

        let local = label_band(image, band, self.config.candidates)?;
        let gathered = self.comm.gather(local.as_slice(), COORDINATOR)?;

        if let Some(labels) = gathered {
            let dropped = uncovered_rows(image.rows(), workers, self.config.partition);
            if dropped > 0 {
                tracing::warn!(
                    rows = image.rows(),
                    workers,
                    dropped,
                    "trailing rows are not covered by any band"
                );
            }
            self.covered = labels.len();
            self.assembled = Some(LabelImage::from_gathered(image.rows(), image.cols(), labels)?);
        }
        self.local = Some(local);
        Ok(())
    }

    fn post_processing(&mut self) -> TaskResult<()> {
        if !self.comm.is_coordinator() {
            return Ok(());
        }
        let assembled = self
            .assembled
            .as_ref()
            .ok_or(TaskError::NotPrepared(Stage::PostProcessing))?;

        let covered = self.covered;
        let out = self
            .task_data
            .outputs
            .first_mut()
            .and_then(|out| out.get_mut(..covered))
            .ok_or_else(|| TaskError::InvalidTaskData("output buffer too small".into()))?;
        out.copy_from_slice(&assembled.as_slice()[..covered]);

        tracing::info!(
            rows = assembled.rows(),
            cols = assembled.cols(),
            components = assembled.component_count(),
            "label image written"
        );
        Ok(())
    }
}

/// Labeling of the whole image on the calling thread
///
/// Runs the same four stages as [`LabelingTask`] with a single band, and
/// serves as the reference for the distributed result.
pub struct SequentialLabelingTask {
    task_data: TaskData<Label>,
    config: LabelingConfig,
    image: Option<BinaryImage>,
    labels: Option<LabelBuffer>,
}

impl SequentialLabelingTask {
    /// Create the task; the partition strategy of `config` is unused
    pub fn new(task_data: TaskData<Label>, config: LabelingConfig) -> Self {
        Self {
            task_data,
            config,
            image: None,
            labels: None,
        }
    }

    /// The task's buffers
    pub fn task_data(&self) -> &TaskData<Label> {
        &self.task_data
    }

    /// Consume the task, returning its buffers
    pub fn into_task_data(self) -> TaskData<Label> {
        self.task_data
    }
}

impl Task for SequentialLabelingTask {
    fn validation(&mut self) -> TaskResult<()> {
        validate_labeling_data(&self.task_data)
    }

    fn pre_processing(&mut self) -> TaskResult<()> {
        self.image = Some(image_from_task_data(&self.task_data)?);
        Ok(())
    }

    fn run(&mut self) -> TaskResult<()> {
        let image = self.image.as_ref().ok_or(TaskError::NotPrepared(Stage::Run))?;
        self.labels = Some(label_image(image, self.config.candidates)?);
        Ok(())
    }

    fn post_processing(&mut self) -> TaskResult<()> {
        let labels = self
            .labels
            .as_ref()
            .ok_or(TaskError::NotPrepared(Stage::PostProcessing))?;
        let len = labels.len();
        let out = self
            .task_data
            .outputs
            .first_mut()
            .and_then(|out| out.get_mut(..len))
            .ok_or_else(|| TaskError::InvalidTaskData("output buffer too small".into()))?;
        out.copy_from_slice(labels.as_slice());
        Ok(())
    }
}

/// Label `image` across every rank of `world`
///
/// Returns the coordinator's assembled label image. An error from the
/// coordinator takes precedence over errors from other ranks.
pub fn run_labeling(
    world: &World,
    image: &BinaryImage,
    config: LabelingConfig,
) -> TaskResult<LabelImage> {
    let results = world.run(|comm| {
        let data = if comm.is_coordinator() {
            labeling_task_data(image)
        } else {
            TaskData::new()
        };
        let mut task = LabelingTask::new(data, comm, config);
        execute(&mut task)?;
        Ok::<_, TaskError>(task.into_task_data())
    })?;

    let mut results = results.into_iter();
    let data = results
        .next()
        .ok_or_else(|| TaskError::InvalidTaskData("world has no coordinator".into()))??;
    for result in results {
        result?;
    }

    let labels = data
        .outputs
        .into_iter()
        .next()
        .ok_or_else(|| TaskError::InvalidTaskData("missing output buffer".into()))?;
    Ok(LabelImage::from_vec(image.rows(), image.cols(), labels)?)
}

/// Label `image` with [`SequentialLabelingTask`]
pub fn run_sequential(image: &BinaryImage, config: LabelingConfig) -> TaskResult<LabelImage> {
    let mut task = SequentialLabelingTask::new(labeling_task_data(image), config);
    execute(&mut task)?;
    let labels = task
        .into_task_data()
        .outputs
        .into_iter()
        .next()
        .ok_or_else(|| TaskError::InvalidTaskData("missing output buffer".into()))?;
    Ok(LabelImage::from_vec(image.rows(), image.cols(), labels)?)
}
