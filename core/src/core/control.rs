// shopfront/src/core/control.rs

//! Signals for controlling pipeline flow and the outcome of a pipeline run.

/// Signal from a handler indicating whether the pipeline should continue or stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  /// Continue with the next handler of this step, then the following steps.
  Continue,
  /// Halt the run. The step is considered to have had no effect, so nothing is compensated.
  Stop,
}

/// Record of the compensators that ran after a failed step.
#[derive(Debug)]
pub struct Compensation<Err> {
  /// Steps whose compensator succeeded, in the order they were undone.
  pub undone: Vec<String>,
  /// Steps whose compensator returned an error. Their effect is still in place.
  pub failed: Vec<(String, Err)>,
}

impl<Err> Compensation<Err> {
  /// `true` when no compensator failed (including the case where none had to run).
  pub fn is_complete(&self) -> bool {
    self.failed.is_empty()
  }
}

impl<Err> Default for Compensation<Err> {
  fn default() -> Self {
    Self {
      undone: Vec::new(),
      failed: Vec::new(),
    }
  }
}

/// Outcome of a full pipeline run.
#[derive(Debug)]
pub enum PipelineResult<Err> {
  /// Every non-skipped step ran to completion.
  Completed,
  /// A handler of `step` returned `PipelineControl::Stop`.
  Stopped { step: String },
  /// `step` failed with `error`; completed steps before it were compensated in reverse order.
  Failed {
    step: String,
    error: Err,
    compensation: Compensation<Err>,
  },
}

impl<Err> PipelineResult<Err> {
  pub fn is_completed(&self) -> bool {
    matches!(self, PipelineResult::Completed)
  }

  pub fn is_stopped(&self) -> bool {
    matches!(self, PipelineResult::Stopped { .. })
  }

  pub fn is_failed(&self) -> bool {
    matches!(self, PipelineResult::Failed { .. })
  }
}
