// shopfront/src/pipeline/definition.rs

//! Contains the `Pipeline<TData, Err>` struct definition and methods for its
//! construction and structural modification.

use crate::core::context::{Compensator, Handler};
use crate::core::step::StepDef;
use crate::error::PipelineError;
use std::collections::HashMap;
use std::fmt;

/// An ordered list of named steps, each with async handlers and an optional compensator.
///
/// `TData` is the run's context type (wrapped in `ContextData<TData>` at run time).
/// `Err` is the error type handlers and compensators return; it must be creatable from
/// `PipelineError` so that engine-level failures (e.g. a missing handler) travel through
/// the same channel as handler failures.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Ordered list of step definitions for this pipeline.
  pub(crate) steps: Vec<StepDef>,

  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,

  /// At most one compensator per step.
  pub(crate) compensators: HashMap<String, Compensator<TData, Err>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Creates a new `Pipeline` from `(step_name, optional)` pairs.
  pub fn new(step_defs: &[(&str, bool)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, optional)| StepDef::new(*name, *optional))
      .collect();

    Self {
      steps,
      on: HashMap::new(),
      compensators: HashMap::new(),
    }
  }

  pub(crate) fn ensure_step_exists(&self, step_name: &str) -> Result<(), PipelineError> {
    if self.steps.iter().any(|s| s.name == step_name) {
      Ok(())
    } else {
      Err(PipelineError::StepNotFound {
        step_name: step_name.to_string(),
      })
    }
  }

  fn ensure_step_not_exists(&self, step_name: &str) -> Result<(), PipelineError> {
    if self.steps.iter().any(|s| s.name == step_name) {
      Err(PipelineError::DuplicateStep {
        step_name: step_name.to_string(),
      })
    } else {
      Ok(())
    }
  }

  fn position_of(&self, step_name: &str) -> Result<usize, PipelineError> {
    self
      .steps
      .iter()
      .position(|s| s.name == step_name)
      .ok_or_else(|| PipelineError::StepNotFound {
        step_name: step_name.to_string(),
      })
  }

  // --- Basic Step Manipulation Methods ---

  pub fn insert_before_step<S: Into<String>>(
    &mut self,
    existing_step_name: &str,
    new_step_name: S,
    optional: bool,
  ) -> Result<(), PipelineError> {
    let idx = self.position_of(existing_step_name)?;
    let name_str: String = new_step_name.into();
    self.ensure_step_not_exists(&name_str)?;
    self.steps.insert(idx, StepDef::new(name_str, optional));
    Ok(())
  }

  pub fn insert_after_step<S: Into<String>>(
    &mut self,
    existing_step_name: &str,
    new_step_name: S,
    optional: bool,
  ) -> Result<(), PipelineError> {
    let idx = self.position_of(existing_step_name)?;
    let name_str: String = new_step_name.into();
    self.ensure_step_not_exists(&name_str)?;
    self.steps.insert(idx + 1, StepDef::new(name_str, optional));
    Ok(())
  }

  /// Removes a step together with its handlers and compensator. Returns `false` if it was absent.
  pub fn remove_step(&mut self, step_name: &str) -> bool {
    match self.steps.iter().position(|s| s.name == step_name) {
      Some(idx) => {
        self.steps.remove(idx);
        self.on.remove(step_name);
        self.compensators.remove(step_name);
        true
      }
      None => false,
    }
  }

  pub fn set_optional(&mut self, step_name: &str, optional: bool) -> Result<(), PipelineError> {
    let idx = self.position_of(step_name)?;
    if let Some(step) = self.steps.get_mut(idx) {
      step.optional = optional;
    }
    Ok(())
  }

  pub fn steps(&self) -> &[StepDef] {
    &self.steps
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  pub fn has_compensator(&self, step_name: &str) -> bool {
    self.compensators.contains_key(step_name)
  }
}

impl<TData, Err> fmt::Debug for Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let handler_counts: Vec<(&str, usize)> = self
      .steps
      .iter()
      .map(|s| (s.name.as_str(), self.on.get(&s.name).map_or(0, Vec::len)))
      .collect();
    let mut compensated: Vec<&str> = self.compensators.keys().map(String::as_str).collect();
    compensated.sort_unstable();
    f.debug_struct("Pipeline")
      .field("steps", &handler_counts)
      .field("compensated_steps", &compensated)
      .finish()
  }
}
