// shopfront/src/core/step.rs

//! Defines the structure for a single step within a pipeline.

/// Definition of a pipeline step: its name and whether it may run without handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDef {
  pub name: String,
  /// An optional step with no registered handlers is skipped instead of failing the run.
  pub optional: bool,
}

impl StepDef {
  pub fn new(name: impl Into<String>, optional: bool) -> Self {
    Self {
      name: name.into(),
      optional,
    }
  }
}
