// shopfront/src/pipeline/execution.rs

//! Contains `Pipeline::run()`: executes steps in order and compensates completed steps on failure.

use crate::core::context_data::ContextData;
use crate::core::control::{Compensation, PipelineControl, PipelineResult};
use crate::error::PipelineError;
use crate::pipeline::definition::Pipeline;
use tracing::{event, instrument, span, Instrument, Level};

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Executes the pipeline against the given shared context `ctx_data`.
  ///
  /// - A handler returning `PipelineControl::Stop` ends the run with `Stopped`; nothing is compensated.
  /// - A handler error, or a non-optional step without handlers, ends the run with `Failed`.
  ///   Each previously completed step that has a compensator is then undone, last step first,
  ///   exactly once. Compensator errors are logged and reported in `Compensation::failed`.
  #[instrument(
        name = "Pipeline::run",
        skip_all,
        fields(
            pipeline_context_data_type = %std::any::type_name::<TData>(),
            num_steps = self.steps.len(),
        )
    )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> PipelineResult<Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");
    let mut completed: Vec<&str> = Vec::with_capacity(self.steps.len());

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name_str = step_def.name.as_str();

      let step_span = span!(
        Level::INFO,
        "pipeline_step_execution",
        step_name = step_name_str,
        step_index = step_idx,
        optional = step_def.optional
      );

      let handlers = match self.on.get(step_name_str) {
        Some(handlers) if !handlers.is_empty() => handlers,
        _ if step_def.optional => {
          event!(parent: &step_span, Level::DEBUG, "Optional step has no handlers, skipping.");
          continue;
        }
        _ => {
          event!(parent: &step_span, Level::ERROR, "Non-optional step has no handlers.");
          let error = Err::from(PipelineError::HandlerMissing {
            step_name: step_def.name.clone(),
          });
          return self.fail(step_name_str, error, &completed, ctx_data).await;
        }
      };

      for (handler_idx, handler_fn) in handlers.iter().enumerate() {
        let handler_span = span!(parent: &step_span, Level::DEBUG, "on_handler", handler_index = handler_idx);
        match handler_fn(ctx_data.clone()).instrument(handler_span).await {
          Ok(PipelineControl::Continue) => {}
          Ok(PipelineControl::Stop) => {
            event!(parent: &step_span, Level::INFO, "Pipeline stopped by a handler.");
            return PipelineResult::Stopped {
              step: step_def.name.clone(),
            };
          }
          Err(e) => {
            event!(parent: &step_span, Level::ERROR, error = %e, "Handler failed.");
            return self.fail(step_name_str, e, &completed, ctx_data).await;
          }
        }
      }

      event!(parent: &step_span, Level::DEBUG, "Step processing finished successfully.");
      completed.push(step_name_str);
    }

    event!(Level::DEBUG, "Pipeline execution completed successfully.");
    PipelineResult::Completed
  }

  async fn fail(
    &self,
    step_name: &str,
    error: Err,
    completed: &[&str],
    ctx_data: ContextData<TData>,
  ) -> PipelineResult<Err> {
    let compensation = self.compensate_completed(completed, ctx_data).await;
    PipelineResult::Failed {
      step: step_name.to_string(),
      error,
      compensation,
    }
  }

  async fn compensate_completed(&self, completed: &[&str], ctx_data: ContextData<TData>) -> Compensation<Err> {
    let mut compensation = Compensation::default();

    for step_name in completed.iter().rev() {
      let Some(compensator) = self.compensators.get(*step_name) else {
        continue;
      };
      let comp_span = span!(Level::INFO, "pipeline_step_compensation", step_name = *step_name);
      match compensator(ctx_data.clone()).instrument(comp_span.clone()).await {
        Ok(()) => {
          event!(parent: &comp_span, Level::INFO, "Step compensated.");
          compensation.undone.push((*step_name).to_string());
        }
        Err(e) => {
          event!(parent: &comp_span, Level::ERROR, error = %e, "Compensation failed; the step's effect remains in place.");
          compensation.failed.push(((*step_name).to_string(), e));
        }
      }
    }

    compensation
  }
}
