// shopfront/src/core/context.rs

//! Boxed handler types stored by a `Pipeline<TData, Err>`.

use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use std::future::Future;
use std::pin::Pin;

/// Type alias for a pipeline step handler.
///
/// A handler is an asynchronous function that takes a clone of the run's `ContextData<TData>`
/// and resolves to `Result<PipelineControl, Err>`.
///
/// Handlers are responsible for:
/// 1. Acquiring locks (`.read()` or `.write()`) on the `ContextData` to access or modify state.
/// 2. **Dropping every lock guard BEFORE any `.await` suspension point.**
/// 3. Returning `PipelineControl::Stop` when the step had no effect and the run should end,
///    or an `Err` when the step failed and earlier steps must be compensated.
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>>
    + Send
    + Sync,
>;

/// Type alias for a step's compensating action.
///
/// Runs at most once per pipeline run, only for a step whose handlers all completed,
/// and only when a later step failed. Its error is recorded, never retried.
pub type Compensator<TData, Err> =
  Box<dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<(), Err>> + Send>> + Send + Sync>;
