// shopfront/src/pipeline/mod.rs

//! Defines the `Pipeline<TData, Err>` struct, its construction, handler registration, and execution logic.

pub mod definition;
pub mod execution;
pub mod hooks;

// Re-export the main Pipeline struct
pub use definition::Pipeline;
