//! Release execution engine

pub mod engine;
pub mod executor;

pub use engine::{EventHandler, ExecutionEvent, ReleaseEngine};
pub use executor::{CommandCallback, StepExecutor};
