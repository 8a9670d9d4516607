//! Core types for the pipeline state machine.

mod progress;
mod stage;
mod status;

pub use progress::PipelineProgress;
pub use stage::StageId;
pub use status::StageStatus;
