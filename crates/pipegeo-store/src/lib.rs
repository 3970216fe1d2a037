pub mod generator;
pub mod pipe_store;
pub mod source;
pub mod storage;

pub use generator::PipeGenerator;
pub use pipe_store::{PipeStore, PipeValidationError};
pub use source::{HttpPipeSource, PipeSource};
pub use storage::{Store, Tree};
