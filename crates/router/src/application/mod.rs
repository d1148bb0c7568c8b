mod coordinator;
mod service;

pub use coordinator::{ExecuteCommand, ExecutionCoordinator};
pub use service::ExecutionService;
