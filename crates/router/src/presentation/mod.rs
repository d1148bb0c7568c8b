pub mod console;
pub mod rest;

pub use console::{CommandError, Console, ConsoleCommand, render_plan};
pub use rest::{ApiError, AppState, VenueExecutionService, create_router};
