mod execution;
mod order;
mod side;
mod venue;

pub use execution::{ExecutionLine, ExecutionPlan};
pub use order::{OrderId, RestingOrder};
pub use side::{Direction, OrderSide};
pub use venue::{Venue, VenueId};
