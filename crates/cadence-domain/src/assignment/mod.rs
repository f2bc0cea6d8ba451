mod aggregate;
mod pause;
mod recurrence;
mod repository;
mod value_objects;

#[cfg(test)]
mod aggregate_test;

pub use aggregate::{AssignmentBuilder, CheckInAssignment};
pub use pause::{PauseEngine, PauseOutcome, UnpauseOutcome};
pub use recurrence::RecurrencePlanner;
pub use repository::AssignmentRepository;
pub use value_objects::{
    AssignmentStatus, DisplayStatus, MissedReason, PauseRecord, RecurrenceKey,
};
