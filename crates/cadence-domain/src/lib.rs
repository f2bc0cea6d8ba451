// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod assignment;
pub mod client;
pub mod events;
pub mod messaging;
pub mod scoring;
pub mod shared;
pub mod window;

// Re-exports for convenience
pub use events::DomainEvent;
pub use shared::{AssignmentId, ClientId, CoachId, DomainError, FormId};
