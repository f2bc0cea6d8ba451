mod assignment_repo;
mod client_repo;

pub use assignment_repo::SqliteAssignmentRepository;
pub use client_repo::SqliteClientRepository;
