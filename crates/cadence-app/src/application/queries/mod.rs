mod assignment_queries;

pub use assignment_queries::AssignmentQueryService;
