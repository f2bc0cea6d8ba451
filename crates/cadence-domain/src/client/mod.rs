mod aggregate;
mod repository;

pub use aggregate::Client;
pub use repository::ClientRepository;
