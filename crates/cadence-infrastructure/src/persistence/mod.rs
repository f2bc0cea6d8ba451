pub mod repositories;

mod database;
mod error_mapper;
mod result_ext;

pub use database::Database;
pub use error_mapper::RepositoryErrorMapper;
pub use result_ext::ResultExt;
