mod delete_series_handler;
mod mark_missed_handler;
mod open_for_check_in_handler;
mod pause_series_handler;
mod request_reopen_handler;
mod resolve_week_handler;
mod submit_response_handler;


pub use delete_series_handler::DeleteSeriesCommandHandler;
pub use mark_missed_handler::MarkMissedCommandHandler;
pub use open_for_check_in_handler::OpenForCheckInCommandHandler;
pub use pause_series_handler::{PauseSeriesCommandHandler, UnpauseSeriesCommandHandler};
pub use request_reopen_handler::RequestReopenCommandHandler;
pub use resolve_week_handler::ResolveWeekCommandHandler;
pub use submit_response_handler::SubmitResponseCommandHandler;
