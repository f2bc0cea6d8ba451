mod evaluator;
mod value_objects;


pub use evaluator::WindowEvaluator;
pub use value_objects::{parse_hhmm, parse_weekday, CheckInWindow, WindowAnchorConfig, WindowState};
