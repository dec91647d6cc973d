pub mod window;

pub use window::{build_date_window, date_window_from_str, parse_anchor, DateWindow, WINDOW_DAYS};
