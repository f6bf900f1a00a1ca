pub mod format;
pub mod logging;

pub use format::{comma_decimal, format_num, format_score};
