pub mod constants;
pub mod string_utils;

pub use constants::*;
pub use string_utils::{normalize_term, parse_signal_text};
