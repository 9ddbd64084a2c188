pub mod constants;
pub mod format;
pub mod string_utils;
pub mod token;

pub use constants::*;
pub use format::{format_elapsed, format_size};
pub use string_utils::{output_tail, safe_truncate_chars, truncate_cell};
pub use token::generate_token;
