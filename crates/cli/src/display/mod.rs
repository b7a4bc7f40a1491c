pub mod formatter;

pub use formatter::{format_value, print_header, print_history};
