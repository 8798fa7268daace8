pub mod logging;
pub mod time;

pub use logging::{init_tracing, log_file_path, LogTarget};
pub use time::{format_relative, parse_reference_time};
