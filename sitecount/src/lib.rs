pub mod commands;
pub mod handlers;

pub use commands::{CLAP_STYLING, command_argument_builder};

// Re-export commonly used handler functions for convenience
pub use handlers::{crawl_options, emit_report, handle_crawl, init_logging, log_level, report_format};

// Re-export crawl functionality from sitecount-core
pub use sitecount_core::crawl::{CrawlOptions, execute_crawl};
pub use sitecount_core::report::{CrawlReport, ReportFormat};
