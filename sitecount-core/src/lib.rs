pub mod crawl;
pub mod rank;
pub mod report;

pub use crawl::{CrawlOptions, execute_crawl};
pub use rank::{RankedEntry, rank};
pub use report::{CrawlReport, CrawlSummary, ReportFormat};
