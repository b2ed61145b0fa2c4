use crate::report::CrawlReport;
use sitecount_scanner::{Crawler, StartupError};
use tracing::info;

/// Options for configuring a crawl operation
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub url: String,
    /// Stop entering new pages once this many have been seen.
    pub max_pages: Option<usize>,
    /// Rewrite every canonical URL to https (the default).
    pub https_upgrade: bool,
}

impl CrawlOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_pages: None,
            https_upgrade: true,
        }
    }
}

/// Execute a crawl with the given options and rank what it found
pub async fn execute_crawl(options: CrawlOptions) -> Result<CrawlReport, StartupError> {
    let CrawlOptions {
        url,
        max_pages,
        https_upgrade,
    } = options;

    let crawler = Crawler::new()?
        .with_max_pages(max_pages)
        .with_https_upgrade(https_upgrade);

    let outcome = crawler.crawl(&url).await?;
    let report = CrawlReport::from_outcome(outcome);

    info!(
        "Ranked {} pages from {}",
        report.entries.len(),
        report.root
    );
    Ok(report)
}
