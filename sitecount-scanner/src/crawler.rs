use crate::error::{PageError, Result};
use crate::extract::extract_links;
use crate::fetch::Fetcher;
use crate::frontier::Frontier;
use crate::normalize::Normalizer;
use crate::origin::{CanonicalUrl, RootOrigin};
use crate::result::{CrawlOutcome, FailedPage};
use tracing::{debug, info, warn};

/// Walks every page reachable from a root URL on the root's host, one
/// request at a time.
pub struct Crawler {
    fetcher: Fetcher,
    max_pages: Option<usize>,
    https_upgrade: bool,
}

impl Crawler {
    pub fn new() -> Result<Self> {
        Ok(Self::with_fetcher(Fetcher::new()?))
    }

    pub fn with_fetcher(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            max_pages: None,
            https_upgrade: true,
        }
    }

    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Whether canonical URLs (and so every fetch after the root) use https.
    pub fn with_https_upgrade(mut self, upgrade: bool) -> Self {
        self.https_upgrade = upgrade;
        self
    }

    pub async fn crawl(&self, root: &str) -> Result<CrawlOutcome> {
        info!("Starting crawl of {}", root);

        let origin = RootOrigin::parse(root)?;
        let normalizer = Normalizer::new(origin).with_https_upgrade(self.https_upgrade);
        let root_url = normalizer.canonical_root();

        let mut frontier = Frontier::new([root_url.clone()]).with_max_pages(self.max_pages);
        let mut outcome = CrawlOutcome::new(root_url);

        while let Some(url) = frontier.next_unseen() {
            match self.scan_page(&url, &normalizer).await {
                Ok(links) => {
                    info!("Found {} internal links on {}", links.len(), url);
                    frontier.mark_fetched(&url);
                    frontier.push_links(links);
                    outcome.pages_fetched += 1;
                    debug!("{} candidates pending", frontier.pending_len());
                }
                Err(e) => {
                    warn!("Crawl error for {}: {}", url, e);
                    frontier.mark_failed(&url);
                    outcome.failures.push(FailedPage {
                        url,
                        error: e.to_string(),
                    });
                }
            }
        }

        outcome.dropped_by_limit = frontier.dropped();
        outcome.visited = frontier.into_visited();

        info!(
            "Crawl complete. Visited {} pages ({} failed)",
            outcome.visited.len(),
            outcome.failures.len()
        );
        Ok(outcome)
    }

    /// Fetches one page and returns its in-scope links, in document order.
    async fn scan_page(
        &self,
        url: &CanonicalUrl,
        normalizer: &Normalizer,
    ) -> std::result::Result<Vec<CanonicalUrl>, PageError> {
        let response = self.fetcher.fetch(url).await?;
        let raw_links = extract_links(response.bytes_stream()).await?;
        Ok(normalizer.normalize_all(raw_links))
    }
}
