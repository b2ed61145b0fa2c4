use crate::origin::CanonicalUrl;
use crate::visited::VisitedMap;
use serde::{Deserialize, Serialize};

/// A page whose branch was abandoned, with the diagnostic that was logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedPage {
    pub url: CanonicalUrl,
    pub error: String,
}

/// Everything one crawl produced.
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub root: CanonicalUrl,
    pub visited: VisitedMap,
    pub pages_fetched: usize,
    pub failures: Vec<FailedPage>,
    pub dropped_by_limit: usize,
}

impl CrawlOutcome {
    pub fn new(root: CanonicalUrl) -> Self {
        Self {
            root,
            visited: VisitedMap::new(),
            pages_fetched: 0,
            failures: Vec::new(),
            dropped_by_limit: 0,
        }
    }
}
