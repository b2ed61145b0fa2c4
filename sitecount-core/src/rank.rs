// Ranking of crawled pages by how often they were linked to

use serde::{Deserialize, Serialize};
use sitecount_scanner::{CanonicalUrl, VisitStatus, VisitedMap};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub url: CanonicalUrl,
    pub count: u64,
}

impl fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} has {} instances", self.url, self.count)
    }
}

/// Orders pages by reference count, highest first.
///
/// Equal counts are ordered by URL so the same crawl always renders the same
/// report. Pages whose fetch failed are left out.
pub fn rank(visited: &VisitedMap) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = visited
        .iter()
        .filter(|(_, visit)| visit.status != VisitStatus::Failed)
        .map(|(url, visit)| RankedEntry {
            url: url.clone(),
            count: visit.count,
        })
        .collect();

    entries.sort_by(compare_entries);
    entries
}

fn compare_entries(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.url.cmp(&b.url))
}
