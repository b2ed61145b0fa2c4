use crate::origin::CanonicalUrl;
use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitStatus {
    /// Inserted, fetch not finished yet.
    Pending,
    Fetched,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Visit {
    pub count: u64,
    pub status: VisitStatus,
}

/// Reference counts for every page the crawl has seen.
///
/// Entries are never removed, so `len()` bounds the number of fetches issued.
#[derive(Debug, Clone, Default)]
pub struct VisitedMap {
    entries: HashMap<CanonicalUrl, Visit>,
}

impl VisitedMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one encounter of `url`.
    ///
    /// Returns true when the URL was unseen and has just been inserted with
    /// `seed` as its count; otherwise bumps the existing count and returns false.
    pub fn record(&mut self, url: &CanonicalUrl, seed: u64) -> bool {
        match self.entries.entry(url.clone()) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().count += 1;
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(Visit {
                    count: seed,
                    status: VisitStatus::Pending,
                });
                true
            }
        }
    }

    /// Bumps the count of an already-seen URL. Unseen URLs are left alone.
    pub fn bump(&mut self, url: &CanonicalUrl) -> bool {
        match self.entries.get_mut(url) {
            Some(visit) => {
                visit.count += 1;
                true
            }
            None => false,
        }
    }

    pub fn set_status(&mut self, url: &CanonicalUrl, status: VisitStatus) {
        if let Some(visit) = self.entries.get_mut(url) {
            visit.status = status;
        }
    }

    pub fn contains(&self, url: &CanonicalUrl) -> bool {
        self.entries.contains_key(url)
    }

    pub fn get(&self, url: &CanonicalUrl) -> Option<&Visit> {
        self.entries.get(url)
    }

    pub fn count(&self, url: &CanonicalUrl) -> Option<u64> {
        self.entries.get(url).map(|v| v.count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalUrl, &Visit)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Normalizer;
    use crate::origin::RootOrigin;

    fn url(path: &str) -> CanonicalUrl {
        Normalizer::new(RootOrigin::parse("https://example.com").unwrap())
            .normalize(path)
            .unwrap()
    }

    #[test]
    fn test_first_record_inserts_with_seed() {
        let mut visited = VisitedMap::new();
        assert!(visited.record(&url("/a"), 1));
        assert_eq!(visited.count(&url("/a")), Some(1));
        assert_eq!(visited.get(&url("/a")).unwrap().status, VisitStatus::Pending);
    }

    #[test]
    fn test_repeat_record_increments() {
        let mut visited = VisitedMap::new();
        visited.record(&url("/"), 0);
        assert!(!visited.record(&url("/"), 1));
        assert!(!visited.record(&url("/"), 1));
        assert_eq!(visited.count(&url("/")), Some(2));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_bump_only_touches_seen_urls() {
        let mut visited = VisitedMap::new();
        assert!(!visited.bump(&url("/new")));
        assert!(visited.is_empty());

        visited.record(&url("/new"), 1);
        assert!(visited.bump(&url("/new")));
        assert_eq!(visited.count(&url("/new")), Some(2));
    }

    #[test]
    fn test_status_transitions() {
        let mut visited = VisitedMap::new();
        visited.record(&url("/a"), 1);
        visited.set_status(&url("/a"), VisitStatus::Failed);
        assert_eq!(visited.get(&url("/a")).unwrap().status, VisitStatus::Failed);

        // Unknown URLs are not inserted by a status change
        visited.set_status(&url("/b"), VisitStatus::Fetched);
        assert!(!visited.contains(&url("/b")));
    }
}
