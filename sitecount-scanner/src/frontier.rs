//! Depth-first worklist over canonical URLs.
//!
//! The frontier decides which URL is fetched next and owns the [`VisitedMap`].
//! A candidate is checked against the map when it is popped, not when it is
//! pushed, which gives the same visit order and the same counts as walking the
//! link graph recursively: a page's links are fully explored before its next
//! sibling is looked at.

use crate::origin::CanonicalUrl;
use crate::visited::{VisitStatus, VisitedMap};
use tracing::debug;

/// Initial count of a crawl root. Roots are not referenced by any link.
pub const ROOT_SEED: u64 = 0;

/// Initial count of a page first seen as an outgoing link.
pub const LINK_SEED: u64 = 1;

#[derive(Debug, Clone)]
struct Candidate {
    url: CanonicalUrl,
    seed: u64,
}

#[derive(Debug, Clone)]
pub struct Frontier {
    pending: Vec<Candidate>,
    visited: VisitedMap,
    max_pages: Option<usize>,
    dropped: usize,
}

impl Frontier {
    pub fn new<I>(roots: I) -> Self
    where
        I: IntoIterator<Item = CanonicalUrl>,
    {
        let mut frontier = Self {
            pending: Vec::new(),
            visited: VisitedMap::new(),
            max_pages: None,
            dropped: 0,
        };
        frontier.push(roots.into_iter().collect(), ROOT_SEED);
        frontier
    }

    /// Caps the number of distinct pages the crawl may enter.
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Queues the links found on the page that was just fetched.
    ///
    /// They are popped in the order given, before anything queued earlier.
    pub fn push_links(&mut self, links: Vec<CanonicalUrl>) {
        self.push(links, LINK_SEED);
    }

    fn push(&mut self, urls: Vec<CanonicalUrl>, seed: u64) {
        self.pending
            .extend(urls.into_iter().rev().map(|url| Candidate { url, seed }));
    }

    /// Pops candidates until one has never been seen, and returns it for fetching.
    ///
    /// Seen candidates only have their count bumped. The returned URL is
    /// already in the visited map, so it can never be handed out twice.
    pub fn next_unseen(&mut self) -> Option<CanonicalUrl> {
        while let Some(candidate) = self.pending.pop() {
            if self.visited.bump(&candidate.url) {
                continue;
            }

            if self.limit_reached() {
                debug!("Page limit reached, dropping {}", candidate.url);
                self.dropped += 1;
                continue;
            }

            self.visited.record(&candidate.url, candidate.seed);
            return Some(candidate.url);
        }
        None
    }

    fn limit_reached(&self) -> bool {
        self.max_pages
            .is_some_and(|max| self.visited.len() >= max)
    }

    pub fn mark_fetched(&mut self, url: &CanonicalUrl) {
        self.visited.set_status(url, VisitStatus::Fetched);
    }

    pub fn mark_failed(&mut self, url: &CanonicalUrl) {
        self.visited.set_status(url, VisitStatus::Failed);
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn visited(&self) -> &VisitedMap {
        &self.visited
    }

    /// Unseen candidates discarded because of the page limit.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn into_visited(self) -> VisitedMap {
        self.visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Normalizer;
    use crate::origin::RootOrigin;
    use std::collections::HashMap;

    fn url(path: &str) -> CanonicalUrl {
        Normalizer::new(RootOrigin::parse("https://example.com").unwrap())
            .normalize(path)
            .unwrap()
    }

    fn urls(paths: &[&str]) -> Vec<CanonicalUrl> {
        paths.iter().map(|p| url(p)).collect()
    }

    /// Drives the frontier over an in-memory site, returning the fetch order.
    fn walk(frontier: &mut Frontier, site: &HashMap<&str, Vec<&str>>) -> Vec<String> {
        let mut order = Vec::new();
        while let Some(next) = frontier.next_unseen() {
            let path = next.as_str().trim_start_matches("https://example.com");
            order.push(path.to_string());
            frontier.mark_fetched(&next);
            let links = site.get(path).cloned().unwrap_or_default();
            frontier.push_links(urls(&links));
        }
        order
    }

    #[test]
    fn test_root_seeded_at_zero() {
        let mut frontier = Frontier::new([url("/")]);
        assert_eq!(frontier.next_unseen(), Some(url("/")));
        assert_eq!(frontier.visited().count(&url("/")), Some(ROOT_SEED));
        assert_eq!(frontier.next_unseen(), None);
    }

    #[test]
    fn test_cycle_fetches_each_page_once() {
        let site = HashMap::from([("/", vec!["/a"]), ("/a", vec!["/b"]), ("/b", vec!["/a"])]);
        let mut frontier = Frontier::new([url("/")]);

        let order = walk(&mut frontier, &site);

        assert_eq!(order, vec!["/", "/a", "/b"]);
        assert_eq!(frontier.visited().count(&url("/a")), Some(2));
        assert_eq!(frontier.visited().count(&url("/b")), Some(1));
    }

    #[test]
    fn test_duplicate_links_count_every_reference() {
        let site = HashMap::from([("/", vec!["/x", "/x", "/y"])]);
        let mut frontier = Frontier::new([url("/")]);

        walk(&mut frontier, &site);

        let visited = frontier.visited();
        assert_eq!(visited.count(&url("/")), Some(0));
        assert_eq!(visited.count(&url("/x")), Some(2));
        assert_eq!(visited.count(&url("/y")), Some(1));
        assert_eq!(visited.len(), 3);
    }

    #[test]
    fn test_links_back_to_root_are_counted() {
        let site = HashMap::from([("/", vec!["/a"]), ("/a", vec!["/"])]);
        let mut frontier = Frontier::new([url("/")]);

        walk(&mut frontier, &site);

        assert_eq!(frontier.visited().count(&url("/")), Some(1));
    }

    #[test]
    fn test_depth_first_order() {
        let site = HashMap::from([
            ("/", vec!["/a", "/b"]),
            ("/a", vec!["/a1", "/b"]),
            ("/b", vec!["/b1"]),
        ]);
        let mut frontier = Frontier::new([url("/")]);

        let order = walk(&mut frontier, &site);

        // "/b" is reached through "/a" first; the root's own "/b" link only counts
        assert_eq!(order, vec!["/", "/a", "/a1", "/b", "/b1"]);
        assert_eq!(frontier.visited().count(&url("/b")), Some(2));
    }

    #[test]
    fn test_page_limit_drops_unseen_candidates() {
        let site = HashMap::from([("/", vec!["/a", "/b", "/c", "/a"])]);
        let mut frontier = Frontier::new([url("/")]).with_max_pages(Some(2));

        let order = walk(&mut frontier, &site);

        assert_eq!(order, vec!["/", "/a"]);
        assert_eq!(frontier.dropped(), 2);
        // Seen pages keep counting after the limit is hit
        assert_eq!(frontier.visited().count(&url("/a")), Some(2));
        assert!(!frontier.visited().contains(&url("/b")));
    }

    #[test]
    fn test_failed_page_stays_visited() {
        let mut frontier = Frontier::new([url("/")]);
        let root = frontier.next_unseen().unwrap();
        frontier.mark_failed(&root);
        frontier.push_links(urls(&["/"]));

        assert_eq!(frontier.next_unseen(), None);
        assert_eq!(
            frontier.visited().get(&root).unwrap().status,
            VisitStatus::Failed
        );
    }

    #[test]
    fn test_pending_len_tracks_queue() {
        let mut frontier = Frontier::new([url("/")]);
        assert_eq!(frontier.pending_len(), 1);
        frontier.next_unseen();
        frontier.push_links(urls(&["/a", "/b"]));
        assert_eq!(frontier.pending_len(), 2);
    }
}
