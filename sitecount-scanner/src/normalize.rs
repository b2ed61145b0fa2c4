//! Resolves raw `href` values against the root origin and filters them to the
//! root host.
//!
//! Only two shapes of link survive: origin-relative paths (`/docs`) and
//! absolute http(s) URLs on exactly the root host, compared case-sensitively
//! as written. Document-relative links
//! such as `about.html` fail to parse without a base and are skipped.

use crate::error::SkipReason;
use crate::origin::{
    CanonicalUrl, RawLink, RootOrigin, authority_of, is_http_scheme, written_host,
};
use tracing::{debug, info};
use url::Url;

/// Scheme written into every canonical URL unless the crawl keeps the root's.
pub const CANONICAL_SCHEME: &str = "https";

#[derive(Debug, Clone)]
pub struct Normalizer {
    origin: RootOrigin,
    canonical_scheme: String,
}

impl Normalizer {
    pub fn new(origin: RootOrigin) -> Self {
        Self {
            origin,
            canonical_scheme: CANONICAL_SCHEME.to_string(),
        }
    }

    /// When `upgrade` is false the root's own scheme is used for canonical URLs.
    pub fn with_https_upgrade(mut self, upgrade: bool) -> Self {
        self.canonical_scheme = if upgrade {
            CANONICAL_SCHEME.to_string()
        } else {
            self.origin.scheme().to_string()
        };
        self
    }

    pub fn origin(&self) -> &RootOrigin {
        &self.origin
    }

    pub fn canonical_scheme(&self) -> &str {
        &self.canonical_scheme
    }

    /// Canonical form of the root URL itself.
    pub fn canonical_root(&self) -> CanonicalUrl {
        CanonicalUrl::from_parts(
            &self.canonical_scheme,
            self.origin.authority(),
            self.origin.url().path(),
        )
    }

    /// Canonicalises `raw`, or says why it is out of scope.
    pub fn classify(&self, raw: &str) -> Result<CanonicalUrl, SkipReason> {
        let full = if raw.starts_with('/') {
            format!("{}://{}{}", self.origin.scheme(), self.origin.authority(), raw)
        } else {
            raw.to_string()
        };

        let parsed = Url::parse(&full).map_err(|_| SkipReason::Malformed(full.clone()))?;

        if !is_http_scheme(parsed.scheme()) {
            return Err(SkipReason::NonHttpScheme {
                scheme: parsed.scheme().to_string(),
                url: full,
            });
        }

        let authority = authority_of(&parsed).ok_or_else(|| SkipReason::EmptyHost(full.clone()))?;
        if authority != self.origin.authority() {
            return Err(SkipReason::OffHost { url: full, host: authority });
        }

        // Host letter case must match the root as written
        if let Some(host) = written_host(raw)
            && host != self.origin.written_host()
        {
            return Err(SkipReason::OffHost {
                host: host.to_string(),
                url: full,
            });
        }

        Ok(CanonicalUrl::from_parts(
            &self.canonical_scheme,
            &authority,
            parsed.path(),
        ))
    }

    /// Canonicalises `raw`, logging and dropping anything out of scope.
    pub fn normalize(&self, raw: &str) -> Option<CanonicalUrl> {
        debug!("normalising {}", raw);
        match self.classify(raw) {
            Ok(url) => Some(url),
            Err(reason) => {
                info!("{}", reason);
                None
            }
        }
    }

    /// Normalises a page's links, keeping their order and duplicates.
    pub fn normalize_all<I>(&self, links: I) -> Vec<CanonicalUrl>
    where
        I: IntoIterator<Item = RawLink>,
    {
        links
            .into_iter()
            .filter_map(|link| self.normalize(link.as_str()))
            .collect()
    }
}
