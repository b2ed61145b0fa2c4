//! URL types shared by every stage of the crawl.

use crate::error::{Result, StartupError};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Scheme and host of the root URL. Every crawled page must live on this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootOrigin {
    url: Url,
    scheme: String,
    authority: String,
    written_host: String,
}

impl RootOrigin {
    /// Parses the root URL given on the command line.
    pub fn parse(root: &str) -> Result<Self> {
        let url = Url::parse(root).map_err(|source| StartupError::InvalidUrl {
            url: root.to_string(),
            source,
        })?;

        let authority =
            authority_of(&url).ok_or_else(|| StartupError::MissingHost(root.to_string()))?;

        if !is_http_scheme(url.scheme()) {
            return Err(StartupError::UnsupportedScheme {
                scheme: url.scheme().to_string(),
                url: root.to_string(),
            });
        }

        let host = written_host(root)
            .or_else(|| url.host_str())
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            scheme: url.scheme().to_string(),
            authority,
            written_host: host,
            url,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host plus explicit port, e.g. `example.com` or `127.0.0.1:8080`.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Host as it appeared on the command line, letter case intact.
    pub fn written_host(&self) -> &str {
        &self.written_host
    }

    /// The root URL exactly as parsed, before canonicalisation.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// An `href` value as it appeared in the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink(String);

impl RawLink {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RawLink {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// `scheme://host/path` with query and fragment removed. Dedup key of the crawl.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalUrl(String);

impl CanonicalUrl {
    pub(crate) fn from_parts(scheme: &str, authority: &str, path: &str) -> Self {
        Self(format!("{}://{}{}", scheme, authority, path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub(crate) fn is_http_scheme(scheme: &str) -> bool {
    scheme == "http" || scheme == "https"
}

/// Host with the port appended when it is not the scheme default.
pub(crate) fn authority_of(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Host of an absolute URL exactly as written, without userinfo or port.
///
/// `None` when `raw` does not start with `scheme://`.
pub(crate) fn written_host(raw: &str) -> Option<&str> {
    let (scheme, rest) = raw.trim().split_once("://")?;
    if !is_scheme_name(scheme) {
        return None;
    }

    let authority = rest.split(['/', '\\', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    Some(match host_port.rsplit_once(':') {
        Some((host, port)) if !port.contains(']') => host,
        _ => host_port,
    })
}

fn is_scheme_name(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
