use thiserror::Error;

/// Fatal errors raised before the first page is fetched.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("URL has no host: {0}")]
    MissingHost(String),

    #[error("Unsupported scheme '{scheme}' in {url} (expected http or https)")]
    UnsupportedScheme { scheme: String, url: String },

    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// A single page could not be retrieved.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Response failed with status code: {code} and\nbody: {body}")]
    HttpStatus { code: u16, body: String },
}

/// A fetched page could not be scanned for links.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to read response body: {0}")]
    Body(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("HTML rewrite error: {0}")]
    Rewrite(#[from] lol_html::errors::RewritingError),
}

/// Anything that abandons one branch of the crawl.
#[derive(Error, Debug)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Why a raw link was left out of the frontier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("{0} is not a proper http/s URL")]
    Malformed(String),

    #[error("{url} uses non-http scheme '{scheme}'")]
    NonHttpScheme { url: String, scheme: String },

    #[error("{0} has no host")]
    EmptyHost(String),

    #[error("{url} is not an internal link (host {host})")]
    OffHost { url: String, host: String },
}

pub type Result<T> = std::result::Result<T, StartupError>;
