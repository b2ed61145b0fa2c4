pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod frontier;
pub mod normalize;
pub mod origin;
pub mod result;
pub mod visited;

pub use crawler::Crawler;
pub use error::{ExtractError, FetchError, PageError, SkipReason, StartupError};
pub use fetch::Fetcher;
pub use frontier::Frontier;
pub use normalize::Normalizer;
pub use origin::{CanonicalUrl, RawLink, RootOrigin};
pub use result::{CrawlOutcome, FailedPage};
pub use visited::{Visit, VisitStatus, VisitedMap};
