use crate::error::{FetchError, StartupError};
use crate::origin::CanonicalUrl;
use reqwest::{Client, Response};
use tracing::debug;

/// Redirect hops followed before a request is treated as a transport failure.
pub const MAX_REDIRECTS: usize = 10;

/// Issues one GET per call. No retries and no timeout beyond the client defaults.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self, StartupError> {
        let client = Client::builder()
            .user_agent(concat!("sitecount/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client })
    }

    /// Fetches `url`, returning the response with its body still unread.
    ///
    /// Any status of 300 or above is an error; its body is read for the
    /// diagnostic.
    pub async fn fetch(&self, url: &CanonicalUrl) -> Result<Response, FetchError> {
        debug!("Fetching {}", url);

        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();

        if status.as_u16() > 299 {
            let body = response.text().await?;
            return Err(FetchError::HttpStatus {
                code: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Normalizer;
    use crate::origin::RootOrigin;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn canonical(server: &MockServer, raw: &str) -> CanonicalUrl {
        let origin = RootOrigin::parse(&server.uri()).unwrap();
        Normalizer::new(origin)
            .with_https_upgrade(false)
            .normalize(raw)
            .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<a href=\"/x\">x</a>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new().unwrap();
        let response = fetcher.fetch(&canonical(&mock_server, "/ok")).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(response.text().await.unwrap(), "<a href=\"/x\">x</a>");
    }

    #[tokio::test]
    async fn test_fetch_error_status_captures_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal oops"))
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new().unwrap();
        let err = fetcher
            .fetch(&canonical(&mock_server, "/broken"))
            .await
            .unwrap_err();

        match err {
            FetchError::HttpStatus { code, body } => {
                assert_eq!(code, 500);
                assert_eq!(body, "internal oops");
            }
            other => panic!("expected HttpStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_unfollowed_redirect_status_is_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/moved"))
            .respond_with(ResponseTemplate::new(304))
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new().unwrap();
        let err = fetcher
            .fetch(&canonical(&mock_server, "/moved"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::HttpStatus { code: 304, .. }));
    }

    #[tokio::test]
    async fn test_fetch_follows_redirects() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("location", format!("{}/new", mock_server.uri()).as_str()),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200).set_body_string("moved here"))
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new().unwrap();
        let response = fetcher.fetch(&canonical(&mock_server, "/old")).await.unwrap();
        assert_eq!(response.text().await.unwrap(), "moved here");
    }

    #[tokio::test]
    async fn test_fetch_transport_failure() {
        // Nothing listens on port 1
        let origin = RootOrigin::parse("http://127.0.0.1:1").unwrap();
        let url = Normalizer::new(origin)
            .with_https_upgrade(false)
            .normalize("/")
            .unwrap();

        let fetcher = Fetcher::new().unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
