//! FlipFlop HTTP client implementation

use crate::error::GoffError;
use crate::extract;
use crate::parser::{PageParser, ScoreInfo};
use reqwest::header::HeaderValue;
use scraper::Html;
use zeroize::Zeroize;

/// The main FlipFlop HTTP client
///
/// Provides blocking access to the puzzle site: year-score scraping,
/// puzzle-part text extraction, part-availability scanning, and input
/// download. A session token is passed per call rather than stored on the
/// client.
///
/// # Example
///
/// ```no_run
/// use goff_http_client::GoffClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GoffClient::new()?;
/// let token = Some("your_session_token");
///
/// let info = client.fetch_score(2025, token)?;
/// println!("Pointers: {}/{}", info.score, info.total);
///
/// let text = client.fetch_part(2025, 1, 2, token)?;
/// println!("{text}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct GoffClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
    parser: PageParser,
}

impl GoffClient {
    /// Create a new client with rustls-tls configuration
    ///
    /// # Errors
    ///
    /// Returns `GoffError::ClientInit` if the HTTP client cannot be
    /// initialized.
    pub fn new() -> Result<Self, GoffError> {
        Self::builder().build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> GoffClientBuilder {
        GoffClientBuilder::new()
    }

    /// Create a secure cookie header value from a session token
    ///
    /// The header is marked sensitive and the temporary string is zeroized
    /// after use.
    fn create_cookie_header(token: &str) -> Result<HeaderValue, GoffError> {
        let mut cookie_string = format!("PHPSESSID={}", token.trim());
        let header_value = HeaderValue::from_bytes(cookie_string.as_bytes())
            .map_err(|_| GoffError::ClientInit("invalid session token format".to_string()))?;

        let mut sensitive_header = header_value;
        sensitive_header.set_sensitive(true);
        cookie_string.zeroize();

        Ok(sensitive_header)
    }

    /// Build a URL from path segments relative to the base URL
    fn url(&self, segments: &[&str]) -> Result<reqwest::Url, GoffError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GoffError::ClientInit("cannot modify base URL path".to_string()))?
            .clear()
            .extend(segments);
        Ok(url)
    }

    /// GET a page body, attaching the session cookie when a non-blank token
    /// is given. Non-2xx statuses are reported distinctly from transport
    /// failures.
    fn get_body(&self, url: reqwest::Url, token: Option<&str>) -> Result<String, GoffError> {
        let mut request = self.client.get(url);
        if let Some(token) = token.filter(|token| !token.trim().is_empty()) {
            request = request.header("Cookie", Self::create_cookie_header(token)?);
        }

        let response = request.send()?;
        if !response.status().is_success() {
            return Err(GoffError::InvalidStatus {
                status: response.status(),
            });
        }

        response.text().map_err(|_| GoffError::Encoding)
    }

    /// Fetch the year page and scrape `(score, total)` from it
    ///
    /// # Errors
    ///
    /// * `GoffError::InvalidYear` - year below 1000
    /// * `GoffError::NotAuthenticated` - page carries no score assignment
    /// * `GoffError::Request` / `GoffError::InvalidStatus` - fetch failed
    pub fn fetch_score(&self, year: u16, token: Option<&str>) -> Result<ScoreInfo, GoffError> {
        if year < 1000 {
            return Err(GoffError::InvalidYear { year });
        }

        let url = self.url(&[&year.to_string()])?;
        let body = self.get_body(url, token)?;
        self.parser.scrape_score(&body)
    }

    /// Fetch a puzzle page and render the requested part to plain text
    ///
    /// # Errors
    ///
    /// * `GoffError::InvalidPart` - part is 0
    /// * `GoffError::PartNotFound` - no matching article on the page; the
    ///   error lists the parts that do exist
    /// * `GoffError::EmptySection` - matching article renders to no text
    pub fn fetch_part(
        &self,
        year: u16,
        puzzle: u8,
        part: u8,
        token: Option<&str>,
    ) -> Result<String, GoffError> {
        if part == 0 {
            return Err(GoffError::InvalidPart { part });
        }

        let url = self.url(&[&year.to_string(), &puzzle.to_string()])?;
        let body = self.get_body(url, token)?;
        let html = Html::parse_document(&body);
        extract::extract_part_text(&html, part)
    }

    /// Fetch a puzzle page and list the parts published on it, ascending
    pub fn available_parts(
        &self,
        year: u16,
        puzzle: u8,
        token: Option<&str>,
    ) -> Result<Vec<u8>, GoffError> {
        let url = self.url(&[&year.to_string(), &puzzle.to_string()])?;
        let body = self.get_body(url, token)?;
        let html = Html::parse_document(&body);
        Ok(extract::available_parts(&html))
    }

    /// Download the personalized puzzle input
    ///
    /// The input endpoint requires a session token; the site answers a
    /// logged-out request with 200 and a plain-text notice, which is mapped
    /// to `GoffError::NotAuthenticated`.
    pub fn fetch_input(&self, year: u16, puzzle: u8, token: &str) -> Result<String, GoffError> {
        if token.trim().is_empty() {
            return Err(GoffError::NotAuthenticated);
        }

        let url = self.url(&[&year.to_string(), &puzzle.to_string(), "input"])?;
        let body = self.get_body(url, Some(token))?;
        if self.parser.input_logged_out(&body) {
            return Err(GoffError::NotAuthenticated);
        }

        Ok(body)
    }
}

/// Builder for configuring a FlipFlop HTTP client
///
/// Allows overriding the base URL (for testing against a mock server) and
/// the underlying reqwest client configuration.
#[derive(Debug)]
pub struct GoffClientBuilder {
    base_url: Option<reqwest::Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl GoffClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            base_url: None,
            client_builder: None,
        }
    }

    /// Set a custom base URL, validated at builder time
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, GoffError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Set a custom HTTP client builder (timeouts, proxies, etc.)
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Build the client with the configured settings
    ///
    /// # Errors
    ///
    /// Returns `GoffError::ClientInit` if the HTTP client cannot be
    /// initialized.
    pub fn build(self) -> Result<GoffClient, GoffError> {
        let base_url = self.base_url.unwrap_or_else(|| {
            reqwest::Url::parse("https://flipflop.slome.org")
                .expect("default base URL should always be valid")
        });

        let builder = self
            .client_builder
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls());

        let client = builder
            .build()
            .map_err(|e| GoffError::ClientInit(e.to_string()))?;

        Ok(GoffClient {
            client,
            base_url,
            parser: PageParser::new(),
        })
    }
}

impl Default for GoffClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mock_client(server: &mockito::Server) -> GoffClient {
        GoffClient::builder()
            .base_url(server.url())
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_invalid_base_url() {
        let result = GoffClient::builder().base_url("not a valid url");

        assert!(result.is_err());
    }

    #[test]
    fn test_default_base_url() {
        let client = GoffClient::builder().build().unwrap();
        assert_eq!(client.base_url.as_str(), "https://flipflop.slome.org/");
    }

    #[test]
    fn test_fetch_score_sends_session_cookie() {
        let mut server = mockito::Server::new();
        let body = r#"<script>const score = 9;</script>
            completed <span class="score">?</span>/24 parts"#;
        let mock = server
            .mock("GET", "/2025")
            .match_header("cookie", "PHPSESSID=abc123")
            .with_status(200)
            .with_body(body)
            .expect(1)
            .create();

        let client = mock_client(&server);
        let info = client.fetch_score(2025, Some("abc123")).unwrap();
        assert_eq!(info, ScoreInfo { score: 9, total: 24 });

        mock.assert();
    }

    #[test]
    fn test_blank_token_sends_no_cookie() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2025")
            .match_header("cookie", mockito::Matcher::Missing)
            .with_status(200)
            .with_body("<script>const score = 0;</script>")
            .expect(1)
            .create();

        let client = mock_client(&server);
        let info = client.fetch_score(2025, Some("   ")).unwrap();
        assert_eq!(info.score, 0);

        mock.assert();
    }

    #[test]
    fn test_fetch_score_logged_out_page() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/2025")
            .with_status(200)
            .with_body("<html><p>Please log in.</p></html>")
            .create();

        let client = mock_client(&server);
        assert!(matches!(
            client.fetch_score(2025, None),
            Err(GoffError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_fetch_score_rejects_invalid_year() {
        let client = GoffClient::new().unwrap();
        assert!(matches!(
            client.fetch_score(999, None),
            Err(GoffError::InvalidYear { year: 999 })
        ));
    }

    #[test]
    fn test_fetch_part_renders_page_text() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/2025/3")
            .with_status(200)
            .with_body(
                r#"<html><body><article class="description">
                   <h3 id="part-1">Part 1</h3><p>Count the frogs.</p>
                   </article></body></html>"#,
            )
            .create();

        let client = mock_client(&server);
        let text = client.fetch_part(2025, 3, 1, None).unwrap();
        assert_eq!(text, "Part 1\n\nCount the frogs.");
    }

    #[test]
    fn test_fetch_part_rejects_part_zero() {
        let client = GoffClient::new().unwrap();
        assert!(matches!(
            client.fetch_part(2025, 1, 0, None),
            Err(GoffError::InvalidPart { part: 0 })
        ));
    }

    #[test]
    fn test_available_parts_from_page() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/2025/7")
            .with_status(200)
            .with_body(r#"<h3 id="part-0">intro</h3><h3 id="part-1">a</h3><h3 id="part-2">b</h3>"#)
            .create();

        let client = mock_client(&server);
        assert_eq!(client.available_parts(2025, 7, None).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_fetch_input_requires_token() {
        let client = GoffClient::new().unwrap();
        assert!(matches!(
            client.fetch_input(2025, 1, "  "),
            Err(GoffError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_fetch_input_detects_logged_out_body() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/2025/1/input")
            .with_status(200)
            .with_body("You must be logged in to get your puzzle input.")
            .create();

        let client = mock_client(&server);
        assert!(matches!(
            client.fetch_input(2025, 1, "token"),
            Err(GoffError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_fetch_input_returns_raw_body() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/2025/1/input")
            .with_status(200)
            .with_body("1 2 3\n4 5 6\n")
            .create();

        let client = mock_client(&server);
        assert_eq!(client.fetch_input(2025, 1, "token").unwrap(), "1 2 3\n4 5 6\n");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_non_success_status_is_reported_distinctly(
            year in 2015u16..2030u16,
            puzzle in 1u8..=25u8,
            status_code in prop::sample::select(vec![400, 401, 403, 404, 429, 500, 502, 503]),
        ) {
            let mut server = mockito::Server::new();
            let expected_path = format!("/{year}/{puzzle}");
            let mock = server
                .mock("GET", expected_path.as_str())
                .with_status(status_code)
                .with_body("error response")
                .expect(1)
                .create();

            let client = mock_client(&server);
            let result = client.available_parts(year, puzzle, None);

            match result.unwrap_err() {
                GoffError::InvalidStatus { status } => {
                    prop_assert_eq!(status.as_u16(), status_code as u16);
                }
                other => prop_assert!(false, "expected InvalidStatus, got {:?}", other),
            }

            mock.assert();
        }

        #[test]
        fn prop_base_url_configuration(
            scheme in prop::sample::select(vec!["http", "https"]),
            host in "[a-z]{3,10}",
            port in 1000u16..10000u16,
        ) {
            let base_url = format!("{}://{}:{}", scheme, host, port);

            let client = GoffClient::builder()
                .base_url(&base_url)
                .unwrap()
                .build()
                .unwrap();

            prop_assert_eq!(client.base_url.scheme(), scheme);
            prop_assert_eq!(client.base_url.host_str(), Some(host.as_str()));
            prop_assert_eq!(client.base_url.port(), Some(port));
        }
    }
}
