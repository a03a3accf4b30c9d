//! HTTP capability injected into the search sources.
//!
//! Sources never build their own client: they receive a `&dyn HttpClient`
//! so tests can script responses without touching the network.

use std::time::Duration;

use crate::error::SearchError;

/// Desktop browser user agent sent with every request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Per-request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimal blocking GET capability.
pub trait HttpClient {
    /// GET `url` with the given query parameters (percent-encoded by the
    /// implementation) and return the body as text.  Any non-2xx status is
    /// an error.
    fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, SearchError>;
}

/// [`HttpClient`] backed by a shared `ureq::Agent` (connection reuse only).
pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(user_agent)
            .timeout(timeout)
            .build();
        UreqClient { agent }
    }
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new(BROWSER_USER_AGENT, DEFAULT_TIMEOUT)
    }
}

impl HttpClient for UreqClient {
    fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, SearchError> {
        let mut request = self.agent.get(url);
        for (key, value) in query {
            request = request.query(key, value);
        }

        let response = request.call()?;
        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(SearchError::Status(status));
        }

        Ok(response.into_string()?)
    }
}
