use std::env;

use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Page URL is not valid: {0}")]
    BadPageUrl(#[from] url::ParseError),

    #[error("Page URL scheme must be http or https, got {0}")]
    UnsupportedScheme(String),
}

#[derive(Default, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Address of the dashboard page this client mirrors
    pub page_url: String,
}

impl NetworkConfig {
    pub fn new() -> Self {
        let page_url =
            env::var("KAGAMI_PAGE_URL").unwrap_or_else(|_| "http://localhost:8095/".to_string());

        Self { page_url }
    }

    /// WebSocket endpoint of the live event stream. The socket scheme
    /// follows the page scheme, `wss` iff the page is served over
    /// `https`.
    pub fn events_url(&self) -> Result<String, ConfigError> {
        let mut url = self.page_base()?;
        let scheme = match url.scheme() {
            "https" => "wss",
            "http" => "ws",
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        };
        if url.set_scheme(scheme).is_err() {
            return Err(ConfigError::UnsupportedScheme(scheme.to_string()));
        }
        Ok(url.join("api/events")?.to_string())
    }

    /// One-shot snapshot endpoint with the recent finalized texts.
    pub fn recent_url(&self) -> Result<String, ConfigError> {
        Ok(self.page_base()?.join("api/recent")?.to_string())
    }

    fn page_base(&self) -> Result<Url, ConfigError> {
        let mut raw = self.page_url.clone();
        // Endpoints hang off the page path, so the base must end in "/"
        // or Url::join would replace the last path segment.
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Ok(Url::parse(&raw)?)
    }
}
