//! Traversal configuration
//!
//! Settings for walking a paginated collection, loaded from a YAML (or JSON)
//! file and overridable from the command line.
//!
//! ```yaml
//! url: https://graph.example.com/v1.0/users
//! headers:
//!   ConsistencyLevel: eventual
//! bearer_token: eyJ0eXAi...
//! timeout_secs: 20
//! max_retries: 2
//! max_items: 500
//! ```

use crate::adapter::RequestOption;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::StringMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Settings for one traversal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// URL of the first page
    pub url: Option<String>,

    /// Headers sent with every page request
    pub headers: StringMap,

    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Transport retries per page request (0 = no retries)
    pub max_retries: u32,

    /// Bearer token sent as `Authorization`
    pub bearer_token: Option<String>,

    /// `Accept` header override
    pub accept: Option<String>,

    /// Stop after this many items
    pub max_items: Option<usize>,

    /// User agent override
    pub user_agent: Option<String>,
}

impl WalkConfig {
    /// Load a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Parse a config from YAML (JSON is valid YAML)
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse and check the URL of the first page
    pub fn start_url(&self) -> Result<Url> {
        let url = self
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::missing_field("url"))?;

        let parsed = Url::parse(url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidConfigValue {
                field: "url".to_string(),
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        Ok(parsed)
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        self.start_url()?;
        if self.max_items == Some(0) {
            return Err(Error::InvalidConfigValue {
                field: "max_items".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Request options for every page request, the first one included
    pub fn request_options(&self) -> Vec<RequestOption> {
        let mut options = Vec::new();
        if let Some(secs) = self.timeout_secs {
            options.push(RequestOption::Timeout(Duration::from_secs(secs)));
        }
        if self.max_retries > 0 {
            options.push(RequestOption::MaxRetries(self.max_retries));
        }
        if let Some(token) = &self.bearer_token {
            options.push(RequestOption::BearerToken(token.clone()));
        }
        if let Some(accept) = &self.accept {
            options.push(RequestOption::Accept(accept.clone()));
        }
        options
    }

    /// Build the HTTP transport for this traversal
    pub fn http_client(&self) -> HttpClient {
        let mut builder = HttpClientConfig::builder();
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        HttpClient::with_config(builder.build())
    }

    /// Layer command-line overrides on top of this config
    #[must_use]
    pub fn merge(
        mut self,
        url: Option<String>,
        headers: StringMap,
        max_items: Option<usize>,
    ) -> Self {
        if url.is_some() {
            self.url = url;
        }
        self.headers.extend(headers);
        if max_items.is_some() {
            self.max_items = max_items;
        }
        self
    }
}

/// Parse a `Name: value` header argument
pub fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| Error::config(format!("Invalid header '{raw}', expected 'Name: value'")))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(Error::config(format!("Invalid header '{raw}', empty name")));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
