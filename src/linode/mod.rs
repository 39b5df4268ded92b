//! Linode API collaborator
//!
//! A thin `reqwest` client implementing [`InstanceApi`] against the Linode
//! REST API. It owns transport and authentication only: no retries, no
//! caching.

pub mod error;
pub mod instance;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};

use crate::core::api::{InstanceApi, ListOptions};
pub use error::ApiError;
pub use instance::{Instance, InstanceStatus};
use instance::{ErrorBody, Page};

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "LINODE_API_TOKEN";
/// Environment variable overriding the API base URL.
pub const URL_ENV: &str = "LINODE_URL";
/// Environment variable overriding the API version path segment.
pub const API_VERSION_ENV: &str = "LINODE_API_VERSION";

/// Configuration for [`LinodeClient`]
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Personal access token sent as a bearer token
    pub token: String,
    /// Base URL (default: https://api.linode.com)
    pub base_url: String,
    /// API version path segment (default: v4)
    pub api_version: String,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            base_url: "https://api.linode.com".to_string(),
            api_version: "v4".to_string(),
            user_agent: format!("{}/{}", crate::NAME, crate::VERSION),
        }
    }
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Default::default()
        }
    }

    /// Reads the configuration from `LINODE_API_TOKEN`, `LINODE_URL` and
    /// `LINODE_API_VERSION`. Only the token is required.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let token = lookup(TOKEN_ENV)
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::MissingToken(TOKEN_ENV))?;
        let mut config = Self::new(token);
        if let Some(url) = lookup(URL_ENV).filter(|u| !u.is_empty()) {
            config.base_url = url;
        }
        if let Some(version) = lookup(API_VERSION_ENV).filter(|v| !v.is_empty()) {
            config.api_version = version;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version.trim_matches('/'),
            path
        )
    }
}

/// Rewrites every non-ASCII character of a JSON document as a `\\uXXXX`
/// escape. Header values carry bytes, not UTF-8, so filters must be ASCII.
fn ascii_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    out
}

/// Linode API client wrapping a `reqwest::Client`.
#[derive(Clone)]
pub struct LinodeClient {
    pub(crate) client: reqwest::Client,
    pub(crate) config: ClientConfig,
}

impl LinodeClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    /// Uses a caller-built `reqwest::Client`, e.g. one with custom timeouts.
    pub fn with_http_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn headers(&self, filter: Option<&str>) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.config.token))?,
        );
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.config.user_agent)?);
        if let Some(filter) = filter {
            headers.insert("X-Filter", HeaderValue::from_str(&ascii_json(filter))?);
        }
        Ok(headers)
    }

    async fn error_from(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message())
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or(text);
        ApiError::Status { status, message }
    }

    async fn list_page(
        &self,
        options: &ListOptions,
        page: u32,
    ) -> Result<Page<Instance>, ApiError> {
        let mut query = vec![("page", page.to_string())];
        if options.page_size > 0 {
            query.push(("page_size", options.page_size.to_string()));
        }

        let response = self
            .client
            .get(self.config.endpoint("linode/instances"))
            .headers(self.headers(options.filter.as_deref())?)
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl InstanceApi for LinodeClient {
    type Instance = Instance;
    type Error = ApiError;

    async fn list_instances(&self, options: &ListOptions) -> Result<Vec<Instance>, ApiError> {
        let first = self.list_page(options, 1).await?;
        let mut instances = first.data;
        let mut page = first.page.max(1);
        while page < first.pages {
            page += 1;
            instances.extend(self.list_page(options, page).await?.data);
        }
        Ok(instances)
    }

    async fn get_instance(&self, id: i64) -> Result<Option<Instance>, ApiError> {
        let response = self
            .client
            .get(self.config.endpoint(&format!("linode/instances/{}", id)))
            .headers(self.headers(None)?)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let text = response.text().await?;
        Ok(Some(serde_json::from_str(&text)?))
    }
}
