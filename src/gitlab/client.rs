use crate::error::{AnalyzerError, Result};
use crate::util::redact_token;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::debug;

pub const DEFAULT_BASE_PATH: &str = "/api/v4";
pub const PER_PAGE: u32 = 20;

pub const TOTAL_PAGES_HEADER: &str = "x-total-pages";
pub const NEXT_PAGE_HEADER: &str = "x-next-page";

/// Raw body and headers of one successful GET.
#[derive(Debug, Clone, Default)]
pub struct ApiResponse {
    pub body: Vec<u8>,
    headers: HashMap<String, String>,
}

impl ApiResponse {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            headers: HashMap::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Numeric pagination header. Absent or blank is `None`, garbage is an error.
    pub fn page_header(&self, name: &str) -> Result<Option<u32>> {
        match self.header(name).map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value.parse().map(Some).map_err(|_| {
                AnalyzerError::Pagination(format!("invalid {name} header: {value:?}"))
            }),
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// One blocking GET per call. Non-success statuses must come back as errors.
pub trait Transport {
    fn get(&self, url: &str) -> Result<ApiResponse>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // Transport defaults: 4xx/5xx are errors, no timeout override.
        let agent = ureq::config::Config::builder().build().new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<ApiResponse> {
        let mut response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| AnalyzerError::Request {
                url: redact_token(url),
                source: Box::new(e),
            })?;

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_vec()?;

        Ok(ApiResponse { body, headers })
    }
}

/// Authenticated client for the GitLab REST API.
pub struct GitlabClient<T = UreqTransport> {
    transport: T,
    base_url: String,
    token: String,
}

impl GitlabClient<UreqTransport> {
    pub fn new(host: &str, base_path: &str, token: impl Into<String>) -> Self {
        Self::with_transport(host, base_path, token, UreqTransport::new())
    }
}

impl<T: Transport> GitlabClient<T> {
    pub fn with_transport(host: &str, base_path: &str, token: impl Into<String>, transport: T) -> Self {
        Self {
            transport,
            base_url: base_url(host, base_path),
            token: token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `{base_url}{path}?{query}&private_token={token}`.
    pub fn request(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse> {
        let mut url = format!("{}{}?", self.base_url, path);
        for (key, value) in query {
            url.push_str(key);
            url.push('=');
            url.push_str(value);
            url.push('&');
        }
        url.push_str("private_token=");
        url.push_str(&self.token);

        debug!(url = %redact_token(&url), "GET");
        self.transport.get(&url)
    }
}

pub fn projects_path() -> String {
    "/projects".to_string()
}

pub fn commits_path(project_id: u64) -> String {
    format!("/projects/{project_id}/repository/commits")
}

pub fn commit_path(project_id: u64, commit_id: &str) -> String {
    format!("/projects/{project_id}/repository/commits/{commit_id}")
}

pub fn page_query(page: u32) -> Vec<(&'static str, String)> {
    vec![("page", page.to_string()), ("per_page", PER_PAGE.to_string())]
}

fn base_url(host: &str, base_path: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    let host = if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    };
    let path = base_path.trim().trim_matches('/');
    if path.is_empty() {
        host
    } else {
        format!("{host}/{path}")
    }
}
