#![allow(dead_code)]

use gitlab_analyzer::error::{AnalyzerError, Result};
use gitlab_analyzer::gitlab::{ApiResponse, GitlabClient, Transport};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;

pub const HOST: &str = "gitlab.test";
pub const BASE: &str = "https://gitlab.test/api/v4";
pub const TOKEN: &str = "s3cret";

/// Serves canned responses keyed by path + query (token stripped) and
/// records every request in order.
#[derive(Default)]
pub struct FakeGitlab {
    routes: HashMap<String, ApiResponse>,
    requests: RefCell<Vec<String>>,
}

impl FakeGitlab {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, key: &str, response: ApiResponse) -> Self {
        self.routes.insert(key.to_string(), response);
        self
    }

    pub fn projects_page(self, page: u32, total_pages: u32, projects: Value) -> Self {
        let response = json_response(&projects).with_header("X-Total-Pages", total_pages.to_string());
        self.route(&format!("/projects?page={page}&per_page=20"), response)
    }

    pub fn commits_page(self, project: u64, page: u32, next: Option<u32>, commits: Value) -> Self {
        let response = json_response(&commits).with_header(
            "X-Next-Page",
            next.map(|n| n.to_string()).unwrap_or_default(),
        );
        self.route(
            &format!("/projects/{project}/repository/commits?page={page}&per_page=20"),
            response,
        )
    }

    pub fn detail(self, project: u64, id: &str, additions: i64, deletions: i64) -> Self {
        let body = json!({
            "id": id,
            "stats": { "additions": additions, "deletions": deletions, "total": additions + deletions }
        });
        self.route(
            &format!("/projects/{project}/repository/commits/{id}"),
            json_response(&body),
        )
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn requested(&self, key: &str) -> bool {
        self.requests.borrow().iter().any(|r| r == key)
    }

    pub fn client(self) -> GitlabClient<FakeGitlab> {
        GitlabClient::with_transport(HOST, "/api/v4", TOKEN, self)
    }
}

impl Transport for FakeGitlab {
    fn get(&self, url: &str) -> Result<ApiResponse> {
        assert!(url.ends_with(&format!("private_token={TOKEN}")), "token must be last: {url}");
        let key = url
            .strip_prefix(BASE)
            .unwrap_or(url)
            .split("private_token=")
            .next()
            .unwrap_or_default()
            .trim_end_matches(['?', '&'])
            .to_string();
        self.requests.borrow_mut().push(key.clone());
        self.routes
            .get(&key)
            .cloned()
            .ok_or_else(|| AnalyzerError::Other(format!("unexpected request {key}")))
    }
}

pub fn json_response(value: &Value) -> ApiResponse {
    ApiResponse::new(serde_json::to_vec(value).unwrap())
}

pub fn project(id: u64, name: &str) -> Value {
    json!({ "id": id, "name": name })
}

pub fn commit(id: &str, title: &str, author: &str, date: &str) -> Value {
    json!({
        "id": id,
        "short_id": &id[..id.len().min(8)],
        "title": title,
        "message": format!("{title}\n"),
        "author_name": author,
        "author_email": format!("{}@example.com", author.to_lowercase()),
        "authored_date": format!("{date}T12:00:00.000+00:00"),
    })
}
