//! wiremock-based GitHub mock server for testing.
//!
//! Provides `GitHubMockServer` for HTTP-level mocking of the issue endpoints.
//!
//! # Usage
//!
//! ```ignore
//! let mock = GitHubMockServer::start().await;
//! let ctx = mock.repo("owner", "repo");
//!
//! ctx.issue(123).get().await;
//! ctx.issue(123).title("Custom").body("Body").get().await;
//! ctx.issue(123).pull_request().get().await;
//! ctx.issue(123).get_not_found().await;
//!
//! ctx.open_issue_pages(vec![
//!     vec![PageItem::issue(3, "three"), PageItem::pull_request(2)],
//!     vec![PageItem::issue(1, "one")],
//! ]).await;
//! ```

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::client::GitHubClient;

/// Create a mock issue JSON object in the REST API shape.
fn mock_issue(
    owner: &str,
    repo: &str,
    number: u64,
    title: &str,
    body: Option<&str>,
    is_pull_request: bool,
) -> serde_json::Value {
    let mut issue = json!({
        "id": number,
        "node_id": "I_test",
        "url": format!("https://api.github.com/repos/{owner}/{repo}/issues/{number}"),
        "html_url": format!("https://github.com/{owner}/{repo}/issues/{number}"),
        "number": number,
        "state": "open",
        "title": title,
        "body": body,
        "user": {"login": "testuser", "id": 1},
        "labels": [],
        "assignees": [],
        "locked": false,
        "comments": 0,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-02T00:00:00Z"
    });
    if is_pull_request {
        issue["pull_request"] = json!({
            "url": format!("https://api.github.com/repos/{owner}/{repo}/pulls/{number}"),
            "html_url": format!("https://github.com/{owner}/{repo}/pull/{number}"),
            "merged_at": null
        });
    }
    issue
}

/// One entry on a mocked issue-list page.
pub struct PageItem {
    number: u64,
    title: String,
    is_pull_request: bool,
}

impl PageItem {
    pub fn issue(number: u64, title: &str) -> Self {
        Self {
            number,
            title: title.to_string(),
            is_pull_request: false,
        }
    }

    pub fn pull_request(number: u64) -> Self {
        Self {
            number,
            title: format!("PR #{number}"),
            is_pull_request: true,
        }
    }
}

/// wiremock-based GitHub mock server for testing.
pub struct GitHubMockServer {
    server: MockServer,
}

impl GitHubMockServer {
    /// Start a new mock server.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get a GitHubClient configured to use this mock server.
    pub fn client(&self) -> GitHubClient {
        GitHubClient::with_base_url(&self.server.uri(), "test-token").unwrap()
    }

    /// Create a repository context for building mocks.
    pub fn repo<'a>(&'a self, owner: &'a str, repo: &'a str) -> MockRepoContext<'a> {
        MockRepoContext {
            server: &self.server,
            owner,
            repo,
        }
    }

    /// Number of requests the server has seen so far.
    pub async fn received_request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }

    /// Query string of the most recent request.
    pub async fn last_request_query(&self) -> Option<String> {
        let requests = self.server.received_requests().await?;
        requests.last().and_then(|r| r.url.query().map(str::to_string))
    }
}

// ============ Builder Pattern API ============

/// Repository context for building mocks.
pub struct MockRepoContext<'a> {
    server: &'a MockServer,
    owner: &'a str,
    repo: &'a str,
}

impl<'a> MockRepoContext<'a> {
    /// Create an issue mock builder.
    pub fn issue(&self, number: u64) -> MockIssueBuilder<'_> {
        MockIssueBuilder {
            server: self.server,
            owner: self.owner,
            repo: self.repo,
            number,
            title: "Test Issue",
            body: Some("Test body"),
            is_pull_request: false,
        }
    }

    /// Mount consecutive pages of GET /repos/{owner}/{repo}/issues.
    /// Every page but the last advertises the following one via `Link`.
    pub async fn open_issue_pages(&self, pages: Vec<Vec<PageItem>>) {
        let count = pages.len() as u32;
        for (index, items) in pages.into_iter().enumerate() {
            let page = index as u32 + 1;
            let next = (page < count).then_some(page + 1);
            self.open_issue_page(page, items, next).await;
        }
    }

    /// Mount a single page, optionally advertising `next` via the `Link` header.
    pub async fn open_issue_page(&self, page: u32, items: Vec<PageItem>, next: Option<u32>) {
        let owner = self.owner;
        let repo = self.repo;
        let body: Vec<serde_json::Value> = items
            .iter()
            .map(|i| {
                mock_issue(
                    owner,
                    repo,
                    i.number,
                    &i.title,
                    Some("body"),
                    i.is_pull_request,
                )
            })
            .collect();

        let mut response = ResponseTemplate::new(200).set_body_json(body);
        if let Some(next) = next {
            let base = format!("{}/repos/{owner}/{repo}/issues", self.server.uri());
            response = response.insert_header(
                "Link",
                format!(
                    r#"<{base}?state=open&per_page=30&page={next}>; rel="next", <{base}?state=open&per_page=30&page={next}>; rel="last""#
                ),
            );
        }

        Mock::given(method("GET"))
            .and(path(format!("/repos/{owner}/{repo}/issues")))
            .and(query_param("state", "open"))
            .and(query_param("page", page.to_string()))
            .respond_with(response)
            .mount(self.server)
            .await;
    }

    /// Mount an error status for one page of the issue list.
    pub async fn open_issue_page_error(&self, page: u32, status: u16) {
        self.page_error_mock(page, status).mount(self.server).await;
    }

    /// Like `open_issue_page_error`, but only for the first matching request.
    /// Mount this before the success mock for the same page.
    pub async fn open_issue_page_error_once(&self, page: u32, status: u16) {
        self.page_error_mock(page, status)
            .up_to_n_times(1)
            .mount(self.server)
            .await;
    }

    fn page_error_mock(&self, page: u32, status: u16) -> Mock {
        Mock::given(method("GET"))
            .and(path(format!("/repos/{}/{}/issues", self.owner, self.repo)))
            .and(query_param("page", page.to_string()))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(json!({"message": "Server Error"})),
            )
    }
}

/// Builder for mocking GET /repos/{owner}/{repo}/issues/{number}.
pub struct MockIssueBuilder<'a> {
    server: &'a MockServer,
    owner: &'a str,
    repo: &'a str,
    number: u64,
    title: &'a str,
    body: Option<&'a str>,
    is_pull_request: bool,
}

impl<'a> MockIssueBuilder<'a> {
    /// Set the issue title.
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Set the issue body.
    pub fn body(mut self, body: &'a str) -> Self {
        self.body = Some(body);
        self
    }

    /// Respond with `"body": null`.
    pub fn null_body(mut self) -> Self {
        self.body = None;
        self
    }

    /// Mark the record as a pull request.
    pub fn pull_request(mut self) -> Self {
        self.is_pull_request = true;
        self
    }

    fn endpoint(&self) -> String {
        format!("/repos/{}/{}/issues/{}", self.owner, self.repo, self.number)
    }

    /// Mount mock for the issue (success).
    pub async fn get(self) {
        let issue = mock_issue(
            self.owner,
            self.repo,
            self.number,
            self.title,
            self.body,
            self.is_pull_request,
        );
        Mock::given(method("GET"))
            .and(path(self.endpoint()))
            .respond_with(ResponseTemplate::new(200).set_body_json(issue))
            .mount(self.server)
            .await;
    }

    /// Mount mock returning 404.
    pub async fn get_not_found(self) {
        self.get_error(404, "Not Found").await;
    }

    /// Mount mock returning `status` with a GitHub error body.
    pub async fn get_error(self, status: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path(self.endpoint()))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "message": message,
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(self.server)
            .await;
    }

    /// Mount mock returning 200 with an arbitrary raw body.
    pub async fn get_raw(self, body: &str) {
        Mock::given(method("GET"))
            .and(path(self.endpoint()))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(self.server)
            .await;
    }
}
