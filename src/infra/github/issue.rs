//! Issue operations.

use chrono::{DateTime, Utc};
use reqwest::Url;
use reqwest::header::{HeaderMap, LINK};
use serde::Deserialize;
use serde::de::IgnoredAny;
use tracing::{debug, warn};

use super::client::{GitHubClient, decode};
use super::error::{GitHubError, Result};
use crate::models::{Issue, IssueState, RepoName};

/// Issue record as returned by `/repos/{owner}/{repo}/issues`.
///
/// Pull requests come back from the same endpoint and carry a `pull_request` object.
#[derive(Debug, Deserialize)]
struct IssueItem {
    number: u64,
    title: String,
    #[serde(default)]
    body: Option<String>,
    state: IssueState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    pull_request: Option<IgnoredAny>,
}

impl IssueItem {
    fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    fn into_issue(self) -> Issue {
        Issue {
            number: self.number,
            title: self.title,
            body: self.body.unwrap_or_default(),
            state: self.state,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl GitHubClient {
    /// Get a single issue by number.
    ///
    /// Fails with `NotAnIssue` if the number belongs to a pull request.
    pub async fn get_issue(&self, repo: &RepoName, issue_number: u64) -> Result<Issue> {
        if issue_number == 0 {
            return Err(GitHubError::InvalidIssueNumber);
        }

        let number = issue_number.to_string();
        let url = self.endpoint(&["repos", repo.owner(), repo.name(), "issues", &number]);
        let response = self
            .get(url, &format!("Issue #{issue_number} in {repo}"))
            .await?;
        let item: IssueItem = decode(response).await?;

        if item.is_pull_request() {
            return Err(GitHubError::NotAnIssue(issue_number));
        }
        Ok(item.into_issue())
    }

    /// Lazily page through the open issues of `repo`, starting at page 1.
    pub fn open_issues(&self, repo: &RepoName) -> OpenIssuePages<'_> {
        OpenIssuePages {
            client: self,
            repo: repo.clone(),
            next: Some(1),
        }
    }

    /// Fetch every open issue, newest first, skipping pull requests.
    ///
    /// A failure on any page fails the whole call.
    pub async fn list_open_issues(&self, repo: &RepoName) -> Result<Vec<Issue>> {
        let mut pages = self.open_issues(repo);
        let mut issues = Vec::new();
        while let Some(page) = pages.next_page().await? {
            issues.extend(page);
        }
        Ok(issues)
    }
}

/// Page-at-a-time producer of open issues.
///
/// Holds only the cursor, so memory stays bounded by one page. Ends when the
/// tracker stops advertising a next page.
pub struct OpenIssuePages<'a> {
    client: &'a GitHubClient,
    repo: RepoName,
    next: Option<u32>,
}

impl OpenIssuePages<'_> {
    /// Fetch the next page, or `None` once the last page has been returned.
    ///
    /// On error the cursor is left in place so the same page can be retried.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Issue>>> {
        let Some(page) = self.next else {
            return Ok(None);
        };

        let mut url =
            self.client
                .endpoint(&["repos", self.repo.owner(), self.repo.name(), "issues"]);
        url.query_pairs_mut()
            .append_pair("state", "open")
            .append_pair("per_page", &self.client.page_size.to_string())
            .append_pair("page", &page.to_string());

        let response = self
            .client
            .get(url, &format!("Repository {}", self.repo))
            .await?;
        let next = next_page_number(response.headers());
        let items: Vec<IssueItem> = decode(response).await?;

        let total = items.len();
        let issues: Vec<Issue> = items
            .into_iter()
            .filter(|item| !item.is_pull_request())
            .map(IssueItem::into_issue)
            .collect();
        debug!(
            page,
            issues = issues.len(),
            pull_requests = total - issues.len(),
            ?next,
            "fetched issue page"
        );

        self.next = match next {
            Some(n) if n <= page => {
                warn!(page, next = n, "tracker pointed back to an earlier page; stopping");
                None
            }
            other => other,
        };
        Ok(Some(issues))
    }

    /// Rewind to the first page.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "only retried from tests; commands drain pages once")
    )]
    pub fn restart(&mut self) {
        self.next = Some(1);
    }
}

/// Extract the `page` number of the `rel="next"` entry of a `Link` header.
fn next_page_number(headers: &HeaderMap) -> Option<u32> {
    let link = headers.get(LINK)?.to_str().ok()?;
    link.split(',')
        .find_map(|entry| {
            let (target, params) = entry.split_once(';')?;
            let is_next = params.split(';').any(|p| p.trim() == r#"rel="next""#);
            if !is_next {
                return None;
            }
            let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;
            let url = Url::parse(target).ok()?;
            url.query_pairs()
                .find(|(key, _)| key == "page")
                .and_then(|(_, value)| value.parse().ok())
        })
        .filter(|&page| page > 0)
}
