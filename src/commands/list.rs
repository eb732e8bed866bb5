use std::io::Write;

use chrono::{DateTime, Utc};
use clap::Args;

use super::Session;
use crate::error::Error;
use crate::format::format_issue_line;
use crate::infra::github::GitHubClient;
use crate::models::RepoName;

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct ListArgs {}

pub async fn run(_args: &ListArgs) -> anyhow::Result<()> {
    let session = Session::load()?;
    let mut stdout = std::io::stdout().lock();
    run_with_client(
        &session.github,
        session.credentials.repository(),
        Utc::now(),
        &mut stdout,
    )
    .await
}

/// Print open issues one tracker page at a time.
pub(crate) async fn run_with_client<W: Write>(
    client: &GitHubClient,
    repo: &RepoName,
    now: DateTime<Utc>,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut pages = client.open_issues(repo);
    let mut printed = 0;
    while let Some(page) = pages.next_page().await.map_err(Error::from)? {
        for issue in &page {
            writeln!(out, "{}", format_issue_line(issue, now))?;
        }
        out.flush()?;
        printed += page.len();
    }

    if printed == 0 {
        writeln!(out, "No open issues found.")?;
    }
    Ok(())
}
