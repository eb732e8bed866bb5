mod select;

use std::io::{BufRead, IsTerminal, Write};
use std::time::Duration;

use chrono::Utc;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use super::Session;
use crate::error::Error;
use crate::format::render_agent_response;
use crate::infra::fix_service::FixServiceClient;
use crate::infra::github::GitHubClient;
use crate::models::{AgentResponse, Credentials, FixRequest};

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct FixArgs {
    /// Issue number to fix directly (omit to pick one from the open issues)
    #[arg(short, long)]
    pub issue: Option<u64>,
}

pub async fn run(args: &FixArgs) -> anyhow::Result<()> {
    let session = Session::load()?;
    let fix_service = FixServiceClient::new(&session.config.fix_service).map_err(Error::from)?;
    let stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout();
    run_with_clients(
        args,
        &session.credentials,
        &session.github,
        &fix_service,
        stdin,
        &mut stdout,
    )
    .await
}

/// Resolve the issue, send it to the fix service and print the rendered response.
pub(crate) async fn run_with_clients<R: BufRead, W: Write>(
    args: &FixArgs,
    credentials: &Credentials,
    github: &GitHubClient,
    fix_service: &FixServiceClient,
    input: R,
    out: &mut W,
) -> anyhow::Result<()> {
    let repo = credentials.repository();
    let issue = match args.issue {
        Some(number) => github.get_issue(repo, number).await.map_err(Error::from)?,
        None => {
            let issues = github.list_open_issues(repo).await.map_err(Error::from)?;
            if issues.is_empty() {
                writeln!(out, "No open issues found in {repo}.")?;
                return Ok(());
            }
            match select::select_issue(&issues, Utc::now(), input, out)? {
                Some(issue) => issue.clone(),
                None => {
                    writeln!(out, "Cancelled.")?;
                    return Ok(());
                }
            }
        }
    };

    writeln!(out, "Selected #{}: {}", issue.number, issue.title)?;
    out.flush()?;

    let request = FixRequest::new(credentials.clone(), issue);
    let response = send_with_spinner(fix_service, request).await?;

    writeln!(out)?;
    for line in render_agent_response(&response) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

async fn send_with_spinner(
    client: &FixServiceClient,
    request: FixRequest,
) -> crate::error::Result<AgentResponse> {
    let spinner = waiting_spinner(&format!(
        "Waiting for the fix service (up to {}s)...",
        client.timeout().as_secs()
    ));
    let result = client.send(request).await;
    spinner.finish_and_clear();
    Ok(result?)
}

/// Spinner on stderr, hidden when stderr is not a terminal.
fn waiting_spinner(message: &str) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
