use super::aggregate::collect;
use super::client::{commit_path, commits_path, page_query, GitlabClient, Transport, NEXT_PAGE_HEADER};
use crate::error::{AnalyzerError, Result};
use crate::model::{Commit, CommitFilter, CommitStats, CommitStub, DatePosition, Repository};
use crate::util::date_prefix;
use indicatif::ProgressBar;
use serde::Deserialize;
use tracing::{debug, info};

/// How a repository's commit walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchEnd {
    /// The listing had no further page.
    Exhausted,
    /// A commit older than `from` was reached.
    BeforeFrom,
    /// A commit newer than `to` was reached.
    AfterTo,
}

#[derive(Deserialize)]
struct CommitDetail {
    stats: CommitStats,
}

/// Fetch line statistics for one commit from the detail endpoint.
pub fn enrich<T: Transport>(
    client: &GitlabClient<T>,
    project_id: u64,
    stub: CommitStub,
) -> Result<Commit> {
    let response = client.request(&commit_path(project_id, &stub.id), &[])?;
    let detail: CommitDetail = response.json()?;
    let stats = CommitStats::new(detail.stats.additions, detail.stats.deletions);
    Ok(Commit::new(stub, stats))
}

/// Walk the commit listing of `repo` newest-first, enriching and collecting
/// commits until a date bound is crossed or the pages run out.
///
/// Crossing a bound ends the walk at once: the rest of the current page and
/// all later pages are never looked at. Commits by other authors are still
/// enriched but never collected.
pub fn fetch_commits<T: Transport>(
    client: &GitlabClient<T>,
    repo: &mut Repository,
    filter: &CommitFilter,
    progress: &ProgressBar,
) -> Result<FetchEnd> {
    let mut page = 1;

    loop {
        let response = client.request(&commits_path(repo.id), &page_query(page))?;
        let stubs: Vec<CommitStub> = response.json()?;
        debug!(repo = %repo.name, page, commits = stubs.len(), "Commit page");

        for stub in stubs {
            match filter.range.position(date_prefix(&stub.authored_date)) {
                DatePosition::Within => {}
                DatePosition::Before => {
                    info!(repo = %repo.name, date = %stub.authored_date, "Reached commits before the from date");
                    return Ok(FetchEnd::BeforeFrom);
                }
                DatePosition::After => {
                    info!(repo = %repo.name, date = %stub.authored_date, "Reached commits after the to date");
                    return Ok(FetchEnd::AfterTo);
                }
            }

            let commit = enrich(client, repo.id, stub)?;
            progress.inc(1);

            if filter.accepts_author(commit.author_name()) {
                collect(repo, commit);
            }
        }

        match response.page_header(NEXT_PAGE_HEADER)? {
            None => return Ok(FetchEnd::Exhausted),
            Some(next) if next <= page => {
                return Err(AnalyzerError::Pagination(format!(
                    "next page {next} does not advance past page {page}"
                )));
            }
            Some(next) => page = next,
        }
    }
}
