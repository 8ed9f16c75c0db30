use super::client::{page_query, projects_path, GitlabClient, Transport, TOTAL_PAGES_HEADER};
use crate::error::{AnalyzerError, Result};
use crate::model::{RepoStub, Repository};
use tracing::{debug, info, warn};

/// Walk the project listing and pick out the named projects.
///
/// Page 1 is requested first to learn `X-Total-Pages` and is then reused as
/// the first page of the walk. The walk stops as soon as one repository per
/// requested name has been collected. An empty `names` list collects nothing.
pub fn fetch_repositories<T: Transport>(
    client: &GitlabClient<T>,
    names: &[String],
) -> Result<Vec<Repository>> {
    if names.is_empty() {
        warn!("No projects specified; no repositories will be analyzed");
    }

    let first = client.request(&projects_path(), &page_query(1))?;
    let total_pages = first.page_header(TOTAL_PAGES_HEADER)?.ok_or_else(|| {
        AnalyzerError::Pagination("missing X-Total-Pages header on projects listing".to_string())
    })?;
    debug!(total_pages, "Projects listing");

    let mut repos = Vec::new();
    let mut pending = Some(first);

    for page in 1..=total_pages {
        let response = match pending.take() {
            Some(response) => response,
            None => client.request(&projects_path(), &page_query(page))?,
        };
        let stubs: Vec<RepoStub> = response.json()?;
        collect_matches(&stubs, names, &mut repos);

        if repos.len() == names.len() {
            break;
        }
    }

    if repos.len() < names.len() {
        warn!(
            found = repos.len(),
            requested = names.len(),
            "Some specified projects were not found"
        );
    }
    info!(count = repos.len(), "Repositories selected");
    Ok(repos)
}

/// For each requested name in order, append the first project on this page
/// with exactly that name.
pub fn collect_matches(page: &[RepoStub], names: &[String], out: &mut Vec<Repository>) {
    for name in names {
        if let Some(stub) = page.iter().find(|stub| &stub.name == name) {
            out.push(Repository::from(stub.clone()));
        }
    }
}
