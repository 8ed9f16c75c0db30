use crate::model::{Author, Commit, RepoReport, Repository};
use crate::util::is_merge_title;
use tracing::debug;

/// Record an enriched commit on the repository.
///
/// Every commit lands in `repo.commits`. Merge commits stop there; all others
/// are also marked as filtered and folded into the author keyed by display
/// name. Calling this twice with the same commit counts it twice.
pub fn collect(repo: &mut Repository, commit: Commit) {
    if is_merge_title(commit.title()) {
        debug!(repo = %repo.name, commit = %commit.info.short_id, "Skipping merge commit");
        repo.commits.push(commit);
        return;
    }

    repo.commits.push(commit);
    let index = repo.commits.len() - 1;
    repo.filtered.push(index);

    let commit = &repo.commits[index];
    match repo.authors.get_mut(commit.author_name()) {
        Some(author) => author.add_commit(commit),
        None => {
            repo.authors
                .insert(commit.author_name().to_string(), Author::from_commit(commit));
        }
    }
}

/// Authors by descending commit count; ties keep first-seen order.
pub fn rank_authors(repo: &Repository) -> Vec<Author> {
    let mut authors: Vec<Author> = repo.authors.values().cloned().collect();
    authors.sort_by(|a, b| b.count.cmp(&a.count));
    authors
}

pub fn report(repo: &Repository) -> RepoReport {
    RepoReport {
        name: repo.name.clone(),
        commits: repo.filtered_count(),
        authors: rank_authors(repo),
    }
}
