use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// Project stub as returned by the projects listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStub {
    pub id: u64,
    pub name: String,
}

/// Commit record from the commits listing, without line statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStub {
    pub id: String,
    #[serde(default)]
    pub short_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    pub author_name: String,
    #[serde(default)]
    pub author_email: String,
    pub authored_date: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStats {
    pub additions: i64,
    pub deletions: i64,
    #[serde(default)]
    pub total: i64,
}

impl CommitStats {
    pub fn new(additions: i64, deletions: i64) -> Self {
        Self {
            additions,
            deletions,
            total: additions - deletions,
        }
    }
}

/// A commit whose statistics have been fetched from the detail endpoint.
///
/// Only enriched commits can be aggregated; stubs never reach an accumulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    #[serde(flatten)]
    pub info: CommitStub,
    pub stats: CommitStats,
}

impl Commit {
    pub fn new(info: CommitStub, stats: CommitStats) -> Self {
        Self { info, stats }
    }

    pub fn author_name(&self) -> &str {
        &self.info.author_name
    }

    pub fn title(&self) -> &str {
        &self.info.title
    }
}

/// Per-author running totals, keyed externally by display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
    pub stats: CommitStats,
    pub count: usize,
}

impl Author {
    pub fn from_commit(commit: &Commit) -> Self {
        Self {
            name: commit.info.author_name.clone(),
            email: commit.info.author_email.clone(),
            stats: commit.stats,
            count: 1,
        }
    }

    /// Fold another commit into the totals. `total` is recomputed from the
    /// cumulative additions and deletions, never incremented.
    pub fn add_commit(&mut self, commit: &Commit) {
        self.stats.additions += commit.stats.additions;
        self.stats.deletions += commit.stats.deletions;
        self.stats.total = self.stats.additions - self.stats.deletions;
        self.count += 1;
    }
}

/// A project selected for analysis plus everything collected for it in this run.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub commits: Vec<Commit>,
    /// Indices into `commits`, ascending.
    pub(crate) filtered: Vec<usize>,
    pub authors: IndexMap<String, Author>,
}

impl Repository {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn filtered_commits(&self) -> impl Iterator<Item = &Commit> + '_ {
        self.filtered.iter().map(move |&i| &self.commits[i])
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }
}

impl From<RepoStub> for Repository {
    fn from(stub: RepoStub) -> Self {
        Self::new(stub.id, stub.name)
    }
}

/// Inclusive `YYYY-MM-DD` bounds compared lexicographically against a commit's
/// date prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePosition {
    Before,
    Within,
    After,
}

impl DateRange {
    pub fn new() -> Self {
        Self { from: None, to: None }
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn position(&self, date: &str) -> DatePosition {
        if let Some(from) = &self.from {
            if date < from.as_str() {
                return DatePosition::Before;
            }
        }
        if let Some(to) = &self.to {
            if date > to.as_str() {
                return DatePosition::After;
            }
        }
        DatePosition::Within
    }
}

/// Which commits of a repository are fetched and aggregated.
#[derive(Debug, Clone, Default)]
pub struct CommitFilter {
    pub author: Option<String>,
    pub range: DateRange,
}

impl CommitFilter {
    pub fn accepts_author(&self, name: &str) -> bool {
        self.author.as_deref().map_or(true, |a| a == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoReport {
    pub name: String,
    pub commits: usize,
    pub authors: Vec<Author>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub commits: usize,
    pub repositories: usize,
}

impl Summary {
    pub fn record(&mut self, report: &RepoReport) {
        self.commits += report.commits;
        self.repositories += 1;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub host: String,
    pub author: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub repositories: Vec<RepoReport>,
    pub summary: Summary,
}
