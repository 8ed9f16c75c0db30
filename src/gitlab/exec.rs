use super::aggregate::report;
use super::client::{GitlabClient, Transport};
use super::commit::fetch_commits;
use super::fetch::fetch_repositories;
use super::output::{
    output_json, output_ndjson, output_text_report, output_text_summary, OutputFormat,
};
use crate::config::Settings;
use crate::model::{AnalysisOutput, Summary, SCHEMA_VERSION};
use anyhow::Context;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use tracing::debug;

pub fn exec(settings: &Settings, format: OutputFormat, progress: bool) -> anyhow::Result<()> {
    let client = GitlabClient::new(&settings.host, &settings.base_path, settings.token.clone());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    analyze(&client, settings, format, progress, &mut out)?;
    Ok(())
}

/// Fetch the configured repositories one at a time, writing each report as
/// soon as its commits are collected. The first error aborts the run; reports
/// already written stay written.
pub fn analyze<T: Transport, W: Write>(
    client: &GitlabClient<T>,
    settings: &Settings,
    format: OutputFormat,
    progress: bool,
    out: &mut W,
) -> anyhow::Result<Summary> {
    let repos = fetch_repositories(client, &settings.projects)
        .context("Failed to fetch repositories")?;
    let filter = settings.filter();

    let mut summary = Summary::default();
    let mut reports = Vec::new();

    for mut repo in repos {
        let pb = spinner(progress, &repo.name);
        let end = fetch_commits(client, &mut repo, &filter, &pb)
            .with_context(|| format!("Failed to fetch commits for repository '{}'", repo.name))?;
        pb.finish_and_clear();
        debug!(repo = %repo.name, ?end, seen = repo.commits.len(), "Commit walk finished");

        let report = report(&repo);
        summary.record(&report);

        match format {
            OutputFormat::Text => output_text_report(out, &report)?,
            OutputFormat::Ndjson => output_ndjson(out, &report)?,
            OutputFormat::Json => reports.push(report),
        }
        out.flush()?;
    }

    match format {
        OutputFormat::Text => output_text_summary(out, &summary)?,
        OutputFormat::Ndjson => output_ndjson(out, &summary)?,
        OutputFormat::Json => {
            let output = AnalysisOutput {
                version: SCHEMA_VERSION,
                generated_at: Utc::now(),
                host: settings.host.clone(),
                author: settings.author.clone(),
                from: settings.range.from.clone(),
                to: settings.range.to.clone(),
                repositories: reports,
                summary,
            };
            output_json(out, &output)?;
        }
    }

    Ok(summary)
}

fn spinner(enabled: bool, repo: &str) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {pos} commits")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Fetching {repo}"));
    pb
}
