use crate::config::{load_config_file, ConfigLayer, Settings};
use crate::gitlab::OutputFormat;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitlab-analyzer")]
#[command(about = "Analyze GitLab project commit stats per author, optionally filtered by author and date range")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Config file (default: ~/.gitlab-analyzer.toml)")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "GITLAB_ANALYZER_HOST", help = "GitLab host, e.g. gitlab.example.com")]
    pub host: Option<String>,

    #[arg(long, env = "GITLAB_ANALYZER_TOKEN", hide_env_values = true, help = "Personal access token")]
    pub token: Option<String>,

    #[arg(long, env = "GITLAB_ANALYZER_BASE_PATH", help = "API base path [default: /api/v4]")]
    pub base_path: Option<String>,

    #[arg(
        long = "project",
        env = "GITLAB_ANALYZER_PROJECTS",
        value_delimiter = ',',
        help = "Project name to analyze (repeatable or comma separated)"
    )]
    pub projects: Vec<String>,

    #[arg(long, env = "GITLAB_ANALYZER_AUTHOR", help = "Only count commits by this author name")]
    pub author: Option<String>,

    #[arg(long, env = "GITLAB_ANALYZER_FROM", help = "Stop at commits authored before this date (YYYY-MM-DD)")]
    pub from: Option<String>,

    #[arg(long, env = "GITLAB_ANALYZER_TO", help = "Stop at commits authored after this date (YYYY-MM-DD)")]
    pub to: Option<String>,

    #[arg(long, help = "Output as JSON", conflicts_with = "ndjson")]
    pub json: bool,

    #[arg(long, help = "Output as NDJSON")]
    pub ndjson: bool,

    #[arg(long, help = "Hide the progress spinner")]
    pub no_progress: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub fn settings(&self) -> Result<Settings> {
        let file = load_config_file(self.config.as_deref()).context("Failed to load config file")?;
        let flags = ConfigLayer {
            host: self.host.clone(),
            token: self.token.clone(),
            base_path: self.base_path.clone(),
            projects: (!self.projects.is_empty()).then(|| self.projects.clone()),
            author: self.author.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
        };
        Settings::from_layer(file.merge(flags)).context("Invalid configuration")
    }

    pub fn execute(self) -> Result<()> {
        let settings = self.settings()?;
        let format = OutputFormat::from_flags(self.json, self.ndjson);
        let progress = !self.no_progress
            && format == OutputFormat::Text
            && console::Term::stderr().is_term();
        crate::gitlab::exec(&settings, format, progress)
    }
}
