//! Settings for one analysis run.
//!
//! Values come from a TOML file (`~/.gitlab-analyzer.toml` unless `--config`
//! names another), overridden by environment variables and then by flags.
//!
//! ```toml
//! host = "gitlab.example.com"
//! token = "glpat-..."
//! projects = ["backend", "frontend"]
//! author = "Jane Doe"
//! from = "2023-01-01"
//! to = "2023-03-31"
//! ```

use crate::error::{AnalyzerError, Result};
use crate::gitlab::client::DEFAULT_BASE_PATH;
use crate::model::{CommitFilter, DateRange};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = ".gitlab-analyzer.toml";

/// Everything optional; missing keys fall through to the next layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigLayer {
    pub host: Option<String>,
    pub token: Option<String>,
    pub base_path: Option<String>,
    pub projects: Option<Vec<String>>,
    pub author: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl ConfigLayer {
    /// Values set in `other` win over values in `self`.
    pub fn merge(self, other: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            host: non_empty(other.host).or(non_empty(self.host)),
            token: non_empty(other.token).or(non_empty(self.token)),
            base_path: non_empty(other.base_path).or(non_empty(self.base_path)),
            projects: other.projects.or(self.projects),
            author: non_empty(other.author).or(non_empty(self.author)),
            from: non_empty(other.from).or(non_empty(self.from)),
            to: non_empty(other.to).or(non_empty(self.to)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub token: String,
    pub base_path: String,
    pub projects: Vec<String>,
    pub author: Option<String>,
    pub range: DateRange,
}

impl Settings {
    pub fn from_layer(layer: ConfigLayer) -> Result<Self> {
        let host = non_empty(layer.host)
            .ok_or_else(|| AnalyzerError::Config("GitLab host is not set (--host)".to_string()))?;
        let token = non_empty(layer.token).ok_or_else(|| {
            AnalyzerError::Config("GitLab access token is not set (--token)".to_string())
        })?;

        let mut range = DateRange::new();
        if let Some(from) = non_empty(layer.from) {
            range = range.with_from(parse_date(&from)?);
        }
        if let Some(to) = non_empty(layer.to) {
            range = range.with_to(parse_date(&to)?);
        }
        if let (Some(from), Some(to)) = (&range.from, &range.to) {
            if from > to {
                return Err(AnalyzerError::InvalidDate(format!(
                    "Invalid range: from ({from}) is after to ({to})"
                )));
            }
        }

        let projects = layer
            .projects
            .unwrap_or_default()
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        Ok(Self {
            host,
            token,
            base_path: non_empty(layer.base_path).unwrap_or_else(|| DEFAULT_BASE_PATH.to_string()),
            projects,
            author: non_empty(layer.author),
            range,
        })
    }

    pub fn filter(&self) -> CommitFilter {
        CommitFilter {
            author: self.author.clone(),
            range: self.range.clone(),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

/// Read the config file layer. An explicit path must exist; the default one
/// is optional.
pub fn load_config_file(explicit: Option<&Path>) -> Result<ConfigLayer> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.is_file() => path,
            _ => return Ok(ConfigLayer::default()),
        },
    };

    debug!(path = %path.display(), "Using config file");
    let text = std::fs::read_to_string(&path)?;
    parse_config(&text)
}

pub fn parse_config(text: &str) -> Result<ConfigLayer> {
    Ok(toml::from_str(text)?)
}

/// Validate a `YYYY-MM-DD` bound and return it zero-padded.
pub fn parse_date(input: &str) -> Result<String> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|e| AnalyzerError::InvalidDate(format!("'{input}' is not YYYY-MM-DD: {e}")))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
