use crate::model::{AnalysisOutput, RepoReport, Summary};
use anyhow::Result;
use console::style;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Ndjson,
}

impl OutputFormat {
    pub fn from_flags(json: bool, ndjson: bool) -> Self {
        if json {
            OutputFormat::Json
        } else if ndjson {
            OutputFormat::Ndjson
        } else {
            OutputFormat::Text
        }
    }
}

pub fn output_text_report<W: Write>(out: &mut W, report: &RepoReport) -> Result<()> {
    writeln!(
        out,
        "{} {}, Commits:{}",
        style("Repo:").bold(),
        report.name,
        report.commits
    )?;
    writeln!(out, "Detail:")?;
    writeln!(out, "{}", to_tab_indented_json(&report.authors)?)?;
    Ok(())
}

pub fn output_text_summary<W: Write>(out: &mut W, summary: &Summary) -> Result<()> {
    writeln!(
        out,
        "Gitlab: {} Commits on {} Repos.",
        summary.commits, summary.repositories
    )?;
    Ok(())
}

pub fn output_ndjson<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string(value)?)?;
    Ok(())
}

pub fn output_json<W: Write>(out: &mut W, output: &AnalysisOutput) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(output)?)?;
    Ok(())
}

fn to_tab_indented_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}
