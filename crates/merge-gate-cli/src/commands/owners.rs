//! Owners command: shows who owns each changed file.

use anyhow::{Context, Result};
use merge_gate_core::declarations::load_ownership;
use merge_gate_core::ownership::{normalize_path, owners_by_file};
use merge_gate_core::{CodeHost, Config, FileOwnership};
use serde::Serialize;
use std::path::PathBuf;

use crate::config_resolver::ConfigSource;
use crate::snapshot::SnapshotHost;
use crate::OutputFormat;

#[derive(Debug, Serialize)]
struct OwnersReport {
    pull_request: String,
    declarations: Option<String>,
    files: Vec<FileOwnership>,
}

/// Runs the owners command.
pub fn run(
    snapshot: PathBuf,
    repo_dir: Option<PathBuf>,
    format: OutputFormat,
    source: &ConfigSource,
) -> Result<()> {
    let config = source.load()?;
    let host = SnapshotHost::from_file(&snapshot)?.with_repo_dir(repo_dir);
    let report = build_report(&host, &config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text | OutputFormat::Compact => print!("{}", format_text(&report)),
    }
    Ok(())
}

fn build_report(host: &SnapshotHost, config: &Config) -> Result<OwnersReport> {
    let pr = host.pull_request_ref()?;
    let summary = host
        .pull_request(&pr)?
        .with_context(|| format!("Pull request {pr} not found in snapshot"))?;

    let files: Vec<String> = host
        .changed_files(&pr)?
        .iter()
        .map(|f| normalize_path(f))
        .collect();
    let set = load_ownership(
        host,
        &pr,
        &summary.base_ref,
        &config.declarations.ownership_file,
    )?;

    Ok(OwnersReport {
        pull_request: pr.to_string(),
        declarations: set.path.clone(),
        files: owners_by_file(&files, &set.entries),
    })
}

fn format_text(report: &OwnersReport) -> String {
    use std::fmt::Write;

    let mut out = match &report.declarations {
        Some(path) => format!("{} (owners from {})\n", report.pull_request, path),
        None => format!("{} (no ownership declarations found)\n", report.pull_request),
    };
    for file in &report.files {
        let owners = if file.unowned {
            "(unowned)".to_string()
        } else {
            file.owners.join(" ")
        };
        let _ = writeln!(out, "  {:<40} {}", file.path, owners);
    }
    out
}
