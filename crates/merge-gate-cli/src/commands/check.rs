//! Check command implementation.

use anyhow::{Context, Result};
use merge_gate_checks::checks_from_config;
use merge_gate_core::{Config, Gate, MergeableState};
use std::path::PathBuf;

use crate::config_resolver::ConfigSource;
use crate::snapshot::SnapshotHost;
use crate::OutputFormat;

/// Options of the check command.
pub struct CheckArgs {
    /// Snapshot of the pull request.
    pub snapshot: PathBuf,
    /// Checkout to read missing declaration files from.
    pub repo_dir: Option<PathBuf>,
    /// Login that triggered the evaluation.
    pub actor: Option<String>,
    /// Extra allowed mergeable states.
    pub allow_state: Vec<String>,
    /// Output format.
    pub format: OutputFormat,
}

/// Runs the check command. Exits with status 1 when the gate fails.
pub fn run(args: CheckArgs, source: &ConfigSource) -> Result<()> {
    let mut config = source.load()?;
    extend_allowed_states(&mut config, &args.allow_state);

    let host = SnapshotHost::from_file(&args.snapshot)?.with_repo_dir(args.repo_dir);
    let pull_request = host.pull_request_ref()?;

    let gate = build_gate(&config, args.actor);
    tracing::info!("Checking {} with {} check(s)", pull_request, gate.check_count());

    let result = gate
        .evaluate(&host, &pull_request)
        .with_context(|| format!("Evaluation of {pull_request} failed"))?;

    super::output::print(&result, args.format)?;

    if !result.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

fn build_gate(config: &Config, actor: Option<String>) -> Gate {
    let builder = Gate::builder()
        .config(config)
        .checks(checks_from_config(&config.checks));
    match actor {
        Some(actor) => builder.actor(actor),
        None => builder,
    }
    .build()
}

fn extend_allowed_states(config: &mut Config, extra: &[String]) {
    let allowed = &mut config.checks.allowed_mergeable_states;
    for state in extra.iter().map(|s| MergeableState::from(s.as_str())) {
        if !allowed.contains(&state) {
            allowed.push(state);
        }
    }
}
