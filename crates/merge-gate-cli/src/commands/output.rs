//! Shared output formatting for gate results.

use anyhow::Result;
use merge_gate_core::{FailureDiagnostic, GateResult};

use crate::OutputFormat;

/// Print a gate result in the specified format.
pub fn print(result: &GateResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => println!("{}", compact_line(result)),
    }
    Ok(())
}

fn print_text(result: &GateResult) {
    for name in &result.passed {
        println!("  \x1b[32mok\x1b[0m   {name}");
    }

    if let Some(failure) = &result.failure {
        println!("  \x1b[31mFAIL\x1b[0m {}", failure.check);
        println!();
        let report = miette::Report::new(FailureDiagnostic::from(failure));
        println!("{report:?}");
    }

    let (color, verdict) = if result.is_success() {
        ("\x1b[32m", "passed")
    } else {
        ("\x1b[31m", "failed")
    };
    println!(
        "{}{}: merge gate {} ({} check(s) passed)\x1b[0m",
        color,
        result.pull_request,
        verdict,
        result.passed.len()
    );
}

fn print_json(result: &GateResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn compact_line(result: &GateResult) -> String {
    match &result.failure {
        Some(failure) => format!(
            "{}: failed [{}] {}: {}",
            result.pull_request, failure.code, failure.kind, failure.message
        ),
        None => format!("{}: passed", result.pull_request),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merge_gate_core::{CheckFailure, FailureKind, PullRequestRef};

    #[test]
    fn compact_line_names_failure() {
        let mut result = GateResult::new(PullRequestRef::new("acme", "widgets", 7));
        assert_eq!(compact_line(&result), "acme/widgets#7: passed");

        result.failure = Some(CheckFailure::new(
            "MG006",
            "require-any-approved-review",
            FailureKind::Approval,
            7,
            "pull request has no approving review",
        ));
        assert_eq!(
            compact_line(&result),
            "acme/widgets#7: failed [MG006] approval: pull request has no approving review"
        );
    }
}
