//! List checks command implementation.

use merge_gate_checks::all_checks;

/// Runs the list-checks command.
pub fn run() {
    println!("Available checks (in evaluation order):\n");
    println!("{:<8} {:<32} Description", "Code", "Name");
    println!("{}", "-".repeat(90));

    for check in all_checks() {
        println!(
            "{:<8} {:<32} {}",
            check.code(),
            check.name(),
            check.description()
        );
    }

    println!("\nEnable checks in the [checks] table of merge-gate.toml, e.g.:");
    println!("  require_owner_review = true");
    println!("  allowed_mergeable_states = [\"clean\", \"has_hooks\", \"unstable\"]");
}
