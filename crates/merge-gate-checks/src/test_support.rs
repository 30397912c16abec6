use merge_gate_core::{
    Check, CheckFailure, DeclarationsConfig, EvaluationContext, MemoryHost, MergeableState,
    PullRequestSummary,
};

/// Open, clean pull request acme/widgets#7 by carol against `main`.
pub fn host() -> MemoryHost {
    host_with(|_| {})
}

pub fn host_with(edit: impl FnOnce(&mut PullRequestSummary)) -> MemoryHost {
    let mut summary = PullRequestSummary {
        number: 7,
        base_ref: "main".to_string(),
        author_login: "carol".to_string(),
        merged: false,
        mergeable: Some(true),
        mergeable_state: MergeableState::Clean,
    };
    edit(&mut summary);
    MemoryHost::new("acme", "widgets", summary)
}

pub fn run(check: &dyn Check, host: &MemoryHost, actor: Option<&str>) -> Option<CheckFailure> {
    let pr = host.pull_request_ref().unwrap();
    let summary = host.pull_request.clone().unwrap();
    let declarations = DeclarationsConfig::default();
    let ctx = EvaluationContext::new(host, &pr, summary, &declarations, actor);
    check.check(&ctx).unwrap()
}
