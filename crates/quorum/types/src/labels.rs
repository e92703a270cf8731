//! Non-phase labels owned by the governance engine.

/// Marks a pull request as an implementation of a governed proposal.
/// Applied by humans (or onboarding automation); a prerequisite for
/// merge-readiness evaluation.
pub const IMPLEMENTATION_LABEL: &str = "implementation";

/// Derived label indicating a pull request currently satisfies all
/// automated merge gates. Never trusted as a source of truth; always
/// re-derived before being read downstream.
pub const MERGE_READY_LABEL: &str = "merge-ready";
