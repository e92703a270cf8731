//! The pure merge-readiness evaluation.

use quorum_ops::{CheckRunsPage, CombinedStatus, Review};
use quorum_types::labels::{IMPLEMENTATION_LABEL, MERGE_READY_LABEL};
use quorum_types::MergeReadinessConfig;
use tracing::debug;

use crate::{approved_reviewers, evaluate_ci};

/// Pre-fetched inputs for one evaluation. Supplying them up front lets
/// a check-suite completion batch-evaluate many PRs without extra
/// lookups.
#[derive(Clone, Debug)]
pub struct MergeReadinessInput {
    pub labels: Vec<String>,
    pub head_sha: String,
    /// `None` means the platform has not computed mergeability yet.
    pub mergeable: Option<bool>,
    pub reviews: Vec<Review>,
    pub check_runs: CheckRunsPage,
    pub combined_status: CombinedStatus,
}

/// What the evaluation decided about the `merge-ready` label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadinessAction {
    /// All gates pass and the label was absent.
    Added,
    /// A gate fails and the label was present.
    Removed,
    /// All gates pass and the label is already there.
    Noop,
    /// A gate fails (or the feature is disabled) and there is no label
    /// to remove.
    Skipped,
}

/// One evaluation result: the label action plus a human-readable reason.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub action: ReadinessAction,
    pub reason: String,
}

impl Evaluation {
    fn gate_failed(input: &MergeReadinessInput, reason: String) -> Self {
        let action = if has_label(&input.labels, MERGE_READY_LABEL) {
            ReadinessAction::Removed
        } else {
            ReadinessAction::Skipped
        };
        Evaluation { action, reason }
    }
}

fn has_label(labels: &[String], wanted: &str) -> bool {
    labels.iter().any(|l| l == wanted)
}

/// Evaluate every merge gate in order, short-circuiting on the first
/// failure.
///
/// Order: feature enabled → implementation label → approvals →
/// mergeability → CI. An unknown mergeability (`None`) passes, because
/// the platform computes it lazily after every push; a truncated
/// check-run page fails, because unseen runs are never assumed green.
pub fn evaluate(config: Option<&MergeReadinessConfig>, input: &MergeReadinessInput) -> Evaluation {
    let Some(config) = config else {
        return Evaluation {
            action: ReadinessAction::Skipped,
            reason: "merge-readiness is not configured".to_string(),
        };
    };

    if !has_label(&input.labels, IMPLEMENTATION_LABEL) {
        // A PR can lose eligibility without an explicit unlabel event,
        // so a stray merge-ready label is still removed here.
        return Evaluation::gate_failed(
            input,
            format!("no {IMPLEMENTATION_LABEL} label"),
        );
    }

    let approved = approved_reviewers(&input.reviews, &config.trusted_reviewers);
    if (approved.len() as u32) < config.min_approvals {
        return Evaluation::gate_failed(
            input,
            format!(
                "{} trusted approval(s), {} required",
                approved.len(),
                config.min_approvals
            ),
        );
    }

    if input.mergeable == Some(false) {
        return Evaluation::gate_failed(input, "merge conflicts".to_string());
    }

    let ci = evaluate_ci(&input.check_runs, &input.combined_status);
    if !ci.is_passing() {
        debug!(sha = %input.head_sha, verdict = ?ci, "CI gate not passing");
        return Evaluation::gate_failed(input, format!("CI not passing: {ci:?}"));
    }

    if has_label(&input.labels, MERGE_READY_LABEL) {
        Evaluation {
            action: ReadinessAction::Noop,
            reason: "already merge-ready".to_string(),
        }
    } else {
        Evaluation {
            action: ReadinessAction::Added,
            reason: "all merge gates pass".to_string(),
        }
    }
}
