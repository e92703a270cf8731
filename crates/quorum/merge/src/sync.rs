//! The async driver: fetch inputs, evaluate, converge the label.

use futures::try_join;
use quorum_ops::PrOperations;
use quorum_types::labels::MERGE_READY_LABEL;
use quorum_types::{GovernanceResult, MergeReadinessConfig, PrRef};
use tracing::{debug, info};

use crate::{evaluate, Evaluation, MergeReadinessInput, ReadinessAction};

/// Re-derive merge readiness for one PR and apply the label mutation.
///
/// Safe to re-run on every relevant event (review, check completion,
/// status update, label change, synchronize): the label converges to
/// the same state regardless of delivery order or duplication.
pub async fn sync(
    pr: &PrRef,
    ops: &dyn PrOperations,
    config: Option<&MergeReadinessConfig>,
) -> GovernanceResult<Evaluation> {
    if config.is_none() {
        return Ok(evaluate(
            None,
            &MergeReadinessInput {
                labels: Vec::new(),
                head_sha: String::new(),
                mergeable: None,
                reviews: Vec::new(),
                check_runs: Default::default(),
                combined_status: Default::default(),
            },
        ));
    }

    // Independent reads, joined for latency only.
    let (pull, labels, reviews) = try_join!(ops.get(pr), ops.get_labels(pr), ops.get_reviews(pr))?;
    let (check_runs, combined_status) = try_join!(
        ops.get_check_runs_for_ref(pr, &pull.head_sha),
        ops.get_combined_status(pr, &pull.head_sha)
    )?;

    let input = MergeReadinessInput {
        labels,
        head_sha: pull.head_sha,
        mergeable: pull.mergeable,
        reviews,
        check_runs,
        combined_status,
    };
    let result = evaluate(config, &input);

    match result.action {
        ReadinessAction::Added => {
            ops.add_labels(pr, &[MERGE_READY_LABEL.to_string()]).await?;
            info!(pr = %pr, reason = %result.reason, "merge-ready added");
        }
        ReadinessAction::Removed => {
            match ops.remove_label(pr, MERGE_READY_LABEL).await {
                Err(e) if e.is_not_found() => {
                    debug!(pr = %pr, "merge-ready already absent");
                }
                other => other?,
            }
            info!(pr = %pr, reason = %result.reason, "merge-ready removed");
        }
        ReadinessAction::Noop | ReadinessAction::Skipped => {
            debug!(pr = %pr, action = ?result.action, reason = %result.reason, "no label change");
        }
    }

    Ok(result)
}
