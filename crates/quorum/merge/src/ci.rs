//! The CI gate: check runs merged with the legacy combined status.

use quorum_ops::{CheckConclusion, CheckRunsPage, CheckStatus, CombinedStatus, CommitState};

/// Why CI is not passing, for the evaluation reason string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CiVerdict {
    Passing,
    /// The platform reported more runs than it returned; the unseen
    /// runs are never assumed green.
    TruncatedCheckRuns { total: u32, seen: usize },
    CheckRunNotGreen { name: String },
    CombinedStatusFailing(CommitState),
}

impl CiVerdict {
    pub fn is_passing(&self) -> bool {
        *self == CiVerdict::Passing
    }
}

/// Evaluate both CI signal sources.
///
/// Check runs pass iff every returned run is completed with a
/// conclusion in {success, neutral, skipped}; zero runs pass (absence
/// of CI is not failure). The legacy combined status passes unless
/// statuses exist and the rolled-up state is failure or error;
/// `pending` and absence are neutral, not failing.
pub fn evaluate_ci(check_runs: &CheckRunsPage, combined: &CombinedStatus) -> CiVerdict {
    if (check_runs.total_count as usize) > check_runs.runs.len() {
        return CiVerdict::TruncatedCheckRuns {
            total: check_runs.total_count,
            seen: check_runs.runs.len(),
        };
    }

    for run in &check_runs.runs {
        let green = run.status == CheckStatus::Completed
            && matches!(
                run.conclusion,
                Some(CheckConclusion::Success)
                    | Some(CheckConclusion::Neutral)
                    | Some(CheckConclusion::Skipped)
            );
        if !green {
            return CiVerdict::CheckRunNotGreen {
                name: run.name.clone(),
            };
        }
    }

    if combined.total_count > 0
        && matches!(combined.state, CommitState::Failure | CommitState::Error)
    {
        return CiVerdict::CombinedStatusFailing(combined.state);
    }

    CiVerdict::Passing
}
