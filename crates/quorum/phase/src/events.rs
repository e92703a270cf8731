//! Inbound event routing.
//!
//! Webhook decoding, signature verification, and scheduling live
//! outside this crate; by the time an event reaches [`route`] it is
//! already typed. Each event resolves to at most one governance
//! operation, so the webhook worker and the cron sweeper share a single
//! dispatch point.

use quorum_types::{IssueRef, Phase, PrRef};

/// An already-decoded inbound event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GovernanceEvent {
    IssueOpened { issue: IssueRef },
    LabelAdded { issue: IssueRef, label: String },
    ReactionChanged { issue: IssueRef },
    ScheduledSweep { issue: IssueRef },
    ReviewSubmitted { pr: PrRef },
    ReviewDismissed { pr: PrRef },
    CheckCompleted { pr: PrRef },
    StatusUpdated { pr: PrRef },
    PrLabelChanged { pr: PrRef },
    PrSynchronized { pr: PrRef },
}

/// The one operation an event resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineAction {
    StartDiscussion(IssueRef),
    /// Manual `voting` label application: make sure a ballot exists.
    PostVotingComment(IssueRef),
    /// A reaction changed; resolve early if the tally allows it.
    TryEarlyExit(IssueRef),
    /// Periodic reconciliation for one issue.
    Sweep(IssueRef),
    EvaluateMergeReadiness(PrRef),
}

/// Map an event to its governance operation. `None` means the event is
/// irrelevant to governance (an unrelated label, for example).
pub fn route(event: &GovernanceEvent) -> Option<EngineAction> {
    match event {
        GovernanceEvent::IssueOpened { issue } => {
            Some(EngineAction::StartDiscussion(issue.clone()))
        }
        GovernanceEvent::LabelAdded { issue, label } => {
            match Phase::from_label(label) {
                Some(Phase::Voting) | Some(Phase::ExtendedVoting) => {
                    Some(EngineAction::PostVotingComment(issue.clone()))
                }
                _ => None,
            }
        }
        GovernanceEvent::ReactionChanged { issue } => {
            Some(EngineAction::TryEarlyExit(issue.clone()))
        }
        GovernanceEvent::ScheduledSweep { issue } => Some(EngineAction::Sweep(issue.clone())),
        GovernanceEvent::ReviewSubmitted { pr }
        | GovernanceEvent::ReviewDismissed { pr }
        | GovernanceEvent::CheckCompleted { pr }
        | GovernanceEvent::StatusUpdated { pr }
        | GovernanceEvent::PrLabelChanged { pr }
        | GovernanceEvent::PrSynchronized { pr } => {
            Some(EngineAction::EvaluateMergeReadiness(pr.clone()))
        }
    }
}
