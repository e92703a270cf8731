//! The governance phase vocabulary.
//!
//! An issue under governance carries at most one phase label at a time.
//! The vocabulary is closed: phases, labels, and outcomes are fixed, not
//! user-definable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The single governance label an issue carries, representing its position
/// in the discussion → voting → outcome pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Discussion,
    Voting,
    ExtendedVoting,
    ReadyToImplement,
    Rejected,
    Inconclusive,
    NeedsHumanInput,
    Implemented,
}

impl Phase {
    /// All phases, in pipeline order.
    pub const ALL: [Phase; 8] = [
        Phase::Discussion,
        Phase::Voting,
        Phase::ExtendedVoting,
        Phase::ReadyToImplement,
        Phase::Rejected,
        Phase::Inconclusive,
        Phase::NeedsHumanInput,
        Phase::Implemented,
    ];

    /// The label string materialized on the hosted issue.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Discussion => "discussion",
            Phase::Voting => "voting",
            Phase::ExtendedVoting => "extended-voting",
            Phase::ReadyToImplement => "ready-to-implement",
            Phase::Rejected => "rejected",
            Phase::Inconclusive => "inconclusive",
            Phase::NeedsHumanInput => "needs-human-input",
            Phase::Implemented => "implemented",
        }
    }

    /// Parse a label string back into a phase. Unknown labels are simply
    /// not phases (issues carry plenty of unrelated labels).
    pub fn from_label(label: &str) -> Option<Phase> {
        Phase::ALL.iter().copied().find(|p| p.label() == label)
    }

    /// Terminal phases admit no further transitions. `Inconclusive` is
    /// terminal only because it is applied after extended voting; the
    /// inconclusive tally outcome of a first vote re-enters extended
    /// voting instead.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Phase::Rejected | Phase::Inconclusive | Phase::Implemented
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Extract the governance phases present among an issue's labels.
///
/// A healthy issue has zero or one; two indicates a transition that was
/// interrupted between its add and remove steps and can be resumed.
pub fn phases_present(labels: &[String]) -> Vec<Phase> {
    labels
        .iter()
        .filter_map(|l| Phase::from_label(l))
        .collect()
}
