//! Outcome determination over validated vote counts.

use quorum_types::VoteCounts;
use std::fmt;

/// What a tally decided. Shared by end-of-voting and extended-voting
/// resolution; only the mapping from outcome to label/close/lock action
/// differs between the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Eyes outnumber everything else: the proposal needs human triage.
    NeedsHumanInput,
    /// Confusion outnumbers the thumbs: back to discussion, unlocked.
    NeedsMoreDiscussion,
    ReadyToImplement,
    Rejected,
    /// Strict tie (including an empty tally).
    Inconclusive,
}

impl fmt::Display for VoteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VoteOutcome::NeedsHumanInput => "needs human input",
            VoteOutcome::NeedsMoreDiscussion => "needs more discussion",
            VoteOutcome::ReadyToImplement => "ready to implement",
            VoteOutcome::Rejected => "rejected",
            VoteOutcome::Inconclusive => "inconclusive",
        };
        f.write_str(s)
    }
}

/// Determine the raw outcome of a tally, in strict priority order.
///
/// The eyes and confused rules use strict `>` against the sum of the
/// other counts; the boundary case (`eyes == sum`) deliberately falls
/// through to normal thumbs evaluation.
pub fn determine_outcome(votes: &VoteCounts) -> VoteOutcome {
    if votes.eyes > votes.thumbs_up + votes.thumbs_down + votes.confused {
        VoteOutcome::NeedsHumanInput
    } else if votes.confused > votes.thumbs_up + votes.thumbs_down {
        VoteOutcome::NeedsMoreDiscussion
    } else if votes.thumbs_up > votes.thumbs_down {
        VoteOutcome::ReadyToImplement
    } else if votes.thumbs_down > votes.thumbs_up {
        VoteOutcome::Rejected
    } else {
        VoteOutcome::Inconclusive
    }
}

/// True whenever outcome determination would not land on the tie-case
/// `Inconclusive`. Used for early phase exits.
pub fn is_decisive(votes: &VoteCounts) -> bool {
    determine_outcome(votes) != VoteOutcome::Inconclusive
}

/// True iff exactly one of the four kinds has a nonzero count.
pub fn is_unanimous(votes: &VoteCounts) -> bool {
    votes.kinds_used() == 1
}
