//! Early-exit predicates.
//!
//! A phase may resolve before its timer expires when the tally is
//! already trustworthy and conclusive. The external scheduler owns the
//! timers; these predicates only answer "could this phase end now".

use std::collections::BTreeSet;

use quorum_types::{DecisionRule, DiscussionExit, ValidatedVoteResult, VotingRequirements};

use crate::{enforce_requirements, is_decisive, is_unanimous};

/// True when a voting phase may end early: the requirements (quorum and
/// named voters) hold and the tally is conclusive under the configured
/// decision rule.
pub fn is_exit_eligible(exit: &VotingRequirements, validated: &ValidatedVoteResult) -> bool {
    if enforce_requirements(exit, validated).is_some() {
        return false;
    }
    match exit.requires {
        DecisionRule::Unanimous => is_unanimous(&validated.votes),
        DecisionRule::Majority => is_decisive(&validated.votes),
    }
}

/// True when the discussion phase may advance to voting early.
///
/// Discussion readiness has no opposing vote, so only the thumbs-up
/// reactor set is consulted: a minimum count plus an optional
/// N-of-M named-reviewer gate.
pub fn is_discussion_exit_eligible(exit: &DiscussionExit, ready_users: &BTreeSet<String>) -> bool {
    if (ready_users.len() as u32) < exit.min_ready {
        return false;
    }
    if let Some(required) = &exit.required_ready {
        let present = required
            .voters
            .iter()
            .filter(|name| ready_users.contains(&name.to_lowercase()))
            .count();
        if (present as u32) < required.min_count {
            return false;
        }
    }
    true
}
