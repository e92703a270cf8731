//! Requirement enforcement: quorum, named voters, unanimity.
//!
//! Applied before outcome determination; any violation forces the vote
//! to inconclusive regardless of the raw tally direction. Each path
//! carries a distinct explanation so humans know exactly what is
//! missing.

use quorum_types::{DecisionRule, ValidatedVoteResult, VotingRequirements};
use std::fmt;

use crate::{is_decisive, is_unanimous};

/// Why a tally was forced to inconclusive despite its raw counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ForcedInconclusive {
    /// Fewer clean voters than the configured quorum.
    QuorumShortfall { voters: usize, min_voters: u32 },
    /// None of the named required voters participated at all.
    MissingRequiredVoters { required: Vec<String>, min_count: u32 },
    /// Some required voters participated, but fewer than N of M.
    PartialRequiredParticipation {
        present: usize,
        min_count: u32,
        named: usize,
    },
    /// A decisive result that was not unanimous under the unanimous rule.
    NotUnanimous,
}

impl fmt::Display for ForcedInconclusive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForcedInconclusive::QuorumShortfall { voters, min_voters } => write!(
                f,
                "only {voters} valid vote(s) were cast, but at least {min_voters} are required"
            ),
            ForcedInconclusive::MissingRequiredVoters {
                required,
                min_count,
            } => write!(
                f,
                "none of the required voters ({}) participated; at least {min_count} must",
                required.join(", ")
            ),
            ForcedInconclusive::PartialRequiredParticipation {
                present,
                min_count,
                named,
            } => write!(
                f,
                "{present} of {named} required voters participated, but at least {min_count} must"
            ),
            ForcedInconclusive::NotUnanimous => {
                write!(f, "this vote requires unanimity, and the reactions were split")
            }
        }
    }
}

/// Check a validated tally against the configured requirements.
///
/// Participation (not a clean vote) is what satisfies the required-voter
/// check: a required reviewer who reacted with conflicting kinds still
/// counts as having shown up.
pub fn enforce_requirements(
    requirements: &VotingRequirements,
    validated: &ValidatedVoteResult,
) -> Option<ForcedInconclusive> {
    if (validated.voters.len() as u32) < requirements.min_voters {
        return Some(ForcedInconclusive::QuorumShortfall {
            voters: validated.voters.len(),
            min_voters: requirements.min_voters,
        });
    }

    if let Some(required) = &requirements.required_voters {
        let present = required
            .voters
            .iter()
            .filter(|name| {
                let lowered = name.to_lowercase();
                validated.participants.iter().any(|p| *p == lowered)
            })
            .count();
        if (present as u32) < required.min_count {
            if present == 0 {
                return Some(ForcedInconclusive::MissingRequiredVoters {
                    required: required.voters.clone(),
                    min_count: required.min_count,
                });
            }
            return Some(ForcedInconclusive::PartialRequiredParticipation {
                present,
                min_count: required.min_count,
                named: required.voters.len(),
            });
        }
    }

    if requirements.requires == DecisionRule::Unanimous
        && is_decisive(&validated.votes)
        && !is_unanimous(&validated.votes)
    {
        return Some(ForcedInconclusive::NotUnanimous);
    }

    None
}
