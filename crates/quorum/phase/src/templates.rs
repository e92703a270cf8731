//! Comment bodies posted by the engine.
//!
//! The metadata tag carries the comment's identity; the visible text is
//! cosmetic and can be reworded freely without a wire change.

use quorum_tally::{ForcedInconclusive, VoteOutcome};
use quorum_types::{CommentMetadata, GovernanceResult, MetadataDetail, VoteCounts};

/// Ballot text used when no discussion summary is available (summarizer
/// absent, failed, or its output rejected).
pub const FALLBACK_SUMMARY: &str =
    "The discussion phase has ended. Review the thread above before casting your vote.";

const VOTING_INSTRUCTIONS: &str = "\
Vote by reacting to **this comment**:

- 👍 approve the proposal
- 👎 reject the proposal
- 😕 more discussion is needed
- 👀 a maintainer should look at this

Reacting with more than one of these invalidates your vote.";

/// Validate an externally produced summary before trusting it.
///
/// Rejects empty output and anything containing an HTML comment opener,
/// which could smuggle a forged metadata envelope into our own comment.
pub fn sanitize_summary(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains("<!--") {
        return None;
    }
    Some(trimmed)
}

/// Welcome comment posted when discussion starts.
pub fn welcome_body(issue_number: u64) -> GovernanceResult<String> {
    let tag = CommentMetadata::new(issue_number, MetadataDetail::Welcome).to_tag()?;
    Ok(format!(
        "{tag}\n\
         ## Proposal under discussion\n\n\
         This issue is now in the **discussion** phase. Share concerns and \
         alternatives below; react 👍 to this comment when you consider the \
         proposal ready for a vote."
    ))
}

/// The ballot comment for one voting cycle.
pub fn ballot_body(issue_number: u64, cycle: u32, summary: Option<&str>) -> GovernanceResult<String> {
    let tag = CommentMetadata::new(issue_number, MetadataDetail::Voting { cycle }).to_tag()?;
    let summary = summary.unwrap_or(FALLBACK_SUMMARY);
    let heading = if cycle > 1 {
        format!("## Voting is open (round {cycle})\n\n")
    } else {
        "## Voting is open\n\n".to_string()
    };
    Ok(format!("{tag}\n{heading}{summary}\n\n{VOTING_INSTRUCTIONS}"))
}

/// The durable operator-escalation comment posted when self-healing is
/// exhausted. Idempotent: callers check for an existing error comment
/// before posting.
pub fn human_help_body(issue_number: u64, reason: &str) -> GovernanceResult<String> {
    let tag = CommentMetadata::new(
        issue_number,
        MetadataDetail::Error {
            reason: reason.to_string(),
        },
    )
    .to_tag()?;
    Ok(format!(
        "{tag}\n\
         ## Manual intervention needed\n\n\
         Automated governance could not recover this issue's voting state \
         ({reason}). A maintainer needs to restore the voting comment or \
         resolve the phase by hand."
    ))
}

/// Outcome comment for a completed tally.
pub fn outcome_body(outcome: VoteOutcome, votes: &VoteCounts) -> String {
    let verdict = match outcome {
        VoteOutcome::NeedsHumanInput => {
            "Voters flagged this proposal for maintainer attention. A human should \
             triage it before anything else happens."
        }
        VoteOutcome::NeedsMoreDiscussion => {
            "The vote showed confusion outweighing clear positions. The issue \
             returns to the discussion phase."
        }
        VoteOutcome::ReadyToImplement => {
            "The proposal is approved and ready to implement. Open a pull request \
             with the `implementation` label to pick it up."
        }
        VoteOutcome::Rejected => "The proposal was rejected. This issue is now closed.",
        VoteOutcome::Inconclusive => {
            "The vote did not reach a decision. An extended voting round begins."
        }
    };
    format!("## Voting result\n\nFinal tally: {votes}\n\n{verdict}")
}

/// Outcome comment for the extended-voting round, where a tie is final.
pub fn final_inconclusive_body(votes: &VoteCounts) -> String {
    format!(
        "## Voting result\n\nFinal tally: {votes}\n\n\
         Extended voting also ended without a decision. This proposal is \
         closed as inconclusive; it can be re-proposed later."
    )
}

/// Outcome comment when requirements forced the tally to inconclusive.
pub fn forced_inconclusive_body(forced: &ForcedInconclusive, votes: &VoteCounts) -> String {
    format!(
        "## Voting result\n\nFinal tally: {votes}\n\n\
         The tally could not be trusted: {forced}."
    )
}
