//! Reaction validation: raw reaction events in, trustworthy counts out.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use quorum_types::{Reaction, ReactionKind, ValidatedVoteResult, VoteCounts};
use tracing::debug;

/// Validate a comment's raw reaction list into vote counts.
///
/// Rules, in order:
/// - usernames compare case-insensitively;
/// - duplicate identical reactions from one user count once;
/// - a user whose reactions span more than one kind is stripped from
///   `votes` and `voters` but kept in `participants`;
/// - reactions without a resolvable user (deleted accounts) are skipped,
///   with the skip count logged.
pub fn validate_votes(reactions: &[Reaction]) -> ValidatedVoteResult {
    let mut kinds_by_user: BTreeMap<String, BTreeSet<ReactionKind>> = BTreeMap::new();
    let mut skipped = 0usize;

    for reaction in reactions {
        let Some(user) = &reaction.user else {
            skipped += 1;
            continue;
        };
        kinds_by_user
            .entry(user.to_lowercase())
            .or_default()
            .insert(reaction.kind);
    }

    if skipped > 0 {
        debug!(skipped, "skipped reactions without a resolvable user");
    }

    let mut votes = VoteCounts::default();
    let mut voters = Vec::new();
    let mut participants = Vec::new();

    for (user, kinds) in &kinds_by_user {
        participants.push(user.clone());
        if kinds.len() != 1 {
            debug!(user = %user, kinds = kinds.len(), "conflicting reactions; vote discarded");
            continue;
        }
        match kinds.iter().next().copied() {
            Some(ReactionKind::ThumbsUp) => votes.thumbs_up += 1,
            Some(ReactionKind::ThumbsDown) => votes.thumbs_down += 1,
            Some(ReactionKind::Confused) => votes.confused += 1,
            Some(ReactionKind::Eyes) => votes.eyes += 1,
            None => continue,
        }
        voters.push(user.clone());
    }

    ValidatedVoteResult {
        votes,
        voters,
        participants,
    }
}
