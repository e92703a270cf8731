//! Comment identity: deciding what a comment *is*.
//!
//! Identity requires both a metadata-type match and that the comment was
//! performed via this bot's configured app id. Visible text signatures
//! are cosmetic only; a malicious look-alike comment never passes.

use quorum_types::{parse_metadata, CommentMetadata, MetadataDetail};

use crate::IssueComment;

/// Decode a comment's metadata, but only if the comment was authored by
/// this bot. Foreign comments decode to `None` even with a perfectly
/// forged envelope.
pub fn comment_metadata(comment: &IssueComment, app_id: u64) -> Option<CommentMetadata> {
    if comment.performed_via_app != Some(app_id) {
        return None;
    }
    parse_metadata(&comment.body)
}

/// The voting cycle a comment carries, if it is one of our ballots.
pub fn voting_cycle(comment: &IssueComment, app_id: u64) -> Option<u32> {
    comment_metadata(comment, app_id)?.voting_cycle()
}

/// Select the current voting comment: the one with the highest cycle.
///
/// Ties at equal cycle fall back to array order (first match wins).
/// Preferring `createdAt` instead would be a behavior change; see the
/// open questions in DESIGN.md.
pub fn find_current_voting_comment<'a>(
    comments: &'a [IssueComment],
    app_id: u64,
) -> Option<&'a IssueComment> {
    let mut best: Option<(&IssueComment, u32)> = None;
    for comment in comments {
        if let Some(cycle) = voting_cycle(comment, app_id) {
            match best {
                Some((_, best_cycle)) if cycle <= best_cycle => {}
                _ => best = Some((comment, cycle)),
            }
        }
    }
    best.map(|(comment, _)| comment)
}

/// Count all voting comments ever posted on the issue. The next cycle
/// is one more than this.
pub fn count_voting_comments(comments: &[IssueComment], app_id: u64) -> u32 {
    comments
        .iter()
        .filter(|c| voting_cycle(c, app_id).is_some())
        .count() as u32
}

/// Whether an operator-escalation comment is already present, so the
/// self-heal path posts at most one.
pub fn has_error_comment(comments: &[IssueComment], app_id: u64) -> bool {
    comments.iter().any(|c| {
        matches!(
            comment_metadata(c, app_id).map(|m| m.detail),
            Some(MetadataDetail::Error { .. })
        )
    })
}

/// Find the welcome comment posted when discussion started. Its
/// thumbs-up reactors are the discussion-readiness set.
pub fn find_welcome_comment<'a>(
    comments: &'a [IssueComment],
    app_id: u64,
) -> Option<&'a IssueComment> {
    comments
        .iter()
        .find(|c| matches!(comment_metadata(c, app_id).map(|m| m.detail), Some(MetadataDetail::Welcome)))
}
