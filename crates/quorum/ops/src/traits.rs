//! The operation traits implemented by the platform client.
//!
//! Implementations provide the primitive calls; the metadata-driven
//! lookups and the fixed-order transition sequence are default methods,
//! so every implementation (including test doubles) shares one copy of
//! that logic.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quorum_tally::validate_votes;
use quorum_types::{
    GovernanceResult, IssueRef, PrRef, Reaction, ReactionKind, ValidatedVoteResult, VoteCounts,
};
use tracing::debug;

use crate::identity;
use crate::{
    CheckRunsPage, CloseReason, CombinedStatus, IssueComment, IssueContext, LockReason,
    PullRequest, Review, Summary, TransitionSpec,
};

/// Issue-side reads and mutations.
///
/// Transient platform failures surface as `GovernanceError::Platform`
/// and propagate; expected absences (label already gone, comment
/// deleted) surface as `GovernanceError::NotFound`.
#[async_trait]
pub trait IssueOperations: Send + Sync {
    /// The app identifier this bot posts as. Required for comment
    /// identity checks.
    fn app_id(&self) -> u64;

    async fn add_labels(&self, issue: &IssueRef, labels: &[String]) -> GovernanceResult<()>;
    async fn remove_label(&self, issue: &IssueRef, label: &str) -> GovernanceResult<()>;
    /// Post a comment; returns the new comment's id.
    async fn comment(&self, issue: &IssueRef, body: &str) -> GovernanceResult<u64>;
    async fn pin_comment(&self, issue: &IssueRef, comment_id: u64) -> GovernanceResult<()>;
    async fn close(&self, issue: &IssueRef, reason: Option<CloseReason>) -> GovernanceResult<()>;
    async fn lock(&self, issue: &IssueRef, reason: Option<LockReason>) -> GovernanceResult<()>;
    async fn unlock(&self, issue: &IssueRef) -> GovernanceResult<()>;

    /// All comments on the issue, in platform (chronological) order.
    async fn list_comments(&self, issue: &IssueRef) -> GovernanceResult<Vec<IssueComment>>;
    /// All reactions on one comment, fully paginated.
    async fn get_reactions(
        &self,
        issue: &IssueRef,
        comment_id: u64,
    ) -> GovernanceResult<Vec<Reaction>>;
    async fn get_issue_labels(&self, issue: &IssueRef) -> GovernanceResult<Vec<String>>;
    async fn get_issue_context(&self, issue: &IssueRef) -> GovernanceResult<IssueContext>;

    /// Validated tally for one comment's reactions. Pure given the
    /// fetched reactions; re-running always converges.
    async fn get_validated_vote_counts(
        &self,
        issue: &IssueRef,
        comment_id: u64,
    ) -> GovernanceResult<ValidatedVoteResult> {
        let reactions = self.get_reactions(issue, comment_id).await?;
        Ok(validate_votes(&reactions))
    }

    /// Raw validated counts without the voter sets.
    async fn get_vote_counts(
        &self,
        issue: &IssueRef,
        comment_id: u64,
    ) -> GovernanceResult<VoteCounts> {
        Ok(self.get_validated_vote_counts(issue, comment_id).await?.votes)
    }

    /// Id of the current (highest-cycle) voting comment, if any.
    async fn find_voting_comment_id(&self, issue: &IssueRef) -> GovernanceResult<Option<u64>> {
        let comments = self.list_comments(issue).await?;
        Ok(identity::find_current_voting_comment(&comments, self.app_id()).map(|c| c.id))
    }

    /// How many voting comments this issue has ever had.
    async fn count_voting_comments(&self, issue: &IssueRef) -> GovernanceResult<u32> {
        let comments = self.list_comments(issue).await?;
        Ok(identity::count_voting_comments(&comments, self.app_id()))
    }

    /// Whether the operator-escalation comment already exists.
    async fn has_human_help_comment(&self, issue: &IssueRef) -> GovernanceResult<bool> {
        let comments = self.list_comments(issue).await?;
        Ok(identity::has_error_comment(&comments, self.app_id()))
    }

    /// Users who reacted thumbs-up on the welcome comment, lowercased.
    /// Empty when there is no welcome comment yet.
    async fn get_discussion_readiness(
        &self,
        issue: &IssueRef,
    ) -> GovernanceResult<BTreeSet<String>> {
        let comments = self.list_comments(issue).await?;
        let Some(welcome) = identity::find_welcome_comment(&comments, self.app_id()) else {
            return Ok(BTreeSet::new());
        };
        let reactions = self.get_reactions(issue, welcome.id).await?;
        Ok(reactions
            .iter()
            .filter(|r| r.kind == ReactionKind::ThumbsUp)
            .filter_map(|r| r.user.as_ref().map(|u| u.to_lowercase()))
            .collect())
    }

    /// Execute a phase transition in the fixed order:
    /// unlock → add label → comment → remove label → close → lock.
    ///
    /// A same-label self-transition skips the remove step; a 404 on the
    /// remove is swallowed (the label is already gone). Returns the id
    /// of the posted outcome comment.
    async fn transition(&self, issue: &IssueRef, spec: TransitionSpec) -> GovernanceResult<u64> {
        if spec.unlock {
            self.unlock(issue).await?;
        }
        self.add_labels(issue, &[spec.add_label.clone()]).await?;
        let comment_id = self.comment(issue, &spec.comment).await?;
        if let Some(old) = &spec.remove_label {
            if *old != spec.add_label {
                match self.remove_label(issue, old).await {
                    Err(e) if e.is_not_found() => {
                        debug!(issue = %issue, label = %old, "label already absent");
                    }
                    other => other?,
                }
            }
        }
        if spec.close {
            self.close(issue, spec.close_reason).await?;
        }
        if spec.lock {
            self.lock(issue, spec.lock_reason).await?;
        }
        Ok(comment_id)
    }
}

/// Pull-request-side reads and mutations.
#[async_trait]
pub trait PrOperations: Send + Sync {
    async fn get(&self, pr: &PrRef) -> GovernanceResult<PullRequest>;
    async fn close(&self, pr: &PrRef) -> GovernanceResult<()>;
    async fn add_labels(&self, pr: &PrRef, labels: &[String]) -> GovernanceResult<()>;
    async fn remove_label(&self, pr: &PrRef, label: &str) -> GovernanceResult<()>;
    async fn comment(&self, pr: &PrRef, body: &str) -> GovernanceResult<u64>;
    async fn get_labels(&self, pr: &PrRef) -> GovernanceResult<Vec<String>>;
    /// All submitted reviews, in submission order.
    async fn get_reviews(&self, pr: &PrRef) -> GovernanceResult<Vec<Review>>;
    async fn get_check_runs_for_ref(
        &self,
        pr: &PrRef,
        sha: &str,
    ) -> GovernanceResult<CheckRunsPage>;
    async fn get_combined_status(&self, pr: &PrRef, sha: &str) -> GovernanceResult<CombinedStatus>;
    /// PR numbers in the repository currently carrying `label`.
    async fn find_prs_with_label(&self, pr: &PrRef, label: &str) -> GovernanceResult<Vec<u64>>;
    async fn get_latest_activity_date(&self, pr: &PrRef)
        -> GovernanceResult<Option<DateTime<Utc>>>;
    async fn get_latest_author_activity_date(
        &self,
        pr: &PrRef,
    ) -> GovernanceResult<Option<DateTime<Utc>>>;
}

/// Optional discussion summarizer. Any `Err` (not configured, upstream
/// model failure, rejected output) is absorbed by the caller, which
/// falls back to a generic templated message.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, context: &IssueContext) -> GovernanceResult<Summary>;
}
