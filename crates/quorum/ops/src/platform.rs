//! Data shapes returned by the hosting platform.
//!
//! Pre-decoded at the transport boundary; the engine only ever sees
//! these typed forms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One comment on an issue, as listed by the platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueComment {
    pub id: u64,
    pub body: String,
    /// The app identifier the comment was performed via, if any.
    /// Comment identity checks require this to match the bot's own id;
    /// a look-alike body posted by a user never passes.
    pub performed_via_app: Option<u64>,
}

/// The issue fields handed to the summarizer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueContext {
    pub title: String,
    pub body: String,
    pub recent_comments: Vec<String>,
}

/// Close reason forwarded to the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    Completed,
    NotPlanned,
}

/// Lock reason forwarded to the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockReason {
    Resolved,
    OffTopic,
    TooHeated,
    Spam,
}

/// Pull-request fields the merge-readiness evaluator needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub number: u64,
    pub head_sha: String,
    /// `None` while the platform has not computed mergeability yet;
    /// the evaluator treats that as passing, not blocking.
    pub mergeable: Option<bool>,
}

/// Review verdicts. `Commented` is never decisive: it neither grants
/// nor revokes approval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Dismissed,
    Commented,
}

impl ReviewState {
    pub fn is_decisive(&self) -> bool {
        !matches!(self, ReviewState::Commented)
    }
}

/// One submitted pull-request review.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub user: String,
    pub state: ReviewState,
    pub submitted_at: DateTime<Utc>,
}

/// Check-run lifecycle status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Queued,
    InProgress,
    Completed,
}

/// Check-run conclusion, present once the run completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckConclusion {
    Success,
    Failure,
    Neutral,
    Cancelled,
    Skipped,
    TimedOut,
    ActionRequired,
    Stale,
}

/// One check run for a commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRun {
    pub name: String,
    pub status: CheckStatus,
    pub conclusion: Option<CheckConclusion>,
}

/// One page of check runs. `total_count` is the platform's count of all
/// runs for the ref; when it exceeds `runs.len()` the page was
/// truncated and the unseen runs must not be assumed green.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRunsPage {
    pub total_count: u32,
    pub runs: Vec<CheckRun>,
}

/// Rolled-up state of the legacy commit-status API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitState {
    Success,
    #[default]
    Pending,
    Failure,
    Error,
}

/// The legacy combined status for a commit. An empty status list
/// (`total_count == 0`) is neutral, not failing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedStatus {
    pub state: CommitState,
    pub total_count: u32,
}

/// A produced discussion summary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
}
