//! Repository governance configuration.
//!
//! Loading (YAML in the hosted repository) is external; these are the
//! deserialized shapes the engine consumes.

use serde::{Deserialize, Serialize};

/// What a decisive tally must look like before it is accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecisionRule {
    /// A strict thumbs imbalance (or eyes/confused majority) decides.
    #[default]
    Majority,
    /// Every clean voter must have used the same reaction kind;
    /// anything else is downgraded to inconclusive.
    Unanimous,
}

/// A named subset of users, N of whom must have participated (any voting
/// reaction) before a tally is trusted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredVoters {
    pub min_count: u32,
    pub voters: Vec<String>,
}

/// Requirements a tally must meet, used both at end-of-phase and for
/// early-exit eligibility checks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VotingRequirements {
    /// Minimum count of clean (single-reaction) voters.
    pub min_voters: u32,
    pub required_voters: Option<RequiredVoters>,
    pub requires: DecisionRule,
}

/// Early-exit gate for the discussion phase. Readiness has no opposing
/// vote, so there is no majority/unanimity distinction: only a thumbs-up
/// reactor set is consulted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscussionExit {
    pub min_ready: u32,
    pub required_ready: Option<RequiredVoters>,
}

/// Configuration for the merge-readiness gate on implementation PRs.
/// Absent config disables the feature entirely.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeReadinessConfig {
    /// Reviewers whose approvals count toward the gate.
    pub trusted_reviewers: Vec<String>,
    pub min_approvals: u32,
}

/// Top-level governance configuration for one repository.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GovernanceConfig {
    /// The platform app identifier this bot posts as. Comment identity
    /// checks require it to match; text signatures are never trusted.
    pub app_id: u64,
    pub voting: VotingRequirements,
    pub discussion_exit: Option<DiscussionExit>,
    pub merge: Option<MergeReadinessConfig>,
}
