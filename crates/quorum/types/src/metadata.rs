//! The idempotent comment-metadata protocol.
//!
//! Every bot-authored comment that must later be re-identified embeds one
//! JSON object inside an HTML comment marker at the top of its body. The
//! envelope is the one wire format this engine owns: `version: 1` must
//! stay byte-compatible indefinitely, because comments written years ago
//! must remain parseable.
//!
//! Decoding is strict but total: unknown types, missing fields, or
//! malformed JSON all parse to "no metadata" (`None`), never an error.
//! Visible comment text is cosmetic and never trusted for identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{GovernanceError, GovernanceResult};

/// Wire version of the metadata envelope. Bump only with a migration
/// story for every comment already in the wild.
pub const METADATA_VERSION: u32 = 1;

const MARKER_PREFIX: &str = "<!-- quorum:";
const MARKER_SUFFIX: &str = "-->";

/// Variant payloads of the metadata union. Closed: adding a variant is a
/// wire change and requires old readers to keep treating it as unknown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MetadataDetail {
    /// The ballot comment whose reactions are tallied. `cycle` increases
    /// by one each time the issue enters a voting phase; the highest
    /// cycle is authoritative when several ballots exist.
    Voting { cycle: u32 },
    /// Contributor leaderboard posting.
    Leaderboard,
    /// Welcome comment posted when discussion starts.
    Welcome,
    /// Cross-reference between a proposal and an implementation PR.
    #[serde(rename_all = "camelCase")]
    Alignment { pr_number: u64 },
    /// Periodic status report on a governed issue.
    Status,
    /// Durable operator-visible failure artifact (self-heal exhausted).
    Error { reason: String },
    /// Notification addressed to a specific user.
    Notification { recipient: String },
    /// Scheduled standup digest.
    Standup,
}

/// The typed envelope hidden inside a bot comment's body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentMetadata {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub issue_number: u64,
    #[serde(flatten)]
    pub detail: MetadataDetail,
}

impl CommentMetadata {
    pub fn new(issue_number: u64, detail: MetadataDetail) -> Self {
        Self {
            version: METADATA_VERSION,
            created_at: Utc::now(),
            issue_number,
            detail,
        }
    }

    /// Render the envelope as the HTML comment marker embedded at the
    /// top of a comment body.
    pub fn to_tag(&self) -> GovernanceResult<String> {
        let json = serde_json::to_string(self).map_err(GovernanceError::Metadata)?;
        Ok(format!("{MARKER_PREFIX} {json} {MARKER_SUFFIX}"))
    }

    /// The voting cycle, if this is voting metadata.
    pub fn voting_cycle(&self) -> Option<u32> {
        match self.detail {
            MetadataDetail::Voting { cycle } => Some(cycle),
            _ => None,
        }
    }
}

/// Recover the metadata envelope from a comment body.
///
/// Returns `None` when there is no marker, the JSON is malformed, the
/// type is unknown, or the version is not one we can read. Partial
/// objects are never produced.
pub fn parse_metadata(body: &str) -> Option<CommentMetadata> {
    let start = body.find(MARKER_PREFIX)? + MARKER_PREFIX.len();
    let rest = &body[start..];
    let end = rest.find(MARKER_SUFFIX)?;
    let json = rest[..end].trim();
    let meta: CommentMetadata = serde_json::from_str(json).ok()?;
    if meta.version != METADATA_VERSION {
        return None;
    }
    Some(meta)
}
