//! Reaction and vote shapes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The reaction kinds that count as votes. All other platform reactions
/// (laugh, hooray, heart, rocket) are ignored at parse time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReactionKind {
    ThumbsUp,
    ThumbsDown,
    Confused,
    Eyes,
}

impl ReactionKind {
    /// Map the platform's reaction content string onto a voting kind.
    /// Non-voting reactions return `None`.
    pub fn from_content(content: &str) -> Option<ReactionKind> {
        match content {
            "+1" => Some(ReactionKind::ThumbsUp),
            "-1" => Some(ReactionKind::ThumbsDown),
            "confused" => Some(ReactionKind::Confused),
            "eyes" => Some(ReactionKind::Eyes),
            _ => None,
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReactionKind::ThumbsUp => "thumbsUp",
            ReactionKind::ThumbsDown => "thumbsDown",
            ReactionKind::Confused => "confused",
            ReactionKind::Eyes => "eyes",
        };
        f.write_str(s)
    }
}

/// One reaction on the voting comment, as fetched from the platform.
/// Ephemeral: re-fetched on every tally, never persisted.
///
/// `user` is `None` for deleted-account artifacts; those reactions are
/// skipped (and counted) during validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub user: Option<String>,
    pub kind: ReactionKind,
}

impl Reaction {
    pub fn new(user: impl Into<String>, kind: ReactionKind) -> Self {
        Self {
            user: Some(user.into()),
            kind,
        }
    }
}

/// Validated per-kind vote counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteCounts {
    pub thumbs_up: u32,
    pub thumbs_down: u32,
    pub confused: u32,
    pub eyes: u32,
}

impl VoteCounts {
    pub fn total(&self) -> u32 {
        self.thumbs_up + self.thumbs_down + self.confused + self.eyes
    }

    /// Number of reaction kinds with at least one vote.
    pub fn kinds_used(&self) -> u32 {
        [self.thumbs_up, self.thumbs_down, self.confused, self.eyes]
            .iter()
            .filter(|&&c| c > 0)
            .count() as u32
    }
}

impl fmt::Display for VoteCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "👍 {} / 👎 {} / 😕 {} / 👀 {}",
            self.thumbs_up, self.thumbs_down, self.confused, self.eyes
        )
    }
}

/// The outcome of validating raw reactions. Derived, never stored.
///
/// `participants` holds every user who left at least one voting-kind
/// reaction; `voters` is the subset whose reactions were exactly one
/// kind. A user reacting with conflicting kinds is stripped from `votes`
/// and `voters` but remains a participant, so they still satisfy
/// "did this required reviewer participate" checks without inflating
/// the tally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidatedVoteResult {
    pub votes: VoteCounts,
    pub voters: Vec<String>,
    pub participants: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_content() {
        assert_eq!(ReactionKind::from_content("+1"), Some(ReactionKind::ThumbsUp));
        assert_eq!(ReactionKind::from_content("-1"), Some(ReactionKind::ThumbsDown));
        assert_eq!(
            ReactionKind::from_content("confused"),
            Some(ReactionKind::Confused)
        );
        assert_eq!(ReactionKind::from_content("eyes"), Some(ReactionKind::Eyes));
        assert_eq!(ReactionKind::from_content("heart"), None);
        assert_eq!(ReactionKind::from_content("rocket"), None);
    }

    #[test]
    fn test_counts() {
        let v = VoteCounts {
            thumbs_up: 3,
            thumbs_down: 1,
            confused: 0,
            eyes: 2,
        };
        assert_eq!(v.total(), 6);
        assert_eq!(v.kinds_used(), 3);
        assert_eq!(VoteCounts::default().kinds_used(), 0);
    }
}
