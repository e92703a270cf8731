//! Approval counting over submitted reviews.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use quorum_ops::{Review, ReviewState};

/// Trusted reviewers whose most recent decisive review is an approval.
///
/// Decisive means `APPROVED`, `CHANGES_REQUESTED`, or `DISMISSED`;
/// `COMMENTED` never changes a reviewer's standing. Reviews are
/// processed in submission order, so a later `CHANGES_REQUESTED`
/// revokes an earlier approval and vice versa.
pub fn approved_reviewers(reviews: &[Review], trusted: &[String]) -> BTreeSet<String> {
    let trusted: BTreeSet<String> = trusted.iter().map(|t| t.to_lowercase()).collect();
    let mut latest: BTreeMap<String, ReviewState> = BTreeMap::new();

    for review in reviews {
        if !review.state.is_decisive() {
            continue;
        }
        let user = review.user.to_lowercase();
        if !trusted.contains(&user) {
            continue;
        }
        latest.insert(user, review.state);
    }

    latest
        .into_iter()
        .filter(|(_, state)| *state == ReviewState::Approved)
        .map(|(user, _)| user)
        .collect()
}
