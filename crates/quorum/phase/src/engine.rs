//! The phase engine: one governance operation per inbound event.

use std::sync::Arc;

use futures::try_join;
use quorum_ops::{CloseReason, IssueOperations, LockReason, Summarizer, TransitionSpec};
use quorum_tally::{
    determine_outcome, enforce_requirements, is_discussion_exit_eligible, is_exit_eligible,
    VoteOutcome,
};
use quorum_types::{
    GovernanceConfig, GovernanceResult, IssueRef, Phase, ValidatedVoteResult,
};
use tracing::{debug, info, warn};

use crate::templates;

/// Result of the idempotent ballot-posting operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PostBallot {
    /// No ballot existed; one was posted.
    Posted(u64),
    /// A current ballot already exists (possibly posted by a concurrent
    /// healer between our check and theirs).
    AlreadyExists(u64),
}

/// Why an end-of-voting operation declined to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The ballot was missing and has been recreated; re-trigger
    /// end-of-voting after voters have had time to react.
    BallotRecreated,
    /// A concurrent healer recreated the ballot first. Benign race.
    ConcurrentHeal,
    /// Healing failed; a human-help comment and label were applied.
    Escalated,
}

/// Outcome of `end_voting` / `resolve_inconclusive`.
///
/// `Skipped` is a distinct arm, never to be confused with the
/// `Inconclusive` *voting outcome*: skipped means "no resolution
/// happened", inconclusive means "the vote resolved to a tie".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VotingResolution {
    Outcome(VoteOutcome),
    Skipped(SkipReason),
}

/// Orchestrates phase transitions for governed issues.
///
/// Holds no per-issue state: every operation re-reads the platform and
/// converges, so concurrent or redelivered invocations are safe.
pub struct PhaseEngine {
    ops: Arc<dyn IssueOperations>,
    summarizer: Option<Arc<dyn Summarizer>>,
    config: GovernanceConfig,
}

impl PhaseEngine {
    pub fn new(
        ops: Arc<dyn IssueOperations>,
        summarizer: Option<Arc<dyn Summarizer>>,
        config: GovernanceConfig,
    ) -> Self {
        Self {
            ops,
            summarizer,
            config,
        }
    }

    /// Begin governance on a freshly opened issue: discussion label plus
    /// welcome comment. Both calls are additive, so a duplicate delivery
    /// at worst posts a second welcome comment.
    pub async fn start_discussion(&self, issue: &IssueRef) -> GovernanceResult<()> {
        let body = templates::welcome_body(issue.number)?;
        let label = vec![Phase::Discussion.label().to_string()];
        try_join!(self.ops.add_labels(issue, &label), async {
            self.ops.comment(issue, &body).await.map(|_| ())
        })?;
        info!(issue = %issue, "discussion started");
        Ok(())
    }

    /// Move a discussed issue into its next voting cycle.
    pub async fn transition_to_voting(&self, issue: &IssueRef) -> GovernanceResult<()> {
        let cycle = self.ops.count_voting_comments(issue).await? + 1;
        let summary = self.produce_summary(issue).await;
        let body = templates::ballot_body(issue.number, cycle, summary.as_deref())?;

        let spec = TransitionSpec::new(Phase::Voting.label(), body)
            .removing(Phase::Discussion.label());
        let ballot_id = self.ops.transition(issue, spec).await?;
        info!(issue = %issue, cycle, "voting started");

        // Pinning is cosmetic; its failure never rolls anything back.
        if let Err(error) = self.ops.pin_comment(issue, ballot_id).await {
            warn!(issue = %issue, %error, "could not pin ballot");
        }
        Ok(())
    }

    /// Ensure the current voting cycle has a ballot. Used when the
    /// `voting` label is applied manually and by the self-heal path.
    ///
    /// Idempotent: re-checks for an existing ballot immediately before
    /// posting, and treats "found on re-check" as success.
    pub async fn post_voting_comment(&self, issue: &IssueRef) -> GovernanceResult<PostBallot> {
        if let Some(id) = self.ops.find_voting_comment_id(issue).await? {
            return Ok(PostBallot::AlreadyExists(id));
        }
        let cycle = self.ops.count_voting_comments(issue).await? + 1;
        let body = templates::ballot_body(issue.number, cycle, None)?;
        let ballot_id = self.ops.comment(issue, &body).await?;
        info!(issue = %issue, cycle, "ballot posted");
        if let Err(error) = self.ops.pin_comment(issue, ballot_id).await {
            warn!(issue = %issue, %error, "could not pin ballot");
        }
        Ok(PostBallot::Posted(ballot_id))
    }

    /// Resolve a `voting` issue. An inconclusive tally re-enters
    /// extended voting rather than terminating.
    pub async fn end_voting(&self, issue: &IssueRef) -> GovernanceResult<VotingResolution> {
        let Some(ballot_id) = self.ops.find_voting_comment_id(issue).await? else {
            return Ok(VotingResolution::Skipped(self.heal_missing_ballot(issue).await?));
        };
        let validated = self.ops.get_validated_vote_counts(issue, ballot_id).await?;
        self.resolve(issue, &validated, Phase::Voting).await
    }

    /// Resolve an `extended-voting` issue. Same pipeline as
    /// [`end_voting`], but here an inconclusive tally is final:
    /// closed and locked.
    ///
    /// [`end_voting`]: PhaseEngine::end_voting
    pub async fn resolve_inconclusive(
        &self,
        issue: &IssueRef,
    ) -> GovernanceResult<VotingResolution> {
        let Some(ballot_id) = self.ops.find_voting_comment_id(issue).await? else {
            return Ok(VotingResolution::Skipped(self.heal_missing_ballot(issue).await?));
        };
        let validated = self.ops.get_validated_vote_counts(issue, ballot_id).await?;
        self.resolve(issue, &validated, Phase::ExtendedVoting).await
    }

    /// Resolve early if the current tally already satisfies the exit
    /// requirements; otherwise leave the phase running.
    pub async fn try_early_exit(
        &self,
        issue: &IssueRef,
    ) -> GovernanceResult<Option<VotingResolution>> {
        let labels = self.ops.get_issue_labels(issue).await?;
        let from = if labels.iter().any(|l| l == Phase::Voting.label()) {
            Phase::Voting
        } else if labels.iter().any(|l| l == Phase::ExtendedVoting.label()) {
            Phase::ExtendedVoting
        } else {
            return Ok(None);
        };

        let Some(ballot_id) = self.ops.find_voting_comment_id(issue).await? else {
            // A reaction event with no ballot is someone reacting to an
            // unrelated comment; the sweep will heal if needed.
            return Ok(None);
        };
        let validated = self.ops.get_validated_vote_counts(issue, ballot_id).await?;
        if !is_exit_eligible(&self.config.voting, &validated) {
            debug!(issue = %issue, "tally not yet exit-eligible");
            return Ok(None);
        }
        info!(issue = %issue, "early exit criteria met");
        Ok(Some(self.resolve(issue, &validated, from).await?))
    }

    /// Advance discussion to voting early if enough reviewers marked the
    /// proposal ready. Returns whether the transition happened.
    pub async fn try_discussion_exit(&self, issue: &IssueRef) -> GovernanceResult<bool> {
        let Some(exit) = &self.config.discussion_exit else {
            return Ok(false);
        };
        let ready = self.ops.get_discussion_readiness(issue).await?;
        if !is_discussion_exit_eligible(exit, &ready) {
            return Ok(false);
        }
        info!(issue = %issue, ready = ready.len(), "discussion exit criteria met");
        self.transition_to_voting(issue).await?;
        Ok(true)
    }

    /// Scheduled-sweep entry point: run whatever operation the issue's
    /// current phase calls for.
    pub async fn sweep(&self, issue: &IssueRef) -> GovernanceResult<Option<VotingResolution>> {
        let labels = self.ops.get_issue_labels(issue).await?;
        let phases: Vec<Phase> = labels.iter().filter_map(|l| Phase::from_label(l)).collect();

        if phases.contains(&Phase::Voting) {
            return Ok(Some(self.end_voting(issue).await?));
        }
        if phases.contains(&Phase::ExtendedVoting) {
            return Ok(Some(self.resolve_inconclusive(issue).await?));
        }
        if phases.contains(&Phase::Discussion) {
            self.try_discussion_exit(issue).await?;
        }
        Ok(None)
    }

    /// Shared tail of the two end-of-voting operations: enforce
    /// requirements, determine the outcome, apply the transition bundle.
    async fn resolve(
        &self,
        issue: &IssueRef,
        validated: &ValidatedVoteResult,
        from: Phase,
    ) -> GovernanceResult<VotingResolution> {
        let (outcome, message) = match enforce_requirements(&self.config.voting, validated) {
            Some(forced) => {
                info!(issue = %issue, reason = %forced, "tally forced to inconclusive");
                (
                    VoteOutcome::Inconclusive,
                    templates::forced_inconclusive_body(&forced, &validated.votes),
                )
            }
            None => {
                let outcome = determine_outcome(&validated.votes);
                let message = if outcome == VoteOutcome::Inconclusive
                    && from == Phase::ExtendedVoting
                {
                    templates::final_inconclusive_body(&validated.votes)
                } else {
                    templates::outcome_body(outcome, &validated.votes)
                };
                (outcome, message)
            }
        };

        let spec = self.transition_for(outcome, from, message);
        self.ops.transition(issue, spec).await?;
        info!(issue = %issue, from = %from, outcome = %outcome, "voting resolved");
        Ok(VotingResolution::Outcome(outcome))
    }

    /// Map an outcome onto its label/comment/close/lock bundle.
    fn transition_for(&self, outcome: VoteOutcome, from: Phase, message: String) -> TransitionSpec {
        let old = from.label();
        match outcome {
            VoteOutcome::NeedsHumanInput => {
                TransitionSpec::new(Phase::NeedsHumanInput.label(), message).removing(old)
            }
            VoteOutcome::NeedsMoreDiscussion => {
                TransitionSpec::new(Phase::Discussion.label(), message)
                    .removing(old)
                    .unlocking()
            }
            VoteOutcome::ReadyToImplement => {
                TransitionSpec::new(Phase::ReadyToImplement.label(), message).removing(old)
            }
            VoteOutcome::Rejected => TransitionSpec::new(Phase::Rejected.label(), message)
                .removing(old)
                .closing(CloseReason::NotPlanned)
                .locking(LockReason::Resolved),
            VoteOutcome::Inconclusive => {
                if from == Phase::Voting {
                    TransitionSpec::new(Phase::ExtendedVoting.label(), message).removing(old)
                } else {
                    TransitionSpec::new(Phase::Inconclusive.label(), message)
                        .removing(old)
                        .closing(CloseReason::NotPlanned)
                        .locking(LockReason::Resolved)
                }
            }
        }
    }

    /// Self-healing for a missing ballot: recreate it, tolerate a
    /// concurrent healer, and escalate to a human only when posting
    /// itself fails.
    async fn heal_missing_ballot(&self, issue: &IssueRef) -> GovernanceResult<SkipReason> {
        warn!(issue = %issue, "voting comment missing; attempting self-heal");
        match self.post_voting_comment(issue).await {
            Ok(PostBallot::Posted(_)) => {
                info!(issue = %issue, "ballot recreated; end-of-voting deferred");
                Ok(SkipReason::BallotRecreated)
            }
            Ok(PostBallot::AlreadyExists(_)) => {
                debug!(issue = %issue, "ballot appeared during heal; concurrent healer won");
                Ok(SkipReason::ConcurrentHeal)
            }
            Err(error) => {
                warn!(issue = %issue, %error, "self-heal failed; escalating to a human");
                if !self.ops.has_human_help_comment(issue).await? {
                    let body =
                        templates::human_help_body(issue.number, "voting comment unrecoverable")?;
                    self.ops.comment(issue, &body).await?;
                }
                self.ops
                    .add_labels(issue, &[Phase::NeedsHumanInput.label().to_string()])
                    .await?;
                Ok(SkipReason::Escalated)
            }
        }
    }

    /// Attempt the optional discussion summary. Every failure mode
    /// (unconfigured, context fetch error, summarizer error, rejected
    /// output) degrades to `None`, which callers render as the generic
    /// fallback; nothing here is ever surfaced to the issue author.
    async fn produce_summary(&self, issue: &IssueRef) -> Option<String> {
        let summarizer = self.summarizer.as_ref()?;
        let context = match self.ops.get_issue_context(issue).await {
            Ok(context) => context,
            Err(error) => {
                warn!(issue = %issue, %error, "could not fetch issue context for summary");
                return None;
            }
        };
        match summarizer.summarize(&context).await {
            Ok(summary) => match templates::sanitize_summary(&summary.text) {
                Some(clean) => Some(clean.to_string()),
                None => {
                    warn!(issue = %issue, "summarizer output rejected");
                    None
                }
            },
            Err(error) => {
                warn!(issue = %issue, %error, "summarizer failed; using fallback text");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quorum_ops::identity;
    use quorum_ops::{IssueComment, IssueContext, Summary};
    use quorum_types::{
        GovernanceError, Reaction, ReactionKind, RequiredVoters, VotingRequirements,
    };
    use std::collections::{BTreeSet, HashMap, VecDeque};
    use std::sync::Mutex;

    const APP: u64 = 7001;

    #[derive(Default)]
    struct MockState {
        labels: BTreeSet<String>,
        comments: Vec<IssueComment>,
        reactions: HashMap<u64, Vec<Reaction>>,
        pinned: Vec<u64>,
        closed: bool,
        locked: bool,
        next_id: u64,
        fail_add_labels: bool,
        fail_next_comment: bool,
        find_overrides: VecDeque<Option<u64>>,
    }

    struct MockIssue {
        state: Mutex<MockState>,
    }

    impl MockIssue {
        fn new(labels: &[&str]) -> Self {
            let state = MockState {
                labels: labels.iter().map(|s| s.to_string()).collect(),
                next_id: 100,
                ..MockState::default()
            };
            Self {
                state: Mutex::new(state),
            }
        }

        fn seed_ballot(&self, cycle: u32, reactions: Vec<Reaction>) -> u64 {
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let id = state.next_id;
            let body = templates::ballot_body(1, cycle, None).unwrap();
            state.comments.push(IssueComment {
                id,
                body,
                performed_via_app: Some(APP),
            });
            state.reactions.insert(id, reactions);
            id
        }

        fn labels(&self) -> BTreeSet<String> {
            self.state.lock().unwrap().labels.clone()
        }

        fn comment_count(&self) -> usize {
            self.state.lock().unwrap().comments.len()
        }

        fn has_ballot(&self) -> bool {
            let state = self.state.lock().unwrap();
            identity::find_current_voting_comment(&state.comments, APP).is_some()
        }

        fn has_help_comment(&self) -> bool {
            let state = self.state.lock().unwrap();
            identity::has_error_comment(&state.comments, APP)
        }
    }

    #[async_trait]
    impl IssueOperations for MockIssue {
        fn app_id(&self) -> u64 {
            APP
        }

        async fn add_labels(&self, _: &IssueRef, labels: &[String]) -> GovernanceResult<()> {
            let mut state = self.state.lock().unwrap();
            if state.fail_add_labels {
                return Err(GovernanceError::Platform("add_labels failed".into()));
            }
            state.labels.extend(labels.iter().cloned());
            Ok(())
        }

        async fn remove_label(&self, _: &IssueRef, label: &str) -> GovernanceResult<()> {
            let mut state = self.state.lock().unwrap();
            if !state.labels.remove(label) {
                return Err(GovernanceError::NotFound(format!("label {label}")));
            }
            Ok(())
        }

        async fn comment(&self, _: &IssueRef, body: &str) -> GovernanceResult<u64> {
            let mut state = self.state.lock().unwrap();
            if state.fail_next_comment {
                state.fail_next_comment = false;
                return Err(GovernanceError::Platform("comment failed".into()));
            }
            state.next_id += 1;
            let id = state.next_id;
            state.comments.push(IssueComment {
                id,
                body: body.to_string(),
                performed_via_app: Some(APP),
            });
            Ok(id)
        }

        async fn pin_comment(&self, _: &IssueRef, comment_id: u64) -> GovernanceResult<()> {
            self.state.lock().unwrap().pinned.push(comment_id);
            Ok(())
        }

        async fn close(&self, _: &IssueRef, _: Option<CloseReason>) -> GovernanceResult<()> {
            self.state.lock().unwrap().closed = true;
            Ok(())
        }

        async fn lock(&self, _: &IssueRef, _: Option<LockReason>) -> GovernanceResult<()> {
            self.state.lock().unwrap().locked = true;
            Ok(())
        }

        async fn unlock(&self, _: &IssueRef) -> GovernanceResult<()> {
            self.state.lock().unwrap().locked = false;
            Ok(())
        }

        async fn list_comments(&self, _: &IssueRef) -> GovernanceResult<Vec<IssueComment>> {
            Ok(self.state.lock().unwrap().comments.clone())
        }

        async fn get_reactions(&self, _: &IssueRef, comment_id: u64) -> GovernanceResult<Vec<Reaction>> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .reactions
                .get(&comment_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn get_issue_labels(&self, _: &IssueRef) -> GovernanceResult<Vec<String>> {
            Ok(self.state.lock().unwrap().labels.iter().cloned().collect())
        }

        async fn get_issue_context(&self, _: &IssueRef) -> GovernanceResult<IssueContext> {
            Ok(IssueContext::default())
        }

        async fn find_voting_comment_id(&self, issue: &IssueRef) -> GovernanceResult<Option<u64>> {
            if let Some(result) = self.state.lock().unwrap().find_overrides.pop_front() {
                return Ok(result);
            }
            let comments = self.list_comments(issue).await?;
            Ok(identity::find_current_voting_comment(&comments, APP).map(|c| c.id))
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        async fn summarize(&self, _: &IssueContext) -> GovernanceResult<Summary> {
            Err(GovernanceError::Summarizer("model unavailable".into()))
        }
    }

    struct FixedSummarizer(&'static str);

    #[async_trait]
    impl Summarizer for FixedSummarizer {
        async fn summarize(&self, _: &IssueContext) -> GovernanceResult<Summary> {
            Ok(Summary {
                text: self.0.to_string(),
            })
        }
    }

    fn issue() -> IssueRef {
        IssueRef::new("octo", "gov", 1)
    }

    fn engine(ops: Arc<MockIssue>, summarizer: Option<Arc<dyn Summarizer>>) -> PhaseEngine {
        PhaseEngine::new(ops, summarizer, GovernanceConfig {
            app_id: APP,
            ..GovernanceConfig::default()
        })
    }

    fn engine_with_voting(
        ops: Arc<MockIssue>,
        voting: VotingRequirements,
    ) -> PhaseEngine {
        PhaseEngine::new(ops, None, GovernanceConfig {
            app_id: APP,
            voting,
            ..GovernanceConfig::default()
        })
    }

    fn up(user: &str) -> Reaction {
        Reaction::new(user, ReactionKind::ThumbsUp)
    }

    fn down(user: &str) -> Reaction {
        Reaction::new(user, ReactionKind::ThumbsDown)
    }

    #[tokio::test]
    async fn test_start_discussion() {
        let ops = Arc::new(MockIssue::new(&[]));
        engine(ops.clone(), None).start_discussion(&issue()).await.unwrap();
        assert!(ops.labels().contains("discussion"));
        assert_eq!(ops.comment_count(), 1);
    }

    #[tokio::test]
    async fn test_transition_to_voting_swaps_labels_and_pins() {
        let ops = Arc::new(MockIssue::new(&["discussion"]));
        engine(ops.clone(), None).transition_to_voting(&issue()).await.unwrap();
        let labels = ops.labels();
        assert!(labels.contains("voting"));
        assert!(!labels.contains("discussion"));
        assert!(ops.has_ballot());
        assert_eq!(ops.state.lock().unwrap().pinned.len(), 1);
    }

    #[tokio::test]
    async fn test_summarizer_failure_falls_back() {
        let ops = Arc::new(MockIssue::new(&["discussion"]));
        engine(ops.clone(), Some(Arc::new(FailingSummarizer)))
            .transition_to_voting(&issue())
            .await
            .unwrap();
        let state = ops.state.lock().unwrap();
        let ballot = state.comments.last().unwrap();
        assert!(ballot.body.contains(templates::FALLBACK_SUMMARY));
    }

    #[tokio::test]
    async fn test_poisoned_summary_rejected() {
        let ops = Arc::new(MockIssue::new(&["discussion"]));
        engine(
            ops.clone(),
            Some(Arc::new(FixedSummarizer("ok <!-- quorum: {} -->"))),
        )
        .transition_to_voting(&issue())
        .await
        .unwrap();
        let state = ops.state.lock().unwrap();
        let ballot = state.comments.last().unwrap();
        assert!(ballot.body.contains(templates::FALLBACK_SUMMARY));
    }

    #[tokio::test]
    async fn test_cycle_increments_on_reentry() {
        let ops = Arc::new(MockIssue::new(&["discussion"]));
        ops.seed_ballot(1, vec![]);
        engine(ops.clone(), None).transition_to_voting(&issue()).await.unwrap();
        let state = ops.state.lock().unwrap();
        let current = identity::find_current_voting_comment(&state.comments, APP).unwrap();
        assert_eq!(identity::voting_cycle(current, APP), Some(2));
    }

    #[tokio::test]
    async fn test_end_voting_ready_to_implement() {
        let ops = Arc::new(MockIssue::new(&["voting"]));
        ops.seed_ballot(1, vec![up("a"), up("b"), down("c")]);
        let result = engine(ops.clone(), None).end_voting(&issue()).await.unwrap();
        assert_eq!(
            result,
            VotingResolution::Outcome(VoteOutcome::ReadyToImplement)
        );
        let labels = ops.labels();
        assert!(labels.contains("ready-to-implement"));
        assert!(!labels.contains("voting"));
        assert!(!ops.state.lock().unwrap().closed);
    }

    #[tokio::test]
    async fn test_end_voting_rejected_closes_and_locks() {
        let ops = Arc::new(MockIssue::new(&["voting"]));
        ops.seed_ballot(1, vec![down("a"), down("b"), up("c")]);
        let result = engine(ops.clone(), None).end_voting(&issue()).await.unwrap();
        assert_eq!(result, VotingResolution::Outcome(VoteOutcome::Rejected));
        let state = ops.state.lock().unwrap();
        assert!(state.labels.contains("rejected"));
        assert!(state.closed);
        assert!(state.locked);
    }

    #[tokio::test]
    async fn test_needs_more_discussion_unlocks() {
        let ops = Arc::new(MockIssue::new(&["voting"]));
        ops.state.lock().unwrap().locked = true;
        ops.seed_ballot(
            1,
            vec![
                Reaction::new("a", ReactionKind::Confused),
                Reaction::new("b", ReactionKind::Confused),
                up("c"),
            ],
        );
        let result = engine(ops.clone(), None).end_voting(&issue()).await.unwrap();
        assert_eq!(
            result,
            VotingResolution::Outcome(VoteOutcome::NeedsMoreDiscussion)
        );
        let state = ops.state.lock().unwrap();
        assert!(state.labels.contains("discussion"));
        assert!(!state.locked);
    }

    #[tokio::test]
    async fn test_tie_reenters_extended_voting() {
        let ops = Arc::new(MockIssue::new(&["voting"]));
        ops.seed_ballot(1, vec![up("a"), down("b")]);
        let result = engine(ops.clone(), None).end_voting(&issue()).await.unwrap();
        assert_eq!(result, VotingResolution::Outcome(VoteOutcome::Inconclusive));
        let state = ops.state.lock().unwrap();
        assert!(state.labels.contains("extended-voting"));
        assert!(!state.labels.contains("voting"));
        assert!(!state.closed);
    }

    #[tokio::test]
    async fn test_extended_voting_tie_is_final() {
        let ops = Arc::new(MockIssue::new(&["extended-voting"]));
        ops.seed_ballot(2, vec![up("a"), down("b")]);
        let result = engine(ops.clone(), None)
            .resolve_inconclusive(&issue())
            .await
            .unwrap();
        assert_eq!(result, VotingResolution::Outcome(VoteOutcome::Inconclusive));
        let state = ops.state.lock().unwrap();
        assert!(state.labels.contains("inconclusive"));
        assert!(!state.labels.contains("extended-voting"));
        assert!(state.closed);
        assert!(state.locked);
    }

    #[tokio::test]
    async fn test_quorum_forces_inconclusive() {
        let ops = Arc::new(MockIssue::new(&["voting"]));
        ops.seed_ballot(1, vec![up("a")]);
        let eng = engine_with_voting(ops.clone(), VotingRequirements {
            min_voters: 3,
            ..VotingRequirements::default()
        });
        let result = eng.end_voting(&issue()).await.unwrap();
        // Forced inconclusive despite a decisive raw tally.
        assert_eq!(result, VotingResolution::Outcome(VoteOutcome::Inconclusive));
        let state = ops.state.lock().unwrap();
        assert!(state.labels.contains("extended-voting"));
        let outcome_comment = &state.comments.last().unwrap().body;
        assert!(outcome_comment.contains("at least 3"));
    }

    #[tokio::test]
    async fn test_required_voters_gate() {
        let voting = VotingRequirements {
            required_voters: Some(RequiredVoters {
                min_count: 2,
                voters: vec!["a".into(), "b".into(), "c".into()],
            }),
            ..VotingRequirements::default()
        };

        // Only `a` participates: forced inconclusive.
        let ops = Arc::new(MockIssue::new(&["voting"]));
        ops.seed_ballot(1, vec![up("a"), up("z")]);
        let result = engine_with_voting(ops.clone(), voting.clone())
            .end_voting(&issue())
            .await
            .unwrap();
        assert_eq!(result, VotingResolution::Outcome(VoteOutcome::Inconclusive));

        // `a` and `b` participate: passes on the merits.
        let ops = Arc::new(MockIssue::new(&["voting"]));
        ops.seed_ballot(1, vec![up("a"), up("b")]);
        let result = engine_with_voting(ops.clone(), voting)
            .end_voting(&issue())
            .await
            .unwrap();
        assert_eq!(
            result,
            VotingResolution::Outcome(VoteOutcome::ReadyToImplement)
        );
    }

    #[tokio::test]
    async fn test_add_labels_failure_preserves_voting_label() {
        let ops = Arc::new(MockIssue::new(&["voting"]));
        ops.seed_ballot(1, vec![up("a"), up("b")]);
        ops.state.lock().unwrap().fail_add_labels = true;
        let err = engine(ops.clone(), None).end_voting(&issue()).await.unwrap_err();
        assert!(matches!(err, GovernanceError::Platform(_)));
        // Add-before-remove: the old label was never touched.
        assert!(ops.labels().contains("voting"));
    }

    #[tokio::test]
    async fn test_self_heal_posts_exactly_one_ballot() {
        let ops = Arc::new(MockIssue::new(&["voting"]));
        let result = engine(ops.clone(), None).end_voting(&issue()).await.unwrap();
        assert_eq!(
            result,
            VotingResolution::Skipped(SkipReason::BallotRecreated)
        );
        assert_eq!(ops.comment_count(), 1);
        assert!(ops.has_ballot());
        assert!(!ops.has_help_comment());
    }

    #[tokio::test]
    async fn test_self_heal_race_posts_nothing() {
        let ops = Arc::new(MockIssue::new(&["voting"]));
        ops.seed_ballot(1, vec![]);
        // Outer check misses the ballot; the re-check inside
        // post_voting_comment sees it.
        ops.state.lock().unwrap().find_overrides.push_back(None);
        let before = ops.comment_count();
        let result = engine(ops.clone(), None).end_voting(&issue()).await.unwrap();
        assert_eq!(result, VotingResolution::Skipped(SkipReason::ConcurrentHeal));
        assert_eq!(ops.comment_count(), before);
    }

    #[tokio::test]
    async fn test_self_heal_escalates_when_posting_fails() {
        let ops = Arc::new(MockIssue::new(&["voting"]));
        ops.state.lock().unwrap().fail_next_comment = true;
        let result = engine(ops.clone(), None).end_voting(&issue()).await.unwrap();
        assert_eq!(result, VotingResolution::Skipped(SkipReason::Escalated));
        assert!(ops.has_help_comment());
        assert!(ops.labels().contains("needs-human-input"));

        // Re-running does not post a second help comment.
        ops.state.lock().unwrap().fail_next_comment = true;
        let help_count = ops.comment_count();
        let result = engine(ops.clone(), None).end_voting(&issue()).await.unwrap();
        assert_eq!(result, VotingResolution::Skipped(SkipReason::Escalated));
        assert_eq!(ops.comment_count(), help_count);
    }

    #[tokio::test]
    async fn test_post_voting_comment_is_idempotent() {
        let ops = Arc::new(MockIssue::new(&["voting"]));
        let eng = engine(ops.clone(), None);
        let first = eng.post_voting_comment(&issue()).await.unwrap();
        assert!(matches!(first, PostBallot::Posted(_)));
        let second = eng.post_voting_comment(&issue()).await.unwrap();
        assert!(matches!(second, PostBallot::AlreadyExists(_)));
        assert_eq!(ops.comment_count(), 1);
    }

    #[tokio::test]
    async fn test_early_exit_waits_for_eligibility() {
        let ops = Arc::new(MockIssue::new(&["voting"]));
        ops.seed_ballot(1, vec![up("a")]);
        let eng = engine_with_voting(ops.clone(), VotingRequirements {
            min_voters: 2,
            ..VotingRequirements::default()
        });
        // One voter, quorum of two: not eligible yet.
        assert_eq!(eng.try_early_exit(&issue()).await.unwrap(), None);
        assert!(ops.labels().contains("voting"));

        // Second voter arrives: decisive and quorate.
        ops.state
            .lock()
            .unwrap()
            .reactions
            .values_mut()
            .next()
            .unwrap()
            .push(up("b"));
        let result = eng.try_early_exit(&issue()).await.unwrap();
        assert_eq!(
            result,
            Some(VotingResolution::Outcome(VoteOutcome::ReadyToImplement))
        );
    }

    #[tokio::test]
    async fn test_sweep_dispatches_by_phase() {
        let ops = Arc::new(MockIssue::new(&["voting"]));
        ops.seed_ballot(1, vec![up("a"), up("b")]);
        let result = engine(ops.clone(), None).sweep(&issue()).await.unwrap();
        assert_eq!(
            result,
            Some(VotingResolution::Outcome(VoteOutcome::ReadyToImplement))
        );

        // No governance label at all: nothing to do.
        let idle = Arc::new(MockIssue::new(&["bug"]));
        assert_eq!(engine(idle, None).sweep(&issue()).await.unwrap(), None);
    }
}
