//! The label/comment/close/lock bundle applied by a phase transition.

use crate::{CloseReason, LockReason};

/// One atomic-in-intent (not in execution) phase transition.
///
/// Execution order is fixed and load-bearing: unlock, add label, post
/// comment, remove old label, close, lock. Add-before-remove means an
/// interruption leaves two phase labels (detectable, resumable) rather
/// than none (unrecoverable by label-based reconciliation), and
/// comment-before-lock keeps the outcome text readable even if the lock
/// call fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionSpec {
    pub remove_label: Option<String>,
    pub add_label: String,
    pub comment: String,
    pub close: bool,
    pub close_reason: Option<CloseReason>,
    pub lock: bool,
    pub lock_reason: Option<LockReason>,
    pub unlock: bool,
}

impl TransitionSpec {
    pub fn new(add_label: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            remove_label: None,
            add_label: add_label.into(),
            comment: comment.into(),
            close: false,
            close_reason: None,
            lock: false,
            lock_reason: None,
            unlock: false,
        }
    }

    pub fn removing(mut self, label: impl Into<String>) -> Self {
        self.remove_label = Some(label.into());
        self
    }

    pub fn closing(mut self, reason: CloseReason) -> Self {
        self.close = true;
        self.close_reason = Some(reason);
        self
    }

    pub fn locking(mut self, reason: LockReason) -> Self {
        self.lock = true;
        self.lock_reason = Some(reason);
        self
    }

    pub fn unlocking(mut self) -> Self {
        self.unlock = true;
        self
    }
}
