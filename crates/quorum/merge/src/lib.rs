//! Quorum Merge-Readiness Evaluator
//!
//! An independent gating state machine over a pull request's
//! `implementation` / `merge-ready` labels, driven by trusted-reviewer
//! approvals, CI outcome, and mergeability.
//!
//! The evaluator itself is pure: it consumes pre-fetched inputs so that
//! high-frequency events (check-suite completions) can batch-evaluate
//! many PRs without redundant lookups. The [`sync`] driver fetches those
//! inputs through [`quorum_ops::PrOperations`] and applies the resulting
//! label mutation; however many times duplicate events arrive, the label
//! converges to the same state.

#![deny(unsafe_code)]

mod approvals;
mod ci;
mod evaluate;
mod sync;

pub use approvals::*;
pub use ci::*;
pub use evaluate::*;
pub use sync::*;
