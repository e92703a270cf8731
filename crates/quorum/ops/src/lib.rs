//! Quorum Collaborator Interfaces
//!
//! The narrow seams between the governance engine and the hosting
//! platform. All transport (HTTP, auth, retries on transient failures)
//! lives behind these traits; the engine never sees a wire format other
//! than the comment-metadata envelope it owns.
//!
//! - [`IssueOperations`] — label/comment/lock mutations and reads for a
//!   governed issue, including the fixed-order [`transition`] sequence
//!   and metadata-based comment lookups.
//! - [`PrOperations`] — pull-request reads and label mutations consumed
//!   by the merge-readiness evaluator.
//! - [`Summarizer`] — the optional discussion summarization call; any
//!   failure is absorbed by callers, never surfaced to issue authors.
//!
//! [`transition`]: IssueOperations::transition

#![deny(unsafe_code)]

pub mod identity;
mod platform;
mod traits;
mod transition;

pub use platform::*;
pub use traits::*;
pub use transition::*;
