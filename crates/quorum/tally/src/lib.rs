//! Quorum Vote Tally
//!
//! Pure decision logic over raw reaction data: validation (the
//! anti-gaming pass that strips multi-reaction users), outcome
//! determination, requirement enforcement (quorum, named voters,
//! unanimity), and the early-exit predicates.
//!
//! Everything in this crate is a deterministic function of its inputs.
//! No I/O, no clocks, no external state: tallying is re-run from scratch
//! on every event and must converge to the same answer however many
//! times it executes.

#![deny(unsafe_code)]

mod exit;
mod outcome;
mod requirements;
mod validate;

pub use exit::*;
pub use outcome::*;
pub use requirements::*;
pub use validate::*;
