//! Quorum Phase State Machine
//!
//! Drives a governed issue from discussion through voting to a terminal
//! outcome. The hosted issue's labels and comments are the only
//! persisted state, and the platform is not transactional, so every
//! operation here is idempotent by construction: transitions add the new
//! label before removing the old one, tallies are recomputed from
//! scratch, and a missing voting comment triggers self-healing instead
//! of an error.
//!
//! Webhook deliveries and scheduled sweeps may run concurrently and be
//! redelivered at any time; nothing in this crate assumes it runs alone.

#![deny(unsafe_code)]

mod engine;
mod events;
pub mod templates;

pub use engine::*;
pub use events::*;
