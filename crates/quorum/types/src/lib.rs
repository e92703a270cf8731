//! Quorum Governance Domain Types
//!
//! This crate defines the domain types for the governance engine:
//! issue/PR addressing, the closed phase-label vocabulary, reaction and
//! vote shapes, the comment-metadata envelope, and repository
//! configuration.
//!
//! # Key Concepts
//!
//! - **Phase**: the single governance label an issue carries. The hosted
//!   issue's labels are the only persisted state; there is no side store.
//! - **Voting comment**: the one comment per voting cycle whose reactions
//!   are tallied as votes, identified by embedded metadata rather than by
//!   its visible text.
//! - **Comment metadata**: a versioned, closed discriminated union
//!   serialized as JSON inside an HTML comment marker. Malformed input
//!   decodes to `None`, never an error.
//!
//! This is a pure types crate with no runtime dependencies. All types
//! implement `Clone` and `Debug`; wire-facing types also implement
//! `Serialize`/`Deserialize`.

#![deny(unsafe_code)]

mod config;
mod errors;
pub mod labels;
mod metadata;
mod phase;
mod refs;
mod votes;

pub use config::*;
pub use errors::*;
pub use metadata::*;
pub use phase::*;
pub use refs::*;
pub use votes::*;
