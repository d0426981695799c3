//! Localhost light client.
//!
//! Tracks the host chain itself. Headers are the host's own height, time and commitment
//! root, so there is nothing to sign and nothing to misbehave about. Facts are verified by
//! reading the host store directly instead of checking a proof.
#![deny(missing_docs, clippy::nursery, clippy::pedantic, warnings, unused_crate_dependencies)]

pub mod client_state;
pub mod error;
pub mod header;
pub mod membership;
pub mod update;

pub use client_state::{ClientState, ConsensusState};
pub use header::Header;
