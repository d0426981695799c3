//! Solo machine light client.
//!
//! A solo machine is a single signer, e.g. a phone or an off-chain process, that commits to
//! its state by signing it. Each header must be signed by the current public key and may
//! rotate it. Two signatures over different data for the same height freeze the client.
#![deny(missing_docs, clippy::nursery, clippy::pedantic, warnings, unused_crate_dependencies)]

#[cfg(test)]
use rstest as _;

pub mod client_state;
pub mod consensus_state;
pub mod error;
pub mod header;
pub mod misbehaviour;
pub mod sign_bytes;
pub mod update;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
