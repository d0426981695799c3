//! Tendermint light client.
//!
//! Header verification is delegated to `tendermint-light-client-verifier`: a header is
//! accepted when more than two thirds of its validator set's voting power signed it and,
//! when skipping heights, when at least the trust level of the trusted validator set's
//! power signed it too. Consensus states record the hash of the next validator set, which
//! anchors the trust for the following update.
#![deny(missing_docs, clippy::nursery, clippy::pedantic, warnings, unused_crate_dependencies)]

#[cfg(test)]
use rstest as _;
#[cfg(test)]
use serde_json as _;

pub mod client_state;
pub mod consensus_state;
pub mod error;
pub mod header;
pub mod misbehaviour;
pub mod trust_threshold;
pub mod update;
pub mod verify;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
