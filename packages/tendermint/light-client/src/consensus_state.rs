//! Tendermint consensus state

use ibc_client_types::commitment::CommitmentRoot;
use serde::{Deserialize, Serialize};
use tendermint::Hash;

use crate::error::TendermintClientError;

/// Snapshot of the tracked chain at one height
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusState {
    /// App hash of the tracked chain
    pub root: CommitmentRoot,
    /// Block time in nanoseconds
    pub timestamp: u64,
    /// Hash of the validator set of the next height
    pub next_validators_hash: Hash,
}

impl ConsensusState {
    /// Structural validation
    /// # Errors
    /// Returns an error if the root is empty, the timestamp is zero or the next validators
    /// hash is unset
    pub fn validate(&self) -> Result<(), TendermintClientError> {
        let invalid = |reason: &str| TendermintClientError::InvalidConsensusState {
            reason: reason.to_string(),
        };

        if self.root.is_empty() {
            return Err(invalid("root cannot be empty"));
        }
        if self.timestamp == 0 {
            return Err(invalid("timestamp cannot be zero"));
        }
        if self.next_validators_hash == Hash::None {
            return Err(invalid("next validators hash cannot be empty"));
        }
        Ok(())
    }
}
