//! Localhost client and consensus states

use ibc_client_types::{commitment::CommitmentRoot, Height};
use serde::{Deserialize, Serialize};

use crate::error::LocalhostClientError;

/// State of the localhost client
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    /// Chain id of the host
    pub chain_id: String,
    /// Latest host height the client was updated to
    pub latest_height: Height,
}

/// Host commitment root and time at one height
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusState {
    /// Commitment root of the host store
    pub root: CommitmentRoot,
    /// Host time in nanoseconds
    pub timestamp: u64,
}

impl ClientState {
    /// Structural validation
    /// # Errors
    /// Returns [`LocalhostClientError::InvalidClientState`] if a field is unset
    pub fn validate(&self) -> Result<(), LocalhostClientError> {
        if self.chain_id.trim().is_empty() {
            return Err(LocalhostClientError::InvalidClientState {
                reason: "chain id cannot be empty".to_string(),
            });
        }
        if !self.latest_height.is_valid() {
            return Err(LocalhostClientError::InvalidClientState {
                reason: "latest height must be valid".to_string(),
            });
        }
        Ok(())
    }
}

impl ConsensusState {
    /// Structural validation
    /// # Errors
    /// Returns an error if the root is empty or the timestamp is zero
    pub fn validate(&self) -> Result<(), LocalhostClientError> {
        if self.root.is_empty() {
            return Err(LocalhostClientError::InvalidConsensusState {
                reason: "root cannot be empty".to_string(),
            });
        }
        if self.timestamp == 0 {
            return Err(LocalhostClientError::InvalidConsensusState {
                reason: "timestamp cannot be zero".to_string(),
            });
        }
        Ok(())
    }
}
