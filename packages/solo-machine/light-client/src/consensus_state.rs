//! Solo machine consensus state

use ibc_client_types::commitment::CommitmentRoot;
use serde::{Deserialize, Serialize};

use crate::error::SoloMachineError;

/// Snapshot of the solo machine's committed state at one height
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusState {
    /// Root committing to the solo machine's state
    pub root: CommitmentRoot,
    /// Timestamp in nanoseconds
    pub timestamp: u64,
}

impl ConsensusState {
    /// Structural validation
    /// # Errors
    /// Returns an error if the root is empty or the timestamp is zero
    pub fn validate(&self) -> Result<(), SoloMachineError> {
        if self.root.is_empty() {
            return Err(SoloMachineError::InvalidConsensusState {
                reason: "root cannot be empty".to_string(),
            });
        }
        if self.timestamp == 0 {
            return Err(SoloMachineError::InvalidConsensusState {
                reason: "timestamp cannot be zero".to_string(),
            });
        }
        Ok(())
    }
}
