//! Localhost header

use ibc_client_types::{commitment::CommitmentRoot, Height};
use serde::{Deserialize, Serialize};

use crate::client_state::ConsensusState;

/// The host's state at one height
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Host height
    pub height: Height,
    /// Host time in nanoseconds
    pub timestamp: u64,
    /// Host commitment root
    pub root: CommitmentRoot,
}

impl Header {
    /// Consensus state recorded for this header
    #[must_use]
    pub fn consensus_state(&self) -> ConsensusState {
        ConsensusState {
            root: self.root.clone(),
            timestamp: self.timestamp,
        }
    }
}
