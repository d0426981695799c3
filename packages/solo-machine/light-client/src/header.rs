//! Solo machine header

use ibc_client_types::{commitment::CommitmentRoot, Height};
use prost::Message;
use serde::{Deserialize, Serialize};

use crate::{
    consensus_state::ConsensusState,
    error::SoloMachineError,
    sign_bytes::{HeaderData, SignBytes},
};

/// A new state of the solo machine, signed by its current key
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Height of the new state
    pub height: Height,
    /// Timestamp of the new state, in nanoseconds
    pub timestamp: u64,
    /// Root committing to the new state
    pub root: CommitmentRoot,
    /// Public key to use from this height on, if rotated
    #[serde(default, with = "ibc_client_types::base64::fixed_size::option")]
    pub new_public_key: Option<[u8; 32]>,
    /// Signature over [`Header::sign_bytes`]
    #[serde(with = "ibc_client_types::base64::fixed_size")]
    pub signature: [u8; 64],
}

impl Header {
    /// Payload signed for this header
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        HeaderData {
            timestamp: self.timestamp,
            root: self.root.as_bytes().to_vec(),
            new_public_key: self.new_public_key.map(Vec::from).unwrap_or_default(),
        }
        .encode_to_vec()
    }

    /// Canonical bytes the solo machine signs for this header
    #[must_use]
    pub fn sign_bytes(&self, chain_id: &str) -> Vec<u8> {
        SignBytes::new(chain_id, self.height, self.data()).encode_to_vec()
    }

    /// Consensus state committed to by this header
    #[must_use]
    pub fn consensus_state(&self) -> ConsensusState {
        ConsensusState {
            root: self.root.clone(),
            timestamp: self.timestamp,
        }
    }

    /// Structural validation, run before the signature check
    /// # Errors
    /// Returns [`SoloMachineError::InvalidHeader`] if a field is unset
    pub fn validate(&self) -> Result<(), SoloMachineError> {
        let invalid = |reason: &str| SoloMachineError::InvalidHeader {
            reason: reason.to_string(),
        };

        if !self.height.is_valid() {
            return Err(invalid("height must be valid"));
        }
        if self.timestamp == 0 {
            return Err(invalid("timestamp cannot be zero"));
        }
        if self.root.is_empty() {
            return Err(invalid("root cannot be empty"));
        }
        Ok(())
    }
}
