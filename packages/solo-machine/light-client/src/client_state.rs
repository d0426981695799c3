//! Solo machine client state

use ibc_client_types::{specs::ProofSpecs, Height};
use serde::{Deserialize, Serialize};

use crate::error::SoloMachineError;

/// State of a solo machine client
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientState {
    /// Chain id of the solo machine
    pub chain_id: String,
    /// Current ed25519 public key of the solo machine
    #[serde(with = "ibc_client_types::base64::fixed_size")]
    pub public_key: [u8; 32],
    /// Latest height the client was updated to
    pub latest_height: Height,
    /// Height the client was frozen at, zero if active
    #[serde(default)]
    pub frozen_height: Height,
    /// Proof specs the solo machine's commitment proofs must match
    #[serde(default)]
    pub proof_specs: ProofSpecs,
}

impl ClientState {
    /// Returns true if the client has been frozen by misbehaviour
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        !self.frozen_height.is_zero()
    }

    /// Structural validation
    /// # Errors
    /// Returns [`SoloMachineError::InvalidClientState`] if a field is unset or malformed
    pub fn validate(&self) -> Result<(), SoloMachineError> {
        let invalid = |reason: &str| SoloMachineError::InvalidClientState {
            reason: reason.to_string(),
        };

        if self.chain_id.trim().is_empty() {
            return Err(invalid("chain id cannot be empty"));
        }
        if !self.latest_height.is_valid() {
            return Err(invalid("latest height must be valid"));
        }
        if self.proof_specs.is_empty() {
            return Err(invalid("proof specs cannot be empty"));
        }
        ed25519_dalek::VerifyingKey::from_bytes(&self.public_key)
            .map_err(|_| invalid("public key is not a valid ed25519 key"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::client_state;

    #[test]
    fn validate() {
        let client = client_state(Height::new(0, 1));
        assert_eq!(client.validate(), Ok(()));

        let mut no_chain = client.clone();
        no_chain.chain_id = String::new();
        assert!(no_chain.validate().is_err());

        let mut zero_height = client.clone();
        zero_height.latest_height = Height::new(1, 0);
        assert!(zero_height.validate().is_err());

        let mut no_specs = client;
        no_specs.proof_specs = ProofSpecs::from(Vec::new());
        assert!(no_specs.validate().is_err());
    }

    #[test]
    fn json_keeps_keys_as_base64() {
        let client = client_state(Height::new(0, 5));
        let json = serde_json::to_value(&client).unwrap();
        assert!(json["public_key"].is_string());
        assert_eq!(
            serde_json::from_value::<ClientState>(json).unwrap(),
            client
        );
    }
}
