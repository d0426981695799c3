//! Solo machine misbehaviour: the current key signed two different payloads for the same
//! height.

use ibc_client_types::Height;
use prost::Message;
use serde::{Deserialize, Serialize};

use crate::{
    client_state::ClientState,
    error::SoloMachineError,
    sign_bytes::{verify_signature, SignBytes},
};

/// A signed payload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureAndData {
    /// Signed payload, e.g. [`crate::header::Header::data`]
    #[serde(with = "ibc_client_types::base64")]
    pub data: Vec<u8>,
    /// Signature over the payload wrapped in [`SignBytes`]
    #[serde(with = "ibc_client_types::base64::fixed_size")]
    pub signature: [u8; 64],
}

/// Two conflicting signatures at the same height
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Misbehaviour {
    /// Height both signatures were made for
    pub height: Height,
    /// First signature
    pub signature_one: SignatureAndData,
    /// Second signature
    pub signature_two: SignatureAndData,
}

impl SignatureAndData {
    fn verify(&self, client_state: &ClientState, height: Height) -> Result<(), SoloMachineError> {
        let sign_bytes =
            SignBytes::new(&client_state.chain_id, height, self.data.clone()).encode_to_vec();
        verify_signature(&client_state.public_key, &sign_bytes, &self.signature)
    }
}

/// Verifies the misbehaviour and returns the client state frozen at its height.
/// # Errors
/// Returns [`SoloMachineError::InvalidMisbehaviour`] if the client is already frozen, the
/// payloads are equal, or either signature does not verify under the current key
pub fn check_for_misbehaviour(
    client_state: &ClientState,
    misbehaviour: &Misbehaviour,
) -> Result<ClientState, SoloMachineError> {
    let invalid = |reason: String| SoloMachineError::InvalidMisbehaviour { reason };

    if client_state.is_frozen() {
        return Err(SoloMachineError::ClientFrozen {
            frozen_height: client_state.frozen_height,
        });
    }
    if !misbehaviour.height.is_valid() {
        return Err(invalid("height must be valid".to_string()));
    }
    if misbehaviour.signature_one.data == misbehaviour.signature_two.data {
        return Err(invalid("signed payloads are identical".to_string()));
    }

    misbehaviour
        .signature_one
        .verify(client_state, misbehaviour.height)
        .map_err(|e| invalid(format!("first signature: {e}")))?;
    misbehaviour
        .signature_two
        .verify(client_state, misbehaviour.height)
        .map_err(|e| invalid(format!("second signature: {e}")))?;

    Ok(ClientState {
        frozen_height: misbehaviour.height,
        ..client_state.clone()
    })
}
