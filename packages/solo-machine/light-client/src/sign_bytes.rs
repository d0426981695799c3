//! Canonical bytes signed by the solo machine, and signature verification over them.

use ed25519_dalek::{Signature, VerifyingKey};
use ibc_client_types::{proto::RawHeight, Height};
use prost::Message;

use crate::error::SoloMachineError;

/// Envelope of everything the solo machine signs. Binding the chain id and height makes a
/// signature unusable on another chain or at another height.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct SignBytes {
    /// Chain id of the solo machine
    #[prost(string, tag = "1")]
    pub chain_id: String,
    /// Height the signature is for
    #[prost(message, optional, tag = "2")]
    pub height: Option<RawHeight>,
    /// Signed payload
    #[prost(bytes = "vec", tag = "3")]
    pub data: Vec<u8>,
}

/// Payload signed for a header
#[derive(Clone, PartialEq, Eq, Message)]
pub struct HeaderData {
    /// Timestamp of the new state, in nanoseconds
    #[prost(uint64, tag = "1")]
    pub timestamp: u64,
    /// Root committing to the new state
    #[prost(bytes = "vec", tag = "2")]
    pub root: Vec<u8>,
    /// Public key taking over from the current one, empty if unchanged
    #[prost(bytes = "vec", tag = "3")]
    pub new_public_key: Vec<u8>,
}

impl SignBytes {
    /// Creates the sign bytes envelope
    #[must_use]
    pub fn new(chain_id: &str, height: Height, data: Vec<u8>) -> Self {
        Self {
            chain_id: chain_id.to_string(),
            height: Some(height.into()),
            data,
        }
    }
}

/// Verifies an ed25519 signature over `message`
/// # Errors
/// Returns [`SoloMachineError::InvalidPublicKey`] for malformed keys and
/// [`SoloMachineError::InvalidSignature`] if the signature does not verify
pub fn verify_signature(
    public_key: &[u8; 32],
    message: &[u8],
    signature: &[u8; 64],
) -> Result<(), SoloMachineError> {
    let key =
        VerifyingKey::from_bytes(public_key).map_err(|_| SoloMachineError::InvalidPublicKey)?;
    key.verify_strict(message, &Signature::from_bytes(signature))
        .map_err(|_| SoloMachineError::InvalidSignature)
}
