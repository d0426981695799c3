//! Solo machine header verification and state update

use crate::{
    client_state::ClientState, consensus_state::ConsensusState, error::SoloMachineError,
    header::Header, sign_bytes::verify_signature,
};

/// Verifies that `header` is the direct successor of the client's latest state and is signed
/// by the current public key.
///
/// `trusted_consensus_state` is the consensus state at the client's latest height.
/// # Errors
/// Returns an error if the client is frozen, the header is malformed, does not follow the
/// latest height, goes back in time, or is not signed by the current key
pub fn verify_header(
    client_state: &ClientState,
    trusted_consensus_state: &ConsensusState,
    header: &Header,
) -> Result<(), SoloMachineError> {
    if client_state.is_frozen() {
        return Err(SoloMachineError::ClientFrozen {
            frozen_height: client_state.frozen_height,
        });
    }

    header.validate()?;

    let expected = client_state
        .latest_height
        .increment()
        .ok_or(SoloMachineError::InvalidHeader {
            reason: "latest height cannot be incremented".to_string(),
        })?;
    if header.height != expected {
        return Err(SoloMachineError::UnexpectedHeight {
            expected,
            actual: header.height,
        });
    }

    if header.timestamp < trusted_consensus_state.timestamp {
        return Err(SoloMachineError::TimestampDecreased {
            trusted: trusted_consensus_state.timestamp,
            header: header.timestamp,
        });
    }

    verify_signature(
        &client_state.public_key,
        &header.sign_bytes(&client_state.chain_id),
        &header.signature,
    )
}

/// Verifies `header` and returns the client state and consensus state it leads to.
/// # Errors
/// Returns an error if [`verify_header`] fails
pub fn update_state(
    client_state: &ClientState,
    trusted_consensus_state: &ConsensusState,
    header: &Header,
) -> Result<(ClientState, ConsensusState), SoloMachineError> {
    verify_header(client_state, trusted_consensus_state, header)?;

    let new_client_state = ClientState {
        public_key: header.new_public_key.unwrap_or(client_state.public_key),
        latest_height: header.height,
        ..client_state.clone()
    };

    Ok((new_client_state, header.consensus_state()))
}
