//! Tendermint client state update

use crate::{
    client_state::ClientState, consensus_state::ConsensusState, error::TendermintClientError,
    header::Header, verify::verify_header,
};

/// Verifies `header` and returns the client state and consensus state it leads to.
///
/// `trusted_consensus_state` is the consensus state at `header.trusted_height` and `now` is
/// the host time in nanoseconds.
/// # Errors
/// Returns an error if [`verify_header`] fails
pub fn update_state(
    client_state: &ClientState,
    trusted_consensus_state: &ConsensusState,
    header: &Header,
    now: u64,
) -> Result<(ClientState, ConsensusState), TendermintClientError> {
    verify_header(client_state, trusted_consensus_state, header, now)?;

    let new_client_state = ClientState {
        latest_height: client_state.latest_height.max(header.height()),
        ..client_state.clone()
    };

    Ok((new_client_state, header.consensus_state()))
}
