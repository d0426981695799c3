//! Tendermint misbehaviour: two valid headers that cannot both be part of one chain

use ibc_client_types::Height;
use serde::{Deserialize, Serialize};

use crate::{
    client_state::ClientState, consensus_state::ConsensusState, error::TendermintClientError,
    header::Header, verify::verify_header,
};

/// Two conflicting headers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Misbehaviour {
    /// Header at the higher, or same, height
    pub header_1: Header,
    /// Header at the lower, or same, height
    pub header_2: Header,
}

impl Misbehaviour {
    /// Height the client is frozen at
    #[must_use]
    pub fn height(&self) -> Height {
        self.header_1.height()
    }
}

/// Verifies the misbehaviour and returns the client state frozen at `header_1`'s height.
///
/// Each header is verified against the consensus state at its own trusted height:
/// `trusted_consensus_state_1` for `header_1` and `trusted_consensus_state_2` for `header_2`.
/// # Errors
/// Returns an error if the headers do not conflict or either fails verification
pub fn check_for_misbehaviour(
    client_state: &ClientState,
    trusted_consensus_state_1: &ConsensusState,
    trusted_consensus_state_2: &ConsensusState,
    misbehaviour: &Misbehaviour,
    now: u64,
) -> Result<ClientState, TendermintClientError> {
    let invalid = |reason: String| TendermintClientError::InvalidMisbehaviour { reason };
    let (header_1, header_2) = (&misbehaviour.header_1, &misbehaviour.header_2);

    if client_state.is_frozen() {
        return Err(TendermintClientError::ClientFrozen {
            frozen_height: client_state.frozen_height,
        });
    }
    if header_1.height() < header_2.height() {
        return Err(invalid(format!(
            "header_1 height {} is before header_2 height {}",
            header_1.height(),
            header_2.height()
        )));
    }

    // same height: two different blocks were committed; otherwise time ran backwards
    let conflicting = if header_1.height() == header_2.height() {
        header_1.signed_header.commit.block_id.hash != header_2.signed_header.commit.block_id.hash
    } else {
        header_1.signed_header.header.time <= header_2.signed_header.header.time
    };
    if !conflicting {
        return Err(invalid("headers do not conflict".to_string()));
    }

    verify_header(client_state, trusted_consensus_state_1, header_1, now)
        .map_err(|e| invalid(format!("header_1: {e}")))?;
    verify_header(client_state, trusted_consensus_state_2, header_2, now)
        .map_err(|e| invalid(format!("header_2: {e}")))?;

    Ok(ClientState {
        frozen_height: misbehaviour.height(),
        ..client_state.clone()
    })
}
