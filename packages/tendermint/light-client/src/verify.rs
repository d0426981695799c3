//! Tendermint header verification.
//!
//! The checks that need the client's own types (frozen state, chain id, heights and the
//! trusted validator set) run first; the signed header is then handed to the
//! [`ProdVerifier`] of `tendermint-light-client-verifier`.

use tendermint::block;
use tendermint_light_client_verifier::{
    types::{TrustedBlockState, UntrustedBlockState},
    ProdVerifier, Verdict, Verifier,
};

use crate::{
    client_state::ClientState,
    consensus_state::ConsensusState,
    error::TendermintClientError,
    header::{time_from_unix_nanos, Header},
};

/// Verifies `header` against the consensus state at `header.trusted_height`.
///
/// `now` is the host time in nanoseconds.
/// # Errors
/// Returns an error if the client is frozen, the header is malformed, for another chain,
/// does not advance past the trusted height, or does not carry the trusted validator set.
/// Rejections by the verifier are reported as [`TendermintClientError::NotEnoughTrust`] or
/// [`TendermintClientError::VerificationFailed`]
pub fn verify_header(
    client_state: &ClientState,
    trusted_consensus_state: &ConsensusState,
    header: &Header,
    now: u64,
) -> Result<(), TendermintClientError> {
    if client_state.is_frozen() {
        return Err(TendermintClientError::ClientFrozen {
            frozen_height: client_state.frozen_height,
        });
    }

    header.validate()?;

    let header_chain_id = header.signed_header.header.chain_id.as_str();
    if header_chain_id != client_state.chain_id {
        return Err(TendermintClientError::ChainIdMismatch {
            expected: client_state.chain_id.clone(),
            actual: header_chain_id.to_string(),
        });
    }
    if header.height() <= header.trusted_height {
        return Err(TendermintClientError::NonIncreasingHeight {
            trusted: header.trusted_height,
            header: header.height(),
        });
    }
    if header.trusted_next_validator_set.hash() != trusted_consensus_state.next_validators_hash {
        return Err(TendermintClientError::ValidatorsHashMismatch {
            reason: "trusted validators do not match the trusted next validators hash"
                .to_string(),
        });
    }

    let chain_id = client_state.tendermint_chain_id()?;
    let options = client_state.as_light_client_options()?;

    let trusted_state = TrustedBlockState {
        chain_id: &chain_id,
        header_time: time_from_unix_nanos(trusted_consensus_state.timestamp)?,
        height: block::Height::try_from(header.trusted_height.epoch_height).map_err(|e| {
            TendermintClientError::InvalidHeader {
                reason: format!("trusted height {}: {e}", header.trusted_height),
            }
        })?,
        next_validators: &header.trusted_next_validator_set,
        next_validators_hash: trusted_consensus_state.next_validators_hash,
    };

    let untrusted_state = UntrustedBlockState {
        signed_header: &header.signed_header,
        validators: &header.validator_set,
        // the next validator set is checked by the following update
        next_validators: None,
    };

    match ProdVerifier::default().verify_update_header(
        untrusted_state,
        trusted_state,
        &options,
        time_from_unix_nanos(now)?,
    ) {
        Verdict::Success => Ok(()),
        Verdict::NotEnoughTrust(tally) => Err(TendermintClientError::NotEnoughTrust {
            reason: format!("{tally:?}"),
        }),
        Verdict::Invalid(detail) => Err(TendermintClientError::VerificationFailed {
            reason: format!("{detail:?}"),
        }),
    }
}
