//! Tendermint header: a signed block header together with the validator sets needed to
//! verify it against a trusted consensus state.

use ibc_client_types::{commitment::CommitmentRoot, Height};
use serde::{Deserialize, Serialize};
use tendermint::{block::signed_header::SignedHeader, validator::Set as ValidatorSet, Time};

use crate::{
    client_state::NANOS_PER_SECOND, consensus_state::ConsensusState, error::TendermintClientError,
};

/// Header submitted to update a tendermint client
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Block header and the commit signing it
    pub signed_header: SignedHeader,
    /// Validator set of the header's height
    pub validator_set: ValidatorSet,
    /// Height of the consensus state this header is verified against
    pub trusted_height: Height,
    /// Validator set whose hash is the trusted consensus state's next validators hash
    pub trusted_next_validator_set: ValidatorSet,
}

impl Header {
    /// Height of the block, in the epoch of the trusted height
    #[must_use]
    pub fn height(&self) -> Height {
        Height::new(
            self.trusted_height.epoch_number,
            self.signed_header.header.height.value(),
        )
    }

    /// Block time in nanoseconds since the unix epoch, zero if it cannot be represented
    #[must_use]
    pub fn timestamp(&self) -> u64 {
        unix_nanos(self.signed_header.header.time).unwrap_or_default()
    }

    /// Consensus state committed to by this header
    #[must_use]
    pub fn consensus_state(&self) -> ConsensusState {
        ConsensusState {
            root: CommitmentRoot::from_bytes(self.signed_header.header.app_hash.as_bytes()),
            timestamp: self.timestamp(),
            next_validators_hash: self.signed_header.header.next_validators_hash,
        }
    }

    /// Structural validation, run before any signature is checked
    /// # Errors
    /// Returns an error naming the first malformed field
    pub fn validate(&self) -> Result<(), TendermintClientError> {
        let invalid = |reason: &str| TendermintClientError::InvalidHeader {
            reason: reason.to_string(),
        };
        let block = &self.signed_header.header;
        let commit = &self.signed_header.commit;

        if block.chain_id.as_str().trim().is_empty() {
            return Err(invalid("chain id cannot be empty"));
        }
        if !self.height().is_valid() {
            return Err(invalid("height must be valid"));
        }
        if !self.trusted_height.is_valid() {
            return Err(invalid("trusted height must be valid"));
        }
        if self.timestamp() == 0 {
            return Err(invalid("timestamp must be after the unix epoch"));
        }
        if block.app_hash.as_bytes().is_empty() {
            return Err(invalid("app hash cannot be empty"));
        }
        if commit.height != block.height {
            return Err(invalid("commit height does not match header height"));
        }
        if commit.signatures.is_empty() {
            return Err(invalid("commit cannot be empty"));
        }
        if commit.signatures.len() != self.validator_set.validators().len() {
            return Err(invalid("commit does not have one entry per validator"));
        }
        if self.trusted_next_validator_set.validators().is_empty() {
            return Err(invalid("trusted validator set cannot be empty"));
        }
        Ok(())
    }
}

/// Nanoseconds since the unix epoch, `None` before the epoch or past `u64::MAX`
pub(crate) fn unix_nanos(time: Time) -> Option<u64> {
    u64::try_from(time.unix_timestamp_nanos()).ok()
}

/// Inverse of [`unix_nanos`]
pub(crate) fn time_from_unix_nanos(nanos: u64) -> Result<Time, TendermintClientError> {
    let invalid = |reason: String| TendermintClientError::VerificationFailed { reason };
    let seconds = i64::try_from(nanos / NANOS_PER_SECOND).map_err(|e| invalid(e.to_string()))?;
    let subsec = u32::try_from(nanos % NANOS_PER_SECOND).map_err(|e| invalid(e.to_string()))?;
    Time::from_unix_timestamp(seconds, subsec).map_err(|e| invalid(e.to_string()))
}
