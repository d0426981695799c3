//! Error types for the tendermint light client

use ibc_client_types::Height;
use thiserror::Error;

/// Errors raised by the tendermint light client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TendermintClientError {
    /// The client is frozen
    #[error("client is frozen at {frozen_height}")]
    ClientFrozen {
        /// Height the client was frozen at
        frozen_height: Height,
    },

    /// The client state is malformed
    #[error("invalid client state: {reason}")]
    InvalidClientState {
        /// Reason for error
        reason: String,
    },

    /// The consensus state is malformed
    #[error("invalid consensus state: {reason}")]
    InvalidConsensusState {
        /// Reason for error
        reason: String,
    },

    /// The header is malformed
    #[error("invalid header: {reason}")]
    InvalidHeader {
        /// Reason for error
        reason: String,
    },

    /// The trust threshold is outside of `[1/3, 1]`
    #[error("invalid trust threshold {numerator}/{denominator}")]
    InvalidTrustThreshold {
        /// Numerator of the fraction
        numerator: u64,
        /// Denominator of the fraction
        denominator: u64,
    },

    /// The header is for another chain
    #[error("chain id mismatch: expected {expected}, found {actual}")]
    ChainIdMismatch {
        /// Chain id of the client
        expected: String,
        /// Chain id of the header
        actual: String,
    },

    /// The header height does not advance past the trusted height
    #[error("header height {header} must be after trusted height {trusted}")]
    NonIncreasingHeight {
        /// Trusted height
        trusted: Height,
        /// Header height
        header: Height,
    },

    /// The trusted validator set does not hash to the trusted consensus state's value
    #[error("validators hash mismatch: {reason}")]
    ValidatorsHashMismatch {
        /// Reason for error
        reason: String,
    },

    /// The light client verifier rejected the header
    #[error("header verification failed: {reason}")]
    VerificationFailed {
        /// Reason for error
        reason: String,
    },

    /// Too little of the trusted validator set's power signed a skipping header
    #[error("not enough trust: {reason}")]
    NotEnoughTrust {
        /// Voting power tally reported by the verifier
        reason: String,
    },

    /// The misbehaviour does not show a conflict
    #[error("invalid misbehaviour: {reason}")]
    InvalidMisbehaviour {
        /// Reason for error
        reason: String,
    },
}
