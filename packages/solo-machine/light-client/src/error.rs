//! Error types for the solo machine light client

use ibc_client_types::Height;
use thiserror::Error;

/// Errors raised by the solo machine light client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SoloMachineError {
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

    /// The header does not directly follow the latest height
    #[error("expected header at height {expected}, found {actual}")]
    UnexpectedHeight {
        /// The only acceptable height
        expected: Height,
        /// Height of the submitted header
        actual: Height,
    },

    /// The header timestamp is older than the trusted one
    #[error("header timestamp {header} is before trusted timestamp {trusted}")]
    TimestampDecreased {
        /// Trusted consensus state timestamp
        trusted: u64,
        /// Header timestamp
        header: u64,
    },

    /// The public key bytes are not a valid ed25519 point
    #[error("invalid public key")]
    InvalidPublicKey,

    /// The signature does not verify under the client's public key
    #[error("signature verification failed")]
    InvalidSignature,

    /// The misbehaviour does not show a conflict
    #[error("invalid misbehaviour: {reason}")]
    InvalidMisbehaviour {
        /// Reason for error
        reason: String,
    },
}
