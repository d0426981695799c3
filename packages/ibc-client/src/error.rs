//! Error type of the client core

use ibc_client_types::{
    error::{ClientTypeError, CommitmentError, IdentifierError},
    identifier::ClientId,
    Height,
};
use localhost_light_client::error::LocalhostClientError;
use thiserror::Error;

/// Errors raised by the client core. Variant-specific failures are folded into
/// [`ClientError::InvalidHeader`] and [`ClientError::InvalidMisbehaviour`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The client type tag is not registered
    #[error(transparent)]
    InvalidClientType(#[from] ClientTypeError),

    /// The header is malformed, wrongly signed or does not advance the client
    #[error("invalid header: {reason}")]
    InvalidHeader {
        /// Reason for error
        reason: String,
    },

    /// The misbehaviour fails authentication or shows no conflict
    #[error("invalid misbehaviour: {reason}")]
    InvalidMisbehaviour {
        /// Reason for error
        reason: String,
    },

    /// The client is frozen
    #[error("client is frozen at {frozen_height}")]
    ClientFrozen {
        /// Height the client was frozen at
        frozen_height: Height,
    },

    /// No client is stored under the identifier
    #[error("client {0} not found")]
    ClientNotFound(ClientId),

    /// No consensus state is recorded at the height
    #[error("consensus state for client {client_id} at {height} not found")]
    ConsensusStateNotFound {
        /// Client identifier
        client_id: ClientId,
        /// Requested height
        height: Height,
    },

    /// The proof does not match the client's proof specs
    #[error("proof spec mismatch: {reason}")]
    ProofSpecMismatch {
        /// Reason for error
        reason: String,
    },

    /// The proof does not authenticate the claim
    #[error("proof verification failed: {reason}")]
    ProofVerificationFailed {
        /// Reason for error
        reason: String,
    },

    /// The height is zero or not monotonic
    #[error("invalid height {0}")]
    InvalidHeight(Height),

    /// A client is already stored under the identifier
    #[error("client {0} already exists")]
    ClientAlreadyExists(ClientId),

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

    /// An identifier is malformed
    #[error(transparent)]
    InvalidIdentifier(#[from] IdentifierError),

    /// A payload could not be decoded
    #[error("failed to decode {type_url}: {reason}")]
    Decode {
        /// Type of the payload
        type_url: String,
        /// Reason for error
        reason: String,
    },

    /// A payload could not be encoded
    #[error("failed to encode: {reason}")]
    Encode {
        /// Reason for error
        reason: String,
    },

    /// A required field is unset
    #[error("missing field {0}")]
    MissingField(&'static str),

    /// The genesis state is inconsistent
    #[error("invalid genesis: {reason}")]
    InvalidGenesis {
        /// Reason for error
        reason: String,
    },
}

impl From<CommitmentError> for ClientError {
    fn from(e: CommitmentError) -> Self {
        match e {
            CommitmentError::ProofSpecMismatch { reason } => Self::ProofSpecMismatch { reason },
            e => Self::ProofVerificationFailed {
                reason: e.to_string(),
            },
        }
    }
}

impl From<LocalhostClientError> for ClientError {
    fn from(e: LocalhostClientError) -> Self {
        match e {
            LocalhostClientError::UnexpectedProof => Self::ProofSpecMismatch {
                reason: e.to_string(),
            },
            e => Self::ProofVerificationFailed {
                reason: e.to_string(),
            },
        }
    }
}
