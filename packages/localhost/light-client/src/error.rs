//! Error types for the localhost light client

use ibc_client_types::Height;
use thiserror::Error;

/// Errors raised by the localhost light client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocalhostClientError {
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

    /// The header does not describe the host's current state
    #[error("header does not match the host: {reason}")]
    HostMismatch {
        /// Reason for error
        reason: String,
    },

    /// The header does not advance past the latest height
    #[error("header height {header} must be after latest height {latest}")]
    NonIncreasingHeight {
        /// Latest height of the client
        latest: Height,
        /// Header height
        header: Height,
    },

    /// A proof was supplied although the host store is read directly
    #[error("localhost verification takes an empty proof")]
    UnexpectedProof,

    /// The host store holds a different value
    #[error("stored value does not match the expected value")]
    ValueMismatch,

    /// The host store holds no value
    #[error("no value stored under the path")]
    ValueNotFound,

    /// The host store holds a value where absence was expected
    #[error("a value is stored under the path")]
    ValueFound,
}
