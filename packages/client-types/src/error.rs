//! Error types for heights, client types, identifiers and commitment proofs

use thiserror::Error;

/// Errors raised while parsing or building a [`crate::Height`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeightError {
    /// The string is not of the form `epoch-{E}_height-{H}`
    #[error("invalid height format: {0}")]
    InvalidFormat(String),
}

/// Error raised when a client type tag is not registered
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientTypeError {
    /// Unknown canonical name
    #[error("invalid client type '{0}'")]
    Unregistered(String),

    /// Unknown byte tag
    #[error("invalid client type tag {0}")]
    UnregisteredTag(u8),
}

/// Errors raised while validating ICS-24 identifiers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Identifier is empty
    #[error("identifier cannot be empty")]
    Empty,

    /// Identifier length is out of bounds
    #[error("identifier {id} has invalid length {length}, must be between {min} and {max}")]
    InvalidLength {
        /// Offending identifier
        id: String,
        /// Actual length
        length: usize,
        /// Minimum allowed length
        min: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// Identifier contains a character outside of `[a-zA-Z0-9._+-#[]<>]`
    #[error("identifier {id} contains invalid characters")]
    InvalidCharacter {
        /// Offending identifier
        id: String,
    },
}

/// Errors raised by the commitment proof verification engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommitmentError {
    /// The commitment root to verify against is empty
    #[error("commitment root cannot be empty")]
    EmptyRoot,

    /// The commitment prefix is empty
    #[error("commitment prefix cannot be empty")]
    EmptyPrefix,

    /// The proof bytes are empty
    #[error("commitment proof cannot be empty")]
    EmptyProof,

    /// The value to prove membership of is empty
    #[error("value to verify cannot be empty")]
    EmptyValue,

    /// The proof bytes are not a valid merkle proof
    #[error("failed to decode merkle proof: {reason}")]
    ProofDecode {
        /// Reason for error
        reason: String,
    },

    /// The proof structure does not match the accepted proof specs
    #[error("proof does not match proof specs: {reason}")]
    ProofSpecMismatch {
        /// Reason for error
        reason: String,
    },

    /// The proof does not authenticate the claim against the root
    #[error("proof verification failed: {reason}")]
    VerificationFailed {
        /// Reason for error
        reason: String,
    },
}
