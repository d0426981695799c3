//! ICS-02 client core.
//!
//! Holds the closed set of client variants behind the `Any*` sum types, the client store,
//! the create/update/misbehaviour handlers and the proof verification operations run
//! against the consensus states recorded for each client.
#![deny(missing_docs, clippy::nursery, clippy::pedantic, warnings, unused_crate_dependencies)]

pub mod client_state;
pub mod codec;
pub mod context;
pub mod error;
pub mod events;
pub mod genesis;
pub mod handler;
pub mod msgs;
pub mod query;
pub mod store;
pub mod verify;

pub use client_state::{AnyClientState, AnyConsensusState, AnyHeader, AnyMisbehaviour};
pub use error::ClientError;
