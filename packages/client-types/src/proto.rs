//! Protobuf shapes for the types that cross the wire.
//!
//! Variant payloads travel inside [`Any`]: the `type_url` is the explicit discriminant and
//! `value` is the variant's encoded body.

/// Protobuf encoding of [`crate::Height`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct RawHeight {
    /// The epoch the chain is in
    #[prost(uint64, tag = "1")]
    pub epoch_number: u64,
    /// The height of the chain within the epoch
    #[prost(uint64, tag = "2")]
    pub epoch_height: u64,
}

/// A variant-tagged payload
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Any {
    /// Discriminant naming the variant the payload decodes into
    #[prost(string, tag = "1")]
    pub type_url: String,
    /// Encoded payload
    #[prost(bytes = "vec", tag = "2")]
    pub value: Vec<u8>,
}

/// Protobuf encoding of [`crate::commitment::MerkleProof`]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RawMerkleProof {
    /// One commitment proof per proof spec, innermost store first
    #[prost(message, repeated, tag = "1")]
    pub proofs: Vec<ics23::CommitmentProof>,
}

/// Message creating a new light client
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct RawMsgCreateClient {
    /// Identifier chosen for the new client
    #[prost(string, tag = "1")]
    pub client_id: String,
    /// Initial client state
    #[prost(message, optional, tag = "2")]
    pub client_state: Option<Any>,
    /// Consensus state at the initial client height
    #[prost(message, optional, tag = "3")]
    pub consensus_state: Option<Any>,
    /// Submitter of the message
    #[prost(string, tag = "4")]
    pub signer: String,
}

/// Message updating a light client with a new header
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct RawMsgUpdateClient {
    /// Client to update
    #[prost(string, tag = "1")]
    pub client_id: String,
    /// Header authenticating the new state
    #[prost(message, optional, tag = "2")]
    pub header: Option<Any>,
    /// Submitter of the message
    #[prost(string, tag = "3")]
    pub signer: String,
}

/// Message submitting evidence of misbehaviour
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct RawMsgSubmitMisbehaviour {
    /// Client the evidence is for
    #[prost(string, tag = "1")]
    pub client_id: String,
    /// Conflicting evidence
    #[prost(message, optional, tag = "2")]
    pub misbehaviour: Option<Any>,
    /// Submitter of the message
    #[prost(string, tag = "3")]
    pub signer: String,
}

/// A client state together with its identifier
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct RawIdentifiedClientState {
    /// Client identifier
    #[prost(string, tag = "1")]
    pub client_id: String,
    /// Client state
    #[prost(message, optional, tag = "2")]
    pub client_state: Option<Any>,
}

/// A consensus state together with its height
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct RawConsensusStateWithHeight {
    /// Height of the consensus state
    #[prost(message, optional, tag = "1")]
    pub height: Option<RawHeight>,
    /// Consensus state
    #[prost(message, optional, tag = "2")]
    pub consensus_state: Option<Any>,
}

/// All consensus states of one client
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct RawClientConsensusStates {
    /// Client identifier
    #[prost(string, tag = "1")]
    pub client_id: String,
    /// Consensus states ordered by height
    #[prost(message, repeated, tag = "2")]
    pub consensus_states: Vec<RawConsensusStateWithHeight>,
}
