//! Client messages and their protobuf forms

use ibc_client_types::{
    ensure,
    identifier::ClientId,
    proto::{RawMsgCreateClient, RawMsgSubmitMisbehaviour, RawMsgUpdateClient},
};

use crate::{
    client_state::{AnyClientState, AnyConsensusState, AnyHeader, AnyMisbehaviour},
    codec::{decode_field, AnyCodec},
    error::ClientError,
};

/// Creates a client from an initial client state and the consensus state at its latest
/// height
#[derive(Clone, Debug, PartialEq)]
pub struct MsgCreateClient {
    /// Identifier of the new client
    pub client_id: ClientId,
    /// Initial client state
    pub client_state: AnyClientState,
    /// Consensus state at the initial latest height
    pub consensus_state: AnyConsensusState,
    /// Submitter
    pub signer: String,
}

/// Updates a client with a header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgUpdateClient {
    /// Client to update
    pub client_id: ClientId,
    /// Header of the new state
    pub header: AnyHeader,
    /// Submitter
    pub signer: String,
}

/// Submits misbehaviour evidence against a client
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgSubmitMisbehaviour {
    /// Client the evidence is for
    pub client_id: ClientId,
    /// Conflicting evidence
    pub misbehaviour: AnyMisbehaviour,
    /// Submitter
    pub signer: String,
}

/// The messages routed by [`crate::handler::dispatch`]
#[derive(Clone, Debug, PartialEq)]
pub enum ClientMsg {
    /// Create a client
    CreateClient(MsgCreateClient),
    /// Update a client
    UpdateClient(MsgUpdateClient),
    /// Freeze a client with misbehaviour
    Misbehaviour(MsgSubmitMisbehaviour),
}

fn signer(signer: String) -> Result<String, ClientError> {
    ensure!(!signer.is_empty(), ClientError::MissingField("signer"));
    Ok(signer)
}

impl TryFrom<RawMsgCreateClient> for MsgCreateClient {
    type Error = ClientError;

    fn try_from(raw: RawMsgCreateClient) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: raw.client_id.parse()?,
            client_state: decode_field(raw.client_state.as_ref(), "client_state")?,
            consensus_state: decode_field(raw.consensus_state.as_ref(), "consensus_state")?,
            signer: signer(raw.signer)?,
        })
    }
}

impl TryFrom<MsgCreateClient> for RawMsgCreateClient {
    type Error = ClientError;

    fn try_from(msg: MsgCreateClient) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: msg.client_id.into(),
            client_state: Some(msg.client_state.to_any()?),
            consensus_state: Some(msg.consensus_state.to_any()?),
            signer: msg.signer,
        })
    }
}

impl TryFrom<RawMsgUpdateClient> for MsgUpdateClient {
    type Error = ClientError;

    fn try_from(raw: RawMsgUpdateClient) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: raw.client_id.parse()?,
            header: decode_field(raw.header.as_ref(), "header")?,
            signer: signer(raw.signer)?,
        })
    }
}

impl TryFrom<MsgUpdateClient> for RawMsgUpdateClient {
    type Error = ClientError;

    fn try_from(msg: MsgUpdateClient) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: msg.client_id.into(),
            header: Some(msg.header.to_any()?),
            signer: msg.signer,
        })
    }
}

impl TryFrom<RawMsgSubmitMisbehaviour> for MsgSubmitMisbehaviour {
    type Error = ClientError;

    fn try_from(raw: RawMsgSubmitMisbehaviour) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: raw.client_id.parse()?,
            misbehaviour: decode_field(raw.misbehaviour.as_ref(), "misbehaviour")?,
            signer: signer(raw.signer)?,
        })
    }
}

impl TryFrom<MsgSubmitMisbehaviour> for RawMsgSubmitMisbehaviour {
    type Error = ClientError;

    fn try_from(msg: MsgSubmitMisbehaviour) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: msg.client_id.into(),
            misbehaviour: Some(msg.misbehaviour.to_any()?),
            signer: msg.signer,
        })
    }
}
