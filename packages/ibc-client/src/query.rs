//! Read-only queries over the client store

use ibc_client_types::{
    identifier::ClientId,
    proto::{RawClientConsensusStates, RawConsensusStateWithHeight, RawIdentifiedClientState},
    Height,
};
use serde::{Deserialize, Serialize};

use crate::{
    client_state::{AnyClientState, AnyConsensusState},
    codec::{decode_field, AnyCodec},
    error::ClientError,
    store::{ClientStore, KvStore},
};

/// A client state together with its identifier
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedClientState {
    /// Client identifier
    pub client_id: ClientId,
    /// Client state
    pub client_state: AnyClientState,
}

/// A consensus state together with its height
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusStateWithHeight {
    /// Height of the consensus state
    pub height: Height,
    /// Consensus state
    pub consensus_state: AnyConsensusState,
}

/// All consensus states of one client, ordered by height
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConsensusStates {
    /// Client identifier
    pub client_id: ClientId,
    /// Consensus states ordered by height
    pub consensus_states: Vec<ConsensusStateWithHeight>,
}

impl TryFrom<RawIdentifiedClientState> for IdentifiedClientState {
    type Error = ClientError;

    fn try_from(raw: RawIdentifiedClientState) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: raw.client_id.parse()?,
            client_state: decode_field(raw.client_state.as_ref(), "client_state")?,
        })
    }
}

impl TryFrom<IdentifiedClientState> for RawIdentifiedClientState {
    type Error = ClientError;

    fn try_from(value: IdentifiedClientState) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: value.client_id.into(),
            client_state: Some(value.client_state.to_any()?),
        })
    }
}

impl TryFrom<RawConsensusStateWithHeight> for ConsensusStateWithHeight {
    type Error = ClientError;

    fn try_from(raw: RawConsensusStateWithHeight) -> Result<Self, Self::Error> {
        Ok(Self {
            height: raw.height.ok_or(ClientError::MissingField("height"))?.into(),
            consensus_state: decode_field(raw.consensus_state.as_ref(), "consensus_state")?,
        })
    }
}

impl TryFrom<ConsensusStateWithHeight> for RawConsensusStateWithHeight {
    type Error = ClientError;

    fn try_from(value: ConsensusStateWithHeight) -> Result<Self, Self::Error> {
        Ok(Self {
            height: Some(value.height.into()),
            consensus_state: Some(value.consensus_state.to_any()?),
        })
    }
}

impl TryFrom<RawClientConsensusStates> for ClientConsensusStates {
    type Error = ClientError;

    fn try_from(raw: RawClientConsensusStates) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: raw.client_id.parse()?,
            consensus_states: raw
                .consensus_states
                .into_iter()
                .map(ConsensusStateWithHeight::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl TryFrom<ClientConsensusStates> for RawClientConsensusStates {
    type Error = ClientError;

    fn try_from(value: ClientConsensusStates) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: value.client_id.into(),
            consensus_states: value
                .consensus_states
                .into_iter()
                .map(RawConsensusStateWithHeight::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Client state of `client_id`
/// # Errors
/// Returns [`ClientError::ClientNotFound`] if there is none
pub fn client_state<S: KvStore>(
    store: &ClientStore<S>,
    client_id: &ClientId,
) -> Result<AnyClientState, ClientError> {
    store.client_state(client_id)
}

/// Consensus state of `client_id` at `height`
/// # Errors
/// Returns [`ClientError::ConsensusStateNotFound`] if there is none
pub fn consensus_state<S: KvStore>(
    store: &ClientStore<S>,
    client_id: &ClientId,
    height: Height,
) -> Result<AnyConsensusState, ClientError> {
    store
        .consensus_state(client_id, height)?
        .ok_or_else(|| ClientError::ConsensusStateNotFound {
            client_id: client_id.clone(),
            height,
        })
}

/// All client states, ordered by identifier
/// # Errors
/// Returns an error if a stored state cannot be decoded
pub fn client_states<S: KvStore>(
    store: &ClientStore<S>,
) -> Result<Vec<IdentifiedClientState>, ClientError> {
    store
        .client_ids()?
        .into_iter()
        .map(|client_id| {
            Ok(IdentifiedClientState {
                client_state: store.client_state(&client_id)?,
                client_id,
            })
        })
        .collect()
}

/// All consensus states of `client_id`, ordered by height
/// # Errors
/// Returns [`ClientError::ClientNotFound`] for unknown clients, or a decode error
pub fn consensus_states<S: KvStore>(
    store: &ClientStore<S>,
    client_id: &ClientId,
) -> Result<ClientConsensusStates, ClientError> {
    if !store.contains_client(client_id) {
        return Err(ClientError::ClientNotFound(client_id.clone()));
    }
    Ok(ClientConsensusStates {
        client_id: client_id.clone(),
        consensus_states: store
            .consensus_states(client_id)?
            .into_iter()
            .map(|(height, consensus_state)| ConsensusStateWithHeight {
                height,
                consensus_state,
            })
            .collect(),
    })
}

/// Heights of all consensus states of `client_id`, ascending
/// # Errors
/// Returns [`ClientError::ClientNotFound`] for unknown clients, or a decode error
pub fn consensus_state_heights<S: KvStore>(
    store: &ClientStore<S>,
    client_id: &ClientId,
) -> Result<Vec<Height>, ClientError> {
    Ok(consensus_states(store, client_id)?
        .consensus_states
        .into_iter()
        .map(|entry| entry.height)
        .collect())
}
