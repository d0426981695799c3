//! `MsgCreateClient` handler

use ibc_client_types::{ensure, identifier::ClientId};

use super::HandlerOutput;
use crate::{
    client_state::{AnyClientState, AnyConsensusState},
    error::ClientError,
    events::{ClientAttributes, ClientEvent},
    msgs::MsgCreateClient,
    store::{ClientStore, KvStore},
};

/// A validated client creation
#[derive(Clone, Debug, PartialEq)]
pub struct CreateClientResult {
    /// Identifier of the new client
    pub client_id: ClientId,
    /// Initial client state
    pub client_state: AnyClientState,
    /// Consensus state at the initial latest height
    pub consensus_state: AnyConsensusState,
}

/// Validates the creation of a client.
/// # Errors
/// Returns [`ClientError::ClientAlreadyExists`] if the identifier is taken,
/// [`ClientError::ClientFrozen`] for frozen initial states and
/// [`ClientError::InvalidClientState`] or [`ClientError::InvalidConsensusState`] for
/// malformed or mismatched states
pub fn process<S: KvStore>(
    store: &ClientStore<S>,
    msg: MsgCreateClient,
) -> Result<HandlerOutput<CreateClientResult>, ClientError> {
    let MsgCreateClient {
        client_id,
        client_state,
        consensus_state,
        ..
    } = msg;

    ensure!(
        !store.contains_client(&client_id),
        ClientError::ClientAlreadyExists(client_id)
    );
    client_state.validate()?;
    client_state.ensure_active()?;
    consensus_state.validate()?;
    ensure!(
        client_state.client_type() == consensus_state.client_type(),
        ClientError::InvalidConsensusState {
            reason: format!(
                "{} consensus state for {} client",
                consensus_state.client_type(),
                client_state.client_type()
            ),
        }
    );

    let event = ClientEvent::CreateClient(ClientAttributes {
        client_id: client_id.clone(),
        client_type: client_state.client_type(),
        height: client_state.latest_height(),
    });
    let log = format!("created client {client_id}");

    Ok(HandlerOutput::new(
        CreateClientResult {
            client_id,
            client_state,
            consensus_state,
        },
        log,
        event,
    ))
}

/// Persists a validated client creation
/// # Errors
/// Returns an error if a state cannot be encoded
pub fn keep<S: KvStore>(
    store: &mut ClientStore<S>,
    result: &CreateClientResult,
) -> Result<(), ClientError> {
    let height = result.client_state.latest_height();
    store.set_client_state(&result.client_id, &result.client_state)?;
    store.set_consensus_state(&result.client_id, height, &result.consensus_state)?;

    tracing::info!(
        client_id = %result.client_id,
        client_type = %result.client_state.client_type(),
        height = %height,
        "client created"
    );
    Ok(())
}
