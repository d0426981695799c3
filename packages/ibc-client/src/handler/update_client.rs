//! `MsgUpdateClient` handler

use ibc_client_types::{identifier::ClientId, Height};

use super::HandlerOutput;
use crate::{
    client_state::{AnyClientState, AnyConsensusState},
    context::HostContext,
    error::ClientError,
    events::{ClientAttributes, ClientEvent},
    msgs::MsgUpdateClient,
    store::{ClientStore, KvStore},
};

/// A validated client update
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateClientResult {
    /// Updated client
    pub client_id: ClientId,
    /// Client state after the update
    pub client_state: AnyClientState,
    /// Consensus state at the header height
    pub consensus_state: AnyConsensusState,
    /// Height of the header
    pub height: Height,
    /// True if the header was already applied, in which case nothing is written
    pub redundant: bool,
}

/// Validates a header against the stored client.
/// # Errors
/// Returns [`ClientError::ClientNotFound`] for unknown clients and any error raised by
/// [`AnyClientState::check_header_and_update_state`]
pub fn process<C: HostContext, S: KvStore>(
    ctx: &C,
    store: &ClientStore<S>,
    msg: MsgUpdateClient,
) -> Result<HandlerOutput<UpdateClientResult>, ClientError> {
    let MsgUpdateClient {
        client_id, header, ..
    } = msg;

    let client_state = store.client_state(&client_id)?;
    let update = client_state.check_header_and_update_state(ctx, store, &client_id, &header)?;

    let event = ClientEvent::UpdateClient(ClientAttributes {
        client_id: client_id.clone(),
        client_type: update.client_state.client_type(),
        height: update.height,
    });
    let log = if update.redundant {
        format!("client {client_id} already has a consensus state at {}", update.height)
    } else {
        format!("updated client {client_id} to {}", update.height)
    };

    Ok(HandlerOutput::new(
        UpdateClientResult {
            client_id,
            client_state: update.client_state,
            consensus_state: update.consensus_state,
            height: update.height,
            redundant: update.redundant,
        },
        log,
        event,
    ))
}

/// Persists a validated update
/// # Errors
/// Returns an error if a state cannot be encoded
pub fn keep<S: KvStore>(
    store: &mut ClientStore<S>,
    result: &UpdateClientResult,
) -> Result<(), ClientError> {
    if result.redundant {
        tracing::debug!(
            client_id = %result.client_id,
            height = %result.height,
            "header already applied"
        );
        return Ok(());
    }

    store.set_client_state(&result.client_id, &result.client_state)?;
    store.set_consensus_state(&result.client_id, result.height, &result.consensus_state)?;

    tracing::info!(
        client_id = %result.client_id,
        client_type = %result.client_state.client_type(),
        height = %result.height,
        "client updated"
    );
    Ok(())
}
