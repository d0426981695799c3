//! `MsgSubmitMisbehaviour` handler

use ibc_client_types::identifier::ClientId;

use super::HandlerOutput;
use crate::{
    client_state::AnyClientState,
    context::HostContext,
    error::ClientError,
    events::{ClientAttributes, ClientEvent},
    msgs::MsgSubmitMisbehaviour,
    store::{ClientStore, KvStore},
};

/// A validated misbehaviour
#[derive(Clone, Debug, PartialEq)]
pub struct MisbehaviourResult {
    /// Frozen client
    pub client_id: ClientId,
    /// Frozen client state
    pub client_state: AnyClientState,
}

/// Validates misbehaviour evidence against the stored client.
/// # Errors
/// Returns [`ClientError::ClientNotFound`] for unknown clients and any error raised by
/// [`AnyClientState::check_misbehaviour_and_update_state`]
pub fn process<C: HostContext, S: KvStore>(
    ctx: &C,
    store: &ClientStore<S>,
    msg: MsgSubmitMisbehaviour,
) -> Result<HandlerOutput<MisbehaviourResult>, ClientError> {
    let MsgSubmitMisbehaviour {
        client_id,
        misbehaviour,
        ..
    } = msg;

    let client_state = store.client_state(&client_id)?;
    let client_state =
        client_state.check_misbehaviour_and_update_state(ctx, store, &client_id, &misbehaviour)?;

    let event = ClientEvent::ClientMisbehaviour(ClientAttributes {
        client_id: client_id.clone(),
        client_type: client_state.client_type(),
        height: client_state.frozen_height(),
    });
    let log = format!(
        "client {client_id} frozen at {}",
        client_state.frozen_height()
    );

    Ok(HandlerOutput::new(
        MisbehaviourResult {
            client_id,
            client_state,
        },
        log,
        event,
    ))
}

/// Persists the frozen client state
/// # Errors
/// Returns an error if the state cannot be encoded
pub fn keep<S: KvStore>(
    store: &mut ClientStore<S>,
    result: &MisbehaviourResult,
) -> Result<(), ClientError> {
    store.set_client_state(&result.client_id, &result.client_state)?;

    tracing::warn!(
        client_id = %result.client_id,
        client_type = %result.client_state.client_type(),
        height = %result.client_state.frozen_height(),
        "client frozen by misbehaviour"
    );
    Ok(())
}
