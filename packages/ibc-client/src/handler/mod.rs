//! Message handlers.
//!
//! Each handler is split in two: `process` validates the message against the store without
//! writing to it and returns a result describing the state change, `keep` applies that
//! result. A failing message therefore never leaves partial writes behind.

pub mod create_client;
pub mod misbehaviour;
pub mod update_client;

use crate::{
    context::HostContext,
    error::ClientError,
    events::ClientEvent,
    msgs::ClientMsg,
    store::{ClientStore, KvStore},
};

/// Result of a handler together with its log lines and events
#[derive(Clone, Debug, PartialEq)]
pub struct HandlerOutput<T> {
    /// Handler specific result
    pub result: T,
    /// Human readable log lines
    pub log: Vec<String>,
    /// Emitted events
    pub events: Vec<ClientEvent>,
}

impl<T> HandlerOutput<T> {
    /// Creates an output with a single log line and event
    pub fn new(result: T, log: String, event: ClientEvent) -> Self {
        Self {
            result,
            log: vec![log],
            events: vec![event],
        }
    }
}

/// Result of a client handler, ready to be persisted
#[derive(Clone, Debug, PartialEq)]
pub enum ClientResult {
    /// Result of [`create_client::process`]
    Create(create_client::CreateClientResult),
    /// Result of [`update_client::process`]
    Update(update_client::UpdateClientResult),
    /// Result of [`misbehaviour::process`]
    Misbehaviour(misbehaviour::MisbehaviourResult),
}

/// Processes `msg` and, if it is valid, persists its result.
/// # Errors
/// Returns the first error raised while processing the message; the store is left untouched
pub fn dispatch<C: HostContext, S: KvStore>(
    ctx: &C,
    store: &mut ClientStore<S>,
    msg: ClientMsg,
) -> Result<HandlerOutput<ClientResult>, ClientError> {
    let output = match msg {
        ClientMsg::CreateClient(msg) => {
            let output = create_client::process(store, msg)?;
            create_client::keep(store, &output.result)?;
            map_result(output, ClientResult::Create)
        }
        ClientMsg::UpdateClient(msg) => {
            let output = update_client::process(ctx, store, msg)?;
            update_client::keep(store, &output.result)?;
            map_result(output, ClientResult::Update)
        }
        ClientMsg::Misbehaviour(msg) => {
            let output = misbehaviour::process(ctx, store, msg)?;
            misbehaviour::keep(store, &output.result)?;
            map_result(output, ClientResult::Misbehaviour)
        }
    };
    Ok(output)
}

fn map_result<T, U>(output: HandlerOutput<T>, f: impl FnOnce(T) -> U) -> HandlerOutput<U> {
    HandlerOutput {
        result: f(output.result),
        log: output.log,
        events: output.events,
    }
}
