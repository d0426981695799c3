//! Genesis import and export of the client store

use std::collections::BTreeSet;

use ibc_client_types::{ensure, identifier::ClientId};
use localhost_light_client as localhost;
use serde::{Deserialize, Serialize};

use crate::{
    client_state::{AnyClientState, AnyConsensusState},
    context::HostContext,
    error::ClientError,
    query::{self, ClientConsensusStates, IdentifiedClientState},
    store::{ClientStore, KvStore},
};

/// Initial client store contents
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenesisState {
    /// Client states
    #[serde(default)]
    pub clients: Vec<IdentifiedClientState>,
    /// Consensus states of the clients
    #[serde(default)]
    pub clients_consensus: Vec<ClientConsensusStates>,
    /// Create the localhost client at the host's current height
    #[serde(default)]
    pub create_localhost: bool,
}

fn invalid(reason: impl Into<String>) -> ClientError {
    ClientError::InvalidGenesis {
        reason: reason.into(),
    }
}

impl GenesisState {
    /// Checks that client ids are unique, every state is well formed and every consensus
    /// state belongs to a client of the same type.
    ///
    /// Consensus states must not lie above their client's latest height, and a client with
    /// consensus states must have one at its latest height.
    /// # Errors
    /// Returns [`ClientError::InvalidGenesis`] naming the first violation
    pub fn validate(&self) -> Result<(), ClientError> {
        let mut client_ids = BTreeSet::new();
        for client in &self.clients {
            ensure!(
                client_ids.insert(&client.client_id),
                invalid(format!("duplicate client {}", client.client_id))
            );
            client.client_state.validate().map_err(|e| {
                invalid(format!("client {}: {e}", client.client_id))
            })?;
        }
        ensure!(
            !(self.create_localhost && client_ids.contains(&ClientId::localhost())),
            invalid("localhost client is both listed and requested")
        );

        let mut consensus_ids = BTreeSet::new();
        for entry in &self.clients_consensus {
            ensure!(
                consensus_ids.insert(&entry.client_id),
                invalid(format!("duplicate consensus states for {}", entry.client_id))
            );
            let client = self
                .clients
                .iter()
                .find(|client| client.client_id == entry.client_id)
                .ok_or_else(|| {
                    invalid(format!("consensus states for unknown client {}", entry.client_id))
                })?;

            let latest_height = client.client_state.latest_height();
            ensure!(
                entry.consensus_states.is_empty()
                    || entry
                        .consensus_states
                        .iter()
                        .any(|consensus| consensus.height == latest_height),
                invalid(format!(
                    "client {}: no consensus state at latest height {latest_height}",
                    entry.client_id
                ))
            );

            for consensus in &entry.consensus_states {
                ensure!(
                    consensus.height.is_valid(),
                    invalid(format!("client {}: zero consensus height", entry.client_id))
                );
                ensure!(
                    consensus.height <= latest_height,
                    invalid(format!(
                        "client {}: consensus state at {} above latest height {latest_height}",
                        entry.client_id, consensus.height
                    ))
                );
                ensure!(
                    consensus.consensus_state.client_type() == client.client_state.client_type(),
                    invalid(format!(
                        "client {}: {} consensus state at {}",
                        entry.client_id,
                        consensus.consensus_state.client_type(),
                        consensus.height
                    ))
                );
                consensus.consensus_state.validate().map_err(|e| {
                    invalid(format!("client {} at {}: {e}", entry.client_id, consensus.height))
                })?;
            }
        }
        Ok(())
    }
}

/// Writes `genesis` to the store
/// # Errors
/// Returns [`ClientError::InvalidGenesis`] if the genesis state does not validate
pub fn init_genesis<C: HostContext, S: KvStore>(
    ctx: &C,
    store: &mut ClientStore<S>,
    genesis: &GenesisState,
) -> Result<(), ClientError> {
    genesis.validate()?;

    for client in &genesis.clients {
        store.set_client_state(&client.client_id, &client.client_state)?;
    }
    for entry in &genesis.clients_consensus {
        for consensus in &entry.consensus_states {
            store.set_consensus_state(
                &entry.client_id,
                consensus.height,
                &consensus.consensus_state,
            )?;
        }
    }

    if genesis.create_localhost {
        let client_id = ClientId::localhost();
        let height = ctx.host_height();
        store.set_client_state(
            &client_id,
            &AnyClientState::Localhost(localhost::ClientState {
                chain_id: ctx.host_chain_id(),
                latest_height: height,
            }),
        )?;
        store.set_consensus_state(
            &client_id,
            height,
            &AnyConsensusState::Localhost(localhost::ConsensusState {
                root: ctx.host_commitment_root(),
                timestamp: ctx.host_timestamp(),
            }),
        )?;
    }

    tracing::info!(
        clients = genesis.clients.len(),
        localhost = genesis.create_localhost,
        "client genesis initialized"
    );
    Ok(())
}

/// Reads every client and its consensus states back from the store
/// # Errors
/// Returns an error if a stored state cannot be decoded
pub fn export_genesis<S: KvStore>(store: &ClientStore<S>) -> Result<GenesisState, ClientError> {
    let clients = query::client_states(store)?;
    let clients_consensus = clients
        .iter()
        .map(|client| query::consensus_states(store, &client.client_id))
        .collect::<Result<_, _>>()?;

    Ok(GenesisState {
        clients,
        clients_consensus,
        create_localhost: false,
    })
}
