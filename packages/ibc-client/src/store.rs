//! Key-value storage of client and consensus states.
//!
//! Client states live under their ICS-24 path. Consensus states live under a separate
//! top-level `consensusStates/{client_id}/` prefix followed by the big-endian height, so
//! iterating the prefix yields them in height order and no height can forge a key in the
//! `clients/` namespace.

use std::collections::BTreeMap;

use ibc_client_types::{identifier::ClientId, path::Path, Height};

use crate::{
    client_state::{AnyClientState, AnyConsensusState},
    codec,
    error::ClientError,
};

const CLIENTS_PREFIX: &str = "clients/";
const CLIENT_STATE_SUFFIX: &str = "/clientState";
const CONSENSUS_STATES_PREFIX: &str = "consensusStates/";

/// A host key-value store
pub trait KvStore {
    /// Returns the value stored under `key`
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;
    /// Stores `value` under `key`, replacing any previous value
    fn set(&mut self, key: Vec<u8>, value: Vec<u8>);
    /// Iterates over the entries whose key starts with `prefix`, in key order
    fn prefix_iter<'a>(
        &'a self,
        prefix: &'a [u8],
    ) -> Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + 'a>;
}

/// In-memory [`KvStore`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore(BTreeMap<Vec<u8>, Vec<u8>>);

impl KvStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.0.insert(key, value);
    }

    fn prefix_iter<'a>(
        &'a self,
        prefix: &'a [u8],
    ) -> Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + 'a> {
        Box::new(
            self.0
                .range(prefix.to_vec()..)
                .take_while(move |(key, _)| key.starts_with(prefix))
                .map(|(key, value)| (key.clone(), value.clone())),
        )
    }
}

/// Typed view of the client states and consensus states in a [`KvStore`]
#[derive(Clone, Debug, Default)]
pub struct ClientStore<S> {
    inner: S,
}

fn consensus_state_prefix(client_id: &ClientId) -> Vec<u8> {
    format!("{CONSENSUS_STATES_PREFIX}{client_id}/").into_bytes()
}

fn consensus_state_key(client_id: &ClientId, height: Height) -> Vec<u8> {
    let mut key = consensus_state_prefix(client_id);
    key.extend_from_slice(&height.to_be_bytes());
    key
}

impl<S: KvStore> ClientStore<S> {
    /// Wraps a host store
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }

    /// The underlying host store
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// The underlying host store, for writes outside of the client core
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Returns true if a client is stored under `client_id`
    pub fn contains_client(&self, client_id: &ClientId) -> bool {
        self.inner
            .get(&Path::ClientState(client_id.clone()).into_bytes())
            .is_some()
    }

    /// Encoded client state, as committed to by the host
    pub fn client_state_bytes(&self, client_id: &ClientId) -> Option<Vec<u8>> {
        self.inner
            .get(&Path::ClientState(client_id.clone()).into_bytes())
    }

    /// Loads the client state of `client_id`
    /// # Errors
    /// Returns [`ClientError::ClientNotFound`] if there is none, or a decode error
    pub fn client_state(&self, client_id: &ClientId) -> Result<AnyClientState, ClientError> {
        let bytes = self
            .client_state_bytes(client_id)
            .ok_or_else(|| ClientError::ClientNotFound(client_id.clone()))?;
        codec::decode_from_bytes(&bytes)
    }

    /// Stores the client state of `client_id`
    /// # Errors
    /// Returns an error if the state cannot be encoded
    pub fn set_client_state(
        &mut self,
        client_id: &ClientId,
        client_state: &AnyClientState,
    ) -> Result<(), ClientError> {
        let bytes = codec::encode_to_bytes(client_state)?;
        self.inner
            .set(Path::ClientState(client_id.clone()).into_bytes(), bytes);
        Ok(())
    }

    /// Encoded consensus state, as committed to by the host
    pub fn consensus_state_bytes(&self, client_id: &ClientId, height: Height) -> Option<Vec<u8>> {
        self.inner.get(&consensus_state_key(client_id, height))
    }

    /// Loads the consensus state of `client_id` at `height`, if any
    /// # Errors
    /// Returns an error if the stored state cannot be decoded
    pub fn consensus_state(
        &self,
        client_id: &ClientId,
        height: Height,
    ) -> Result<Option<AnyConsensusState>, ClientError> {
        self.consensus_state_bytes(client_id, height)
            .map(|bytes| codec::decode_from_bytes(&bytes))
            .transpose()
    }

    /// Stores the consensus state of `client_id` at `height`
    /// # Errors
    /// Returns an error if the state cannot be encoded
    pub fn set_consensus_state(
        &mut self,
        client_id: &ClientId,
        height: Height,
        consensus_state: &AnyConsensusState,
    ) -> Result<(), ClientError> {
        let bytes = codec::encode_to_bytes(consensus_state)?;
        self.inner.set(consensus_state_key(client_id, height), bytes);
        Ok(())
    }

    /// All consensus states of `client_id`, in height order
    /// # Errors
    /// Returns an error if a stored key or state cannot be decoded
    pub fn consensus_states(
        &self,
        client_id: &ClientId,
    ) -> Result<Vec<(Height, AnyConsensusState)>, ClientError> {
        let prefix = consensus_state_prefix(client_id);
        self.inner
            .prefix_iter(&prefix)
            .map(|(key, value)| {
                let height = Height::from_be_bytes(&key[prefix.len()..]).ok_or_else(|| {
                    ClientError::Decode {
                        type_url: "consensus state key".to_string(),
                        reason: "key does not end with an encoded height".to_string(),
                    }
                })?;
                Ok((height, codec::decode_from_bytes(&value)?))
            })
            .collect()
    }

    /// Identifiers of all stored clients, in key order.
    ///
    /// Only keys of the exact form `clients/{client_id}/clientState` with a single path
    /// segment in between are considered; anything else under `clients/` is skipped.
    /// # Errors
    /// Returns an error if a stored key holds a malformed identifier
    pub fn client_ids(&self) -> Result<Vec<ClientId>, ClientError> {
        self.inner
            .prefix_iter(CLIENTS_PREFIX.as_bytes())
            .filter_map(|(key, _)| {
                let key = String::from_utf8(key).ok()?;
                let client_id = key
                    .strip_prefix(CLIENTS_PREFIX)?
                    .strip_suffix(CLIENT_STATE_SUFFIX)?;
                if client_id.is_empty() || client_id.contains('/') {
                    return None;
                }
                Some(client_id.parse().map_err(ClientError::from))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_iter_is_ordered_and_bounded() {
        let mut store = MemoryStore::default();
        store.set(b"b/2".to_vec(), vec![2]);
        store.set(b"a/1".to_vec(), vec![1]);
        store.set(b"b/1".to_vec(), vec![1]);
        store.set(b"c".to_vec(), vec![3]);

        let keys: Vec<_> = store.prefix_iter(b"b/").map(|(key, _)| key).collect();
        assert_eq!(keys, vec![b"b/1".to_vec(), b"b/2".to_vec()]);
        assert_eq!(store.get(b"c"), Some(vec![3]));
        assert_eq!(store.get(b"d"), None);
    }

    #[test]
    fn consensus_keys_sort_by_height() {
        let client_id: ClientId = "07-tendermint-0".parse().unwrap();
        let low = consensus_state_key(&client_id, Height::new(0, u64::MAX));
        let high = consensus_state_key(&client_id, Height::new(1, 1));
        assert!(low < high);
        assert!(low.starts_with(&consensus_state_prefix(&client_id)));
    }

    #[test]
    fn consensus_keys_stay_out_of_the_clients_namespace() {
        let client_id: ClientId = "07-tendermint-0".parse().unwrap();
        // a height whose big-endian bytes spell "/clientState"
        let forged = Height::new(
            u64::from_be_bytes(*b"\0\0\0\0/cli"),
            u64::from_be_bytes(*b"entState"),
        );
        let key = consensus_state_key(&client_id, forged);
        assert!(key.ends_with(CLIENT_STATE_SUFFIX.as_bytes()));
        assert!(!key.starts_with(CLIENTS_PREFIX.as_bytes()));
    }

    #[test]
    fn client_ids_skip_keys_with_nested_segments() {
        let mut store = ClientStore::new(MemoryStore::default());
        store
            .inner_mut()
            .set(b"clients/07-tendermint-0/extra/clientState".to_vec(), vec![1]);
        store
            .inner_mut()
            .set(b"clients/07-tendermint-1/clientState".to_vec(), vec![1]);

        assert_eq!(
            store.client_ids().unwrap(),
            vec!["07-tendermint-1".parse::<ClientId>().unwrap()]
        );
    }
}
