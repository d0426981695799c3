//! Common test utilities: a mock host and stores pre-populated with clients

#![allow(dead_code)]

use ibc_client::{
    context::HostContext,
    handler::dispatch,
    msgs::{ClientMsg, MsgCreateClient, MsgUpdateClient},
    store::{ClientStore, MemoryStore},
    AnyClientState, AnyConsensusState, AnyHeader,
};
use ibc_client_types::{commitment::CommitmentRoot, identifier::ClientId, Height};
use solo_machine_light_client::test_utils as solo;
use tendermint_light_client::test_utils as tm;

pub const TENDERMINT_CLIENT_ID: &str = "07-tendermint-0";
pub const SOLO_MACHINE_CLIENT_ID: &str = "06-solomachine-0";
pub const SIGNER: &str = "relayer";

/// Initial latest height of the fixture clients
pub const LATEST: Height = Height::new(0, 100);

pub const SOLO_MACHINE_TIME: u64 = 1_000;

/// Host whose parameters tests set directly
#[derive(Clone, Debug)]
pub struct MockHost {
    pub chain_id: String,
    pub height: Height,
    pub timestamp: u64,
    pub root: CommitmentRoot,
}

impl Default for MockHost {
    fn default() -> Self {
        Self {
            chain_id: "host-1".to_string(),
            height: Height::new(0, 10),
            timestamp: tm::NOW,
            root: CommitmentRoot::from_bytes(&[0x42; 32]),
        }
    }
}

impl MockHost {
    /// Advances the host by one block
    pub fn next_block(&mut self) {
        self.height = self.height.increment().unwrap();
        self.timestamp += 1_000;
        self.root = CommitmentRoot::from_bytes(&self.timestamp.to_be_bytes());
    }
}

impl HostContext for MockHost {
    fn host_chain_id(&self) -> String {
        self.chain_id.clone()
    }

    fn host_height(&self) -> Height {
        self.height
    }

    fn host_timestamp(&self) -> u64 {
        self.timestamp
    }

    fn host_commitment_root(&self) -> CommitmentRoot {
        self.root.clone()
    }
}

pub fn client_id(id: &str) -> ClientId {
    id.parse().unwrap()
}

pub fn tendermint_client_state() -> AnyClientState {
    AnyClientState::Tendermint(tm::client_state(LATEST))
}

pub fn tendermint_consensus_state() -> AnyConsensusState {
    let validators = tm::validator_set(&tm::validators());
    AnyConsensusState::Tendermint(tm::consensus_state(tm::TRUSTED_TIME, &validators))
}

pub fn solo_machine_client_state() -> AnyClientState {
    AnyClientState::SoloMachine(solo::client_state(LATEST))
}

pub fn create(
    store: &mut ClientStore<MemoryStore>,
    id: &str,
    client_state: AnyClientState,
    consensus_state: AnyConsensusState,
) {
    let msg = ClientMsg::CreateClient(MsgCreateClient {
        client_id: client_id(id),
        client_state,
        consensus_state,
        signer: SIGNER.to_string(),
    });
    dispatch(&MockHost::default(), store, msg).unwrap();
}

/// Store holding a tendermint client at [`LATEST`]
pub fn tendermint_store() -> ClientStore<MemoryStore> {
    let mut store = ClientStore::default();
    create(
        &mut store,
        TENDERMINT_CLIENT_ID,
        tendermint_client_state(),
        tendermint_consensus_state(),
    );
    store
}

/// Store holding a solo machine client at [`LATEST`]
pub fn solo_machine_store() -> ClientStore<MemoryStore> {
    let mut store = ClientStore::default();
    create(
        &mut store,
        SOLO_MACHINE_CLIENT_ID,
        solo_machine_client_state(),
        AnyConsensusState::SoloMachine(solo::consensus_state(SOLO_MACHINE_TIME)),
    );
    store
}

/// Tendermint header trusting [`LATEST`], one second after the trusted time per block
pub fn tendermint_header(epoch_height: u64) -> AnyHeader {
    AnyHeader::Tendermint(tm::header(
        LATEST,
        Height::new(0, epoch_height),
        tm::TRUSTED_TIME + (epoch_height - LATEST.epoch_height) * 1_000_000_000,
    ))
}

pub fn update_msg(id: &str, header: AnyHeader) -> ClientMsg {
    ClientMsg::UpdateClient(MsgUpdateClient {
        client_id: client_id(id),
        header,
        signer: SIGNER.to_string(),
    })
}
