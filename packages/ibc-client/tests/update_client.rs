//! Integration tests for client creation and header updates

mod helpers;

use helpers::*;
use ibc_client::{
    events::ClientEvent,
    handler::{dispatch, ClientResult},
    msgs::{ClientMsg, MsgCreateClient},
    query,
    store::{ClientStore, MemoryStore},
    AnyClientState, AnyConsensusState, AnyHeader, ClientError,
};
use ibc_client_types::{commitment::CommitmentRoot, identifier::ClientId, Height};
use localhost_light_client as localhost;
use solo_machine_light_client::test_utils as solo;
use tendermint_light_client::test_utils as tm;

#[test]
fn test_create_client_persists_states() {
    let store = tendermint_store();
    let id = client_id(TENDERMINT_CLIENT_ID);

    assert_eq!(query::client_state(&store, &id).unwrap(), tendermint_client_state());
    assert_eq!(
        query::consensus_state(&store, &id, LATEST).unwrap(),
        tendermint_consensus_state()
    );
    assert_eq!(query::consensus_state_heights(&store, &id).unwrap(), vec![LATEST]);
}

#[test]
fn test_create_client_rejects_duplicates_and_mismatches() {
    let mut store = tendermint_store();
    let host = MockHost::default();

    let duplicate = ClientMsg::CreateClient(MsgCreateClient {
        client_id: client_id(TENDERMINT_CLIENT_ID),
        client_state: tendermint_client_state(),
        consensus_state: tendermint_consensus_state(),
        signer: SIGNER.to_string(),
    });
    assert_eq!(
        dispatch(&host, &mut store, duplicate),
        Err(ClientError::ClientAlreadyExists(client_id(TENDERMINT_CLIENT_ID)))
    );

    let mismatched = ClientMsg::CreateClient(MsgCreateClient {
        client_id: client_id("07-tendermint-1"),
        client_state: tendermint_client_state(),
        consensus_state: AnyConsensusState::SoloMachine(solo::consensus_state(1)),
        signer: SIGNER.to_string(),
    });
    assert!(matches!(
        dispatch(&host, &mut store, mismatched),
        Err(ClientError::InvalidConsensusState { .. })
    ));

    let mut frozen = tm::client_state(LATEST);
    frozen.frozen_height = Height::new(0, 1);
    let frozen = ClientMsg::CreateClient(MsgCreateClient {
        client_id: client_id("07-tendermint-2"),
        client_state: AnyClientState::Tendermint(frozen),
        consensus_state: tendermint_consensus_state(),
        signer: SIGNER.to_string(),
    });
    assert!(matches!(
        dispatch(&host, &mut store, frozen),
        Err(ClientError::ClientFrozen { .. })
    ));

    assert!(!store.contains_client(&client_id("07-tendermint-1")));
    assert!(!store.contains_client(&client_id("07-tendermint-2")));
}

#[test]
fn test_update_client_advances_latest_height() {
    let mut store = tendermint_store();
    let id = client_id(TENDERMINT_CLIENT_ID);

    let output = dispatch(
        &MockHost::default(),
        &mut store,
        update_msg(TENDERMINT_CLIENT_ID, tendermint_header(101)),
    )
    .unwrap();

    let ClientResult::Update(result) = output.result else {
        panic!("expected an update result");
    };
    assert!(!result.redundant);
    assert!(matches!(
        output.events.as_slice(),
        [ClientEvent::UpdateClient(attributes)] if attributes.height == Height::new(0, 101)
    ));

    let client_state = store.client_state(&id).unwrap();
    assert_eq!(client_state.latest_height(), Height::new(0, 101));
    assert!(!client_state.is_frozen());
    assert_eq!(
        query::consensus_state(&store, &id, Height::new(0, 101)).unwrap(),
        tendermint_header(101).consensus_state()
    );
}

#[test]
fn test_update_client_skipping_heights() {
    let mut store = tendermint_store();
    let host = MockHost::default();

    dispatch(&host, &mut store, update_msg(TENDERMINT_CLIENT_ID, tendermint_header(150))).unwrap();
    assert_eq!(
        query::consensus_state_heights(&store, &client_id(TENDERMINT_CLIENT_ID)).unwrap(),
        vec![LATEST, Height::new(0, 150)]
    );
}

#[test]
fn test_update_client_rejects_stale_header() {
    let mut store = tendermint_store();
    let header = AnyHeader::Tendermint(tm::header(
        Height::new(0, 40),
        Height::new(0, 50),
        tm::TRUSTED_TIME,
    ));

    assert!(matches!(
        dispatch(&MockHost::default(), &mut store, update_msg(TENDERMINT_CLIENT_ID, header)),
        Err(ClientError::InvalidHeader { .. })
    ));
}

#[test]
fn test_update_client_resubmission_is_noop() {
    let mut store = tendermint_store();
    let host = MockHost::default();
    dispatch(&host, &mut store, update_msg(TENDERMINT_CLIENT_ID, tendermint_header(101))).unwrap();
    let before = store.clone();

    let output = dispatch(
        &host,
        &mut store,
        update_msg(TENDERMINT_CLIENT_ID, tendermint_header(101)),
    )
    .unwrap();

    let ClientResult::Update(result) = output.result else {
        panic!("expected an update result");
    };
    assert!(result.redundant);
    assert_eq!(store.inner(), before.inner());
}

#[test]
fn test_update_client_rejects_divergent_header() {
    let mut store = tendermint_store();
    let host = MockHost::default();
    dispatch(&host, &mut store, update_msg(TENDERMINT_CLIENT_ID, tendermint_header(101))).unwrap();
    let before = store.clone();

    let divergent = AnyHeader::Tendermint(tm::header_with_root(
        LATEST,
        Height::new(0, 101),
        tm::TRUSTED_TIME + 1_000_000_000,
        &[0xee; 32],
    ));
    assert!(matches!(
        dispatch(&host, &mut store, update_msg(TENDERMINT_CLIENT_ID, divergent)),
        Err(ClientError::InvalidHeader { .. })
    ));
    assert_eq!(store.inner(), before.inner());
}

#[test]
fn test_update_client_never_overwrites_a_recorded_consensus_state() {
    let mut store = tendermint_store();
    let id = client_id(TENDERMINT_CLIENT_ID);
    let height = Height::new(0, 101);
    let time = tm::TRUSTED_TIME + 1_000_000_000;

    // entry above the latest height, left by an earlier state of the store
    let recorded = AnyHeader::Tendermint(tm::header_with_root(LATEST, height, time, &[0xaa; 32]))
        .consensus_state();
    store.set_consensus_state(&id, height, &recorded).unwrap();
    let before = store.clone();

    let header = AnyHeader::Tendermint(tm::header_with_root(LATEST, height, time, &[0xbb; 32]));
    assert!(matches!(
        dispatch(&MockHost::default(), &mut store, update_msg(TENDERMINT_CLIENT_ID, header)),
        Err(ClientError::InvalidHeader { .. })
    ));
    assert_eq!(store.inner(), before.inner());
    assert_eq!(query::consensus_state(&store, &id, height).unwrap(), recorded);
    assert_eq!(store.client_state(&id).unwrap().latest_height(), LATEST);
}

#[test]
fn test_update_client_rejects_insufficient_signatures() {
    let mut store = tendermint_store();
    let mut header = tm::header(LATEST, Height::new(0, 101), tm::TRUSTED_TIME + 1);
    tm::withhold_signatures(&mut header, 2);

    assert!(matches!(
        dispatch(
            &MockHost::default(),
            &mut store,
            update_msg(TENDERMINT_CLIENT_ID, AnyHeader::Tendermint(header))
        ),
        Err(ClientError::InvalidHeader { .. })
    ));
    assert_eq!(
        store.client_state(&client_id(TENDERMINT_CLIENT_ID)).unwrap().latest_height(),
        LATEST
    );
}

#[test]
fn test_update_client_rejects_expired_trust() {
    let mut store = tendermint_store();
    let host = MockHost {
        timestamp: tm::TRUSTED_TIME + (tm::TRUSTING_PERIOD + 1) * 1_000_000_000,
        ..MockHost::default()
    };

    assert!(matches!(
        dispatch(&host, &mut store, update_msg(TENDERMINT_CLIENT_ID, tendermint_header(101))),
        Err(ClientError::InvalidHeader { .. })
    ));
}

#[test]
fn test_update_client_rejects_wrong_header_type() {
    let mut store = tendermint_store();
    let client_state = solo::client_state(LATEST);
    let header = AnyHeader::SoloMachine(solo::signed_header(
        &client_state,
        Height::new(0, 101),
        SOLO_MACHINE_TIME,
        None,
    ));

    assert!(matches!(
        dispatch(&MockHost::default(), &mut store, update_msg(TENDERMINT_CLIENT_ID, header)),
        Err(ClientError::InvalidHeader { .. })
    ));
}

#[test]
fn test_update_unknown_client() {
    let mut store = ClientStore::<MemoryStore>::default();
    assert_eq!(
        dispatch(
            &MockHost::default(),
            &mut store,
            update_msg(TENDERMINT_CLIENT_ID, tendermint_header(101))
        ),
        Err(ClientError::ClientNotFound(client_id(TENDERMINT_CLIENT_ID)))
    );
}

#[test]
fn test_solo_machine_update_rotates_key() {
    let mut store = solo_machine_store();
    let id = client_id(SOLO_MACHINE_CLIENT_ID);
    let host = MockHost::default();
    let new_key = solo::SECOND_KEY.verifying_key().to_bytes();

    let header = solo::signed_header(
        &solo::client_state(LATEST),
        Height::new(0, 101),
        SOLO_MACHINE_TIME + 1,
        Some(new_key),
    );
    dispatch(&host, &mut store, update_msg(SOLO_MACHINE_CLIENT_ID, AnyHeader::SoloMachine(header)))
        .unwrap();

    let AnyClientState::SoloMachine(client_state) = store.client_state(&id).unwrap() else {
        panic!("expected a solo machine client");
    };
    assert_eq!(client_state.public_key, new_key);
    assert_eq!(client_state.latest_height, Height::new(0, 101));

    let next = solo::signed_header(&client_state, Height::new(0, 102), SOLO_MACHINE_TIME + 2, None);
    dispatch(&host, &mut store, update_msg(SOLO_MACHINE_CLIENT_ID, AnyHeader::SoloMachine(next)))
        .unwrap();
    assert_eq!(store.client_state(&id).unwrap().latest_height(), Height::new(0, 102));
}

#[test]
fn test_solo_machine_rejects_gaps_and_old_keys() {
    let mut store = solo_machine_store();
    let host = MockHost::default();
    let client_state = solo::client_state(LATEST);

    let gap = solo::signed_header(&client_state, Height::new(0, 102), SOLO_MACHINE_TIME, None);
    assert!(matches!(
        dispatch(&host, &mut store, update_msg(SOLO_MACHINE_CLIENT_ID, AnyHeader::SoloMachine(gap))),
        Err(ClientError::InvalidHeader { .. })
    ));

    let mut rotated = client_state.clone();
    rotated.public_key = solo::SECOND_KEY.verifying_key().to_bytes();
    let wrong_key = solo::signed_header(&rotated, Height::new(0, 101), SOLO_MACHINE_TIME, None);
    assert!(matches!(
        dispatch(
            &host,
            &mut store,
            update_msg(SOLO_MACHINE_CLIENT_ID, AnyHeader::SoloMachine(wrong_key))
        ),
        Err(ClientError::InvalidHeader { .. })
    ));
}

#[test]
fn test_localhost_follows_the_host() {
    let mut host = MockHost::default();
    let mut store = ClientStore::<MemoryStore>::default();
    let id = ClientId::localhost();
    create(
        &mut store,
        "localhost",
        AnyClientState::Localhost(localhost::ClientState {
            chain_id: host.chain_id.clone(),
            latest_height: host.height,
        }),
        AnyConsensusState::Localhost(localhost::ConsensusState {
            root: host.root.clone(),
            timestamp: host.timestamp,
        }),
    );

    host.next_block();
    let header = AnyHeader::Localhost(localhost::Header {
        height: host.height,
        timestamp: host.timestamp,
        root: host.root.clone(),
    });
    dispatch(&host, &mut store, update_msg("localhost", header)).unwrap();
    assert_eq!(store.client_state(&id).unwrap().latest_height(), host.height);

    host.next_block();
    let forged = AnyHeader::Localhost(localhost::Header {
        height: host.height,
        timestamp: host.timestamp,
        root: CommitmentRoot::from_bytes(&[0xee; 32]),
    });
    assert!(matches!(
        dispatch(&host, &mut store, update_msg("localhost", forged)),
        Err(ClientError::InvalidHeader { .. })
    ));
}
