//! Proof verification against the consensus states recorded for a client.
//!
//! Every operation derives the ICS-24 path of the fact it proves and runs one of two
//! primitives, [`verify_membership`] or [`verify_non_membership`]. Both load the client,
//! reject frozen clients, check the proof against the client's proof specs, and only then
//! look up the consensus state at the requested height and evaluate the proof against its
//! root.

use ibc_client_types::{
    commitment::{CommitmentPrefix, CommitmentProofBytes, MerkleProof},
    identifier::{ChannelId, ClientId, ConnectionId, PortId},
    path::Path,
    specs::ProofSpecs,
    Height,
};
use localhost_light_client::{error::LocalhostClientError, membership as localhost};
use sha2::{Digest, Sha256};

use crate::{
    client_state::{AnyClientState, AnyConsensusState},
    codec,
    error::ClientError,
    store::{ClientStore, KvStore},
};

/// How a client authenticates a fact
enum Verifier {
    /// Merkle proof checked against the consensus root
    Merkle {
        proof: MerkleProof,
        specs: ProofSpecs,
    },
    /// Direct read of the host store
    HostStore,
}

fn load_verifier<S: KvStore>(
    store: &ClientStore<S>,
    client_id: &ClientId,
    proof: &CommitmentProofBytes,
) -> Result<Verifier, ClientError> {
    let client_state = store.client_state(client_id)?;
    client_state.ensure_active()?;

    let merkle = |specs: ProofSpecs| -> Result<Verifier, ClientError> {
        let proof = MerkleProof::try_from(proof)?;
        specs.check_proof(&proof)?;
        Ok(Verifier::Merkle { proof, specs })
    };

    match client_state {
        AnyClientState::SoloMachine(state) => merkle(state.proof_specs),
        AnyClientState::Tendermint(state) => merkle(state.proof_specs),
        AnyClientState::Localhost(_) => {
            if !proof.is_empty() {
                return Err(LocalhostClientError::UnexpectedProof.into());
            }
            Ok(Verifier::HostStore)
        }
    }
}

fn consensus_state_at<S: KvStore>(
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

/// Value the host stores under `path`. Consensus states are kept under height-ordered keys
/// rather than their ICS-24 path.
fn host_value<S: KvStore>(store: &ClientStore<S>, path: Path) -> Option<Vec<u8>> {
    match path {
        Path::ClientConsensusState(client_id, height) => {
            store.consensus_state_bytes(&client_id, height)
        }
        path => store.inner().get(&path.into_bytes()),
    }
}

/// Verifies that `value` is committed under `path` at `height` of the client's chain
/// # Errors
/// Returns [`ClientError::ClientNotFound`], [`ClientError::ClientFrozen`],
/// [`ClientError::ProofSpecMismatch`], [`ClientError::ConsensusStateNotFound`] or
/// [`ClientError::ProofVerificationFailed`], in the order the checks run
pub fn verify_membership<S: KvStore>(
    store: &ClientStore<S>,
    client_id: &ClientId,
    height: Height,
    prefix: &CommitmentPrefix,
    proof: &CommitmentProofBytes,
    path: Path,
    value: &[u8],
) -> Result<(), ClientError> {
    let verifier = load_verifier(store, client_id, proof)?;
    let consensus_state = consensus_state_at(store, client_id, height)?;

    match verifier {
        Verifier::Merkle { proof, specs } => proof.verify_membership(
            &specs,
            consensus_state.root(),
            &prefix.apply_prefix(path.into_bytes()),
            value,
        )?,
        Verifier::HostStore => localhost::verify_membership(
            &CommitmentProofBytes::empty(),
            host_value(store, path).as_deref(),
            value,
        )?,
    }
    Ok(())
}

/// Verifies that nothing is committed under `path` at `height` of the client's chain
/// # Errors
/// Same as [`verify_membership`]
pub fn verify_non_membership<S: KvStore>(
    store: &ClientStore<S>,
    client_id: &ClientId,
    height: Height,
    prefix: &CommitmentPrefix,
    proof: &CommitmentProofBytes,
    path: Path,
) -> Result<(), ClientError> {
    let verifier = load_verifier(store, client_id, proof)?;
    let consensus_state = consensus_state_at(store, client_id, height)?;

    match verifier {
        Verifier::Merkle { proof, specs } => proof.verify_non_membership(
            &specs,
            consensus_state.root(),
            &prefix.apply_prefix(path.into_bytes()),
        )?,
        Verifier::HostStore => localhost::verify_non_membership(
            &CommitmentProofBytes::empty(),
            host_value(store, path).as_deref(),
        )?,
    }
    Ok(())
}

/// Verifies the state the counterparty stores for its client `counterparty_client_id`
/// # Errors
/// See [`verify_membership`]
pub fn verify_client_state<S: KvStore>(
    store: &ClientStore<S>,
    client_id: &ClientId,
    height: Height,
    prefix: &CommitmentPrefix,
    proof: &CommitmentProofBytes,
    counterparty_client_id: &ClientId,
    expected: &AnyClientState,
) -> Result<(), ClientError> {
    let value = codec::encode_to_bytes(expected)?;
    verify_membership(
        store,
        client_id,
        height,
        prefix,
        proof,
        Path::ClientState(counterparty_client_id.clone()),
        &value,
    )
}

/// Verifies the consensus state the counterparty stores for its client
/// `counterparty_client_id` at `consensus_height`
/// # Errors
/// See [`verify_membership`]
#[allow(clippy::too_many_arguments)]
pub fn verify_client_consensus_state<S: KvStore>(
    store: &ClientStore<S>,
    client_id: &ClientId,
    height: Height,
    prefix: &CommitmentPrefix,
    proof: &CommitmentProofBytes,
    counterparty_client_id: &ClientId,
    consensus_height: Height,
    expected: &AnyConsensusState,
) -> Result<(), ClientError> {
    let value = codec::encode_to_bytes(expected)?;
    verify_membership(
        store,
        client_id,
        height,
        prefix,
        proof,
        Path::ClientConsensusState(counterparty_client_id.clone(), consensus_height),
        &value,
    )
}

/// Verifies a connection end, given as its committed bytes
/// # Errors
/// See [`verify_membership`]
pub fn verify_connection_state<S: KvStore>(
    store: &ClientStore<S>,
    client_id: &ClientId,
    height: Height,
    prefix: &CommitmentPrefix,
    proof: &CommitmentProofBytes,
    connection_id: &ConnectionId,
    connection_end: &[u8],
) -> Result<(), ClientError> {
    verify_membership(
        store,
        client_id,
        height,
        prefix,
        proof,
        Path::Connection(connection_id.clone()),
        connection_end,
    )
}

/// Verifies a channel end, given as its committed bytes
/// # Errors
/// See [`verify_membership`]
#[allow(clippy::too_many_arguments)]
pub fn verify_channel_state<S: KvStore>(
    store: &ClientStore<S>,
    client_id: &ClientId,
    height: Height,
    prefix: &CommitmentPrefix,
    proof: &CommitmentProofBytes,
    port_id: &PortId,
    channel_id: &ChannelId,
    channel_end: &[u8],
) -> Result<(), ClientError> {
    verify_membership(
        store,
        client_id,
        height,
        prefix,
        proof,
        Path::ChannelEnd(port_id.clone(), channel_id.clone()),
        channel_end,
    )
}

/// Verifies the commitment of the packet sent with `sequence`
/// # Errors
/// See [`verify_membership`]
#[allow(clippy::too_many_arguments)]
pub fn verify_packet_commitment<S: KvStore>(
    store: &ClientStore<S>,
    client_id: &ClientId,
    height: Height,
    prefix: &CommitmentPrefix,
    proof: &CommitmentProofBytes,
    port_id: &PortId,
    channel_id: &ChannelId,
    sequence: u64,
    commitment: &[u8],
) -> Result<(), ClientError> {
    verify_membership(
        store,
        client_id,
        height,
        prefix,
        proof,
        Path::PacketCommitment(port_id.clone(), channel_id.clone(), sequence),
        commitment,
    )
}

/// Verifies the acknowledgement of the packet received with `sequence`. The chain commits
/// to the sha256 hash of the acknowledgement.
/// # Errors
/// See [`verify_membership`]
#[allow(clippy::too_many_arguments)]
pub fn verify_packet_acknowledgement<S: KvStore>(
    store: &ClientStore<S>,
    client_id: &ClientId,
    height: Height,
    prefix: &CommitmentPrefix,
    proof: &CommitmentProofBytes,
    port_id: &PortId,
    channel_id: &ChannelId,
    sequence: u64,
    acknowledgement: &[u8],
) -> Result<(), ClientError> {
    let commitment = Sha256::digest(acknowledgement);
    verify_membership(
        store,
        client_id,
        height,
        prefix,
        proof,
        Path::PacketAcknowledgement(port_id.clone(), channel_id.clone(), sequence),
        &commitment,
    )
}

/// Verifies that no acknowledgement is written for the packet with `sequence`
/// # Errors
/// See [`verify_non_membership`]
#[allow(clippy::too_many_arguments)]
pub fn verify_packet_acknowledgement_absence<S: KvStore>(
    store: &ClientStore<S>,
    client_id: &ClientId,
    height: Height,
    prefix: &CommitmentPrefix,
    proof: &CommitmentProofBytes,
    port_id: &PortId,
    channel_id: &ChannelId,
    sequence: u64,
) -> Result<(), ClientError> {
    verify_non_membership(
        store,
        client_id,
        height,
        prefix,
        proof,
        Path::PacketAcknowledgement(port_id.clone(), channel_id.clone(), sequence),
    )
}

/// Verifies the next sequence the channel expects to receive, committed big-endian
/// # Errors
/// See [`verify_membership`]
#[allow(clippy::too_many_arguments)]
pub fn verify_next_sequence_recv<S: KvStore>(
    store: &ClientStore<S>,
    client_id: &ClientId,
    height: Height,
    prefix: &CommitmentPrefix,
    proof: &CommitmentProofBytes,
    port_id: &PortId,
    channel_id: &ChannelId,
    next_sequence_recv: u64,
) -> Result<(), ClientError> {
    verify_membership(
        store,
        client_id,
        height,
        prefix,
        proof,
        Path::NextSequenceRecv(port_id.clone(), channel_id.clone()),
        &next_sequence_recv.to_be_bytes(),
    )
}
