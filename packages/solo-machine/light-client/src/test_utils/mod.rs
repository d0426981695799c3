//! Test utilities for the solo machine light client

#[cfg(any(test, feature = "test-utils"))]
pub use fixtures::*;

#[allow(missing_docs, clippy::missing_panics_doc)]
#[cfg(any(test, feature = "test-utils"))]
mod fixtures {
    use std::sync::LazyLock;

    use ed25519_dalek::{Signer, SigningKey};
    use ibc_client_types::{
        commitment::CommitmentRoot, test_utils::simple_proof_specs, Height,
    };
    use prost::Message;

    use crate::{
        client_state::ClientState,
        consensus_state::ConsensusState,
        header::Header,
        misbehaviour::SignatureAndData,
        sign_bytes::SignBytes,
    };

    pub const CHAIN_ID: &str = "solo-machine-1";

    pub static FIRST_KEY: LazyLock<SigningKey> = LazyLock::new(|| SigningKey::from_bytes(&[0xcd; 32]));
    pub static SECOND_KEY: LazyLock<SigningKey> = LazyLock::new(|| SigningKey::from_bytes(&[0x02; 32]));

    /// Signing key matching the client state's current public key
    #[must_use]
    pub fn key_of(client_state: &ClientState) -> &'static SigningKey {
        [&*FIRST_KEY, &*SECOND_KEY]
            .into_iter()
            .find(|key| key.verifying_key().to_bytes() == client_state.public_key)
            .expect("client state uses a fixture key")
    }

    #[must_use]
    pub fn client_state(latest_height: Height) -> ClientState {
        ClientState {
            chain_id: CHAIN_ID.to_string(),
            public_key: FIRST_KEY.verifying_key().to_bytes(),
            latest_height,
            frozen_height: Height::zero(),
            proof_specs: simple_proof_specs(),
        }
    }

    #[must_use]
    pub fn consensus_state(timestamp: u64) -> ConsensusState {
        ConsensusState {
            root: CommitmentRoot::from_bytes(&[0x11; 32]),
            timestamp,
        }
    }

    /// Header signed by the client's current key with a root derived from the height
    #[must_use]
    pub fn signed_header(
        client_state: &ClientState,
        height: Height,
        timestamp: u64,
        new_public_key: Option<[u8; 32]>,
    ) -> Header {
        #[allow(clippy::cast_possible_truncation)]
        let root = CommitmentRoot::from_bytes(&[height.epoch_height as u8; 32]);
        signed_header_with_root(client_state, height, timestamp, root, new_public_key)
    }

    #[must_use]
    pub fn signed_header_with_root(
        client_state: &ClientState,
        height: Height,
        timestamp: u64,
        root: CommitmentRoot,
        new_public_key: Option<[u8; 32]>,
    ) -> Header {
        let mut header = Header {
            height,
            timestamp,
            root,
            new_public_key,
            signature: [0; 64],
        };
        header.signature = key_of(client_state)
            .sign(&header.sign_bytes(&client_state.chain_id))
            .to_bytes();
        header
    }

    #[must_use]
    pub fn signature_and_data(
        client_state: &ClientState,
        height: Height,
        data: &[u8],
    ) -> SignatureAndData {
        let sign_bytes =
            SignBytes::new(&client_state.chain_id, height, data.to_vec()).encode_to_vec();
        SignatureAndData {
            data: data.to_vec(),
            signature: key_of(client_state).sign(&sign_bytes).to_bytes(),
        }
    }
}
