//! Test utilities for the tendermint light client

#[cfg(any(test, feature = "test-utils"))]
pub use fixtures::*;

#[allow(missing_docs, clippy::missing_panics_doc)]
#[cfg(any(test, feature = "test-utils"))]
mod fixtures {
    use ibc_client_types::{commitment::CommitmentRoot, test_utils::simple_proof_specs, Height};
    use tendermint::{block::CommitSig, validator::Set as ValidatorSet, AppHash};
    use tendermint_testgen::{Generator, Header as TestgenHeader, LightBlock, Validator};

    use crate::{
        client_state::{ClientState, NANOS_PER_SECOND},
        consensus_state::ConsensusState,
        header::{time_from_unix_nanos, Header},
        trust_threshold::TrustThreshold,
    };

    pub const CHAIN_ID: &str = "testchain-1";
    pub const VOTING_POWER: u64 = 10;
    pub const TRUSTING_PERIOD: u64 = 14 * 24 * 60 * 60;
    pub const MAX_CLOCK_DRIFT: u64 = 10;

    /// Block time of the trusted consensus state, in nanoseconds
    pub const TRUSTED_TIME: u64 = 1_700_000_000 * NANOS_PER_SECOND;
    /// Host time, one hour after [`TRUSTED_TIME`]
    pub const NOW: u64 = TRUSTED_TIME + 3_600 * NANOS_PER_SECOND;

    /// Four validators of equal power
    #[must_use]
    pub fn validators() -> Vec<Validator> {
        ["1", "2", "3", "4"]
            .into_iter()
            .map(|id| Validator::new(id).voting_power(VOTING_POWER))
            .collect()
    }

    #[must_use]
    pub fn validator_set(validators: &[Validator]) -> ValidatorSet {
        ValidatorSet::without_proposer(
            validators
                .iter()
                .map(|validator| validator.generate().unwrap())
                .collect(),
        )
    }

    #[must_use]
    pub fn client_state(latest_height: Height) -> ClientState {
        ClientState {
            chain_id: CHAIN_ID.to_string(),
            trust_level: TrustThreshold::ONE_THIRD,
            trusting_period: TRUSTING_PERIOD,
            max_clock_drift: MAX_CLOCK_DRIFT,
            latest_height,
            frozen_height: Height::zero(),
            proof_specs: simple_proof_specs(),
        }
    }

    #[must_use]
    pub fn consensus_state(timestamp: u64, next_validators: &ValidatorSet) -> ConsensusState {
        ConsensusState {
            root: CommitmentRoot::from_bytes(&[0x11; 32]),
            timestamp,
            next_validators_hash: next_validators.hash(),
        }
    }

    /// Header signed by all fixture validators, with a root derived from the height
    #[must_use]
    pub fn header(trusted_height: Height, height: Height, timestamp: u64) -> Header {
        #[allow(clippy::cast_possible_truncation)]
        let root = [height.epoch_height as u8; 32];
        header_with_root(trusted_height, height, timestamp, &root)
    }

    #[must_use]
    pub fn header_with_root(
        trusted_height: Height,
        height: Height,
        timestamp: u64,
        root: &[u8],
    ) -> Header {
        let all = validators();
        build(trusted_height, height, timestamp, root, &all, &all)
    }

    /// Header of a block produced and signed by `signers`, claiming trust in `trusted_next`
    #[must_use]
    pub fn header_signed_by(
        trusted_height: Height,
        height: Height,
        timestamp: u64,
        signers: &[Validator],
        trusted_next: &[Validator],
    ) -> Header {
        #[allow(clippy::cast_possible_truncation)]
        let root = [height.epoch_height as u8; 32];
        build(trusted_height, height, timestamp, &root, signers, trusted_next)
    }

    /// Turns the last `count` commit signatures into absent votes
    pub fn withhold_signatures(header: &mut Header, count: usize) {
        let signatures = &mut header.signed_header.commit.signatures;
        let keep = signatures.len().saturating_sub(count);
        for signature in &mut signatures[keep..] {
            *signature = CommitSig::BlockIdFlagAbsent;
        }
    }

    fn build(
        trusted_height: Height,
        height: Height,
        timestamp: u64,
        root: &[u8],
        signers: &[Validator],
        trusted_next: &[Validator],
    ) -> Header {
        let block_header = TestgenHeader::new(signers)
            .next_validators(signers)
            .chain_id(CHAIN_ID)
            .height(height.epoch_height)
            .time(time_from_unix_nanos(timestamp).unwrap())
            .app_hash(AppHash::try_from(root.to_vec()).unwrap());
        let light_block = LightBlock::new_default_with_header(block_header)
            .generate()
            .unwrap();

        Header {
            signed_header: light_block.signed_header,
            validator_set: light_block.validators,
            trusted_height,
            trusted_next_validator_set: validator_set(trusted_next),
        }
    }
}
