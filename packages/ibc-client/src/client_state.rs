//! The closed set of client variants and the client state machine.
//!
//! A client is `Active` while its frozen height is zero. Valid headers advance its latest
//! height; valid misbehaviour sets the frozen height, after which every update and
//! verification fails with [`ClientError::ClientFrozen`].

use ibc_client_types::{
    commitment::CommitmentRoot, ensure, identifier::ClientId, specs::ProofSpecs, ClientType,
    Height,
};
use localhost_light_client as localhost;
use serde::{Deserialize, Serialize};
use solo_machine_light_client as solo_machine;
use tendermint_light_client as tendermint;

use crate::{context::HostContext, error::ClientError, store::{ClientStore, KvStore}};

/// Client state of any registered client type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "client_type", content = "state", rename_all = "lowercase")]
pub enum AnyClientState {
    /// Solo machine client state
    SoloMachine(solo_machine::client_state::ClientState),
    /// Tendermint client state
    Tendermint(tendermint::client_state::ClientState),
    /// Localhost client state
    Localhost(localhost::ClientState),
}

/// Consensus state of any registered client type
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "client_type", content = "state", rename_all = "lowercase")]
pub enum AnyConsensusState {
    /// Solo machine consensus state
    SoloMachine(solo_machine::consensus_state::ConsensusState),
    /// Tendermint consensus state
    Tendermint(tendermint::consensus_state::ConsensusState),
    /// Localhost consensus state
    Localhost(localhost::ConsensusState),
}

/// Header of any registered client type
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "client_type", content = "header", rename_all = "lowercase")]
pub enum AnyHeader {
    /// Solo machine header
    SoloMachine(solo_machine::header::Header),
    /// Tendermint header
    Tendermint(tendermint::header::Header),
    /// Localhost header
    Localhost(localhost::Header),
}

/// Misbehaviour of any client type that can misbehave. Localhost clients track the host
/// itself and have no misbehaviour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "client_type", content = "misbehaviour", rename_all = "lowercase")]
pub enum AnyMisbehaviour {
    /// Solo machine misbehaviour
    SoloMachine(solo_machine::misbehaviour::Misbehaviour),
    /// Tendermint misbehaviour
    Tendermint(tendermint::misbehaviour::Misbehaviour),
}

/// Outcome of a successful header check
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderUpdate {
    /// Client state after the update
    pub client_state: AnyClientState,
    /// Consensus state at the header height
    pub consensus_state: AnyConsensusState,
    /// Height of the header
    pub height: Height,
    /// True if the same consensus state was already recorded at the header height, in which
    /// case nothing needs to be written
    pub redundant: bool,
}

fn invalid_header(e: impl ToString) -> ClientError {
    ClientError::InvalidHeader {
        reason: e.to_string(),
    }
}

fn invalid_misbehaviour(e: impl ToString) -> ClientError {
    ClientError::InvalidMisbehaviour {
        reason: e.to_string(),
    }
}

impl AnyClientState {
    /// Client type of the variant
    #[must_use]
    pub const fn client_type(&self) -> ClientType {
        match self {
            Self::SoloMachine(_) => ClientType::SoloMachine,
            Self::Tendermint(_) => ClientType::Tendermint,
            Self::Localhost(_) => ClientType::Localhost,
        }
    }

    /// Chain id of the tracked chain
    #[must_use]
    pub fn chain_id(&self) -> &str {
        match self {
            Self::SoloMachine(state) => &state.chain_id,
            Self::Tendermint(state) => &state.chain_id,
            Self::Localhost(state) => &state.chain_id,
        }
    }

    /// Latest trusted height
    #[must_use]
    pub const fn latest_height(&self) -> Height {
        match self {
            Self::SoloMachine(state) => state.latest_height,
            Self::Tendermint(state) => state.latest_height,
            Self::Localhost(state) => state.latest_height,
        }
    }

    /// Height the client was frozen at, zero if active
    #[must_use]
    pub const fn frozen_height(&self) -> Height {
        match self {
            Self::SoloMachine(state) => state.frozen_height,
            Self::Tendermint(state) => state.frozen_height,
            Self::Localhost(_) => Height::zero(),
        }
    }

    /// Returns true if the client is frozen
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        !self.frozen_height().is_zero()
    }

    /// Proof specs the client accepts, `None` for clients that read the host store directly
    #[must_use]
    pub const fn proof_specs(&self) -> Option<&ProofSpecs> {
        match self {
            Self::SoloMachine(state) => Some(&state.proof_specs),
            Self::Tendermint(state) => Some(&state.proof_specs),
            Self::Localhost(_) => None,
        }
    }

    /// Structural validation
    /// # Errors
    /// Returns [`ClientError::InvalidClientState`] naming the first violation
    pub fn validate(&self) -> Result<(), ClientError> {
        let result = match self {
            Self::SoloMachine(state) => state.validate().map_err(|e| e.to_string()),
            Self::Tendermint(state) => state.validate().map_err(|e| e.to_string()),
            Self::Localhost(state) => state.validate().map_err(|e| e.to_string()),
        };
        result.map_err(|reason| ClientError::InvalidClientState { reason })
    }

    /// Fails with [`ClientError::ClientFrozen`] if the client is frozen
    /// # Errors
    /// See above
    pub const fn ensure_active(&self) -> Result<(), ClientError> {
        if self.is_frozen() {
            return Err(ClientError::ClientFrozen {
                frozen_height: self.frozen_height(),
            });
        }
        Ok(())
    }

    /// Checks `header` against the client and returns the states to persist.
    ///
    /// A header whose height already has a recorded consensus state is redundant if it
    /// commits to the same state and rejected otherwise, at any height: a different recorded
    /// state means a fork or a forgery. A header at or below the latest height with no
    /// recorded state is stale. Anything else is verified by the client variant.
    /// # Errors
    /// Returns [`ClientError::ClientFrozen`] for frozen clients,
    /// [`ClientError::InvalidHeight`] for zero heights and [`ClientError::InvalidHeader`]
    /// for any other rejection
    pub fn check_header_and_update_state<C: HostContext, S: KvStore>(
        &self,
        ctx: &C,
        store: &ClientStore<S>,
        client_id: &ClientId,
        header: &AnyHeader,
    ) -> Result<HeaderUpdate, ClientError> {
        self.ensure_active()?;
        ensure!(
            header.client_type() == self.client_type(),
            invalid_header(format!(
                "{} header submitted to {} client",
                header.client_type(),
                self.client_type()
            ))
        );

        let height = header.height();
        ensure!(height.is_valid(), ClientError::InvalidHeight(height));

        // a recorded consensus state is never overwritten, whatever the latest height says
        let header_consensus_state = header.consensus_state();
        match store.consensus_state(client_id, height)? {
            Some(existing) if existing == header_consensus_state => {
                return Ok(HeaderUpdate {
                    client_state: self.clone(),
                    consensus_state: existing,
                    height,
                    redundant: true,
                });
            }
            Some(_) => {
                return Err(invalid_header(format!(
                    "conflicting consensus state already recorded at {height}"
                )));
            }
            None => ensure!(
                height > self.latest_height(),
                invalid_header(format!(
                    "header height {height} is not after latest height {}",
                    self.latest_height()
                ))
            ),
        }

        let (client_state, consensus_state) = match (self, header) {
            (Self::SoloMachine(state), AnyHeader::SoloMachine(header)) => {
                let trusted = store
                    .consensus_state(client_id, state.latest_height)?
                    .ok_or_else(|| ClientError::ConsensusStateNotFound {
                        client_id: client_id.clone(),
                        height: state.latest_height,
                    })?;
                let AnyConsensusState::SoloMachine(trusted) = trusted else {
                    return Err(invalid_header("trusted consensus state has another type"));
                };
                let (state, consensus) =
                    solo_machine::update::update_state(state, &trusted, header)
                        .map_err(invalid_header)?;
                (Self::SoloMachine(state), AnyConsensusState::SoloMachine(consensus))
            }
            (Self::Tendermint(state), AnyHeader::Tendermint(header)) => {
                let trusted = store
                    .consensus_state(client_id, header.trusted_height)?
                    .ok_or_else(|| {
                        invalid_header(format!(
                            "no trusted consensus state at {}",
                            header.trusted_height
                        ))
                    })?;
                let AnyConsensusState::Tendermint(trusted) = trusted else {
                    return Err(invalid_header("trusted consensus state has another type"));
                };
                let (state, consensus) = tendermint::update::update_state(
                    state,
                    &trusted,
                    header,
                    ctx.host_timestamp(),
                )
                .map_err(invalid_header)?;
                (Self::Tendermint(state), AnyConsensusState::Tendermint(consensus))
            }
            (Self::Localhost(state), AnyHeader::Localhost(header)) => {
                let host = localhost::Header {
                    height: ctx.host_height(),
                    timestamp: ctx.host_timestamp(),
                    root: ctx.host_commitment_root(),
                };
                let (state, consensus) = localhost::update::update_state(state, header, &host)
                    .map_err(invalid_header)?;
                (Self::Localhost(state), AnyConsensusState::Localhost(consensus))
            }
            _ => return Err(invalid_header("header type does not match client type")),
        };

        Ok(HeaderUpdate {
            client_state,
            consensus_state,
            height,
            redundant: false,
        })
    }

    /// Checks `misbehaviour` against the client and returns the frozen client state.
    /// # Errors
    /// Returns [`ClientError::ClientFrozen`] for frozen clients and
    /// [`ClientError::InvalidMisbehaviour`] if the evidence does not prove a conflict
    pub fn check_misbehaviour_and_update_state<C: HostContext, S: KvStore>(
        &self,
        ctx: &C,
        store: &ClientStore<S>,
        client_id: &ClientId,
        misbehaviour: &AnyMisbehaviour,
    ) -> Result<Self, ClientError> {
        self.ensure_active()?;

        match (self, misbehaviour) {
            (Self::SoloMachine(state), AnyMisbehaviour::SoloMachine(misbehaviour)) => {
                solo_machine::misbehaviour::check_for_misbehaviour(state, misbehaviour)
                    .map(Self::SoloMachine)
                    .map_err(invalid_misbehaviour)
            }
            (Self::Tendermint(state), AnyMisbehaviour::Tendermint(misbehaviour)) => {
                let trusted = |height: Height| -> Result<_, ClientError> {
                    match store.consensus_state(client_id, height)? {
                        Some(AnyConsensusState::Tendermint(consensus)) => Ok(consensus),
                        _ => Err(invalid_misbehaviour(format!(
                            "no tendermint consensus state at trusted height {height}"
                        ))),
                    }
                };
                let trusted_1 = trusted(misbehaviour.header_1.trusted_height)?;
                let trusted_2 = trusted(misbehaviour.header_2.trusted_height)?;

                tendermint::misbehaviour::check_for_misbehaviour(
                    state,
                    &trusted_1,
                    &trusted_2,
                    misbehaviour,
                    ctx.host_timestamp(),
                )
                .map(Self::Tendermint)
                .map_err(invalid_misbehaviour)
            }
            _ => Err(invalid_misbehaviour(format!(
                "{} misbehaviour submitted to {} client",
                misbehaviour.client_type(),
                self.client_type()
            ))),
        }
    }
}

impl AnyConsensusState {
    /// Client type of the variant
    #[must_use]
    pub const fn client_type(&self) -> ClientType {
        match self {
            Self::SoloMachine(_) => ClientType::SoloMachine,
            Self::Tendermint(_) => ClientType::Tendermint,
            Self::Localhost(_) => ClientType::Localhost,
        }
    }

    /// Commitment root
    #[must_use]
    pub const fn root(&self) -> &CommitmentRoot {
        match self {
            Self::SoloMachine(state) => &state.root,
            Self::Tendermint(state) => &state.root,
            Self::Localhost(state) => &state.root,
        }
    }

    /// Timestamp in nanoseconds
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        match self {
            Self::SoloMachine(state) => state.timestamp,
            Self::Tendermint(state) => state.timestamp,
            Self::Localhost(state) => state.timestamp,
        }
    }

    /// Structural validation: the root is non-empty and the timestamp non-zero
    /// # Errors
    /// Returns [`ClientError::InvalidConsensusState`] naming the violation
    pub fn validate(&self) -> Result<(), ClientError> {
        let result = match self {
            Self::SoloMachine(state) => state.validate().map_err(|e| e.to_string()),
            Self::Tendermint(state) => state.validate().map_err(|e| e.to_string()),
            Self::Localhost(state) => state.validate().map_err(|e| e.to_string()),
        };
        result.map_err(|reason| ClientError::InvalidConsensusState { reason })
    }
}

impl AnyHeader {
    /// Client type of the variant
    #[must_use]
    pub const fn client_type(&self) -> ClientType {
        match self {
            Self::SoloMachine(_) => ClientType::SoloMachine,
            Self::Tendermint(_) => ClientType::Tendermint,
            Self::Localhost(_) => ClientType::Localhost,
        }
    }

    /// Height the header commits to
    #[must_use]
    pub fn height(&self) -> Height {
        match self {
            Self::SoloMachine(header) => header.height,
            Self::Tendermint(header) => header.height(),
            Self::Localhost(header) => header.height,
        }
    }

    /// Consensus state the header commits to
    #[must_use]
    pub fn consensus_state(&self) -> AnyConsensusState {
        match self {
            Self::SoloMachine(header) => AnyConsensusState::SoloMachine(header.consensus_state()),
            Self::Tendermint(header) => AnyConsensusState::Tendermint(header.consensus_state()),
            Self::Localhost(header) => AnyConsensusState::Localhost(header.consensus_state()),
        }
    }
}

impl AnyMisbehaviour {
    /// Client type of the variant
    #[must_use]
    pub const fn client_type(&self) -> ClientType {
        match self {
            Self::SoloMachine(_) => ClientType::SoloMachine,
            Self::Tendermint(_) => ClientType::Tendermint,
        }
    }

    /// Height the client is frozen at if the misbehaviour is valid
    #[must_use]
    pub fn height(&self) -> Height {
        match self {
            Self::SoloMachine(misbehaviour) => misbehaviour.height,
            Self::Tendermint(misbehaviour) => misbehaviour.height(),
        }
    }
}
