//! Tendermint client state

use core::time::Duration;

use ibc_client_types::{specs::ProofSpecs, Height};
use serde::{Deserialize, Serialize};
use tendermint::chain;
use tendermint_light_client_verifier::options::Options;

use crate::{error::TendermintClientError, trust_threshold::TrustThreshold};

/// Nanoseconds per second
pub const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// State of a tendermint client
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientState {
    /// Chain id of the tracked chain
    pub chain_id: String,
    /// Fraction of the trusted validator power that must sign a skipping header
    pub trust_level: TrustThreshold,
    /// How long a consensus state can be trusted, in seconds
    pub trusting_period: u64,
    /// Allowed drift of header timestamps past the host clock, in seconds
    pub max_clock_drift: u64,
    /// Latest height the client was updated to
    pub latest_height: Height,
    /// Height the client was frozen at, zero if active
    #[serde(default)]
    pub frozen_height: Height,
    /// Proof specs of the tracked chain's commitment proofs
    #[serde(default)]
    pub proof_specs: ProofSpecs,
}

impl ClientState {
    /// Returns true if the client has been frozen by misbehaviour
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        !self.frozen_height.is_zero()
    }

    /// Trusting period in nanoseconds
    #[must_use]
    pub const fn trusting_period_nanos(&self) -> u64 {
        self.trusting_period.saturating_mul(NANOS_PER_SECOND)
    }

    /// Max clock drift in nanoseconds
    #[must_use]
    pub const fn max_clock_drift_nanos(&self) -> u64 {
        self.max_clock_drift.saturating_mul(NANOS_PER_SECOND)
    }

    /// Verifier options derived from the trust level, trusting period and clock drift
    /// # Errors
    /// Returns [`TendermintClientError::InvalidTrustThreshold`] if the trust level is out of
    /// range
    pub fn as_light_client_options(&self) -> Result<Options, TendermintClientError> {
        Ok(Options {
            trust_threshold: self.trust_level.try_into()?,
            trusting_period: Duration::from_secs(self.trusting_period),
            clock_drift: Duration::from_secs(self.max_clock_drift),
        })
    }

    /// Chain id in the form the verifier expects
    /// # Errors
    /// Returns [`TendermintClientError::InvalidClientState`] if the chain id is not a valid
    /// tendermint chain id
    pub fn tendermint_chain_id(&self) -> Result<chain::Id, TendermintClientError> {
        self.chain_id
            .parse()
            .map_err(|e: tendermint::Error| TendermintClientError::InvalidClientState {
                reason: format!("chain id {}: {e}", self.chain_id),
            })
    }

    /// Structural validation
    /// # Errors
    /// Returns [`TendermintClientError::InvalidClientState`] naming the first violation
    pub fn validate(&self) -> Result<(), TendermintClientError> {
        let invalid = |reason: String| TendermintClientError::InvalidClientState { reason };

        if self.chain_id.trim().is_empty() {
            return Err(invalid("chain id cannot be empty".to_string()));
        }
        self.tendermint_chain_id()?;
        self.trust_level
            .validate()
            .map_err(|e| invalid(e.to_string()))?;
        if self.trusting_period == 0 {
            return Err(invalid("trusting period cannot be zero".to_string()));
        }
        if self.max_clock_drift == 0 {
            return Err(invalid("max clock drift cannot be zero".to_string()));
        }
        if !self.latest_height.is_valid() {
            return Err(invalid("latest height must be valid".to_string()));
        }
        if self.proof_specs.is_empty() {
            return Err(invalid("proof specs cannot be empty".to_string()));
        }
        Ok(())
    }
}
