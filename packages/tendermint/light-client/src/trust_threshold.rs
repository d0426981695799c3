//! Fraction of a trusted validator set's voting power required to trust a skipping header

use core::fmt;

use serde::{Deserialize, Serialize};
use tendermint::trust_threshold::TrustThresholdFraction;

use crate::error::TendermintClientError;

/// A fraction in `[1/3, 1]`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrustThreshold {
    /// Numerator of the fraction
    pub numerator: u64,
    /// Denominator of the fraction
    pub denominator: u64,
}

impl TrustThreshold {
    /// One third, the default trust level
    pub const ONE_THIRD: Self = Self::new(1, 3);

    /// Creates a threshold without validating it
    #[must_use]
    pub const fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Checks that the fraction lies in `[1/3, 1]`
    /// # Errors
    /// Returns [`TendermintClientError::InvalidTrustThreshold`] otherwise
    pub fn validate(&self) -> Result<(), TendermintClientError> {
        let numerator = u128::from(self.numerator);
        let denominator = u128::from(self.denominator);
        if denominator == 0 || numerator > denominator || numerator * 3 < denominator {
            return Err(TendermintClientError::InvalidTrustThreshold {
                numerator: self.numerator,
                denominator: self.denominator,
            });
        }
        Ok(())
    }
}

impl Default for TrustThreshold {
    fn default() -> Self {
        Self::ONE_THIRD
    }
}

impl TryFrom<TrustThreshold> for TrustThresholdFraction {
    type Error = TendermintClientError;

    fn try_from(threshold: TrustThreshold) -> Result<Self, Self::Error> {
        threshold.validate()?;
        Self::new(threshold.numerator, threshold.denominator).map_err(|_| {
            TendermintClientError::InvalidTrustThreshold {
                numerator: threshold.numerator,
                denominator: threshold.denominator,
            }
        })
    }
}

impl fmt::Display for TrustThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
