//! This module defines [`Height`], the ordinal used to index consensus states and gate
//! client updates.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{error::HeightError, proto::RawHeight};

/// A monotonically increasing height, qualified by an epoch.
///
/// The epoch height normally increments on every block while the epoch number stays fixed.
/// Chains that reset their height counter (hard forks, breaking upgrades) bump the epoch
/// number instead, so heights stay totally ordered across the reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Height {
    /// The epoch the chain is in
    pub epoch_number: u64,
    /// The height of the chain within the epoch
    pub epoch_height: u64,
}

impl Height {
    /// Length of [`Height::to_be_bytes`]
    pub const ENCODED_LEN: usize = 16;

    /// Creates a new height
    #[must_use]
    pub const fn new(epoch_number: u64, epoch_height: u64) -> Self {
        Self {
            epoch_number,
            epoch_height,
        }
    }

    /// The zero height, used as the "unset" marker (e.g. the frozen height of an active client)
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0, 0)
    }

    /// Returns true if both the epoch number and the epoch height are zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.epoch_number == 0 && self.epoch_height == 0
    }

    /// Returns true if the epoch height is non-zero
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.epoch_height != 0
    }

    /// Compares two heights field by field: the epoch number dominates, ties are broken by
    /// the epoch height.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.epoch_number
            .cmp(&other.epoch_number)
            .then_with(|| self.epoch_height.cmp(&other.epoch_height))
    }

    /// Returns the previous height in the same epoch, or `None` when the epoch height is
    /// already at its lowest valid value (1).
    #[must_use]
    pub const fn decrement(&self) -> Option<Self> {
        if self.epoch_height <= 1 {
            return None;
        }
        Some(Self::new(self.epoch_number, self.epoch_height - 1))
    }

    /// Returns the next height in the same epoch, or `None` on overflow.
    #[must_use]
    pub const fn increment(&self) -> Option<Self> {
        match self.epoch_height.checked_add(1) {
            Some(epoch_height) => Some(Self::new(self.epoch_number, epoch_height)),
            None => None,
        }
    }

    /// Big-endian encoding whose byte order equals height order
    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; Self::ENCODED_LEN] {
        let mut bytes = [0u8; Self::ENCODED_LEN];
        bytes[..8].copy_from_slice(&self.epoch_number.to_be_bytes());
        bytes[8..].copy_from_slice(&self.epoch_height.to_be_bytes());
        bytes
    }

    /// Inverse of [`Height::to_be_bytes`]
    #[must_use]
    pub fn from_be_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::ENCODED_LEN {
            return None;
        }
        let (number, height) = bytes.split_at(8);
        Some(Self::new(
            u64::from_be_bytes(number.try_into().ok()?),
            u64::from_be_bytes(height.try_into().ok()?),
        ))
    }
}

impl Ord for Height {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl PartialOrd for Height {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "epoch-{}_height-{}",
            self.epoch_number, self.epoch_height
        )
    }
}

impl FromStr for Height {
    type Err = HeightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HeightError::InvalidFormat(s.to_owned());

        let (number, height) = s
            .strip_prefix("epoch-")
            .and_then(|rest| rest.split_once("_height-"))
            .ok_or_else(invalid)?;

        Ok(Self::new(
            number.parse().map_err(|_| invalid())?,
            height.parse().map_err(|_| invalid())?,
        ))
    }
}

impl From<RawHeight> for Height {
    fn from(raw: RawHeight) -> Self {
        Self::new(raw.epoch_number, raw.epoch_height)
    }
}

impl From<Height> for RawHeight {
    fn from(height: Height) -> Self {
        Self {
            epoch_number: height.epoch_number,
            epoch_height: height.epoch_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Height::new(0, 1), Height::new(0, 2), Ordering::Less)]
    #[case(Height::new(1, 1), Height::new(0, 100), Ordering::Greater)]
    #[case(Height::new(3, 7), Height::new(3, 7), Ordering::Equal)]
    #[case(Height::new(u64::MAX, 1), Height::new(0, u64::MAX), Ordering::Greater)]
    #[case(Height::new(0, u64::MAX), Height::new(0, 0), Ordering::Greater)]
    #[case(Height::new(1, 0), Height::new(0, u64::MAX), Ordering::Greater)]
    fn compare_is_lexicographic(#[case] a: Height, #[case] b: Height, #[case] expected: Ordering) {
        assert_eq!(a.compare(&b), expected);
        assert_eq!(b.compare(&a), expected.reverse());
        assert_eq!(a.compare(&a), Ordering::Equal);
    }

    #[test]
    fn compare_is_transitive() {
        let heights = [
            Height::new(0, 1),
            Height::new(0, u64::MAX),
            Height::new(1, 0),
            Height::new(1, 5),
            Height::new(u64::MAX, 1),
        ];
        for a in &heights {
            for b in &heights {
                for c in &heights {
                    if a < b && b < c {
                        assert!(a < c, "{a} < {b} < {c}");
                    }
                }
            }
        }
    }

    #[test]
    fn helpers_agree_with_compare() {
        let low = Height::new(2, 9);
        let high = Height::new(2, 10);
        assert!(low < high);
        assert!(high > low);
        assert_eq!(low, Height::new(2, 9));
        assert_ne!(low, high);
    }

    #[test]
    fn decrement() {
        assert_eq!(Height::new(1, 5).decrement(), Some(Height::new(1, 4)));
        assert_eq!(Height::new(1, 2).decrement(), Some(Height::new(1, 1)));
        assert_eq!(Height::new(1, 1).decrement(), None);
        assert_eq!(Height::new(4, 0).decrement(), None);
    }

    #[test]
    fn increment() {
        assert_eq!(Height::new(0, 100).increment(), Some(Height::new(0, 101)));
        assert_eq!(Height::new(0, u64::MAX).increment(), None);
    }

    #[test]
    fn zero_and_validity() {
        assert!(Height::zero().is_zero());
        assert!(!Height::zero().is_valid());
        assert!(!Height::new(5, 0).is_valid());
        assert!(!Height::new(5, 0).is_zero());
        assert!(Height::new(0, 1).is_valid());
        assert!(Height::new(7, u64::MAX).is_valid());
    }

    #[test]
    fn string_form_round_trips() {
        let height = Height::new(4, 1234);
        assert_eq!(height.to_string(), "epoch-4_height-1234");
        assert_eq!("epoch-4_height-1234".parse::<Height>(), Ok(height));
    }

    #[rstest]
    #[case("")]
    #[case("4-1234")]
    #[case("epoch-4_height-")]
    #[case("epoch-x_height-1")]
    #[case("epoch--1_height-1")]
    fn rejects_malformed_strings(#[case] input: &str) {
        assert_eq!(
            input.parse::<Height>(),
            Err(HeightError::InvalidFormat(input.to_owned()))
        );
    }

    #[test]
    fn byte_order_matches_height_order() {
        let a = Height::new(0, u64::MAX);
        let b = Height::new(1, 0);
        assert!(a.to_be_bytes() < b.to_be_bytes());
        assert_eq!(Height::from_be_bytes(&a.to_be_bytes()), Some(a));
        assert_eq!(Height::from_be_bytes(&[0u8; 3]), None);
    }
}
