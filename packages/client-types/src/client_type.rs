//! This module defines [`ClientType`], the closed set of supported light client variants.

use core::fmt;
use core::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ClientTypeError;

/// Canonical name of the solo machine client type
pub const SOLO_MACHINE_CLIENT_TYPE: &str = "solomachine";
/// Canonical name of the tendermint client type
pub const TENDERMINT_CLIENT_TYPE: &str = "tendermint";
/// Canonical name of the localhost client type
pub const LOCALHOST_CLIENT_TYPE: &str = "localhost";

/// Type of the consensus algorithm tracked by a light client.
///
/// The set is closed: adding a variant forces every match in the workspace to handle it.
/// There is no "unknown" variant; decoding an unregistered name or tag fails with
/// [`ClientTypeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ClientType {
    /// A single-key signer, e.g. a phone or an off-chain process
    SoloMachine = 6,
    /// A BFT chain verified through signed headers and validator sets
    Tendermint = 7,
    /// The host chain itself
    Localhost = 9,
}

impl ClientType {
    /// Every registered client type
    pub const ALL: [Self; 3] = [Self::SoloMachine, Self::Tendermint, Self::Localhost];

    /// Canonical string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SoloMachine => SOLO_MACHINE_CLIENT_TYPE,
            Self::Tendermint => TENDERMINT_CLIENT_TYPE,
            Self::Localhost => LOCALHOST_CLIENT_TYPE,
        }
    }

    /// Byte tag of the client type
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientType {
    type Err = ClientTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SOLO_MACHINE_CLIENT_TYPE => Ok(Self::SoloMachine),
            TENDERMINT_CLIENT_TYPE => Ok(Self::Tendermint),
            LOCALHOST_CLIENT_TYPE => Ok(Self::Localhost),
            _ => Err(ClientTypeError::Unregistered(s.to_owned())),
        }
    }
}

impl TryFrom<u8> for ClientType {
    type Error = ClientTypeError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            6 => Ok(Self::SoloMachine),
            7 => Ok(Self::Tendermint),
            9 => Ok(Self::Localhost),
            _ => Err(ClientTypeError::UnregisteredTag(tag)),
        }
    }
}

impl Serialize for ClientType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClientType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn every_registered_type_round_trips() {
        for client_type in ClientType::ALL {
            assert_eq!(client_type.as_str().parse(), Ok(client_type));
            assert_eq!(ClientType::try_from(client_type.as_u8()), Ok(client_type));
        }
    }

    /// Index of each variant in [`ClientType::ALL`]; fails to compile when a variant is added
    const fn position(client_type: ClientType) -> usize {
        match client_type {
            ClientType::SoloMachine => 0,
            ClientType::Tendermint => 1,
            ClientType::Localhost => 2,
        }
    }

    #[test]
    fn all_lists_every_variant() {
        for (index, client_type) in ClientType::ALL.into_iter().enumerate() {
            assert_eq!(position(client_type), index);
        }

        let decoded: Vec<ClientType> = (0..=u8::MAX)
            .filter_map(|tag| ClientType::try_from(tag).ok())
            .collect();
        assert_eq!(decoded, ClientType::ALL.to_vec());
    }

    #[test]
    fn tags_are_stable() {
        assert_eq!(ClientType::SoloMachine.as_u8(), 6);
        assert_eq!(ClientType::Tendermint.as_u8(), 7);
        assert_eq!(ClientType::Localhost.as_u8(), 9);
    }

    #[rstest]
    #[case("")]
    #[case("Tendermint")]
    #[case("solo-machine")]
    #[case("mock")]
    fn unregistered_names_are_rejected(#[case] name: &str) {
        assert_eq!(
            name.parse::<ClientType>(),
            Err(ClientTypeError::Unregistered(name.to_owned()))
        );
    }

    #[rstest]
    #[case(0)]
    #[case(8)]
    #[case(255)]
    fn unregistered_tags_are_rejected(#[case] tag: u8) {
        assert_eq!(
            ClientType::try_from(tag),
            Err(ClientTypeError::UnregisteredTag(tag))
        );
    }

    #[test]
    fn json_encoding_uses_canonical_names() {
        assert_eq!(
            serde_json::to_string(&ClientType::Tendermint).unwrap(),
            "\"tendermint\""
        );
        assert_eq!(
            serde_json::from_str::<ClientType>("\"solomachine\"").unwrap(),
            ClientType::SoloMachine
        );
        assert!(serde_json::from_str::<ClientType>("\"ethereum\"").is_err());
    }
}
