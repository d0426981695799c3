//! Wire encoding of the `Any*` sum types.
//!
//! A variant travels as an [`Any`] envelope: the type URL names the variant and the value
//! holds its JSON encoding. Each payload kind has one static table from [`ClientType`] to
//! type URL, matched exhaustively in both directions.

use ibc_client_types::{error::ClientTypeError, proto::Any, ClientType};
use prost::Message;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    client_state::{AnyClientState, AnyConsensusState, AnyHeader, AnyMisbehaviour},
    error::ClientError,
};

const SOLO_MACHINE_CLIENT_STATE_TYPE_URL: &str = "/ibc.lightclients.solomachine.v1.ClientState";
const TENDERMINT_CLIENT_STATE_TYPE_URL: &str = "/ibc.lightclients.tendermint.v1.ClientState";
const LOCALHOST_CLIENT_STATE_TYPE_URL: &str = "/ibc.lightclients.localhost.v1.ClientState";

const SOLO_MACHINE_CONSENSUS_STATE_TYPE_URL: &str =
    "/ibc.lightclients.solomachine.v1.ConsensusState";
const TENDERMINT_CONSENSUS_STATE_TYPE_URL: &str = "/ibc.lightclients.tendermint.v1.ConsensusState";
const LOCALHOST_CONSENSUS_STATE_TYPE_URL: &str = "/ibc.lightclients.localhost.v1.ConsensusState";

const SOLO_MACHINE_HEADER_TYPE_URL: &str = "/ibc.lightclients.solomachine.v1.Header";
const TENDERMINT_HEADER_TYPE_URL: &str = "/ibc.lightclients.tendermint.v1.Header";
const LOCALHOST_HEADER_TYPE_URL: &str = "/ibc.lightclients.localhost.v1.Header";

const SOLO_MACHINE_MISBEHAVIOUR_TYPE_URL: &str = "/ibc.lightclients.solomachine.v1.Misbehaviour";
const TENDERMINT_MISBEHAVIOUR_TYPE_URL: &str = "/ibc.lightclients.tendermint.v1.Misbehaviour";

/// Type URL of a client state
#[must_use]
pub const fn client_state_type_url(client_type: ClientType) -> &'static str {
    match client_type {
        ClientType::SoloMachine => SOLO_MACHINE_CLIENT_STATE_TYPE_URL,
        ClientType::Tendermint => TENDERMINT_CLIENT_STATE_TYPE_URL,
        ClientType::Localhost => LOCALHOST_CLIENT_STATE_TYPE_URL,
    }
}

/// Type URL of a consensus state
#[must_use]
pub const fn consensus_state_type_url(client_type: ClientType) -> &'static str {
    match client_type {
        ClientType::SoloMachine => SOLO_MACHINE_CONSENSUS_STATE_TYPE_URL,
        ClientType::Tendermint => TENDERMINT_CONSENSUS_STATE_TYPE_URL,
        ClientType::Localhost => LOCALHOST_CONSENSUS_STATE_TYPE_URL,
    }
}

/// Type URL of a header
#[must_use]
pub const fn header_type_url(client_type: ClientType) -> &'static str {
    match client_type {
        ClientType::SoloMachine => SOLO_MACHINE_HEADER_TYPE_URL,
        ClientType::Tendermint => TENDERMINT_HEADER_TYPE_URL,
        ClientType::Localhost => LOCALHOST_HEADER_TYPE_URL,
    }
}

/// Type URL of a misbehaviour, `None` for client types that cannot misbehave
#[must_use]
pub const fn misbehaviour_type_url(client_type: ClientType) -> Option<&'static str> {
    match client_type {
        ClientType::SoloMachine => Some(SOLO_MACHINE_MISBEHAVIOUR_TYPE_URL),
        ClientType::Tendermint => Some(TENDERMINT_MISBEHAVIOUR_TYPE_URL),
        ClientType::Localhost => None,
    }
}

fn unregistered(any: &Any) -> ClientError {
    ClientTypeError::Unregistered(any.type_url.clone()).into()
}

fn decode_value<T: DeserializeOwned>(any: &Any) -> Result<T, ClientError> {
    serde_json::from_slice(&any.value).map_err(|e| ClientError::Decode {
        type_url: any.type_url.clone(),
        reason: e.to_string(),
    })
}

fn encode_value<T: Serialize>(type_url: &str, value: &T) -> Result<Any, ClientError> {
    Ok(Any {
        type_url: type_url.to_string(),
        value: serde_json::to_vec(value).map_err(|e| ClientError::Encode {
            reason: e.to_string(),
        })?,
    })
}

/// Conversion of a variant payload to and from its [`Any`] envelope
pub trait AnyCodec: Sized {
    /// Type URL of the payload
    fn type_url(&self) -> &'static str;

    /// Wraps the payload into its envelope
    /// # Errors
    /// Returns [`ClientError::Encode`] if the payload cannot be serialized
    fn to_any(&self) -> Result<Any, ClientError>;

    /// Unwraps a payload from its envelope
    /// # Errors
    /// Returns [`ClientError::InvalidClientType`] for unknown type URLs and
    /// [`ClientError::Decode`] for malformed values
    fn from_any(any: &Any) -> Result<Self, ClientError>;
}

impl AnyCodec for AnyClientState {
    fn type_url(&self) -> &'static str {
        client_state_type_url(self.client_type())
    }

    fn to_any(&self) -> Result<Any, ClientError> {
        match self {
            Self::SoloMachine(state) => encode_value(self.type_url(), state),
            Self::Tendermint(state) => encode_value(self.type_url(), state),
            Self::Localhost(state) => encode_value(self.type_url(), state),
        }
    }

    fn from_any(any: &Any) -> Result<Self, ClientError> {
        match any.type_url.as_str() {
            SOLO_MACHINE_CLIENT_STATE_TYPE_URL => Ok(Self::SoloMachine(decode_value(any)?)),
            TENDERMINT_CLIENT_STATE_TYPE_URL => Ok(Self::Tendermint(decode_value(any)?)),
            LOCALHOST_CLIENT_STATE_TYPE_URL => Ok(Self::Localhost(decode_value(any)?)),
            _ => Err(unregistered(any)),
        }
    }
}

impl AnyCodec for AnyConsensusState {
    fn type_url(&self) -> &'static str {
        consensus_state_type_url(self.client_type())
    }

    fn to_any(&self) -> Result<Any, ClientError> {
        match self {
            Self::SoloMachine(state) => encode_value(self.type_url(), state),
            Self::Tendermint(state) => encode_value(self.type_url(), state),
            Self::Localhost(state) => encode_value(self.type_url(), state),
        }
    }

    fn from_any(any: &Any) -> Result<Self, ClientError> {
        match any.type_url.as_str() {
            SOLO_MACHINE_CONSENSUS_STATE_TYPE_URL => Ok(Self::SoloMachine(decode_value(any)?)),
            TENDERMINT_CONSENSUS_STATE_TYPE_URL => Ok(Self::Tendermint(decode_value(any)?)),
            LOCALHOST_CONSENSUS_STATE_TYPE_URL => Ok(Self::Localhost(decode_value(any)?)),
            _ => Err(unregistered(any)),
        }
    }
}

impl AnyCodec for AnyHeader {
    fn type_url(&self) -> &'static str {
        header_type_url(self.client_type())
    }

    fn to_any(&self) -> Result<Any, ClientError> {
        match self {
            Self::SoloMachine(header) => encode_value(self.type_url(), header),
            Self::Tendermint(header) => encode_value(self.type_url(), header),
            Self::Localhost(header) => encode_value(self.type_url(), header),
        }
    }

    fn from_any(any: &Any) -> Result<Self, ClientError> {
        match any.type_url.as_str() {
            SOLO_MACHINE_HEADER_TYPE_URL => Ok(Self::SoloMachine(decode_value(any)?)),
            TENDERMINT_HEADER_TYPE_URL => Ok(Self::Tendermint(decode_value(any)?)),
            LOCALHOST_HEADER_TYPE_URL => Ok(Self::Localhost(decode_value(any)?)),
            _ => Err(unregistered(any)),
        }
    }
}

impl AnyCodec for AnyMisbehaviour {
    fn type_url(&self) -> &'static str {
        match self {
            Self::SoloMachine(_) => SOLO_MACHINE_MISBEHAVIOUR_TYPE_URL,
            Self::Tendermint(_) => TENDERMINT_MISBEHAVIOUR_TYPE_URL,
        }
    }

    fn to_any(&self) -> Result<Any, ClientError> {
        match self {
            Self::SoloMachine(misbehaviour) => encode_value(self.type_url(), misbehaviour),
            Self::Tendermint(misbehaviour) => encode_value(self.type_url(), misbehaviour),
        }
    }

    fn from_any(any: &Any) -> Result<Self, ClientError> {
        match any.type_url.as_str() {
            SOLO_MACHINE_MISBEHAVIOUR_TYPE_URL => Ok(Self::SoloMachine(decode_value(any)?)),
            TENDERMINT_MISBEHAVIOUR_TYPE_URL => Ok(Self::Tendermint(decode_value(any)?)),
            _ => Err(unregistered(any)),
        }
    }
}

/// Protobuf encoding of the payload's envelope, the form committed to the host store
/// # Errors
/// Returns [`ClientError::Encode`] if the payload cannot be serialized
pub fn encode_to_bytes<T: AnyCodec>(value: &T) -> Result<Vec<u8>, ClientError> {
    Ok(value.to_any()?.encode_to_vec())
}

/// Inverse of [`encode_to_bytes`]
/// # Errors
/// Returns [`ClientError::Decode`] if the bytes are not a valid envelope or payload
pub fn decode_from_bytes<T: AnyCodec>(bytes: &[u8]) -> Result<T, ClientError> {
    let any = Any::decode(bytes).map_err(|e| ClientError::Decode {
        type_url: "Any".to_string(),
        reason: e.to_string(),
    })?;
    T::from_any(&any)
}

/// Decodes an optional envelope of a message field
/// # Errors
/// Returns [`ClientError::MissingField`] if the field is unset, or a decode error
pub fn decode_field<T: AnyCodec>(any: Option<&Any>, field: &'static str) -> Result<T, ClientError> {
    T::from_any(any.ok_or(ClientError::MissingField(field))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_url_tables_are_injective() {
        let tables: [fn(ClientType) -> &'static str; 3] = [
            client_state_type_url,
            consensus_state_type_url,
            header_type_url,
        ];
        for table in tables {
            for a in ClientType::ALL {
                for b in ClientType::ALL {
                    assert_eq!(a == b, table(a) == table(b));
                }
            }
        }
    }

    #[test]
    fn every_registered_type_url_dispatches_to_its_decoder() {
        let payload = |type_url: &str| Any {
            type_url: type_url.to_string(),
            value: b"not json".to_vec(),
        };
        for client_type in ClientType::ALL {
            assert!(matches!(
                AnyClientState::from_any(&payload(client_state_type_url(client_type))),
                Err(ClientError::Decode { .. })
            ));
            assert!(matches!(
                AnyConsensusState::from_any(&payload(consensus_state_type_url(client_type))),
                Err(ClientError::Decode { .. })
            ));
            assert!(matches!(
                AnyHeader::from_any(&payload(header_type_url(client_type))),
                Err(ClientError::Decode { .. })
            ));
            if let Some(type_url) = misbehaviour_type_url(client_type) {
                assert!(matches!(
                    AnyMisbehaviour::from_any(&payload(type_url)),
                    Err(ClientError::Decode { .. })
                ));
            }
        }
    }

    #[test]
    fn unknown_type_urls_are_rejected() {
        let any = Any {
            type_url: "/ibc.lightclients.mock.v1.ClientState".to_string(),
            value: b"{}".to_vec(),
        };
        assert_eq!(
            AnyClientState::from_any(&any),
            Err(ClientError::InvalidClientType(ClientTypeError::Unregistered(
                any.type_url.clone()
            )))
        );
    }

    #[test]
    fn localhost_has_no_misbehaviour() {
        assert_eq!(misbehaviour_type_url(ClientType::Localhost), None);
        let any = Any {
            type_url: "/ibc.lightclients.localhost.v1.Misbehaviour".to_string(),
            value: b"{}".to_vec(),
        };
        assert!(matches!(
            AnyMisbehaviour::from_any(&any),
            Err(ClientError::InvalidClientType(_))
        ));
    }

    #[test]
    fn malformed_payloads_are_decode_errors() {
        let any = Any {
            type_url: client_state_type_url(ClientType::Tendermint).to_string(),
            value: b"not json".to_vec(),
        };
        assert!(matches!(
            AnyClientState::from_any(&any),
            Err(ClientError::Decode { .. })
        ));
        assert!(matches!(
            decode_from_bytes::<AnyClientState>(&[0xff]),
            Err(ClientError::Decode { .. })
        ));
    }
}
