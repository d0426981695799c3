//! Events emitted by the client handlers

use core::fmt;

use ibc_client_types::{identifier::ClientId, ClientType, Height};
use serde::{Deserialize, Serialize};

/// Attributes shared by all client events
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientAttributes {
    /// Client the event is about
    pub client_id: ClientId,
    /// Type of the client
    pub client_type: ClientType,
    /// Latest height for creations and updates, frozen height for misbehaviour
    pub height: Height,
}

/// A client lifecycle event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// A client was created
    CreateClient(ClientAttributes),
    /// A client accepted a header
    UpdateClient(ClientAttributes),
    /// A client was frozen by misbehaviour
    ClientMisbehaviour(ClientAttributes),
}

impl ClientEvent {
    /// Attributes of the event
    #[must_use]
    pub const fn attributes(&self) -> &ClientAttributes {
        match self {
            Self::CreateClient(attributes)
            | Self::UpdateClient(attributes)
            | Self::ClientMisbehaviour(attributes) => attributes,
        }
    }
}

impl fmt::Display for ClientEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::CreateClient(_) => "create_client",
            Self::UpdateClient(_) => "update_client",
            Self::ClientMisbehaviour(_) => "client_misbehaviour",
        };
        let attributes = self.attributes();
        write!(
            f,
            "{kind}: client_id={} client_type={} height={}",
            attributes.client_id, attributes.client_type, attributes.height
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn attributes() -> ClientAttributes {
        ClientAttributes {
            client_id: "07-tendermint-0".parse().unwrap(),
            client_type: ClientType::Tendermint,
            height: Height::new(0, 7),
        }
    }

    #[rstest]
    #[case(ClientEvent::CreateClient(attributes()), "create_client")]
    #[case(ClientEvent::UpdateClient(attributes()), "update_client")]
    #[case(ClientEvent::ClientMisbehaviour(attributes()), "client_misbehaviour")]
    fn display(#[case] event: ClientEvent, #[case] kind: &str) {
        assert_eq!(
            event.to_string(),
            format!(
                "{kind}: client_id=07-tendermint-0 client_type=tendermint height=epoch-0_height-7"
            )
        );
    }

    #[test]
    fn json_is_tagged() {
        let json = serde_json::to_value(ClientEvent::UpdateClient(attributes())).unwrap();
        assert_eq!(json["type"], "update_client");
        assert_eq!(json["client_type"], "tendermint");
    }
}
