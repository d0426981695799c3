//! Commitment paths as listed in ICS-24.
//!
//! Each fact a light client can verify lives under a deterministic key derived from its
//! identifiers. The key is composed with a [`crate::commitment::CommitmentPrefix`] to form
//! the merkle path a proof is checked against.

use core::fmt;

use crate::{
    identifier::{ChannelId, ClientId, ConnectionId, PortId},
    Height,
};

/// The provable paths of the host state layout
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Path {
    /// State of a client tracked by the counterparty
    ClientState(ClientId),
    /// Consensus state of a client tracked by the counterparty, at a height
    ClientConsensusState(ClientId, Height),
    /// A connection end
    Connection(ConnectionId),
    /// A channel end
    ChannelEnd(PortId, ChannelId),
    /// The next sequence expected on receive
    NextSequenceRecv(PortId, ChannelId),
    /// Commitment of a sent packet
    PacketCommitment(PortId, ChannelId, u64),
    /// Acknowledgement of a received packet
    PacketAcknowledgement(PortId, ChannelId, u64),
}

impl Path {
    /// Key bytes of the path
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientState(client_id) => write!(f, "clients/{client_id}/clientState"),
            Self::ClientConsensusState(client_id, height) => write!(
                f,
                "clients/{client_id}/consensusStates/{}-{}",
                height.epoch_number, height.epoch_height
            ),
            Self::Connection(connection_id) => write!(f, "connections/{connection_id}"),
            Self::ChannelEnd(port_id, channel_id) => {
                write!(f, "channelEnds/ports/{port_id}/channels/{channel_id}")
            }
            Self::NextSequenceRecv(port_id, channel_id) => {
                write!(f, "nextSequenceRecv/ports/{port_id}/channels/{channel_id}")
            }
            Self::PacketCommitment(port_id, channel_id, sequence) => write!(
                f,
                "commitments/ports/{port_id}/channels/{channel_id}/sequences/{sequence}"
            ),
            Self::PacketAcknowledgement(port_id, channel_id, sequence) => write!(
                f,
                "acks/ports/{port_id}/channels/{channel_id}/sequences/{sequence}"
            ),
        }
    }
}
