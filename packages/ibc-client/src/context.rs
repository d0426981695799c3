//! Host chain parameters read by the client core

use ibc_client_types::{commitment::CommitmentRoot, Height};

/// Read access to the host chain's current state
pub trait HostContext {
    /// Chain id of the host
    fn host_chain_id(&self) -> String;
    /// Current height of the host
    fn host_height(&self) -> Height;
    /// Current block time of the host, in nanoseconds
    fn host_timestamp(&self) -> u64;
    /// Commitment root of the host store at the current height
    fn host_commitment_root(&self) -> CommitmentRoot;
}
