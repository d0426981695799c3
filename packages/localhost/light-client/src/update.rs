//! Localhost client update

use crate::{
    client_state::{ClientState, ConsensusState},
    error::LocalhostClientError,
    header::Header,
};

/// Checks that `header` is the host's current state, `host`, and advances the client to it.
/// # Errors
/// Returns an error if the header does not advance the client or differs from the host
pub fn update_state(
    client_state: &ClientState,
    header: &Header,
    host: &Header,
) -> Result<(ClientState, ConsensusState), LocalhostClientError> {
    if header.height <= client_state.latest_height {
        return Err(LocalhostClientError::NonIncreasingHeight {
            latest: client_state.latest_height,
            header: header.height,
        });
    }

    let mismatch = |field: &str| LocalhostClientError::HostMismatch {
        reason: format!("{field} differs from the host"),
    };
    if header.height != host.height {
        return Err(mismatch("height"));
    }
    if header.timestamp != host.timestamp {
        return Err(mismatch("timestamp"));
    }
    if header.root != host.root {
        return Err(mismatch("root"));
    }

    Ok((
        ClientState {
            latest_height: header.height,
            ..client_state.clone()
        },
        header.consensus_state(),
    ))
}

#[cfg(test)]
mod tests {
    use ibc_client_types::{commitment::CommitmentRoot, Height};

    use super::*;

    fn host(height: u64) -> Header {
        Header {
            height: Height::new(0, height),
            timestamp: height * 1_000,
            root: CommitmentRoot::from_bytes(&[0x42; 32]),
        }
    }

    fn client(height: u64) -> ClientState {
        ClientState {
            chain_id: "host-1".to_string(),
            latest_height: Height::new(0, height),
        }
    }

    #[test]
    fn follows_the_host() {
        let (new_client, consensus) = update_state(&client(10), &host(12), &host(12)).unwrap();
        assert_eq!(new_client.latest_height, Height::new(0, 12));
        assert_eq!(consensus.timestamp, 12_000);
    }

    #[test]
    fn rejects_stale_or_foreign_headers() {
        assert!(matches!(
            update_state(&client(10), &host(10), &host(10)),
            Err(LocalhostClientError::NonIncreasingHeight { .. })
        ));
        assert!(matches!(
            update_state(&client(10), &host(11), &host(12)),
            Err(LocalhostClientError::HostMismatch { .. })
        ));

        let mut forged = host(12);
        forged.root = CommitmentRoot::from_bytes(&[0x43; 32]);
        assert!(matches!(
            update_state(&client(10), &forged, &host(12)),
            Err(LocalhostClientError::HostMismatch { .. })
        ));
    }
}
