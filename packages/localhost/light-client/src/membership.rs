//! Localhost verification: the host store is read directly, so proofs must be empty.

use ibc_client_types::commitment::CommitmentProofBytes;

use crate::error::LocalhostClientError;

/// Checks that `stored`, the host store's value under the verified path, equals `expected`
/// # Errors
/// Returns an error if a proof is supplied or the stored value is missing or different
pub fn verify_membership(
    proof: &CommitmentProofBytes,
    stored: Option<&[u8]>,
    expected: &[u8],
) -> Result<(), LocalhostClientError> {
    if !proof.is_empty() {
        return Err(LocalhostClientError::UnexpectedProof);
    }
    match stored {
        Some(value) if value == expected => Ok(()),
        Some(_) => Err(LocalhostClientError::ValueMismatch),
        None => Err(LocalhostClientError::ValueNotFound),
    }
}

/// Checks that the host store holds nothing under the verified path
/// # Errors
/// Returns an error if a proof is supplied or a value is stored
pub fn verify_non_membership(
    proof: &CommitmentProofBytes,
    stored: Option<&[u8]>,
) -> Result<(), LocalhostClientError> {
    if !proof.is_empty() {
        return Err(LocalhostClientError::UnexpectedProof);
    }
    if stored.is_some() {
        return Err(LocalhostClientError::ValueFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership() {
        let empty = CommitmentProofBytes::empty();
        assert_eq!(verify_membership(&empty, Some(&b"v"[..]), b"v"), Ok(()));
        assert_eq!(
            verify_membership(&empty, Some(&b"w"[..]), b"v"),
            Err(LocalhostClientError::ValueMismatch)
        );
        assert_eq!(
            verify_membership(&empty, None, b"v"),
            Err(LocalhostClientError::ValueNotFound)
        );
        assert_eq!(
            verify_membership(&CommitmentProofBytes::from(vec![1u8]), Some(&b"v"[..]), b"v"),
            Err(LocalhostClientError::UnexpectedProof)
        );
    }

    #[test]
    fn non_membership() {
        let empty = CommitmentProofBytes::empty();
        assert_eq!(verify_non_membership(&empty, None), Ok(()));
        assert_eq!(
            verify_non_membership(&empty, Some(&b"v"[..])),
            Err(LocalhostClientError::ValueFound)
        );
    }
}
