//! Commitment roots, prefixes and proofs. Proofs are checked against the accepted
//! [`ProofSpecs`] here, then handed to `ibc-core-commitment-types` to walk the ics23 chain.

use ibc_core_commitment_types::{
    commitment,
    merkle,
    proto::ics23::HostFunctionsManager,
    specs::ProofSpecs as IbcProofSpecs,
};
use ibc_core_host_types::path::PathBytes;
use ics23::commitment_proof::Proof;
use ics23::{CommitmentProof, ProofSpec};
use prost::Message;
use serde::{Deserialize, Serialize};

use crate::{error::CommitmentError, proto::RawMerkleProof, specs::ProofSpecs};

/// Authenticated digest of a chain's key-value state at one height
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitmentRoot(#[serde(with = "crate::base64")] Vec<u8>);

impl CommitmentRoot {
    /// Creates a root from its bytes
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    /// Root bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns true if the root is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for CommitmentRoot {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Store prefix under which the counterparty commits its IBC state, e.g. `ibc`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitmentPrefix(Vec<u8>);

impl CommitmentPrefix {
    /// Prefix bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Composes the prefix with a path into the merkle path a proof is checked against
    #[must_use]
    pub fn apply_prefix(&self, path: Vec<u8>) -> MerklePath {
        MerklePath {
            key_path: vec![self.0.clone(), path],
        }
    }
}

impl TryFrom<Vec<u8>> for CommitmentPrefix {
    type Error = CommitmentError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        ensure!(!bytes.is_empty(), CommitmentError::EmptyPrefix);
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for CommitmentPrefix {
    type Error = CommitmentError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.into_bytes().try_into()
    }
}

impl From<CommitmentPrefix> for String {
    fn from(prefix: CommitmentPrefix) -> Self {
        String::from_utf8_lossy(&prefix.0).into_owned()
    }
}

/// Encoded [`MerkleProof`] as carried by verification requests
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitmentProofBytes(#[serde(with = "crate::base64")] Vec<u8>);

impl CommitmentProofBytes {
    /// Proof bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns true if the proof is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// An empty proof, used by clients that read the host store directly
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }
}

impl From<Vec<u8>> for CommitmentProofBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<CommitmentProofBytes> for Vec<u8> {
    fn from(proof: CommitmentProofBytes) -> Self {
        proof.0
    }
}

impl From<MerkleProof> for CommitmentProofBytes {
    fn from(proof: MerkleProof) -> Self {
        Self(
            RawMerkleProof {
                proofs: proof.proofs,
            }
            .encode_to_vec(),
        )
    }
}

/// Keys from the root of the outermost tree down to the leaf, e.g. `["ibc", "clients/..."]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerklePath {
    /// Keys, outermost first
    pub key_path: Vec<Vec<u8>>,
}

/// A chain of ics23 proofs, innermost store first
#[derive(Clone, Debug, PartialEq)]
pub struct MerkleProof {
    /// One commitment proof per proof spec
    pub proofs: Vec<CommitmentProof>,
}

impl TryFrom<&CommitmentProofBytes> for MerkleProof {
    type Error = CommitmentError;

    fn try_from(bytes: &CommitmentProofBytes) -> Result<Self, Self::Error> {
        ensure!(!bytes.is_empty(), CommitmentError::EmptyProof);
        let raw = RawMerkleProof::decode(bytes.as_bytes()).map_err(|e| {
            CommitmentError::ProofDecode {
                reason: e.to_string(),
            }
        })?;
        Ok(Self { proofs: raw.proofs })
    }
}

impl MerkleProof {
    /// Verifies that `value` is stored under `path` in the tree committed to by `root`.
    /// # Errors
    /// Returns [`CommitmentError::ProofSpecMismatch`] if the proof shape is not accepted by
    /// `specs`, and [`CommitmentError::VerificationFailed`] if the proof does not authenticate
    /// the value against the root
    pub fn verify_membership(
        &self,
        specs: &ProofSpecs,
        root: &CommitmentRoot,
        path: &MerklePath,
        value: &[u8],
    ) -> Result<(), CommitmentError> {
        self.check_arguments(specs, root, path)?;
        ensure!(!value.is_empty(), CommitmentError::EmptyValue);
        self.expect_first(|proof| matches!(proof, Proof::Exist(_)), "an existence proof")?;

        self.to_ibc()
            .verify_membership::<HostFunctionsManager>(
                &ibc_proof_specs(specs)?,
                commitment::CommitmentRoot::from_bytes(root.as_bytes()).into(),
                ibc_merkle_path(path),
                value.to_vec(),
                0,
            )
            .map_err(verification_failed)
    }

    /// Verifies that nothing is stored under `path` in the tree committed to by `root`.
    /// # Errors
    /// Returns [`CommitmentError::ProofSpecMismatch`] if the proof shape is not accepted by
    /// `specs`, and [`CommitmentError::VerificationFailed`] if the proof does not authenticate
    /// the absence against the root
    pub fn verify_non_membership(
        &self,
        specs: &ProofSpecs,
        root: &CommitmentRoot,
        path: &MerklePath,
    ) -> Result<(), CommitmentError> {
        self.check_arguments(specs, root, path)?;
        self.expect_first(
            |proof| matches!(proof, Proof::Nonexist(_)),
            "a non-existence proof",
        )?;

        self.to_ibc()
            .verify_non_membership::<HostFunctionsManager>(
                &ibc_proof_specs(specs)?,
                commitment::CommitmentRoot::from_bytes(root.as_bytes()).into(),
                ibc_merkle_path(path),
            )
            .map_err(verification_failed)
    }

    fn check_arguments(
        &self,
        specs: &ProofSpecs,
        root: &CommitmentRoot,
        path: &MerklePath,
    ) -> Result<(), CommitmentError> {
        ensure!(!self.proofs.is_empty(), CommitmentError::EmptyProof);
        ensure!(!root.is_empty(), CommitmentError::EmptyRoot);
        specs.check_proof(self)?;
        ensure!(
            path.key_path.len() == self.proofs.len(),
            CommitmentError::ProofSpecMismatch {
                reason: format!(
                    "expected {} keys, found {}",
                    self.proofs.len(),
                    path.key_path.len()
                ),
            }
        );
        Ok(())
    }

    fn expect_first(
        &self,
        accepts: impl Fn(&Proof) -> bool,
        expected: &str,
    ) -> Result<(), CommitmentError> {
        match self.proofs.first().and_then(|p| p.proof.as_ref()) {
            Some(proof) if accepts(proof) => Ok(()),
            _ => Err(CommitmentError::ProofSpecMismatch {
                reason: format!("first proof must be {expected}"),
            }),
        }
    }

    fn to_ibc(&self) -> merkle::MerkleProof {
        merkle::MerkleProof {
            proofs: self.proofs.clone(),
        }
    }
}

fn ibc_proof_specs(specs: &ProofSpecs) -> Result<IbcProofSpecs, CommitmentError> {
    IbcProofSpecs::try_from(Vec::<ProofSpec>::from(specs.clone())).map_err(|e| {
        CommitmentError::ProofSpecMismatch {
            reason: e.to_string(),
        }
    })
}

fn ibc_merkle_path(path: &MerklePath) -> merkle::MerklePath {
    merkle::MerklePath::new(
        path.key_path
            .iter()
            .map(|key| PathBytes::from_bytes(key.clone()))
            .collect(),
    )
}

#[allow(clippy::needless_pass_by_value)]
fn verification_failed(err: impl core::fmt::Display) -> CommitmentError {
    CommitmentError::VerificationFailed {
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{membership_proof, non_membership_proof, simple_proof_specs};

    const PREFIX: &[u8] = b"ibc";
    const PATH: &[u8] = b"commitments/ports/transfer/channels/channel-0/sequences/1";

    fn prefix() -> CommitmentPrefix {
        PREFIX.to_vec().try_into().unwrap()
    }

    #[test]
    fn membership_proof_verifies() {
        let (root, proof_bytes) = membership_proof(PREFIX, PATH, b"commitment");
        let proof = MerkleProof::try_from(&proof_bytes).unwrap();
        let path = prefix().apply_prefix(PATH.to_vec());

        assert_eq!(
            proof.verify_membership(&simple_proof_specs(), &root, &path, b"commitment"),
            Ok(())
        );
    }

    #[test]
    fn membership_rejects_wrong_value_key_or_root() {
        let (root, proof_bytes) = membership_proof(PREFIX, PATH, b"commitment");
        let proof = MerkleProof::try_from(&proof_bytes).unwrap();
        let specs = simple_proof_specs();
        let path = prefix().apply_prefix(PATH.to_vec());

        assert!(matches!(
            proof.verify_membership(&specs, &root, &path, b"other"),
            Err(CommitmentError::VerificationFailed { .. })
        ));
        assert!(matches!(
            proof.verify_membership(
                &specs,
                &root,
                &prefix().apply_prefix(b"acks/ports/transfer/channels/channel-0/sequences/1".to_vec()),
                b"commitment"
            ),
            Err(CommitmentError::VerificationFailed { .. })
        ));
        assert!(matches!(
            proof.verify_membership(&specs, &CommitmentRoot::from_bytes(&[7; 32]), &path, b"commitment"),
            Err(CommitmentError::VerificationFailed { .. })
        ));
        assert_eq!(
            proof.verify_membership(&specs, &CommitmentRoot::default(), &path, b"commitment"),
            Err(CommitmentError::EmptyRoot)
        );
        assert_eq!(
            proof.verify_membership(&specs, &root, &path, b""),
            Err(CommitmentError::EmptyValue)
        );
    }

    #[test]
    fn non_membership_proof_verifies() {
        let (root, proof_bytes) = non_membership_proof(PREFIX, PATH);
        let proof = MerkleProof::try_from(&proof_bytes).unwrap();
        let path = prefix().apply_prefix(PATH.to_vec());

        assert_eq!(
            proof.verify_non_membership(&simple_proof_specs(), &root, &path),
            Ok(())
        );
    }

    #[test]
    fn proof_kinds_are_not_interchangeable() {
        let specs = simple_proof_specs();
        let path = prefix().apply_prefix(PATH.to_vec());

        let (root, absence) = non_membership_proof(PREFIX, PATH);
        let absence = MerkleProof::try_from(&absence).unwrap();
        assert!(matches!(
            absence.verify_membership(&specs, &root, &path, b"commitment"),
            Err(CommitmentError::ProofSpecMismatch { .. })
        ));

        let (root, presence) = membership_proof(PREFIX, PATH, b"commitment");
        let presence = MerkleProof::try_from(&presence).unwrap();
        assert!(matches!(
            presence.verify_non_membership(&specs, &root, &path),
            Err(CommitmentError::ProofSpecMismatch { .. })
        ));
    }

    #[test]
    fn tampered_sibling_fails_against_the_root() {
        let (root, proof_bytes) = membership_proof(PREFIX, PATH, b"commitment");
        let tampered = crate::test_utils::tamper_membership_proof(&proof_bytes);
        let proof = MerkleProof::try_from(&tampered).unwrap();
        let path = prefix().apply_prefix(PATH.to_vec());

        assert!(matches!(
            proof.verify_membership(&simple_proof_specs(), &root, &path, b"commitment"),
            Err(CommitmentError::VerificationFailed { .. })
        ));
    }

    #[test]
    fn decode_failures() {
        assert_eq!(
            MerkleProof::try_from(&CommitmentProofBytes::empty()),
            Err(CommitmentError::EmptyProof)
        );
        assert!(matches!(
            MerkleProof::try_from(&CommitmentProofBytes::from(vec![0xffu8; 3])),
            Err(CommitmentError::ProofDecode { .. })
        ));
    }

    #[test]
    fn prefix_cannot_be_empty() {
        assert_eq!(
            CommitmentPrefix::try_from(Vec::<u8>::new()),
            Err(CommitmentError::EmptyPrefix)
        );
        assert_eq!(
            prefix().apply_prefix(b"path".to_vec()).key_path,
            vec![b"ibc".to_vec(), b"path".to_vec()]
        );
    }
}
