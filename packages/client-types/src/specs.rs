//! Proof specifications accepted by a client, and the structural checks run against a
//! proof before any hash is computed.

use ics23::commitment_proof::Proof;
use ics23::{CommitmentProof, ExistenceProof, ProofSpec};
use prost::Message;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{commitment::MerkleProof, error::CommitmentError};

/// Upper bound on the number of inner steps of a single existence proof, regardless of what
/// the spec allows
pub const MAX_PROOF_DEPTH: usize = 256;

/// An ordered list of proof specifications, innermost store first.
#[derive(Clone, Debug, PartialEq)]
pub struct ProofSpecs(Vec<ProofSpec>);

impl ProofSpecs {
    /// Specs of a Cosmos SDK chain: an IAVL store under a tendermint simple merkle tree
    #[must_use]
    pub fn cosmos() -> Self {
        Self(vec![ics23::iavl_spec(), ics23::tendermint_spec()])
    }

    /// Returns true if there are no specs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of specs, i.e. the number of proofs a merkle proof must carry
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the specs
    pub fn iter(&self) -> impl Iterator<Item = &ProofSpec> {
        self.0.iter()
    }

    /// Checks that the shape of `proof` is one these specs accept.
    ///
    /// Runs before hashing so that oversized or mismatched proofs are rejected in time
    /// proportional to their encoded size.
    /// # Errors
    /// Returns [`CommitmentError::ProofSpecMismatch`] naming the first mismatch
    pub fn check_proof(&self, proof: &MerkleProof) -> Result<(), CommitmentError> {
        let mismatch = |reason: String| CommitmentError::ProofSpecMismatch { reason };

        ensure!(
            proof.proofs.len() == self.0.len(),
            mismatch(format!(
                "expected {} proofs, found {}",
                self.0.len(),
                proof.proofs.len()
            ))
        );

        for (index, (commitment_proof, spec)) in proof.proofs.iter().zip(&self.0).enumerate() {
            check_commitment_proof(commitment_proof, spec)
                .map_err(|reason| mismatch(format!("proof {index}: {reason}")))?;
        }

        Ok(())
    }
}

fn check_commitment_proof(proof: &CommitmentProof, spec: &ProofSpec) -> Result<(), String> {
    match &proof.proof {
        Some(Proof::Exist(existence)) => check_existence_proof(existence, spec),
        Some(Proof::Nonexist(non_existence)) => {
            if non_existence.left.is_none() && non_existence.right.is_none() {
                return Err("non-existence proof has no neighbours".to_string());
            }
            non_existence
                .left
                .iter()
                .chain(&non_existence.right)
                .try_for_each(|neighbour| check_existence_proof(neighbour, spec))
        }
        Some(Proof::Batch(_) | Proof::Compressed(_)) => {
            Err("batch and compressed proofs are not accepted".to_string())
        }
        None => Err("empty commitment proof".to_string()),
    }
}

fn check_existence_proof(proof: &ExistenceProof, spec: &ProofSpec) -> Result<(), String> {
    if proof.leaf != spec.leaf_spec {
        return Err("leaf op does not match spec".to_string());
    }

    let depth = proof.path.len();
    if depth > MAX_PROOF_DEPTH {
        return Err(format!("path depth {depth} exceeds {MAX_PROOF_DEPTH}"));
    }
    let max_depth = usize::try_from(spec.max_depth).unwrap_or(0);
    if max_depth > 0 && depth > max_depth {
        return Err(format!("path depth {depth} exceeds spec maximum {max_depth}"));
    }
    let min_depth = usize::try_from(spec.min_depth).unwrap_or(0);
    if depth < min_depth {
        return Err(format!("path depth {depth} below spec minimum {min_depth}"));
    }

    let Some(inner_spec) = &spec.inner_spec else {
        return Err("spec has no inner spec".to_string());
    };
    if proof.path.iter().any(|op| op.hash != inner_spec.hash) {
        return Err("inner op hash does not match spec".to_string());
    }

    // a prefix may embed every sibling but one
    let min_prefix = usize::try_from(inner_spec.min_prefix_length).unwrap_or(0);
    let max_prefix = usize::try_from(inner_spec.max_prefix_length).unwrap_or(0)
        + usize::try_from(inner_spec.child_size).unwrap_or(0)
            * inner_spec.child_order.len().saturating_sub(1);
    if let Some(op) = proof
        .path
        .iter()
        .find(|op| !(min_prefix..=max_prefix).contains(&op.prefix.len()))
    {
        return Err(format!(
            "inner op prefix length {} outside of [{min_prefix}, {max_prefix}]",
            op.prefix.len()
        ));
    }

    Ok(())
}

impl From<Vec<ProofSpec>> for ProofSpecs {
    fn from(specs: Vec<ProofSpec>) -> Self {
        Self(specs)
    }
}

impl From<ProofSpecs> for Vec<ProofSpec> {
    fn from(specs: ProofSpecs) -> Self {
        specs.0
    }
}

impl Default for ProofSpecs {
    fn default() -> Self {
        Self::cosmos()
    }
}

impl Serialize for ProofSpecs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let encoded: Vec<EncodedSpec> = self
            .0
            .iter()
            .map(|spec| EncodedSpec(spec.encode_to_vec()))
            .collect();
        encoded.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ProofSpecs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<EncodedSpec>::deserialize(deserializer)?
            .into_iter()
            .map(|EncodedSpec(bytes)| ProofSpec::decode(bytes.as_slice()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
            .map_err(de::Error::custom)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct EncodedSpec(#[serde(with = "crate::base64")] Vec<u8>);

#[cfg(test)]
mod tests {
    use ics23::{commitment_proof::Proof, BatchProof, CommitmentProof, InnerOp, NonExistenceProof};
    use rstest::rstest;

    use super::*;
    use crate::test_utils::{leaf_existence_proof, simple_proof_specs};

    fn proof_of(proofs: Vec<CommitmentProof>) -> MerkleProof {
        MerkleProof { proofs }
    }

    fn exist(proof: ExistenceProof) -> CommitmentProof {
        CommitmentProof {
            proof: Some(Proof::Exist(proof)),
        }
    }

    #[test]
    fn accepts_well_formed_proofs() {
        let leaf = leaf_existence_proof(b"key", b"value");
        let proof = proof_of(vec![exist(leaf.clone()), exist(leaf)]);
        assert_eq!(simple_proof_specs().check_proof(&proof), Ok(()));
    }

    #[test]
    fn rejects_wrong_proof_count() {
        let proof = proof_of(vec![exist(leaf_existence_proof(b"key", b"value"))]);
        assert!(matches!(
            simple_proof_specs().check_proof(&proof),
            Err(CommitmentError::ProofSpecMismatch { .. })
        ));
    }

    #[test]
    fn rejects_foreign_leaf_op() {
        let leaf = leaf_existence_proof(b"key", b"value");
        let mut foreign = leaf.clone();
        if let Some(op) = foreign.leaf.as_mut() {
            op.prefix = vec![0x42];
        }
        let proof = proof_of(vec![exist(foreign), exist(leaf)]);
        assert!(matches!(
            simple_proof_specs().check_proof(&proof),
            Err(CommitmentError::ProofSpecMismatch { .. })
        ));
    }

    #[test]
    fn rejects_excessive_depth() {
        let mut deep = leaf_existence_proof(b"key", b"value");
        deep.path = vec![
            InnerOp {
                hash: ics23::HashOp::Sha256.into(),
                prefix: vec![1],
                suffix: vec![0; 32],
            };
            MAX_PROOF_DEPTH + 1
        ];
        let proof = proof_of(vec![exist(deep), exist(leaf_existence_proof(b"k", b"v"))]);
        assert!(matches!(
            simple_proof_specs().check_proof(&proof),
            Err(CommitmentError::ProofSpecMismatch { .. })
        ));
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![1; 34])]
    fn rejects_inner_prefix_outside_spec(#[case] prefix: Vec<u8>) {
        let mut proof = leaf_existence_proof(b"key", b"value");
        proof.path = vec![InnerOp {
            hash: ics23::HashOp::Sha256.into(),
            prefix,
            suffix: vec![0; 32],
        }];
        let proof = proof_of(vec![exist(proof), exist(leaf_existence_proof(b"k", b"v"))]);
        assert!(matches!(
            simple_proof_specs().check_proof(&proof),
            Err(CommitmentError::ProofSpecMismatch { .. })
        ));
    }

    #[test]
    fn iavl_specs_reject_simple_merkle_proofs() {
        let (_, bytes) = crate::test_utils::membership_proof(b"ibc", b"path", b"value");
        let proof = MerkleProof::try_from(&bytes).unwrap();
        assert_eq!(simple_proof_specs().check_proof(&proof), Ok(()));
        assert!(matches!(
            ProofSpecs::cosmos().check_proof(&proof),
            Err(CommitmentError::ProofSpecMismatch { .. })
        ));
    }

    #[test]
    fn rejects_batch_and_empty_proofs() {
        let leaf = exist(leaf_existence_proof(b"key", b"value"));
        let batch = CommitmentProof {
            proof: Some(Proof::Batch(BatchProof { entries: vec![] })),
        };
        let empty = CommitmentProof { proof: None };
        let lonely = CommitmentProof {
            proof: Some(Proof::Nonexist(NonExistenceProof {
                key: b"key".to_vec(),
                left: None,
                right: None,
            })),
        };

        for bad in [batch, empty, lonely] {
            assert!(simple_proof_specs()
                .check_proof(&proof_of(vec![bad, leaf.clone()]))
                .is_err());
        }
    }

    #[test]
    fn cosmos_specs_survive_json() {
        let specs = ProofSpecs::cosmos();
        let json = serde_json::to_string(&specs).unwrap();
        assert_eq!(serde_json::from_str::<ProofSpecs>(&json).unwrap(), specs);
    }
}
