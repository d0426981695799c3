//! Fixtures building real ics23 proofs over a two-level tree (a store tree under the prefix
//! key of a root tree), both using the tendermint simple merkle spec.

use ics23::commitment_proof::Proof;
use ics23::{
    calculate_existence_root, CommitmentProof, ExistenceProof, HashOp, HostFunctionsManager,
    InnerOp, NonExistenceProof,
};

use crate::{
    commitment::{CommitmentProofBytes, CommitmentRoot, MerkleProof},
    specs::ProofSpecs,
};

const SIBLING: [u8; 32] = [0x5a; 32];

/// Two tendermint specs, matching the proofs built by this module
#[must_use]
pub fn simple_proof_specs() -> ProofSpecs {
    vec![ics23::tendermint_spec(), ics23::tendermint_spec()].into()
}

/// A leaf-only existence proof, i.e. a tree with a single entry
#[must_use]
pub fn leaf_existence_proof(key: &[u8], value: &[u8]) -> ExistenceProof {
    ExistenceProof {
        key: key.to_vec(),
        value: value.to_vec(),
        leaf: ics23::tendermint_spec().leaf_spec,
        path: vec![],
    }
}

fn inner_op(prefix: Vec<u8>, suffix: Vec<u8>) -> InnerOp {
    InnerOp {
        hash: HashOp::Sha256.into(),
        prefix,
        suffix,
    }
}

fn root_of(proof: &ExistenceProof) -> Vec<u8> {
    calculate_existence_root::<HostFunctionsManager>(proof)
        .expect("fixture proofs are well formed")
}

/// Proves the store root under `prefix` in the root tree, the store being the left child
fn outer_proof(prefix: &[u8], store_root: Vec<u8>) -> ExistenceProof {
    let mut proof = leaf_existence_proof(prefix, &store_root);
    proof.path = vec![inner_op([&[1u8][..], &SIBLING].concat(), vec![])];
    proof
}

fn finish(prefix: &[u8], inner: CommitmentProof, store_root: Vec<u8>) -> (CommitmentRoot, CommitmentProofBytes) {
    let outer = outer_proof(prefix, store_root);
    let root = CommitmentRoot::from(root_of(&outer));
    let proof = MerkleProof {
        proofs: vec![
            inner,
            CommitmentProof {
                proof: Some(Proof::Exist(outer)),
            },
        ],
    };
    (root, proof.into())
}

/// Builds a root committing `value` under `prefix`/`path`, and the proof of it
#[must_use]
pub fn membership_proof(prefix: &[u8], path: &[u8], value: &[u8]) -> (CommitmentRoot, CommitmentProofBytes) {
    let mut inner = leaf_existence_proof(path, value);
    inner.path = vec![inner_op(vec![1], SIBLING.to_vec())];
    let store_root = root_of(&inner);

    finish(
        prefix,
        CommitmentProof {
            proof: Some(Proof::Exist(inner)),
        },
        store_root,
    )
}

/// Builds a root whose store holds the two neighbours of `path` but not `path` itself, and
/// the proof of absence.
///
/// `path` must be at least two bytes long.
#[must_use]
pub fn non_membership_proof(prefix: &[u8], path: &[u8]) -> (CommitmentRoot, CommitmentProofBytes) {
    let left_key = path[..path.len() - 1].to_vec();
    let right_key = [path, &[0xff]].concat();

    let left_leaf = root_of(&leaf_existence_proof(&left_key, b"left"));
    let right_leaf = root_of(&leaf_existence_proof(&right_key, b"right"));

    let mut left = leaf_existence_proof(&left_key, b"left");
    left.path = vec![inner_op(vec![1], right_leaf)];
    let mut right = leaf_existence_proof(&right_key, b"right");
    right.path = vec![inner_op([&[1u8][..], &left_leaf].concat(), vec![])];

    let store_root = root_of(&left);
    let inner = CommitmentProof {
        proof: Some(Proof::Nonexist(NonExistenceProof {
            key: path.to_vec(),
            left: Some(left),
            right: Some(right),
        })),
    };

    finish(prefix, inner, store_root)
}

/// Flips one byte of the sibling hash in the innermost proof step, keeping the proof
/// well formed
#[must_use]
pub fn tamper_membership_proof(proof: &CommitmentProofBytes) -> CommitmentProofBytes {
    let Ok(mut merkle) = MerkleProof::try_from(proof) else {
        return proof.clone();
    };
    if let Some(Proof::Exist(existence)) = merkle
        .proofs
        .first_mut()
        .and_then(|p| p.proof.as_mut())
    {
        if let Some(byte) = existence
            .path
            .first_mut()
            .and_then(|op| op.suffix.first_mut())
        {
            *byte ^= 0x01;
        }
    }
    merkle.into()
}
