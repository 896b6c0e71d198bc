// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! RFC 6962 Merkle tree hashing
//!
//! Leaves are hashed as `SHA-256(0x00 || leaf)`, interior nodes as
//! `SHA-256(0x01 || left || right)`. The tree splits at the largest power of
//! two below the leaf count, which promotes orphan nodes unchanged.

use crate::hash::ItemHash;
use sha2::{Digest, Sha256};

const LEAF_PREFIX: u8 = 0x00;
const NODE_PREFIX: u8 = 0x01;

type Node = [u8; 32];

fn leaf_hash(leaf: &[u8]) -> Node {
    let mut hasher = Sha256::new();
    hasher.update([LEAF_PREFIX]);
    hasher.update(leaf);
    finish(hasher)
}

fn node_hash(left: &Node, right: &Node) -> Node {
    let mut hasher = Sha256::new();
    hasher.update([NODE_PREFIX]);
    hasher.update(left);
    hasher.update(right);
    finish(hasher)
}

fn finish(hasher: Sha256) -> Node {
    let mut node = [0u8; 32];
    node.copy_from_slice(&hasher.finalize());
    node
}

fn subtree(leaves: &[Node]) -> Node {
    match leaves {
        [single] => *single,
        _ => {
            let split = split_point(leaves.len());
            node_hash(&subtree(&leaves[..split]), &subtree(&leaves[split..]))
        }
    }
}

/// Largest power of two strictly below `n` (n >= 2)
fn split_point(n: usize) -> usize {
    let mut k = 1;
    while k * 2 < n {
        k *= 2;
    }
    k
}

/// Root hash over the given leaf data, in order
///
/// The root of an empty tree is the hash of the empty string.
pub fn root_hash<I, L>(leaves: I) -> ItemHash
where
    I: IntoIterator<Item = L>,
    L: AsRef<[u8]>,
{
    let hashed: Vec<Node> = leaves.into_iter().map(|l| leaf_hash(l.as_ref())).collect();
    if hashed.is_empty() {
        return ItemHash::empty();
    }
    ItemHash::from_raw(&subtree(&hashed))
}
