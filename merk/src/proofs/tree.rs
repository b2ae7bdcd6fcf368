//! Tree proofs

use super::{Decoder, Node, Op};
use crate::{
    error::{Error, Result},
    tree::{kv_hash, node_hash, CryptoHash, NULL_HASH},
};

/// Contains a tree's child node and its hash. The hash can always be assumed to
/// be up-to-date.
#[derive(Debug)]
pub struct Child {
    /// Tree
    pub tree: Box<Tree>,
    /// Hash
    pub hash: CryptoHash,
}

/// A binary tree data structure used to represent a select subset of a tree
/// when verifying Merkle proofs.
#[derive(Debug)]
pub struct Tree {
    /// Node
    pub node: Node,
    /// Left
    pub left: Option<Child>,
    /// Right
    pub right: Option<Child>,
    /// Height
    pub height: usize,
    /// Child Heights
    pub child_heights: (usize, usize),
}

impl From<Node> for Tree {
    /// Creates a childless tree with the target node as the `node` field.
    fn from(node: Node) -> Self {
        Self {
            node,
            left: None,
            right: None,
            height: 1,
            child_heights: (0, 0),
        }
    }
}

impl Tree {
    /// Gets or computes the hash for this tree node.
    pub fn hash(&self) -> CryptoHash {
        let compute_hash = |kv_hash: &CryptoHash| {
            node_hash(kv_hash, &self.child_hash(true), &self.child_hash(false))
        };

        match &self.node {
            Node::Hash(hash) => *hash,
            Node::KVHash(kv_hash) => compute_hash(kv_hash),
            Node::KV(key, value) => compute_hash(&kv_hash(key.as_slice(), value.as_slice())),
        }
    }

    /// Returns an immutable reference to the child on the given side, if any.
    pub const fn child(&self, left: bool) -> Option<&Child> {
        if left {
            self.left.as_ref()
        } else {
            self.right.as_ref()
        }
    }

    /// Returns a mutable reference to the child on the given side, if any.
    fn child_mut(&mut self, left: bool) -> &mut Option<Child> {
        if left {
            &mut self.left
        } else {
            &mut self.right
        }
    }

    /// Attaches the child to the `Tree`'s given side. Fails if there is
    /// already a child attached to this side.
    fn attach(&mut self, left: bool, child: Self) -> Result<()> {
        if self.child(left).is_some() {
            return Err(Error::InvalidProofError(
                "Tried to attach to child slot, but it is already Some".to_string(),
            ));
        }

        self.height = self.height.max(child.height + 1);

        // update child height
        if left {
            self.child_heights.0 = child.height;
        } else {
            self.child_heights.1 = child.height;
        }

        let hash = child.hash();
        let tree = Box::new(child);
        *self.child_mut(left) = Some(Child { tree, hash });

        Ok(())
    }

    /// Returns the already-computed hash for this tree node's child on the
    /// given side, if any. If there is no child, returns the null hash
    /// (zero-filled).
    #[inline]
    fn child_hash(&self, left: bool) -> CryptoHash {
        self.child(left).map_or(NULL_HASH, |c| c.hash)
    }

    /// Consumes the tree node, calculates its hash, and returns a `Node::Hash`
    /// variant.
    fn into_hash(self) -> Self {
        Node::Hash(self.hash()).into()
    }
}

/// Executes a proof by stepping through its operators, modifying the
/// verification stack as it goes. The resulting stack item is returned.
///
/// Attached children are hashed and pruned from memory as execution goes, so
/// the returned `Tree` is the root node with hash-only children.
///
/// `visit_node` will be called once for every push operation in the proof, in
/// key-order. If `visit_node` returns an `Err` result, it will halt the
/// execution and `execute` will return the error.
pub(crate) fn execute<I, F>(ops: I, mut visit_node: F) -> Result<Tree>
where
    I: IntoIterator<Item = Result<Op>>,
    F: FnMut(&Node) -> Result<()>,
{
    let mut stack: Vec<Tree> = Vec::with_capacity(32);
    let mut maybe_last_key: Option<Vec<u8>> = None;

    fn try_pop(stack: &mut Vec<Tree>) -> Result<Tree> {
        stack
            .pop()
            .ok_or_else(|| Error::InvalidProofError("Stack underflow".to_string()))
    }

    for op in ops {
        match op? {
            Op::Parent => {
                let (mut parent, child) = (try_pop(&mut stack)?, try_pop(&mut stack)?);
                parent.attach(true, child.into_hash())?;
                stack.push(parent);
            }
            Op::Child => {
                let (child, mut parent) = (try_pop(&mut stack)?, try_pop(&mut stack)?);
                parent.attach(false, child.into_hash())?;
                stack.push(parent);
            }
            Op::Push(node) => {
                if let Node::KV(key, _) = &node {
                    // keys should always increase
                    if let Some(last_key) = &maybe_last_key {
                        if key <= last_key {
                            return Err(Error::InvalidProofError(
                                "Incorrect key ordering".to_string(),
                            ));
                        }
                    }

                    maybe_last_key = Some(key.clone());
                }

                visit_node(&node)?;
                stack.push(node.into());
            }
        }
    }

    if stack.len() != 1 {
        return Err(Error::InvalidProofError(
            "Expected proof to result in exactly one stack item".to_string(),
        ));
    }

    try_pop(&mut stack)
}

/// Executes an encoded proof. Returns the root hash the proof commits to and
/// the key/value pairs it attests, in ascending key order.
pub fn execute_proof(bytes: &[u8]) -> Result<(CryptoHash, Vec<(Vec<u8>, Vec<u8>)>)> {
    if bytes.is_empty() {
        return Ok((NULL_HASH, vec![]));
    }

    let mut leaves = vec![];
    let root = execute(Decoder::new(bytes), |node| {
        if let Node::KV(key, value) = node {
            leaves.push((key.clone(), value.clone()));
        }
        Ok(())
    })?;

    Ok((root.hash(), leaves))
}

/// Executes an encoded proof and checks it commits to `expected_hash`.
/// Returns the attested key/value pairs.
pub fn verify_proof(
    bytes: &[u8],
    expected_hash: CryptoHash,
) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
    let (root_hash, leaves) = execute_proof(bytes)?;

    if root_hash != expected_hash {
        return Err(Error::InvalidProofError(format!(
            "Proof did not match expected hash\n\tExpected: {}\n\tActual: {}",
            hex::encode(expected_hash),
            hex::encode(root_hash)
        )));
    }

    Ok(leaves)
}
