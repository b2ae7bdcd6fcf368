//! Proof operator byte codec
//!
//! Every operator starts with a one-byte tag. Hashes follow as 32 raw bytes;
//! a key/value pair follows as a one-byte key length, the key, a big-endian
//! two-byte value length and the value.

use std::io::{Read, Write};

use ed::{Decode, Encode, Terminated};

use super::{Node, Op};
use crate::{
    error::{Error, Result},
    tree::{CryptoHash, HASH_LENGTH},
};

const PUSH_HASH: u8 = 0x01;
const PUSH_KV_HASH: u8 = 0x02;
const PUSH_KV: u8 = 0x03;
const PARENT: u8 = 0x10;
const CHILD: u8 = 0x11;

impl Op {
    const fn tag(&self) -> u8 {
        match self {
            Op::Push(Node::Hash(_)) => PUSH_HASH,
            Op::Push(Node::KVHash(_)) => PUSH_KV_HASH,
            Op::Push(Node::KV(..)) => PUSH_KV,
            Op::Parent => PARENT,
            Op::Child => CHILD,
        }
    }

    fn encode_into<W: Write>(&self, dest: &mut W) -> Result<()> {
        Encode::encode_into(self, dest).map_err(Error::EdError)
    }

    fn encoding_length(&self) -> usize {
        1 + match self {
            Op::Push(Node::Hash(_)) | Op::Push(Node::KVHash(_)) => HASH_LENGTH,
            Op::Push(Node::KV(key, value)) => 1 + key.len() + 2 + value.len(),
            Op::Parent | Op::Child => 0,
        }
    }

    /// Decodes a single operator from the start of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Decode::decode(bytes).map_err(Error::EdError)
    }
}

impl Encode for Op {
    fn encode_into<W: Write>(&self, dest: &mut W) -> ed::Result<()> {
        dest.write_all(&[self.tag()])?;
        match self {
            Op::Push(Node::Hash(hash)) | Op::Push(Node::KVHash(hash)) => dest.write_all(hash)?,
            Op::Push(Node::KV(key, value)) => {
                // lengths are bounded by Merk::put
                debug_assert!(key.len() <= u8::MAX as usize);
                debug_assert!(value.len() <= u16::MAX as usize);

                (key.len() as u8).encode_into(dest)?;
                dest.write_all(key)?;
                (value.len() as u16).encode_into(dest)?;
                dest.write_all(value)?;
            }
            Op::Parent | Op::Child => {}
        }
        Ok(())
    }

    fn encoding_length(&self) -> ed::Result<usize> {
        Ok(Op::encoding_length(self))
    }
}

fn read_hash<R: Read>(input: &mut R) -> ed::Result<CryptoHash> {
    let mut hash = [0; HASH_LENGTH];
    input.read_exact(&mut hash)?;
    Ok(hash)
}

fn read_bytes<R: Read>(input: &mut R, len: usize) -> ed::Result<Vec<u8>> {
    let mut bytes = vec![0; len];
    input.read_exact(&mut bytes)?;
    Ok(bytes)
}

impl Decode for Op {
    fn decode<R: Read>(mut input: R) -> ed::Result<Self> {
        let tag: u8 = Decode::decode(&mut input)?;

        Ok(match tag {
            PUSH_HASH => Op::Push(Node::Hash(read_hash(&mut input)?)),
            PUSH_KV_HASH => Op::Push(Node::KVHash(read_hash(&mut input)?)),
            PUSH_KV => {
                let key_len: u8 = Decode::decode(&mut input)?;
                let key = read_bytes(&mut input, key_len.into())?;
                let value_len: u16 = Decode::decode(&mut input)?;
                let value = read_bytes(&mut input, value_len.into())?;
                Op::Push(Node::KV(key, value))
            }
            PARENT => Op::Parent,
            CHILD => Op::Child,
            _ => return Err(ed::Error::UnexpectedByte(tag)),
        })
    }
}

impl Terminated for Op {}

/// Encodes proof operators, appending them to `output`.
pub fn encode_into<'a, T: Iterator<Item = &'a Op>>(ops: T, output: &mut Vec<u8>) -> Result<()> {
    ops.into_iter().try_for_each(|op| op.encode_into(output))
}

/// Iterates over the operators of an encoded proof, stopping at the first
/// malformed one.
pub struct Decoder<'a> {
    remaining: &'a [u8],
}

impl<'a> Decoder<'a> {
    /// Decoder over encoded proof bytes
    pub const fn new(proof_bytes: &'a [u8]) -> Self {
        Decoder {
            remaining: proof_bytes,
        }
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<Op>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }

        match Op::decode(self.remaining) {
            Ok(op) => {
                self.remaining = &self.remaining[op.encoding_length()..];
                Some(Ok(op))
            }
            Err(err) => {
                self.remaining = &[];
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use assert_matches::assert_matches;

    use super::{super::RangeProof, *};

    #[test]
    fn encode_push_hash() {
        let op = Op::Push(Node::Hash([123; HASH_LENGTH]));
        assert_eq!(op.encoding_length(), 1 + HASH_LENGTH);

        let mut bytes = vec![];
        op.encode_into(&mut bytes).unwrap();
        assert_eq!(bytes[0], PUSH_HASH);
        assert_eq!(&bytes[1..], &[123; HASH_LENGTH]);
    }

    #[test]
    fn encode_push_kv() {
        let op = Op::Push(Node::KV(vec![1, 2, 3], vec![4, 5, 6]));
        assert_eq!(op.encoding_length(), 10);

        let mut bytes = vec![];
        op.encode_into(&mut bytes).unwrap();
        assert_eq!(bytes, vec![0x03, 3, 1, 2, 3, 0, 3, 4, 5, 6]);
    }

    #[test]
    fn encode_parent_and_child() {
        let mut bytes = vec![];
        encode_into([Op::Parent, Op::Child].iter(), &mut bytes).unwrap();
        assert_eq!(bytes, vec![0x10, 0x11]);
    }

    #[test]
    fn decode_push_kvhash() {
        let mut bytes = vec![0x02];
        bytes.extend_from_slice(&[45; HASH_LENGTH]);
        let op = Op::decode(&bytes).expect("decode failed");
        assert_eq!(op, Op::Push(Node::KVHash([45; HASH_LENGTH])));
    }

    #[test]
    fn decode_push_kv() {
        let bytes = [0x03, 3, 1, 2, 3, 0, 3, 4, 5, 6];
        let op = Op::decode(&bytes).expect("decode failed");
        assert_eq!(op, Op::Push(Node::KV(vec![1, 2, 3], vec![4, 5, 6])));
    }

    #[test]
    fn decode_unknown_tag() {
        assert_matches!(
            Op::decode(&[0x88]),
            Err(Error::EdError(ed::Error::UnexpectedByte(0x88)))
        );
    }

    #[test]
    fn decoder_stops_after_truncated_op() {
        let mut decoder = Decoder::new(&[0x10, 0x03, 3, 1, 2]);
        assert_matches!(decoder.next(), Some(Ok(Op::Parent)));
        assert_matches!(decoder.next(), Some(Err(Error::EdError(_))));
        assert!(decoder.next().is_none());
    }

    #[test]
    fn decode_whole_proof() {
        let proof = RangeProof::new(vec![
            Op::Push(Node::KV(vec![1], vec![10])),
            Op::Push(Node::KVHash([7; HASH_LENGTH])),
            Op::Parent,
            Op::Push(Node::Hash([9; HASH_LENGTH])),
            Op::Child,
        ]);
        let bytes = proof.encode().unwrap();
        assert_eq!(bytes.len(), 6 + 33 + 1 + 33 + 1);
        assert_eq!(RangeProof::decode(&bytes).unwrap(), proof);
    }
}
