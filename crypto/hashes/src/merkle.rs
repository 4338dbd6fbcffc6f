use crate::{hasher::HashWriter, Hash, ZERO_HASH};
use std::io::Write;

fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut writer = HashWriter::new();
    // Writes into a hasher cannot fail.
    let _ = writer.write_all(left.as_bytes());
    let _ = writer.write_all(right.as_bytes());
    writer.finalize()
}

/// Computes the merkle root over transaction ids.
///
/// Each level pairs neighbours and double-SHA256s their concatenation; an odd
/// node out is paired with itself. A single leaf is its own root and an empty
/// list yields the zero hash.
pub fn merkle_root(leaves: &[Hash]) -> Hash {
    if leaves.is_empty() {
        return ZERO_HASH;
    }
    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| match pair {
                [left, right] => hash_pair(left, right),
                [single] => hash_pair(single, single),
                _ => unreachable!("chunks(2) yields one or two items"),
            })
            .collect();
    }
    level[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tree() {
        assert_eq!(merkle_root(&[]), ZERO_HASH);
    }

    #[test]
    fn test_single_leaf() {
        let hash = Hash::from_u64(1);
        assert_eq!(merkle_root(&[hash]), hash);
    }

    #[test]
    fn test_two_leaves() {
        let a = Hash::from_u64(1);
        let b = Hash::from_u64(2);
        assert_eq!(merkle_root(&[a, b]), hash_pair(&a, &b));
        assert_ne!(merkle_root(&[a, b]), merkle_root(&[b, a]));
    }

    #[test]
    fn test_odd_leaf_is_duplicated() {
        let (a, b, c) = (Hash::from_u64(1), Hash::from_u64(2), Hash::from_u64(3));
        let expected = hash_pair(&hash_pair(&a, &b), &hash_pair(&c, &c));
        assert_eq!(merkle_root(&[a, b, c]), expected);
        assert_eq!(merkle_root(&[a, b, c]), merkle_root(&[a, b, c, c]));
    }
}
