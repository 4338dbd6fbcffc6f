//! Compact difficulty targets.

use primitive_types::U256;

use crate::Hash;

/// Expands a compact `bits` value into a 256-bit target.
///
/// Returns `None` for encodings that are negative, zero or overflow 256 bits.
pub fn target_from_compact(bits: u32) -> Option<U256> {
    let size = bits >> 24;
    let word = bits & 0x007f_ffff;
    let negative = word != 0 && bits & 0x0080_0000 != 0;
    let overflow = word != 0 && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));
    if negative || overflow {
        return None;
    }
    let target = if size <= 3 {
        U256::from(word >> (8 * (3 - size)))
    } else {
        U256::from(word) << (8 * (size - 3) as usize)
    };
    if target.is_zero() {
        None
    } else {
        Some(target)
    }
}

/// Inverse of [`target_from_compact`] for targets that fit the encoding
pub fn compact_from_target(target: U256) -> u32 {
    let mut size = (target.bits() as u32 + 7) / 8;
    let mut compact = if size <= 3 {
        (target.low_u64() << (8 * (3 - size))) as u32
    } else {
        (target >> (8 * (size - 3) as usize)).low_u64() as u32
    };
    // The mantissa's top bit is the sign; shift it into the exponent instead.
    if compact & 0x0080_0000 != 0 {
        compact >>= 8;
        size += 1;
    }
    compact | (size << 24)
}

/// Interprets a hash as a 256-bit little-endian number
pub fn hash_to_u256(hash: &Hash) -> U256 {
    U256::from_little_endian(hash.as_bytes())
}

/// Whether `hash` satisfies the target encoded in `bits`, bounded by `pow_limit`
pub fn check_proof_of_work(hash: &Hash, bits: u32, pow_limit: &U256) -> bool {
    match target_from_compact(bits) {
        Some(target) if target <= *pow_limit => hash_to_u256(hash) <= target,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_compact_targets() {
        assert_eq!(target_from_compact(0x1e0ffff0), Some(U256::from(0x0ffff0u64) << (8 * 27)));
        assert_eq!(target_from_compact(0x207fffff), Some(U256::from(0x7fffffu64) << (8 * 29)));
        assert_eq!(target_from_compact(0x03123456), Some(U256::from(0x123456u64)));
        assert_eq!(target_from_compact(0x02123456), Some(U256::from(0x1234u64)));
    }

    #[test]
    fn rejects_invalid_encodings() {
        assert_eq!(target_from_compact(0), None);
        assert_eq!(target_from_compact(0x04923456), None);
        assert_eq!(target_from_compact(0xff123456), None);
    }

    #[test]
    fn compact_roundtrip_for_network_limits() {
        for bits in [0x1e0ffff0u32, 0x207fffff, 0x1d00ffff] {
            let target = target_from_compact(bits).unwrap();
            assert_eq!(compact_from_target(target), bits);
        }
        assert_eq!(compact_from_target(U256::MAX >> 20), 0x1e0fffff);
    }

    #[test]
    fn proof_of_work_bounds() {
        let limit = U256::MAX >> 1;
        assert!(check_proof_of_work(&Hash::from_u64(1), 0x207fffff, &limit));
        assert!(!check_proof_of_work(&Hash::from_bytes([0xff; 32]), 0x207fffff, &limit));
        assert!(!check_proof_of_work(&Hash::from_u64(1), 0x207fffff, &(U256::MAX >> 20)));
        assert!(!check_proof_of_work(&Hash::from_u64(1), 0, &limit));
    }
}
