//! The Quark proof-of-work hash.
//!
//! Nine rounds over six 512-bit functions; three of the rounds pick their
//! function from bit 3 of the previous digest's first byte. The block hash is
//! the first 256 bits of the final digest.

mod bmw;

pub use bmw::bmw512;

use crate::Hash;
use groestl::Groestl512;
use jh::Jh512;
use sha3::{Digest, Keccak512};
use skein::{consts::U64, Skein512};

pub(crate) const BLOCK_LEN: usize = 128;

fn digest512<D: Digest>(data: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&D::digest(data));
    out
}

/// BLAKE-512, the SHA-3 finalist (not BLAKE2).
pub fn blake512(data: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&<blake_hash::Blake512 as blake_hash::Digest>::digest(data));
    out
}

pub fn groestl512(data: &[u8]) -> [u8; 64] {
    digest512::<Groestl512>(data)
}

pub fn jh512(data: &[u8]) -> [u8; 64] {
    digest512::<Jh512>(data)
}

pub fn skein512(data: &[u8]) -> [u8; 64] {
    digest512::<Skein512<U64>>(data)
}

/// Keccak-512 with the original (pre-FIPS 202) padding.
pub fn keccak512(data: &[u8]) -> [u8; 64] {
    digest512::<Keccak512>(data)
}

pub(crate) fn le_words<const N: usize>(bytes: &[u8]) -> [u64; N] {
    let mut words = [0u64; N];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        *word = u64::from_le_bytes(buf);
    }
    words
}

#[inline]
fn branch(digest: &[u8; 64]) -> bool {
    digest[0] & 8 != 0
}

/// Computes the full 512-bit Quark digest.
pub fn quark512(data: &[u8]) -> [u8; 64] {
    let h = blake512(data);
    let h = bmw512(&h);
    let h = if branch(&h) { groestl512(&h) } else { skein512(&h) };
    let h = groestl512(&h);
    let h = jh512(&h);
    let h = if branch(&h) { blake512(&h) } else { bmw512(&h) };
    let h = keccak512(&h);
    let h = skein512(&h);
    if branch(&h) {
        keccak512(&h)
    } else {
        jh512(&h)
    }
}

/// Quark truncated to 256 bits, as used for block header hashes.
pub fn quark_hash(data: &[u8]) -> Hash {
    let digest = quark512(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest[..32]);
    Hash::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn keccak_empty_message() {
        assert_eq!(
            keccak512(b""),
            hex!("0eab42de4c3ceb9235fc91acffe746b29c29a8c366b7c60e4e67c466f36a4304c00fa9caf9d87976ba469bcbe06713b435f091ef2769fb160cdab33d3670680e")
        );
    }

    #[test]
    fn quark_known_answers() {
        assert_eq!(
            quark_hash(b"").to_bytes(),
            hex!("0800f13b5af35b8363864de22b7bedeca369e2a7c6c77b4f69441cb03a517d9c")
        );
        assert_eq!(
            quark_hash(b"abc").to_bytes(),
            hex!("a54b64292dd6aade02bea66228cd721e637cd5a2c1c7dee320b08ae60349d9d0")
        );
    }

    #[test]
    fn quark_header_hash_displays_reversed() {
        // An 80-byte block header with a known hash.
        let header = hex!(
            "01000000"
            "0000000000000000000000000000000000000000000000000000000000000000"
            "33fb7f10337bb532bfa2e092a3c7ac9829b6826d1137f067a0280f6866698ffa"
            "201cf95f" "f0ff0f1e" "247e1a00"
        );
        assert_eq!(
            quark_hash(&header).to_string(),
            "00000edb03823e6b6fb39e27b3a6dfb9a80111fb9fb02980cc0096ceb588a8e7"
        );
    }

    #[test]
    fn component_known_answers() {
        let cases: [(fn(&[u8]) -> [u8; 64], [u8; 64], [u8; 64]); 4] = [
            (
                blake512,
                hex!("a8cfbbd73726062df0c6864dda65defe58ef0cc52a5625090fa17601e1eecd1b628e94f396ae402a00acc9eab77b4d4c2e852aaaa25a636d80af3fc7913ef5b8"),
                hex!("14266c7c704a3b58fb421ee69fd005fcc6eeff742136be67435df995b7c986e7cbde4dbde135e7689c354d2bc5b8d260536c554b4f84c118e61efc576fed7cd3"),
            ),
            (
                groestl512,
                hex!("6d3ad29d279110eef3adbd66de2a0345a77baede1557f5d099fce0c03d6dc2ba8e6d4a6633dfbd66053c20faa87d1a11f39a7fbe4a6c2f009801370308fc4ad8"),
                hex!("70e1c68c60df3b655339d67dc291cc3f1dde4ef343f11b23fdd44957693815a75a8339c682fc28322513fd1f283c18e53cff2b264e06bf83a2f0ac8c1f6fbff6"),
            ),
            (
                jh512,
                hex!("90ecf2f76f9d2c8017d979ad5ab96b87d58fc8fc4b83060f3f900774faa2c8fabe69c5f4ff1ec2b61d6b316941cedee117fb04b1f4c5bc1b919ae841c50eec4f"),
                hex!("a05eab9c641cb901107d9880bcdf0eedb19b0073188896365921bd200225d9176cf136e7af90d67bdb05dfa3037e48b757d23a905b2270db67255b9eca982973"),
            ),
            (
                skein512,
                hex!("bc5b4c50925519c290cc634277ae3d6257212395cba733bbad37a4af0fa06af41fca7903d06564fea7a2d3730dbdb80c1f85562dfcc070334ea4d1d9e72cba7a"),
                hex!("8f5dd9ec798152668e35129496b029a960c9a9b88662f7f9482f110b31f9f93893ecfb25c009baad9e46737197d5630379816a886aa05526d3a70df272d96e75"),
            ),
        ];
        for (f, empty, abc) in cases {
            assert_eq!(f(b""), empty);
            assert_eq!(f(b"abc"), abc);
        }
    }

    #[test]
    fn little_endian_words() {
        let bytes = hex!("0102030405060708 1112131415161718");
        let le: [u64; 2] = le_words(&bytes);
        assert_eq!(le, [0x0807060504030201, 0x1817161514131211]);
    }
}
