pub mod hex {
    /// Lower-case hex rendering for byte containers
    pub trait ToHex {
        fn to_hex(&self) -> String;
    }

    impl ToHex for Vec<u8> {
        fn to_hex(&self) -> String {
            hex::encode(self)
        }
    }

    impl ToHex for [u8] {
        fn to_hex(&self) -> String {
            hex::encode(self)
        }
    }

    impl<const N: usize> ToHex for [u8; N] {
        fn to_hex(&self) -> String {
            hex::encode(self)
        }
    }
}

pub mod time {
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Seconds since the Unix epoch; a clock set before 1970 reads as zero.
    pub fn unix_now() -> i64 {
        SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs() as i64).unwrap_or(0)
    }
}

/// Serde helpers that write byte strings as lower-case hex.
///
/// Use with `#[serde(with = "mch_utils::serde_hex")]` on `Vec<u8>` fields.
pub mod serde_hex {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: AsRef<[u8]> + ?Sized,
    {
        serializer.serialize_str(&hex::encode(value.as_ref()))
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<Vec<u8>>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(s.trim_start_matches("0x")).map_err(de::Error::custom)?;
        let len = bytes.len();
        T::try_from(bytes).map_err(|_| de::Error::invalid_length(len, &"a byte string of the expected length"))
    }
}
