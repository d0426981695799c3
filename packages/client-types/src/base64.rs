//! Serde helpers encoding byte fields as base64 strings.

use base64::prelude::*;
use serde::{de, Deserialize, Deserializer, Serializer};

/// Serializes bytes as a base64 string
/// # Errors
/// Returns the serializer's error
pub fn serialize<S: Serializer, T: AsRef<[u8]>>(data: T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&BASE64_STANDARD.encode(data))
}

/// Deserializes bytes from a base64 string
/// # Errors
/// Returns an error if the string is not valid base64
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let s = String::deserialize(deserializer)?;
    BASE64_STANDARD
        .decode(s.as_bytes())
        .map_err(de::Error::custom)
}

/// Fixed size byte arrays, e.g. public keys and signatures
pub mod fixed_size {
    use serde::{de, Deserializer, Serializer};

    /// Serializes a byte array as a base64 string
    /// # Errors
    /// Returns the serializer's error
    pub fn serialize<S: Serializer, const N: usize>(
        data: &[u8; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        super::serialize(data, serializer)
    }

    /// Deserializes a byte array from a base64 string of exactly `N` bytes
    /// # Errors
    /// Returns an error if the string is not valid base64 or has the wrong length
    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
        deserializer: D,
    ) -> Result<[u8; N], D::Error> {
        let decoded = super::deserialize(deserializer)?;
        decoded.as_slice().try_into().map_err(|_| {
            de::Error::custom(format!("expected {N} bytes, found {}", decoded.len()))
        })
    }

    /// Optional byte arrays
    pub mod option {
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        #[derive(Serialize, Deserialize)]
        #[serde(transparent)]
        struct Wrapper<const N: usize>(#[serde(with = "super")] [u8; N]);

        /// Serializes an optional byte array
        /// # Errors
        /// Returns the serializer's error
        #[allow(clippy::ref_option)] // required by serde
        pub fn serialize<S: Serializer, const N: usize>(
            data: &Option<[u8; N]>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            data.map(Wrapper).serialize(serializer)
        }

        /// Deserializes an optional byte array
        /// # Errors
        /// Returns an error if a present value is invalid
        pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
            deserializer: D,
        ) -> Result<Option<[u8; N]>, D::Error> {
            Ok(Option::<Wrapper<N>>::deserialize(deserializer)?.map(|w| w.0))
        }
    }
}
