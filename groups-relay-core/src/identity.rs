// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-size, hex-encoded identifiers used by Nostr events.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::serde::{deserialize_hex, serialize_hex};

/// Size of event ids (SHA-256 digests).
pub const EVENT_ID_LEN: usize = 32;

/// Size of x-only secp256k1 public keys.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Size of Schnorr signatures.
pub const SIGNATURE_LEN: usize = 64;

macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Create an instance from its raw bytes representation.
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Bytes of this value.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Convert the value to a hex string.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(value: [u8; $len]) -> Self {
                Self(value)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = IdError;

            fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
                let value_len = value.len();

                let checked_value: [u8; $len] = value
                    .try_into()
                    .map_err(|_| IdError::InvalidLength(value_len, $len))?;

                Ok(Self(checked_value))
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::try_from(hex::decode(value)?.as_slice())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.to_hex()).finish()
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serialize_hex(&self.0, serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let bytes = deserialize_hex(deserializer)?;

                bytes
                    .as_slice()
                    .try_into()
                    .map_err(|err: IdError| serde::de::Error::custom(err.to_string()))
            }
        }
    };
}

fixed_bytes!(
    /// 32-byte identifier of an event, the SHA-256 digest of its canonical serialization.
    EventId,
    EVENT_ID_LEN
);

fixed_bytes!(
    /// 32-byte x-only public key identifying the author of an event.
    PublicKey,
    PUBLIC_KEY_LEN
);

fixed_bytes!(
    /// 64-byte Schnorr signature over the event id.
    Signature,
    SIGNATURE_LEN
);

impl PublicKey {
    /// Return a shortened six character representation, useful for logging.
    pub fn fmt_short(&self) -> String {
        let hex = self.to_hex();
        hex[hex.len() - 6..].to_string()
    }
}

#[derive(Error, Debug)]
pub enum IdError {
    #[error("invalid bytes length of {0}, expected {1} bytes")]
    InvalidLength(usize, usize),

    #[error("invalid hex encoding: {0}")]
    InvalidHexEncoding(#[from] hex::FromHexError),
}
