//! Hash algorithm selector.

use core::{fmt, str::FromStr};

#[cfg(not(feature = "std"))]
use alloc::string::ToString;

use cryptraits::convert::Len;

#[cfg(feature = "serde_derive")]
use serde::de::{Error, Unexpected, Visitor};

#[cfg(feature = "serde_derive")]
use serde::{Deserialize, Serialize};

use crate::{errors::KdfError, hmac};

/// Hash function underlying HMAC in Extract and Expand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 3] = [Self::Sha1, Self::Sha256, Self::Sha512];

    /// Digest length in bytes (HashLen).
    pub const fn hash_len(self) -> usize {
        match self {
            Self::Sha1 => <hmac::sha1::Hmac as Len>::LEN,
            Self::Sha256 => <hmac::sha256::Hmac as Len>::LEN,
            Self::Sha512 => <hmac::sha512::Hmac as Len>::LEN,
        }
    }

    /// Canonical tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha1 => "hmacsha1",
            Self::Sha256 => "hmacsha256",
            Self::Sha512 => "hmacsha512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = KdfError;

    /// Accepts the canonical tags plus `sha256`, `sha-256` and `hmac-sha256`
    /// style spellings, ignoring ASCII case.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let name = tag.trim();
        let name = strip_prefix_ignore_case(name, "hmac-")
            .or_else(|| strip_prefix_ignore_case(name, "hmac"))
            .unwrap_or(name);
        let name = strip_prefix_ignore_case(name, "sha-")
            .or_else(|| strip_prefix_ignore_case(name, "sha"))
            .ok_or_else(|| KdfError::UnsupportedAlgorithm(tag.to_string()))?;

        match name {
            "1" => Ok(Self::Sha1),
            "256" => Ok(Self::Sha256),
            "512" => Ok(Self::Sha512),
            _ => Err(KdfError::UnsupportedAlgorithm(tag.to_string())),
        }
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    match s.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => Some(&s[prefix.len()..]),
        _ => None,
    }
}

#[cfg(feature = "serde_derive")]
impl Serialize for HashAlgorithm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde_derive")]
impl<'de> Deserialize<'de> for HashAlgorithm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct HashAlgorithmVisitor;

        impl<'de> Visitor<'de> for HashAlgorithmVisitor {
            type Value = HashAlgorithm;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a hash algorithm tag such as \"hmacsha256\"")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                v.parse()
                    .or(Err(Error::invalid_value(Unexpected::Str(v), &self)))
            }
        }

        deserializer.deserialize_str(HashAlgorithmVisitor)
    }
}
