//! HKDF with the hash function chosen at runtime.

use core::str::FromStr;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use log::{debug, trace};
use zeroize::Zeroizing;

use super::{algorithm::HashAlgorithm, sha1, sha256, sha512};
use crate::errors::KdfError;

/// Extract and Expand bound to one [`HashAlgorithm`].
///
/// The engine holds no key material. Every call creates its own HMAC
/// instances, so one engine can be shared freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HkdfEngine {
    algorithm: HashAlgorithm,
}

impl HkdfEngine {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Builds an engine from a textual tag such as `"hmacsha256"`.
    ///
    /// Unknown tags fail with [`KdfError::UnsupportedAlgorithm`].
    pub fn from_tag(tag: &str) -> Result<Self, KdfError> {
        match tag.parse() {
            Ok(algorithm) => Ok(Self::new(algorithm)),
            Err(e) => {
                debug!("rejecting unsupported hash algorithm tag {:?}", tag);
                Err(e)
            }
        }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn hash_len(&self) -> usize {
        self.algorithm.hash_len()
    }

    /// Largest `length` accepted by [`HkdfEngine::expand`].
    pub fn max_output_len(&self) -> usize {
        match self.algorithm {
            HashAlgorithm::Sha1 => sha1::Kdf::MAX_OUTPUT_LEN,
            HashAlgorithm::Sha256 => sha256::Kdf::MAX_OUTPUT_LEN,
            HashAlgorithm::Sha512 => sha512::Kdf::MAX_OUTPUT_LEN,
        }
    }

    /// Returns a `hash_len()`-byte pseudorandom key. An empty `salt` is
    /// replaced by `hash_len()` zero bytes.
    pub fn extract(&self, ikm: &[u8], salt: &[u8]) -> Result<Vec<u8>, KdfError> {
        trace!(
            "hkdf extract: algorithm={} ikm_len={} salt_len={}",
            self.algorithm,
            ikm.len(),
            salt.len()
        );

        match self.algorithm {
            HashAlgorithm::Sha1 => sha1::Kdf::extract(ikm, salt),
            HashAlgorithm::Sha256 => sha256::Kdf::extract(ikm, salt),
            HashAlgorithm::Sha512 => sha512::Kdf::extract(ikm, salt),
        }
    }

    /// Returns exactly `length` bytes of output keying material.
    ///
    /// `length == 0` yields an empty vector. Lengths above
    /// [`HkdfEngine::max_output_len`] fail with [`KdfError::OutputTooLarge`].
    pub fn expand(&self, prk: &[u8], info: &[u8], length: usize) -> Result<Vec<u8>, KdfError> {
        trace!(
            "hkdf expand: algorithm={} info_len={} length={}",
            self.algorithm,
            info.len(),
            length
        );

        match self.algorithm {
            HashAlgorithm::Sha1 => sha1::Kdf::expand_prk(prk, info, length),
            HashAlgorithm::Sha256 => sha256::Kdf::expand_prk(prk, info, length),
            HashAlgorithm::Sha512 => sha512::Kdf::expand_prk(prk, info, length),
        }
    }

    /// Same as [`HkdfEngine::expand`], writing into `okm`.
    pub fn expand_into(&self, prk: &[u8], info: &[u8], okm: &mut [u8]) -> Result<(), KdfError> {
        trace!(
            "hkdf expand: algorithm={} info_len={} length={}",
            self.algorithm,
            info.len(),
            okm.len()
        );

        match self.algorithm {
            HashAlgorithm::Sha1 => sha1::Kdf::expand_prk_into(prk, info, okm),
            HashAlgorithm::Sha256 => sha256::Kdf::expand_prk_into(prk, info, okm),
            HashAlgorithm::Sha512 => sha512::Kdf::expand_prk_into(prk, info, okm),
        }
    }

    /// Extract followed by Expand.
    pub fn derive(
        &self,
        ikm: &[u8],
        salt: &[u8],
        info: &[u8],
        length: usize,
    ) -> Result<Vec<u8>, KdfError> {
        if length > self.max_output_len() {
            return Err(KdfError::OutputTooLarge);
        }

        let prk = Zeroizing::new(self.extract(ikm, salt)?);
        self.expand(&prk, info, length)
    }
}

impl From<HashAlgorithm> for HkdfEngine {
    fn from(algorithm: HashAlgorithm) -> Self {
        Self::new(algorithm)
    }
}

impl FromStr for HkdfEngine {
    type Err = KdfError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::from_tag(tag)
    }
}
