//! Crate custom errors.

#[cfg(not(feature = "std"))]
use alloc::string::String;

use cryptraits_macros::Error;

/// KDF algorithm error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KdfError {
    /// HMAC key rejected, or pseudorandom key shorter than HashLen.
    InvalidLength,
    /// Requested output needs more than 255 blocks.
    OutputTooLarge,
    /// Hash algorithm tag is not one of the supported set.
    UnsupportedAlgorithm(String),
}

/// HMAC algorithm errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HmacError {
    InvalidLength,
    MacError,
}
