//! HKDF (RFC 5869) key derivation over pluggable HMAC primitives.
//!
//! [`HkdfEngine`] picks the hash at runtime from a [`HashAlgorithm`];
//! [`kdf::hkdf::Hkdf`] is the same construction, generic over any
//! [`cryptraits::hmac::Hmac`] implementation.
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod errors;
pub mod hmac;
pub mod kdf;

pub use errors::KdfError;
pub use kdf::algorithm::HashAlgorithm;
pub use kdf::engine::HkdfEngine;
