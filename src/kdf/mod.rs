//! Key derivation.

pub mod algorithm;
pub mod engine;
pub mod hkdf;
pub mod sha1;
pub mod sha256;
pub mod sha512;
